//! Domain types for the todo store.
//!
//! # Design
//! `Todo` is the stored record and the value handed back to callers. `NewTodo`
//! is the add-input shape: it has no `id` or `created_date`, so a caller can
//! never choose either. Both derive serde so the server can put them on the
//! wire unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Stable identifier of a todo.
pub type TodoId = Uuid;

/// Maximum title length, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A single todo item owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Todo {
    /// Flips the completion flag. Set membership is left alone; only
    /// `TodoStore::mark_completed` moves an item into the completed set.
    pub fn toggle_completion(&mut self) {
        self.is_completed = !self.is_completed;
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.description.as_deref())
    }
}

/// Input for creating a todo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.description.as_deref())
    }

    /// Turns the input into a stored record with the given identity.
    pub(crate) fn into_todo(self, id: TodoId, created_date: DateTime<Utc>) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            is_completed: self.is_completed,
            created_date,
            due_date: self.due_date,
        }
    }
}

/// Lengths are counted in characters, not bytes. A title made only of
/// whitespace counts as missing.
fn validate_fields(title: &str, description: Option<&str>) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleMissing);
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong {
            len,
            max: MAX_TITLE_LEN,
        });
    }
    if let Some(description) = description {
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong {
                len,
                max: MAX_DESCRIPTION_LEN,
            });
        }
    }
    Ok(())
}
