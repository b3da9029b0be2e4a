//! Error types for the todo store.
//!
//! # Design
//! A missing id is not an error: lookups return `Option` and mutations return
//! `bool`. The only failure a caller can hit is invalid input, reported
//! through `ValidationError` so it is never confused with "not found".

use thiserror::Error;

/// Input rejected by the field constraints on a todo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    TitleMissing,

    #[error("title is {len} characters long; at most {max} allowed")]
    TitleTooLong { len: usize, max: usize },

    #[error("description is {len} characters long; at most {max} allowed")]
    DescriptionTooLong { len: usize, max: usize },
}

/// Errors returned by `TodoStore` and `TodoService` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("invalid todo: {0}")]
    Validation(#[from] ValidationError),
}
