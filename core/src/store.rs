//! In-memory owner of the active and completed todo sequences.
//!
//! # Design
//! Two `Vec`s, newest first. Every id-keyed operation goes through `locate`,
//! which searches `active` before `completed` and reports which sequence holds
//! the item. Only `mark_completed` moves an item between sequences; `update`
//! edits in place even when it flips `is_completed`.

use chrono::{Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::TodoError;
use crate::types::{NewTodo, Todo, TodoId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Partition {
    Active,
    Completed,
}

/// The authoritative list of todos.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    active: Vec<Todo>,
    completed: Vec<Todo>,
}

impl TodoStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with three demonstration items: one due tomorrow, one
    /// already completed and overdue, one without a due date. Completed seed
    /// items land in the completed sequence in fixture order.
    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        let seed = [
            NewTodo::new("Buy groceries")
                .with_description("Milk, Bread, Eggs")
                .with_due_date(now + Duration::days(1)),
            NewTodo::new("Read book")
                .with_description("Finish chapter 4")
                .with_due_date(now - Duration::days(2))
                .completed(),
            NewTodo::new("Call Alice"),
        ];

        let mut store = Self::new();
        for input in seed {
            let todo = input.into_todo(store.fresh_id(), now);
            if todo.is_completed {
                store.completed.push(todo);
            } else {
                store.active.push(todo);
            }
        }
        debug!(
            active = store.active.len(),
            completed = store.completed.len(),
            "seeded todo store"
        );
        store
    }

    /// Active items, most recently added first.
    pub fn active(&self) -> &[Todo] {
        &self.active
    }

    /// Completed items, most recently completed first.
    pub fn completed(&self) -> &[Todo] {
        &self.completed
    }

    /// Total number of items across both sequences.
    pub fn len(&self) -> usize {
        self.active.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }

    pub fn get_all(&self) -> Vec<Todo> {
        self.active.clone()
    }

    pub fn get_completed(&self) -> Vec<Todo> {
        self.completed.clone()
    }

    pub fn get_by_id(&self, id: TodoId) -> Option<Todo> {
        self.locate(id)
            .map(|(partition, index)| self.sequence(partition)[index].clone())
    }

    /// Validates `input`, assigns a fresh id and creation time, and inserts the
    /// new record at the front of the active sequence.
    pub fn add(&mut self, input: NewTodo) -> Result<Todo, TodoError> {
        input.validate()?;
        let todo = input.into_todo(self.fresh_id(), Utc::now());
        debug!(todo_id = %todo.id, "added todo");
        self.active.insert(0, todo.clone());
        Ok(todo)
    }

    /// Overwrites title, description, completion flag and due date of the
    /// record whose id matches `todo.id`. `id` and `created_date` of the stored
    /// record are kept. Returns `Ok(false)` when no record has that id.
    pub fn update(&mut self, todo: &Todo) -> Result<bool, TodoError> {
        todo.validate()?;
        let Some((partition, index)) = self.locate(todo.id) else {
            return Ok(false);
        };

        let existing = &mut self.sequence_mut(partition)[index];
        existing.title.clone_from(&todo.title);
        existing.description.clone_from(&todo.description);
        existing.is_completed = todo.is_completed;
        existing.due_date = todo.due_date;
        debug!(todo_id = %todo.id, ?partition, "updated todo");
        Ok(true)
    }

    /// Removes the record from whichever sequence holds it.
    pub fn delete(&mut self, id: TodoId) -> bool {
        match self.locate(id) {
            Some((partition, index)) => {
                self.sequence_mut(partition).remove(index);
                debug!(todo_id = %id, ?partition, "deleted todo");
                true
            }
            None => false,
        }
    }

    /// Moves an active record to the front of the completed sequence and sets
    /// its flag. Records already in the completed sequence are not found.
    pub fn mark_completed(&mut self, id: TodoId) -> bool {
        let Some(index) = self.active.iter().position(|todo| todo.id == id) else {
            return false;
        };
        let mut todo = self.active.remove(index);
        todo.is_completed = true;
        self.completed.insert(0, todo);
        debug!(todo_id = %id, "marked todo completed");
        true
    }

    fn locate(&self, id: TodoId) -> Option<(Partition, usize)> {
        [Partition::Active, Partition::Completed]
            .into_iter()
            .find_map(|partition| {
                self.sequence(partition)
                    .iter()
                    .position(|todo| todo.id == id)
                    .map(|index| (partition, index))
            })
    }

    fn sequence(&self, partition: Partition) -> &Vec<Todo> {
        match partition {
            Partition::Active => &self.active,
            Partition::Completed => &self.completed,
        }
    }

    fn sequence_mut(&mut self, partition: Partition) -> &mut Vec<Todo> {
        match partition {
            Partition::Active => &mut self.active,
            Partition::Completed => &mut self.completed,
        }
    }

    fn fresh_id(&self) -> TodoId {
        loop {
            let id = Uuid::new_v4();
            if self.locate(id).is_none() {
                return id;
            }
        }
    }
}
