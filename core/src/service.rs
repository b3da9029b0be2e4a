//! Request/response façade over `TodoStore`.
//!
//! # Design
//! `TodoService` owns the store it is given and forwards every call unchanged.
//! The async signatures suit callers that live on an event loop; nothing in
//! here awaits. Mutations take `&mut self`, so two mutations can never
//! interleave on one service.
//!
//! Subscribers registered with `subscribe` are called synchronously, in
//! registration order, after every mutation that changed the store and before
//! the mutating call returns. Callbacks receive no payload; they re-query.

use std::fmt;

use tracing::trace;

use crate::error::TodoError;
use crate::store::TodoStore;
use crate::types::{NewTodo, Todo, TodoId};

type Observer = Box<dyn Fn() + Send + Sync>;

/// Handle returned by `TodoService::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The component external callers talk to.
#[derive(Default)]
pub struct TodoService {
    store: TodoStore,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for TodoService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoService")
            .field("store", &self.store)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl TodoService {
    pub fn new(store: TodoStore) -> Self {
        Self {
            store,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current active items, for observers that render state directly.
    pub fn todos(&self) -> &[Todo] {
        self.store.active()
    }

    /// Current completed items.
    pub fn completed_todos(&self) -> &[Todo] {
        self.store.completed()
    }

    /// Registers a change callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub async fn get_all(&self) -> Vec<Todo> {
        self.store.get_all()
    }

    pub async fn get_completed(&self) -> Vec<Todo> {
        self.store.get_completed()
    }

    pub async fn get_by_id(&self, id: TodoId) -> Option<Todo> {
        self.store.get_by_id(id)
    }

    pub async fn add(&mut self, input: NewTodo) -> Result<Todo, TodoError> {
        let todo = self.store.add(input)?;
        self.notify();
        Ok(todo)
    }

    pub async fn update(&mut self, todo: &Todo) -> Result<bool, TodoError> {
        let updated = self.store.update(todo)?;
        if updated {
            self.notify();
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: TodoId) -> bool {
        let deleted = self.store.delete(id);
        if deleted {
            self.notify();
        }
        deleted
    }

    pub async fn mark_completed(&mut self, id: TodoId) -> bool {
        let completed = self.store.mark_completed(id);
        if completed {
            self.notify();
        }
        completed
    }

    fn notify(&self) {
        trace!(subscribers = self.observers.len(), "notifying todo subscribers");
        for (_, callback) in &self.observers {
            callback();
        }
    }
}
