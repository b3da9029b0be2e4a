//! In-memory todo store and the service façade callers use to reach it.
//!
//! # Overview
//! `TodoStore` keeps two newest-first sequences, active and completed, and
//! enforces the invariants: ids are unique across both, `id` and
//! `created_date` never change, and only `mark_completed` moves an item into
//! the completed sequence. `TodoService` wraps a store with an async-capable
//! contract and change notification.
//!
//! # Design
//! - No global state. Whoever composes the application constructs the store
//!   and hands it to the service.
//! - Absence is not an error: lookups return `Option`, mutations return `bool`.
//!   `TodoError` only carries validation failures.
//! - No locking. Mutations take `&mut self`; callers that share a service
//!   across tasks wrap it themselves.

pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::{TodoError, ValidationError};
pub use service::{SubscriptionId, TodoService};
pub use store::TodoStore;
pub use types::{NewTodo, Todo, TodoId, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
