//! Optimistic client core for a remote todo service.
//!
//! # Overview
//! Keeps a local mirror of one page of todos, applies create / toggle /
//! delete changes to it before the server confirms them, and reconciles or
//! rolls back when the responses arrive. Builds `HttpRequest` values and
//! parses `HttpResponse` values without touching the network (host-does-IO
//! pattern): the caller executes every round-trip, so the whole crate is
//! deterministic and testable without a server.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url` and splits each
//!   remote operation into `build_*` and `parse_*`.
//! - `TodoStore` is the only place items and display order are mutated.
//! - `Coordinator` runs the before-request / settle phases, passing undo
//!   information explicitly in `Pending*` values.
//! - `TodoSession` is what a front-end drives: events in, `Dispatch`es out,
//!   responses back through `settle`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod coordinator;
pub mod error;
pub mod http;
pub mod order;
pub mod pagination;
pub mod session;
pub mod stats;
pub mod store;
pub mod types;
pub mod validation;

pub use client::TodoClient;
pub use coordinator::{Coordinator, PendingCreate, PendingDelete, PendingToggle};
pub use error::{ApiError, TodoError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pagination::{FetchTicket, Pagination};
pub use session::{
    Action, DeleteConfirmation, Dispatch, MutationStatus, Notification, NotificationLevel, SessionConfig, Ticket,
    TodoSession,
};
pub use stats::TodoStats;
pub use store::{RemovedTodo, TodoStore};
pub use types::{CreateTodo, DeletedTodo, Todo, TodoId, TodoPage, UpdateTodo};
pub use validation::{validate_title, TitleError};
