//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the remote service's JSON schema (camelCase field
//! names, integer ids) but are defined independently from the mock-server
//! crate. Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Identifier of a todo. The server assigns positive ids; optimistic
/// placeholders inserted before confirmation are always negative.
pub type TodoId = i64;

/// Owner id sent with new todos when the caller does not choose one.
pub const DEFAULT_USER_ID: i64 = 1;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub todo: String,
    pub completed: bool,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

impl Todo {
    /// Whether this item is an unconfirmed local placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.id < 0
    }
}

/// One page of the todo listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub todo: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Confirmation body returned by a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTodo {
    pub id: TodoId,
    pub todo: String,
    pub completed: bool,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_on: Option<String>,
}

fn default_user_id() -> i64 {
    DEFAULT_USER_ID
}
