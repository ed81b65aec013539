//! Error types for the todo API client and the optimistic session.
//!
//! # Design
//! `ApiError` describes what went wrong on the wire. `TodoError` names which
//! user action failed and wraps the `ApiError` so the message shown to the
//! user reads "Failed to delete todo: HTTP 500: ...". `NotFound` keeps its
//! own variant because callers frequently distinguish "the resource does not
//! exist" from "the server returned an unexpected status."

use thiserror::Error;

use crate::types::TodoId;
use crate::validation::TitleError;

/// Errors returned by `TodoClient` parse methods and host transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-success status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The host could not complete the round-trip at all.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// A failed user-facing action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("Failed to fetch todos: {0}")]
    Fetch(#[source] ApiError),

    #[error("Failed to create todo: {0}")]
    Create(#[source] ApiError),

    #[error("Failed to update todo: {0}")]
    Update(#[source] ApiError),

    #[error("Failed to delete todo: {0}")]
    Delete(#[source] ApiError),

    /// The action named an id that is not in the loaded page.
    #[error("Todo {0} not found")]
    NotFound(TodoId),

    #[error(transparent)]
    InvalidTitle(#[from] TitleError),
}
