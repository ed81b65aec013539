//! Optimistic create / toggle / delete against the local store.
//!
//! # Design
//! Every mutation runs in three phases:
//! 1. `begin_*` applies the tentative change to the `TodoStore` and returns
//!    the request to send plus a `Pending*` value describing how to undo it.
//! 2. The host executes the request.
//! 3. `settle_*` (or `fail_*` when the round-trip itself broke) consumes the
//!    `Pending*` value and either commits or rolls back.
//!
//! The undo information travels explicitly with the request rather than
//! being captured, so several actions can be in flight at once and settle in
//! any order. Two actions on the same item are not sequenced; whichever
//! settles last wins.

use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::error::{ApiError, TodoError};
use crate::http::{HttpRequest, HttpResponse};
use crate::store::{RemovedTodo, TodoStore};
use crate::types::{CreateTodo, DeletedTodo, Todo, TodoId, UpdateTodo, DEFAULT_USER_ID};

/// Undo record for an optimistic create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCreate {
    pub placeholder_id: TodoId,
}

/// Undo record for an optimistic completion toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub id: TodoId,
    pub previous: bool,
}

/// Undo record for an optimistic delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub removed: RemovedTodo,
}

impl PendingDelete {
    pub fn id(&self) -> TodoId {
        self.removed.todo.id
    }
}

#[derive(Debug, Clone)]
pub struct Coordinator {
    client: TodoClient,
    user_id: i64,
    next_placeholder: TodoId,
}

impl Coordinator {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            user_id: DEFAULT_USER_ID,
            next_placeholder: -1,
        }
    }

    /// Owner id stamped on created todos.
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    fn placeholder_id(&mut self) -> TodoId {
        let id = self.next_placeholder;
        self.next_placeholder -= 1;
        id
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    /// Prepend a placeholder for `title` and build the create request.
    ///
    /// `title` is expected to have passed `validate_title` already.
    pub fn begin_create(
        &mut self,
        store: &mut TodoStore,
        title: String,
    ) -> Result<(PendingCreate, HttpRequest), TodoError> {
        let input = CreateTodo {
            todo: title,
            completed: false,
            user_id: self.user_id,
        };
        let request = self.client.build_create_todo(&input).map_err(TodoError::Create)?;

        let placeholder_id = self.placeholder_id();
        store.prepend(Todo {
            id: placeholder_id,
            todo: input.todo,
            completed: input.completed,
            user_id: input.user_id,
        });
        debug!(placeholder_id, "optimistic create applied");
        Ok((PendingCreate { placeholder_id }, request))
    }

    pub fn settle_create(
        &self,
        store: &mut TodoStore,
        pending: PendingCreate,
        response: HttpResponse,
    ) -> Result<Todo, TodoError> {
        match self.client.parse_create_todo(response) {
            Ok(todo) => {
                if !store.replace_by_id(pending.placeholder_id, todo.clone()) {
                    debug!(placeholder_id = pending.placeholder_id, "placeholder gone, prepending confirmed item");
                    store.prepend(todo.clone());
                }
                info!(placeholder_id = pending.placeholder_id, id = todo.id, "create confirmed");
                Ok(todo)
            }
            Err(err) => Err(self.fail_create(store, pending, err)),
        }
    }

    /// Roll back a create whose request never completed or was rejected.
    pub fn fail_create(&self, store: &mut TodoStore, pending: PendingCreate, err: ApiError) -> TodoError {
        warn!(placeholder_id = pending.placeholder_id, error = %err, "create failed, removing placeholder");
        store.remove_by_id(pending.placeholder_id);
        TodoError::Create(err)
    }

    // -----------------------------------------------------------------------
    // Toggle
    // -----------------------------------------------------------------------

    /// Flip completion of `id` locally and build the matching update.
    pub fn begin_toggle(
        &mut self,
        store: &mut TodoStore,
        id: TodoId,
    ) -> Result<(PendingToggle, HttpRequest), TodoError> {
        let previous = store.get(id).ok_or(TodoError::NotFound(id))?.completed;
        let input = UpdateTodo {
            todo: None,
            completed: Some(!previous),
        };
        let request = self.client.build_update_todo(id, &input).map_err(TodoError::Update)?;

        store.set_completion(id, !previous);
        debug!(id, completed = !previous, "optimistic toggle applied");
        Ok((PendingToggle { id, previous }, request))
    }

    pub fn settle_toggle(
        &self,
        store: &mut TodoStore,
        pending: PendingToggle,
        response: HttpResponse,
    ) -> Result<Todo, TodoError> {
        match self.client.parse_update_todo(response) {
            Ok(todo) => {
                info!(id = pending.id, completed = todo.completed, "toggle confirmed");
                Ok(todo)
            }
            Err(err) => Err(self.fail_toggle(store, pending, err)),
        }
    }

    /// Restore the completion flag recorded in `pending`.
    pub fn fail_toggle(&self, store: &mut TodoStore, pending: PendingToggle, err: ApiError) -> TodoError {
        warn!(id = pending.id, error = %err, "toggle failed, restoring completion flag");
        store.set_completion(pending.id, pending.previous);
        TodoError::Update(err)
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Remove `id` locally and build the delete request.
    pub fn begin_delete(
        &mut self,
        store: &mut TodoStore,
        id: TodoId,
    ) -> Result<(PendingDelete, HttpRequest), TodoError> {
        let removed = store.remove_by_id(id).ok_or(TodoError::NotFound(id))?;
        let request = self.client.build_delete_todo(id);
        debug!(id, "optimistic delete applied");
        Ok((PendingDelete { removed }, request))
    }

    pub fn settle_delete(
        &self,
        store: &mut TodoStore,
        pending: PendingDelete,
        response: HttpResponse,
    ) -> Result<DeletedTodo, TodoError> {
        match self.client.parse_delete_todo(response) {
            Ok(deleted) => {
                info!(id = deleted.id, "delete confirmed");
                Ok(deleted)
            }
            Err(err) => Err(self.fail_delete(store, pending, err)),
        }
    }

    /// Put the deleted item back where it was.
    pub fn fail_delete(&self, store: &mut TodoStore, pending: PendingDelete, err: ApiError) -> TodoError {
        let id = pending.id();
        warn!(id, error = %err, "delete failed, restoring item");
        if !store.restore(pending.removed) {
            debug!(id, "item already reloaded, nothing to restore");
        }
        TodoError::Delete(err)
    }
}
