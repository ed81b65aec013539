//! One user's view of the todo list: the state a front-end renders and the
//! events it feeds in.
//!
//! # Design
//! `TodoSession` owns the store, the page cursor, and the coordinator, and is
//! the only thing a host talks to. Every event that needs the network returns
//! `Dispatch` values; the host executes each `request` however it likes and
//! hands the response back through `settle` together with the `ticket` it
//! came with. Follow-up work (a refresh of the current page, say) comes back
//! out of `settle` as more dispatches.
//!
//! Background refreshes are held back while any optimistic mutation is in
//! flight and issued once the last one settles, so a refetch can never land
//! on top of a tentative change. A page load the host asks for explicitly is
//! sent at once; when it lands, the changes still in flight are re-applied
//! over the fresh page.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::client::TodoClient;
use crate::coordinator::{Coordinator, PendingCreate, PendingDelete, PendingToggle};
use crate::error::{ApiError, TodoError};
use crate::http::{HttpRequest, HttpResponse};
use crate::order;
use crate::pagination::{FetchTicket, Pagination, DEFAULT_PAGE_SIZE};
use crate::stats::TodoStats;
use crate::store::TodoStore;
use crate::types::{Todo, TodoId, DEFAULT_USER_ID};
use crate::validation::validate_title;

/// Tunables for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub page_size: u32,
    /// Owner id sent with created todos.
    pub user_id: i64,
    /// Re-fetch the current page after mutations settle.
    pub refresh_after_mutation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            user_id: DEFAULT_USER_ID,
            refresh_after_mutation: true,
        }
    }
}

/// What a response belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ticket {
    Fetch(FetchTicket),
    Create(PendingCreate),
    Toggle(PendingToggle),
    Delete(PendingDelete),
}

/// A request for the host to execute, tagged with its continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Toggle,
    Delete,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, Default)]
struct ActionTracker {
    in_flight: usize,
    last: MutationStatus,
}

impl ActionTracker {
    fn start(&mut self) {
        self.in_flight += 1;
    }

    fn finish(&mut self, ok: bool) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.last = if ok {
            MutationStatus::Success
        } else {
            MutationStatus::Error
        };
    }

    fn status(&self) -> MutationStatus {
        if self.in_flight > 0 {
            MutationStatus::Pending
        } else {
            self.last
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// A delete waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub id: TodoId,
    pub title: String,
}

#[derive(Debug)]
pub struct TodoSession {
    config: SessionConfig,
    store: TodoStore,
    pagination: Pagination,
    coordinator: Coordinator,
    create: ActionTracker,
    toggle: ActionTracker,
    delete: ActionTracker,
    /// A load of the current page is owed once no mutation is in flight.
    refresh_wanted: bool,
    // Tentative changes still awaiting the server, oldest first.
    pending_creates: Vec<Todo>,
    pending_toggles: Vec<PendingToggle>,
    pending_deletes: Vec<TodoId>,
    notifications: VecDeque<Notification>,
    delete_confirmation: Option<DeleteConfirmation>,
    load_error: Option<TodoError>,
}

impl TodoSession {
    pub fn new(client: TodoClient, config: SessionConfig) -> Self {
        let coordinator = Coordinator::new(client).with_user_id(config.user_id);
        Self {
            pagination: Pagination::new(config.page_size),
            config,
            store: TodoStore::new(),
            coordinator,
            create: ActionTracker::default(),
            toggle: ActionTracker::default(),
            delete: ActionTracker::default(),
            refresh_wanted: false,
            pending_creates: Vec::new(),
            pending_toggles: Vec::new(),
            pending_deletes: Vec::new(),
            notifications: VecDeque::new(),
            delete_confirmation: None,
            load_error: None,
        }
    }

    // -----------------------------------------------------------------------
    // Read side
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Items in rendering order.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.store.ordered()
    }

    pub fn stats(&self) -> TodoStats {
        self.store.stats()
    }

    pub fn status(&self, action: Action) -> MutationStatus {
        match action {
            Action::Create => self.create.status(),
            Action::Toggle => self.toggle.status(),
            Action::Delete => self.delete.status(),
        }
    }

    pub fn delete_confirmation(&self) -> Option<&DeleteConfirmation> {
        self.delete_confirmation.as_ref()
    }

    /// The most recent page-load failure, cleared by the next good load.
    pub fn load_error(&self) -> Option<&TodoError> {
        self.load_error.as_ref()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    // -----------------------------------------------------------------------
    // Paging
    // -----------------------------------------------------------------------

    /// Fetch the current page. Whatever is loaded stays visible meanwhile.
    pub fn load(&mut self) -> Dispatch {
        let ticket = self.pagination.begin_fetch();
        debug!(page = ticket.page, generation = ticket.generation, "fetching page");
        let request = self
            .coordinator
            .client()
            .build_list_todos(ticket.page, self.pagination.page_size());
        Dispatch {
            ticket: Ticket::Fetch(ticket),
            request,
        }
    }

    /// Switch to `page`, fetching it if it differs from the current one.
    pub fn change_page(&mut self, page: u32) -> Option<Dispatch> {
        if self.pagination.set_page(page) {
            Some(self.load())
        } else {
            None
        }
    }

    pub fn next_page(&mut self) -> Option<Dispatch> {
        if !self.pagination.can_go_next() {
            return None;
        }
        self.change_page(self.pagination.current_page() + 1)
    }

    pub fn previous_page(&mut self) -> Option<Dispatch> {
        if !self.pagination.can_go_previous() {
            return None;
        }
        self.change_page(self.pagination.current_page() - 1)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Validate `raw_title` and start an optimistic create.
    ///
    /// A rejected title is returned without touching state or notifying;
    /// the form shows it next to the input.
    pub fn submit(&mut self, raw_title: &str) -> Result<Dispatch, TodoError> {
        let title = validate_title(raw_title)?;
        match self.coordinator.begin_create(&mut self.store, title) {
            Ok((pending, request)) => {
                self.supersede_fetch();
                self.pending_creates.extend(self.store.get(pending.placeholder_id).cloned());
                self.create.start();
                Ok(Dispatch {
                    ticket: Ticket::Create(pending),
                    request,
                })
            }
            Err(err) => Err(self.report(err)),
        }
    }

    pub fn toggle(&mut self, id: TodoId) -> Result<Dispatch, TodoError> {
        match self.coordinator.begin_toggle(&mut self.store, id) {
            Ok((pending, request)) => {
                self.supersede_fetch();
                self.pending_toggles.push(pending.clone());
                self.toggle.start();
                Ok(Dispatch {
                    ticket: Ticket::Toggle(pending),
                    request,
                })
            }
            Err(err) => Err(self.report(err)),
        }
    }

    /// Ask for confirmation before deleting `id`. `None` if it isn't loaded.
    pub fn request_delete(&mut self, id: TodoId) -> Option<&DeleteConfirmation> {
        let title = self.store.get(id)?.todo.clone();
        self.delete_confirmation = Some(DeleteConfirmation { id, title });
        self.delete_confirmation.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirmation = None;
    }

    /// Start the delete awaiting confirmation. The confirmation stays open
    /// until the delete settles.
    pub fn confirm_delete(&mut self) -> Option<Dispatch> {
        let id = self.delete_confirmation.as_ref()?.id;
        match self.coordinator.begin_delete(&mut self.store, id) {
            Ok((pending, request)) => {
                self.supersede_fetch();
                self.pending_deletes.push(id);
                self.delete.start();
                Some(Dispatch {
                    ticket: Ticket::Delete(pending),
                    request,
                })
            }
            Err(err) => {
                self.delete_confirmation = None;
                self.report(err);
                None
            }
        }
    }

    /// Apply a drag from `old_index` to `new_index` of the display order.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> bool {
        let moved = order::move_id(self.store.display_order(), old_index, new_index);
        if moved == self.store.display_order() {
            return false;
        }
        self.store.set_display_order(moved)
    }

    /// Apply a drag of `active` dropped over `over`.
    pub fn reorder_by_id(&mut self, active: TodoId, over: TodoId) -> bool {
        match order::positions_of(self.store.display_order(), active, over) {
            Some((old_index, new_index)) => self.reorder(old_index, new_index),
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Settling
    // -----------------------------------------------------------------------

    /// Feed back the response to a dispatched request.
    pub fn settle(&mut self, ticket: Ticket, response: HttpResponse) -> Vec<Dispatch> {
        self.settle_result(ticket, Ok(response))
    }

    /// Report that a dispatched request never produced a response.
    pub fn settle_transport_error(&mut self, ticket: Ticket, message: impl Into<String>) -> Vec<Dispatch> {
        self.settle_result(ticket, Err(ApiError::Transport(message.into())))
    }

    fn settle_result(&mut self, ticket: Ticket, outcome: Result<HttpResponse, ApiError>) -> Vec<Dispatch> {
        match ticket {
            Ticket::Fetch(fetch) => {
                self.settle_fetch(fetch, outcome);
                Vec::new()
            }
            Ticket::Create(pending) => self.settle_create(pending, outcome),
            Ticket::Toggle(pending) => self.settle_toggle(pending, outcome),
            Ticket::Delete(pending) => self.settle_delete(pending, outcome),
        }
    }

    fn settle_fetch(&mut self, ticket: FetchTicket, outcome: Result<HttpResponse, ApiError>) {
        if !self.pagination.is_current(ticket) {
            debug!(page = ticket.page, generation = ticket.generation, "dropping superseded fetch");
            return;
        }
        let parsed = outcome.and_then(|response| self.coordinator.client().parse_list_todos(response));
        match parsed {
            Ok(page) => {
                self.pagination.complete_fetch(ticket, page.total);
                info!(page = ticket.page, count = page.todos.len(), total = page.total, "page loaded");
                self.store.replace_all(page.todos);
                self.reapply_pending();
                self.load_error = None;
            }
            Err(err) => {
                self.pagination.fail_fetch(ticket);
                warn!(page = ticket.page, error = %err, "page load failed");
                let err = self.report(TodoError::Fetch(err));
                self.load_error = Some(err);
            }
        }
    }

    fn settle_create(&mut self, pending: PendingCreate, outcome: Result<HttpResponse, ApiError>) -> Vec<Dispatch> {
        self.pending_creates.retain(|todo| todo.id != pending.placeholder_id);
        let result = match outcome {
            Ok(response) => self.coordinator.settle_create(&mut self.store, pending, response),
            Err(err) => Err(self.coordinator.fail_create(&mut self.store, pending, err)),
        };
        self.create.finish(result.is_ok());
        match result {
            Ok(_) => {
                self.notify(NotificationLevel::Success, "Todo added successfully!");
                if self.pagination.reset_to_first() {
                    self.refresh_wanted = true;
                }
                self.follow_up(true)
            }
            Err(err) => {
                self.report(err);
                self.follow_up(false)
            }
        }
    }

    fn settle_toggle(&mut self, pending: PendingToggle, outcome: Result<HttpResponse, ApiError>) -> Vec<Dispatch> {
        if let Some(index) = self.pending_toggles.iter().position(|t| *t == pending) {
            self.pending_toggles.remove(index);
        }
        let result = match outcome {
            Ok(response) => self.coordinator.settle_toggle(&mut self.store, pending, response),
            Err(err) => Err(self.coordinator.fail_toggle(&mut self.store, pending, err)),
        };
        self.toggle.finish(result.is_ok());
        match result {
            Ok(todo) => {
                let state = if todo.completed { "completed" } else { "incomplete" };
                self.notify(NotificationLevel::Success, format!("Todo marked as {state}!"));
                self.follow_up(true)
            }
            Err(err) => {
                self.report(err);
                self.follow_up(false)
            }
        }
    }

    fn settle_delete(&mut self, pending: PendingDelete, outcome: Result<HttpResponse, ApiError>) -> Vec<Dispatch> {
        let id = pending.id();
        if let Some(index) = self.pending_deletes.iter().position(|&d| d == id) {
            self.pending_deletes.remove(index);
        }
        let result = match outcome {
            Ok(response) => self.coordinator.settle_delete(&mut self.store, pending, response),
            Err(err) => Err(self.coordinator.fail_delete(&mut self.store, pending, err)),
        };
        self.delete.finish(result.is_ok());
        if self.delete_confirmation.as_ref().is_some_and(|c| c.id == id) {
            self.delete_confirmation = None;
        }
        match result {
            Ok(_) => self.notify(NotificationLevel::Success, "Todo deleted successfully!"),
            Err(err) => {
                self.report(err);
            }
        }
        // A failed delete is reconciled against the server as well.
        self.follow_up(true)
    }

    /// Queue a background refresh if asked for, and issue any owed load of
    /// the current page once no optimistic change is outstanding.
    fn follow_up(&mut self, wants_refresh: bool) -> Vec<Dispatch> {
        if wants_refresh && self.config.refresh_after_mutation {
            self.refresh_wanted = true;
        }
        if !self.refresh_wanted || self.mutations_in_flight() > 0 {
            return Vec::new();
        }
        self.refresh_wanted = false;
        vec![self.load()]
    }

    /// Cancel an in-flight page fetch so it cannot overwrite the change being
    /// started. The cancelled page is fetched again once mutations settle.
    fn supersede_fetch(&mut self) {
        if self.pagination.supersede() {
            debug!(page = self.pagination.current_page(), "page fetch superseded by mutation");
            self.refresh_wanted = true;
        }
    }

    /// Lay the changes still awaiting the server over a freshly loaded page.
    fn reapply_pending(&mut self) {
        for placeholder in &self.pending_creates {
            self.store.prepend(placeholder.clone());
        }
        for toggle in &self.pending_toggles {
            self.store.set_completion(toggle.id, !toggle.previous);
        }
        for &id in &self.pending_deletes {
            self.store.remove_by_id(id);
        }
    }

    fn mutations_in_flight(&self) -> usize {
        self.create.in_flight + self.toggle.in_flight + self.delete.in_flight
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push_back(Notification {
            level,
            message: message.into(),
        });
    }

    /// Surface `err` to the user and hand it back.
    fn report(&mut self, err: TodoError) -> TodoError {
        self.notify(NotificationLevel::Error, err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_body(ids: &[TodoId], total: u64) -> String {
        let todos: Vec<Todo> = ids
            .iter()
            .map(|&id| Todo {
                id,
                todo: format!("item {id}"),
                completed: id % 2 == 0,
                user_id: 1,
            })
            .collect();
        serde_json::json!({ "todos": todos, "total": total, "skip": 0, "limit": 30 }).to_string()
    }

    fn session(refresh: bool) -> TodoSession {
        TodoSession::new(
            TodoClient::new("http://localhost:3000"),
            SessionConfig {
                refresh_after_mutation: refresh,
                ..SessionConfig::default()
            },
        )
    }

    fn loaded(ids: &[TodoId], total: u64, refresh: bool) -> TodoSession {
        let mut session = session(refresh);
        let dispatch = session.load();
        assert!(session.settle(dispatch.ticket, HttpResponse::new(200, page_body(ids, total))).is_empty());
        session
    }

    fn visible_ids(session: &TodoSession) -> Vec<TodoId> {
        session.visible_todos().iter().map(|t| t.id).collect()
    }

    #[test]
    fn load_populates_store_and_totals() {
        let session = loaded(&[1, 2, 3], 65, false);
        assert_eq!(visible_ids(&session), vec![1, 2, 3]);
        assert_eq!(session.pagination().total_pages(), 3);
        assert!(!session.pagination().is_loading());
        assert!(!session.pagination().is_fetching());
    }

    #[test]
    fn failed_load_keeps_previous_items_and_reports() {
        let mut session = loaded(&[1, 2], 2, false);
        let dispatch = session.load();
        session.settle(dispatch.ticket, HttpResponse::new(500, "down"));

        assert_eq!(visible_ids(&session), vec![1, 2]);
        assert!(matches!(session.load_error(), Some(TodoError::Fetch(_))));
        let notes = session.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert!(notes[0].message.starts_with("Failed to fetch todos"));
    }

    #[test]
    fn stale_fetch_does_not_overwrite_optimistic_toggle() {
        let mut session = loaded(&[1, 3], 2, false);
        let refetch = session.load();
        let toggle = session.toggle(1).unwrap();

        // The refetch lands with the pre-toggle value and must be ignored.
        session.settle(refetch.ticket, HttpResponse::new(200, page_body(&[1, 3], 2)));
        assert!(session.store().get(1).unwrap().completed);

        session.settle(
            toggle.ticket,
            HttpResponse::new(200, r#"{"id":1,"todo":"item 1","completed":true,"userId":1}"#),
        );
        assert!(session.store().get(1).unwrap().completed);
    }

    #[test]
    fn create_success_resets_to_first_page_and_refetches() {
        let mut session = loaded(&[31, 32], 65, false);
        let dispatch = session.change_page(2).unwrap();
        session.settle(dispatch.ticket, HttpResponse::new(200, page_body(&[31, 32], 65)));
        assert_eq!(session.pagination().current_page(), 2);

        let create = session.submit("  Buy milk ").unwrap();
        assert_eq!(session.status(Action::Create), MutationStatus::Pending);
        assert_eq!(session.visible_todos()[0].todo, "Buy milk");

        let follow_ups = session.settle(
            create.ticket,
            HttpResponse::new(201, r#"{"id":501,"todo":"Buy milk","completed":false,"userId":1}"#),
        );
        assert_eq!(session.pagination().current_page(), 1);
        assert_eq!(follow_ups.len(), 1);
        assert!(follow_ups[0].request.path.ends_with("/todos?limit=30&skip=0"));
        assert_eq!(visible_ids(&session)[0], 501);
        assert_eq!(session.status(Action::Create), MutationStatus::Success);
    }

    #[test]
    fn page_change_cancelled_by_mutation_is_fetched_again() {
        let mut session = loaded(&[1, 2], 65, false);
        let page_two = session.change_page(2).unwrap();
        let toggle = session.toggle(1).unwrap();
        assert!(!session.pagination().is_fetching());

        // Superseded by the toggle, so dropped.
        let dropped = session.settle(page_two.ticket, HttpResponse::new(200, page_body(&[31, 32], 65)));
        assert!(dropped.is_empty());
        assert_eq!(visible_ids(&session), vec![1, 2]);

        let follow_ups = session.settle(toggle.ticket, HttpResponse::new(500, "down"));
        assert_eq!(follow_ups.len(), 1);
        assert!(matches!(follow_ups[0].ticket, Ticket::Fetch(FetchTicket { page: 2, .. })));
        assert!(follow_ups[0].request.path.ends_with("/todos?limit=30&skip=30"));
        assert!(session.pagination().is_fetching());

        let reload = follow_ups.into_iter().next().unwrap();
        assert!(session
            .settle(reload.ticket, HttpResponse::new(200, page_body(&[31, 32], 65)))
            .is_empty());
        assert_eq!(session.pagination().current_page(), 2);
        assert_eq!(visible_ids(&session), vec![31, 32]);
    }

    #[test]
    fn explicit_load_keeps_changes_still_in_flight() {
        let mut session = loaded(&[1, 2, 3], 3, false);
        let create = session.submit("Buy milk").unwrap();
        let toggle = session.toggle(1).unwrap();
        session.request_delete(3);
        let delete = session.confirm_delete().unwrap();

        // The server has not seen any of the three yet.
        let refresh = session.load();
        session.settle(refresh.ticket, HttpResponse::new(200, page_body(&[1, 2, 3], 3)));
        let placeholder = visible_ids(&session)[0];
        assert!(placeholder < 0);
        assert_eq!(visible_ids(&session), vec![placeholder, 1, 2]);
        assert!(session.store().get(1).unwrap().completed);

        session.settle(
            create.ticket,
            HttpResponse::new(201, r#"{"id":501,"todo":"Buy milk","completed":false,"userId":1}"#),
        );
        assert_eq!(visible_ids(&session), vec![501, 1, 2]);

        session.settle(toggle.ticket, HttpResponse::new(500, "down"));
        assert!(!session.store().get(1).unwrap().completed);
        session.settle_transport_error(delete.ticket, "connection reset");
        assert!(session.store().contains(3));
    }

    #[test]
    fn invalid_title_is_rejected_before_any_change() {
        let mut session = loaded(&[1], 1, false);
        let err = session.submit("   ").unwrap_err();
        assert!(matches!(err, TodoError::InvalidTitle(_)));
        assert_eq!(visible_ids(&session), vec![1]);
        assert!(session.drain_notifications().is_empty());
    }

    #[test]
    fn delete_confirmation_lifecycle() {
        let mut session = loaded(&[7, 8], 2, false);
        assert!(session.request_delete(99).is_none());

        let confirmation = session.request_delete(7).unwrap();
        assert_eq!(confirmation.title, "item 7");
        session.cancel_delete();
        assert!(session.delete_confirmation().is_none());
        assert!(session.confirm_delete().is_none());

        session.request_delete(7);
        let dispatch = session.confirm_delete().unwrap();
        assert!(session.delete_confirmation().is_some());
        assert_eq!(visible_ids(&session), vec![8]);

        session.settle_transport_error(dispatch.ticket, "connection reset");
        assert!(session.delete_confirmation().is_none());
        assert_eq!(visible_ids(&session), vec![7, 8]);
        assert_eq!(session.status(Action::Delete), MutationStatus::Error);
        let notes = session.drain_notifications();
        assert!(notes[0].message.starts_with("Failed to delete todo"));
    }

    #[test]
    fn refresh_waits_for_all_mutations() {
        let mut session = loaded(&[1, 2, 3], 3, true);
        let toggle = session.toggle(1).unwrap();
        session.request_delete(3);
        let delete = session.confirm_delete().unwrap();

        let first = session.settle(
            toggle.ticket,
            HttpResponse::new(200, r#"{"id":1,"todo":"item 1","completed":true,"userId":1}"#),
        );
        assert!(first.is_empty());

        let second = session.settle(
            delete.ticket,
            HttpResponse::new(200, r#"{"id":3,"todo":"item 3","completed":false,"userId":1,"isDeleted":true}"#),
        );
        assert_eq!(second.len(), 1);
        assert!(matches!(second[0].ticket, Ticket::Fetch(_)));
    }

    #[test]
    fn toggle_success_message_reflects_server_state() {
        let mut session = loaded(&[2], 1, false);
        let dispatch = session.toggle(2).unwrap();
        session.settle(
            dispatch.ticket,
            HttpResponse::new(200, r#"{"id":2,"todo":"item 2","completed":false,"userId":1}"#),
        );
        let notes = session.drain_notifications();
        assert_eq!(notes[0].message, "Todo marked as incomplete!");
    }

    #[test]
    fn reorder_by_index_and_by_id() {
        let mut session = loaded(&[1, 2, 3, 4, 5], 5, false);
        assert!(session.reorder(0, 3));
        assert_eq!(visible_ids(&session), vec![2, 3, 4, 1, 5]);
        assert!(session.reorder_by_id(5, 2));
        assert_eq!(visible_ids(&session), vec![5, 2, 3, 4, 1]);
        assert!(!session.reorder(2, 2));
        assert!(!session.reorder_by_id(9, 1));
        // Item sequence itself is untouched.
        let item_ids: Vec<TodoId> = session.store().items().iter().map(|t| t.id).collect();
        assert_eq!(item_ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn paging_respects_bounds() {
        let mut session = loaded(&[1], 65, false);
        assert!(session.previous_page().is_none());
        assert!(session.next_page().is_some());
        assert!(session.next_page().is_some());
        assert_eq!(session.pagination().current_page(), 3);
        assert!(session.next_page().is_none());
        assert!(session.change_page(3).is_none());
    }
}
