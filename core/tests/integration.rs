//! Optimistic session against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a `TodoSession` over
//! real HTTP using ureq as the host transport. Fault switches on the server
//! exercise every rollback path end-to-end.

use std::sync::atomic::Ordering;

use mock_server::MockState;
use todo_core::{
    Action, Dispatch, HttpMethod, HttpResponse, MutationStatus, NotificationLevel, SessionConfig, TodoClient,
    TodoId, TodoSession, TodoStore,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: todo_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent.post(&req.path).content_type("application/json").send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent.put(&req.path).content_type("application/json").send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse::new(status, body)
}

/// Start a mock server over `state` on a random port; returns its base URL.
fn start_server(state: MockState) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, state).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Execute `dispatch` and every follow-up it produces, in order.
fn drive(session: &mut TodoSession, dispatch: Dispatch) {
    let mut queue = vec![dispatch];
    while let Some(next) = queue.pop() {
        let response = execute(next.request);
        queue.extend(session.settle(next.ticket, response));
    }
}

fn new_session(base_url: &str) -> TodoSession {
    TodoSession::new(TodoClient::new(base_url), SessionConfig::default())
}

fn ids(store: &TodoStore) -> Vec<TodoId> {
    store.display_order().to_vec()
}

#[test]
fn optimistic_lifecycle_against_server() {
    let base_url = start_server(MockState::seeded(65));
    let mut session = new_session(&base_url);

    // Step 1: load page 1.
    let dispatch = session.load();
    drive(&mut session, dispatch);
    assert_eq!(session.store().len(), 30);
    assert_eq!(session.pagination().total_pages(), 3);
    assert_eq!(session.visible_todos()[0].id, 65);

    // Step 2: move to the last page.
    let dispatch = session.change_page(3).unwrap();
    drive(&mut session, dispatch);
    assert_eq!(ids(session.store()), vec![5, 4, 3, 2, 1]);

    // Step 3: create; placeholder first, then the confirmed item on page 1.
    let dispatch = session.submit("Buy milk").unwrap();
    let placeholder = session.visible_todos()[0].id;
    assert!(placeholder < 0);
    drive(&mut session, dispatch);
    assert_eq!(session.pagination().current_page(), 1);
    assert_eq!(session.visible_todos()[0].id, 66);
    assert_eq!(session.visible_todos()[0].todo, "Buy milk");
    assert_eq!(session.pagination().total_count(), Some(66));
    assert!(!session.store().contains(placeholder));

    // Step 4: toggle; the refresh confirms the server kept it.
    let dispatch = session.toggle(66).unwrap();
    assert!(session.store().get(66).unwrap().completed);
    drive(&mut session, dispatch);
    assert!(session.store().get(66).unwrap().completed);
    assert_eq!(session.status(Action::Toggle), MutationStatus::Success);

    // Step 5: delete with confirmation.
    session.request_delete(66).unwrap();
    let dispatch = session.confirm_delete().unwrap();
    assert!(!session.store().contains(66));
    drive(&mut session, dispatch);
    assert!(!session.store().contains(66));
    assert!(session.delete_confirmation().is_none());
    assert_eq!(session.pagination().total_count(), Some(65));

    let notes = session.drain_notifications();
    assert!(notes.iter().all(|n| n.level == NotificationLevel::Success));
    assert_eq!(notes.len(), 3);
}

#[test]
fn failed_mutations_roll_back() {
    let state = MockState::seeded(5);
    let base_url = start_server(state.clone());
    let mut session = new_session(&base_url);

    let dispatch = session.load();
    drive(&mut session, dispatch);
    let before = session.store().clone();

    // Create fails: placeholder disappears.
    state.faults.create.store(true, Ordering::SeqCst);
    let dispatch = session.submit("Doomed").unwrap();
    assert_eq!(session.store().len(), 6);
    drive(&mut session, dispatch);
    assert_eq!(session.store(), &before);
    assert_eq!(session.status(Action::Create), MutationStatus::Error);

    // Toggle fails: flag restored.
    state.faults.update.store(true, Ordering::SeqCst);
    let original = session.store().get(3).unwrap().completed;
    let dispatch = session.toggle(3).unwrap();
    assert_ne!(session.store().get(3).unwrap().completed, original);
    drive(&mut session, dispatch);
    assert_eq!(session.store().get(3).unwrap().completed, original);

    // Delete fails: item back with its fields, followed by a reconciling refetch.
    state.faults.delete.store(true, Ordering::SeqCst);
    session.request_delete(4).unwrap();
    let dispatch = session.confirm_delete().unwrap();
    assert!(!session.store().contains(4));
    drive(&mut session, dispatch);
    assert_eq!(session.store(), &before);

    let errors: Vec<String> = session
        .drain_notifications()
        .into_iter()
        .filter(|n| n.level == NotificationLevel::Error)
        .map(|n| n.message)
        .collect();
    assert_eq!(errors.len(), 3);
    assert!(errors[0].starts_with("Failed to create todo"));
    assert!(errors[1].starts_with("Failed to update todo"));
    assert!(errors[2].starts_with("Failed to delete todo"));
}

#[test]
fn page_load_failure_is_reported_and_recoverable() {
    let state = MockState::seeded(3);
    let base_url = start_server(state.clone());
    let mut session = new_session(&base_url);

    state.faults.list.store(true, Ordering::SeqCst);
    let dispatch = session.load();
    drive(&mut session, dispatch);
    assert!(session.load_error().is_some());
    assert!(session.pagination().is_loading());

    state.faults.list.store(false, Ordering::SeqCst);
    let dispatch = session.load();
    drive(&mut session, dispatch);
    assert!(session.load_error().is_none());
    assert_eq!(ids(session.store()), vec![3, 2, 1]);
}
