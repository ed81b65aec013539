use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

const DEFAULT_LIMIT: usize = 30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub todo: String,
    pub completed: bool,
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTodo {
    #[serde(flatten)]
    pub todo: Todo,
    pub is_deleted: bool,
    pub deleted_on: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub todo: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub todo: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

type Failure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
}

fn default_user_id() -> i64 {
    1
}

#[derive(Debug, Default)]
pub struct Db {
    todos: BTreeMap<i64, Todo>,
    next_id: i64,
}

impl Db {
    /// A store holding `count` todos with ids `1..=count`; every third one
    /// is completed.
    pub fn seeded(count: usize) -> Self {
        let mut db = Db::default();
        for n in 1..=count {
            db.insert(format!("Seeded todo {n}"), n % 3 == 0, (n % 10) as i64 + 1);
        }
        db
    }

    fn insert(&mut self, todo: String, completed: bool, user_id: i64) -> Todo {
        self.next_id += 1;
        let todo = Todo {
            id: self.next_id,
            todo,
            completed,
            user_id,
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

/// Switches that force the matching endpoint to answer 500.
#[derive(Debug, Default)]
pub struct Faults {
    pub list: AtomicBool,
    pub create: AtomicBool,
    pub update: AtomicBool,
    pub delete: AtomicBool,
}

impl Faults {
    fn check(flag: &AtomicBool, what: &str) -> Result<(), Failure> {
        if flag.load(Ordering::SeqCst) {
            debug!(endpoint = what, "injected failure");
            return Err(failure(StatusCode::INTERNAL_SERVER_ERROR, format!("injected {what} failure")));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockState {
    pub db: Arc<RwLock<Db>>,
    pub faults: Arc<Faults>,
}

impl MockState {
    pub fn seeded(count: usize) -> Self {
        Self {
            db: Arc::new(RwLock::new(Db::seeded(count))),
            faults: Arc::default(),
        }
    }
}

pub fn app() -> Router {
    app_with(MockState::default())
}

pub fn app_with(state: MockState) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/add", post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(state)
}

pub async fn run_with(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock todo service listening");
    }
    axum::serve(listener, app_with(state)).await
}

/// Newest first, so a freshly added todo leads page 1. `limit=0` returns
/// everything from `skip` on.
async fn list_todos(
    State(state): State<MockState>,
    Query(params): Query<ListParams>,
) -> Result<Json<TodoPage>, Failure> {
    Faults::check(&state.faults.list, "list")?;
    let db = state.db.read().await;
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let take = if limit == 0 { usize::MAX } else { limit };
    let todos: Vec<Todo> = db.todos.values().rev().skip(skip).take(take).cloned().collect();
    debug!(skip, limit, returned = todos.len(), "list");
    Ok(Json(TodoPage {
        limit: if limit == 0 { todos.len() } else { limit },
        todos,
        total: db.len(),
        skip,
    }))
}

async fn create_todo(
    State(state): State<MockState>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), Failure> {
    Faults::check(&state.faults.create, "create")?;
    let title = input.todo.trim();
    if title.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "Todo is required"));
    }
    let todo = state
        .db
        .write()
        .await
        .insert(title.to_string(), input.completed, input.user_id);
    debug!(id = todo.id, "created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(state): State<MockState>, Path(id): Path<i64>) -> Result<Json<Todo>, Failure> {
    let db = state.db.read().await;
    db.todos.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn update_todo(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, Failure> {
    Faults::check(&state.faults.update, "update")?;
    let mut db = state.db.write().await;
    let todo = db.todos.get_mut(&id).ok_or_else(|| not_found(id))?;
    if let Some(title) = input.todo {
        todo.todo = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    debug!(id, "updated");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(state): State<MockState>, Path(id): Path<i64>) -> Result<Json<DeletedTodo>, Failure> {
    Faults::check(&state.faults.delete, "delete")?;
    let mut db = state.db.write().await;
    let todo = db.todos.remove(&id).ok_or_else(|| not_found(id))?;
    debug!(id, "deleted");
    Ok(Json(DeletedTodo {
        todo,
        is_deleted: true,
        deleted_on: chrono::Utc::now().to_rfc3339(),
    }))
}

fn not_found(id: i64) -> Failure {
    failure(StatusCode::NOT_FOUND, format!("Todo with id '{id}' not found"))
}
