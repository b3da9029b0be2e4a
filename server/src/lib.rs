//! JSON/HTTP host for a single `TodoService`.
//!
//! Each handler makes its service calls under one lock acquisition and maps
//! the outcome to a status code. No business rules live here.

pub mod config;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use todo_core::{NewTodo, Todo, TodoError, TodoId, TodoService};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::warn;

pub use config::{ConfigError, ServerConfig};

pub type SharedService = Arc<RwLock<TodoService>>;

/// Full replacement of a todo's mutable fields.
#[derive(Debug, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Error)]
enum ApiError {
    #[error("todo not found")]
    NotFound,
    #[error(transparent)]
    Invalid(#[from] TodoError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Invalid(err) => {
                warn!(error = %err, "rejected todo input");
                let body = Json(json!({ "error": err.to_string() }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
        }
    }
}

pub fn app(service: TodoService) -> Router {
    let state: SharedService = Arc::new(RwLock::new(service));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/completed", get(list_completed))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/todos/{id}/complete", post(complete_todo))
        .with_state(state)
}

pub async fn run(listener: TcpListener, service: TodoService) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service)).await
}

async fn list_todos(State(service): State<SharedService>) -> Json<Vec<Todo>> {
    let todos = service.read().await.get_all().await;
    Json(todos)
}

async fn list_completed(State(service): State<SharedService>) -> Json<Vec<Todo>> {
    let todos = service.read().await.get_completed().await;
    Json(todos)
}

async fn create_todo(
    State(service): State<SharedService>,
    Json(input): Json<NewTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = service.write().await.add(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(service): State<SharedService>,
    Path(id): Path<TodoId>,
) -> Result<Json<Todo>, ApiError> {
    let todo = service.read().await.get_by_id(id).await;
    todo.map(Json).ok_or(ApiError::NotFound)
}

async fn update_todo(
    State(service): State<SharedService>,
    Path(id): Path<TodoId>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let mut service = service.write().await;
    let existing = service.get_by_id(id).await.ok_or(ApiError::NotFound)?;
    let replacement = Todo {
        title: input.title,
        description: input.description,
        is_completed: input.is_completed,
        due_date: input.due_date,
        ..existing
    };
    if !service.update(&replacement).await? {
        return Err(ApiError::NotFound);
    }
    let todo = service.get_by_id(id).await;
    todo.map(Json).ok_or(ApiError::NotFound)
}

async fn delete_todo(
    State(service): State<SharedService>,
    Path(id): Path<TodoId>,
) -> Result<StatusCode, ApiError> {
    if service.write().await.delete(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

async fn complete_todo(
    State(service): State<SharedService>,
    Path(id): Path<TodoId>,
) -> Result<Json<Todo>, ApiError> {
    let mut service = service.write().await;
    if !service.mark_completed(id).await {
        return Err(ApiError::NotFound);
    }
    let todo = service.get_by_id(id).await;
    todo.map(Json).ok_or(ApiError::NotFound)
}
