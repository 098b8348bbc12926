use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::error::ApiError;
use crate::guards::{self, CurrentUser};
use crate::todo::{Todo, TodoFields};
use crate::user::{CreateUser, User};
use crate::AppState;

pub async fn health_check() -> &'static str {
    "OK"
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .store
        .create_user(body.name, &body.username)
        .inspect_err(|_| tracing::debug!(username = %body.username, "username already taken"))?;
    tracing::info!(user_id = %user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /todos`
pub async fn list_todos(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.with_user(user.id, |u| u.todos.clone())?;
    Ok(Json(todos))
}

/// `POST /todos`
pub async fn create_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<TodoFields>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let deadline = body.deadline();
    let todo = Todo::new(body.title, deadline, Utc::now());
    state
        .store
        .with_user_mut(user.id, |u| u.todos.push(todo.clone()))?;
    tracing::info!(username = %user.username, todo_id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `PUT /todos/{id}`: replaces title and deadline only.
pub async fn update_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<TodoFields>,
) -> Result<Json<Todo>, ApiError> {
    let deadline = body.deadline();
    let todo = state.store.with_user_mut(user.id, |u| {
        let todo = guards::todo_mut(u, &id)?;
        todo.title = body.title;
        todo.deadline = deadline;
        Ok::<_, ApiError>(todo.clone())
    })??;
    tracing::debug!(username = %user.username, todo_id = %todo.id, "todo updated");
    Ok(Json(todo))
}

/// `PATCH /todos/{id}/done`
pub async fn complete_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.store.with_user_mut(user.id, |u| {
        let todo = guards::todo_mut(u, &id)?;
        todo.done = true;
        Ok::<_, ApiError>(todo.clone())
    })??;
    tracing::debug!(username = %user.username, todo_id = %todo.id, "todo completed");
    Ok(Json(todo))
}

/// `DELETE /todos/{id}`
pub async fn delete_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.store.with_user_mut(user.id, |u| {
        let index = guards::todo_index(u, &id)?;
        Ok::<_, ApiError>(u.todos.remove(index))
    })??;
    tracing::info!(username = %user.username, todo_id = %removed.id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
