//! Request guards: resolve the acting user from the `username` header, then a
//! todo by id inside that user's list.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;
use crate::todo::Todo;
use crate::user::User;
use crate::AppState;

pub const USERNAME_HEADER: &str = "username";

/// The user named by the `username` header. Rejects with
/// [`ApiError::UserNotFound`] before the body is read.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(USERNAME_HEADER)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
            .ok_or_else(|| {
                tracing::debug!("request without a readable username header");
                ApiError::UserNotFound
            })?;

        match state.store.find_user_id(username) {
            Some(id) => Ok(CurrentUser {
                id,
                username: username.to_string(),
            }),
            None => {
                tracing::debug!(username, "unknown user");
                Err(ApiError::UserNotFound)
            }
        }
    }
}

/// Position of the todo `id` within `user`'s own list.
pub fn todo_index(user: &User, id: &str) -> Result<usize, ApiError> {
    let id = Uuid::parse_str(id).map_err(|_| ApiError::TodoNotFound)?;
    user.todos
        .iter()
        .position(|t| t.id == id)
        .ok_or(ApiError::TodoNotFound)
}

pub fn todo_mut<'a>(user: &'a mut User, id: &str) -> Result<&'a mut Todo, ApiError> {
    let index = todo_index(user, id)?;
    Ok(&mut user.todos[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with_todos(titles: &[&str]) -> User {
        let mut user = User::new("Ann", "ann");
        for title in titles {
            user.todos.push(Todo::new(*title, None, Utc::now()));
        }
        user
    }

    #[test]
    fn finds_todo_by_id() {
        let mut user = user_with_todos(&["a", "b", "c"]);
        let id = user.todos[1].id.to_string();
        assert_eq!(todo_index(&user, &id), Ok(1));
        assert_eq!(todo_mut(&mut user, &id).unwrap().title, "b");
    }

    #[test]
    fn never_looks_at_other_users() {
        let ann = user_with_todos(&["a"]);
        let bob = user_with_todos(&["b"]);
        let bobs = bob.todos[0].id.to_string();
        assert_eq!(todo_index(&ann, &bobs), Err(ApiError::TodoNotFound));
    }

    #[test]
    fn malformed_id_is_not_found() {
        let user = user_with_todos(&["a"]);
        assert_eq!(todo_index(&user, "42"), Err(ApiError::TodoNotFound));
    }
}
