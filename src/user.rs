use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::todo::Todo;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    /// Stored exactly as the client sent it.
    pub name: Value,
    pub username: String,
    pub todos: Vec<Todo>,
}

/// Body of `POST /users`.
#[derive(Deserialize, Debug)]
pub struct CreateUser {
    #[serde(default)]
    pub name: Value,
    pub username: String,
}

impl User {
    pub fn new(name: impl Into<Value>, username: &str) -> Self {
        User {
            id: Uuid::new_v4(),
            name: name.into(),
            username: username.to_string(),
            todos: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_without_todos() {
        let user = User::new("Ann", "ann");
        assert_eq!(user.name, "Ann");
        assert_eq!(user.username, "ann");
        assert!(user.todos.is_empty());
    }

    #[test]
    fn serializes_with_public_shape() {
        let user = User::new("Ann", "ann");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], user.id.to_string());
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["username"], "ann");
        assert_eq!(json["todos"], serde_json::json!([]));
    }

    #[test]
    fn create_user_requires_username() {
        assert!(serde_json::from_str::<CreateUser>(r#"{"name":"Ann"}"#).is_err());
        let body: CreateUser = serde_json::from_str(r#"{"username":"ann"}"#).unwrap();
        assert_eq!(body.name, Value::Null);
    }

    #[test]
    fn create_user_keeps_any_name_value() {
        let body: CreateUser =
            serde_json::from_str(r#"{"name":null,"username":"ann"}"#).unwrap();
        assert_eq!(body.name, Value::Null);
        let body: CreateUser = serde_json::from_str(r#"{"name":5,"username":"ann"}"#).unwrap();
        assert_eq!(body.name, serde_json::json!(5));
    }
}
