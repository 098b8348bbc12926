//! In-process user and todo storage.
//!
//! State lives for the lifetime of the process. A single lock covers every
//! user, so a username check and the following insert cannot interleave with
//! another registration.

use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::user::User;

#[derive(Debug, Default)]
pub struct Store {
    users: RwLock<Vec<User>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user, failing if the username is already taken.
    pub fn create_user(&self, name: impl Into<Value>, username: &str) -> Result<User, ApiError> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.username == username) {
            return Err(ApiError::UserAlreadyExists);
        }
        let user = User::new(name, username);
        users.push(user.clone());
        Ok(user)
    }

    /// Exact, case-sensitive username lookup.
    pub fn find_user_id(&self, username: &str) -> Option<Uuid> {
        self.users
            .read()
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.id)
    }

    pub fn with_user<R>(&self, id: Uuid, f: impl FnOnce(&User) -> R) -> Result<R, ApiError> {
        let users = self.users.read();
        let user = users
            .iter()
            .find(|u| u.id == id)
            .ok_or(ApiError::UserNotFound)?;
        Ok(f(user))
    }

    pub fn with_user_mut<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut User) -> R,
    ) -> Result<R, ApiError> {
        let mut users = self.users.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::UserNotFound)?;
        Ok(f(user))
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::todo::Todo;

    #[test]
    fn duplicate_username_leaves_store_unchanged() {
        let store = Store::new();
        let ann = store.create_user("Ann", "ann").unwrap();

        let err = store.create_user("Other Ann", "ann").unwrap_err();
        assert_eq!(err, ApiError::UserAlreadyExists);
        assert_eq!(store.user_count(), 1);

        let name = store.with_user(ann.id, |u| u.name.clone()).unwrap();
        assert_eq!(name, "Ann");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let store = Store::new();
        let ann = store.create_user("Ann", "ann").unwrap();
        assert_eq!(store.find_user_id("ann"), Some(ann.id));
        assert_eq!(store.find_user_id("Ann"), None);
        assert_eq!(store.find_user_id(""), None);
    }

    #[test]
    fn mutations_stay_with_owner() {
        let store = Store::new();
        let ann = store.create_user("Ann", "ann").unwrap();
        let bob = store.create_user("Bob", "bob").unwrap();

        store
            .with_user_mut(ann.id, |u| u.todos.push(Todo::new("a", None, chrono::Utc::now())))
            .unwrap();

        assert_eq!(store.with_user(ann.id, |u| u.todos.len()).unwrap(), 1);
        assert_eq!(store.with_user(bob.id, |u| u.todos.len()).unwrap(), 0);
    }

    #[test]
    fn unknown_id_is_user_not_found() {
        let store = Store::new();
        assert_eq!(
            store.with_user(Uuid::new_v4(), |_| ()).unwrap_err(),
            ApiError::UserNotFound
        );
    }

    #[test]
    fn concurrent_registration_admits_one_user() {
        let store = Arc::new(Store::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.create_user("Ann", "ann").is_ok())
            })
            .collect();

        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(created, 1);
        assert_eq!(store.user_count(), 1);
    }
}
