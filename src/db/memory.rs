//! In-process user store, used for `database.url = "memory"` and as a test double.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::models::User;
use crate::db::repo::UserStore;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
    create_calls: AtomicUsize,
    closed: AtomicBool,
}

#[derive(Debug, Default)]
struct Inner {
    // Insertion order doubles as creation order
    users: Vec<User>,
    /// username -> position in `users`
    username_index: HashMap<String, usize>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `create` calls received, successful or not.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, username: &str, password: &str) -> Result<User, StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }

        let mut inner = self.inner.write().await;

        if inner.username_index.contains_key(username) {
            return Err(StoreError::conflict(username));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };

        let position = inner.users.len();
        inner.username_index.insert(user.username.clone(), position);
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }

        Ok(self.inner.read().await.users.clone())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
