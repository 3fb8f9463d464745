use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Email, User, UserId};
use crate::error::{UserError, UserResult};
use crate::mapper::{UserMapper, UserPersistence};

/// Repository trait for User persistence
///
/// Use cases depend only on this trait; storage backends are swappable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or replace the user stored under `user.id()`.
    ///
    /// Fails with [`UserError::DuplicateEmail`] when the email belongs to a
    /// different user; nothing is written in that case.
    async fn save(&self, user: &User) -> UserResult<()>;

    async fn find_by_id(&self, id: &UserId) -> UserResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> UserResult<Option<User>>;

    /// All users in insertion order
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Remove a user; unknown ids are ignored
    async fn delete(&self, id: &UserId) -> UserResult<()>;

    async fn exists(&self, id: &UserId) -> UserResult<bool>;
}

/// Records by id plus the email -> id index. Both change together under one lock.
#[derive(Debug, Default)]
struct Store {
    users: IndexMap<String, UserPersistence>,
    email_index: HashMap<String, String>,
}

impl Store {
    fn get(&self, id: &str) -> UserResult<Option<User>> {
        self.users.get(id).map(UserMapper::to_domain).transpose()
    }
}

/// Process-local, non-durable implementation of [`UserRepository`].
///
/// Clones share the same underlying store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.store.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Id indexed under `email`, if any
    pub async fn indexed_id(&self, email: &str) -> Option<String> {
        self.store.read().await.email_index.get(email).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> UserResult<()> {
        let record = UserMapper::to_persistence(user);
        let mut store = self.store.write().await;

        if let Some(owner) = store.email_index.get(&record.email) {
            if owner != &record.id {
                tracing::info!(user_id = %record.id, email = %record.email, "Email already taken");
                return Err(UserError::DuplicateEmail(record.email));
            }
        }

        // Drop the index entry for the previous email when it changed.
        let stale_email = store
            .users
            .get(&record.id)
            .filter(|previous| previous.email != record.email)
            .map(|previous| previous.email.clone());
        if let Some(stale) = stale_email {
            if store.email_index.get(&stale) == Some(&record.id) {
                store.email_index.remove(&stale);
            }
        }

        store
            .email_index
            .insert(record.email.clone(), record.id.clone());
        tracing::info!(user_id = %record.id, email = %record.email, "Saved user");
        store.users.insert(record.id.clone(), record);

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> UserResult<Option<User>> {
        tracing::debug!(user_id = %id, "Finding user by id");
        let store = self.store.read().await;
        store.get(id.as_str())
    }

    async fn find_by_email(&self, email: &Email) -> UserResult<Option<User>> {
        tracing::debug!(email = %email, "Finding user by email");
        let store = self.store.read().await;
        match store.email_index.get(email.as_str()) {
            Some(id) => store.get(id),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        tracing::debug!(count = store.users.len(), "Listing users");
        store.users.values().map(UserMapper::to_domain).collect()
    }

    async fn delete(&self, id: &UserId) -> UserResult<()> {
        let mut store = self.store.write().await;

        if let Some(record) = store.users.shift_remove(id.as_str()) {
            store.email_index.remove(&record.email);
            tracing::info!(user_id = %id, "Deleted user");
        }

        Ok(())
    }

    async fn exists(&self, id: &UserId) -> UserResult<bool> {
        let store = self.store.read().await;
        Ok(store.users.contains_key(id.as_str()))
    }
}
