//! In-memory user store for tests and datastore-less runs

use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::domain::{DomainError, User, UserRepository};

/// In-memory implementation of [`UserRepository`].
///
/// Mirrors the passthrough behavior of the Mongo-backed context: no
/// uniqueness enforcement here, that belongs to the service layer.
#[derive(Debug, Default)]
pub struct InMemoryUserContext {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserContext {
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn create(&self, mut user: User) -> Result<ObjectId, DomainError> {
        let mut users = self.users.write().await;
        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user);
        Ok(id)
    }

    async fn update(&self, id: &ObjectId, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let mut stored = user.clone();
        stored.id = Some(*id);
        users.insert(*id, stored);
        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users.remove(id);
        Ok(())
    }
}
