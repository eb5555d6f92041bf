//! MongoDB-backed user context

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::{DomainError, User, UserRepository};

/// Document-store accessor bound to the user collection.
#[derive(Debug, Clone)]
pub struct MongoUserContext {
    collection: Collection<User>,
}

impl MongoUserContext {
    /// Connect to the configured server and bind to the user collection
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to MongoDB: {}", e)))?;

        let collection = client
            .database(&config.database)
            .collection(&config.collection);

        info!(
            database = %config.database,
            collection = %config.collection,
            "Bound to user collection"
        );

        Ok(Self { collection })
    }
}

#[async_trait]
impl UserRepository for MongoUserContext {
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<User>, DomainError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    async fn create(&self, user: User) -> Result<ObjectId, DomainError> {
        let result = self
            .collection
            .insert_one(&user)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DomainError::internal("Inserted id was not an ObjectId"))
    }

    async fn update(&self, id: &ObjectId, user: &User) -> Result<(), DomainError> {
        self.collection
            .replace_one(doc! { "_id": id }, user)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> Result<(), DomainError> {
        // Absent ids delete zero documents, which is fine
        self.collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(())
    }
}
