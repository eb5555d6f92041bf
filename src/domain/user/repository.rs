//! User repository trait - the passthrough boundary to the document store

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::entity::User;
use crate::domain::DomainError;

/// Repository trait for the user collection.
///
/// Implementations are thin passthroughs to the backing document store;
/// business rules (uniqueness, password checks) live in the service layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every user record in the collection
    async fn get_all(&self) -> Result<Vec<User>, DomainError>;

    /// Fetch a single record by its store-assigned identifier
    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<User>, DomainError>;

    /// Insert a new record and return the assigned identifier
    async fn create(&self, user: User) -> Result<ObjectId, DomainError>;

    /// Replace the record with the given identifier
    async fn update(&self, id: &ObjectId, user: &User) -> Result<(), DomainError>;

    /// Remove a record; deleting an absent identifier is a no-op
    async fn delete(&self, id: &ObjectId) -> Result<(), DomainError>;
}
