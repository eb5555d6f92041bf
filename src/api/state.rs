//! Shared application state

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{DomainError, User, UserRepository};
use crate::infrastructure::auth::TokenVerifier;
use crate::infrastructure::user::{
    ChangePasswordRequest, CreateUserRequest, PasswordHasher, UpdateUserRequest, UserService,
};

/// Object-safe facade over [`UserService`] so handlers can hold it behind
/// a trait object regardless of the storage backend
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get_all(&self) -> Result<Vec<User>, DomainError>;
    async fn get_by_id(&self, id: &str) -> Result<User, DomainError>;
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError>;
    async fn credentials_are_valid(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, DomainError>;
    async fn user_count(&self) -> Result<usize, DomainError>;
    async fn get_user_id(&self, username: &str) -> Result<String, DomainError>;
    async fn create(&self, request: CreateUserRequest) -> Result<String, DomainError>;
    async fn update(&self, request: UpdateUserRequest) -> Result<(), DomainError>;
    async fn change_password(&self, request: ChangePasswordRequest) -> Result<(), DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        UserService::get_all(self).await
    }

    async fn get_by_id(&self, id: &str) -> Result<User, DomainError> {
        UserService::get_by_id(self, id).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        UserService::username_exists(self, username).await
    }

    async fn credentials_are_valid(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, DomainError> {
        UserService::credentials_are_valid(self, username, password).await
    }

    async fn user_count(&self) -> Result<usize, DomainError> {
        UserService::user_count(self).await
    }

    async fn get_user_id(&self, username: &str) -> Result<String, DomainError> {
        UserService::get_user_id(self, username).await
    }

    async fn create(&self, request: CreateUserRequest) -> Result<String, DomainError> {
        UserService::create(self, request).await
    }

    async fn update(&self, request: UpdateUserRequest) -> Result<(), DomainError> {
        UserService::update(self, request).await
    }

    async fn change_password(&self, request: ChangePasswordRequest) -> Result<(), DomainError> {
        UserService::change_password(self, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        UserService::delete(self, id).await
    }
}

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        token_verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            user_service,
            token_verifier,
        }
    }
}
