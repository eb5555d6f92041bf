//! User service - account CRUD, credential validation, and the password rules

use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::domain::user::validate_password;
use crate::domain::{DomainError, Role, User, UserRepository};

use super::password::PasswordHasher;

/// Request for creating a new user account
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub profile_photo: Option<String>,
}

/// Request for updating a user's profile
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub id: String,
    pub username: String,
    /// Client-supplied plaintext; validated against the username rule but
    /// never persisted, the stored hash is kept as-is
    pub password: String,
    pub profile_photo: Option<String>,
}

/// Request for replacing a user's password
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub id: String,
    pub username: String,
    pub password: String,
}

/// User service for account management and credential validation
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    default_profile_photo: String,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>, default_profile_photo: impl Into<String>) -> Self {
        Self {
            repository,
            hasher,
            default_profile_photo: default_profile_photo.into(),
        }
    }

    /// List every user record
    pub async fn get_all(&self) -> Result<Vec<User>, DomainError> {
        self.repository.get_all().await
    }

    /// Fetch a user by id
    pub async fn get_by_id(&self, id: &str) -> Result<User, DomainError> {
        let oid = parse_id(id)?;

        self.repository
            .get_by_id(&oid)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User with id: {} not found", id)))
    }

    /// Whether any user carries the exact username
    pub async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        let users = self.repository.get_all().await?;
        Ok(users.iter().any(|u| u.username == username))
    }

    /// Verify a username/password pair against the stored records
    pub async fn credentials_are_valid(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, DomainError> {
        let users = self.repository.get_all().await?;

        Ok(users
            .iter()
            .find(|u| u.username == username)
            .is_some_and(|u| self.hasher.verify(password, &u.password)))
    }

    /// Total number of user records
    pub async fn user_count(&self) -> Result<usize, DomainError> {
        Ok(self.repository.get_all().await?.len())
    }

    /// Resolve a username to its record id
    pub async fn get_user_id(&self, username: &str) -> Result<String, DomainError> {
        let users = self.repository.get_all().await?;

        let user = users
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| {
                DomainError::not_found(format!("User with username: {} not found", username))
            })?;

        user.id_hex()
            .ok_or_else(|| DomainError::internal("Stored user record has no id"))
    }

    /// Create a new account: hash the password, apply defaults, persist.
    /// Returns the assigned record id.
    pub async fn create(&self, request: CreateUserRequest) -> Result<String, DomainError> {
        self.validate_username_available(&request.username).await?;
        validate_password(&request.username, &request.password)?;

        let profile_photo = match request.profile_photo {
            Some(photo) if !photo.is_empty() => photo,
            _ => self.default_profile_photo.clone(),
        };

        let user = User {
            id: None,
            username: request.username,
            password: self.hasher.hash(&request.password)?,
            roles: vec![Role::User],
            created: Some(Utc::now()),
            profile_photo: Some(profile_photo),
        };

        let id = self.repository.create(user).await?;
        Ok(id.to_hex())
    }

    /// Update a profile. The stored password hash, roles, and creation
    /// timestamp are preserved; only username and photo come from the client.
    pub async fn update(&self, request: UpdateUserRequest) -> Result<(), DomainError> {
        let oid = parse_id(&request.id)?;

        let stored = self
            .repository
            .get_by_id(&oid)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User with id: {} not found", request.id)))?;

        if !request.username.to_lowercase().eq(&stored.username.to_lowercase()) {
            self.validate_username_available(&request.username).await?;
        }
        validate_password(&request.username, &request.password)?;

        let user = User {
            id: Some(oid),
            username: request.username,
            password: stored.password,
            roles: stored.roles,
            created: stored.created,
            profile_photo: request.profile_photo.or(stored.profile_photo),
        };

        self.repository.update(&oid, &user).await
    }

    /// Replace the stored password hash with a hash of the new password
    pub async fn change_password(&self, request: ChangePasswordRequest) -> Result<(), DomainError> {
        let oid = parse_id(&request.id)?;

        let mut stored = self
            .repository
            .get_by_id(&oid)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User with id: {} not found", request.id)))?;

        validate_password(&request.username, &request.password)?;

        stored.password = self.hasher.hash(&request.password)?;

        self.repository.update(&oid, &stored).await
    }

    /// Delete by id; deleting an absent id is a no-op
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let oid = parse_id(id)?;
        self.repository.delete(&oid).await
    }

    async fn validate_username_available(&self, username: &str) -> Result<(), DomainError> {
        if self.username_exists(username).await? {
            return Err(DomainError::invalid_argument(
                "Username",
                "Username already in use",
            ));
        }

        Ok(())
    }
}

fn parse_id(id: &str) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(id).map_err(|e| DomainError::invalid_id(format!("'{}': {}", id, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::memory::InMemoryUserContext;
    use crate::infrastructure::user::password::Argon2Hasher;

    const DEFAULT_PHOTO: &str = "default-profile-photo.png";

    fn create_service() -> UserService<InMemoryUserContext, Argon2Hasher> {
        let repository = Arc::new(InMemoryUserContext::new());
        let hasher = Arc::new(Argon2Hasher::new());
        UserService::new(repository, hasher, DEFAULT_PHOTO)
    }

    fn make_request(username: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            profile_photo: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let service = create_service();

        let id = service.create(make_request("jane", "s3cure-pass")).await.unwrap();

        let user = service.get_by_id(&id).await.unwrap();
        assert_eq!(user.username, "jane");
        assert_eq!(user.roles, vec![Role::User]);
        assert_eq!(user.profile_photo.as_deref(), Some(DEFAULT_PHOTO));

        let created = user.created.expect("creation timestamp set");
        let age = Utc::now() - created;
        assert!(age.num_seconds() < 1);
    }

    #[tokio::test]
    async fn test_create_stores_hash_not_plaintext() {
        let service = create_service();

        let id = service.create(make_request("jane", "s3cure-pass")).await.unwrap();

        let user = service.get_by_id(&id).await.unwrap();
        assert_ne!(user.password, "s3cure-pass");
        assert!(user.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_photo() {
        let service = create_service();

        let id = service
            .create(CreateUserRequest {
                username: "jane".to_string(),
                password: "s3cure-pass".to_string(),
                profile_photo: Some("mine.png".to_string()),
            })
            .await
            .unwrap();

        let user = service.get_by_id(&id).await.unwrap();
        assert_eq!(user.profile_photo.as_deref(), Some("mine.png"));
    }

    #[tokio::test]
    async fn test_create_duplicate_username_fails() {
        let service = create_service();

        service.create(make_request("jane", "s3cure-pass")).await.unwrap();

        let err = service
            .create(make_request("jane", "other-pass"))
            .await
            .unwrap_err();

        match err {
            DomainError::InvalidArgument { field, message } => {
                assert_eq!(field, "Username");
                assert_eq!(message, "Username already in use");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_password_containing_username_fails() {
        let service = create_service();

        let err = service
            .create(make_request("Jane", "myJANEpassword"))
            .await
            .unwrap_err();

        match err {
            DomainError::InvalidArgument { field, message } => {
                assert_eq!(field, "Password");
                assert_eq!(message, "Password contains Username");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_preserves_password_hash() {
        let service = create_service();

        let id = service.create(make_request("jane", "s3cure-pass")).await.unwrap();
        let original_hash = service.get_by_id(&id).await.unwrap().password;

        service
            .update(UpdateUserRequest {
                id: id.clone(),
                username: "janet".to_string(),
                password: "client-sent-plaintext".to_string(),
                profile_photo: None,
            })
            .await
            .unwrap();

        let user = service.get_by_id(&id).await.unwrap();
        assert_eq!(user.username, "janet");
        assert_eq!(user.password, original_hash);

        // Original credentials still verify against the preserved hash
        assert!(service.credentials_are_valid("janet", "s3cure-pass").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_to_taken_username_fails() {
        let service = create_service();

        service.create(make_request("john", "johns-pass")).await.unwrap();
        let id = service.create(make_request("jane", "s3cure-pass")).await.unwrap();

        let err = service
            .update(UpdateUserRequest {
                id,
                username: "john".to_string(),
                password: "whatever".to_string(),
                profile_photo: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument { ref field, .. } if field == "Username"));
    }

    #[tokio::test]
    async fn test_update_username_case_change_is_allowed() {
        let service = create_service();

        let id = service.create(make_request("jane", "s3cure-pass")).await.unwrap();

        // Case-only change skips the uniqueness check even though the
        // lowercase form matches the stored record itself
        service
            .update(UpdateUserRequest {
                id: id.clone(),
                username: "Jane".to_string(),
                password: "s3cure-pass-x".to_string(),
                profile_photo: None,
            })
            .await
            .unwrap();

        assert_eq!(service.get_by_id(&id).await.unwrap().username, "Jane");
    }

    #[tokio::test]
    async fn test_update_password_containing_username_fails() {
        let service = create_service();

        let id = service.create(make_request("jane", "s3cure-pass")).await.unwrap();

        let err = service
            .update(UpdateUserRequest {
                id,
                username: "jane".to_string(),
                password: "xx-jane-xx".to_string(),
                profile_photo: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument { ref field, .. } if field == "Password"));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let service = create_service();

        let err = service
            .update(UpdateUserRequest {
                id: ObjectId::new().to_hex(),
                username: "ghost".to_string(),
                password: "whatever".to_string(),
                profile_photo: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_change_password_replaces_hash() {
        let service = create_service();

        let id = service.create(make_request("jane", "old-password")).await.unwrap();
        let original_hash = service.get_by_id(&id).await.unwrap().password;

        service
            .change_password(ChangePasswordRequest {
                id: id.clone(),
                username: "jane".to_string(),
                password: "new-password".to_string(),
            })
            .await
            .unwrap();

        let user = service.get_by_id(&id).await.unwrap();
        assert_ne!(user.password, original_hash);

        assert!(!service.credentials_are_valid("jane", "old-password").await.unwrap());
        assert!(service.credentials_are_valid("jane", "new-password").await.unwrap());
    }

    #[tokio::test]
    async fn test_change_password_containing_username_fails() {
        let service = create_service();

        let id = service.create(make_request("jane", "old-password")).await.unwrap();

        let err = service
            .change_password(ChangePasswordRequest {
                id,
                username: "jane".to_string(),
                password: "janes-new-pass".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument { ref field, .. } if field == "Password"));
    }

    #[tokio::test]
    async fn test_username_exists() {
        let service = create_service();

        service.create(make_request("jane", "s3cure-pass")).await.unwrap();

        assert!(service.username_exists("jane").await.unwrap());
        assert!(!service.username_exists("john").await.unwrap());
        // Exact match only
        assert!(!service.username_exists("Jane").await.unwrap());
    }

    #[tokio::test]
    async fn test_credentials_are_valid() {
        let service = create_service();

        service.create(make_request("jane", "s3cure-pass")).await.unwrap();

        assert!(service.credentials_are_valid("jane", "s3cure-pass").await.unwrap());
        assert!(!service.credentials_are_valid("jane", "wrong-pass").await.unwrap());
        assert!(!service.credentials_are_valid("nobody", "s3cure-pass").await.unwrap());
    }

    #[tokio::test]
    async fn test_user_count() {
        let service = create_service();

        assert_eq!(service.user_count().await.unwrap(), 0);

        service.create(make_request("jane", "s3cure-pass")).await.unwrap();
        service.create(make_request("john", "johns-pass")).await.unwrap();

        assert_eq!(service.user_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_user_id() {
        let service = create_service();

        let id = service.create(make_request("jane", "s3cure-pass")).await.unwrap();

        assert_eq!(service.get_user_id("jane").await.unwrap(), id);

        let err = service.get_user_id("nobody").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_by_id_invalid_id() {
        let service = create_service();

        let err = service.get_by_id("not-an-object-id").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidId { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = create_service();

        let id = service.create(make_request("jane", "s3cure-pass")).await.unwrap();
        service.delete(&id).await.unwrap();

        assert_eq!(service.user_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_noop() {
        let service = create_service();

        let result = service.delete(&ObjectId::new().to_hex()).await;
        assert!(result.is_ok());
    }
}
