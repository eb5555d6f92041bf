//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::{DomainError, Role};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user record id, hex)
    pub sub: String,
    /// Roles granted to the bearer
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl Claims {
    /// Create new claims for a user id with the given roles
    pub fn new(user_id: impl Into<String>, roles: Vec<Role>, expiration_minutes: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(expiration_minutes as i64);

        Self {
            sub: user_id.into(),
            roles,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Get user id from claims
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Whether the bearer holds at least one of the given roles
    pub fn has_any(&self, roles: &[Role]) -> bool {
        self.roles.iter().any(|r| roles.contains(r))
    }

    /// Whether the bearer holds no role beyond the base user role
    pub fn is_least_privileged(&self) -> bool {
        self.roles.iter().all(|r| *r == Role::User)
    }
}

/// Trait for validating bearer tokens into claims
pub trait TokenVerifier: Send + Sync {
    fn validate(&self, token: &str) -> Result<Claims, DomainError>;
}

/// JWT service implementation using an HMAC secret
#[derive(Clone)]
pub struct JwtService {
    expiration_minutes: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_minutes", &self.expiration_minutes)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given secret
    pub fn new(secret: &str, expiration_minutes: u64) -> Self {
        Self {
            expiration_minutes,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generate a signed token for a user id with the given roles
    pub fn generate(&self, user_id: &str, roles: Vec<Role>) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, roles, self.expiration_minutes);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }
}

impl TokenVerifier for JwtService {
    fn validate(&self, token: &str) -> Result<Claims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::unauthorized(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }
}
