//! User Accounts API
//!
//! A small account-management service:
//! - User record CRUD backed by MongoDB (or an in-memory store)
//! - Argon2 password hashing and credential validation
//! - Role-gated HTTP endpoints authenticated with JWT bearer tokens

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::auth::JwtService;
use infrastructure::user::{Argon2Hasher, InMemoryUserContext, MongoUserContext, UserService};
use tracing::info;

/// Create the application state for the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new());

    let token_verifier = Arc::new(JwtService::new(
        &config.auth.secret,
        config.auth.expiration_minutes,
    ));

    let state = match config.database.backend.as_str() {
        "memory" => {
            info!("Using in-memory user store");

            let repository = Arc::new(InMemoryUserContext::new());
            let service = UserService::new(
                repository,
                hasher,
                config.assets.default_profile_photo.clone(),
            );

            AppState::new(Arc::new(service), token_verifier)
        }
        _ => {
            let repository = Arc::new(MongoUserContext::connect(&config.database).await?);
            let service = UserService::new(
                repository,
                hasher,
                config.assets.default_profile_photo.clone(),
            );

            AppState::new(Arc::new(service), token_verifier)
        }
    };

    Ok(state)
}
