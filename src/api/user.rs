//! User account endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::middleware::AuthClaims;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Role, User};
use crate::infrastructure::user::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest};

/// User record as exposed over the wire. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub roles: Vec<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_hex().unwrap_or_default(),
            username: user.username.clone(),
            roles: user.roles.clone(),
            created: user.created,
            profile_photo: user.profile_photo.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserPayload {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserPayload {
    pub id: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordPayload {
    pub id: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    pub username: String,
    pub password: String,
}

/// Outcome of a mutation, with the affected record id when there is one
#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl MutationResponse {
    fn new(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            message: message.into(),
            id,
        }
    }
}

/// GET /User - list all user records
pub async fn list_users(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    claims.require_any(&[Role::Service, Role::Administrator])?;

    debug!("Listing all users");

    let users = state.user_service.get_all().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /User/{id} - fetch a single user record
pub async fn get_user(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    claims.require_any(&[Role::Service, Role::User])?;

    debug!(id = %id, "Fetching user");

    let user = state.user_service.get_by_id(&id).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /User/Self/Profile - fetch the record of the token's bearer
pub async fn get_own_profile(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<UserResponse>, ApiError> {
    claims.require_any(&[Role::User, Role::Administrator])?;

    debug!(id = %claims.0.user_id(), "Fetching own profile");

    let user = state.user_service.get_by_id(claims.0.user_id()).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /User - create an account, open to anonymous callers
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<(StatusCode, Json<MutationResponse>), ApiError> {
    info!(username = %payload.username, "Creating user");

    let id = state
        .user_service
        .create(CreateUserRequest {
            username: payload.username,
            password: payload.password,
            profile_photo: payload.profile_photo,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("User was created", Some(id))),
    ))
}

/// PATCH /User - update a user's profile details
pub async fn update_user(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<MutationResponse>, ApiError> {
    claims.require_any(&[Role::Service, Role::User, Role::Administrator])?;

    if claims.0.is_least_privileged() {
        return Err(ApiError::unauthorized(
            "User Not Authorized to update other user's account",
        ));
    }

    info!(id = %payload.id, "Updating user");

    let id = payload.id.clone();
    state
        .user_service
        .update(UpdateUserRequest {
            id: payload.id,
            username: payload.username,
            password: payload.password,
            profile_photo: payload.profile_photo,
        })
        .await?;

    Ok(Json(MutationResponse::new(
        "User details were updated",
        Some(id),
    )))
}

/// PATCH /User/Password - replace a user's password
pub async fn change_password(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<Json<MutationResponse>, ApiError> {
    claims.require_any(&[Role::Service, Role::User, Role::Administrator])?;

    if claims.0.is_least_privileged() {
        return Err(ApiError::unauthorized(
            "User Not Authorized to change other user's password",
        ));
    }

    info!(id = %payload.id, "Changing user password");

    let id = payload.id.clone();
    state
        .user_service
        .change_password(ChangePasswordRequest {
            id: payload.id,
            username: payload.username,
            password: payload.password,
        })
        .await?;

    Ok(Json(MutationResponse::new(
        "User password was changed",
        Some(id),
    )))
}

/// DELETE /User/{id} - remove a user record
pub async fn delete_user(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    claims.require_any(&[Role::Service, Role::Administrator, Role::God])?;

    info!(id = %id, "Deleting user");

    state.user_service.delete(&id).await?;

    Ok(Json(MutationResponse::new("User was deleted", Some(id))))
}

/// GET /User/Count - total number of user records, anonymous
pub async fn user_count(State(state): State<AppState>) -> Result<Json<usize>, ApiError> {
    let count = state.user_service.user_count().await?;

    Ok(Json(count))
}

/// POST /User/Username/{username} - whether the exact username is taken
pub async fn username_exists(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(username): Path<String>,
) -> Result<Json<bool>, ApiError> {
    claims.require_any(&[Role::Service])?;

    debug!(username = %username, "Checking username availability");

    let exists = state.user_service.username_exists(&username).await?;

    Ok(Json(exists))
}

/// GET /User/Username/{username} - resolve a username to its record id
pub async fn get_user_id(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(username): Path<String>,
) -> Result<Json<String>, ApiError> {
    claims.require_any(&[Role::Service])?;

    debug!(username = %username, "Resolving username to id");

    let id = state.user_service.get_user_id(&username).await?;

    Ok(Json(id))
}

/// POST /User/Credentials/Valid - verify a username/password pair
pub async fn credentials_are_valid(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<bool>, ApiError> {
    claims.require_any(&[Role::Service])?;

    debug!(username = %payload.username, "Validating credentials");

    let valid = state
        .user_service
        .credentials_are_valid(&payload.username, &payload.password)
        .await?;

    Ok(Json(valid))
}
