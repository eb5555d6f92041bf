use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::user;

/// Create a minimal router without state (for testing/backward compatibility)
/// Note: /ready endpoint is not available without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // User account endpoints
        .route(
            "/User",
            get(user::list_users)
                .post(user::create_user)
                .patch(user::update_user),
        )
        .route("/User/Password", patch(user::change_password))
        .route("/User/Count", get(user::user_count))
        .route("/User/Self/Profile", get(user::get_own_profile))
        .route("/User/Credentials/Valid", post(user::credentials_are_valid))
        .route(
            "/User/Username/{username}",
            get(user::get_user_id).post(user::username_exists),
        )
        .route("/User/{id}", get(user::get_user).delete(user::delete_user))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
