//! Admin login handler.
//!
//! A gate for the admin screen of the counter UI, nothing more: no
//! sessions, no tokens, credentials from environment configuration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

/// Body of `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login outcome.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
}

/// `POST /admin/login` - check credentials against configuration.
///
/// 200 `{success: true}` on a match, 401 `{success: false}` otherwise.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, Json<LoginResponse>) {
    let ok = request.username == state.config.admin_username
        && request.password == state.config.admin_password;

    if ok {
        (StatusCode::OK, Json(LoginResponse { success: true }))
    } else {
        warn!(username = %request.username, "Failed admin login attempt");
        (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse { success: false }),
        )
    }
}
