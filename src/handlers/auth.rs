use axum::{extract::State, response::IntoResponse, Extension};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extract::Json;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/login - exchange a username/password pair for a bearer token.
/// Unknown users and wrong passwords get the same answer.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Incorrect username or password"))?;

    let verified = state.hasher.verify(&payload.password, &user.password_hash)?;
    if !verified {
        tracing::debug!(username = %payload.username, "login failed");
        return Err(ApiError::unauthorized("Incorrect username or password"));
    }

    let issued = state.tokens.issue(&user.username, &user.first_name, &user.last_name)?;
    Ok(Json(issued))
}

/// POST /auth/refresh - issue a fresh token for the already-authenticated
/// bearer. Sits behind the auth gate, so reaching it proves the old token.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let issued = state.tokens.issue(&user.username, &user.first_name, &user.last_name)?;
    Ok(Json(issued))
}
