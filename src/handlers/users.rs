use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extract::Json;
use crate::models::{NewUser, UserResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

// bcrypt truncates input beyond 72 bytes, hence the upper bound.
const PASSWORD_MIN: usize = 10;
const PASSWORD_MAX: usize = 72;

/// POST /users - register a new account. Field violations answer 422 with
/// the offending field named; a taken username is also a 422.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = payload
        .username
        .ok_or_else(|| ApiError::unprocessable("Missing field", "username"))?;
    let password = payload
        .password
        .ok_or_else(|| ApiError::unprocessable("Missing field", "password"))?;

    if username != username.trim() {
        return Err(ApiError::unprocessable("Cannot start or end with whitespace", "username"));
    }
    if password != password.trim() {
        return Err(ApiError::unprocessable("Cannot start or end with whitespace", "password"));
    }
    if username.is_empty() {
        return Err(ApiError::unprocessable("Must be at least 1 character long", "username"));
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(ApiError::unprocessable("Must be at least 10 characters long", "password"));
    }
    if password.len() > PASSWORD_MAX {
        return Err(ApiError::unprocessable("Must be at most 72 characters long", "password"));
    }

    let password_hash = state.hasher.hash(&password)?;
    let user = state
        .users
        .insert(NewUser {
            username,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(&user))))
}
