use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::config::AuthMode;
use crate::error::ApiError;
use crate::extract::Json;
use crate::models::{NewStory, StoryPatch};

/// Fields accepted at creation. `likes` and `date` are never creation
/// inputs; the store assigns them.
#[derive(Debug, Deserialize)]
pub struct CreateStory {
    pub title: Option<String>,
    pub body: Option<String>,
    pub user: Option<String>,
}

/// GET /stories - list every story in store order.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stories = state.stories.find_all().await?;
    Ok(Json(stories))
}

/// GET /stories/:user - list stories owned by a user; an empty match is a
/// 200 with an empty array, not an error.
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stories = state.stories.find_by_user(&user).await?;
    Ok(Json(stories))
}

/// GET /stories/story/:id - fetch a single story. Replies 201 on success;
/// that status is part of the published v1 contract.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_story_id(&id)?;
    let story = state.stories.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok((StatusCode::CREATED, Json(story)))
}

/// POST /stories - create a story. `title` and `body` are required; `user`
/// is required as well when the auth gate is on.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateStory>,
) -> Result<impl IntoResponse, ApiError> {
    let title = required_field(payload.title)?;
    let body = required_field(payload.body)?;
    let user = match state.auth {
        AuthMode::Required => Some(required_field(payload.user)?),
        AuthMode::Open => None,
    };

    let story = state.stories.insert(NewStory { title, body, user }).await?;
    Ok((StatusCode::CREATED, Json(story)))
}

/// PUT /stories/story/:id - partial update over the title/body/likes
/// allow-list. Fields outside the list never reach the store because the
/// patch type simply has nowhere to put them.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<StoryPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_story_id(&id)?;

    if patch.is_empty() {
        return Err(ApiError::bad_request("Missing parameter in request body"));
    }
    if is_blank(&patch.title) || is_blank(&patch.body) {
        return Err(ApiError::bad_request("Fields may not be empty"));
    }

    let story = state.stories.update(id, patch).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(story))
}

/// DELETE /stories/story/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_story_id(&id)?;
    if state.stories.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

// An unparseable id cannot name any stored record.
fn parse_story_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

fn required_field(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::bad_request("Missing parameters in request body")),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    matches!(value, Some(v) if v.trim().is_empty())
}
