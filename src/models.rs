//! Record types shared between the stores and the route layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A story record, as persisted and as serialized in API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub likes: i64,
    pub date: DateTime<Utc>,
    /// Owning username. Only set in the authenticated variant; omitted from
    /// serialized output when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Validated input for story creation. The store fills in `id`, `likes`
/// and `date`.
#[derive(Debug, Clone)]
pub struct NewStory {
    pub title: String,
    pub body: String,
    pub user: Option<String>,
}

/// Allow-listed fields for story updates. Anything else in the request body
/// (`user`, `date`, `id`, ...) is dropped at deserialization and can never
/// reach the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoryPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub likes: Option<i64>,
}

impl StoryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.likes.is_none()
    }
}

/// A stored user account. Deliberately not `Serialize`: responses go through
/// [`UserResponse`] so the password hash can never leak.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for user registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Sanitized user payload returned by the registration endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}
