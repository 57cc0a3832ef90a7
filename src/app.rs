use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{Bcrypt, PasswordHasher, TokenService};
use crate::config::{AppConfig, AuthMode};
use crate::error::ApiError;
use crate::handlers::{auth, stories, users};
use crate::middleware::require_auth;
use crate::store::{StoryStore, UserStore};

/// Shared per-request context: the record stores, the token service and the
/// injected password hasher.
#[derive(Clone)]
pub struct AppState {
    pub stories: StoryStore,
    pub users: UserStore,
    pub tokens: TokenService,
    pub hasher: Arc<dyn PasswordHasher>,
    pub auth: AuthMode,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Self {
        Self {
            stories: StoryStore::new(pool.clone()),
            users: UserStore::new(pool.clone()),
            tokens: TokenService::new(config.jwt_secret.clone(), config.jwt_expiry_days),
            hasher: Arc::new(Bcrypt),
            auth: config.auth,
            pool,
        }
    }
}

/// Build the full router for the configured variant.
pub fn router(state: AppState) -> Router {
    let variant = match state.auth {
        AuthMode::Required => authenticated_routes(state.clone()),
        AuthMode::Open => open_routes(),
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(variant)
        .fallback(not_found)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Authenticated variant: registration and login stay open, everything else
/// sits behind the token gate.
fn authenticated_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/stories", get(stories::list).post(stories::create))
        .route(
            "/stories/story/:id",
            get(stories::get_by_id).put(stories::update).delete(stories::delete),
        )
        .route("/stories/:user", get(stories::list_by_user))
        .route("/auth/refresh", post(auth::refresh))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/users", post(users::register))
        .route("/auth/login", post(auth::login))
        .merge(protected)
}

/// Open variant: the same story surface, no gate, no per-user listing.
fn open_routes() -> Router<AppState> {
    Router::new()
        .route("/stories", get(stories::list).post(stories::create))
        .route(
            "/stories/story/:id",
            get(stories::get_by_id).put(stories::update).delete(stories::delete),
        )
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Stories API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "stories": "/stories, /stories/story/:id",
            "auth": "/auth/login, /auth/refresh",
            "users": "/users",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "timestamp": now, "database": e.to_string() })),
        ),
    }
}

/// Catch-all for unmatched routes; unknown-id handlers produce the same body.
async fn not_found() -> ApiError {
    ApiError::NotFound
}
