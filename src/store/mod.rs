//! Persistence layer: one record store per entity type over a shared
//! SQLite pool. The stores expose document-style operations only; callers
//! never see SQL.

pub mod story;
pub mod user;

pub use story::StoryStore;
pub use user::UserStore;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated on {0}")]
    Duplicate(&'static str),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_STORIES: &str = r#"
CREATE TABLE IF NOT EXISTS stories (
    id      TEXT PRIMARY KEY,
    title   TEXT NOT NULL,
    body    TEXT NOT NULL,
    likes   INTEGER NOT NULL DEFAULT 0,
    date    TEXT NOT NULL,
    "user"  TEXT
)"#;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY,
    username    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,
    first_name  TEXT NOT NULL DEFAULT '',
    last_name   TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL
)"#;

/// Open the database pool and make sure the schema exists.
pub async fn connect(database_url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // An in-memory database lives and dies with a single connection, so the
    // pool must not fan out there.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    tracing::debug!(url = database_url, "database ready");
    Ok(pool)
}

async fn init_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(CREATE_STORIES).execute(pool).await?;
    sqlx::query(CREATE_USERS).execute(pool).await?;
    Ok(())
}
