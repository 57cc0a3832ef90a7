use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::StoreError;
use crate::models::{NewUser, User};

/// Store for user credential records. Registration is the only write path;
/// users are never mutated or deleted here.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            password_hash: new.password_hash,
            first_name: new.first_name,
            last_name: new.last_name,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, username, password, first_name, last_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        tracing::info!(username = %user.username, "user registered");
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose().map_err(StoreError::from)
    }
}

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = err {
        if db.message().contains("UNIQUE constraint failed") {
            return StoreError::Duplicate("username");
        }
    }
    StoreError::Sqlx(err)
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id).map_err(|e| sqlx::Error::ColumnDecode {
        index: "id".to_string(),
        source: Box::new(e),
    })?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(User {
        id,
        username: row.try_get("username")?,
        password_hash: row.try_get("password")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::connect;

    async fn test_store() -> UserStore {
        let pool = connect("sqlite::memory:").await.expect("in-memory database");
        UserStore::new(pool)
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            first_name: "Example".to_string(),
            last_name: "User".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_find_round_trip() {
        let store = test_store().await;
        let created = store.insert(new_user("exampleUser")).await.unwrap();

        let found = store.find_by_username("exampleUser").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$2b$12$hash");
        assert_eq!(found.first_name, "Example");

        assert!(store.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = test_store().await;
        store.insert(new_user("exampleUser")).await.unwrap();

        let err = store.insert(new_user("exampleUser")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate("username")));
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let store = test_store().await;
        store.insert(new_user("exampleUser")).await.unwrap();
        assert!(store.find_by_username("exampleuser").await.unwrap().is_none());
    }
}
