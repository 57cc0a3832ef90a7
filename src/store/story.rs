use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::StoreError;
use crate::models::{NewStory, Story, StoryPatch};

/// Document-style store for story records.
#[derive(Clone)]
pub struct StoryStore {
    pool: SqlitePool,
}

impl StoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new story. The store assigns the id, zeroes the like count
    /// and stamps the creation time.
    pub async fn insert(&self, new: NewStory) -> Result<Story, StoreError> {
        let story = Story {
            id: Uuid::new_v4(),
            title: new.title,
            body: new.body,
            likes: 0,
            date: Utc::now(),
            user: new.user,
        };

        sqlx::query(
            r#"INSERT INTO stories (id, title, body, likes, date, "user")
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
        )
        .bind(story.id.to_string())
        .bind(&story.title)
        .bind(&story.body)
        .bind(story.likes)
        .bind(story.date)
        .bind(&story.user)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %story.id, "story created");
        Ok(story)
    }

    pub async fn find_all(&self) -> Result<Vec<Story>, StoreError> {
        let rows = sqlx::query("SELECT * FROM stories")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| story_from_row(row).map_err(StoreError::from)).collect()
    }

    /// Exact, case-sensitive match on the owning username.
    pub async fn find_by_user(&self, user: &str) -> Result<Vec<Story>, StoreError> {
        let rows = sqlx::query(r#"SELECT * FROM stories WHERE "user" = ?1"#)
            .bind(user)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(|row| story_from_row(row).map_err(StoreError::from)).collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Story>, StoreError> {
        let row = sqlx::query("SELECT * FROM stories WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(story_from_row).transpose().map_err(StoreError::from)
    }

    /// Apply a partial update: absent patch fields leave the stored value
    /// untouched. Returns `None` when no story has this id.
    pub async fn update(&self, id: Uuid, patch: StoryPatch) -> Result<Option<Story>, StoreError> {
        let result = sqlx::query(
            r#"UPDATE stories
               SET title = COALESCE(?1, title),
                   body  = COALESCE(?2, body),
                   likes = COALESCE(?3, likes)
               WHERE id = ?4"#,
        )
        .bind(patch.title)
        .bind(patch.body)
        .bind(patch.likes)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Returns whether a story with this id existed and was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM stories WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn story_from_row(row: &SqliteRow) -> Result<Story, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id).map_err(|e| sqlx::Error::ColumnDecode {
        index: "id".to_string(),
        source: Box::new(e),
    })?;
    let date: DateTime<Utc> = row.try_get("date")?;

    Ok(Story {
        id,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        likes: row.try_get("likes")?,
        date,
        user: row.try_get("user")?,
    })
}
