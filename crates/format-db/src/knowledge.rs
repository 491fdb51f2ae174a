//! Knowledge entry repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use format_core::{Error, KnowledgeEntry, KnowledgeRepository, NewKnowledgeEntry, Result};

const SELECT_COLUMNS: &str =
    "id, category, pattern, response, weight, usage_count, feedback, created_at, updated_at";

fn row_to_entry(row: PgRow) -> KnowledgeEntry {
    KnowledgeEntry {
        id: row.get("id"),
        category: row.get("category"),
        pattern: row.get("pattern"),
        response: row.get("response"),
        weight: row.get("weight"),
        usage_count: row.get("usage_count"),
        feedback: row.get("feedback"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// PostgreSQL implementation of KnowledgeRepository.
#[derive(Clone)]
pub struct PgKnowledgeRepository {
    pool: Pool<Postgres>,
}

impl PgKnowledgeRepository {
    /// Create a new PgKnowledgeRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KnowledgeRepository for PgKnowledgeRepository {
    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ai_knowledge")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(count)
    }

    async fn list_by_weight(&self) -> Result<Vec<KnowledgeEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM ai_knowledge ORDER BY weight DESC, created_at ASC, id ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_entry).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<KnowledgeEntry>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM ai_knowledge WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(row_to_entry))
    }

    async fn insert(&self, entry: NewKnowledgeEntry) -> Result<Uuid> {
        entry.validate()?;

        let id = Uuid::now_v7();
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO ai_knowledge
                (id, category, pattern, response, weight, usage_count, feedback, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 0, 0, $6, $6)
            "#,
        )
        .bind(id)
        .bind(&entry.category)
        .bind(&entry.pattern)
        .bind(&entry.response)
        .bind(entry.weight)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn increment_usage(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE ai_knowledge SET usage_count = usage_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }

    async fn adjust_feedback(&self, id: Uuid, delta: i32) -> Result<()> {
        let result = sqlx::query(
            "UPDATE ai_knowledge SET feedback = feedback + $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(delta)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Knowledge entry {}", id)));
        }
        Ok(())
    }

    async fn list_decay_candidates(
        &self,
        min_usage: i32,
        max_feedback: i32,
    ) -> Result<Vec<KnowledgeEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM ai_knowledge WHERE usage_count > $1 AND feedback < $2",
            SELECT_COLUMNS
        ))
        .bind(min_usage)
        .bind(max_feedback)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_entry).collect())
    }

    async fn set_weight(&self, id: Uuid, weight: i32) -> Result<()> {
        if weight < 0 {
            return Err(Error::InvalidInput(format!(
                "Knowledge weight must be non-negative, got {}",
                weight
            )));
        }

        sqlx::query("UPDATE ai_knowledge SET weight = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(weight)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
