//! Training log repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use format_core::{Error, Result, TrainingCategory, TrainingRecord, TrainingRepository};

/// PostgreSQL implementation of TrainingRepository.
#[derive(Clone)]
pub struct PgTrainingRepository {
    pool: Pool<Postgres>,
}

impl PgTrainingRepository {
    /// Create a new PgTrainingRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainingRepository for PgTrainingRepository {
    async fn insert(
        &self,
        input: &str,
        category: TrainingCategory,
        actual_output: Option<&str>,
    ) -> Result<Uuid> {
        let id = Uuid::now_v7();
        sqlx::query(
            r#"
            INSERT INTO ai_training_data (id, input, category, actual_output, processed, created_at)
            VALUES ($1, $2, $3, $4, FALSE, $5)
            "#,
        )
        .bind(id)
        .bind(input)
        .bind(category.as_str())
        .bind(actual_output)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(id)
    }

    async fn list_unprocessed(&self, limit: i64) -> Result<Vec<TrainingRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, input, category, actual_output, processed, created_at
            FROM ai_training_data
            WHERE processed = FALSE
            ORDER BY created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let records = rows
            .into_iter()
            .map(|row| TrainingRecord {
                id: row.get("id"),
                input: row.get("input"),
                category: row.get("category"),
                actual_output: row.get("actual_output"),
                processed: row.get("processed"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(records)
    }

    async fn mark_processed(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE ai_training_data SET processed = TRUE WHERE id = $1 AND processed = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() == 1)
    }
}
