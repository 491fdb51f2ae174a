//! Search and question history repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use format_core::{
    Error, HistoryRepository, NewQuestionHistory, NewSearchHistory, QuestionHistoryEntry, Result,
    SearchHistoryEntry, SearchResult,
};

fn row_to_search(row: PgRow) -> SearchHistoryEntry {
    let Json(results): Json<Vec<SearchResult>> = row.get("results");
    SearchHistoryEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        query: row.get("query"),
        summary: row.get("summary"),
        results,
        created_at: row.get("created_at"),
    }
}

fn row_to_question(row: PgRow) -> QuestionHistoryEntry {
    QuestionHistoryEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        question: row.get("question"),
        summary: row.get("summary"),
        answer: row.get("answer"),
        created_at: row.get("created_at"),
    }
}

/// PostgreSQL implementation of HistoryRepository.
#[derive(Clone)]
pub struct PgHistoryRepository {
    pool: Pool<Postgres>,
}

impl PgHistoryRepository {
    /// Create a new PgHistoryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    async fn insert_search(&self, entry: NewSearchHistory) -> Result<Uuid> {
        let id = Uuid::now_v7();
        sqlx::query(
            r#"
            INSERT INTO search_history (id, user_id, query, summary, results, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(&entry.user_id)
        .bind(&entry.query)
        .bind(&entry.summary)
        .bind(Json(&entry.results))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(id)
    }

    async fn list_search_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<SearchHistoryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, query, summary, results, created_at
            FROM search_history
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_search).collect())
    }

    async fn list_all_search(&self) -> Result<Vec<SearchHistoryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, query, summary, results, created_at
            FROM search_history
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_search).collect())
    }

    async fn insert_question(&self, entry: NewQuestionHistory) -> Result<Uuid> {
        let id = Uuid::now_v7();
        sqlx::query(
            r#"
            INSERT INTO question_history (id, user_id, question, summary, answer, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(&entry.user_id)
        .bind(&entry.question)
        .bind(&entry.summary)
        .bind(&entry.answer)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(id)
    }

    async fn list_questions_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<QuestionHistoryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, question, summary, answer, created_at
            FROM question_history
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_question).collect())
    }
}
