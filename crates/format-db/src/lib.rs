//! # format-db
//!
//! PostgreSQL database layer for the FormAT assistant.
//!
//! This crate provides:
//! - Connection pool management
//! - The knowledge store (pattern → response rules with usage and feedback)
//! - The training log consumed by the background trainer
//! - Per-user search and question history
//! - In-memory repositories for tests (feature `mock`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use format_db::{Database, KnowledgeRepository, NewKnowledgeEntry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/format").await?;
//!     db.migrate().await?;
//!
//!     let id = db.knowledge.insert(NewKnowledgeEntry::new(
//!         "greeting",
//!         "^hello|^hi",
//!         "Hello! How can I help you today?",
//!         9,
//!     )).await?;
//!
//!     println!("Created entry: {}", id);
//!     Ok(())
//! }
//! ```

pub mod history;
pub mod knowledge;
pub mod pool;
pub mod training;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use format_core::*;

pub use history::PgHistoryRepository;
pub use knowledge::PgKnowledgeRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use training::PgTrainingRepository;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Knowledge entries.
    pub knowledge: PgKnowledgeRepository,
    /// Query training log.
    pub training: PgTrainingRepository,
    /// Search and question history.
    pub history: PgHistoryRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            knowledge: PgKnowledgeRepository::new(pool.clone()),
            training: PgTrainingRepository::new(pool.clone()),
            history: PgHistoryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Connect with an explicit pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
