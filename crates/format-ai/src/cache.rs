//! Process-wide snapshot of compiled knowledge entries.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use format_core::{KnowledgeEntry, KnowledgeRepository, Result};

use crate::matcher::CompiledEntry;

#[derive(Default)]
struct CacheState {
    entries: Arc<Vec<CompiledEntry>>,
    loaded: bool,
}

/// Compiled knowledge, ordered by weight descending.
///
/// Readers clone the inner `Arc`, so a refresh swaps the snapshot without
/// blocking queries already matching against the old one.
#[derive(Default)]
pub struct KnowledgeCache {
    state: RwLock<CacheState>,
}

impl KnowledgeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. Empty until the first load.
    pub async fn snapshot(&self) -> Arc<Vec<CompiledEntry>> {
        self.state.read().await.entries.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.loaded
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Replace the snapshot with `entries`, which must already be ordered.
    pub async fn replace(&self, entries: Vec<KnowledgeEntry>) {
        let compiled: Vec<CompiledEntry> = entries.into_iter().map(CompiledEntry::compile).collect();
        let mut state = self.state.write().await;
        state.entries = Arc::new(compiled);
        state.loaded = true;
    }

    /// Reload from the store.
    pub async fn refresh(&self, repo: &dyn KnowledgeRepository) -> Result<usize> {
        let entries = repo.list_by_weight().await?;
        let count = entries.len();
        self.replace(entries).await;
        debug!(
            subsystem = "ai",
            component = "cache",
            op = "refresh",
            entry_count = count,
            "Knowledge cache refreshed"
        );
        Ok(count)
    }

    /// Mirror a usage increment without a full reload.
    pub async fn record_usage(&self, id: Uuid) {
        let mut state = self.state.write().await;
        let entries = Arc::make_mut(&mut state.entries);
        if let Some(c) = entries.iter_mut().find(|c| c.entry.id == id) {
            c.entry.usage_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use format_db::mock::MockKnowledgeRepository;
    use format_core::NewKnowledgeEntry;

    #[tokio::test]
    async fn test_refresh_orders_by_weight() {
        let repo = MockKnowledgeRepository::new();
        repo.insert(NewKnowledgeEntry::new("c", "low", "r", 1))
            .await
            .unwrap();
        repo.insert(NewKnowledgeEntry::new("c", "high", "r", 9))
            .await
            .unwrap();

        let cache = KnowledgeCache::new();
        assert!(!cache.is_loaded().await);
        assert_eq!(cache.refresh(&repo).await.unwrap(), 2);

        let snap = cache.snapshot().await;
        assert!(cache.is_loaded().await);
        assert_eq!(snap[0].entry.pattern, "high");
    }

    #[tokio::test]
    async fn test_record_usage_does_not_touch_old_snapshot() {
        let repo = MockKnowledgeRepository::new();
        let id = repo
            .insert(NewKnowledgeEntry::new("c", "rust", "r", 5))
            .await
            .unwrap();
        let cache = KnowledgeCache::new();
        cache.refresh(&repo).await.unwrap();

        let before = cache.snapshot().await;
        cache.record_usage(id).await;
        let after = cache.snapshot().await;

        assert_eq!(before[0].entry.usage_count, 0);
        assert_eq!(after[0].entry.usage_count, 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let repo = MockKnowledgeRepository::new();
        repo.insert(NewKnowledgeEntry::new("c", "rust", "r", 5))
            .await
            .unwrap();
        let cache = KnowledgeCache::new();
        cache.refresh(&repo).await.unwrap();

        repo.set_failing(true);
        assert!(cache.refresh(&repo).await.is_err());
        assert_eq!(cache.len().await, 1);
    }
}
