// Database trait: async interface for all DB operations.
//
// Implementor: SqliteDatabase (wraps rusqlite). The methods are async so a
// native async backend could slot in later without touching callers.
//
// The trait mirrors the queries.rs function signatures, so tests can use
// either the free functions against a Connection or `Arc<dyn Database>`.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{PerformanceStats, TopicPerformance, UnmatchedLabel};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Topic performance ---

    /// Add a session's counters to the (user, topic) row.
    async fn record_session(
        &self,
        user_id: &str,
        topic: &str,
        total_questions: u32,
        correct_answers: u32,
    ) -> Result<()>;

    /// Get a single user's row for a topic.
    async fn get_topic_performance(
        &self,
        user_id: &str,
        topic: &str,
    ) -> Result<Option<TopicPerformance>>;

    /// Get all of a user's topics, best accuracy first.
    async fn get_user_performance(&self, user_id: &str) -> Result<Vec<TopicPerformance>>;

    /// Delete every row for a user, returning how many were removed.
    async fn reset_user(&self, user_id: &str) -> Result<usize>;

    /// Store-wide counts for the status screen.
    async fn get_stats(&self) -> Result<PerformanceStats>;

    // --- Unmatched labels ---

    /// Count a label that produced no topic.
    async fn note_unmatched(&self, label: &str) -> Result<()>;

    /// Most frequently seen unmatched labels.
    async fn get_unmatched(&self, limit: u32) -> Result<Vec<UnmatchedLabel>>;
}
