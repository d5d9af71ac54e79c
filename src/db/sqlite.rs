// SqliteDatabase: rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{PerformanceStats, TopicPerformance, UnmatchedLabel};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn record_session(
        &self,
        user_id: &str,
        topic: &str,
        total_questions: u32,
        correct_answers: u32,
    ) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::record_session(&conn, user_id, topic, total_questions, correct_answers)
    }

    async fn get_topic_performance(
        &self,
        user_id: &str,
        topic: &str,
    ) -> Result<Option<TopicPerformance>> {
        let conn = self.conn.lock().await;
        super::queries::get_topic_performance(&conn, user_id, topic)
    }

    async fn get_user_performance(&self, user_id: &str) -> Result<Vec<TopicPerformance>> {
        let conn = self.conn.lock().await;
        super::queries::get_user_performance(&conn, user_id)
    }

    async fn reset_user(&self, user_id: &str) -> Result<usize> {
        let conn = self.conn.lock().await;
        super::queries::reset_user(&conn, user_id)
    }

    async fn get_stats(&self) -> Result<PerformanceStats> {
        let conn = self.conn.lock().await;
        super::queries::get_stats(&conn)
    }

    async fn note_unmatched(&self, label: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::note_unmatched(&conn, label)
    }

    async fn get_unmatched(&self, limit: u32) -> Result<Vec<UnmatchedLabel>> {
        let conn = self.conn.lock().await;
        super::queries::get_unmatched(&conn, limit)
    }
}
