// Data models: Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// Aggregate counters for one user on one canonical topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicPerformance {
    pub user_id: String,
    pub topic: String,
    pub total_questions: u64,
    pub correct_answers: u64,
    pub incorrect_answers: u64,
    /// Percent correct, rounded to two decimals
    pub accuracy: f64,
    pub last_activity: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A label that reached the recorder without a detectable topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedLabel {
    pub label: String,
    pub seen_count: u64,
    pub first_seen: String,
    pub last_seen: String,
}

/// Store-wide counts for the status screen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub users: u32,
    pub topics: u32,
    pub rows: u32,
    pub questions: u64,
}

/// Accuracy bands used when displaying performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyBand {
    Weak,
    Fair,
    Good,
    Strong,
}

impl AccuracyBand {
    /// Determine the band from an accuracy percentage (0-100).
    pub fn from_accuracy(accuracy: f64) -> Self {
        match accuracy {
            a if a >= 85.0 => AccuracyBand::Strong,
            a if a >= 70.0 => AccuracyBand::Good,
            a if a >= 50.0 => AccuracyBand::Fair,
            _ => AccuracyBand::Weak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccuracyBand::Weak => "Weak",
            AccuracyBand::Fair => "Fair",
            AccuracyBand::Good => "Good",
            AccuracyBand::Strong => "Strong",
        }
    }
}

impl std::fmt::Display for AccuracyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accuracy as a percentage rounded to two decimals; 0 when nothing was answered.
pub fn accuracy_percent(correct: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = correct as f64 * 100.0 / total as f64;
    (raw * 100.0).round() / 100.0
}
