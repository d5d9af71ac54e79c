// Performance recording pipeline: quiz attempt -> topic -> counters.
//
// An attempt carries the quiz's labels and the session's question counts.
// The labels are resolved to a canonical topic and the counters are added to
// the user's row for that topic. Attempts whose labels match no topic are
// not recorded; the quiz name is logged to `unmatched_labels` instead so the
// catalog can be extended later.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db::models::TopicPerformance;
use crate::db::Database;
use crate::topics::resolve::{resolve, QuizLabels, Resolution};
use crate::topics::traits::TopicClassifier;

/// A single finished quiz attempt, as exported by the quiz platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub user_id: String,
    #[serde(flatten)]
    pub labels: QuizLabels,
    pub total_questions: u32,
    pub correct_answers: u32,
}

/// What happened to a recorded attempt.
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub resolution: Resolution,
    /// The user's row for the topic after the update
    pub performance: TopicPerformance,
}

/// Resolve an attempt's topic and add its counters to the store.
///
/// Returns `Ok(None)` when no topic could be detected; that is a normal
/// outcome, not an error.
pub async fn record_attempt(
    db: &dyn Database,
    classifier: &dyn TopicClassifier,
    attempt: &QuizAttempt,
) -> Result<Option<RecordOutcome>> {
    if attempt.correct_answers > attempt.total_questions {
        anyhow::bail!(
            "Attempt for {} has {} correct answers out of {} questions",
            attempt.user_id,
            attempt.correct_answers,
            attempt.total_questions
        );
    }

    let Some(resolution) = resolve(classifier, &attempt.labels) else {
        info!(
            user = %attempt.user_id,
            quiz = %attempt.labels.quiz_name,
            "No topic detected, attempt not recorded"
        );
        db.note_unmatched(&attempt.labels.quiz_name).await?;
        return Ok(None);
    };

    let topic = resolution.matched.topic.as_str();
    db.record_session(
        &attempt.user_id,
        topic,
        attempt.total_questions,
        attempt.correct_answers,
    )
    .await?;

    let Some(performance) = db.get_topic_performance(&attempt.user_id, topic).await? else {
        anyhow::bail!(
            "Row for {} on {} missing right after recording",
            attempt.user_id,
            topic
        );
    };

    info!(
        user = %attempt.user_id,
        topic,
        source = %resolution.source,
        total = performance.total_questions,
        accuracy = performance.accuracy,
        "Recorded topic performance"
    );

    Ok(Some(RecordOutcome {
        resolution,
        performance,
    }))
}

/// Totals from replaying a batch of attempts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaySummary {
    pub recorded: usize,
    pub unmatched: usize,
    pub failed: usize,
    /// Attempts recorded per canonical topic
    pub per_topic: BTreeMap<String, usize>,
}

/// Record a batch of attempts, continuing past individual failures.
pub async fn replay(
    db: &dyn Database,
    classifier: &dyn TopicClassifier,
    attempts: &[QuizAttempt],
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for attempt in attempts {
        match record_attempt(db, classifier, attempt).await {
            Ok(Some(outcome)) => {
                summary.recorded += 1;
                *summary
                    .per_topic
                    .entry(outcome.resolution.matched.topic)
                    .or_insert(0) += 1;
            }
            Ok(None) => summary.unmatched += 1,
            Err(e) => {
                warn!(
                    user = %attempt.user_id,
                    quiz = %attempt.labels.quiz_name,
                    error = %e,
                    "Failed to record attempt"
                );
                summary.failed += 1;
            }
        }
    }

    info!(
        recorded = summary.recorded,
        unmatched = summary.unmatched,
        failed = summary.failed,
        "Replay complete"
    );

    Ok(summary)
}

/// Parse attempts from a JSON array.
pub fn parse_attempts(json: &str) -> Result<Vec<QuizAttempt>> {
    let attempts: Vec<QuizAttempt> = serde_json::from_str(json)?;
    Ok(attempts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attempts_flattens_labels() {
        let json = r#"[{
            "user_id": "tg-42",
            "quiz_name": "Test 4",
            "course_name": "Doctrina",
            "category_names": [],
            "total_questions": 10,
            "correct_answers": 8
        }]"#;
        let attempts = parse_attempts(json).unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].labels.quiz_name, "Test 4");
        assert_eq!(attempts[0].labels.course_name.as_deref(), Some("Doctrina"));
    }

    #[test]
    fn test_parse_attempts_optional_labels() {
        let json = r#"[{"user_id": "u", "quiz_name": "OSCE", "total_questions": 1, "correct_answers": 1}]"#;
        let attempts = parse_attempts(json).unwrap();
        assert!(attempts[0].labels.course_name.is_none());
        assert!(attempts[0].labels.category_names.is_empty());
    }
}
