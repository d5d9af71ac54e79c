// Database queries: CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{accuracy_percent, PerformanceStats, TopicPerformance, UnmatchedLabel};

// --- Topic performance ---

/// Add a session's counters to a user's row for a topic (upsert).
///
/// Counters accumulate; accuracy is recomputed from the new totals.
pub fn record_session(
    conn: &Connection,
    user_id: &str,
    topic: &str,
    total_questions: u32,
    correct_answers: u32,
) -> Result<()> {
    if correct_answers > total_questions {
        anyhow::bail!(
            "Invalid session for {user_id} on {topic}: {correct_answers} correct out of {total_questions}"
        );
    }
    let incorrect = total_questions - correct_answers;
    let accuracy = accuracy_percent(u64::from(correct_answers), u64::from(total_questions));

    // SQLite integers are i64; refuse a write that would push the row past it
    if let Some(existing) = get_topic_performance(conn, user_id, topic)? {
        let new_total = existing
            .total_questions
            .checked_add(u64::from(total_questions))
            .filter(|t| *t <= i64::MAX as u64);
        if new_total.is_none() {
            anyhow::bail!(
                "Question counter overflow for {user_id} on {topic}: {} + {total_questions}",
                existing.total_questions
            );
        }
    }

    conn.execute(
        "INSERT INTO topic_performance
            (user_id, topic, total_questions, correct_answers, incorrect_answers, accuracy,
             last_activity, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'), datetime('now'), datetime('now'))
         ON CONFLICT(user_id, topic) DO UPDATE SET
            total_questions = total_questions + excluded.total_questions,
            correct_answers = correct_answers + excluded.correct_answers,
            incorrect_answers = incorrect_answers + excluded.incorrect_answers,
            accuracy = CASE
                WHEN total_questions + excluded.total_questions > 0
                THEN ROUND((correct_answers + excluded.correct_answers) * 100.0
                           / (total_questions + excluded.total_questions), 2)
                ELSE 0
            END,
            last_activity = datetime('now'),
            updated_at = datetime('now')",
        params![
            user_id,
            topic,
            total_questions,
            correct_answers,
            incorrect,
            accuracy
        ],
    )?;
    Ok(())
}

fn performance_from_row(row: &Row<'_>) -> rusqlite::Result<TopicPerformance> {
    Ok(TopicPerformance {
        user_id: row.get(0)?,
        topic: row.get(1)?,
        total_questions: row.get(2)?,
        correct_answers: row.get(3)?,
        incorrect_answers: row.get(4)?,
        accuracy: row.get(5)?,
        last_activity: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

const PERFORMANCE_COLUMNS: &str = "user_id, topic, total_questions, correct_answers,
    incorrect_answers, accuracy, last_activity, created_at, updated_at";

/// Get a single user's row for a topic.
pub fn get_topic_performance(
    conn: &Connection,
    user_id: &str,
    topic: &str,
) -> Result<Option<TopicPerformance>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PERFORMANCE_COLUMNS} FROM topic_performance WHERE user_id = ?1 AND topic = ?2"
    ))?;
    let result = stmt
        .query_row(params![user_id, topic], performance_from_row)
        .optional()?;
    Ok(result)
}

/// Get all of a user's topics, best accuracy first.
pub fn get_user_performance(conn: &Connection, user_id: &str) -> Result<Vec<TopicPerformance>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PERFORMANCE_COLUMNS} FROM topic_performance
         WHERE user_id = ?1
         ORDER BY accuracy DESC, total_questions DESC, topic ASC"
    ))?;

    let rows = stmt.query_map(params![user_id], performance_from_row)?;

    let mut performance = Vec::new();
    for row in rows {
        performance.push(row?);
    }
    Ok(performance)
}

/// Delete every row for a user. Returns the number of rows removed.
pub fn reset_user(conn: &Connection, user_id: &str) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM topic_performance WHERE user_id = ?1",
        params![user_id],
    )?;
    Ok(removed)
}

/// Store-wide counts: distinct users, distinct topics, rows, questions.
pub fn get_stats(conn: &Connection) -> Result<PerformanceStats> {
    let stats = conn.query_row(
        "SELECT COUNT(DISTINCT user_id), COUNT(DISTINCT topic), COUNT(*),
                COALESCE(SUM(total_questions), 0)
         FROM topic_performance",
        [],
        |row| {
            Ok(PerformanceStats {
                users: row.get(0)?,
                topics: row.get(1)?,
                rows: row.get(2)?,
                questions: row.get::<_, i64>(3)?.max(0) as u64,
            })
        },
    )?;
    Ok(stats)
}

// --- Unmatched labels ---

/// Count a label that produced no topic (upsert).
pub fn note_unmatched(conn: &Connection, label: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO unmatched_labels (label, seen_count, first_seen, last_seen)
         VALUES (?1, 1, datetime('now'), datetime('now'))
         ON CONFLICT(label) DO UPDATE SET
            seen_count = seen_count + 1,
            last_seen = datetime('now')",
        params![label],
    )?;
    Ok(())
}

/// Most frequently seen unmatched labels.
pub fn get_unmatched(conn: &Connection, limit: u32) -> Result<Vec<UnmatchedLabel>> {
    let mut stmt = conn.prepare(
        "SELECT label, seen_count, first_seen, last_seen
         FROM unmatched_labels
         ORDER BY seen_count DESC, last_seen DESC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], |row| {
        Ok(UnmatchedLabel {
            label: row.get(0)?,
            seen_count: row.get(1)?,
            first_seen: row.get(2)?,
            last_seen: row.get(3)?,
        })
    })?;

    let mut labels = Vec::new();
    for row in rows {
        labels.push(row?);
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_first_session_creates_row() {
        let conn = test_conn();
        record_session(&conn, "u1", "OSCE", 10, 7).unwrap();

        let row = get_topic_performance(&conn, "u1", "OSCE").unwrap().unwrap();
        assert_eq!(row.total_questions, 10);
        assert_eq!(row.correct_answers, 7);
        assert_eq!(row.incorrect_answers, 3);
        assert!((row.accuracy - 70.0).abs() < 0.001);
    }

    #[test]
    fn test_sessions_accumulate() {
        let conn = test_conn();
        record_session(&conn, "u1", "DOCTRINA", 4, 4).unwrap();
        record_session(&conn, "u1", "DOCTRINA", 2, 0).unwrap();

        let row = get_topic_performance(&conn, "u1", "DOCTRINA")
            .unwrap()
            .unwrap();
        assert_eq!(row.total_questions, 6);
        assert_eq!(row.correct_answers, 4);
        assert_eq!(row.incorrect_answers, 2);
        assert!((row.accuracy - 66.67).abs() < 0.001);
    }

    #[test]
    fn test_counters_grow_past_u32() {
        let conn = test_conn();
        record_session(&conn, "u", "OSCE", 3_000_000_000, 2_000_000_000).unwrap();
        record_session(&conn, "u", "OSCE", 3_000_000_000, 2_500_000_000).unwrap();

        let row = get_topic_performance(&conn, "u", "OSCE").unwrap().unwrap();
        assert_eq!(row.total_questions, 6_000_000_000);
        assert_eq!(row.correct_answers, 4_500_000_000);
        assert_eq!(row.incorrect_answers, 1_500_000_000);
        assert!((row.accuracy - 75.0).abs() < 0.001);

        let all = get_user_performance(&conn, "u").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(get_stats(&conn).unwrap().questions, 6_000_000_000);
    }

    #[test]
    fn test_overflowing_session_is_rejected_without_writing() {
        let conn = test_conn();
        record_session(&conn, "u", "OSCE", 10, 5).unwrap();
        conn.execute(
            "UPDATE topic_performance SET total_questions = ?1, correct_answers = ?1
             WHERE user_id = 'u'",
            params![i64::MAX - 5],
        )
        .unwrap();

        assert!(record_session(&conn, "u", "OSCE", 10, 5).is_err());
        let row = get_topic_performance(&conn, "u", "OSCE").unwrap().unwrap();
        assert_eq!(row.total_questions, (i64::MAX - 5) as u64);
    }

    #[test]
    fn test_empty_session_keeps_zero_accuracy() {
        let conn = test_conn();
        record_session(&conn, "u1", "OSCE", 0, 0).unwrap();
        record_session(&conn, "u1", "OSCE", 0, 0).unwrap();
        let row = get_topic_performance(&conn, "u1", "OSCE").unwrap().unwrap();
        assert_eq!(row.total_questions, 0);
        assert_eq!(row.accuracy, 0.0);
    }

    #[test]
    fn test_rejects_more_correct_than_total() {
        let conn = test_conn();
        assert!(record_session(&conn, "u1", "OSCE", 2, 3).is_err());
        assert!(get_topic_performance(&conn, "u1", "OSCE").unwrap().is_none());
    }

    #[test]
    fn test_users_are_isolated() {
        let conn = test_conn();
        record_session(&conn, "u1", "OSCE", 5, 5).unwrap();
        record_session(&conn, "u2", "OSCE", 5, 0).unwrap();

        let u1 = get_user_performance(&conn, "u1").unwrap();
        assert_eq!(u1.len(), 1);
        assert_eq!(u1[0].correct_answers, 5);
    }

    #[test]
    fn test_user_performance_ordered_by_accuracy() {
        let conn = test_conn();
        record_session(&conn, "u1", "OSCE", 10, 3).unwrap();
        record_session(&conn, "u1", "DOCTRINA", 10, 9).unwrap();
        record_session(&conn, "u1", "LEY CARRERA MILITAR", 10, 6).unwrap();

        let topics: Vec<String> = get_user_performance(&conn, "u1")
            .unwrap()
            .into_iter()
            .map(|p| p.topic)
            .collect();
        assert_eq!(topics, vec!["DOCTRINA", "LEY CARRERA MILITAR", "OSCE"]);
    }

    #[test]
    fn test_reset_user() {
        let conn = test_conn();
        record_session(&conn, "u1", "OSCE", 1, 1).unwrap();
        record_session(&conn, "u1", "DOCTRINA", 1, 0).unwrap();
        record_session(&conn, "u2", "OSCE", 1, 1).unwrap();

        assert_eq!(reset_user(&conn, "u1").unwrap(), 2);
        assert!(get_user_performance(&conn, "u1").unwrap().is_empty());
        assert_eq!(get_user_performance(&conn, "u2").unwrap().len(), 1);
    }

    #[test]
    fn test_stats() {
        let conn = test_conn();
        assert_eq!(get_stats(&conn).unwrap().rows, 0);

        record_session(&conn, "u1", "OSCE", 3, 1).unwrap();
        record_session(&conn, "u2", "OSCE", 4, 1).unwrap();
        record_session(&conn, "u2", "DOCTRINA", 5, 1).unwrap();

        let stats = get_stats(&conn).unwrap();
        assert_eq!(stats.users, 2);
        assert_eq!(stats.topics, 2);
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.questions, 12);
    }

    #[test]
    fn test_unmatched_counts() {
        let conn = test_conn();
        note_unmatched(&conn, "Simulacro 1").unwrap();
        note_unmatched(&conn, "Simulacro 2").unwrap();
        note_unmatched(&conn, "Simulacro 1").unwrap();

        let labels = get_unmatched(&conn, 10).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label, "Simulacro 1");
        assert_eq!(labels[0].seen_count, 2);

        assert_eq!(get_unmatched(&conn, 1).unwrap().len(), 1);
    }
}
