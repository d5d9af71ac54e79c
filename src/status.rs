// System status display: shows DB stats, catalog source, unmatched labels.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;
use crate::topics::catalog::Catalog;

/// Display system status to the terminal.
pub async fn show(
    db: &Arc<dyn Database>,
    db_path: &str,
    catalog: &Catalog,
    catalog_source: &str,
    fuzzy: bool,
) -> Result<()> {
    // Database file size
    let file_size = std::fs::metadata(Path::new(db_path))
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    println!(
        "Catalog: {} topics from {} (fuzzy fallback {})",
        catalog.len(),
        catalog_source,
        if fuzzy { "on" } else { "off" }
    );

    let stats = db.get_stats().await?;
    println!(
        "Performance: {} users, {} topics, {} rows, {} questions",
        stats.users, stats.topics, stats.rows, stats.questions
    );

    let unmatched = db.get_unmatched(5).await?;
    if unmatched.is_empty() {
        println!("Unmatched labels: none");
    } else {
        println!("Unmatched labels: {} most frequent:", unmatched.len());
        for label in &unmatched {
            println!("  {}x \"{}\"", label.seen_count, label.label);
        }
        println!("  Run `quizbridge unmatched` for the full list");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
