// Colored terminal output for classifications, catalogs and performance.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::db::models::{AccuracyBand, TopicPerformance, UnmatchedLabel};
use crate::topics::catalog::Catalog;
use crate::topics::matcher::{MatchKind, TopicMatch};
use crate::topics::resolve::Resolution;

/// Display the result of classifying a single label.
pub fn display_classification(label: &str, found: Option<&TopicMatch>) {
    let preview = super::truncate_chars(label, 60);
    match found {
        Some(m) => {
            let kind = match m.kind {
                MatchKind::Substring => m.kind.as_str().dimmed(),
                MatchKind::Fuzzy => m.kind.as_str().yellow(),
            };
            println!(
                "  {:<62} {} {}  {}",
                format!("\"{preview}\""),
                "->".dimmed(),
                m.topic.bold(),
                format!("[{kind}: {}]", m.pattern).dimmed(),
            );
        }
        None => {
            println!(
                "  {:<62} {} {}",
                format!("\"{preview}\""),
                "->".dimmed(),
                "no topic detected".red(),
            );
        }
    }
}

/// Display which label of a quiz resolved to a topic.
pub fn display_resolution(resolution: Option<&Resolution>) {
    match resolution {
        Some(r) => {
            println!("  Topic:   {}", r.matched.topic.bold());
            println!("  From:    {} \"{}\"", r.source, r.label);
            println!(
                "  Pattern: {} ({})",
                r.matched.pattern.dimmed(),
                r.matched.kind
            );
        }
        None => {
            println!("  {}", "No topic detected in any label.".red());
        }
    }
}

/// Display the catalog in match order.
pub fn display_catalog(catalog: &Catalog) {
    println!(
        "\n{}",
        format!("=== Topic Catalog ({} topics, first match wins) ===", catalog.len()).bold()
    );
    println!();

    for (i, signature) in catalog.signatures().iter().enumerate() {
        println!("  {:>3}. {}", i + 1, signature.name.bold());
        println!("       Patterns: {}", signature.patterns.join(", ").dimmed());
    }
    println!();
}

/// Display a user's per-topic performance.
pub fn display_performance(user_id: &str, rows: &[TopicPerformance]) {
    if rows.is_empty() {
        println!("No performance recorded for {user_id} yet.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Topic Performance for {user_id} ({} topics) ===", rows.len()).bold()
    );
    println!();

    println!(
        "  {:<48} {:>6} {:>8} {:>9}  {:<7}",
        "Topic".dimmed(),
        "Total".dimmed(),
        "Correct".dimmed(),
        "Accuracy".dimmed(),
        "Band".dimmed(),
    );
    println!("  {}", "-".repeat(84).dimmed());

    for row in rows {
        let band = AccuracyBand::from_accuracy(row.accuracy);
        println!(
            "  {:<48} {:>6} {:>8} {:>8.2}%  {}",
            super::truncate_chars(&row.topic, 45),
            row.total_questions,
            row.correct_answers,
            row.accuracy,
            colorize_band(band),
        );
    }

    let total: u64 = rows.iter().map(|r| r.total_questions).sum();
    let correct: u64 = rows.iter().map(|r| r.correct_answers).sum();
    println!();
    println!(
        "  Overall: {correct}/{total} correct ({:.2}%)",
        crate::db::models::accuracy_percent(correct, total)
    );
}

/// Display the most common labels that matched no topic.
pub fn display_unmatched(labels: &[UnmatchedLabel]) {
    if labels.is_empty() {
        println!("No unmatched labels recorded.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Unmatched Labels ({}) ===", labels.len()).bold()
    );
    println!();
    for label in labels {
        println!(
            "  {:>5}x  {:<60} {}",
            label.seen_count,
            super::truncate_chars(&label.label, 57),
            format!("(last {})", label.last_seen).dimmed(),
        );
    }
    println!();
}

/// Colorize an accuracy band.
fn colorize_band(band: AccuracyBand) -> colored::ColoredString {
    match band {
        AccuracyBand::Strong => band.as_str().green().bold(),
        AccuracyBand::Good => band.as_str().green(),
        AccuracyBand::Fair => band.as_str().yellow(),
        AccuracyBand::Weak => band.as_str().red(),
    }
}
