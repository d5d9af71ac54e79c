// Topic matcher: first-match substring classification against a catalog.
//
// The label is normalized, then each signature is checked in catalog order.
// A signature matches when any of its patterns occurs anywhere in the
// normalized label; the first matching signature wins. There is no word
// boundary or length check, so "UNION EUROPEA" matches inside
// "LA UNION EUROPEA Y SUS INSTITUCIONES", and a short pattern can also match
// inside an unrelated word. Catalog order is the only tie-break.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::catalog::Catalog;
use super::fuzzy;
use super::normalize::{normalize, words};
use super::traits::TopicClassifier;

/// How a topic was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    /// A pattern occurred verbatim in the normalized label
    Substring,
    /// Most of a pattern's words were found within one edit each
    Fuzzy,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Substring => "substring",
            MatchKind::Fuzzy => "fuzzy",
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A successful classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicMatch {
    /// Canonical topic name from the catalog
    pub topic: String,
    /// The normalized pattern that matched
    pub pattern: String,
    pub kind: MatchKind,
}

/// Catalog-driven topic matcher.
#[derive(Debug, Clone)]
pub struct TopicMatcher {
    catalog: Arc<Catalog>,
    fuzzy: bool,
}

impl TopicMatcher {
    /// Exact (substring-only) matcher over the given catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            fuzzy: false,
        }
    }

    /// Enable or disable the fuzzy second pass.
    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Canonical topic name for a label, or `None` when nothing matches.
    pub fn extract_topic(&self, label: &str) -> Option<String> {
        self.classify(label).map(|m| m.topic)
    }

    fn substring_pass(&self, normalized: &str) -> Option<TopicMatch> {
        self.catalog.signatures().iter().find_map(|signature| {
            signature
                .patterns
                .iter()
                .find(|pattern| normalized.contains(pattern.as_str()))
                .map(|pattern| TopicMatch {
                    topic: signature.name.clone(),
                    pattern: pattern.clone(),
                    kind: MatchKind::Substring,
                })
        })
    }

    fn fuzzy_pass(&self, normalized: &str) -> Option<TopicMatch> {
        let label_words = words(normalized);
        self.catalog.signatures().iter().find_map(|signature| {
            signature
                .patterns
                .iter()
                .find(|pattern| fuzzy::pattern_matches(&label_words, pattern))
                .map(|pattern| TopicMatch {
                    topic: signature.name.clone(),
                    pattern: pattern.clone(),
                    kind: MatchKind::Fuzzy,
                })
        })
    }
}

impl TopicClassifier for TopicMatcher {
    fn classify(&self, label: &str) -> Option<TopicMatch> {
        let normalized = normalize(label);
        if normalized.is_empty() {
            return None;
        }

        let found = self.substring_pass(&normalized).or_else(|| {
            if self.fuzzy {
                self.fuzzy_pass(&normalized)
            } else {
                None
            }
        });

        match &found {
            Some(m) => debug!(
                label,
                topic = %m.topic,
                pattern = %m.pattern,
                kind = %m.kind,
                "Topic detected"
            ),
            None => debug!(label, "No topic detected"),
        }

        found
    }
}
