use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::topics::catalog::Catalog;
use crate::topics::matcher::TopicMatcher;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// JSON topic catalog replacing the built-in one (QUIZBRIDGE_CATALOG)
    pub catalog_path: Option<PathBuf>,
    /// Run the fuzzy second pass when no pattern matches verbatim
    pub fuzzy: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; an unset catalog path means the built-in
    /// catalog is used.
    pub fn load() -> Result<Self> {
        let fuzzy = match env::var("QUIZBRIDGE_FUZZY") {
            Ok(v) => parse_flag(&v)?,
            Err(_) => false,
        };

        Ok(Self {
            db_path: env::var("QUIZBRIDGE_DB_PATH")
                .unwrap_or_else(|_| "./quizbridge.db".to_string()),
            catalog_path: env::var("QUIZBRIDGE_CATALOG")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            fuzzy,
        })
    }

    /// Load the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => {
                let catalog = Catalog::load(path)?;
                info!(
                    path = %path.display(),
                    topics = catalog.len(),
                    "Loaded topic catalog"
                );
                Ok(catalog)
            }
            None => Ok(Catalog::builtin()),
        }
    }

    /// Build the topic matcher from the configured catalog.
    /// `force_fuzzy` turns the fuzzy pass on regardless of QUIZBRIDGE_FUZZY.
    pub fn matcher(&self, force_fuzzy: bool) -> Result<TopicMatcher> {
        let catalog = Arc::new(self.load_catalog()?);
        Ok(TopicMatcher::new(catalog).with_fuzzy(self.fuzzy || force_fuzzy))
    }
}

/// Parse a boolean env flag. Accepts 1/0, true/false, yes/no, on/off.
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!(
            "QUIZBRIDGE_FUZZY must be true or false, got '{other}'.\n\
             Check your .env file."
        ),
    }
}
