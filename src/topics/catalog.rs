// Topic catalog: the ordered list of known topics and their signatures.
//
// A catalog is built once (from the built-in table or a JSON file) and then
// handed to the matcher as an immutable value. Order is significant: the
// matcher returns the first signature with a hit, so specific signatures
// must come before general ones.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::normalize::normalize;

/// A canonical topic name plus the patterns that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSignature {
    /// Canonical topic name, used as the aggregation key downstream
    pub name: String,
    /// Patterns in normalized form (uppercase, unaccented)
    pub patterns: Vec<String>,
}

impl TopicSignature {
    /// Build a signature, normalizing every pattern.
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(|p| normalize(p)).collect(),
        }
    }
}

/// On-disk shape of a catalog file.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    topics: Vec<TopicSignature>,
}

/// An ordered, validated sequence of topic signatures.
#[derive(Debug, Clone)]
pub struct Catalog {
    signatures: Vec<TopicSignature>,
}

impl Catalog {
    /// Build a catalog from signatures, normalizing names and patterns and
    /// validating. The normalized name is the canonical topic key.
    ///
    /// Fails when a signature has no patterns, a pattern normalizes to an
    /// empty string, or two canonical names collide.
    pub fn new(signatures: Vec<TopicSignature>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut validated = Vec::with_capacity(signatures.len());

        for signature in signatures {
            let key = normalize(&signature.name);
            if key.is_empty() {
                anyhow::bail!("Catalog contains a topic with an empty name");
            }
            if !seen.insert(key.clone()) {
                anyhow::bail!("Duplicate topic in catalog: {}", signature.name);
            }
            if signature.patterns.is_empty() {
                anyhow::bail!("Topic '{}' has no patterns", signature.name);
            }

            let patterns: Vec<String> = signature.patterns.iter().map(|p| normalize(p)).collect();
            if patterns.iter().any(|p| p.is_empty()) {
                anyhow::bail!("Topic '{}' has an empty pattern", signature.name);
            }

            validated.push(TopicSignature {
                name: key,
                patterns,
            });
        }

        Ok(Self {
            signatures: validated,
        })
    }

    /// Parse a catalog from its JSON form:
    /// `{"topics": [{"name": "...", "patterns": ["..."]}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).context("Failed to parse topic catalog JSON")?;
        Self::new(file.topics)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read topic catalog at {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid topic catalog at {}", path.display()))
    }

    /// Serialize the catalog back to the file format.
    pub fn to_json(&self) -> Result<String> {
        let file = CatalogFile {
            topics: self.signatures.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// The built-in exam topic catalog.
    ///
    /// Multi-word signatures that share a prefix with a broader one are
    /// listed first (e.g. the Armada and FAS organization topics ahead of
    /// the generic FAS organization topic).
    pub fn builtin() -> Self {
        Self::from_table(BUILTIN_TOPICS)
    }

    /// Build a catalog from a static (name, patterns) table.
    ///
    /// Tables are checked by tests rather than at runtime, so this does not
    /// re-validate.
    pub(crate) fn from_table(table: &[(&str, &[&str])]) -> Self {
        Self {
            signatures: table
                .iter()
                .map(|(name, patterns)| TopicSignature::new(*name, patterns))
                .collect(),
        }
    }

    pub fn signatures(&self) -> &[TopicSignature] {
        &self.signatures
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Look up a signature by canonical name (compared in normalized form).
    pub fn get(&self, name: &str) -> Option<&TopicSignature> {
        let key = normalize(name);
        self.signatures.iter().find(|s| normalize(&s.name) == key)
    }
}

const BUILTIN_TOPICS: &[(&str, &[&str])] = &[
    (
        "ORGANIZACION DEL TRATADO DEL ATLANTICO NORTE (OTAN)",
        &[
            "ORGANIZACION DEL TRATADO DEL ATLANTICO NORTE",
            "TRATADO ATLANTICO NORTE",
            "OTAN",
        ],
    ),
    ("UNION EUROPEA", &["UNION EUROPEA"]),
    (
        "PROCEDIMIENTO ADMINISTRATIVO COMUN DE LAS ADMINISTRACIONES PUBLICAS",
        &["PROCEDIMIENTO ADMINISTRATIVO COMUN"],
    ),
    (
        "REGIMEN JURIDICO DEL SECTOR PUBLICO",
        &["REGIMEN JURIDICO DEL SECTOR PUBLICO", "REGIMEN JURIDICO"],
    ),
    (
        "IGUALDAD EFECTIVA DE MUJERES Y HOMBRES",
        &["IGUALDAD EFECTIVA"],
    ),
    (
        "REGIMEN DISCIPLINARIO DE LAS FUERZAS ARMADAS",
        &["REGIMEN DISCIPLINARIO", "DISCIPLINARIO"],
    ),
    (
        "DERECHOS Y DEBERES DE LOS MIEMBROS DE LAS FAS",
        &["DERECHOS Y DEBERES"],
    ),
    ("LEY CARRERA MILITAR", &["LEY CARRERA", "CARRERA MILITAR"]),
    (
        "MINISTERIO DE DEFENSA",
        &["MINISTERIO DE DEFENSA", "MINISTERIO DEFENSA"],
    ),
    (
        "ORGANIZACION BASICA ARMADA",
        &[
            "ORGANIZACION BASICA ARMADA",
            "ORGANIZACION BASICA DE LA ARMADA",
            "ARMADA ESPAÑOLA",
        ],
    ),
    (
        "ORGANIZACION BASICA FAS",
        &["ORGANIZACION BASICA FAS", "ORGANIZACION BASICA DE LAS FAS"],
    ),
    ("ORGANIZACION DE LAS FAS", &["ORGANIZACION DE LAS FAS"]),
    (
        "TRAMITACION INICIATIVAS Y QUEJAS",
        &["TRAMITACION INICIATIVAS Y QUEJAS", "INICIATIVAS Y QUEJAS"],
    ),
    ("OSCE", &["OSCE"]),
    (
        "ORGANIZACION DE LAS NACIONES UNIDAS",
        &["NACIONES UNIDAS", "ONU"],
    ),
    ("SEGURIDAD NACIONAL", &["SEGURIDAD NACIONAL"]),
    ("DOCTRINA", &["DOCTRINA"]),
    ("REALES ORDENANZAS", &["REALES ORDENANZAS"]),
    (
        "OBSERVATORIO MILITAR PARA LA IGUALDAD",
        &["OBSERVATORIO MILITAR"],
    ),
    ("TROPA Y MARINERIA", &["TROPA Y MARINERÍA"]),
    ("EJERCITO DE TIERRA", &["EJÉRCITO DE TIERRA"]),
    ("EJERCITO DEL AIRE", &["EJÉRCITO DEL AIRE"]),
];
