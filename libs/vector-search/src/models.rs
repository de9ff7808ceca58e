use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::VectorSearchError;

/// Schema field type supported by the search index
///
/// `Tag` fields hold `;`-separated multi-value strings and support
/// exact-match filtering in queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Numeric,
    Tag,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Numeric => "NUMERIC",
            FieldType::Tag => "TAG",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = VectorSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TEXT" => Ok(FieldType::Text),
            "NUMERIC" => Ok(FieldType::Numeric),
            "TAG" => Ok(FieldType::Tag),
            other => Err(VectorSearchError::Config(format!(
                "unknown field type '{other}'"
            ))),
        }
    }
}

/// Logical index schema: field name to field type
///
/// Normalization happens once, at construction: a missing `tags` field
/// defaults to `TAG` and a missing `timestamp` field defaults to `NUMERIC`.
/// Fields iterate in name order so command construction is deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    fields: BTreeMap<String, FieldType>,
}

impl Schema {
    pub fn new(fields: impl IntoIterator<Item = (String, FieldType)>) -> Self {
        let mut fields: BTreeMap<String, FieldType> = fields.into_iter().collect();
        fields.entry("tags".to_string()).or_insert(FieldType::Tag);
        fields
            .entry("timestamp".to_string())
            .or_insert(FieldType::Numeric);
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }

    /// Fields in name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Vector index algorithm
///
/// `Flat` is exhaustive exact search; `Hnsw` is approximate, with fixed
/// construction parameters (M=40, EF_CONSTRUCTION=250, EF_RUNTIME=20,
/// EPSILON=0.8, INITIAL_CAP=10000). Both use the L2 distance metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexAlgorithm {
    Flat,
    Hnsw,
}

impl IndexAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexAlgorithm::Flat => "FLAT",
            IndexAlgorithm::Hnsw => "HNSW",
        }
    }
}

impl fmt::Display for IndexAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexAlgorithm {
    type Err = VectorSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FLAT" => Ok(IndexAlgorithm::Flat),
            "HNSW" => Ok(IndexAlgorithm::Hnsw),
            other => Err(VectorSearchError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// One search result
///
/// `score` is the string-encoded distance exactly as the store returned it;
/// it is not parsed or validated locally. `props` holds only the
/// caller-requested fields that were present on the record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchHit {
    pub key: String,
    pub score: String,
    pub props: HashMap<String, String>,
}
