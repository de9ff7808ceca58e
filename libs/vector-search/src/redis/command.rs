//! Data-driven construction of RediSearch command arguments
//!
//! Everything here is pure: builders return argument vectors and query
//! strings so they can be tested without a connection. Assembling commands
//! from structured data (rather than ad hoc concatenation) keeps separator
//! and escaping bugs out of the tag path.

use crate::models::{FieldType, IndexAlgorithm, Schema};

/// Hash field the vector blob is stored under
pub const VECTOR_FIELD: &str = "v";

/// Reserved reply field carrying the KNN distance
pub const SCORE_FIELD: &str = "__v_score";

/// Separator for multi-value TAG fields
pub const TAG_SEPARATOR: char = ';';

/// Query parameter name binding the query vector
pub(crate) const QUERY_VECTOR_PARAM: &str = "V";

/// Records are namespaced under the index name
pub(crate) fn record_key(index: &str, key: &str) -> String {
    format!("{index}:{key}")
}

/// Encode a vector as the store's dense-float binary format
/// (little-endian f32, as RediSearch expects for TYPE FLOAT32)
pub(crate) fn encode_vector(vector: &[f32]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(vector.len() * 4);
    for value in vector {
        blob.extend_from_slice(&value.to_le_bytes());
    }
    blob
}

/// Arguments for `FT.CREATE` (command name excluded)
///
/// Emits the schema clause field by field, TAG fields with their separator,
/// then the vector-field clause for the chosen algorithm.
pub(crate) fn create_index_args(
    index: &str,
    schema: &Schema,
    algorithm: IndexAlgorithm,
    dim: usize,
) -> Vec<String> {
    let mut args: Vec<String> = vec![
        index.to_string(),
        "ON".into(),
        "HASH".into(),
        "PREFIX".into(),
        "1".into(),
        format!("{index}:"),
        "SCHEMA".into(),
    ];

    for (name, ty) in schema.fields() {
        args.push(name.to_string());
        args.push(ty.as_str().to_string());
        if ty == FieldType::Tag {
            args.push("SEPARATOR".into());
            args.push(TAG_SEPARATOR.to_string());
        }
    }

    args.push(VECTOR_FIELD.into());
    args.push("VECTOR".into());
    match algorithm {
        IndexAlgorithm::Flat => {
            for arg in ["FLAT", "6", "TYPE", "FLOAT32", "DIM"] {
                args.push(arg.into());
            }
            args.push(dim.to_string());
            for arg in ["DISTANCE_METRIC", "L2"] {
                args.push(arg.into());
            }
        }
        IndexAlgorithm::Hnsw => {
            for arg in ["HNSW", "16", "TYPE", "FLOAT32", "DIM"] {
                args.push(arg.into());
            }
            args.push(dim.to_string());
            for arg in [
                "DISTANCE_METRIC",
                "L2",
                "INITIAL_CAP",
                "10000",
                "M",
                "40",
                "EF_CONSTRUCTION",
                "250",
                "EF_RUNTIME",
                "20",
                "EPSILON",
                "0.8",
            ] {
                args.push(arg.into());
            }
        }
    }

    args
}

/// KNN query string, with or without a tag pre-filter
///
/// Tags are OR-ed: `@tags:{a | b}=>[KNN k @v $V]`. An empty tag list yields
/// the bare `[KNN k @v $V]` over the whole index.
pub(crate) fn knn_query(k: usize, tags: &[&str]) -> String {
    let knn = format!("[KNN {k} @{VECTOR_FIELD} ${QUERY_VECTOR_PARAM}]");
    if tags.is_empty() {
        return knn;
    }

    let filter = tags
        .iter()
        .map(|tag| escape_tag(tag))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("@tags:{{{filter}}}=>{knn}")
}

/// Backslash-escape query-syntax characters inside a tag token
///
/// Tag values may contain the multi-value separator or query operators
/// (`;`, `|`, `{`, spaces, ...); escaping every non-alphanumeric character
/// keeps them from being parsed as syntax.
pub(crate) fn escape_tag(tag: &str) -> String {
    let mut escaped = String::with_capacity(tag.len());
    for c in tag.chars() {
        if !c.is_alphanumeric() && c != '_' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
