use std::collections::HashMap;

use async_trait::async_trait;
use redis::Value;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use super::command;
use crate::error::{VectorSearchError, VectorSearchResult};
use crate::models::{IndexAlgorithm, Schema, SearchHit};
use crate::store::VectorStore;

/// Redis (RediSearch) implementation of [`VectorStore`]
///
/// Owns a typed [`ConnectionManager`]; index name, schema, algorithm and
/// dimensionality are fixed at construction. Records live under the
/// `<index>:` key prefix, with the vector blob in hash field `v`.
#[derive(Clone)]
pub struct RedisVectorSearch {
    conn: ConnectionManager,
    index: String,
    schema: Schema,
    algorithm: IndexAlgorithm,
    dim: usize,
}

impl RedisVectorSearch {
    /// Create a client over an established connection
    ///
    /// Fails fast, before any network call, if `dim` is zero. The schema
    /// is already normalized by [`Schema::new`].
    pub fn new(
        conn: ConnectionManager,
        index: impl Into<String>,
        schema: Schema,
        algorithm: IndexAlgorithm,
        dim: usize,
    ) -> VectorSearchResult<Self> {
        if dim == 0 {
            return Err(VectorSearchError::Config(
                "index dimensionality must be positive".to_string(),
            ));
        }

        Ok(Self {
            conn,
            index: index.into(),
            schema,
            algorithm,
            dim,
        })
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn algorithm(&self) -> IndexAlgorithm {
        self.algorithm
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn check_dim(&self, vector: &[f32]) -> VectorSearchResult<()> {
        if vector.len() != self.dim {
            return Err(VectorSearchError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for RedisVectorSearch {
    async fn create_index(&self) -> VectorSearchResult<()> {
        let mut cmd = redis::cmd("FT.CREATE");
        for arg in command::create_index_args(&self.index, &self.schema, self.algorithm, self.dim)
        {
            cmd.arg(arg);
        }

        let mut conn = self.conn.clone();
        cmd.query_async::<()>(&mut conn).await?;

        info!(
            index = %self.index,
            algorithm = %self.algorithm,
            dim = self.dim,
            "Created vector index"
        );
        Ok(())
    }

    async fn add(
        &self,
        key: &str,
        vector: &[f32],
        properties: &HashMap<String, String>,
    ) -> VectorSearchResult<()> {
        self.check_dim(vector)?;

        let mut cmd = redis::cmd("HSET");
        cmd.arg(command::record_key(&self.index, key))
            .arg(command::VECTOR_FIELD)
            .arg(command::encode_vector(vector));

        // Sorted property order keeps the command deterministic
        let mut names: Vec<&String> = properties.keys().collect();
        names.sort();
        for name in names {
            cmd.arg(name).arg(&properties[name]);
        }

        let mut conn = self.conn.clone();
        cmd.query_async::<()>(&mut conn).await?;

        debug!(index = %self.index, key, "Stored vector record");
        Ok(())
    }

    async fn search(
        &self,
        k: usize,
        vector: &[f32],
        return_fields: &[&str],
        tags: &[&str],
    ) -> VectorSearchResult<Vec<SearchHit>> {
        if k == 0 {
            return Err(VectorSearchError::Query(
                "neighbor count k must be positive".to_string(),
            ));
        }
        self.check_dim(vector)?;

        let query = command::knn_query(k, tags);
        let mut cmd = redis::cmd("FT.SEARCH");
        cmd.arg(&self.index)
            .arg(&query)
            .arg("PARAMS")
            .arg(2)
            .arg(command::QUERY_VECTOR_PARAM)
            .arg(command::encode_vector(vector))
            .arg("DIALECT")
            .arg(2);

        let mut conn = self.conn.clone();
        let reply: Value = cmd.query_async(&mut conn).await?;
        let hits = parse_search_reply(&reply, return_fields)?;

        debug!(index = %self.index, query = %query, hits = hits.len(), "Vector search completed");
        Ok(hits)
    }

    async fn delete(&self, key: &str) -> VectorSearchResult<()> {
        let mut conn = self.conn.clone();
        // DEL of an absent key returns 0, which is still success
        redis::cmd("DEL")
            .arg(command::record_key(&self.index, key))
            .query_async::<()>(&mut conn)
            .await?;

        debug!(index = %self.index, key, "Deleted vector record");
        Ok(())
    }
}

/// Decode an `FT.SEARCH` reply into hits
///
/// The reply is an array: a total-count header (ignored), then alternating
/// (key, field-array) pairs. The distance comes from the reserved
/// `__v_score` field; `return_fields` are projected into the hit's property
/// map, silently omitting fields the record lacks. Any other reply shape is
/// an explicit decode error, never an empty result.
fn parse_search_reply(reply: &Value, return_fields: &[&str]) -> VectorSearchResult<Vec<SearchHit>> {
    let items = match reply {
        Value::Array(items) => items,
        other => {
            return Err(VectorSearchError::Decode(format!(
                "expected array reply, got {other:?}"
            )));
        }
    };

    let mut iter = items.iter();
    match iter.next() {
        Some(Value::Int(_)) => {}
        Some(other) => {
            return Err(VectorSearchError::Decode(format!(
                "expected integer result count, got {other:?}"
            )));
        }
        None => {
            return Err(VectorSearchError::Decode(
                "reply is missing the result count header".to_string(),
            ));
        }
    }

    let mut hits = Vec::new();
    while let Some(key_value) = iter.next() {
        let key = decode_string(key_value)?;
        let fields = iter.next().ok_or_else(|| {
            VectorSearchError::Decode(format!("record '{key}' has no field list"))
        })?;
        let props = decode_field_map(fields)?;

        let score = props.get(command::SCORE_FIELD).cloned().ok_or_else(|| {
            VectorSearchError::Decode(format!(
                "record '{key}' is missing the {} field",
                command::SCORE_FIELD
            ))
        })?;

        let props = return_fields
            .iter()
            .filter_map(|field| {
                props
                    .get(*field)
                    .map(|value| (field.to_string(), value.clone()))
            })
            .collect();

        hits.push(SearchHit { key, score, props });
    }

    Ok(hits)
}

fn decode_string(value: &Value) -> VectorSearchResult<String> {
    match value {
        Value::BulkString(bytes) => String::from_utf8(bytes.clone()).map_err(|e| {
            VectorSearchError::Decode(format!("string field is not valid UTF-8: {e}"))
        }),
        Value::SimpleString(s) => Ok(s.clone()),
        other => Err(VectorSearchError::Decode(format!(
            "expected string value, got {other:?}"
        ))),
    }
}

fn decode_field_map(value: &Value) -> VectorSearchResult<HashMap<String, String>> {
    match value {
        Value::Array(pairs) => {
            if pairs.len() % 2 != 0 {
                return Err(VectorSearchError::Decode(
                    "field list has an odd number of entries".to_string(),
                ));
            }
            pairs
                .chunks_exact(2)
                .map(|pair| Ok((decode_string(&pair[0])?, decode_string(&pair[1])?)))
                .collect()
        }
        // RESP3 replies carry the fields as a map
        Value::Map(entries) => entries
            .iter()
            .map(|(name, value)| Ok((decode_string(name)?, decode_string(value)?)))
            .collect(),
        other => Err(VectorSearchError::Decode(format!(
            "expected field list, got {other:?}"
        ))),
    }
}
