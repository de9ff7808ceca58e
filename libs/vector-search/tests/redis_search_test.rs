//! Integration tests for the Redis vector store
//!
//! These run the full command/response cycle against a Redis Stack
//! container: index creation, record writes, KNN search with and without
//! tag filters, and deletion.
//!
//! All tests are ignored by default because they need Docker:
//! `cargo test -p vector-search -- --ignored`

use std::collections::HashMap;

use test_utils::{TestSearchRedis, VectorDataBuilder};
use vector_search::redis::{index_exists, RedisVectorSearch};
use vector_search::{FieldType, IndexAlgorithm, Schema, VectorSearchError, VectorStore};

const DIM: usize = 16;

fn article_schema() -> Schema {
    Schema::new([
        ("title".to_string(), FieldType::Text),
        ("timestamp".to_string(), FieldType::Numeric),
        ("tags".to_string(), FieldType::Tag),
    ])
}

fn props(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

async fn store(redis: &TestSearchRedis, index: &str, dim: usize) -> RedisVectorSearch {
    let store = RedisVectorSearch::new(
        redis.manager(),
        index,
        article_schema(),
        IndexAlgorithm::Hnsw,
        dim,
    )
    .unwrap();
    store.create_index().await.unwrap();
    store
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_added_record_is_its_own_nearest_neighbor() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "knn_self", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("knn_self");

    let v = vectors.vector(DIM, 0);
    store
        .add("a", &v, &props(&[("title", "Matrix")]))
        .await
        .unwrap();

    let hits = store.search(1, &v, &["title"], &[]).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key, "knn_self:a");
    assert_eq!(hits[0].props["title"], "Matrix");
    // Distance to itself is zero, modulo float noise
    assert!(hits[0].score.parse::<f32>().unwrap() < 1e-3);
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_results_ordered_nearest_first() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "knn_order", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("knn_order");

    let query = vectors.vector(DIM, 0);
    let near: Vec<f32> = query.iter().map(|x| x + 0.001).collect();
    let far: Vec<f32> = query.iter().map(|x| x + 10.0).collect();

    store.add("far", &far, &props(&[])).await.unwrap();
    store.add("near", &near, &props(&[])).await.unwrap();

    let hits = store.search(2, &query, &[], &[]).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].key, "knn_order:near");
    assert_eq!(hits[1].key, "knn_order:far");
    assert!(
        hits[0].score.parse::<f32>().unwrap() <= hits[1].score.parse::<f32>().unwrap()
    );
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_tag_filter_selects_only_overlapping_records() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "tags_overlap", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("tags_overlap");

    store
        .add(
            "a",
            &vectors.vector(DIM, 0),
            &props(&[("title", "Matrix"), ("tags", "blue;green")]),
        )
        .await
        .unwrap();
    store
        .add(
            "b",
            &vectors.vector(DIM, 1),
            &props(&[("title", "Matrix 2"), ("tags", "black;pink")]),
        )
        .await
        .unwrap();

    let hits = store
        .search(5, &vectors.vector(DIM, 2), &["title"], &["pink"])
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key, "tags_overlap:b");
    assert_eq!(hits[0].props["title"], "Matrix 2");
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_disjoint_tag_filter_returns_empty() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "tags_disjoint", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("tags_disjoint");

    store
        .add(
            "a",
            &vectors.vector(DIM, 0),
            &props(&[("tags", "blue;green")]),
        )
        .await
        .unwrap();

    let hits = store
        .search(5, &vectors.vector(DIM, 1), &[], &["purple"])
        .await
        .unwrap();

    assert!(hits.is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_tag_filter_is_a_disjunction() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "tags_or", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("tags_or");

    store
        .add("a", &vectors.vector(DIM, 0), &props(&[("tags", "blue")]))
        .await
        .unwrap();
    store
        .add("b", &vectors.vector(DIM, 1), &props(&[("tags", "pink")]))
        .await
        .unwrap();
    store
        .add("c", &vectors.vector(DIM, 2), &props(&[("tags", "grey")]))
        .await
        .unwrap();

    let hits = store
        .search(5, &vectors.vector(DIM, 3), &[], &["blue", "pink"])
        .await
        .unwrap();

    let mut keys: Vec<&str> = hits.iter().map(|h| h.key.as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["tags_or:a", "tags_or:b"]);
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_unfiltered_search_sees_all_records() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "unfiltered", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("unfiltered");

    store
        .add("a", &vectors.vector(DIM, 0), &props(&[("tags", "blue;green")]))
        .await
        .unwrap();
    store
        .add("b", &vectors.vector(DIM, 1), &props(&[("tags", "black;pink")]))
        .await
        .unwrap();

    let hits = store
        .search(5, &vectors.vector(DIM, 2), &[], &[])
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_missing_return_fields_are_omitted() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "projection", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("projection");

    let v = vectors.vector(DIM, 0);
    store
        .add("a", &v, &props(&[("title", "Matrix")]))
        .await
        .unwrap();

    let hits = store
        .search(1, &v, &["title", "director"], &[])
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].props["title"], "Matrix");
    assert!(!hits[0].props.contains_key("director"));
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_deleted_record_disappears_from_results() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "delete", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("delete");

    let v = vectors.vector(DIM, 0);
    store.add("a", &v, &props(&[])).await.unwrap();

    let hits = store.search(1, &v, &[], &[]).await.unwrap();
    assert_eq!(hits.len(), 1);

    store.delete("a").await.unwrap();

    let hits = store.search(1, &v, &[], &[]).await.unwrap();
    assert!(hits.iter().all(|h| h.key != "delete:a"));
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_delete_is_idempotent() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "delete_twice", DIM).await;

    // Never stored at all
    store.delete("ghost").await.unwrap();
    store.delete("ghost").await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_add_merges_fields_per_hash_semantics() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "merge", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("merge");

    let v = vectors.vector(DIM, 0);
    store
        .add("a", &v, &props(&[("title", "Matrix"), ("tags", "blue")]))
        .await
        .unwrap();
    // Second write touches only the title; tags remain
    store
        .add("a", &v, &props(&[("title", "Matrix Reloaded")]))
        .await
        .unwrap();

    let hits = store.search(1, &v, &["title", "tags"], &[]).await.unwrap();
    assert_eq!(hits[0].props["title"], "Matrix Reloaded");
    assert_eq!(hits[0].props["tags"], "blue");
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_recreating_an_index_surfaces_the_store_error() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "duplicate", DIM).await;

    let err = store.create_index().await.unwrap_err();
    assert!(matches!(err, VectorSearchError::Redis(_)));
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_index_exists_probe() {
    let redis = TestSearchRedis::new().await;
    let mut conn = redis.manager();

    assert!(!index_exists(&mut conn, "probe").await.unwrap());
    store(&redis, "probe", DIM).await;
    assert!(index_exists(&mut conn, "probe").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_dimension_mismatch_fails_before_any_write() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "dim_check", DIM).await;

    let short = vec![0.5f32; DIM - 1];
    let err = store.add("a", &short, &props(&[])).await.unwrap_err();
    assert!(matches!(
        err,
        VectorSearchError::DimensionMismatch { expected, actual }
            if expected == DIM && actual == DIM - 1
    ));

    let err = store.search(1, &short, &[], &[]).await.unwrap_err();
    assert!(matches!(err, VectorSearchError::DimensionMismatch { .. }));
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_zero_k_is_rejected_locally() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "zero_k", DIM).await;
    let vectors = VectorDataBuilder::from_test_name("zero_k");

    let err = store
        .search(0, &vectors.vector(DIM, 0), &[], &[])
        .await
        .unwrap_err();
    assert!(matches!(err, VectorSearchError::Query(_)));
}

#[tokio::test]
#[ignore] // Requires Docker (Redis Stack)
async fn test_full_scenario_dim_768_hnsw() {
    let redis = TestSearchRedis::new().await;
    let store = store(&redis, "scenario", 768).await;
    let vectors = VectorDataBuilder::from_test_name("scenario");

    store
        .add(
            "a",
            &vectors.vector(768, 0),
            &props(&[
                ("title", "Matrix"),
                ("timestamp", "1700000000"),
                ("tags", "blue;green"),
            ]),
        )
        .await
        .unwrap();
    store
        .add(
            "b",
            &vectors.vector(768, 1),
            &props(&[
                ("title", "Matrix 2"),
                ("timestamp", "1700000001"),
                ("tags", "black;pink"),
            ]),
        )
        .await
        .unwrap();

    // Tag filter ["pink"]: only "b"
    let hits = store
        .search(5, &vectors.vector(768, 2), &["title", "timestamp"], &["pink"])
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key, "scenario:b");
    assert_eq!(hits[0].props["title"], "Matrix 2");

    // No filter: both candidates, nearest first
    let hits = store
        .search(5, &vectors.vector(768, 2), &["title"], &[])
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);
    let scores: Vec<f32> = hits
        .iter()
        .map(|h| h.score.parse::<f32>().unwrap())
        .collect();
    assert!(scores[0] <= scores[1]);
}
