//! Tests for the offline datasets and the mirror top-up.

use std::time::Duration;

use tcg_common::CatalogCard;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{rank_name_match, search_with_mirror, DatasetMirror, LocalDataset};

fn card(id: &str, name: &str) -> CatalogCard {
    CatalogCard {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

fn ids(cards: &[CatalogCard]) -> Vec<&str> {
    cards.iter().map(|c| c.id.as_str()).collect()
}

fn mirror(server: &MockServer, sets: &[&str]) -> DatasetMirror {
    DatasetMirror::new(&server.uri(), Duration::from_secs(5))
        .unwrap()
        .with_set_files(sets.iter().copied())
}

// ── ranking ──────────────────────────────────────────────────────────

#[test]
fn test_prefix_beats_substring() {
    assert_eq!(rank_name_match("charizard", "char"), 0);
    assert_eq!(rank_name_match("dark charizard", "char"), 15);
    assert_eq!(rank_name_match("pikachu", "char"), 9999);
}

#[test]
fn test_local_search_orders_by_rank_then_dataset_order() {
    let dataset = LocalDataset::from_cards(vec![
        card("a", "Dark Charizard"),
        card("b", "Charmander"),
        card("c", "Pikachu"),
        card("d", "Charizard"),
    ]);

    let results = dataset.search("  CHAR ", 50);
    assert_eq!(ids(&results), vec!["b", "d", "a"]);
}

#[test]
fn test_local_search_respects_limit_and_blank_query() {
    let dataset = LocalDataset::from_cards(vec![card("a", "Pikachu"), card("b", "Pikachu V")]);
    assert_eq!(dataset.search("pika", 1).len(), 1);
    assert!(dataset.search("   ", 10).is_empty());
}

#[test]
fn test_bundled_dataset_parses() {
    let dataset = LocalDataset::bundled().unwrap();
    assert!(!dataset.is_empty());
    let results = dataset.search("charizard", 50);
    assert!(results.iter().all(|c| c.name.to_lowercase().contains("charizard")));
    assert_eq!(results[0].name, "Charizard");
}

#[test]
fn test_dataset_file_replaces_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("cards.json");
    std::fs::write(&file, r#"[{"id": "x-1", "name": "Eevee"}]"#).unwrap();

    let dataset = LocalDataset::from_file(&file).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.search("eev", 5)[0].id, "x-1");
}

// ── mirror ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_mirror_skips_failed_and_non_array_sets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/base1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "base1-58", "name": "Pikachu" },
            { "id": "base1-4", "name": "Charizard" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/base2.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/base3.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "oops": true })))
        .mount(&server)
        .await;

    let mirror = mirror(&server, &["base1", "base2", "base3"]);
    assert_eq!(mirror.cards().await.len(), 2);
}

#[tokio::test]
async fn test_mirror_downloads_once_per_process() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sv1.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "id": "sv1-81", "name": "Miraidon ex" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mirror = mirror(&server, &["sv1"]);
    assert_eq!(mirror.search("miraidon", 10).await.len(), 1);
    assert_eq!(mirror.search("mirai", 10).await.len(), 1);
}

#[tokio::test]
async fn test_enough_local_hits_skip_the_mirror() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let local = LocalDataset::from_cards(vec![card("a", "Pikachu"), card("b", "Pikachu V")]);
    let mirror = mirror(&server, &["base1"]);

    // limit 2 -> threshold is min(10, 2)
    let results = search_with_mirror(&local, &mirror, "pikachu", 2).await;
    assert_eq!(ids(&results), vec!["a", "b"]);
}

#[tokio::test]
async fn test_thin_local_results_merge_with_mirror_without_duplicates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/base1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "base1-58", "name": "Pikachu" },
            { "name": "Pikachu without id" },
            { "id": "base1-99", "name": "Flying Pikachu" }
        ])))
        .mount(&server)
        .await;

    let local = LocalDataset::from_cards(vec![card("base1-58", "Pikachu")]);
    let mirror = mirror(&server, &["base1"]);

    let results = search_with_mirror(&local, &mirror, "pikachu", 50).await;
    assert_eq!(ids(&results), vec!["base1-58", "base1-99"]);
}

#[tokio::test]
async fn test_merged_results_stop_at_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/base1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "m-1", "name": "Eevee" },
            { "id": "m-2", "name": "Eevee" },
            { "id": "m-3", "name": "Eevee" }
        ])))
        .mount(&server)
        .await;

    let local = LocalDataset::from_cards(vec![card("l-1", "Eevee")]);
    let mirror = mirror(&server, &["base1"]);

    let results = search_with_mirror(&local, &mirror, "eevee", 3).await;
    assert_eq!(ids(&results), vec!["l-1", "m-1", "m-2"]);
}
