//! Tests for the search fallback chain.

use std::time::Duration;

use tcg_common::{CatalogCard, Currency};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{CardSearch, ResultSource};
use crate::catalog::CatalogClient;
use crate::datasets::{DatasetMirror, LocalDataset};
use crate::pricing::PriceCache;

const TIMEOUT: Duration = Duration::from_secs(5);

fn local_card(id: &str, name: &str, rarity: &str) -> CatalogCard {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "rarity": rarity,
        "set": { "name": "Base" }
    }))
    .unwrap()
}

fn no_sets(server: &MockServer) -> DatasetMirror {
    DatasetMirror::new(&server.uri(), TIMEOUT)
        .unwrap()
        .with_set_files(Vec::<String>::new())
}

fn catalog(server: &MockServer) -> Option<CatalogClient> {
    Some(CatalogClient::new(&server.uri(), None, TIMEOUT).unwrap())
}

fn live_page() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {
                "id": "sv3-125",
                "name": "Charizard ex",
                "number": "125",
                "rarity": "Double Rare",
                "set": { "name": "Obsidian Flames" },
                "images": { "small": "https://images.pokemontcg.io/sv3/125.png" },
                "tcgplayer": { "prices": { "holofoil": { "market": 10.0 } } }
            }
        ],
        "totalCount": 37
    })
}

#[tokio::test]
async fn test_live_results_are_priced_and_converted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_page()))
        .mount(&server)
        .await;

    let mut search = CardSearch::new(
        catalog(&server),
        LocalDataset::default(),
        no_sets(&server),
        PriceCache::in_memory(),
    );

    let result = search.search("charizard", Currency::Cad, 1, 15).await;

    assert_eq!(result.source, ResultSource::Catalog);
    assert_eq!(result.total, 37);
    assert!(result.has_more);
    assert_eq!(result.estimated, 0);

    let card = &result.cards[0];
    assert_eq!(card.id, "sv3-125");
    assert_eq!(card.set, "Obsidian Flames");
    assert_eq!(card.number, "125");
    assert_eq!(card.image_url, "https://images.pokemontcg.io/sv3/125.png");
    assert!((card.price - 13.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_last_page_has_no_more() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_page()))
        .mount(&server)
        .await;

    let mut search = CardSearch::new(
        catalog(&server),
        LocalDataset::default(),
        no_sets(&server),
        PriceCache::in_memory(),
    );

    let result = search.search("charizard", Currency::Usd, 3, 15).await;
    assert!(!result.has_more);
}

#[tokio::test]
async fn test_api_outage_falls_back_to_local_dataset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(504))
        .mount(&server)
        .await;

    let local = LocalDataset::from_cards(vec![
        local_card("base1-4", "Charizard", "Rare Holo"),
        local_card("base1-58", "Pikachu", "Common"),
    ]);
    let mut search = CardSearch::new(catalog(&server), local, no_sets(&server), PriceCache::in_memory());

    let result = search.search("charizard", Currency::Usd, 1, 15).await;

    assert_eq!(result.source, ResultSource::Offline);
    assert_eq!(result.total, 1);
    assert!(!result.has_more);
    assert_eq!(result.estimated, 1);
    assert_eq!(result.cards[0].id, "base1-4");
    assert_eq!(result.cards[0].price, 1.57);
}

#[tokio::test]
async fn test_live_price_survives_a_later_outage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_page()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let local = LocalDataset::from_cards(vec![local_card("sv3-125", "Charizard ex", "Double Rare")]);
    let mut search = CardSearch::new(catalog(&server), local, no_sets(&server), PriceCache::in_memory());

    let live = search.search("charizard", Currency::Usd, 1, 15).await;
    assert_eq!(live.source, ResultSource::Catalog);
    assert_eq!(search.prices().get("sv3-125"), Some(10.0));

    let offline = search.search("charizard", Currency::Usd, 1, 15).await;
    assert_eq!(offline.source, ResultSource::Offline);
    assert_eq!(offline.estimated, 0);
    assert_eq!(offline.cards[0].price, 10.0);
}

#[tokio::test]
async fn test_offline_mode_never_calls_the_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_page()))
        .expect(0)
        .mount(&server)
        .await;

    let local = LocalDataset::from_cards(vec![local_card("base1-58", "Pikachu", "Common")]);
    let mut search = CardSearch::new(None, local, no_sets(&server), PriceCache::in_memory());

    let result = search.search("pika", Currency::Usd, 1, 15).await;
    assert_eq!(result.source, ResultSource::Offline);
    assert_eq!(result.cards.len(), 1);
}

#[tokio::test]
async fn test_blank_query_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_page()))
        .expect(0)
        .mount(&server)
        .await;

    let mut search = CardSearch::new(
        catalog(&server),
        LocalDataset::default(),
        no_sets(&server),
        PriceCache::in_memory(),
    );

    let result = search.search("   ", Currency::Usd, 1, 15).await;
    assert!(result.cards.is_empty());
    assert_eq!(result.total, 0);
    assert!(!result.has_more);
}

#[tokio::test]
async fn test_offline_results_page_through_the_datasets() {
    let server = MockServer::start().await;
    let local = LocalDataset::from_cards(
        (1..=20)
            .map(|n| local_card(&format!("x-{n}"), "Eevee", "Common"))
            .collect(),
    );
    let mut search = CardSearch::new(None, local, no_sets(&server), PriceCache::in_memory());

    let first = search.search("eevee", Currency::Usd, 1, 15).await;
    assert_eq!(first.cards.len(), 15);
    assert!(first.has_more);

    let second = search.search("eevee", Currency::Usd, 2, 15).await;
    assert_eq!(second.cards.len(), 5);
    assert_eq!(second.cards[0].id, "x-16");
    assert!(!second.has_more);
}

#[tokio::test]
async fn test_mirror_tops_up_thin_local_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/swsh7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "swsh7-215",
                "name": "Umbreon VMAX",
                "rarity": "Rare Secret",
                "set": { "name": "Evolving Skies" },
                "cardmarket": { "prices": { "averageSellPrice": 250.0 } }
            }
        ])))
        .mount(&server)
        .await;

    let mirror = DatasetMirror::new(&server.uri(), TIMEOUT)
        .unwrap()
        .with_set_files(["swsh7"]);
    let mut search = CardSearch::new(
        catalog(&server),
        LocalDataset::default(),
        mirror,
        PriceCache::in_memory(),
    );

    let result = search.search("umbreon", Currency::Usd, 1, 15).await;
    assert_eq!(result.source, ResultSource::Offline);
    assert_eq!(result.cards.len(), 1);
    assert_eq!(result.cards[0].set, "Evolving Skies");
    assert_eq!(result.cards[0].price, 250.0);
}
