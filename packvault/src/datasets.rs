//! Offline card datasets used when the catalog API is unavailable
//!
//! Two sources, tried in order:
//! - a small bundled dataset (or a user-supplied replacement file)
//! - a handful of set files from the open-source pokemon-tcg-data repo,
//!   served through the jsDelivr CDN

use crate::catalog::USER_AGENT;
use crate::error::Result;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tcg_common::CatalogCard;
use tokio::sync::OnceCell;

const BUNDLED_CARDS: &str = include_str!("../data/cards-mini.json");

/// jsDelivr mirror of github.com/PokemonTCG/pokemon-tcg-data (English cards)
pub const DEFAULT_MIRROR_BASE: &str =
    "https://cdn.jsdelivr.net/gh/PokemonTCG/pokemon-tcg-data@master/cards/en";

/// Set files pulled from the mirror: classic, Sword & Shield, Scarlet & Violet
pub const MIRROR_SET_FILES: &[&str] = &[
    "base1", "base2", "base3", "base4", "swsh1", "swsh4", "swsh7", "swsh11", "sv1", "sv3",
];

/// Local results at or above this count skip the mirror
const LOCAL_ENOUGH: usize = 10;

/// Rank a lowercase name against a lowercase query (lower is better)
///
/// Prefix matches rank 0, other substring matches rank `10 + position`.
pub fn rank_name_match(name: &str, q: &str) -> usize {
    if name.starts_with(q) {
        return 0;
    }
    match name.find(q) {
        Some(idx) => 10 + name[..idx].encode_utf16().count(),
        None => 9999,
    }
}

/// Filter cards whose name contains `query`, best matches first
fn rank_by_name<'a, I>(cards: I, query: &str, limit: usize) -> Vec<CatalogCard>
where
    I: IntoIterator<Item = &'a CatalogCard>,
{
    let mut matches: Vec<(usize, &CatalogCard)> = cards
        .into_iter()
        .filter_map(|card| {
            let name = card.name.to_lowercase();
            if name.contains(query) {
                Some((rank_name_match(&name, query), card))
            } else {
                None
            }
        })
        .collect();

    // Stable: equal ranks keep dataset order
    matches.sort_by_key(|(rank, _)| *rank);

    matches
        .into_iter()
        .take(limit)
        .map(|(_, card)| card.clone())
        .collect()
}

/// Static card dataset, parsed once
#[derive(Debug, Default)]
pub struct LocalDataset {
    cards: Vec<CatalogCard>,
}

impl LocalDataset {
    /// The dataset compiled into the binary
    pub fn bundled() -> Result<Self> {
        let cards: Vec<CatalogCard> = serde_json::from_str(BUNDLED_CARDS)?;
        log::debug!("Loaded bundled dataset with {} cards", cards.len());
        Ok(Self { cards })
    }

    /// Load a replacement dataset (JSON array of catalog cards)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cards: Vec<CatalogCard> = serde_json::from_str(&content)?;
        log::info!(
            "Loaded local dataset from {} ({} cards)",
            path.display(),
            cards.len()
        );
        Ok(Self { cards })
    }

    pub fn from_cards(cards: Vec<CatalogCard>) -> Self {
        Self { cards }
    }

    /// Case-insensitive name search, prefix matches first
    pub fn search(&self, query: &str, limit: usize) -> Vec<CatalogCard> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        rank_by_name(&self.cards, &q, limit)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Remote dataset mirror, downloaded once per process on first use
pub struct DatasetMirror {
    http: reqwest::Client,
    base_url: String,
    set_files: Vec<String>,
    cards: OnceCell<Vec<CatalogCard>>,
}

impl DatasetMirror {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            set_files: MIRROR_SET_FILES.iter().map(|s| s.to_string()).collect(),
            cards: OnceCell::new(),
        })
    }

    /// Replace the list of set files to download
    pub fn with_set_files<I, S>(mut self, set_files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_files = set_files.into_iter().map(Into::into).collect();
        self
    }

    /// All mirrored cards, fetching the set files on first call
    pub async fn cards(&self) -> &[CatalogCard] {
        self.cards.get_or_init(|| self.fetch_all()).await
    }

    async fn fetch_all(&self) -> Vec<CatalogCard> {
        let mut all = Vec::new();
        for set_id in &self.set_files {
            match self.fetch_set(set_id).await {
                Ok(cards) => {
                    log::debug!("Mirror set {}: {} cards", set_id, cards.len());
                    all.extend(cards);
                }
                Err(e) => {
                    log::warn!("Skipping mirror set {}: {}", set_id, e);
                }
            }
        }
        log::info!(
            "Loaded {} cards from {} mirror set files",
            all.len(),
            self.set_files.len()
        );
        all
    }

    /// Fetch one set file; a non-array body yields no cards
    async fn fetch_set(&self, set_id: &str) -> Result<Vec<CatalogCard>> {
        let url = format!("{}/{}.json", self.base_url, set_id);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let value: serde_json::Value = serde_json::from_str(&body)?;
        let serde_json::Value::Array(items) = value else {
            log::warn!("Mirror set {} is not a card array", set_id);
            return Ok(Vec::new());
        };

        Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    /// Case-insensitive name search over the mirrored sets
    pub async fn search(&self, query: &str, limit: usize) -> Vec<CatalogCard> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        rank_by_name(self.cards().await, &q, limit)
    }
}

/// Search the local dataset, topping up from the mirror when it is thin
///
/// Local hits come first; mirror hits are appended, skipping entries
/// without an id and ids already present, up to `limit`.
pub async fn search_with_mirror(
    local: &LocalDataset,
    mirror: &DatasetMirror,
    query: &str,
    limit: usize,
) -> Vec<CatalogCard> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let local_hits = local.search(query, limit);
    if local_hits.len() >= LOCAL_ENOUGH.min(limit) {
        log::debug!("Local dataset satisfied query with {} cards", local_hits.len());
        return local_hits;
    }

    let mirror_hits = mirror.search(query, limit).await;

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for card in local_hits.into_iter().chain(mirror_hits) {
        if card.id.is_empty() || !seen.insert(card.id.clone()) {
            continue;
        }
        merged.push(card);
        if merged.len() >= limit {
            break;
        }
    }
    merged
}

#[cfg(test)]
#[path = "datasets_tests.rs"]
mod tests;
