//! Price resolution for catalog cards
//!
//! Order of preference:
//! 1. a live price block on the record (tcgplayer, then cardmarket)
//! 2. the last known live price from the on-disk price cache
//! 3. a deterministic synthetic estimate, so nothing shows as zero
//!
//! All prices here are USD; conversion happens at the edges.

use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tcg_common::CatalogCard;

/// Where a resolved price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Live,
    Cached,
    Synthetic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPrice {
    pub usd: f64,
    pub source: PriceSource,
}

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|p| *p > 0.0)
}

/// Pick the best live USD price from a card's vendor blocks
///
/// Across tcgplayer finishes: first positive `market`, else first positive
/// `mid`, else first positive `low`. Falls back to cardmarket's
/// `averageSellPrice`.
pub fn best_usd_price(card: &CatalogCard) -> Option<f64> {
    for field in ["market", "mid", "low"] {
        let found = card
            .tcgplayer_finishes()
            .find_map(|finish| positive(finish.get(field).and_then(Value::as_f64)));
        if found.is_some() {
            return found;
        }
    }

    positive(card.cardmarket_price("averageSellPrice"))
}

/// Deterministic placeholder price derived from card id and rarity
pub fn synthetic_usd_price(id: &str, rarity: &str) -> f64 {
    let hash = id
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)));

    let rarity = rarity.to_lowercase();
    // "common" also matches "Uncommon", so uncommons share the common base
    let mut base = if rarity.contains("common") {
        0.25
    } else if rarity.contains("rare") {
        1.5
    } else {
        0.25
    };
    if rarity.contains("ultra") {
        base = 6.0;
    }
    if rarity.contains("secret") {
        base = 12.0;
    }

    let spread = f64::from(hash % 800) / 100.0;
    let price = (base + spread).max(0.1);
    (price * 100.0).round() / 100.0
}

/// Last known live USD prices, keyed by catalog card id
///
/// Persisted as a flat JSON object next to the collection snapshot.
#[derive(Debug, Default)]
pub struct PriceCache {
    path: Option<PathBuf>,
    prices: HashMap<String, f64>,
    dirty: bool,
}

impl PriceCache {
    /// Cache that never touches disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from disk; a missing or unreadable file gives an empty cache
    pub fn load(path: &Path) -> Self {
        let mut cache = Self {
            path: Some(path.to_path_buf()),
            ..Self::default()
        };

        if !path.exists() {
            log::debug!("No price cache at {}, starting empty", path.display());
            return cache;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<serde_json::Map<String, Value>>(&content) {
                Ok(map) => {
                    cache.prices = map
                        .into_iter()
                        .filter_map(|(id, v)| positive(v.as_f64()).map(|p| (id, p)))
                        .collect();
                    log::info!("Loaded price cache with {} entries", cache.prices.len());
                }
                Err(e) => {
                    log::warn!("Failed to parse price cache, starting fresh: {}", e);
                }
            },
            Err(e) => {
                log::warn!("Failed to read price cache, starting fresh: {}", e);
            }
        }
        cache
    }

    /// Cached price for a card, if a positive one is known
    pub fn get(&self, card_id: &str) -> Option<f64> {
        positive(self.prices.get(card_id).copied())
    }

    /// Remember a live price; non-positive prices and blank ids are ignored
    pub fn record(&mut self, card_id: &str, usd: f64) {
        if card_id.is_empty() || usd.is_nan() || usd <= 0.0 {
            return;
        }
        if self.prices.get(card_id) != Some(&usd) {
            self.prices.insert(card_id.to_string(), usd);
            self.dirty = true;
        }
    }

    /// Write to disk if anything changed since load
    pub fn save(&mut self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(&self.prices)?;
        std::fs::write(path, content)?;

        self.dirty = false;
        log::debug!("Saved price cache with {} entries", self.prices.len());
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Resolve a USD price for a catalog card, refreshing the cache on live hits
pub fn resolve_usd_price(card: &CatalogCard, cache: &mut PriceCache) -> ResolvedPrice {
    if let Some(usd) = best_usd_price(card) {
        cache.record(&card.id, usd);
        return ResolvedPrice {
            usd,
            source: PriceSource::Live,
        };
    }

    if let Some(usd) = cache.get(&card.id) {
        log::debug!("Price cache hit for {}", card.id);
        return ResolvedPrice {
            usd,
            source: PriceSource::Cached,
        };
    }

    ResolvedPrice {
        usd: synthetic_usd_price(&card.id, card.rarity.as_deref().unwrap_or("")),
        source: PriceSource::Synthetic,
    }
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
