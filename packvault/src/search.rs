//! Card search with graceful degradation
//!
//! Live catalog first. If it errors, times out or is disabled, the bundled
//! dataset and the dataset mirror answer instead. Every result gets a price
//! from the pricing chain, converted to the requested currency.

use crate::catalog::CatalogClient;
use crate::config::Settings;
use crate::datasets::{search_with_mirror, DatasetMirror, LocalDataset};
use crate::error::Result;
use crate::models::Card;
use crate::pricing::{resolve_usd_price, PriceCache, PriceSource};
use chrono::Utc;
use tcg_common::{CatalogCard, Currency};

/// Which backend answered a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Catalog,
    Offline,
}

/// One page of search results
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub cards: Vec<Card>,
    pub has_more: bool,
    pub total: u64,
    pub source: ResultSource,
    /// Results priced with the synthetic estimate
    pub estimated: usize,
}

impl SearchResult {
    fn empty() -> Self {
        Self {
            cards: Vec::new(),
            has_more: false,
            total: 0,
            source: ResultSource::Catalog,
            estimated: 0,
        }
    }
}

pub struct CardSearch {
    catalog: Option<CatalogClient>,
    local: LocalDataset,
    mirror: DatasetMirror,
    prices: PriceCache,
}

impl CardSearch {
    /// `catalog: None` searches the offline datasets only
    pub fn new(
        catalog: Option<CatalogClient>,
        local: LocalDataset,
        mirror: DatasetMirror,
        prices: PriceCache,
    ) -> Self {
        Self {
            catalog,
            local,
            mirror,
            prices,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let catalog = if settings.offline {
            log::info!("Offline mode: live catalog disabled");
            None
        } else {
            Some(CatalogClient::new(
                &settings.api_base,
                settings.api_key.as_deref(),
                settings.timeout,
            )?)
        };

        let local = match settings.local_dataset {
            Some(ref path) => LocalDataset::from_file(path)?,
            None => LocalDataset::bundled()?,
        };

        let mirror = DatasetMirror::new(&settings.mirror_base, settings.timeout)?;
        let prices = PriceCache::load(&settings.price_cache_path());

        Ok(Self::new(catalog, local, mirror, prices))
    }

    pub fn prices(&self) -> &PriceCache {
        &self.prices
    }

    /// Search by card name; `page` is 1-based
    pub async fn search(
        &mut self,
        query: &str,
        currency: Currency,
        page: u32,
        page_size: u32,
    ) -> SearchResult {
        let clean = query.trim();
        if clean.is_empty() {
            return SearchResult::empty();
        }
        let page = page.max(1);
        let page_size = page_size.max(1);

        let (found, total, source) = match self.search_catalog(clean, page, page_size).await {
            Some((found, total)) => (found, total, ResultSource::Catalog),
            None => {
                let (found, total) = self.search_offline(clean, page, page_size).await;
                (found, total, ResultSource::Offline)
            }
        };

        let now = Utc::now();
        let mut estimated = 0;
        let cards: Vec<Card> = found
            .iter()
            .map(|c| {
                let resolved = resolve_usd_price(c, &mut self.prices);
                if resolved.source == PriceSource::Synthetic {
                    estimated += 1;
                }
                Card::from_catalog(c, currency.price_from_usd(resolved.usd), now)
            })
            .collect();

        if let Err(e) = self.prices.save() {
            log::warn!("Failed to save price cache: {}", e);
        }

        let has_more = u64::from(page) * u64::from(page_size) < total;
        SearchResult {
            cards,
            has_more,
            total,
            source,
            estimated,
        }
    }

    async fn search_catalog(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Option<(Vec<CatalogCard>, u64)> {
        let catalog = self.catalog.as_ref()?;
        match catalog.search(query, page, page_size).await {
            Ok(matches) => Some((matches.cards, matches.total)),
            Err(e) => {
                log::warn!("Catalog unavailable, using offline datasets: {}", e);
                None
            }
        }
    }

    /// Page through the offline datasets
    ///
    /// Fetches one page beyond the requested one so `total` can signal that
    /// more results exist.
    async fn search_offline(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> (Vec<CatalogCard>, u64) {
        let page_size = page_size as usize;
        let end = page as usize * page_size;

        let hits = search_with_mirror(&self.local, &self.mirror, query, end + page_size).await;
        let total = hits.len() as u64;
        let found = hits.into_iter().skip(end - page_size).take(page_size).collect();
        (found, total)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
