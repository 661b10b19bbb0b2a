//! Catalog card records
//!
//! The live pokemontcg.io API and the open-source dataset mirror share one
//! card shape; only the live API reliably fills in the pricing blocks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Card record as served by the catalog API or a dataset file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCard {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub set: Option<SetInfo>,
    #[serde(default)]
    pub images: Option<CardImages>,
    #[serde(default)]
    pub tcgplayer: Option<PriceBlock>,
    #[serde(default)]
    pub cardmarket: Option<PriceBlock>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CardImages {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Vendor pricing block
///
/// For tcgplayer `prices` maps a finish ("holofoil", "normal", ...) to an
/// object of `low`/`mid`/`high`/`market` numbers. For cardmarket it is a flat
/// object (`averageSellPrice`, `trendPrice`, ...).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PriceBlock {
    #[serde(default)]
    pub prices: Option<Map<String, Value>>,
}

impl CatalogCard {
    /// Set name, or empty when the record has none
    pub fn set_name(&self) -> &str {
        self.set
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("")
    }

    /// Preferred image: small, then large
    pub fn image_url(&self) -> Option<&str> {
        let images = self.images.as_ref()?;
        images.small.as_deref().or(images.large.as_deref())
    }

    /// Tcgplayer finish objects in the order the catalog sent them
    pub fn tcgplayer_finishes(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.tcgplayer
            .as_ref()
            .and_then(|block| block.prices.as_ref())
            .into_iter()
            .flat_map(|prices| prices.values())
            .filter_map(Value::as_object)
    }

    /// Look up a numeric field of the cardmarket price block
    pub fn cardmarket_price(&self, field: &str) -> Option<f64> {
        self.cardmarket
            .as_ref()?
            .prices
            .as_ref()?
            .get(field)?
            .as_f64()
    }
}

/// One page of `GET /cards`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    #[serde(default)]
    pub data: Vec<CatalogCard>,
    #[serde(default)]
    pub total_count: Option<u64>,
}
