use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tcg_common::{CatalogCard, Condition, Currency};
use uuid::Uuid;

/// A card held in (or found for) the collection
///
/// `price` is in the collection's current currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub set: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rarity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_updated: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition: Condition,
}

/// Read `null` the same as an absent field
///
/// Snapshots written by older builds may hold `null` for values that were
/// never filled in.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Card {
    /// Build a search result from a catalog record and its resolved price
    pub fn from_catalog(card: &CatalogCard, price: f64, now: DateTime<Utc>) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            set: card.set_name().to_string(),
            number: card.number.clone().unwrap_or_default(),
            rarity: card.rarity.clone().unwrap_or_default(),
            price: if price.is_finite() { price } else { 0.0 },
            image_url: card.image_url().unwrap_or_default().to_string(),
            last_updated: now,
            condition: Condition::NM,
        }
    }

    /// "Name (Set #Number)"
    pub fn label(&self) -> String {
        match (self.set.is_empty(), self.number.is_empty()) {
            (true, _) => self.name.clone(),
            (false, true) => format!("{} ({})", self.name, self.set),
            (false, false) => format!("{} ({} #{})", self.name, self.set, self.number),
        }
    }
}

/// A named grouping of collection cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binder {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub card_ids: Vec<String>,
    #[serde(default = "default_binder_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

pub(crate) fn default_binder_color() -> String {
    "blue".to_string()
}

impl Binder {
    /// Price range, only when both bounds are set
    pub fn price_range(&self) -> Option<(f64, f64)> {
        Some((self.min_price?, self.max_price?))
    }

    /// True if a card at `price` belongs here by range
    pub fn accepts_price(&self, price: f64) -> bool {
        self.price_range()
            .map(|(min, max)| price >= min && price <= max)
            .unwrap_or(false)
    }
}

/// A completed swap with a trading partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub given_card_ids: Vec<String>,
    /// Snapshot of the cards that left the collection
    #[serde(default, deserialize_with = "null_as_default")]
    pub given_cards: Vec<Card>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub received_cards: Vec<Card>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cash_given: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cash_received: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub partner_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: Currency,
}

impl Trade {
    pub fn partner_label(&self) -> &str {
        if self.partner_name.trim().is_empty() {
            "Show Guest"
        } else {
            &self.partner_name
        }
    }
}

/// Everything the tracker persists, saved as a single snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub collection: Vec<Card>,
    #[serde(default)]
    pub binders: Vec<Binder>,
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub currency: Currency,
}

/// Fresh identifier with a readable prefix, e.g. `card-3f2a...`
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
