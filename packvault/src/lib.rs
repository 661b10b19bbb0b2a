//! PackVault - Pokemon TCG collection tracker
//!
//! Searches the card catalog (with offline fallbacks when the API is down),
//! keeps a local collection organised into binders, and records trades with
//! their profit or loss. Everything is stored in one local JSON snapshot.

pub mod binders;
pub mod catalog;
pub mod cli;
pub mod collection;
pub mod config;
pub mod datasets;
pub mod error;
pub mod export;
pub mod formatters;
pub mod models;
pub mod pricing;
pub mod search;
pub mod store;
pub mod trades;

pub use catalog::CatalogClient;
pub use config::Settings;
pub use datasets::{DatasetMirror, LocalDataset};
pub use error::{Error, Result, VaultError};
pub use models::{AppState, Binder, Card, Trade};
pub use pricing::PriceCache;
pub use search::{CardSearch, SearchResult};
pub use store::{load_state, save_state};
pub use trades::TradeDraft;
