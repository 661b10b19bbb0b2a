//! Shared types for Pokemon TCG collection tooling
//!
//! Catalog records (as served by pokemontcg.io and its open dataset mirror),
//! display currencies and card condition grades.

pub mod catalog;
pub mod condition;
pub mod currency;
pub mod error;

pub use catalog::{CardImages, CatalogCard, CatalogPage, PriceBlock, SetInfo};
pub use condition::Condition;
pub use currency::Currency;
pub use error::ParseError;
