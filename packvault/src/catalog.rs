//! Pokemon TCG API client for card search
//!
//! Uses async reqwest with a request timeout so a stalled API falls through
//! to the offline datasets quickly.

use crate::error::{Result, VaultError};
use std::time::Duration;
use tcg_common::{CatalogCard, CatalogPage};

/// Public pokemontcg.io endpoint
pub const DEFAULT_API_BASE: &str = "https://api.pokemontcg.io/v2";

pub(crate) const USER_AGENT: &str = "PackVault/1.0";

/// Newest printings first
const ORDER_BY: &str = "-set.releaseDate";

/// One page of catalog matches
#[derive(Debug)]
pub struct CatalogMatches {
    pub cards: Vec<CatalogCard>,
    pub total: u64,
}

/// Client for `GET /cards`
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CatalogClient {
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Search cards by name prefix
    pub async fn search(&self, query: &str, page: u32, page_size: u32) -> Result<CatalogMatches> {
        let q = build_query(query);
        let url = format!("{}/cards", self.base_url);

        log::debug!("Querying catalog: q={} page={} pageSize={}", q, page, page_size);

        let mut request = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("q", q),
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
                ("orderBy", ORDER_BY.to_string()),
            ]);

        if let Some(ref key) = self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            return Err(VaultError::HttpStatus { status, body });
        }

        let body = response.text().await?;
        let page: CatalogPage = serde_json::from_str(&body)?;
        let total = page.total_count.unwrap_or(page.data.len() as u64);

        Ok(CatalogMatches {
            cards: page.data,
            total,
        })
    }
}

/// Build the catalog `q` parameter for a user query
///
/// Single words become a name prefix search (`name:charizard*`); phrases are
/// quoted (`name:"pikachu v"*`).
pub fn build_query(user_query: &str) -> String {
    let q = user_query.trim();
    if q.is_empty() {
        return String::new();
    }
    if q.contains(' ') {
        format!("name:\"{}\"*", q)
    } else {
        format!("name:{}*", q)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
