use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display currencies supported by the collection tracker
///
/// Catalog prices arrive in USD; everything stored locally is kept in the
/// currency the user selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "CAD")]
    Cad,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    /// Returns the ISO 4217 code (e.g., "USD")
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Approximate units of this currency per 1 USD
    pub fn usd_rate(&self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Cad => 1.35,
            Currency::Eur => 0.92,
            Currency::Gbp => 0.79,
        }
    }

    /// Returns all supported currencies
    pub fn all() -> &'static [Currency] {
        &[Currency::Usd, Currency::Cad, Currency::Eur, Currency::Gbp]
    }

    /// Convert a USD amount into this currency
    pub fn price_from_usd(&self, price_usd: f64) -> f64 {
        if *self == Currency::Usd || price_usd == 0.0 {
            return price_usd;
        }
        price_usd * self.usd_rate()
    }

    /// Convert an amount held in `self` into `target`, going through USD
    pub fn convert(&self, price: f64, target: Currency) -> f64 {
        if *self == target || price == 0.0 {
            return price;
        }
        let usd = price / self.usd_rate();
        target.price_from_usd(usd)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "CAD" => Ok(Currency::Cad),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            _ => Err(ParseError::Currency(s.to_string())),
        }
    }
}
