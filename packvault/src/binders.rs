//! Binder operations
//!
//! Binders only hold collection card ids. Removing a binder never removes
//! cards from the collection.

use crate::error::{Result, VaultError};
use crate::models::{default_binder_color, new_id, AppState, Binder, Card};

const DEFAULT_BINDER_NAME: &str = "New Binder";

fn validate_range(min: Option<f64>, max: Option<f64>) -> Result<()> {
    for bound in [min, max].into_iter().flatten() {
        if !bound.is_finite() || bound < 0.0 {
            return Err(VaultError::InvalidInput(format!(
                "price bound must be a non-negative number, got {}",
                bound
            )));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(VaultError::InvalidInput(format!(
                "minimum price {} is above maximum {}",
                min, max
            )));
        }
    }
    Ok(())
}

impl AppState {
    pub fn binder(&self, id: &str) -> Option<&Binder> {
        self.binders.iter().find(|b| b.id == id)
    }

    fn binder_mut(&mut self, id: &str) -> Result<&mut Binder> {
        self.binders
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| VaultError::binder_not_found(id))
    }

    /// Create a binder holding `card_ids`, newest first in the binder list
    pub fn create_binder(
        &mut self,
        name: &str,
        card_ids: Vec<String>,
        min_price: Option<f64>,
        max_price: Option<f64>,
    ) -> Result<&Binder> {
        validate_range(min_price, max_price)?;

        let mut ids: Vec<String> = Vec::with_capacity(card_ids.len());
        for id in card_ids {
            if self.card(&id).is_none() {
                return Err(VaultError::card_not_found(&id));
            }
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        let name = name.trim();
        let binder = Binder {
            id: new_id("binder"),
            name: if name.is_empty() {
                DEFAULT_BINDER_NAME.to_string()
            } else {
                name.to_string()
            },
            card_ids: ids,
            color: default_binder_color(),
            min_price,
            max_price,
        };

        log::info!(
            "Created binder {} ({}) with {} cards",
            binder.name,
            binder.id,
            binder.card_ids.len()
        );
        self.binders.insert(0, binder);
        Ok(&self.binders[0])
    }

    /// Collection cards priced within `[min, max]`
    pub fn cards_in_price_range(&self, min: f64, max: f64) -> Vec<&Card> {
        self.collection
            .iter()
            .filter(|c| c.price >= min && c.price <= max)
            .collect()
    }

    /// Create a binder from every card priced within `[min, max]`
    ///
    /// The range is kept on the binder so cards received in later trades
    /// are filed automatically.
    pub fn auto_binder(&mut self, name: Option<&str>, min: f64, max: f64) -> Result<&Binder> {
        validate_range(Some(min), Some(max))?;

        let ids: Vec<String> = self
            .cards_in_price_range(min, max)
            .into_iter()
            .map(|c| c.id.clone())
            .collect();
        if ids.is_empty() {
            return Err(VaultError::InvalidInput(format!(
                "no cards in the collection are priced between {} and {}",
                min, max
            )));
        }

        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("{}-{} Binder", min, max),
        };
        self.create_binder(&name, ids, Some(min), Some(max))
    }

    /// File a collection card in a binder; returns false if already there
    pub fn add_to_binder(&mut self, binder_id: &str, card_id: &str) -> Result<bool> {
        if self.card(card_id).is_none() {
            return Err(VaultError::card_not_found(card_id));
        }
        let binder = self.binder_mut(binder_id)?;
        if binder.card_ids.iter().any(|id| id == card_id) {
            return Ok(false);
        }
        binder.card_ids.push(card_id.to_string());
        Ok(true)
    }

    /// Take a card out of a binder; returns false if it was not there
    pub fn remove_from_binder(&mut self, binder_id: &str, card_id: &str) -> Result<bool> {
        let binder = self.binder_mut(binder_id)?;
        let before = binder.card_ids.len();
        binder.card_ids.retain(|id| id != card_id);
        Ok(binder.card_ids.len() != before)
    }

    pub fn rename_binder(&mut self, binder_id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VaultError::InvalidInput("binder name cannot be empty".to_string()));
        }
        self.binder_mut(binder_id)?.name = name.to_string();
        Ok(())
    }

    pub fn delete_binder(&mut self, binder_id: &str) -> Result<Binder> {
        let index = self
            .binders
            .iter()
            .position(|b| b.id == binder_id)
            .ok_or_else(|| VaultError::binder_not_found(binder_id))?;
        let binder = self.binders.remove(index);
        log::info!("Deleted binder {} ({})", binder.name, binder.id);
        Ok(binder)
    }

    /// Cards filed in a binder, skipping ids no longer in the collection
    pub fn binder_cards(&self, binder: &Binder) -> Vec<&Card> {
        binder
            .card_ids
            .iter()
            .filter_map(|id| self.card(id))
            .collect()
    }

    /// Collection cards not yet in a binder
    pub fn available_cards(&self, binder: &Binder) -> Vec<&Card> {
        self.collection
            .iter()
            .filter(|c| !binder.card_ids.contains(&c.id))
            .collect()
    }

    pub fn binder_value(&self, binder: &Binder) -> f64 {
        self.binder_cards(binder).iter().map(|c| c.price).sum()
    }
}
