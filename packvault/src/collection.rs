//! Collection (inventory) operations

use crate::error::{Result, VaultError};
use crate::models::{new_id, AppState, Card};
use tcg_common::Currency;

impl AppState {
    /// Look up a collection card by id
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.collection.iter().find(|c| c.id == id)
    }

    /// Add a found card to the collection, optionally filing it in a binder
    ///
    /// The card gets a fresh collection id so the same printing can be owned
    /// more than once.
    pub fn add_card(&mut self, found: Card, binder_id: Option<&str>) -> Result<&Card> {
        let binder_index = match binder_id {
            Some(id) => Some(
                self.binders
                    .iter()
                    .position(|b| b.id == id)
                    .ok_or_else(|| VaultError::binder_not_found(id))?,
            ),
            None => None,
        };

        let card = Card {
            id: new_id("card"),
            ..found
        };
        log::info!("Adding {} to collection as {}", card.name, card.id);

        if let Some(index) = binder_index {
            self.binders[index].card_ids.push(card.id.clone());
        }
        self.collection.insert(0, card);
        Ok(&self.collection[0])
    }

    /// Remove a card from the collection and from every binder
    pub fn remove_card(&mut self, id: &str) -> Result<Card> {
        let index = self
            .collection
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| VaultError::card_not_found(id))?;

        let removed = self.collection.remove(index);
        for binder in &mut self.binders {
            binder.card_ids.retain(|cid| cid != id);
        }

        log::info!("Removed {} ({}) from collection", removed.name, removed.id);
        Ok(removed)
    }

    /// Sum of all card prices, in the collection currency
    pub fn total_value(&self) -> f64 {
        self.collection.iter().map(|c| c.price).sum()
    }

    /// Switch display currency, converting stored prices and trade cash
    ///
    /// Card prices convert from the collection currency; trade cash converts
    /// from each trade's own currency.
    pub fn change_currency(&mut self, to: Currency) {
        let from = self.currency;

        for card in &mut self.collection {
            card.price = from.convert(card.price, to);
        }

        for trade in &mut self.trades {
            trade.cash_given = trade.currency.convert(trade.cash_given, to);
            trade.cash_received = trade.currency.convert(trade.cash_received, to);
            trade.currency = to;
        }

        self.currency = to;
        log::info!("Currency changed from {} to {}", from, to);
    }
}
