//! Trade recording and profit/loss

use crate::error::{Result, VaultError};
use crate::models::{new_id, AppState, Card, Trade};
use chrono::{Local, NaiveDate, Utc};
use tcg_common::Condition;

/// A trade being assembled, before it touches the collection
#[derive(Debug, Clone, Default)]
pub struct TradeDraft {
    pub partner: String,
    pub notes: String,
    pub cash_given: f64,
    pub cash_received: f64,
    /// Collection ids leaving the collection
    pub giving_ids: Vec<String>,
    /// Cards entering the collection (typically search results)
    pub receiving: Vec<Card>,
}

impl TradeDraft {
    /// Toggle a collection card in or out of the outgoing side
    pub fn toggle_giving(&mut self, card_id: &str) {
        if let Some(pos) = self.giving_ids.iter().position(|id| id == card_id) {
            self.giving_ids.remove(pos);
        } else {
            self.giving_ids.push(card_id.to_string());
        }
    }

    fn validate(&self) -> Result<()> {
        for (label, amount) in [("cash given", self.cash_given), ("cash received", self.cash_received)] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(VaultError::InvalidInput(format!(
                    "{} must be a non-negative amount, got {}",
                    label, amount
                )));
            }
        }
        if self.giving_ids.is_empty()
            && self.receiving.is_empty()
            && self.cash_given == 0.0
            && self.cash_received == 0.0
        {
            return Err(VaultError::InvalidInput("trade has nothing on either side".to_string()));
        }
        Ok(())
    }
}

/// Sum of card prices
fn cards_value<'a, I>(cards: I) -> f64
where
    I: IntoIterator<Item = &'a Card>,
{
    cards.into_iter().map(|c| c.price).sum()
}

impl AppState {
    pub fn trade(&self, id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    /// Apply a trade to the collection and log it
    ///
    /// Given cards leave the collection and every binder; received cards
    /// join the front of the collection and any binder whose price range
    /// covers them. Nothing changes if a given id is unknown.
    pub fn record_trade(&mut self, draft: TradeDraft) -> Result<&Trade> {
        draft.validate()?;

        let mut giving_ids: Vec<String> = Vec::with_capacity(draft.giving_ids.len());
        for id in &draft.giving_ids {
            if self.card(id).is_none() {
                return Err(VaultError::card_not_found(id));
            }
            if !giving_ids.contains(id) {
                giving_ids.push(id.clone());
            }
        }

        let given_cards: Vec<Card> = self
            .collection
            .iter()
            .filter(|c| giving_ids.contains(&c.id))
            .cloned()
            .collect();

        let now = Utc::now();
        let received_cards: Vec<Card> = draft
            .receiving
            .into_iter()
            .map(|card| Card {
                id: new_id("card-recv"),
                last_updated: now,
                condition: Condition::NM,
                ..card
            })
            .collect();

        for binder in &mut self.binders {
            binder.card_ids.retain(|id| !giving_ids.contains(id));
            let matching: Vec<String> = received_cards
                .iter()
                .filter(|card| binder.accepts_price(card.price))
                .map(|card| card.id.clone())
                .collect();
            binder.card_ids.extend(matching);
        }

        self.collection.retain(|c| !giving_ids.contains(&c.id));
        self.collection.splice(0..0, received_cards.iter().cloned());

        let trade = Trade {
            id: new_id("trade"),
            date: now,
            given_card_ids: giving_ids,
            given_cards,
            received_cards,
            cash_given: draft.cash_given,
            cash_received: draft.cash_received,
            partner_name: draft.partner.trim().to_string(),
            notes: draft.notes,
            currency: self.currency,
        };

        log::info!(
            "Recorded trade {} with {}: {} out, {} in",
            trade.id,
            trade.partner_label(),
            trade.given_cards.len(),
            trade.received_cards.len()
        );
        self.trades.insert(0, trade);
        Ok(&self.trades[0])
    }

    /// Cards that left in a trade
    ///
    /// Uses the stored snapshot; trades from before snapshots were kept fall
    /// back to whatever collection cards still carry the given ids.
    pub fn given_cards<'a>(&'a self, trade: &'a Trade) -> Vec<&'a Card> {
        if !trade.given_cards.is_empty() || trade.given_card_ids.is_empty() {
            return trade.given_cards.iter().collect();
        }
        self.collection
            .iter()
            .filter(|c| trade.given_card_ids.contains(&c.id))
            .collect()
    }

    /// `(cash in - cash out) + (value in - value out)`
    pub fn net_profit(&self, trade: &Trade) -> f64 {
        let given_value = cards_value(self.given_cards(trade));
        let received_value = cards_value(&trade.received_cards);
        (trade.cash_received - trade.cash_given) + (received_value - given_value)
    }

    /// Sum of net profit over all trades
    pub fn total_trade_profit(&self) -> f64 {
        self.trades.iter().map(|t| self.net_profit(t)).sum()
    }

    pub fn update_trade_notes(&mut self, trade_id: &str, notes: &str) -> Result<()> {
        let trade = self
            .trades
            .iter_mut()
            .find(|t| t.id == trade_id)
            .ok_or_else(|| VaultError::trade_not_found(trade_id))?;
        trade.notes = notes.to_string();
        Ok(())
    }

    /// Trades grouped by local calendar day, groups in first-seen order
    pub fn trades_by_day(&self) -> Vec<(NaiveDate, Vec<&Trade>)> {
        let mut groups: Vec<(NaiveDate, Vec<&Trade>)> = Vec::new();
        for trade in &self.trades {
            let day = trade.date.with_timezone(&Local).date_naive();
            match groups.iter_mut().find(|(d, _)| *d == day) {
                Some((_, trades)) => trades.push(trade),
                None => groups.push((day, vec![trade])),
            }
        }
        groups
    }
}
