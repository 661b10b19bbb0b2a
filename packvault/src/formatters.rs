//! Plain-text rendering for the command line

use crate::models::{AppState, Binder, Card, Trade};
use crate::search::{ResultSource, SearchResult};
use std::fmt::Write;
use tcg_common::Currency;

/// "12.50 CAD"
pub fn format_money(amount: f64, currency: Currency) -> String {
    format!("{:.2} {}", amount, currency)
}

/// "+12.50 CAD" / "-3.00 CAD"
pub fn format_profit(amount: f64, currency: Currency) -> String {
    let sign = if amount >= 0.0 { "+" } else { "-" };
    format!("{}{:.2} {}", sign, amount.abs(), currency)
}

fn card_line(card: &Card, currency: Currency) -> String {
    let mut line = card.label();
    if !card.rarity.is_empty() {
        let _ = write!(line, " [{}]", card.rarity);
    }
    let _ = write!(line, " {} - {}", card.condition, format_money(card.price, currency));
    line
}

/// Numbered result list; numbers are what `--pick` refers to
pub fn format_search_results(result: &SearchResult, currency: Currency, page: u32) -> String {
    let mut output = String::new();

    if result.cards.is_empty() {
        output.push_str("No results found\n");
        return output;
    }

    if result.source == ResultSource::Offline {
        output.push_str("(catalog unavailable - showing offline results)\n");
    }

    for (i, card) in result.cards.iter().enumerate() {
        let _ = writeln!(output, "{:>3}. {}  <{}>", i + 1, card_line(card, currency), card.id);
    }

    let _ = writeln!(output, "\nPage {} - {} total matches", page, result.total);
    if result.estimated > 0 {
        let _ = writeln!(
            output,
            "{} price(s) are estimates (no market data available)",
            result.estimated
        );
    }
    if result.has_more {
        let _ = writeln!(output, "More results: --page {}", page + 1);
    }
    output
}

pub fn format_collection(state: &AppState) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Collection: {} cards, total value {}",
        state.collection.len(),
        format_money(state.total_value(), state.currency)
    );

    if state.collection.is_empty() {
        output.push_str("Your collection is empty. Try `packvault search <name>`.\n");
        return output;
    }

    for card in &state.collection {
        let _ = writeln!(output, "  {}  {}", card.id, card_line(card, state.currency));
    }
    output
}

fn binder_header(state: &AppState, binder: &Binder) -> String {
    let mut header = format!(
        "{} ({}) - {} cards, {}",
        binder.name,
        binder.id,
        state.binder_cards(binder).len(),
        format_money(state.binder_value(binder), state.currency)
    );
    if let Some((min, max)) = binder.price_range() {
        let _ = write!(header, ", auto-files {:.2}-{:.2}", min, max);
    }
    header
}

pub fn format_binder_list(state: &AppState) -> String {
    if state.binders.is_empty() {
        return "No binders yet. Create one with `packvault binder create` or `binder auto`.\n"
            .to_string();
    }
    let mut output = String::new();
    for binder in &state.binders {
        let _ = writeln!(output, "{}", binder_header(state, binder));
    }
    output
}

pub fn format_binder(state: &AppState, binder: &Binder) -> String {
    let mut output = binder_header(state, binder);
    output.push('\n');

    let cards = state.binder_cards(binder);
    if cards.is_empty() {
        output.push_str("  No cards in binder\n");
    }
    for card in cards {
        let _ = writeln!(output, "  {}  {}", card.id, card_line(card, state.currency));
    }

    let available = state.available_cards(binder).len();
    if available == 0 {
        output.push_str("All cards already in binder\n");
    } else {
        let _ = writeln!(output, "{} collection card(s) not in this binder", available);
    }
    output
}

fn trade_summary(state: &AppState, trade: &Trade) -> String {
    format!(
        "{}  {} {}  out: {} card(s)  in: {} card(s)  {}",
        trade.id,
        trade.date.with_timezone(&chrono::Local).format("%H:%M"),
        trade.partner_label(),
        state.given_cards(trade).len(),
        trade.received_cards.len(),
        format_profit(state.net_profit(trade), trade.currency)
    )
}

/// Trades grouped by day, newest first as stored
pub fn format_trade_list(state: &AppState) -> String {
    if state.trades.is_empty() {
        return "No trades recorded yet.\n".to_string();
    }

    let mut output = String::new();
    for (day, trades) in state.trades_by_day() {
        let _ = writeln!(output, "{}", day.format("%Y-%m-%d"));
        for trade in trades {
            let _ = writeln!(output, "  {}", trade_summary(state, trade));
        }
    }
    let _ = writeln!(
        output,
        "\nOverall: {}",
        format_profit(state.total_trade_profit(), state.currency)
    );
    output
}

pub fn format_trade(state: &AppState, trade: &Trade) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Trade with {} on {}",
        trade.partner_label(),
        trade.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(
        output,
        "Net: {}",
        format_profit(state.net_profit(trade), trade.currency)
    );

    output.push_str("Out:\n");
    for card in state.given_cards(trade) {
        let _ = writeln!(output, "  {}", card_line(card, trade.currency));
    }
    if trade.cash_given > 0.0 {
        let _ = writeln!(output, "  cash {}", format_money(trade.cash_given, trade.currency));
    }

    output.push_str("In:\n");
    for card in &trade.received_cards {
        let _ = writeln!(output, "  {}", card_line(card, trade.currency));
    }
    if trade.cash_received > 0.0 {
        let _ = writeln!(
            output,
            "  cash {}",
            format_money(trade.cash_received, trade.currency)
        );
    }

    if !trade.notes.is_empty() {
        let _ = writeln!(output, "Notes: {}", trade.notes);
    }
    output
}
