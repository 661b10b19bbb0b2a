//! Command-line interface
//!
//! Each invocation loads the snapshot, applies one command and saves it
//! again if the command changed anything.

use crate::catalog::DEFAULT_API_BASE;
use crate::config::{default_data_dir, Settings, DEFAULT_TIMEOUT_SECS};
use crate::datasets::DEFAULT_MIRROR_BASE;
use crate::error::{Result, VaultError};
use crate::export::export_collection;
use crate::formatters::{
    format_binder, format_binder_list, format_collection, format_money, format_profit,
    format_search_results, format_trade, format_trade_list,
};
use crate::models::{AppState, Card};
use crate::search::CardSearch;
use crate::store::{load_state, save_state};
use crate::trades::TradeDraft;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tcg_common::{Condition, Currency};

/// Results per page when browsing search results
const SEARCH_PAGE_SIZE: u32 = 15;

/// Results fetched when picking a card to add or receive
const PICK_PAGE_SIZE: u32 = 20;

/// Pokemon TCG collection tracker - search, binders and trade P/L
#[derive(Parser, Debug)]
#[command(name = "packvault")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory holding the collection snapshot and price cache
    #[arg(long, env = "PACKVAULT_DATA_DIR", default_value_t = default_data_dir_string())]
    pub data_dir: String,

    /// pokemontcg.io API key (optional, raises rate limits)
    #[arg(long, env = "POKEMON_TCG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Catalog API base URL
    #[arg(long, env = "PACKVAULT_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Base URL of the card dataset mirror
    #[arg(long, default_value = DEFAULT_MIRROR_BASE)]
    pub mirror_base: String,

    /// JSON card file to use instead of the bundled offline dataset
    #[arg(long)]
    pub local_dataset: Option<PathBuf>,

    /// Network timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Skip the live catalog and search offline datasets only
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

fn default_data_dir_string() -> String {
    default_data_dir().to_string_lossy().to_string()
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the card catalog
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = SEARCH_PAGE_SIZE)]
        page_size: u32,
    },
    /// Search and add one of the results to the collection
    Add {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Result number to add (as shown by `search`)
        #[arg(long, default_value_t = 1)]
        pick: usize,
        /// Also file the card in this binder
        #[arg(long)]
        binder: Option<String>,
        #[arg(long)]
        condition: Option<Condition>,
    },
    /// Remove a card from the collection and all binders
    Remove { card_id: String },
    /// Show the collection and its total value
    List,
    /// Export the collection as CSV
    Export { path: PathBuf },
    /// Manage binders
    Binder {
        #[command(subcommand)]
        action: BinderCommand,
    },
    /// Record and review trades
    Trade {
        #[command(subcommand)]
        action: TradeCommand,
    },
    /// Show or change the display currency
    Currency { code: Option<Currency> },
}

#[derive(Subcommand, Debug)]
pub enum BinderCommand {
    List,
    Show {
        binder_id: String,
    },
    /// Create a binder by hand
    Create {
        name: String,
        #[arg(long = "card")]
        cards: Vec<String>,
        #[arg(long)]
        min: Option<f64>,
        #[arg(long)]
        max: Option<f64>,
    },
    /// Create a binder from every card within a price range
    Auto {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        min: f64,
        #[arg(long, default_value_t = 10.0)]
        max: f64,
    },
    Add {
        binder_id: String,
        card_id: String,
    },
    Remove {
        binder_id: String,
        card_id: String,
    },
    Rename {
        binder_id: String,
        name: String,
    },
    Delete {
        binder_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TradeCommand {
    /// Record a completed trade
    Record {
        #[arg(long, default_value = "")]
        partner: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Collection card id to give away (repeatable)
        #[arg(long = "give")]
        give: Vec<String>,
        /// Card to receive as QUERY or QUERY#N (repeatable)
        #[arg(long = "receive")]
        receive: Vec<String>,
        #[arg(long, default_value_t = 0.0)]
        cash_given: f64,
        #[arg(long, default_value_t = 0.0)]
        cash_received: f64,
    },
    List,
    Show {
        trade_id: String,
    },
    /// Replace the notes on a trade
    Notes {
        trade_id: String,
        notes: String,
    },
}

impl Args {
    pub fn settings(&self) -> Settings {
        Settings {
            data_dir: PathBuf::from(&self.data_dir),
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            mirror_base: self.mirror_base.clone(),
            local_dataset: self.local_dataset.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            offline: self.offline,
        }
    }
}

/// Split `QUERY#N` into the query and a 1-based pick (default 1)
pub fn parse_pick(spec: &str) -> (String, usize) {
    if let Some((query, n)) = spec.rsplit_once('#') {
        if let Ok(n) = n.trim().parse::<usize>() {
            if n >= 1 {
                return (query.trim().to_string(), n);
            }
        }
    }
    (spec.trim().to_string(), 1)
}

/// Search and take the `pick`-th result (1-based)
async fn pick_card(
    search: &mut CardSearch,
    query: &str,
    pick: usize,
    currency: Currency,
) -> Result<Card> {
    if query.trim().is_empty() {
        return Err(VaultError::InvalidInput("search query is empty".to_string()));
    }
    let result = search.search(query, currency, 1, PICK_PAGE_SIZE).await;
    let count = result.cards.len();
    result
        .cards
        .into_iter()
        .nth(pick.saturating_sub(1))
        .filter(|_| pick >= 1)
        .ok_or_else(|| {
            VaultError::InvalidInput(format!(
                "no result #{} for \"{}\" ({} found)",
                pick, query, count
            ))
        })
}

/// Run one command against the stored collection
pub async fn run(args: Args) -> Result<()> {
    let settings = args.settings();
    let state_path = settings.state_path();
    let mut state = load_state(&state_path);

    let changed = execute(args.command, &mut state, &settings).await?;

    if changed {
        save_state(&state_path, &state)?;
    }
    Ok(())
}

/// Apply a command to `state`, returning whether it needs saving
pub async fn execute(command: Command, state: &mut AppState, settings: &Settings) -> Result<bool> {
    match command {
        Command::Search {
            query,
            page,
            page_size,
        } => {
            let mut search = CardSearch::from_settings(settings)?;
            let query = query.join(" ");
            let result = search.search(&query, state.currency, page, page_size).await;
            print!("{}", format_search_results(&result, state.currency, page.max(1)));
            Ok(false)
        }
        Command::Add {
            query,
            pick,
            binder,
            condition,
        } => {
            let currency = state.currency;
            let mut search = CardSearch::from_settings(settings)?;
            let mut card = pick_card(&mut search, &query.join(" "), pick, currency).await?;
            if let Some(condition) = condition {
                card.condition = condition;
            }
            let added = state.add_card(card, binder.as_deref())?;
            println!(
                "Added {} as {} ({})",
                added.label(),
                added.id,
                format_money(added.price, currency)
            );
            Ok(true)
        }
        Command::Remove { card_id } => {
            let removed = state.remove_card(&card_id)?;
            println!("Removed {}", removed.label());
            Ok(true)
        }
        Command::List => {
            print!("{}", format_collection(state));
            Ok(false)
        }
        Command::Export { path } => {
            let count = export_collection(&path, state)?;
            println!("Exported {} cards to {}", count, path.display());
            Ok(false)
        }
        Command::Binder { action } => execute_binder(action, state),
        Command::Trade { action } => execute_trade(action, state, settings).await,
        Command::Currency { code } => match code {
            Some(code) => {
                state.change_currency(code);
                println!(
                    "Currency set to {}. Collection value: {}",
                    code,
                    format_money(state.total_value(), code)
                );
                Ok(true)
            }
            None => {
                let all: Vec<&str> = Currency::all().iter().map(|c| c.code()).collect();
                println!("Currency: {} (available: {})", state.currency, all.join(", "));
                Ok(false)
            }
        },
    }
}

fn execute_binder(action: BinderCommand, state: &mut AppState) -> Result<bool> {
    match action {
        BinderCommand::List => {
            print!("{}", format_binder_list(state));
            Ok(false)
        }
        BinderCommand::Show { binder_id } => {
            let binder = state
                .binder(&binder_id)
                .ok_or_else(|| VaultError::binder_not_found(&binder_id))?;
            print!("{}", format_binder(state, binder));
            Ok(false)
        }
        BinderCommand::Create {
            name,
            cards,
            min,
            max,
        } => {
            let binder = state.create_binder(&name, cards, min, max)?;
            println!("Created binder {} ({})", binder.name, binder.id);
            Ok(true)
        }
        BinderCommand::Auto { name, min, max } => {
            let binder = state.auto_binder(name.as_deref(), min, max)?;
            println!(
                "Created binder {} ({}) with {} cards",
                binder.name,
                binder.id,
                binder.card_ids.len()
            );
            Ok(true)
        }
        BinderCommand::Add { binder_id, card_id } => {
            if state.add_to_binder(&binder_id, &card_id)? {
                println!("Added {} to {}", card_id, binder_id);
                Ok(true)
            } else {
                println!("{} is already in {}", card_id, binder_id);
                Ok(false)
            }
        }
        BinderCommand::Remove { binder_id, card_id } => {
            if state.remove_from_binder(&binder_id, &card_id)? {
                println!("Removed {} from {}", card_id, binder_id);
                Ok(true)
            } else {
                println!("{} is not in {}", card_id, binder_id);
                Ok(false)
            }
        }
        BinderCommand::Rename { binder_id, name } => {
            state.rename_binder(&binder_id, &name)?;
            println!("Renamed {}", binder_id);
            Ok(true)
        }
        BinderCommand::Delete { binder_id } => {
            let binder = state.delete_binder(&binder_id)?;
            println!("Deleted binder {}", binder.name);
            Ok(true)
        }
    }
}

async fn execute_trade(
    action: TradeCommand,
    state: &mut AppState,
    settings: &Settings,
) -> Result<bool> {
    match action {
        TradeCommand::Record {
            partner,
            notes,
            give,
            receive,
            cash_given,
            cash_received,
        } => {
            let mut receiving = Vec::with_capacity(receive.len());
            if !receive.is_empty() {
                let mut search = CardSearch::from_settings(settings)?;
                for spec in &receive {
                    let (query, pick) = parse_pick(spec);
                    receiving.push(pick_card(&mut search, &query, pick, state.currency).await?);
                }
            }

            let draft = TradeDraft {
                partner,
                notes,
                cash_given,
                cash_received,
                giving_ids: give,
                receiving,
            };
            let trade_id = state.record_trade(draft)?.id.clone();
            if let Some(trade) = state.trade(&trade_id) {
                print!("{}", format_trade(state, trade));
            }
            Ok(true)
        }
        TradeCommand::List => {
            print!("{}", format_trade_list(state));
            Ok(false)
        }
        TradeCommand::Show { trade_id } => {
            let trade = state
                .trade(&trade_id)
                .ok_or_else(|| VaultError::trade_not_found(&trade_id))?;
            print!("{}", format_trade(state, trade));
            println!(
                "Profit to date across all trades: {}",
                format_profit(state.total_trade_profit(), state.currency)
            );
            Ok(false)
        }
        TradeCommand::Notes { trade_id, notes } => {
            state.update_trade_notes(&trade_id, &notes)?;
            println!("Updated notes on {}", trade_id);
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_defaults_to_first_result() {
        assert_eq!(parse_pick("charizard ex"), ("charizard ex".to_string(), 1));
    }

    #[test]
    fn test_pick_reads_trailing_number() {
        assert_eq!(parse_pick("pikachu v#3"), ("pikachu v".to_string(), 3));
    }

    #[test]
    fn test_pick_ignores_non_numeric_suffix() {
        assert_eq!(parse_pick("card #abc"), ("card #abc".to_string(), 1));
        assert_eq!(parse_pick("card#0"), ("card#0".to_string(), 1));
    }

    #[test]
    fn test_multi_word_query_is_collected() {
        let args = Args::try_parse_from(["packvault", "search", "pikachu", "v", "--page", "2"]).unwrap();
        match args.command {
            Command::Search { query, page, page_size } => {
                assert_eq!(query.join(" "), "pikachu v");
                assert_eq!(page, 2);
                assert_eq!(page_size, SEARCH_PAGE_SIZE);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_trade_record_collects_repeated_flags() {
        let args = Args::try_parse_from([
            "packvault",
            "--offline",
            "trade",
            "record",
            "--partner",
            "Sam",
            "--give",
            "card-a",
            "--give",
            "card-b",
            "--receive",
            "umbreon vmax#2",
            "--cash-received",
            "5",
        ])
        .unwrap();

        assert!(args.offline);
        match args.command {
            Command::Trade {
                action:
                    TradeCommand::Record {
                        partner,
                        give,
                        receive,
                        cash_received,
                        cash_given,
                        ..
                    },
            } => {
                assert_eq!(partner, "Sam");
                assert_eq!(give, vec!["card-a", "card-b"]);
                assert_eq!(receive, vec!["umbreon vmax#2"]);
                assert_eq!(cash_received, 5.0);
                assert_eq!(cash_given, 0.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_currency_and_condition_codes_parse() {
        let args = Args::try_parse_from(["packvault", "currency", "eur"]).unwrap();
        assert!(matches!(args.command, Command::Currency { code: Some(Currency::Eur) }));

        let args =
            Args::try_parse_from(["packvault", "add", "charizard", "--condition", "lp"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Add { condition: Some(Condition::LP), .. }
        ));

        assert!(Args::try_parse_from(["packvault", "currency", "yen"]).is_err());
    }

    #[test]
    fn test_settings_follow_flags() {
        let args = Args::try_parse_from([
            "packvault",
            "--data-dir",
            "/tmp/vault",
            "--timeout-secs",
            "3",
            "list",
        ])
        .unwrap();
        let settings = args.settings();
        assert_eq!(settings.state_path(), PathBuf::from("/tmp/vault/state.json"));
        assert_eq!(settings.price_cache_path(), PathBuf::from("/tmp/vault/price_cache.json"));
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }
}
