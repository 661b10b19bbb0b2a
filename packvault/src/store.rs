//! Snapshot persistence
//!
//! The whole application state lives in one JSON document. There is no
//! partial write or history; every save replaces the file.

use crate::error::Result;
use crate::models::AppState;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Load the snapshot, falling back to an empty USD state
///
/// A missing file is normal on first run. An unreadable file is logged and
/// treated the same way. A file that does not parse is moved to
/// [`backup_path`] first, so the next save cannot overwrite it.
pub fn load_state(path: &Path) -> AppState {
    if !path.exists() {
        log::info!("No saved collection at {}, starting fresh", path.display());
        return AppState::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::error!("Failed to read {}: {}", path.display(), e);
            return AppState::default();
        }
    };

    match parse_state(&content) {
        Ok(state) => {
            log::debug!(
                "Loaded {} cards, {} binders, {} trades",
                state.collection.len(),
                state.binders.len(),
                state.trades.len()
            );
            state
        }
        Err(e) => {
            log::error!("Failed to parse {}, starting fresh: {}", path.display(), e);
            let backup = backup_path(path);
            match std::fs::rename(path, &backup) {
                Ok(()) => log::warn!("Unreadable snapshot kept at {}", backup.display()),
                Err(e) => log::error!("Failed to back up {}: {}", path.display(), e),
            }
            AppState::default()
        }
    }
}

/// Where an unparseable snapshot is set aside, e.g. `state.json.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

/// Parse a snapshot document, applying the trade backfill first
pub fn parse_state(content: &str) -> Result<AppState> {
    let mut value: Value = serde_json::from_str(content)?;

    let migrated = backfill_given_cards(&mut value);
    if migrated > 0 {
        log::info!("Backfilled givenCards on {} older trades", migrated);
    }

    Ok(serde_json::from_value(value)?)
}

/// Give older trades an empty `givenCards` list
///
/// Trades saved before card snapshots were kept only carry `givenCardIds`.
/// Returns the number of trades touched.
pub fn backfill_given_cards(state: &mut Value) -> usize {
    let Some(trades) = state.get_mut("trades").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut count = 0;
    for trade in trades.iter_mut().filter_map(Value::as_object_mut) {
        let missing = trade.get("givenCards").map_or(true, Value::is_null);
        if missing && trade.contains_key("givenCardIds") {
            trade.insert("givenCards".to_string(), Value::Array(Vec::new()));
            count += 1;
        }
    }
    count
}

/// Write the snapshot, creating parent directories as needed
pub fn save_state(path: &Path, state: &AppState) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(state)?;
    std::fs::write(path, content)?;

    log::debug!("Saved collection snapshot to {}", path.display());
    Ok(())
}
