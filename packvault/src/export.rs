//! CSV export of the collection

use crate::error::Result;
use crate::models::AppState;
use serde::Serialize;
use std::io;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionRow<'a> {
    id: &'a str,
    name: &'a str,
    set: &'a str,
    number: &'a str,
    rarity: &'a str,
    condition: &'a str,
    price: String,
    currency: &'a str,
    last_updated: String,
}

const HEADER: [&str; 9] = [
    "id",
    "name",
    "set",
    "number",
    "rarity",
    "condition",
    "price",
    "currency",
    "lastUpdated",
];

/// Write the collection as CSV with a header row
///
/// The header is written even when the collection is empty.
pub fn write_collection_csv<W: io::Write>(writer: W, state: &AppState) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;

    for card in &state.collection {
        wtr.serialize(CollectionRow {
            id: &card.id,
            name: &card.name,
            set: &card.set,
            number: &card.number,
            rarity: &card.rarity,
            condition: card.condition.code(),
            price: format!("{:.2}", card.price),
            currency: state.currency.code(),
            last_updated: card.last_updated.to_rfc3339(),
        })?;
    }

    wtr.flush()?;
    Ok(state.collection.len())
}

/// Export the collection to a CSV file
pub fn export_collection(path: &Path, state: &AppState) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let count = write_collection_csv(file, state)?;
    log::info!("Exported {} cards to {}", count, path.display());
    Ok(count)
}
