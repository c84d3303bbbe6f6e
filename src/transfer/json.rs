//! JSON array import/export

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::{Result, TransferError};
use crate::types::{GearItem, PackedItem};

/// Parse a JSON array of records; any other top-level value is rejected
pub fn parse_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(TransferError::NotAnArray);
    }
    Ok(serde_json::from_value(value)?)
}

pub fn read_inventory(path: &Path) -> Result<Vec<GearItem>> {
    let text = fs::read_to_string(path)?;
    let items: Vec<GearItem> = parse_array(&text)?;
    debug!(path = %path.display(), count = items.len(), "Parsed inventory JSON");
    Ok(items)
}

pub fn read_packing_list(path: &Path) -> Result<Vec<PackedItem>> {
    let text = fs::read_to_string(path)?;
    let items: Vec<PackedItem> = parse_array(&text)?;
    debug!(path = %path.display(), count = items.len(), "Parsed packing list JSON");
    Ok(items)
}

/// Write records as a pretty-printed JSON array
pub fn write_array<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let text = serde_json::to_string_pretty(items)?;
    fs::write(path, text)?;
    info!(path = %path.display(), count = items.len(), "Exported JSON");
    Ok(())
}
