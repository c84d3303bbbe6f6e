use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::HikeLite;
use crate::catalog::GearCatalog;
use crate::categories::CategoryRegistry;
use crate::constants::config::{APP_DIR, DATA_DIR_ENV, DATA_FILENAME};
use crate::pack::PackSelection;
use crate::types::{GearItem, PackedItem};
use crate::units::WeightUnit;

/// On-disk shape of the gear data file
/// Every collection is optional so a partial or older file still loads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(default)]
    pub inventory: Vec<GearItem>,
    #[serde(default)]
    pub packing_list: Vec<PackedItem>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl SavedState {
    pub fn capture(app: &HikeLite) -> Self {
        Self {
            inventory: app.catalog().items().to_vec(),
            packing_list: app.pack().entries().to_vec(),
            categories: app.categories().registered().to_vec(),
        }
    }

    pub fn into_app(self, unit: WeightUnit) -> HikeLite {
        HikeLite::new(
            GearCatalog::new(self.inventory),
            PackSelection::new(self.packing_list),
            CategoryRegistry::new(self.categories),
            unit,
        )
    }
}

/// Location of the gear data file
#[derive(Debug, Clone)]
pub struct DataStore {
    path: PathBuf,
}

impl DataStore {
    /// Resolve the data dir: explicit override > HIKELITE_DATA_DIR > platform data dir
    pub fn locate(data_dir: Option<PathBuf>) -> Self {
        let dir = data_dir
            .or_else(|| env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| {
                let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
                path.push(APP_DIR);
                path
            });
        Self::at(dir.join(DATA_FILENAME))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First run (no file) yields empty collections
    pub fn load(&self) -> Result<SavedState> {
        if !self.path.exists() {
            info!(
                path = %self.path.display(),
                "No gear data found, starting with empty collections"
            );
            return Ok(SavedState::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read gear data from {}", self.path.display()))?;
        let state: SavedState = serde_json::from_str(&contents)
            .with_context(|| {
                format!(
                    "Failed to parse gear data from {} (file left untouched)",
                    self.path.display()
                )
            })?;
        info!(
            inventory = state.inventory.len(),
            packing_list = state.packing_list.len(),
            categories = state.categories.len(),
            "Loaded gear data"
        );
        Ok(state)
    }

    pub fn save(&self, app: &HikeLite) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(&SavedState::capture(app))
            .context("Failed to serialize gear data to JSON")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write gear data to {}", self.path.display()))?;
        info!(path = %self.path.display(), "Saved gear data");
        Ok(())
    }
}
