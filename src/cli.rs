use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::units::WeightUnit;

#[derive(Debug, Parser)]
#[command(name = "hikelite")]
#[command(
    version,
    about = "Backpacking gear inventory and packing list manager",
    long_about = None
)]
pub struct Cli {
    /// Directory holding gear.json (defaults to $HIKELITE_DATA_DIR, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Display unit for this invocation (does not change the saved setting)
    #[arg(long, global = true, value_enum)]
    pub unit: Option<WeightUnit>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage the gear inventory
    Gear {
        #[command(subcommand)]
        command: GearCommand,
    },

    /// Manage the packing list
    Pack {
        #[command(subcommand)]
        command: PackCommand,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },

    /// Show pack statistics and the weight-sorted item list
    Stats,

    /// Set the saved display unit
    Unit {
        #[arg(value_enum)]
        unit: WeightUnit,
    },
}

#[derive(Debug, Subcommand)]
pub enum GearCommand {
    /// List inventory items (`*` marks packed gear)
    List {
        /// Case-insensitive match on name, manufacturer, product or category
        #[arg(long)]
        search: Option<String>,

        /// Exact category name
        #[arg(long)]
        category: Option<String>,
    },

    /// Add an item to the inventory
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        /// Unit weight, in the display unit
        #[arg(long)]
        weight: f64,

        #[arg(long)]
        manufacturer: Option<String>,

        #[arg(long)]
        product: Option<String>,

        #[arg(long, default_value_t = 1)]
        quantity: u32,

        #[arg(long)]
        consumable: bool,
    },

    /// Remove an item from the inventory (packed copies stay in the packing list)
    Remove { id: String },

    /// Remove every inventory item (also clears the packing list)
    Clear {
        #[arg(long, short)]
        yes: bool,
    },

    /// Replace the inventory with a JSON export
    Import { file: PathBuf },

    /// Append items from a CSV file
    ImportCsv { file: PathBuf },

    /// Export the inventory as JSON
    Export { file: Option<PathBuf> },
}

#[derive(Debug, Subcommand)]
pub enum PackCommand {
    /// Show the packing list grouped by category with the weight summary
    Show,

    /// Pack an inventory item
    Add { gear_id: String },

    /// Remove one pack entry
    Remove { entry_id: String },

    /// Remove every pack entry copied from an inventory item
    Unpack { gear_id: String },

    /// Change an entry's quantity by a signed delta (never below 1)
    Quantity {
        entry_id: String,

        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },

    /// Toggle the worn flag
    Worn { entry_id: String },

    /// Toggle the shared flag
    Shared { entry_id: String },

    /// Remove every pack entry
    Clear {
        #[arg(long, short)]
        yes: bool,
    },

    /// Replace the packing list with a JSON export
    Import { file: PathBuf },

    /// Export the packing list as JSON
    Export { file: Option<PathBuf> },

    /// Write the printable packing list summary
    Report { file: Option<PathBuf> },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// List categories with item counts
    List,

    /// Create an empty category
    Add { name: String },

    /// Delete an unused category
    Delete {
        name: String,

        #[arg(long, short)]
        yes: bool,
    },
}
