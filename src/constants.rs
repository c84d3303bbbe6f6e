//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Config and data file locations
pub mod config {
    /// Directory name under the platform config/data dirs
    pub const APP_DIR: &str = "hikelite";

    /// Settings file name (inside the config dir)
    pub const FILENAME: &str = "config.json";

    /// Gear data file name (inside the data dir)
    pub const DATA_FILENAME: &str = "gear.json";

    /// Environment variable overriding the data directory
    pub const DATA_DIR_ENV: &str = "HIKELITE_DATA_DIR";

    /// Environment variable overriding the weight unit
    pub const WEIGHT_UNIT_ENV: &str = "HIKELITE_WEIGHT_UNIT";

    /// Environment variable overriding the log level
    pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
}

/// Grams per display unit
pub mod units {
    pub const GRAMS_PER_GRAM: f64 = 1.0;

    pub const GRAMS_PER_OUNCE: f64 = 28.3495;

    pub const GRAMS_PER_POUND: f64 = 453.592;
}

/// Fallback values applied to imported or incomplete records
pub mod defaults {
    /// Name used when an imported row has none
    pub const ITEM_NAME: &str = "Unknown Item";

    /// Category used when an imported row has none
    pub const CATEGORY: &str = "Miscellaneous";

    /// Quantity used when missing, unparseable or zero
    pub const QUANTITY: u32 = 1;

    /// Weight used when missing or unparseable
    pub const WEIGHT: f64 = 0.0;
}

/// Export file naming
pub mod export {
    pub const INVENTORY_PREFIX: &str = "hikelite-inventory";

    pub const PACKING_LIST_PREFIX: &str = "hikelite-packing-list";
}

/// Printable summary page geometry (millimetres on an A4 page)
pub mod report {
    pub const TITLE: &str = "HikeLite Packing List";

    /// Left margin for headings and summary lines
    pub const MARGIN_X: u16 = 20;

    /// Indent for item lines
    pub const ITEM_X: u16 = 25;

    /// Where content restarts on a fresh page
    pub const PAGE_TOP: u16 = 20;

    pub const DATE_Y: u16 = 30;

    pub const SUMMARY_HEADING_Y: u16 = 45;

    pub const SUMMARY_FIRST_LINE_Y: u16 = 55;

    pub const SUMMARY_LINE_STEP: u16 = 8;

    /// Gap between the weight summary and the packing list heading
    pub const SECTION_GAP: u16 = 15;

    pub const HEADING_STEP: u16 = 10;

    pub const CATEGORY_STEP: u16 = 8;

    pub const ITEM_STEP: u16 = 6;

    /// Gap after the last item of a category
    pub const CATEGORY_GAP: u16 = 5;

    /// A category heading below this line starts a new page
    pub const CATEGORY_BREAK_Y: u16 = 250;

    /// An item line below this line starts a new page
    pub const ITEM_BREAK_Y: u16 = 270;

    pub const TITLE_FONT_SIZE: u8 = 20;

    pub const SECTION_FONT_SIZE: u8 = 14;

    pub const CATEGORY_FONT_SIZE: u8 = 12;

    pub const BODY_FONT_SIZE: u8 = 10;
}

/// Report backend acquisition retry policy
pub mod retry {
    /// Total attempts (first try plus one retry)
    pub const MAX_ATTEMPTS: u32 = 2;

    /// Delay before the retry
    pub const BACKOFF_MS: u64 = 500;
}
