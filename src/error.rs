//! Error types for catalog, pack and category operations

use thiserror::Error;

/// Recoverable domain errors; every variant leaves state unchanged
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GearError {
    #[error("Please enter a category name")]
    EmptyCategoryName,

    #[error("Category already exists")]
    DuplicateCategory(String),

    /// Category still referenced by catalog items
    #[error("Category \"{name}\" is in use by {count} item(s)")]
    CategoryInUse { name: String, count: usize },

    #[error("Category \"{0}\" not found")]
    UnknownCategory(String),

    #[error("Gear item \"{0}\" not found")]
    UnknownGear(String),

    #[error("Gear item \"{0}\" is not in the packing list")]
    NotPacked(String),

    #[error("Pack entry \"{0}\" not found")]
    UnknownEntry(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, GearError>;
