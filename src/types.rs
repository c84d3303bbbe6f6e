//! Gear data model
//!
//! `GearItem` is a catalog template; `PackedItem` is an independent copy of
//! one taken when the item is added to the pack. Both serialize to the same
//! flat JSON records the exports and the data file use.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::constants::defaults;
use crate::error::{GearError, Result};
use crate::units::WeightUnit;

/// Identifier of a catalog item (stable for the item's lifetime)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GearId(String);

impl GearId {
    pub fn generate() -> Self {
        Self(format!("id-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GearId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for GearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of one pack entry, distinct from the gear id it was copied from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(format!("entry-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearItem {
    #[serde(default = "GearId::generate")]
    pub id: GearId,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Unit weight in grams
    #[serde(default = "default_weight", deserialize_with = "deserialize_weight")]
    pub weight: f64,
    #[serde(default = "default_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub consumable: bool,
}

/// Pack entry copied from a `GearItem`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedItem {
    #[serde(default = "EntryId::generate")]
    pub entry_id: EntryId,
    /// Source catalog item
    #[serde(default = "GearId::generate")]
    pub id: GearId,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default = "default_weight", deserialize_with = "deserialize_weight")]
    pub weight: f64,
    /// Packed quantity, independent of the catalog quantity
    #[serde(default = "default_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub consumable: bool,
    #[serde(default)]
    pub worn: bool,
    #[serde(default)]
    pub shared: bool,
}

impl PackedItem {
    /// Copy a catalog item into a fresh pack entry (quantity 1, not worn, not shared)
    pub fn from_gear(item: &GearItem) -> Self {
        Self {
            entry_id: EntryId::generate(),
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            manufacturer: item.manufacturer.clone(),
            product: item.product.clone(),
            weight: item.weight,
            quantity: 1,
            consumable: item.consumable,
            worn: false,
            shared: false,
        }
    }

    /// `manufacturer - product` (whichever are present)
    pub fn maker_line(&self) -> Option<String> {
        maker_line(self.manufacturer.as_deref(), self.product.as_deref(), " - ")
    }
}

impl GearItem {
    /// `manufacturer | product` (whichever are present)
    pub fn maker_line(&self) -> Option<String> {
        maker_line(self.manufacturer.as_deref(), self.product.as_deref(), " | ")
    }
}

fn maker_line(manufacturer: Option<&str>, product: Option<&str>, sep: &str) -> Option<String> {
    let parts: Vec<&str> = [manufacturer, product].into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(sep))
    }
}

/// Manual entry form for a new catalog item
#[derive(Debug, Clone)]
pub struct NewGearItem {
    pub name: String,
    pub category: String,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    /// Weight as typed, in `unit`
    pub weight: f64,
    pub unit: WeightUnit,
    pub quantity: u32,
    pub consumable: bool,
}

impl NewGearItem {
    /// Validate the form and build a catalog item with a fresh id
    pub fn into_item(self) -> Result<GearItem> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(GearError::InvalidItem("name is required".to_string()));
        }
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(GearError::InvalidItem("category is required".to_string()));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(GearError::InvalidItem(format!(
                "weight must be a non-negative number, got {}",
                self.weight
            )));
        }
        if self.quantity == 0 {
            return Err(GearError::InvalidItem("quantity must be at least 1".to_string()));
        }

        Ok(GearItem {
            id: GearId::generate(),
            name,
            category,
            manufacturer: non_empty(self.manufacturer),
            product: non_empty(self.product),
            weight: self.unit.from_display(self.weight),
            quantity: self.quantity,
            consumable: self.consumable,
        })
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_name() -> String {
    defaults::ITEM_NAME.to_string()
}

fn default_category() -> String {
    defaults::CATEGORY.to_string()
}

fn default_weight() -> f64 {
    defaults::WEIGHT
}

fn default_quantity() -> u32 {
    defaults::QUANTITY
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_empty(value))
}

/// Accepts a number or null; null falls back to the default weight
fn deserialize_weight<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(defaults::WEIGHT))
}

/// Accepts integer, float or null; anything below 1 becomes the default quantity
fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrFloat {
        Int(i64),
        Float(f64),
    }

    let quantity = match Option::<IntOrFloat>::deserialize(deserializer)? {
        Some(IntOrFloat::Int(i)) => i,
        Some(IntOrFloat::Float(f)) if f.is_finite() => f.trunc() as i64,
        _ => 0,
    };
    if quantity < 1 {
        Ok(defaults::QUANTITY)
    } else {
        Ok(u32::try_from(quantity).unwrap_or(u32::MAX))
    }
}
