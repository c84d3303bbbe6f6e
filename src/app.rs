//! Application state container
//!
//! `HikeLite` owns the catalog, the pack, the category registry and the
//! selected display unit. Its methods are the only way to change them. Each
//! mutation runs to completion and then notifies subscribers once with the
//! views it invalidated.

use std::fmt;
use tracing::{info, warn};

use crate::catalog::GearCatalog;
use crate::categories::{CategoryRegistry, CategoryUsage};
use crate::error::{GearError, Result};
use crate::pack::PackSelection;
use crate::types::{EntryId, GearId, GearItem, NewGearItem, PackedItem};
use crate::units::WeightUnit;
use crate::weights::{ItemBreakdown, PackStatistics, WeightTotals};

/// Presentation surfaces a mutation invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Views {
    pub catalog: bool,
    pub pack: bool,
    pub statistics: bool,
    pub categories: bool,
}

impl Views {
    pub const NONE: Views = Views {
        catalog: false,
        pack: false,
        statistics: false,
        categories: false,
    };

    /// Catalog affordances, pack view and statistics (every pack mutation)
    pub const PACK: Views = Views {
        catalog: true,
        pack: true,
        statistics: true,
        categories: false,
    };

    pub const ALL: Views = Views {
        catalog: true,
        pack: true,
        statistics: true,
        categories: true,
    };

    pub fn is_empty(&self) -> bool {
        *self == Views::NONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// User-facing outcome message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

type Listener = Box<dyn FnMut(Views)>;

/// Gear manager state
#[derive(Default)]
pub struct HikeLite {
    catalog: GearCatalog,
    pack: PackSelection,
    categories: CategoryRegistry,
    unit: WeightUnit,
    listeners: Vec<Listener>,
}

impl fmt::Debug for HikeLite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HikeLite")
            .field("catalog", &self.catalog.len())
            .field("pack", &self.pack.len())
            .field("categories", &self.categories.registered())
            .field("unit", &self.unit)
            .finish()
    }
}

impl HikeLite {
    pub fn new(
        catalog: GearCatalog,
        pack: PackSelection,
        categories: CategoryRegistry,
        unit: WeightUnit,
    ) -> Self {
        Self {
            catalog,
            pack,
            categories,
            unit,
            listeners: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &GearCatalog {
        &self.catalog
    }

    pub fn pack(&self) -> &PackSelection {
        &self.pack
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn unit(&self) -> WeightUnit {
        self.unit
    }

    /// Register a callback invoked after every completed mutation
    pub fn subscribe(&mut self, listener: impl FnMut(Views) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, views: Views) -> Views {
        if !views.is_empty() {
            for listener in &mut self.listeners {
                listener(views);
            }
        }
        views
    }

    // ----- derived data ------------------------------------------------------

    pub fn totals(&self) -> WeightTotals {
        self.pack.totals()
    }

    pub fn statistics(&self) -> PackStatistics<'_> {
        PackStatistics::collect(self.pack.entries())
    }

    pub fn breakdown(&self, entry_id: &EntryId) -> Option<ItemBreakdown> {
        self.pack.get(entry_id).map(ItemBreakdown::of)
    }

    pub fn is_packed(&self, id: &GearId) -> bool {
        self.pack.contains_source(id)
    }

    pub fn effective_categories(&self) -> Vec<String> {
        self.categories.effective(&self.catalog).into_iter().collect()
    }

    pub fn category_usage(&self) -> Vec<CategoryUsage> {
        self.categories.usage(&self.catalog)
    }

    // ----- settings ----------------------------------------------------------

    pub fn set_unit(&mut self, unit: WeightUnit) -> Views {
        self.unit = unit;
        self.notify(Views { catalog: true, pack: true, statistics: true, categories: false })
    }

    // ----- catalog -----------------------------------------------------------

    pub fn add_gear(&mut self, form: NewGearItem) -> Result<(GearId, Views)> {
        let item = form.into_item()?;
        let id = item.id.clone();
        info!(id = %id, name = %item.name, category = %item.category, "Added gear item");
        self.catalog.add(item);
        let views = self.notify(Views {
            catalog: true,
            pack: false,
            statistics: true,
            categories: true,
        });
        Ok((id, views))
    }

    /// Delete a catalog item. Pack entries copied from it are left in place.
    pub fn remove_gear(&mut self, id: &GearId) -> Result<(GearItem, Views)> {
        let item = self
            .catalog
            .remove(id)
            .ok_or_else(|| GearError::UnknownGear(id.to_string()))?;
        info!(id = %id, still_packed = self.pack.contains_source(id), "Removed gear item");
        let views = self.notify(Views {
            catalog: true,
            pack: false,
            statistics: false,
            categories: true,
        });
        Ok((item, views))
    }

    /// Empty the catalog and the pack (caller confirms first)
    pub fn clear_catalog(&mut self) -> Views {
        warn!(
            items = self.catalog.len(),
            packed = self.pack.len(),
            "Clearing inventory and packing list"
        );
        self.catalog.clear();
        self.pack.clear();
        self.notify(Views::ALL)
    }

    pub fn replace_catalog(&mut self, items: Vec<GearItem>) -> Views {
        info!(count = items.len(), "Replacing inventory");
        self.catalog.replace(items);
        self.notify(Views { catalog: true, pack: false, statistics: true, categories: true })
    }

    pub fn append_catalog(&mut self, items: Vec<GearItem>) -> Views {
        info!(count = items.len(), "Appending to inventory");
        self.catalog.extend(items);
        self.notify(Views { catalog: true, pack: false, statistics: true, categories: true })
    }

    // ----- pack --------------------------------------------------------------

    pub fn add_to_pack(&mut self, id: &GearId) -> Result<(EntryId, Views)> {
        let item = self
            .catalog
            .get(id)
            .ok_or_else(|| GearError::UnknownGear(id.to_string()))?;
        let entry_id = self.pack.add(item);
        Ok((entry_id, self.notify(Views::PACK)))
    }

    pub fn remove_from_pack(&mut self, entry_id: &EntryId) -> Result<(PackedItem, Views)> {
        let entry = self
            .pack
            .remove(entry_id)
            .ok_or_else(|| GearError::UnknownEntry(entry_id.to_string()))?;
        Ok((entry, self.notify(Views::PACK)))
    }

    /// Catalog-side "Remove" affordance: unpack every copy of a gear item
    pub fn unpack_gear(&mut self, id: &GearId) -> Result<(usize, Views)> {
        match self.pack.remove_source(id) {
            0 => Err(GearError::NotPacked(id.to_string())),
            n => Ok((n, self.notify(Views::PACK))),
        }
    }

    pub fn set_quantity(&mut self, entry_id: &EntryId, delta: i64) -> Result<(u32, Views)> {
        let quantity = self
            .pack
            .set_quantity(entry_id, delta)
            .ok_or_else(|| GearError::UnknownEntry(entry_id.to_string()))?;
        Ok((quantity, self.notify(Views::PACK)))
    }

    pub fn toggle_worn(&mut self, entry_id: &EntryId) -> Result<(bool, Views)> {
        let worn = self
            .pack
            .toggle_worn(entry_id)
            .ok_or_else(|| GearError::UnknownEntry(entry_id.to_string()))?;
        Ok((worn, self.notify(Views::PACK)))
    }

    pub fn toggle_shared(&mut self, entry_id: &EntryId) -> Result<(bool, Views)> {
        let shared = self
            .pack
            .toggle_shared(entry_id)
            .ok_or_else(|| GearError::UnknownEntry(entry_id.to_string()))?;
        Ok((shared, self.notify(Views::PACK)))
    }

    /// Empty the pack (caller confirms first)
    pub fn clear_pack(&mut self) -> Views {
        warn!(packed = self.pack.len(), "Clearing packing list");
        self.pack.clear();
        self.notify(Views::PACK)
    }

    pub fn replace_pack(&mut self, entries: Vec<PackedItem>) -> Views {
        info!(count = entries.len(), "Replacing packing list");
        self.pack.replace(entries);
        self.notify(Views::PACK)
    }

    // ----- categories --------------------------------------------------------

    pub fn add_category(&mut self, name: &str) -> Result<(String, Views)> {
        let name = self.categories.add(name, &self.catalog)?;
        info!(category = %name, "Added category");
        let views = self.notify(Views {
            catalog: false,
            pack: false,
            statistics: false,
            categories: true,
        });
        Ok((name, views))
    }

    /// Delete an unused category, cascading to the catalog and pack
    pub fn delete_category(&mut self, name: &str) -> Result<Views> {
        let count = self.catalog.count_in_category(name);
        if count > 0 {
            return Err(GearError::CategoryInUse { name: name.to_string(), count });
        }
        if !self.categories.contains(name, &self.catalog) {
            return Err(GearError::UnknownCategory(name.to_string()));
        }

        let removed_items = self.catalog.remove_category(name);
        let removed_entries = self.pack.remove_category(name);
        self.categories.unregister(name);
        info!(category = %name, removed_items, removed_entries, "Deleted category");
        Ok(self.notify(Views::ALL))
    }
}
