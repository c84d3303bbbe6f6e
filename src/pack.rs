//! Pack selection (the packing list)
//!
//! Entries are independent copies of catalog items. Each entry has its own
//! `EntryId`, so the same catalog item can be packed twice and still be
//! addressed one entry at a time.

use indexmap::IndexMap;
use tracing::debug;

use crate::types::{EntryId, GearId, GearItem, PackedItem};
use crate::weights::WeightTotals;

/// Ordered collection of pack entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackSelection {
    entries: Vec<PackedItem>,
}

impl PackSelection {
    pub fn new(entries: Vec<PackedItem>) -> Self {
        let mut pack = Self::default();
        pack.replace(entries);
        pack
    }

    pub fn entries(&self) -> &[PackedItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, entry_id: &EntryId) -> Option<&PackedItem> {
        self.entries.iter().find(|e| &e.entry_id == entry_id)
    }

    fn get_mut(&mut self, entry_id: &EntryId) -> Option<&mut PackedItem> {
        self.entries.iter_mut().find(|e| &e.entry_id == entry_id)
    }

    /// Whether any entry was copied from this catalog item
    pub fn contains_source(&self, id: &GearId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    /// Append a copy of `item` with quantity 1, not worn, not shared
    pub fn add(&mut self, item: &GearItem) -> EntryId {
        let entry = PackedItem::from_gear(item);
        let entry_id = entry.entry_id.clone();
        debug!(gear = %item.id, entry = %entry_id, "Packed item");
        self.entries.push(entry);
        entry_id
    }

    pub fn remove(&mut self, entry_id: &EntryId) -> Option<PackedItem> {
        let index = self.entries.iter().position(|e| &e.entry_id == entry_id)?;
        Some(self.entries.remove(index))
    }

    /// Remove every entry copied from `id`, returning how many were removed
    pub fn remove_source(&mut self, id: &GearId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        before - self.entries.len()
    }

    pub fn remove_category(&mut self, category: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.category != category);
        before - self.entries.len()
    }

    /// Apply `delta` to the quantity, never going below 1
    pub fn set_quantity(&mut self, entry_id: &EntryId, delta: i64) -> Option<u32> {
        let entry = self.get_mut(entry_id)?;
        let next = (i64::from(entry.quantity)).saturating_add(delta).max(1);
        entry.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        Some(entry.quantity)
    }

    pub fn toggle_worn(&mut self, entry_id: &EntryId) -> Option<bool> {
        let entry = self.get_mut(entry_id)?;
        entry.worn = !entry.worn;
        Some(entry.worn)
    }

    pub fn toggle_shared(&mut self, entry_id: &EntryId) -> Option<bool> {
        let entry = self.get_mut(entry_id)?;
        entry.shared = !entry.shared;
        Some(entry.shared)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace every entry (JSON import); quantities below 1 are raised to 1
    pub fn replace(&mut self, mut entries: Vec<PackedItem>) {
        for entry in &mut entries {
            entry.quantity = entry.quantity.max(1);
        }
        self.entries = entries;
    }

    /// Entries grouped by category, in order of first appearance
    pub fn by_category(&self) -> IndexMap<&str, Vec<&PackedItem>> {
        let mut groups: IndexMap<&str, Vec<&PackedItem>> = IndexMap::new();
        for entry in &self.entries {
            groups.entry(entry.category.as_str()).or_default().push(entry);
        }
        groups
    }

    pub fn totals(&self) -> WeightTotals {
        WeightTotals::calculate(&self.entries)
    }
}
