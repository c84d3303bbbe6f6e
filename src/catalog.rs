//! Gear catalog (the owned inventory)

use std::collections::BTreeSet;

use crate::types::{GearId, GearItem};

/// Ordered collection of catalog items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GearCatalog {
    items: Vec<GearItem>,
}

impl GearCatalog {
    pub fn new(items: Vec<GearItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[GearItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &GearId) -> Option<&GearItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn add(&mut self, item: GearItem) {
        self.items.push(item);
    }

    /// Append imported items after the existing ones
    pub fn extend(&mut self, items: impl IntoIterator<Item = GearItem>) {
        self.items.extend(items);
    }

    /// Replace the whole catalog (JSON import)
    pub fn replace(&mut self, items: Vec<GearItem>) {
        self.items = items;
    }

    pub fn remove(&mut self, id: &GearId) -> Option<GearItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Drop every item in `category`, returning how many were removed
    pub fn remove_category(&mut self, category: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.category != category);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Case-insensitive substring match on name, manufacturer, product and category
    pub fn search(&self, term: &str) -> Vec<&GearItem> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                [
                    Some(item.name.as_str()),
                    item.manufacturer.as_deref(),
                    item.product.as_deref(),
                    Some(item.category.as_str()),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Exact category match; an empty name means "all categories"
    pub fn in_category(&self, category: &str) -> Vec<&GearItem> {
        self.items
            .iter()
            .filter(|item| category.is_empty() || item.category == category)
            .collect()
    }

    /// Number of items referencing `category`
    pub fn count_in_category(&self, category: &str) -> usize {
        self.items.iter().filter(|item| item.category == category).count()
    }

    /// Distinct categories referenced by catalog items
    pub fn categories(&self) -> BTreeSet<&str> {
        self.items.iter().map(|item| item.category.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::gear;

    fn sample() -> GearCatalog {
        let mut tent = gear("id-1", "Duplex", "Shelter", 539.0);
        tent.manufacturer = Some("Zpacks".to_string());
        let mut stove = gear("id-2", "Pocket Rocket", "Kitchen", 73.0);
        stove.product = Some("Deluxe".to_string());
        let pot = gear("id-3", "Titanium Pot", "Kitchen", 110.0);
        GearCatalog::new(vec![tent, stove, pot])
    }

    #[test]
    fn test_search_matches_any_text_field_case_insensitive() {
        let catalog = sample();
        let names =
            |items: Vec<&GearItem>| items.iter().map(|i| i.name.clone()).collect::<Vec<_>>();

        assert_eq!(names(catalog.search("zpacks")), vec!["Duplex"]);
        assert_eq!(names(catalog.search("DELUXE")), vec!["Pocket Rocket"]);
        assert_eq!(names(catalog.search("kitchen")), vec!["Pocket Rocket", "Titanium Pot"]);
        assert_eq!(catalog.search("").len(), 3);
        assert!(catalog.search("hammock").is_empty());
    }

    #[test]
    fn test_in_category_exact_and_empty_means_all() {
        let catalog = sample();
        assert_eq!(catalog.in_category("Kitchen").len(), 2);
        assert_eq!(catalog.in_category("kitchen").len(), 0);
        assert_eq!(catalog.in_category("").len(), 3);
    }

    #[test]
    fn test_remove_and_get() {
        let mut catalog = sample();
        let removed = catalog.remove(&GearId::from("id-2")).unwrap();
        assert_eq!(removed.name, "Pocket Rocket");
        assert!(catalog.get(&GearId::from("id-2")).is_none());
        assert!(catalog.remove(&GearId::from("id-2")).is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_remove_category() {
        let mut catalog = sample();
        assert_eq!(catalog.remove_category("Kitchen"), 2);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.remove_category("Kitchen"), 0);
    }

    #[test]
    fn test_categories_distinct_sorted() {
        let catalog = sample();
        let categories: Vec<&str> = catalog.categories().into_iter().collect();
        assert_eq!(categories, vec!["Kitchen", "Shelter"]);
        assert_eq!(catalog.count_in_category("Kitchen"), 2);
    }
}
