//! Weight aggregation over the pack
//!
//! Every surface that shows weights (summary panel, pack view, statistics
//! ranking, printable summary) goes through this module so they all agree.
//! Nothing here is cached: totals are recomputed from the entries each time.

use crate::types::PackedItem;

/// Worn/carried unit counts for one entry
///
/// A worn entry has exactly one worn unit; the remaining `quantity - 1`
/// units are carried. An entry that is not worn carries every unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSplit {
    pub worn: u32,
    pub carried: u32,
}

impl UnitSplit {
    pub fn of(item: &PackedItem) -> Self {
        if item.worn {
            Self {
                worn: 1,
                carried: item.quantity.saturating_sub(1),
            }
        } else {
            Self {
                worn: 0,
                carried: item.quantity,
            }
        }
    }
}

/// The seven derived totals, in grams
///
/// `consumable_weight` is a display subtotal: the same carried consumable
/// units are already inside `own_weight`/`shared_weight`, and are added again
/// into `total_backpack_weight`. This matches the established numbers users
/// see and is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightTotals {
    pub own_weight: f64,
    pub shared_weight: f64,
    pub base_weight: f64,
    pub consumable_weight: f64,
    pub total_backpack_weight: f64,
    pub worn_weight: f64,
    pub total_weight: f64,
}

impl WeightTotals {
    pub fn calculate(items: &[PackedItem]) -> Self {
        let mut own_weight = 0.0;
        let mut shared_weight = 0.0;
        let mut worn_weight = 0.0;
        let mut consumable_weight = 0.0;

        for item in items {
            let split = UnitSplit::of(item);
            let carried = item.weight * f64::from(split.carried);

            worn_weight += item.weight * f64::from(split.worn);
            if item.shared {
                shared_weight += carried;
            } else {
                own_weight += carried;
            }
            if item.consumable {
                consumable_weight += carried;
            }
        }

        let base_weight = own_weight + shared_weight;
        let total_backpack_weight = base_weight + consumable_weight;
        let total_weight = total_backpack_weight + worn_weight;

        Self {
            own_weight,
            shared_weight,
            base_weight,
            consumable_weight,
            total_backpack_weight,
            worn_weight,
            total_weight,
        }
    }

    /// Labelled rows in display order
    pub fn rows(&self) -> [(&'static str, f64); 7] {
        [
            ("Own Weight Carried", self.own_weight),
            ("Shared Weight Carried", self.shared_weight),
            ("Backpack Base Weight", self.base_weight),
            ("Weight of Consumables", self.consumable_weight),
            ("Total Backpack Weight", self.total_backpack_weight),
            ("Weight Worn", self.worn_weight),
            ("Total Weight", self.total_weight),
        ]
    }
}

/// Per-entry carried/worn weights, as shown next to each pack entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBreakdown {
    pub quantity: u32,
    pub carried: f64,
    pub worn: f64,
    pub total: f64,
}

impl ItemBreakdown {
    pub fn of(item: &PackedItem) -> Self {
        let split = UnitSplit::of(item);
        let carried = item.weight * f64::from(split.carried);
        let worn = item.weight * f64::from(split.worn);
        Self {
            quantity: item.quantity,
            carried,
            worn,
            total: carried + worn,
        }
    }
}

/// Weight of all units in a group, regardless of worn/shared
pub fn category_weight<'a>(items: impl IntoIterator<Item = &'a PackedItem>) -> f64 {
    items
        .into_iter()
        .map(|item| item.weight * f64::from(item.quantity))
        .sum()
}

/// A pack entry paired with its weight, for lightest/heaviest cards
#[derive(Debug, Clone, PartialEq)]
pub struct WeighedEntry {
    pub name: String,
    pub weight: f64,
}

/// Ranking row: an entry and its breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry<'a> {
    pub item: &'a PackedItem,
    pub breakdown: ItemBreakdown,
}

/// Statistics view over the pack
#[derive(Debug, Clone, PartialEq)]
pub struct PackStatistics<'a> {
    pub total_items: usize,
    pub total_categories: usize,
    pub lightest: Option<WeighedEntry>,
    pub heaviest: Option<WeighedEntry>,
    /// Heaviest first; ties keep pack order
    pub ranking: Vec<RankedEntry<'a>>,
}

impl<'a> PackStatistics<'a> {
    pub fn collect(items: &'a [PackedItem]) -> Self {
        let mut categories: Vec<&str> = items.iter().map(|i| i.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();

        let weighed: Vec<WeighedEntry> = items
            .iter()
            .map(|item| WeighedEntry {
                name: item.name.clone(),
                weight: item.weight * f64::from(item.quantity),
            })
            .collect();

        // First match wins on ties
        let lightest = weighed
            .iter()
            .fold(None::<&WeighedEntry>, |best, e| match best {
                Some(b) if b.weight <= e.weight => Some(b),
                _ => Some(e),
            })
            .cloned();
        let heaviest = weighed
            .iter()
            .fold(None::<&WeighedEntry>, |best, e| match best {
                Some(b) if b.weight >= e.weight => Some(b),
                _ => Some(e),
            })
            .cloned();

        let mut ranking: Vec<RankedEntry<'a>> = items
            .iter()
            .map(|item| RankedEntry {
                item,
                breakdown: ItemBreakdown::of(item),
            })
            .collect();
        ranking.sort_by(|a, b| b.breakdown.total.total_cmp(&a.breakdown.total));

        Self {
            total_items: items.len(),
            total_categories: categories.len(),
            lightest,
            heaviest,
            ranking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::PackSelection;
    use crate::types::tests::packed;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_empty_pack_is_all_zero() {
        assert_eq!(WeightTotals::calculate(&[]), WeightTotals::default());
        let totals = WeightTotals::calculate(&[]);
        for (_, value) in totals.rows() {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn test_single_carried_item() {
        let totals = WeightTotals::calculate(&[packed(500.0, 3, false, false, false)]);
        assert_eq!(totals.own_weight, 1500.0);
        assert_eq!(totals.shared_weight, 0.0);
        assert_eq!(totals.worn_weight, 0.0);
        assert_eq!(totals.base_weight, 1500.0);
        assert_eq!(totals.total_weight, 1500.0);
    }

    #[test]
    fn test_worn_item_splits_one_unit() {
        let totals = WeightTotals::calculate(&[packed(500.0, 3, true, false, false)]);
        assert_eq!(totals.worn_weight, 500.0);
        assert_eq!(totals.own_weight, 1000.0);
        assert_eq!(totals.base_weight, 1000.0);
        assert_eq!(totals.total_weight, 1500.0);
    }

    #[test]
    fn test_worn_shared_consumable() {
        let totals = WeightTotals::calculate(&[packed(200.0, 2, true, true, true)]);
        assert_eq!(totals.worn_weight, 200.0);
        assert_eq!(totals.shared_weight, 200.0);
        assert_eq!(totals.own_weight, 0.0);
        assert_eq!(totals.consumable_weight, 200.0);
        assert_eq!(totals.base_weight, 200.0);
        assert_eq!(totals.total_backpack_weight, 400.0);
        assert_eq!(totals.total_weight, 600.0);
    }

    #[test]
    fn test_single_worn_unit_carries_nothing() {
        let totals = WeightTotals::calculate(&[packed(300.0, 1, true, true, true)]);
        assert_eq!(totals.worn_weight, 300.0);
        assert_eq!(totals.shared_weight, 0.0);
        assert_eq!(totals.consumable_weight, 0.0);
        assert_eq!(totals.total_weight, 300.0);
    }

    #[test]
    fn test_mixed_pack() {
        let items = [
            packed(1000.0, 1, false, false, false),
            packed(150.0, 2, false, true, false),
            packed(400.0, 3, false, false, true),
            packed(250.0, 1, true, false, false),
        ];
        let totals = WeightTotals::calculate(&items);
        assert_eq!(totals.own_weight, 2200.0);
        assert_eq!(totals.shared_weight, 300.0);
        assert_eq!(totals.base_weight, 2500.0);
        assert_eq!(totals.consumable_weight, 1200.0);
        assert_eq!(totals.total_backpack_weight, 3700.0);
        assert_eq!(totals.worn_weight, 250.0);
        assert_eq!(totals.total_weight, 3950.0);
    }

    #[test]
    fn test_nan_weight_propagates() {
        let totals = WeightTotals::calculate(&[packed(f64::NAN, 1, false, false, false)]);
        assert!(totals.own_weight.is_nan());
        assert!(totals.total_weight.is_nan());
    }

    #[test]
    fn test_breakdown_matches_split() {
        let b = ItemBreakdown::of(&packed(120.0, 4, true, false, false));
        assert_eq!(b.worn, 120.0);
        assert_eq!(b.carried, 360.0);
        assert_eq!(b.total, 480.0);

        let b = ItemBreakdown::of(&packed(120.0, 4, false, false, false));
        assert_eq!(b.worn, 0.0);
        assert_eq!(b.carried, 480.0);
    }

    #[test]
    fn test_category_weight_ignores_flags() {
        let items = [packed(100.0, 2, true, false, false), packed(50.0, 1, false, true, true)];
        assert_eq!(category_weight(&items), 250.0);
    }

    #[test]
    fn test_statistics_lightest_heaviest_and_ranking() {
        let mut a = packed(100.0, 1, false, false, false);
        a.name = "Spoon".to_string();
        a.category = "Kitchen".to_string();
        let mut b = packed(300.0, 2, true, false, false);
        b.name = "Socks".to_string();
        b.category = "Clothing".to_string();
        let mut c = packed(100.0, 1, false, false, false);
        c.name = "Lighter".to_string();
        c.category = "Kitchen".to_string();
        let items = [a, b, c];

        let stats = PackStatistics::collect(&items);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.lightest.as_ref().map(|e| e.name.as_str()), Some("Spoon"));
        assert_eq!(stats.heaviest.as_ref().map(|e| e.weight), Some(600.0));

        let names: Vec<&str> = stats.ranking.iter().map(|r| r.item.name.as_str()).collect();
        assert_eq!(names, vec!["Socks", "Spoon", "Lighter"]);
        assert_eq!(stats.ranking[0].breakdown.worn, 300.0);
        assert_eq!(stats.ranking[0].breakdown.carried, 300.0);
    }

    #[test]
    fn test_statistics_empty_pack() {
        let stats = PackStatistics::collect(&[]);
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.total_categories, 0);
        assert!(stats.lightest.is_none());
        assert!(stats.heaviest.is_none());
        assert!(stats.ranking.is_empty());
    }

    fn arb_entry() -> impl Strategy<Value = PackedItem> {
        (0u32..5000, 1u32..20, any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(w, q, worn, shared, consumable)| {
                packed(f64::from(w), q, worn, shared, consumable)
            })
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_parts(items in prop::collection::vec(arb_entry(), 0..30)) {
            let t = WeightTotals::calculate(&items);
            assert_close(
                t.total_weight,
                t.own_weight + t.shared_weight + t.consumable_weight + t.worn_weight,
            );
            assert_close(t.base_weight, t.own_weight + t.shared_weight);
            assert_close(t.total_backpack_weight, t.base_weight + t.consumable_weight);
            prop_assert!(t.consumable_weight <= t.base_weight);
        }

        #[test]
        fn prop_breakdowns_agree_with_totals(items in prop::collection::vec(arb_entry(), 0..30)) {
            let t = WeightTotals::calculate(&items);
            let carried: f64 = items.iter().map(|i| ItemBreakdown::of(i).carried).sum();
            let worn: f64 = items.iter().map(|i| ItemBreakdown::of(i).worn).sum();
            assert_close(carried, t.base_weight);
            assert_close(worn, t.worn_weight);
            for item in &items {
                assert_close(ItemBreakdown::of(item).total, item.weight * f64::from(item.quantity));
            }
        }

        #[test]
        fn prop_toggling_worn_twice_restores_totals(
            items in prop::collection::vec(arb_entry(), 1..20),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut pack = PackSelection::new(items);
            let before = pack.totals();
            let entry_id = pack.entries()[pick.index(pack.len())].entry_id.clone();
            let was_worn = pack.get(&entry_id).map(|e| e.worn);

            prop_assert_eq!(pack.toggle_worn(&entry_id), was_worn.map(|w| !w));
            prop_assert_eq!(pack.toggle_worn(&entry_id), was_worn);
            prop_assert_eq!(pack.totals(), before);
        }
    }
}
