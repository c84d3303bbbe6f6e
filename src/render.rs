//! Text views printed by the command line
//!
//! Each view builds a list of lines and joins them; weights are always
//! formatted through the selected `WeightUnit`.

use crate::app::HikeLite;
use crate::categories::CategoryUsage;
use crate::types::{GearItem, PackedItem};
use crate::units::WeightUnit;
use crate::weights::{ItemBreakdown, WeighedEntry, WeightTotals, category_weight};

pub fn summary(totals: &WeightTotals, unit: WeightUnit) -> String {
    let rows = totals.rows();
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut lines = vec!["=== Weight Summary ===".to_string()];
    for (label, grams) in rows {
        lines.push(format!("{label:<width$}  {}", unit.format(grams)));
    }
    lines.join("\n")
}

fn flags(item: &PackedItem) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if item.worn {
        flags.push("WORN");
    }
    if item.shared {
        flags.push("SHARED");
    }
    if item.consumable {
        flags.push("CONSUMABLE");
    }
    flags
}

fn breakdown_note(breakdown: &ItemBreakdown, unit: WeightUnit) -> Option<String> {
    (breakdown.worn > 0.0 && breakdown.carried > 0.0).then(|| {
        format!(
            "({} carried, {} worn)",
            unit.format(breakdown.carried),
            unit.format(breakdown.worn)
        )
    })
}

/// Pack grouped by category, followed by the summary panel
pub fn pack_view(app: &HikeLite) -> String {
    let unit = app.unit();
    let mut lines = Vec::new();

    if app.pack().is_empty() {
        lines.push("No items in packing list".to_string());
        lines.push("Add items from your inventory to build your pack".to_string());
    }

    for (category, items) in app.pack().by_category() {
        lines.push(format!(
            "{category} ({})",
            unit.format(category_weight(items.iter().copied()))
        ));
        for item in items {
            let breakdown = ItemBreakdown::of(item);
            let mut line = format!(
                "  [{}] {} {}x {} total",
                item.entry_id,
                item.name,
                item.quantity,
                unit.format(breakdown.total)
            );
            let flags = flags(item);
            if !flags.is_empty() {
                line.push_str(&format!(" [{}]", flags.join(", ")));
            }
            if let Some(note) = breakdown_note(&breakdown, unit) {
                line.push(' ');
                line.push_str(&note);
            }
            lines.push(line);
            if let Some(maker) = item.maker_line() {
                lines.push(format!("      {maker}"));
            }
        }
        lines.push(String::new());
    }

    lines.push(summary(&app.totals(), unit));
    lines.join("\n")
}

/// Statistics cards plus the weight-sorted ranking
pub fn statistics(app: &HikeLite) -> String {
    let unit = app.unit();
    let stats = app.statistics();
    let card = |entry: &Option<WeighedEntry>| match entry {
        Some(e) => format!("{} ({})", e.name, unit.format(e.weight)),
        None => "-".to_string(),
    };

    let mut lines = vec![
        format!("Total items:      {}", stats.total_items),
        format!("Categories:       {}", stats.total_categories),
        format!("Lightest item:    {}", card(&stats.lightest)),
        format!("Heaviest item:    {}", card(&stats.heaviest)),
        String::new(),
    ];

    if stats.ranking.is_empty() {
        lines.push("No items in packing list".to_string());
        lines.push("Add items to see weight-sorted list".to_string());
        return lines.join("\n");
    }

    lines.push("Items sorted by weight (heaviest to lightest)".to_string());
    for (rank, entry) in stats.ranking.iter().enumerate() {
        let mut line = format!(
            "{:>3}. {} {}x {} ({} carried",
            rank + 1,
            entry.item.name,
            entry.breakdown.quantity,
            unit.format(entry.breakdown.total),
            unit.format(entry.breakdown.carried)
        );
        if entry.breakdown.worn > 0.0 {
            line.push_str(&format!(", {} worn", unit.format(entry.breakdown.worn)));
        }
        line.push(')');
        let flags = flags(entry.item);
        if !flags.is_empty() {
            line.push_str(&format!(" [{}]", flags.join(", ")));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Catalog items with a `*` marker for gear already in the pack
pub fn catalog_view(app: &HikeLite, items: &[&GearItem]) -> String {
    let unit = app.unit();
    if app.catalog().is_empty() {
        return "No gear in inventory\nImport a file or add your first item to get started"
            .to_string();
    }
    if items.is_empty() {
        return "No items found\nTry adjusting your search or filter".to_string();
    }

    let mut lines = Vec::with_capacity(items.len() * 2);
    for item in items {
        let marker = if app.is_packed(&item.id) { '*' } else { ' ' };
        let mut line = format!(
            "{marker} [{}] {} ({}) {}",
            item.id,
            item.name,
            item.category,
            unit.format(item.weight)
        );
        if item.quantity > 1 {
            line.push_str(&format!(" x{}", item.quantity));
        }
        if item.consumable {
            line.push_str(" Consumable");
        }
        lines.push(line);
        if let Some(maker) = item.maker_line() {
            lines.push(format!("    {maker}"));
        }
    }
    lines.join("\n")
}

pub fn category_list(usage: &[CategoryUsage]) -> String {
    if usage.is_empty() {
        return "No categories found. Add some items to create categories.".to_string();
    }

    let width = usage.iter().map(|u| u.name.len()).max().unwrap_or(0);
    usage
        .iter()
        .map(|u| {
            let plural = if u.item_count == 1 { "" } else { "s" };
            let count = format!("{} item{plural}", u.item_count);
            let status = if u.deletable() { "can delete" } else { "In use" };
            format!("{:<width$}  {count:<10}  {status}", u.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
