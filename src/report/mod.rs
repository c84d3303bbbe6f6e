//! Printable packing list summary
//!
//! The summary is laid out on a page coordinate model (millimetres on A4,
//! y growing downwards) and then handed to a `DocumentWriter` backend. The
//! backend is acquired through a bounded retry (`retry`).

use chrono::NaiveDate;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::app::HikeLite;
use crate::constants::report::*;
use crate::types::PackedItem;
use crate::units::WeightUnit;
use crate::weights::WeightTotals;

pub mod retry;
pub mod writer;

pub use retry::RetryPolicy;
pub use writer::{DocumentWriter, TextWriter};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend could not be acquired after every allowed attempt
    #[error("PDF library failed to load after {attempts} attempt(s): {reason}")]
    BackendUnavailable { attempts: u32, reason: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// One positioned line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: u16,
    pub y: u16,
    pub font_size: u8,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
}

/// Everything the summary needs from the application state
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub totals: WeightTotals,
    pub groups: Vec<(&'a str, Vec<&'a PackedItem>)>,
    pub unit: WeightUnit,
    pub generated: NaiveDate,
}

impl<'a> ReportInput<'a> {
    pub fn from_app(app: &'a HikeLite, generated: NaiveDate) -> Self {
        Self {
            totals: app.totals(),
            groups: app.pack().by_category().into_iter().collect(),
            unit: app.unit(),
            generated,
        }
    }
}

/// Cursor that places lines and breaks pages
struct PageCursor {
    pages: Vec<Page>,
    y: u16,
}

impl PageCursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: PAGE_TOP,
        }
    }

    fn put(&mut self, x: u16, font_size: u8, text: String) {
        let y = self.y;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(TextLine { x, y, font_size, text });
        }
    }

    fn advance(&mut self, step: u16) {
        self.y = self.y.saturating_add(step);
    }

    /// Start a new page when the cursor is past `limit`
    fn break_after(&mut self, limit: u16) {
        if self.y > limit {
            self.pages.push(Page::default());
            self.y = PAGE_TOP;
        }
    }
}

/// `• Name (2x) - 400g [WORN]`
pub fn item_line(item: &PackedItem, unit: WeightUnit) -> String {
    let mut text = format!(
        "\u{2022} {} ({}x) - {}",
        item.name,
        item.quantity,
        unit.format(item.weight * f64::from(item.quantity))
    );
    if item.worn {
        text.push_str(" [WORN]");
    } else if item.shared {
        text.push_str(" [SHARED]");
    }
    text
}

pub fn layout(input: &ReportInput<'_>) -> Document {
    let mut cursor = PageCursor::new();

    cursor.put(MARGIN_X, TITLE_FONT_SIZE, TITLE.to_string());
    cursor.y = DATE_Y;
    cursor.put(
        MARGIN_X,
        CATEGORY_FONT_SIZE,
        format!("Generated: {}", input.generated.format("%Y-%m-%d")),
    );

    cursor.y = SUMMARY_HEADING_Y;
    cursor.put(MARGIN_X, SECTION_FONT_SIZE, "Weight Summary".to_string());

    cursor.y = SUMMARY_FIRST_LINE_Y;
    let rows = input.totals.rows();
    for (i, (label, grams)) in rows.iter().enumerate() {
        if i > 0 {
            cursor.advance(SUMMARY_LINE_STEP);
        }
        cursor.put(MARGIN_X, BODY_FONT_SIZE, format!("{label}: {}", input.unit.format(*grams)));
    }

    cursor.advance(SECTION_GAP);
    cursor.put(MARGIN_X, SECTION_FONT_SIZE, "Packing List".to_string());
    cursor.advance(HEADING_STEP);

    for (category, items) in &input.groups {
        cursor.break_after(CATEGORY_BREAK_Y);
        cursor.put(MARGIN_X, CATEGORY_FONT_SIZE, (*category).to_string());
        cursor.advance(CATEGORY_STEP);

        for item in items {
            cursor.break_after(ITEM_BREAK_Y);
            cursor.put(ITEM_X, BODY_FONT_SIZE, item_line(item, input.unit));
            cursor.advance(ITEM_STEP);
        }
        cursor.advance(CATEGORY_GAP);
    }

    Document { pages: cursor.pages }
}

/// Lay out the pack summary and write it to `path` through a retried backend
pub fn export(
    app: &HikeLite,
    path: &Path,
    generated: NaiveDate,
    policy: &RetryPolicy,
) -> Result<usize> {
    let document = layout(&ReportInput::from_app(app, generated));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let mut writer =
        runtime.block_on(retry::acquire_with_retry(policy, || TextWriter::create(path)))?;

    writer.write(&document)?;
    info!(path = %path.display(), pages = document.pages.len(), "Exported packing list summary");
    Ok(document.pages.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::packed;

    fn input(groups: Vec<(&'static str, Vec<&'static PackedItem>)>) -> ReportInput<'static> {
        let entries: Vec<PackedItem> = groups
            .iter()
            .flat_map(|(_, items)| items.iter().map(|i| (*i).clone()))
            .collect();
        let totals = WeightTotals::calculate(&entries);
        ReportInput {
            totals,
            groups,
            unit: WeightUnit::Grams,
            generated: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        }
    }

    fn leak(item: PackedItem) -> &'static PackedItem {
        Box::leak(Box::new(item))
    }

    fn named(
        name: &str,
        weight: f64,
        quantity: u32,
        worn: bool,
        shared: bool,
    ) -> &'static PackedItem {
        let mut item = packed(weight, quantity, worn, shared, false);
        item.name = name.to_string();
        leak(item)
    }

    #[test]
    fn test_item_line_suffixes() {
        let line = |item| item_line(item, WeightUnit::Grams);
        assert_eq!(line(named("Socks", 50.0, 2, false, false)), "\u{2022} Socks (2x) - 100g");
        assert_eq!(line(named("Hat", 30.0, 1, true, true)), "\u{2022} Hat (1x) - 30g [WORN]");
        assert_eq!(
            line(named("Tarp", 300.0, 1, false, true)),
            "\u{2022} Tarp (1x) - 300g [SHARED]"
        );
    }

    #[test]
    fn test_first_page_header_and_summary_positions() {
        let doc = layout(&input(vec![("Shelter", vec![named("Tent", 500.0, 1, false, false)])]));
        assert_eq!(doc.pages.len(), 1);
        let lines = &doc.pages[0].lines;

        assert_eq!(lines[0].text, "HikeLite Packing List");
        assert_eq!((lines[0].y, lines[0].font_size), (20, 20));
        assert_eq!(lines[1].text, "Generated: 2026-10-19");
        assert_eq!(lines[1].y, 30);
        assert_eq!(lines[2].text, "Weight Summary");
        assert_eq!(lines[2].y, 45);
        assert_eq!(lines[3].text, "Own Weight Carried: 500g");
        assert_eq!(lines[3].y, 55);
        assert_eq!(lines[9].text, "Total Weight: 500g");
        assert_eq!(lines[9].y, 103);
        assert_eq!(lines[10].text, "Packing List");
        assert_eq!(lines[10].y, 118);
        assert_eq!((lines[11].text.as_str(), lines[11].y), ("Shelter", 128));
        assert_eq!((lines[12].x, lines[12].y), (25, 136));
    }

    #[test]
    fn test_long_list_breaks_pages() {
        let items: Vec<&'static PackedItem> = (0..40)
            .map(|i| named(&format!("Item {i}"), 10.0, 1, false, false))
            .collect();
        let doc = layout(&input(vec![("Misc", items)]));
        assert_eq!(doc.pages.len(), 2);

        // Items run from y=136 in steps of 6 until the cursor passes 270
        let first_page_items = doc.pages[0].lines.iter().filter(|l| l.x == ITEM_X).count();
        assert_eq!(first_page_items, 23);
        assert!(doc.pages[0].lines.iter().all(|l| l.y <= ITEM_BREAK_Y + ITEM_STEP));
        assert_eq!(doc.pages[1].lines[0].y, PAGE_TOP);
        assert_eq!(doc.pages[1].lines.len(), 17);
    }

    #[test]
    fn test_category_heading_moves_to_new_page_late_on_page() {
        let first: Vec<&'static PackedItem> = (0..20)
            .map(|i| named(&format!("A{i}"), 1.0, 1, false, false))
            .collect();
        let second = vec![named("B", 1.0, 1, false, false)];
        let doc = layout(&input(vec![("First", first), ("Second", second)]));

        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].lines[0].text, "Second");
        assert_eq!(doc.pages[1].lines[0].y, PAGE_TOP);
    }

    #[test]
    fn test_empty_pack_still_has_summary() {
        let doc = layout(&input(vec![]));
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].lines.len(), 11);
        assert_eq!(doc.pages[0].lines[9].text, "Total Weight: 0g");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("summary.txt");
        let app = HikeLite::default();
        let policy = RetryPolicy::immediate(2);

        let generated = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let pages = export(&app, &path, generated, &policy).unwrap();
        assert_eq!(pages, 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("HikeLite Packing List"));
        assert!(text.contains("Generated: 2026-01-02"));
    }
}
