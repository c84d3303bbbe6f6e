//! CSV catalog import
//!
//! Recognised headers (case-insensitive, any order): name, category,
//! manufacturer, product, weight, quantity, consumable. Unknown columns are
//! ignored; rows shorter than the header row are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use super::{Result, TransferError};
use crate::constants::defaults;
use crate::types::{GearId, GearItem, non_empty};

/// Column positions of the recognised headers
#[derive(Debug, Default)]
struct Columns {
    name: Option<usize>,
    category: Option<usize>,
    manufacturer: Option<usize>,
    product: Option<usize>,
    weight: Option<usize>,
    quantity: Option<usize>,
    consumable: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &::csv::StringRecord) -> Self {
        let mut columns = Columns::default();
        for (index, header) in headers.iter().enumerate() {
            let slot = match header.trim().to_lowercase().as_str() {
                "name" => &mut columns.name,
                "category" => &mut columns.category,
                "manufacturer" => &mut columns.manufacturer,
                "product" => &mut columns.product,
                "weight" => &mut columns.weight,
                "quantity" => &mut columns.quantity,
                "consumable" => &mut columns.consumable,
                _ => continue,
            };
            // First occurrence wins
            slot.get_or_insert(index);
        }
        columns
    }
}

pub fn read_inventory(path: &Path) -> Result<Vec<GearItem>> {
    let file = File::open(path)?;
    parse_inventory(file)
}

/// Parse rows into new catalog items, each with a fresh id
pub fn parse_inventory<R: Read>(reader: R) -> Result<Vec<GearItem>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let mut records = reader.records();
    let headers = match records.next() {
        Some(record) => record?,
        None => return Err(TransferError::MissingHeader),
    };
    let columns = Columns::from_headers(&headers);

    let mut items = Vec::new();
    for (line, record) in records.enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < headers.len() {
            warn!(
                row = line + 2,
                fields = record.len(),
                expected = headers.len(),
                "Skipping short CSV row"
            );
            continue;
        }
        items.push(item_from_record(&record, &columns));
    }
    debug!(count = items.len(), "Parsed CSV inventory");
    Ok(items)
}

fn item_from_record(record: &::csv::StringRecord, columns: &Columns) -> GearItem {
    let field = |column: Option<usize>| -> Option<String> {
        column
            .and_then(|i| record.get(i))
            .map(str::to_string)
            .filter(|v| !v.is_empty())
    };

    GearItem {
        id: GearId::generate(),
        name: field(columns.name).unwrap_or_else(|| defaults::ITEM_NAME.to_string()),
        category: field(columns.category).unwrap_or_else(|| defaults::CATEGORY.to_string()),
        manufacturer: non_empty(field(columns.manufacturer)),
        product: non_empty(field(columns.product)),
        weight: field(columns.weight)
            .and_then(|v| parse_leading_float(&v))
            .unwrap_or(defaults::WEIGHT),
        quantity: field(columns.quantity)
            .and_then(|v| parse_leading_int(&v))
            .filter(|q| *q >= 1)
            .and_then(|q| u32::try_from(q).ok())
            .unwrap_or(defaults::QUANTITY),
        consumable: field(columns.consumable).is_some_and(|v| v.eq_ignore_ascii_case("true")),
    }
}

/// Longest numeric prefix as a float, e.g. `"120g"` -> 120.0
fn parse_leading_float(value: &str) -> Option<f64> {
    let value = value.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in value.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            d if d.is_ascii_digit() => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    value[..end].trim_end_matches('.').parse::<f64>().ok().filter(|w| w.is_finite())
}

/// Leading integer, e.g. `"2.5"` -> 2, `"3 pcs"` -> 3
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let digits_end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    value[..digits_end].parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<GearItem> {
        parse_inventory(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_basic_rows() {
        let items = parse(
            "name,category,manufacturer,product,weight,quantity,consumable\n\
             Tent,Shelter,Zpacks,Duplex,539,1,false\n\
             Oats,Food,,,100.5,3,TRUE\n",
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Tent");
        assert_eq!(items[0].manufacturer.as_deref(), Some("Zpacks"));
        assert_eq!(items[0].weight, 539.0);
        assert!(!items[0].consumable);
        assert_eq!(items[1].manufacturer, None);
        assert_eq!(items[1].weight, 100.5);
        assert_eq!(items[1].quantity, 3);
        assert!(items[1].consumable);
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn test_headers_case_insensitive_and_reordered() {
        let items = parse(" Weight , NAME ,Category\n250,Pad,Sleep\n");
        assert_eq!(items[0].name, "Pad");
        assert_eq!(items[0].category, "Sleep");
        assert_eq!(items[0].weight, 250.0);
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn test_defaults_for_missing_values() {
        let items = parse("name,category,weight,quantity\n,,abc,zero\n");
        assert_eq!(items[0].name, "Unknown Item");
        assert_eq!(items[0].category, "Miscellaneous");
        assert_eq!(items[0].weight, 0.0);
        assert_eq!(items[0].quantity, 1);
        assert!(!items[0].consumable);
    }

    #[test]
    fn test_missing_columns_use_defaults() {
        let items = parse("product\nX-Mid\n");
        assert_eq!(items[0].name, "Unknown Item");
        assert_eq!(items[0].category, "Miscellaneous");
        assert_eq!(items[0].product.as_deref(), Some("X-Mid"));
        assert_eq!(items[0].weight, 0.0);
    }

    #[test]
    fn test_quantity_leading_integer_and_zero() {
        let items = parse("name,quantity\nA,2.5\nB,0\nC,4 pcs\n");
        let quantities: Vec<u32> = items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![2, 1, 4]);
    }

    #[test]
    fn test_skips_blank_and_short_rows() {
        let items = parse("name,category,weight\nTent,Shelter,500\n\nStakes,Shelter\nPot,Kitchen,110\n");
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tent", "Pot"]);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let items = parse("name,category,weight\n\"Socks, wool\",Clothing,60\n");
        assert_eq!(items[0].name, "Socks, wool");
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(parse_inventory("".as_bytes()), Err(TransferError::MissingHeader)));
    }

    #[test]
    fn test_parse_leading_numbers() {
        assert_eq!(parse_leading_float("120g"), Some(120.0));
        assert_eq!(parse_leading_float("12.5.3"), Some(12.5));
        assert_eq!(parse_leading_float("7."), Some(7.0));
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("g"), None);
        assert_eq!(parse_leading_int("2.5"), Some(2));
        assert_eq!(parse_leading_int("x2"), None);
    }
}
