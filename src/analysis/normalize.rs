//! Menu item normalization
//!
//! Raw menu cells look like `쌀밥+포기김치(1/2)+[특]불고기`. Each item is
//! stripped of parenthesized and bracketed annotations and of `N/M`
//! portion markers, then trimmed.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `(...)`, `[...]` (shortest match) and digit/digit fractions
    static ref ANNOTATION: Regex =
        Regex::new(r"\(.*?\)|\[.*?\]|\d+/\d+").expect("annotation pattern is valid");
}

/// Normalize one raw menu item
///
/// Removal repeats until nothing matches, since stripping one annotation can
/// expose another (`1(소)/2` becomes `1/2`). The result is therefore a fixed
/// point: normalizing it again returns it unchanged.
pub fn normalize_item(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let stripped = ANNOTATION.replace_all(&current, "");
        if stripped == current {
            break;
        }
        current = stripped.into_owned();
    }
    current.trim().to_string()
}

/// Split a meal-slot cell into raw items
pub fn split_items(cell: &str, delimiter: char) -> impl Iterator<Item = &str> {
    cell.split(delimiter)
}

/// Split and normalize every item of a cell
///
/// Empty cells yield nothing. Items that normalize to an empty string are
/// kept; the length filter downstream removes them.
pub fn normalize_cell(cell: &str, delimiter: char) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    split_items(cell, delimiter).map(normalize_item).collect()
}

/// Length of a normalized item in characters
pub fn item_len(item: &str) -> usize {
    item.chars().count()
}
