//! Horizontal bar chart
//!
//! Renders ranked rows as text bars scaled to the largest value.

use super::{display_width, pad_to_width, Ranked};

/// Bar glyphs by eighths, for sub-cell resolution
const PARTIAL_BLOCKS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];
const FULL_BLOCK: char = '█';

/// Render a horizontal bar chart
///
/// `width` is the length of the longest bar in terminal cells. Labels are
/// left-aligned in a column sized to the widest label.
pub fn render_bar_chart<T: Ranked>(rows: &[T], width: usize) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let max_value = rows
        .iter()
        .map(Ranked::value)
        .fold(0.0_f64, f64::max);
    let label_width = rows
        .iter()
        .map(|r| display_width(r.label()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        let bar = bar(row.value(), max_value, width);
        out.push_str(&pad_to_width(row.label(), label_width));
        out.push_str(" │");
        out.push_str(&bar);
        out.push(' ');
        out.push_str(&row.value_text());
        out.push('\n');
    }
    out
}

fn bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 || width == 0 {
        return String::new();
    }

    let eighths = ((value / max_value) * (width * 8) as f64).round() as usize;
    let full = eighths / 8;
    let rem = eighths % 8;

    let mut bar: String = std::iter::repeat(FULL_BLOCK).take(full).collect();
    if rem > 0 {
        bar.push(PARTIAL_BLOCKS[rem]);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FrequencyEntry;

    fn entry(item: &str, count: usize) -> FrequencyEntry {
        FrequencyEntry {
            item: item.to_string(),
            count,
        }
    }

    #[test]
    fn test_longest_bar_has_full_width() {
        let rows = vec![entry("포기김치", 10), entry("된장국", 5)];
        let chart = render_bar_chart(&rows, 8);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches(FULL_BLOCK).count(), 8);
        assert_eq!(lines[1].matches(FULL_BLOCK).count(), 4);
        assert!(lines[0].ends_with(" 10"));
    }

    #[test]
    fn test_labels_aligned_by_display_width() {
        let rows = vec![entry("국", 2), entry("계란말이", 1)];
        let chart = render_bar_chart(&rows, 4);
        let bars: Vec<usize> = chart
            .lines()
            .map(|l| display_width(l.split('│').next().unwrap()))
            .collect();

        assert_eq!(bars[0], bars[1]);
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<FrequencyEntry> = Vec::new();
        assert_eq!(render_bar_chart(&rows, 10), "");
    }

    #[test]
    fn test_partial_block() {
        assert_eq!(bar(1.0, 2.0, 3), "█▌");
        assert_eq!(bar(0.0, 2.0, 3), "");
    }
}
