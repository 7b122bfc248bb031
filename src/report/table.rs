//! Plain-text tables

use super::{display_width, pad_to_width};

/// Render rows under a header, columns padded to the widest cell
///
/// Columns listed in `right_align` are right-aligned (numbers).
pub fn render_table(headers: &[&str], rows: &[Vec<String>], right_align: &[usize]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(display_width(cell));
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(headers.iter().copied(), &widths, right_align));
    out.push('\n');

    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&separator.join("-+-"));
    out.push('\n');

    for row in rows {
        out.push_str(&format_row(row.iter().map(String::as_str), &widths, right_align));
        out.push('\n');
    }
    out
}

fn format_row<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
    right_align: &[usize],
) -> String {
    cells
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &w))| {
            if right_align.contains(&i) {
                format!("{}{}", " ".repeat(w.saturating_sub(display_width(cell))), cell)
            } else {
                pad_to_width(cell, w)
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table() {
        let rows = vec![
            vec!["1".to_string(), "포기김치".to_string(), "31".to_string()],
            vec!["2".to_string(), "된장국".to_string(), "7".to_string()],
        ];
        let table = render_table(&["#", "메뉴", "빈도"], &rows, &[0, 2]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "# | 메뉴     | 빈도");
        assert_eq!(lines[1], "--+----------+-----");
        assert_eq!(lines[2], "1 | 포기김치 |   31");
        assert_eq!(lines[3], "2 | 된장국   |    7");
    }
}
