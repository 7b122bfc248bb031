//! Report Rendering
//!
//! Turns dashboard views into terminal output:
//!
//! - `table`: bar chart, ranked table and commentary
//! - `json`: the view serialized as pretty JSON
//! - `csv`: the ranked rows only
//!
//! Column alignment accounts for East Asian wide characters, which take two
//! terminal cells.

pub mod chart;
pub mod table;

pub use chart::render_bar_chart;
pub use table::render_table;

use crate::analysis::{FrequencyEntry, RankedEntry};
use crate::dashboard::{MenuView, RankView};
use crate::dataset::DatasetSummary;
use unicode_width::UnicodeWidthStr;

/// Output format for rendered views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Bar chart plus ranked table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Ranked rows as CSV
    Csv,
}

/// A row that can be charted: a label and a numeric value
pub trait Ranked {
    fn label(&self) -> &str;
    fn value(&self) -> f64;

    /// Value as shown next to the bar and in tables
    fn value_text(&self) -> String;
}

impl Ranked for FrequencyEntry {
    fn label(&self) -> &str {
        &self.item
    }

    fn value(&self) -> f64 {
        self.count as f64
    }

    fn value_text(&self) -> String {
        self.count.to_string()
    }
}

impl Ranked for RankedEntry {
    fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn value_text(&self) -> String {
        format_number(self.value)
    }
}

/// Render errors (serialization only; text rendering cannot fail)
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render a menu frequency view
pub fn render_menu_view(
    view: &MenuView,
    format: OutputFormat,
    bar_width: usize,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)? + "\n"),
        OutputFormat::Csv => ranked_csv(&["menu", "count"], &view.entries),
        OutputFormat::Table => {
            if view.is_empty() {
                return Ok(format!(
                    "⚠ No menu data found for '{}', or too few items to analyze.\n",
                    view.category
                ));
            }

            let mut out = String::new();
            out.push_str(&format!("{} menu frequency, top {}\n\n", view.category, view.top_n));
            out.push_str(&render_bar_chart(&view.entries, bar_width));
            out.push('\n');
            out.push_str(&ranked_table("메뉴", "빈도", &view.entries));

            if view.distinct_items > view.entries.len() {
                out.push_str(&format!(
                    "({} of {} distinct items shown)\n",
                    view.entries.len(),
                    view.distinct_items
                ));
            }

            if let Some(commentary) = &view.commentary {
                out.push_str("\n💡 ");
                out.push_str(commentary);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Render a column ranking view
pub fn render_rank_view(
    view: &RankView,
    format: OutputFormat,
    bar_width: usize,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)? + "\n"),
        OutputFormat::Csv => ranked_csv(&[view.label_column.as_str(), view.value_column.as_str()], &view.entries),
        OutputFormat::Table => {
            if view.entries.is_empty() {
                return Ok(format!("⚠ No numeric values in column '{}'.\n", view.value_column));
            }

            let mut out = String::new();
            out.push_str(&format!(
                "Top {} by {}\n\n",
                view.top_n, view.value_column
            ));
            out.push_str(&render_bar_chart(&view.entries, bar_width));
            out.push('\n');
            out.push_str(&ranked_table(&view.label_column, &view.value_column, &view.entries));
            Ok(out)
        }
    }
}

/// Render a dataset summary
pub fn render_summary(summary: &DatasetSummary, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)? + "\n"),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(&summary.columns)?;
            for row in &summary.preview {
                writer.write_record(row)?;
            }
            finish_csv(writer)
        }
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str(&format!("Rows: {}\n", summary.row_count));
            out.push_str(&format!("Encoding: {}\n", summary.encoding));
            out.push_str(&format!("Columns: {}\n", summary.columns.join(", ")));
            match &summary.period {
                Some(period) => out.push_str(&format!("Period: {}\n", period)),
                None => out.push_str("Period: unknown\n"),
            }

            if !summary.categories.is_empty() {
                out.push_str("\nCategories:\n");
                for c in &summary.categories {
                    out.push_str(&format!("  {} ({} rows)\n", c.category, c.rows));
                }
            }

            if !summary.preview.is_empty() {
                out.push('\n');
                let headers: Vec<&str> = summary.columns.iter().map(String::as_str).collect();
                out.push_str(&render_table(&headers, &summary.preview, &[]));
            }
            Ok(out)
        }
    }
}

/// Render diet categories with their row counts
pub fn render_categories(counts: &[(String, usize)], format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => {
            let list: Vec<_> = counts
                .iter()
                .map(|(category, rows)| serde_json::json!({ "category": category, "rows": rows }))
                .collect();
            Ok(serde_json::to_string_pretty(&list)? + "\n")
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["category", "rows"])?;
            for (category, rows) in counts {
                writer.write_record([category.as_str(), rows.to_string().as_str()])?;
            }
            finish_csv(writer)
        }
        OutputFormat::Table => {
            let body: Vec<Vec<String>> = counts
                .iter()
                .map(|(category, rows)| vec![category.clone(), rows.to_string()])
                .collect();
            Ok(render_table(&["식이구분", "rows"], &body, &[1]))
        }
    }
}

/// Render the selectable type columns
pub fn render_types(types: &[String], format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(types)? + "\n"),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["type"])?;
            for t in types {
                writer.write_record([t])?;
            }
            finish_csv(writer)
        }
        OutputFormat::Table => Ok(types.iter().map(|t| format!("{}\n", t)).collect()),
    }
}

fn ranked_table<T: Ranked>(label_header: &str, value_header: &str, rows: &[T]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| vec![(i + 1).to_string(), r.label().to_string(), r.value_text()])
        .collect();
    render_table(&["#", label_header, value_header], &body, &[0, 2])
}

fn ranked_csv<T: Ranked>(headers: &[&str], rows: &[T]) -> Result<String, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record([row.label(), row.value_text().as_str()])?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String, RenderError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| RenderError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Format a float without trailing zeros (`0.0500` → `0.05`, `12.0` → `12`)
pub fn format_number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Terminal cell width of a string
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad with spaces to a terminal cell width
pub fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(pad))
}
