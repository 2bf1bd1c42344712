//! # Export
//!
//! Renderers for a finished takeoff. The engine's item list is passed
//! through verbatim; these functions only format it.
//!
//! - [`to_csv`] - spreadsheet-friendly CSV (opens in Excel)
//! - [`render_table`] - aligned plain text for terminals
//! - [`render_print_view`] - the table with a dated header and disclaimer
//! - [`TakeoffReport`] - JSON document with project name and timestamp

use std::borrow::Cow;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::MaterialItem;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::file_io::atomic_write;
use crate::project::TakeoffProject;

const CSV_HEADERS: [&str; 4] = ["Description", "Quantity", "Unit", "Notes"];

/// Footer printed under every material list
pub const ESTIMATE_DISCLAIMER: &str =
    "Estimate only. Verify against plans and applicable code (e.g. IRC span tables).";

/// Quote a CSV field if it contains a comma, quote, or newline.
pub fn escape_csv(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// One header row plus one row per item, `\n`-separated, no trailing newline.
///
/// ```rust
/// use takeoff_core::calculations::MaterialItem;
/// use takeoff_core::export::to_csv;
///
/// let items = vec![MaterialItem::lineal_feet("2x10 rim joist", 70)];
/// assert_eq!(to_csv(&items), "Description,Quantity,Unit,Notes\n2x10 rim joist,70,lin ft,");
/// ```
pub fn to_csv(items: &[MaterialItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    for item in items {
        let quantity = item.quantity.to_string();
        let fields = [
            escape_csv(&item.description),
            escape_csv(&quantity),
            escape_csv(item.unit.as_str()),
            escape_csv(item.notes.as_deref().unwrap_or("")),
        ];
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

/// Write the CSV for `items` to `path` atomically.
pub fn write_csv(path: &Path, items: &[MaterialItem]) -> TakeoffResult<()> {
    atomic_write(path, to_csv(items).as_bytes())?;
    tracing::info!(path = %path.display(), rows = items.len(), "wrote CSV export");
    Ok(())
}

/// `lumberly-{name}-{date}.csv`, or `lumberly-materials-{date}.csv` without a name.
///
/// Characters other than ASCII letters, digits, `-`, and `_` become `-`.
pub fn export_file_name(project_name: Option<&str>, date: NaiveDate) -> String {
    let base = match project_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => {
            let sanitized: String = name
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
                .collect();
            format!("lumberly-{}", sanitized)
        }
        None => "lumberly-materials".to_string(),
    };
    format!("{}-{}.csv", base, date.format("%Y-%m-%d"))
}

/// Aligned text table. Sub-items keep their leading indent.
pub fn render_table(items: &[MaterialItem]) -> String {
    let headers = CSV_HEADERS;
    let quantities: Vec<String> = items.iter().map(|i| i.quantity.to_string()).collect();

    let desc_width = items
        .iter()
        .map(|i| i.description.chars().count())
        .chain([headers[0].len()])
        .max()
        .unwrap_or(0);
    let qty_width = quantities.iter().map(String::len).chain([headers[1].len()]).max().unwrap_or(0);
    let unit_width = items
        .iter()
        .map(|i| i.unit.as_str().len())
        .chain([headers[2].len()])
        .max()
        .unwrap_or(0);

    let row = |desc: &str, qty: &str, unit: &str, notes: &str| {
        let line = format!(
            "{:<dw$}  {:>qw$}  {:<uw$}  {}",
            desc,
            qty,
            unit,
            notes,
            dw = desc_width,
            qw = qty_width,
            uw = unit_width
        );
        line.trim_end().to_string()
    };

    let mut out = Vec::with_capacity(items.len() + 2);
    out.push(row(headers[0], headers[1], headers[2], headers[3]));
    out.push("-".repeat(desc_width + qty_width + unit_width + 6 + headers[3].len()));
    for (item, qty) in items.iter().zip(&quantities) {
        out.push(row(&item.description, qty, item.unit.as_str(), item.notes.as_deref().unwrap_or("")));
    }
    out.join("\n")
}

/// Printable material list: title, date line, table, and the estimate disclaimer.
///
/// ```rust
/// use chrono::NaiveDate;
/// use takeoff_core::calculations::MaterialItem;
/// use takeoff_core::export::render_print_view;
///
/// let items = vec![MaterialItem::lineal_feet("2x10 rim joist", 70)];
/// let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
/// let page = render_print_view(&items, Some("Smith Garage"), date);
/// assert!(page.starts_with("Lumberly - Smith Garage\nMaterial List - 2026-10-15\n"));
/// ```
pub fn render_print_view(items: &[MaterialItem], project_name: Option<&str>, date: NaiveDate) -> String {
    let title = match project_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Lumberly - {}", name),
        None => "Lumberly".to_string(),
    };
    format!(
        "{}\nMaterial List - {}\n\n{}\n\n{}",
        title,
        date.format("%Y-%m-%d"),
        render_table(items),
        ESTIMATE_DISCLAIMER
    )
}

/// JSON export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeoffReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job_id: String,
    pub generated: DateTime<Utc>,
    pub items: Vec<MaterialItem>,
}

impl TakeoffReport {
    pub fn new(project: &TakeoffProject, items: Vec<MaterialItem>) -> Self {
        TakeoffReport {
            project_name: project.name().map(str::to_string),
            job_id: project.meta.job_id.clone(),
            generated: Utc::now(),
            items,
        }
    }

    pub fn to_json(&self) -> TakeoffResult<String> {
        serde_json::to_string_pretty(self).map_err(TakeoffError::serialization)
    }
}
