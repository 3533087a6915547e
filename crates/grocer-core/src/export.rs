//! # Export Renderer
//!
//! Lays out a cart snapshot as a paginated, printable shopping list.
//!
//! ## Page Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Groceries (18-10-2026)                  ◄── title, first page only     │
//! │                                                                         │
//! │  Sr. No  Name                 Quantity        Price   ◄── every page    │
//! │  ──────────────────────────────────────────────────────                 │
//! │  1.      Milk                 2 l                                       │
//! │  2.      Eggs                 12 pcs                                    │
//! │  ...     (at most PAGE_CAPACITY rows)                                   │
//! │  ──────────────────────────────────────────────────────  ◄── last page │
//! │                                                     Page 1 of 1         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pagination
//! Rows are emitted in cart order. A per-page counter starts at zero; when it
//! reaches [`PAGE_CAPACITY`] a new page is opened, the header is redrawn and
//! the counter resets. Sequence numbers keep counting across pages.
//!
//! ## Determinism
//! The reference date is an argument, never read from the clock. The same
//! snapshot and date always give the same pages and the same name.
//!
//! ## Price Column
//! The header reserves a price column, but cart entries carry no price, so
//! every row leaves it empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::CartEntry;
use crate::PAGE_CAPACITY;

/// Column titles drawn at the top of every page.
pub const HEADER_COLUMNS: [&str; 4] = ["Sr. No", "Name", "Quantity", "Price"];

/// Prefix of every exported artifact name.
pub const DOCUMENT_NAME_PREFIX: &str = "groceries_list";

const PAGE_BREAK: &str = "\u{000C}";
const COLUMN_WIDTHS: [usize; 3] = [8, 36, 20];
const PRICE_WIDTH: usize = 10;

// =============================================================================
// Document Model
// =============================================================================

/// One data row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    /// 1-based, continuous across the whole document.
    pub sequence: usize,
    pub name: String,
    /// `"{quantity} {measure_unit}"`.
    pub quantity: String,
    /// Reserved; always `None` until the catalog supplies prices.
    pub price: Option<String>,
}

/// One printed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportPage {
    /// 1-based page number.
    pub number: usize,
    pub header: Vec<String>,
    pub rows: Vec<ExportRow>,
    /// True on the last page only.
    pub closing_separator: bool,
}

impl ExportPage {
    fn new(number: usize) -> Self {
        ExportPage {
            number,
            header: HEADER_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            closing_separator: false,
        }
    }
}

/// Output encodings for an [`ExportDocument`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Fixed-width text, pages separated by form feeds.
    #[default]
    Text,
    /// The document model as pretty JSON.
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }
}

/// A rendered, read-only shopping list.
///
/// Built by [`ExportRenderer::render`]; regenerate rather than patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Identifying name, e.g. `groceries_list_5Oct2026`.
    pub name: String,
    /// Heading printed on the first page, e.g. `Groceries (05-10-2026)`.
    pub title: String,
    #[ts(as = "String")]
    pub reference_date: NaiveDate,
    pub pages: Vec<ExportPage>,
}

impl ExportDocument {
    pub fn pages(&self) -> &[ExportPage] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All data rows across pages, in order.
    pub fn rows(&self) -> impl Iterator<Item = &ExportRow> {
        self.pages.iter().flat_map(|p| p.rows.iter())
    }

    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }

    /// File name for the artifact in the given format.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.name, format.extension())
    }

    /// Encodes the document in the given format.
    pub fn encode(&self, format: ExportFormat) -> CoreResult<String> {
        match format {
            ExportFormat::Text => Ok(self.to_text()),
            ExportFormat::Json => self.to_json(),
        }
    }

    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(CoreError::from)
    }

    /// Renders the printable text form.
    pub fn to_text(&self) -> String {
        let rule = "-".repeat(COLUMN_WIDTHS.iter().sum::<usize>() + PRICE_WIDTH);
        let total = self.page_count();

        let pages: Vec<String> = self
            .pages
            .iter()
            .map(|page| {
                let mut out = String::new();
                if page.number == 1 {
                    out.push_str(&self.title);
                    out.push_str("\n\n");
                }

                let column = |i: usize| page.header.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&text_line(column(0), column(1), column(2), column(3)));
                out.push_str(&rule);
                out.push('\n');

                for row in &page.rows {
                    out.push_str(&text_line(
                        &format!("{}.", row.sequence),
                        &row.name,
                        &row.quantity,
                        row.price.as_deref().unwrap_or(""),
                    ));
                }

                if page.closing_separator {
                    out.push_str(&rule);
                    out.push('\n');
                }

                let footer = format!("Page {} of {}", page.number, total);
                out.push_str(&format!("{:>width$}\n", footer, width = rule.len()));
                out
            })
            .collect();

        pages.join(PAGE_BREAK)
    }
}

/// Lays out one row. Cells longer than their column wrap onto continuation
/// lines; nothing is cut.
fn text_line(seq: &str, name: &str, quantity: &str, price: &str) -> String {
    let cells = [
        wrap(seq, COLUMN_WIDTHS[0]),
        wrap(name, COLUMN_WIDTHS[1]),
        wrap(quantity, COLUMN_WIDTHS[2]),
        wrap(price, PRICE_WIDTH),
    ];
    let height = cells.iter().map(Vec::len).max().unwrap_or(1);

    let mut out = String::new();
    for i in 0..height {
        let cell = |c: usize| cells[c].get(i).map(String::as_str).unwrap_or("");
        let line = format!(
            "{:<w0$}{:<w1$}{:<w2$}{}",
            cell(0),
            cell(1),
            cell(2),
            cell(3),
            w0 = COLUMN_WIDTHS[0],
            w1 = COLUMN_WIDTHS[1],
            w2 = COLUMN_WIDTHS[2],
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Greedy word wrap leaving one space before the next column. Words longer
/// than the column are split.
fn wrap(value: &str, width: usize) -> Vec<String> {
    let limit = width.saturating_sub(1).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in value.split_whitespace() {
        let mut rest = word;
        loop {
            let used = current.chars().count();
            let len = rest.chars().count();
            let needed = if used == 0 { len } else { used + 1 + len };
            if needed <= limit {
                if used > 0 {
                    current.push(' ');
                }
                current.push_str(rest);
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            let split = rest
                .char_indices()
                .nth(limit)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            lines.push(rest[..split].to_string());
            rest = &rest[split..];
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Renderer
// =============================================================================

/// Builds [`ExportDocument`]s from cart snapshots.
#[derive(Debug, Clone, Copy)]
pub struct ExportRenderer {
    page_capacity: usize,
}

impl Default for ExportRenderer {
    fn default() -> Self {
        ExportRenderer {
            page_capacity: PAGE_CAPACITY,
        }
    }
}

impl ExportRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    /// Lays out `entries` for `reference_date`.
    ///
    /// An empty snapshot is valid and yields a single page with the header,
    /// the closing separator and no rows.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use grocer_core::export::ExportRenderer;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
    /// let doc = ExportRenderer::new().render(&[], date);
    ///
    /// assert_eq!(doc.page_count(), 1);
    /// assert_eq!(doc.row_count(), 0);
    /// assert_eq!(doc.name, "groceries_list_5Oct2026");
    /// ```
    pub fn render(&self, entries: &[CartEntry], reference_date: NaiveDate) -> ExportDocument {
        let mut pages = Vec::new();
        let mut current = ExportPage::new(1);
        let mut counter = 0;

        for (index, entry) in entries.iter().enumerate() {
            if counter == self.page_capacity {
                let number = current.number + 1;
                pages.push(std::mem::replace(&mut current, ExportPage::new(number)));
                counter = 0;
            }
            current.rows.push(ExportRow {
                sequence: index + 1,
                name: entry.name.clone(),
                quantity: entry.quantity_label(),
                price: None,
            });
            counter += 1;
        }

        current.closing_separator = true;
        pages.push(current);

        ExportDocument {
            name: document_name(reference_date),
            title: document_title(reference_date),
            reference_date,
            pages,
        }
    }
}

// =============================================================================
// Naming
// =============================================================================

/// Compact day-month-year name: `groceries_list_5Oct2026`.
///
/// Day has no padding and the month is a letter abbreviation, so distinct
/// dates always give distinct names.
pub fn document_name(date: NaiveDate) -> String {
    format!("{}_{}", DOCUMENT_NAME_PREFIX, date.format("%-d%b%Y"))
}

/// First-page heading: `Groceries (05-10-2026)`.
pub fn document_title(date: NaiveDate) -> String {
    format!("Groceries ({})", date.format("%d-%m-%Y"))
}

/// Parses a reference date typed as `dd-mm-yyyy` (or ISO `yyyy-mm-dd`).
pub fn parse_reference_date(input: &str) -> CoreResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| CoreError::InvalidDate {
            input: input.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
