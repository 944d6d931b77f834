//! Report rendering.
//!
//! ## JSON
//! ```json
//! {
//!   "generated_at": "2026-10-16T09:30:00Z",
//!   "sellers": 2,
//!   "report": [ { "seller_id": "S2", "revenue": 50.0, ... } ]
//! }
//! ```
//!
//! ## Table
//! ```text
//!  #  seller     name        revenue    profit  sales    bonus  top sku
//!  1  S2         C D           50.00     25.00      1     3.75  SKU2 ×5
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tally_core::{ReportRow, SalesReport};

use crate::config::OutputFormat;
use crate::error::AppResult;

/// JSON document written for `--format json`.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub generated_at: DateTime<Utc>,
    pub sellers: usize,
    pub report: &'a [ReportRow],
}

/// Renders the report in the requested format.
pub fn render(
    report: &SalesReport,
    format: OutputFormat,
    pretty: bool,
    generated_at: DateTime<Utc>,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => render_json(report, pretty, generated_at),
        OutputFormat::Table => Ok(render_table(report)),
    }
}

fn render_json(report: &SalesReport, pretty: bool, generated_at: DateTime<Utc>) -> AppResult<String> {
    let envelope = ReportEnvelope {
        generated_at,
        sellers: report.len(),
        report: report.rows(),
    };

    let mut out = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    out.push('\n');
    Ok(out)
}

fn render_table(report: &SalesReport) -> String {
    let mut out = format!(
        "{:>3}  {:<10} {:<20} {:>12} {:>12} {:>6} {:>10}  {}\n",
        "#", "seller", "name", "revenue", "profit", "sales", "bonus", "top sku"
    );

    for (rank, row) in report.rows().iter().enumerate() {
        let top = row
            .top_products
            .first()
            .map(|p| format!("{} ×{}", p.sku, p.quantity))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!(
            "{:>3}  {:<10} {:<20} {:>12} {:>12} {:>6} {:>10}  {}\n",
            rank + 1,
            row.seller_id,
            row.name,
            row.revenue.to_string(),
            row.profit.to_string(),
            row.sales_count,
            row.bonus.to_string(),
            top
        ));
    }

    out.push_str(&format!(
        "{:>3}  {:<10} {:<20} {:>12} {:>12} {:>6} {:>10}\n",
        "",
        "total",
        "",
        report.total_revenue().to_string(),
        report.total_profit().to_string(),
        "",
        report.total_bonus().to_string()
    ));

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
