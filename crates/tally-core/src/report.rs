//! # Report Entry Point
//!
//! Wires the four stages together.
//!
//! ```text
//! ┌──────────┐   ┌─────────────┐   ┌────────┐   ┌───────────┐
//! │ validate │──►│ accumulate  │──►│  rank  │──►│  project  │──► Vec<ReportRow>
//! └──────────┘   └─────────────┘   └────────┘   └───────────┘
//!   Validation      Reference      Overflow
//!   Error           Error /
//!                   Overflow
//! ```
//!
//! Every invocation owns its own ledger; nothing is shared between calls.

use tracing::{debug, info_span};

use crate::accumulate::accumulate;
use crate::error::{ReportError, ReportResult};
use crate::money::Money;
use crate::policy::ReportOptions;
use crate::project::project;
use crate::rank::rank;
use crate::types::{Dataset, ReportRow};
use crate::validation::validate;

/// Computes the seller performance report.
///
/// `None` for either argument is a validation failure, mirroring a caller
/// that has no dataset or no options to hand over.
///
/// ## Errors
/// - `ReportError::Validation` when the dataset or options are incomplete
/// - `ReportError::Reference` when a record names an unknown seller or sku
/// - `ReportError::Overflow` when a total leaves the decimal range
///
/// ## Example
/// ```rust
/// use tally_core::{analyze_sales_data, Dataset, ReportOptions};
///
/// let options = ReportOptions::reference();
/// assert!(analyze_sales_data(Some(&Dataset::default()), Some(&options)).is_err());
/// ```
pub fn analyze_sales_data(
    dataset: Option<&Dataset>,
    options: Option<&ReportOptions>,
) -> ReportResult<Vec<ReportRow>> {
    let _span = info_span!("analyze_sales_data").entered();

    let input = validate(dataset, options)?;
    let view = input.dataset;

    let ledger = accumulate(
        view.sellers,
        view.products,
        view.purchase_records,
        input.policies.revenue,
    )?;
    let ranked = rank(ledger.into_stats(), input.policies.bonus)?;
    let rows = project(ranked);

    debug!(
        sellers = rows.len(),
        records = view.purchase_records.len(),
        "report computed"
    );

    Ok(rows)
}

// =============================================================================
// Sales Report
// =============================================================================

/// A computed report plus the column totals used by renderers.
///
/// Totals add up the rounded row values, so they match what a reader of the
/// report would get by summing the printed column.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    rows: Vec<ReportRow>,
    total_revenue: Money,
    total_profit: Money,
    total_bonus: Money,
}

impl SalesReport {
    /// Runs [`analyze_sales_data`] for callers that hold both inputs.
    pub fn generate(dataset: &Dataset, options: &ReportOptions) -> ReportResult<Self> {
        let rows = analyze_sales_data(Some(dataset), Some(options))?;

        let total_revenue = column_total(&rows, "revenue", |row| row.revenue)?;
        let total_profit = column_total(&rows, "profit", |row| row.profit)?;
        let total_bonus = column_total(&rows, "bonus", |row| row.bonus)?;

        Ok(SalesReport {
            rows,
            total_revenue,
            total_profit,
            total_bonus,
        })
    }

    /// Rows in rank order.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_revenue(&self) -> Money {
        self.total_revenue
    }

    pub fn total_profit(&self) -> Money {
        self.total_profit
    }

    pub fn total_bonus(&self) -> Money {
        self.total_bonus
    }
}

fn column_total(
    rows: &[ReportRow],
    column: &str,
    value: impl Fn(&ReportRow) -> Money,
) -> ReportResult<Money> {
    rows.iter()
        .try_fold(Money::zero(), |total, row| total.checked_add(value(row)))
        .ok_or_else(|| ReportError::overflow(format!("report total {column}")))
}
