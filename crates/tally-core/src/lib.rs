//! # tally-core: Seller Performance Engine
//!
//! Computes a per-seller sales report from a batch of purchase records:
//! gross revenue, net profit, a rank-based bonus and each seller's
//! best-selling products. Pure functions, zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              tally-report (CLI) / any other caller              │   │
//! │  │     load JSON ──► Dataset        Vec<ReportRow> ──► render      │   │
//! │  └─────────────────────────────┬───────────────────────────▲───────┘   │
//! │                                │                           │           │
//! │  ┌─────────────────────────────▼───────────────────────────┴───────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   validation ──► accumulate ──► rank ──► project                │   │
//! │  │        ▲              ▲           ▲                             │   │
//! │  │        │        RevenuePolicy  BonusPolicy   (policy)           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PRINTING • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Dataset and report types
//! - [`money`] - Money type with exact decimal arithmetic
//! - [`error`] - Validation and reference errors
//! - [`validation`] - Dataset/options checks
//! - [`policy`] - Revenue and bonus strategies
//! - [`accumulate`], [`rank`], [`project`] - Engine stages
//! - [`report`] - Entry point
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{analyze_sales_data, Dataset, ReportOptions};
//!
//! let json = r#"{
//!     "sellers": [
//!         {"id": "S1", "first_name": "A", "last_name": "B"},
//!         {"id": "S2", "first_name": "C", "last_name": "D"}
//!     ],
//!     "products": [
//!         {"sku": "SKU1", "purchase_price": 10},
//!         {"sku": "SKU2", "purchase_price": 5}
//!     ],
//!     "purchase_records": [
//!         {"seller_id": "S1", "total_amount": 100,
//!          "items": [{"sku": "SKU1", "quantity": 2, "sale_price": 20, "discount": 10}]},
//!         {"seller_id": "S2", "total_amount": 50,
//!          "items": [{"sku": "SKU2", "quantity": 5, "sale_price": 10, "discount": 0}]}
//!     ],
//!     "customers": [{"id": "C1"}]
//! }"#;
//!
//! let dataset = Dataset::from_json(json).unwrap();
//! let report = analyze_sales_data(dataset.as_ref(), Some(&ReportOptions::reference())).unwrap();
//!
//! assert_eq!(report[0].seller_id, "S2");
//! assert_eq!(report[0].bonus.cents(), 375); // 3.75
//! assert_eq!(report[1].profit.cents(), 1600); // 16.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accumulate;
pub mod error;
pub mod money;
pub mod policy;
pub mod project;
pub mod rank;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use accumulate::{SellerLedger, SellerStats};
pub use error::{ReferenceError, ReportError, ReportResult, ValidationError};
pub use money::Money;
pub use policy::{BonusByProfit, BonusPolicy, ReportOptions, RevenuePolicy, SimpleRevenue};
pub use report::{analyze_sales_data, SalesReport};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of entries in a report row's `top_products`.
pub const MAX_TOP_PRODUCTS: usize = 10;
