//! # Domain Types
//!
//! Input and output types of the seller performance report.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (Dataset)                                                        │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Seller       │   │    Product      │   │  PurchaseRecord     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  sku (unique)   │   │  seller_id (FK)     │   │
//! │  │  first_name     │   │  purchase_price │   │  total_amount       │   │
//! │  │  last_name      │   └─────────────────┘   │  items: LineItem[]  │   │
//! │  └─────────────────┘                         └─────────────────────┘   │
//! │                                                                         │
//! │  OUTPUT                                                                 │
//! │  ┌─────────────────────────────┐   ┌─────────────────┐                 │
//! │  │  ReportRow                  │   │   TopProduct    │                 │
//! │  │  seller_id, name, revenue,  │──►│   sku, quantity │ (≤ 10)          │
//! │  │  profit, sales_count, bonus │   └─────────────────┘                 │
//! │  └─────────────────────────────┘                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input types ignore unknown fields so catalogue exports with extra columns
//! (names, dates, receipt ids) decode without preprocessing.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{decimal_from_f64, Money};

// =============================================================================
// Rate
// =============================================================================

/// A share of an amount, held as an exact fraction (15% is `0.15`).
///
/// On the wire a rate is a percent number (`12.5` means 12.5%). Bonus shares
/// are usually written in basis points: 1 bps = 0.01%, so 15% is 1500 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::new(i64::from(bps), 4))
    }

    /// Creates a rate from a percentage, exactly.
    ///
    /// Negative percentages and percentages above 100 are kept as given.
    /// Returns `None` for non-finite or out-of-range input.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::types::Rate;
    ///
    /// assert_eq!(Rate::from_percentage(12.5), Some(Rate::from_bps(1250)));
    /// assert!(Rate::from_percentage(f64::NAN).is_none());
    /// ```
    pub fn from_percentage(pct: f64) -> Option<Self> {
        decimal_from_f64(pct)?.checked_div(Decimal::ONE_HUNDRED).map(Rate)
    }

    /// The rate as a fraction of one.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pct = self
            .0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|pct| pct.to_f64())
            .ok_or_else(|| S::Error::custom("rate has no float form"))?;
        serializer.serialize_f64(pct)
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pct = f64::deserialize(deserializer)?;
        Rate::from_percentage(pct)
            .ok_or_else(|| D::Error::custom("percentage must be a finite number in range"))
    }
}

// =============================================================================
// Seller
// =============================================================================

/// A person who executes sales. Subject of one report row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Seller {
    /// Display name: first and last name joined by a space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalogue entry. Only the cost basis matters to the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stock Keeping Unit - unique business identifier.
    pub sku: String,

    /// Cost basis per unit.
    pub purchase_price: Money,

    /// Display name, if the catalogue carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Catalogue list price. Informational; line items carry the actual price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Money>,
}

impl Product {
    /// Cost basis of `quantity` units, `None` if it does not fit.
    #[inline]
    pub fn cost_of(&self, quantity: i64) -> Option<Money> {
        self.purchase_price.checked_mul_quantity(quantity)
    }
}

// =============================================================================
// Purchase Record
// =============================================================================

/// One product line within a purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    /// Units sold. Whole numbers only: a fractional quantity such as `1.5`
    /// fails decoding as `Malformed` rather than being truncated.
    pub quantity: i64,
    /// Unit price charged before discount.
    pub sale_price: Money,
    /// Discount percent (`10` is 10% off), absent means none. Applied
    /// exactly; values below 0 or above 100 are not clamped.
    #[serde(default)]
    pub discount: Rate,
}

/// One transaction executed by one seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub seller_id: String,
    /// Amount charged for the whole receipt.
    pub total_amount: Money,
    pub items: Vec<LineItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record. Required to be present in a dataset, otherwise opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

// =============================================================================
// Dataset
// =============================================================================

/// The batch the report is computed over.
///
/// Each collection is optional so a missing one can be reported as a
/// validation failure instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub sellers: Option<Vec<Seller>>,
    #[serde(default)]
    pub products: Option<Vec<Product>>,
    #[serde(default)]
    pub purchase_records: Option<Vec<PurchaseRecord>>,
    #[serde(default)]
    pub customers: Option<Vec<Customer>>,
}

impl Dataset {
    /// Decodes a dataset from JSON.
    ///
    /// Returns `Ok(None)` for a JSON `null` document. A collection of the
    /// wrong JSON type or any other decode failure is `Malformed`.
    pub fn from_json(json: &str) -> Result<Option<Self>, ValidationError> {
        serde_json::from_str::<Option<Dataset>>(json).map_err(|e| ValidationError::Malformed {
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Report Output
// =============================================================================

/// One sku and the cumulative quantity a seller sold of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopProduct {
    pub sku: String,
    #[ts(type = "number")]
    pub quantity: i64,
}

/// One seller's line of the final report, in profit-rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportRow {
    pub seller_id: String,
    pub name: String,
    #[ts(type = "number")]
    pub revenue: Money,
    #[ts(type = "number")]
    pub profit: Money,
    #[ts(type = "number")]
    pub sales_count: usize,
    pub top_products: Vec<TopProduct>,
    #[ts(type = "number")]
    pub bonus: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
