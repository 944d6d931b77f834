//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing line profits as floats:                                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ drifts across thousands of rows │
//! │                                                                         │
//! │  THE EARLY ROUNDING PROBLEM                                             │
//! │                                                                         │
//! │  Rounding every line to the cent:                                       │
//! │    0.15 × 90% = 0.135 → 0.14, three lines = 0.42  ❌ (exact: 0.405)    │
//! │                                                                         │
//! │  OUR SOLUTION: Exact Base-10 Amounts                                    │
//! │    Decimal input is converted ONCE at the JSON boundary, unrounded.     │
//! │    Sums, products and percentages stay exact (checked, no wrapping).    │
//! │    Rounding to the cent happens once, when a report row is built:      │
//! │    0.135 + 0.135 + 0.135 = 0.405 → 0.41  ✅                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::types::Rate;
//!
//! let price = Money::from_cents(2000); // 20.00
//! let line = price.checked_mul_quantity(2).unwrap(); // 40.00
//! let revenue = line.checked_discount(Rate::from_bps(1000)).unwrap();
//! assert_eq!(revenue, Money::from_cents(3600)); // 36.00
//! ```
//!
//! ## Serialization
//! On the wire `Money` is a plain decimal number in major units (`36.5`),
//! matching the dataset and report JSON.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major units, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal, not f64**: sums of prices like `15.99` stay exact
/// - **Signed**: profit goes negative when items sell below cost
/// - **Checked arithmetic only**: an amount that leaves the representable
///   range is reported as `None`, never wrapped or panicked on
/// - **Ord**: sellers are ranked directly on `Money` profit
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PurchaseRecord.total_amount ─────────────► SellerStats.revenue         │
/// │                                                                         │
/// │  LineItem.sale_price ──► RevenuePolicy ──┐                              │
/// │                                          ├──► line profit ──► profit   │
/// │  Product.purchase_price × quantity ──────┘                    │         │
/// │                                                               ▼         │
/// │                                          BonusPolicy ──► SellerStats.bonus
/// │                                                                         │
/// │  SellerStats ──► round_to_cents() ──► ReportRow                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from a float in major units.
    ///
    /// The float is read as its shortest decimal form (`0.15` is exactly
    /// `0.15`), without rounding to the cent. Returns `None` for NaN,
    /// infinities and magnitudes beyond the decimal range.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_f64(15.99).unwrap();
    /// assert_eq!(price, Money::from_cents(1599));
    /// assert!(Money::from_f64(f64::NAN).is_none());
    /// ```
    pub fn from_f64(amount: f64) -> Option<Self> {
        decimal_from_f64(amount).map(Money)
    }

    /// The exact amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount rounded to the cent, in cents.
    ///
    /// Saturates at the `i64` bounds.
    pub fn cents(&self) -> i64 {
        self.round_to_cents()
            .0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .unwrap_or(if self.0.is_sign_negative() {
                i64::MIN
            } else {
                i64::MAX
            })
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to two decimals, half away from zero.
    ///
    /// ```text
    ///   0.405 → 0.41     -0.405 → -0.41
    ///   0.404 → 0.40     -0.404 → -0.40
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tally_core::money::Money;
    ///
    /// let exact = Money::new(Decimal::new(22365, 3)); // 22.365
    /// assert_eq!(exact.round_to_cents(), Money::from_cents(2237));
    /// ```
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiplies a unit amount by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_cost = Money::from_cents(299);
    /// assert_eq!(unit_cost.checked_mul_quantity(3), Some(Money::from_cents(897)));
    /// ```
    pub fn checked_mul_quantity(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Returns `rate` of this amount, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::Rate;
    ///
    /// let profit = Money::from_cents(2500); // 25.00
    /// let bonus = profit.checked_apply_rate(Rate::from_bps(1500)); // 15%
    /// assert_eq!(bonus, Some(Money::from_cents(375))); // 3.75
    /// ```
    pub fn checked_apply_rate(self, rate: Rate) -> Option<Money> {
        self.0.checked_mul(rate.fraction()).map(Money)
    }

    /// Returns the amount left after taking `discount` off, unrounded.
    ///
    /// Discounts below zero or above 100% are applied as given.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::Rate;
    ///
    /// let gross = Money::from_cents(10000); // 100.00
    /// let net = gross.checked_discount(Rate::from_bps(1250)); // 12.5% off
    /// assert_eq!(net, Some(Money::from_cents(8750)));
    /// ```
    pub fn checked_discount(self, discount: Rate) -> Option<Money> {
        let remaining = Decimal::ONE.checked_sub(discount.fraction())?;
        self.0.checked_mul(remaining).map(Money)
    }
}

/// Reads a float as the decimal it prints as.
pub(crate) fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    // f64 Display is the shortest string that reads back to the same float
    value.to_string().parse::<Decimal>().ok()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, no currency symbol (currency is out of scope).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.round_to_cents().0;
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded.rescale(2);
        write!(f, "{}", rounded)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let amount = self
            .0
            .to_f64()
            .ok_or_else(|| S::Error::custom("monetary amount has no float form"))?;
        serializer.serialize_f64(amount)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_f64(amount)
            .ok_or_else(|| D::Error::custom("monetary amount must be a finite number in range"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
