//! # Policy Module
//!
//! Pluggable revenue and bonus formulas.
//!
//! ## Where Policies Plug In
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Accumulator ── for each line item ──► RevenuePolicy(item, product)    │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                            line profit = revenue − purchase_price × qty │
//! │                                                                         │
//! │  Ranker ── for each rank index i ──► BonusPolicy(i, total, stats)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Policies must be pure: no side effects, same output for equal inputs.
//! Any `Fn` closure of the right shape is a policy, so callers can pass an
//! ad-hoc formula without declaring a type.
//!
//! A policy returns exact, unrounded money and `None` when its result does
//! not fit (the `checked_*` methods on [`Money`] compose with `?`). The run
//! then fails with `ReportError::Overflow`. Rounding to the cent is left to
//! the projector.
//!
//! ## Example
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::policy::ReportOptions;
//! use tally_core::types::{LineItem, Product};
//!
//! // Revenue ignoring discounts entirely
//! let options = ReportOptions::reference().with_revenue(|item: &LineItem, _: &Product| {
//!     item.sale_price.checked_mul_quantity(item.quantity)
//! });
//! assert!(options.revenue_policy().is_some());
//! ```

use std::fmt;

use crate::accumulate::SellerStats;
use crate::money::Money;
use crate::types::{LineItem, Product, Rate};

// =============================================================================
// Revenue Policy
// =============================================================================

/// Computes the money charged for one line item.
pub trait RevenuePolicy: Send + Sync {
    fn line_revenue(&self, item: &LineItem, product: &Product) -> Option<Money>;
}

impl<F> RevenuePolicy for F
where
    F: Fn(&LineItem, &Product) -> Option<Money> + Send + Sync,
{
    fn line_revenue(&self, item: &LineItem, product: &Product) -> Option<Money> {
        self(item, product)
    }
}

/// Reference revenue formula: `sale_price × (1 − discount/100) × quantity`.
///
/// Exact: `0.15` at 10% off is `0.135`.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::policy::{RevenuePolicy, SimpleRevenue};
/// use tally_core::types::{LineItem, Product, Rate};
///
/// let item = LineItem {
///     sku: "SKU1".to_string(),
///     quantity: 2,
///     sale_price: Money::from_cents(2000),
///     discount: Rate::from_bps(1000),
/// };
/// let product = Product {
///     sku: "SKU1".to_string(),
///     purchase_price: Money::from_cents(1000),
///     name: None,
///     sale_price: None,
/// };
/// assert_eq!(SimpleRevenue.line_revenue(&item, &product), Some(Money::from_cents(3600)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenuePolicy for SimpleRevenue {
    fn line_revenue(&self, item: &LineItem, _product: &Product) -> Option<Money> {
        item.sale_price
            .checked_mul_quantity(item.quantity)?
            .checked_discount(item.discount)
    }
}

// =============================================================================
// Bonus Policy
// =============================================================================

/// Computes a seller's bonus from their zero-based profit rank.
///
/// `index` is the final rank, `total` the number of ranked sellers.
/// `stats.profit` is the exact, unrounded profit.
pub trait BonusPolicy: Send + Sync {
    fn bonus(&self, index: usize, total: usize, stats: &SellerStats) -> Option<Money>;
}

impl<F> BonusPolicy for F
where
    F: Fn(usize, usize, &SellerStats) -> Option<Money> + Send + Sync,
{
    fn bonus(&self, index: usize, total: usize, stats: &SellerStats) -> Option<Money> {
        self(index, total, stats)
    }
}

/// Reference bonus policy: a share of profit decided by rank.
///
/// ## Precedence (first match wins)
/// ```text
/// ┌────────────────────────┬──────────────────────────────────────────────┐
/// │ rank index             │ bonus                                        │
/// ├────────────────────────┼──────────────────────────────────────────────┤
/// │ 0                      │ profit × top (15%)                           │
/// │ 1 or 2                 │ profit × podium (10%)                        │
/// │ total − 1              │ 0  (only reachable when total > 3)           │
/// │ anything else          │ profit × standard (5%)                       │
/// └────────────────────────┴──────────────────────────────────────────────┘
/// ```
/// With three or fewer sellers the last one is also in the podium, so nobody
/// gets the zero bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusByProfit {
    pub top: Rate,
    pub podium: Rate,
    pub standard: Rate,
}

impl Default for BonusByProfit {
    fn default() -> Self {
        BonusByProfit {
            top: Rate::from_bps(1500),
            podium: Rate::from_bps(1000),
            standard: Rate::from_bps(500),
        }
    }
}

impl BonusPolicy for BonusByProfit {
    fn bonus(&self, index: usize, total: usize, stats: &SellerStats) -> Option<Money> {
        let profit = stats.profit;

        if index == 0 {
            return profit.checked_apply_rate(self.top);
        }

        if index == 1 || index == 2 {
            return profit.checked_apply_rate(self.podium);
        }

        if index + 1 == total {
            return Some(Money::zero());
        }

        profit.checked_apply_rate(self.standard)
    }
}

// =============================================================================
// Report Options
// =============================================================================

/// The pair of policies a report run needs.
///
/// Both slots start empty; a run with either slot empty fails validation.
#[derive(Default)]
pub struct ReportOptions {
    revenue: Option<Box<dyn RevenuePolicy>>,
    bonus: Option<Box<dyn BonusPolicy>>,
}

impl ReportOptions {
    /// Options with no policies set.
    pub fn new() -> Self {
        ReportOptions::default()
    }

    /// Options wired with [`SimpleRevenue`] and [`BonusByProfit`].
    pub fn reference() -> Self {
        ReportOptions::new()
            .with_revenue(SimpleRevenue)
            .with_bonus(BonusByProfit::default())
    }

    pub fn with_revenue<P: RevenuePolicy + 'static>(mut self, policy: P) -> Self {
        self.revenue = Some(Box::new(policy));
        self
    }

    pub fn with_bonus<P: BonusPolicy + 'static>(mut self, policy: P) -> Self {
        self.bonus = Some(Box::new(policy));
        self
    }

    pub fn revenue_policy(&self) -> Option<&dyn RevenuePolicy> {
        self.revenue.as_deref()
    }

    pub fn bonus_policy(&self) -> Option<&dyn BonusPolicy> {
        self.bonus.as_deref()
    }
}

impl fmt::Debug for ReportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportOptions")
            .field("revenue", &self.revenue.is_some())
            .field("bonus", &self.bonus.is_some())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
