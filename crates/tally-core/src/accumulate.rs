//! # Accumulator
//!
//! Folds every purchase record into per-seller statistics.
//!
//! ## Single Pass
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sellers ──► SellerLedger (one SellerStats per seller, id → slot)      │
//! │  products ─► sku → &Product                                            │
//! │                                                                         │
//! │  for record in purchase_records:                                       │
//! │      stats = ledger[record.seller_id]        ── UnknownSeller?          │
//! │      stats.sales_count += 1                                            │
//! │      stats.revenue     += record.total_amount                          │
//! │      for item in record.items:                                         │
//! │          product = catalogue[item.sku]       ── UnknownProduct?         │
//! │          profit  = revenue(item, product) − purchase_price × quantity  │
//! │          stats.profit += profit                                        │
//! │          stats.products_sold[sku] += quantity                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first unknown reference aborts the fold; the partially filled ledger
//! is dropped with the error. Sums are exact and checked: a total that leaves
//! the decimal range aborts the fold with `ReportError::Overflow`.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{ReferenceError, ReportError, ReportResult};
use crate::money::Money;
use crate::policy::RevenuePolicy;
use crate::types::{Product, PurchaseRecord, Seller, TopProduct};

// =============================================================================
// Seller Stats
// =============================================================================

/// Running totals for one seller.
///
/// Counts and sums only move forward while records are folded in. `bonus`
/// stays zero until the ranker sets it.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStats {
    pub id: String,
    /// First and last name joined by a space.
    pub name: String,
    /// Number of purchase records attributed to this seller.
    pub sales_count: usize,
    /// Sum of purchase record totals, unrounded.
    pub revenue: Money,
    /// Sum of line item profits, unrounded.
    pub profit: Money,
    pub bonus: Money,
    /// Cumulative quantity per sku, in first-sold order.
    products_sold: Vec<TopProduct>,
    sku_slots: HashMap<String, usize>,
}

impl SellerStats {
    /// Fresh, zeroed stats for a seller.
    pub fn new(seller: &Seller) -> Self {
        SellerStats {
            id: seller.id.clone(),
            name: seller.display_name(),
            sales_count: 0,
            revenue: Money::zero(),
            profit: Money::zero(),
            bonus: Money::zero(),
            products_sold: Vec::new(),
            sku_slots: HashMap::new(),
        }
    }

    /// Counts one purchase record and adds its total to revenue.
    pub fn record_purchase(&mut self, total_amount: Money) -> ReportResult<()> {
        self.revenue = self
            .revenue
            .checked_add(total_amount)
            .ok_or_else(|| self.out_of_range("revenue"))?;
        self.sales_count += 1;
        Ok(())
    }

    /// Adds one line item's profit and quantity.
    ///
    /// Nothing is updated when either total would leave its range.
    pub fn record_item(&mut self, sku: &str, quantity: i64, profit: Money) -> ReportResult<()> {
        let profit = self
            .profit
            .checked_add(profit)
            .ok_or_else(|| self.out_of_range("profit"))?;

        match self.sku_slots.get(sku) {
            Some(&slot) => {
                let sold = &mut self.products_sold[slot].quantity;
                *sold = sold.checked_add(quantity).ok_or_else(|| {
                    ReportError::overflow(format!("quantity of '{sku}' sold by seller '{}'", self.id))
                })?;
            }
            None => {
                self.sku_slots.insert(sku.to_string(), self.products_sold.len());
                self.products_sold.push(TopProduct {
                    sku: sku.to_string(),
                    quantity,
                });
            }
        }

        self.profit = profit;
        Ok(())
    }

    fn out_of_range(&self, total: &str) -> ReportError {
        ReportError::overflow(format!("{total} of seller '{}'", self.id))
    }

    /// Every sku this seller sold with its cumulative quantity.
    pub fn products_sold(&self) -> &[TopProduct] {
        &self.products_sold
    }

    /// Cumulative quantity sold of `sku`, zero if never sold.
    pub fn quantity_sold(&self, sku: &str) -> i64 {
        self.sku_slots
            .get(sku)
            .map(|&slot| self.products_sold[slot].quantity)
            .unwrap_or(0)
    }
}

// =============================================================================
// Seller Ledger
// =============================================================================

/// All sellers' stats in input order, indexed by seller id.
///
/// When two sellers share an id the later one owns the index entry; the
/// earlier one keeps its (untouched) row.
#[derive(Debug, Clone)]
pub struct SellerLedger {
    stats: Vec<SellerStats>,
    index: HashMap<String, usize>,
}

impl SellerLedger {
    pub fn new(sellers: &[Seller]) -> Self {
        let stats: Vec<SellerStats> = sellers.iter().map(SellerStats::new).collect();
        let mut index = HashMap::with_capacity(stats.len());

        for (slot, seller) in stats.iter().enumerate() {
            if index.insert(seller.id.clone(), slot).is_some() {
                debug!(seller_id = %seller.id, "duplicate seller id, later entry wins");
            }
        }

        SellerLedger { stats, index }
    }

    pub fn get(&self, seller_id: &str) -> Option<&SellerStats> {
        self.index.get(seller_id).map(|&slot| &self.stats[slot])
    }

    fn get_mut(&mut self, seller_id: &str) -> Option<&mut SellerStats> {
        match self.index.get(seller_id) {
            Some(&slot) => Some(&mut self.stats[slot]),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SellerStats> {
        self.stats.iter()
    }

    /// Releases the stats in seller input order.
    pub fn into_stats(self) -> Vec<SellerStats> {
        self.stats
    }
}

// =============================================================================
// Accumulation
// =============================================================================

/// Builds the sku → product index. Later duplicates win.
fn index_products(products: &[Product]) -> HashMap<&str, &Product> {
    let mut catalogue = HashMap::with_capacity(products.len());
    for product in products {
        if catalogue.insert(product.sku.as_str(), product).is_some() {
            debug!(sku = %product.sku, "duplicate sku, later entry wins");
        }
    }
    catalogue
}

/// Folds all purchase records into a ledger.
///
/// ## Errors
/// - [`ReferenceError::UnknownSeller`] if a record names a seller not in `sellers`
/// - [`ReferenceError::UnknownProduct`] if a line item names a sku not in `products`
pub fn accumulate(
    sellers: &[Seller],
    products: &[Product],
    purchase_records: &[PurchaseRecord],
    revenue: &dyn RevenuePolicy,
) -> ReportResult<SellerLedger> {
    let mut ledger = SellerLedger::new(sellers);
    let catalogue = index_products(products);

    debug!(
        sellers = ledger.len(),
        products = catalogue.len(),
        records = purchase_records.len(),
        "indexed sellers and products"
    );

    for (record_idx, record) in purchase_records.iter().enumerate() {
        let stats = ledger
            .get_mut(&record.seller_id)
            .ok_or_else(|| ReferenceError::UnknownSeller {
                seller_id: record.seller_id.clone(),
                record: record_idx,
            })?;

        stats.record_purchase(record.total_amount)?;

        for item in &record.items {
            let product =
                catalogue
                    .get(item.sku.as_str())
                    .ok_or_else(|| ReferenceError::UnknownProduct {
                        sku: item.sku.clone(),
                        record: record_idx,
                    })?;

            let line_out_of_range = || {
                ReportError::overflow(format!(
                    "line item '{}' of purchase record {record_idx}",
                    item.sku
                ))
            };
            let cost = product.cost_of(item.quantity).ok_or_else(line_out_of_range)?;
            let line_revenue = revenue
                .line_revenue(item, product)
                .ok_or_else(line_out_of_range)?;
            let line_profit = line_revenue
                .checked_sub(cost)
                .ok_or_else(line_out_of_range)?;

            trace!(
                seller_id = %record.seller_id,
                sku = %item.sku,
                quantity = item.quantity,
                revenue = %line_revenue,
                cost = %cost,
                profit = %line_profit,
                "line item folded"
            );

            stats.record_item(&item.sku, item.quantity, line_profit)?;
        }
    }

    Ok(ledger)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::SimpleRevenue;
    use crate::types::{LineItem, Rate};
    use rust_decimal::Decimal;

    fn seller(id: &str) -> Seller {
        Seller {
            id: id.to_string(),
            first_name: format!("{}-first", id),
            last_name: format!("{}-last", id),
        }
    }

    fn product(sku: &str, cost_cents: i64) -> Product {
        Product {
            sku: sku.to_string(),
            purchase_price: Money::from_cents(cost_cents),
            name: None,
            sale_price: None,
        }
    }

    fn item(sku: &str, quantity: i64, price_cents: i64, discount_bps: u32) -> LineItem {
        LineItem {
            sku: sku.to_string(),
            quantity,
            sale_price: Money::from_cents(price_cents),
            discount: Rate::from_bps(discount_bps),
        }
    }

    fn record(seller_id: &str, total_cents: i64, items: Vec<LineItem>) -> PurchaseRecord {
        PurchaseRecord {
            seller_id: seller_id.to_string(),
            total_amount: Money::from_cents(total_cents),
            items,
            receipt_id: None,
            customer_id: None,
            date: None,
        }
    }

    #[test]
    fn test_record_item_tallies_in_first_seen_order() {
        let mut stats = SellerStats::new(&seller("s1"));
        stats.record_item("B", 2, Money::from_cents(100)).unwrap();
        stats.record_item("A", 1, Money::from_cents(-30)).unwrap();
        stats.record_item("B", 3, Money::from_cents(50)).unwrap();

        assert_eq!(stats.profit, Money::from_cents(120));
        assert_eq!(stats.quantity_sold("B"), 5);
        assert_eq!(stats.quantity_sold("A"), 1);
        assert_eq!(stats.quantity_sold("Z"), 0);
        let skus: Vec<&str> = stats.products_sold().iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["B", "A"]);
    }

    #[test]
    fn test_record_item_out_of_range_leaves_stats_untouched() {
        let mut stats = SellerStats::new(&seller("s1"));
        stats.record_item("A", i64::MAX, Money::zero()).unwrap();
        stats.record_item("B", 1, Money::new(Decimal::MAX)).unwrap();

        let err = stats.record_item("A", 1, Money::zero()).unwrap_err();
        assert!(matches!(err, ReportError::Overflow { ref context } if context.contains("'A'")));
        assert_eq!(stats.quantity_sold("A"), i64::MAX);

        let err = stats.record_item("C", 1, Money::from_cents(100)).unwrap_err();
        assert_eq!(err.to_string(), "Amount out of range: profit of seller 's1'");
        assert_eq!(stats.quantity_sold("C"), 0);
        assert_eq!(stats.profit, Money::new(Decimal::MAX));
    }

    #[test]
    fn test_record_purchase_out_of_range() {
        let mut stats = SellerStats::new(&seller("s1"));
        stats.record_purchase(Money::new(Decimal::MAX)).unwrap();

        assert!(stats.record_purchase(Money::from_cents(100)).is_err());
        assert_eq!(stats.sales_count, 1);
    }

    #[test]
    fn test_accumulate_sums_per_seller() {
        let sellers = vec![seller("s1"), seller("s2")];
        let products = vec![product("SKU1", 1000), product("SKU2", 500)];
        let records = vec![
            record("s1", 10000, vec![item("SKU1", 2, 2000, 1000)]),
            record("s2", 5000, vec![item("SKU2", 5, 1000, 0)]),
            record("s1", 2550, vec![item("SKU2", 1, 1000, 0), item("SKU1", 1, 2000, 0)]),
        ];

        let ledger = accumulate(&sellers, &products, &records, &SimpleRevenue).unwrap();

        let s1 = ledger.get("s1").unwrap();
        assert_eq!(s1.name, "s1-first s1-last");
        assert_eq!(s1.sales_count, 2);
        assert_eq!(s1.revenue, Money::from_cents(12550));
        // 36.00 − 20.00 + 10.00 − 5.00 + 20.00 − 10.00
        assert_eq!(s1.profit, Money::from_cents(3100));
        assert_eq!(s1.quantity_sold("SKU1"), 3);
        assert_eq!(s1.quantity_sold("SKU2"), 1);

        let s2 = ledger.get("s2").unwrap();
        assert_eq!(s2.sales_count, 1);
        assert_eq!(s2.profit, Money::from_cents(2500));
        assert!(s2.bonus.is_zero());
    }

    #[test]
    fn test_accumulate_keeps_profit_unrounded() {
        let sellers = vec![seller("s1")];
        let products = vec![product("SKU1", 0)];
        let lines = (0..3).map(|_| item("SKU1", 1, 15, 1000)).collect();
        let records = vec![record("s1", 45, lines)];

        let ledger = accumulate(&sellers, &products, &records, &SimpleRevenue).unwrap();
        // 3 × 0.135
        assert_eq!(ledger.get("s1").unwrap().profit, Money::new(Decimal::new(405, 3)));
    }

    #[test]
    fn test_accumulate_keeps_sellers_without_sales() {
        let sellers = vec![seller("idle"), seller("busy")];
        let products = vec![product("SKU1", 100)];
        let records = vec![record("busy", 300, vec![item("SKU1", 1, 300, 0)])];

        let ledger = accumulate(&sellers, &products, &records, &SimpleRevenue).unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(!ledger.is_empty());

        let idle = ledger.get("idle").unwrap();
        assert_eq!(idle.sales_count, 0);
        assert!(idle.revenue.is_zero());
        assert!(idle.products_sold().is_empty());

        let ids: Vec<String> = ledger.into_stats().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["idle", "busy"]);
    }

    #[test]
    fn test_accumulate_unknown_seller_fails() {
        let sellers = vec![seller("s1")];
        let products = vec![product("SKU1", 100)];
        let records = vec![
            record("s1", 100, vec![item("SKU1", 1, 200, 0)]),
            record("ghost", 100, vec![item("SKU1", 1, 200, 0)]),
        ];

        let err = accumulate(&sellers, &products, &records, &SimpleRevenue).unwrap_err();
        match err {
            ReportError::Reference(ReferenceError::UnknownSeller { seller_id, record }) => {
                assert_eq!(seller_id, "ghost");
                assert_eq!(record, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_accumulate_unknown_sku_fails() {
        let sellers = vec![seller("s1")];
        let products = vec![product("SKU1", 100)];
        let records = vec![record(
            "s1",
            100,
            vec![item("SKU1", 1, 200, 0), item("NOPE", 1, 200, 0)],
        )];

        let err = accumulate(&sellers, &products, &records, &SimpleRevenue).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Reference(ReferenceError::UnknownProduct { ref sku, record: 0 }) if sku == "NOPE"
        ));
    }

    #[test]
    fn test_accumulate_line_out_of_range_fails() {
        let sellers = vec![seller("s1")];
        let products = vec![product("SKU1", 100)];
        let mut huge = item("SKU1", i64::MAX, 0, 0);
        huge.sale_price = Money::from_f64(1e15).unwrap();
        let records = vec![record("s1", 100, vec![huge])];

        let err = accumulate(&sellers, &products, &records, &SimpleRevenue).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Overflow { ref context } if context == "line item 'SKU1' of purchase record 0"
        ));
    }

    #[test]
    fn test_accumulate_uses_supplied_revenue_policy() {
        let sellers = vec![seller("s1")];
        let products = vec![product("SKU1", 100)];
        let records = vec![record("s1", 0, vec![item("SKU1", 3, 999, 5000)])];
        let flat = |_: &LineItem, _: &Product| Some(Money::from_cents(1000));

        let ledger = accumulate(&sellers, &products, &records, &flat).unwrap();
        assert_eq!(ledger.get("s1").unwrap().profit, Money::from_cents(700));
    }

    #[test]
    fn test_accumulate_policy_out_of_range_fails() {
        let sellers = vec![seller("s1")];
        let products = vec![product("SKU1", 100)];
        let records = vec![record("s1", 0, vec![item("SKU1", 1, 999, 0)])];
        let overflowing = |_: &LineItem, _: &Product| -> Option<Money> { None };

        let err = accumulate(&sellers, &products, &records, &overflowing).unwrap_err();
        assert!(matches!(err, ReportError::Overflow { .. }));
    }

    #[test]
    fn test_duplicate_seller_id_later_entry_accumulates() {
        let mut first = seller("dup");
        first.first_name = "First".to_string();
        let mut second = seller("dup");
        second.first_name = "Second".to_string();
        let products = vec![product("SKU1", 0)];
        let records = vec![record("dup", 500, vec![item("SKU1", 1, 500, 0)])];

        let ledger = accumulate(&[first, second], &products, &records, &SimpleRevenue).unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.get("dup").unwrap().name.starts_with("Second"));

        let stats = ledger.into_stats();
        assert_eq!(stats[0].sales_count, 0);
        assert_eq!(stats[1].sales_count, 1);
    }
}
