//! # Projector
//!
//! Turns ranked seller stats into report rows.
//!
//! This is the only place money is rounded: revenue, profit and bonus go
//! from exact sums to two decimals, half away from zero.

use crate::accumulate::SellerStats;
use crate::types::{ReportRow, TopProduct};
use crate::MAX_TOP_PRODUCTS;

/// Up to `limit` of a seller's products, by descending quantity.
///
/// Equal quantities keep the order in which the skus were first sold.
pub fn top_products(stats: &SellerStats, limit: usize) -> Vec<TopProduct> {
    let mut products = stats.products_sold().to_vec();
    products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    products.truncate(limit);
    products
}

impl From<SellerStats> for ReportRow {
    fn from(stats: SellerStats) -> Self {
        let top_products = top_products(&stats, MAX_TOP_PRODUCTS);
        ReportRow {
            seller_id: stats.id,
            name: stats.name,
            revenue: stats.revenue.round_to_cents(),
            profit: stats.profit.round_to_cents(),
            sales_count: stats.sales_count,
            top_products,
            bonus: stats.bonus.round_to_cents(),
        }
    }
}

/// Projects ranked stats into rows, preserving rank order.
pub fn project(ranked: Vec<SellerStats>) -> Vec<ReportRow> {
    ranked.into_iter().map(ReportRow::from).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
