//! # Ranker
//!
//! Orders sellers by profit and assigns each one a bonus.
//!
//! ## Ordering
//! Descending profit. The sort is stable, so sellers with equal profit keep
//! the order in which they appear in the dataset's seller list.
//!
//! ```text
//!   input:  [s1: 16.00, s2: 25.00, s3: 16.00]
//!   ranked: [s2: 25.00 (0), s1: 16.00 (1), s3: 16.00 (2)]
//! ```
//!
//! Profits are compared unrounded: 16.004 ranks above 16.001 even though
//! both report as 16.00.

use tracing::debug;

use crate::accumulate::SellerStats;
use crate::error::{ReportError, ReportResult};
use crate::policy::BonusPolicy;

/// Sorts `stats` by descending profit and sets `bonus` on every entry.
///
/// The bonus policy sees each seller at its final rank index together with
/// the total number of sellers.
///
/// ## Errors
/// `ReportError::Overflow` if the policy cannot represent a seller's bonus.
pub fn rank(
    mut stats: Vec<SellerStats>,
    policy: &dyn BonusPolicy,
) -> ReportResult<Vec<SellerStats>> {
    stats.sort_by(|a, b| b.profit.cmp(&a.profit));

    let total = stats.len();
    for (index, seller) in stats.iter_mut().enumerate() {
        seller.bonus = policy.bonus(index, total, seller).ok_or_else(|| {
            ReportError::overflow(format!("bonus of seller '{}'", seller.id))
        })?;
        debug!(
            rank = index,
            seller_id = %seller.id,
            profit = %seller.profit,
            bonus = %seller.bonus,
            "seller ranked"
        );
    }

    Ok(stats)
}

// =============================================================================
// Unit Tests
// =============================================================================
