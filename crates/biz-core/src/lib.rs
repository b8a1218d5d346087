// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BIZCHAIN - CORE MODULE
//
// Compensation plan engines: checkout pricing, referral commission, daily
// return schedule, global pool shares, salary ranks, wallet split, orders.
// All money is carried as u64 cents and all rates as u32 basis points.
// Every engine is a pure function over immutable inputs (no floating-point).
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod account;
pub mod catalog;
pub mod commission;
pub mod daily_return;
pub mod ladder;
pub mod money;
pub mod order;
pub mod plan_config;
pub mod pool;
pub mod pricing;
pub mod salary;
pub mod wallet;

pub use account::Account;
pub use catalog::{Catalog, Product};
pub use commission::{CommissionLevel, CommissionPayout, CommissionSchedule};
pub use daily_return::{DailyReturnSchedule, DailyReturnTier};
pub use order::{Order, OrderStatus};
pub use plan_config::{CompensationPlan, PlanConfig};
pub use pool::{PoolContributionSplit, PoolRank};
pub use pricing::CheckoutQuote;
pub use salary::SalaryRank;
pub use wallet::{WalletSplit, WithdrawalPolicy};

/// 1 USD = 100 cents
pub const CENTS_PER_USD: u64 = 100;

/// 10_000 basis points = 100%
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Basis points in one whole percent
pub const BPS_PER_PERCENT: u32 = 100;

// ─────────────────────────────────────────────────────────────────
// STANDARD PLAN CONSTANTS
// ─────────────────────────────────────────────────────────────────
// Checkout:    10% member discount on top of the product discount
// Referrals:   10% / 5% / 2% across three levels (17% total)
// Daily:       1% .. 4% per day over a 130-day auto-renewing cycle
// Pool:        Bronze (5) .. Diamond (100) referrals, 15% .. 60% share
//              $0.50 paid in by every new member
// Withdrawal:  $50 minimum, 10% processing fee
// ─────────────────────────────────────────────────────────────────

/// Member discount applied at checkout: 10%
pub const MEMBER_DISCOUNT_BPS: u32 = 1_000;

/// Level 1 referral commission: 10%
pub const LEVEL1_COMMISSION_BPS: u32 = 1_000;
/// Level 2 referral commission: 5%
pub const LEVEL2_COMMISSION_BPS: u32 = 500;
/// Level 3 referral commission: 2%
pub const LEVEL3_COMMISSION_BPS: u32 = 200;

/// Number of referral levels that earn commission
pub const COMMISSION_LEVELS: usize = 3;

/// Pool contribution made by each new member on joining: $0.50
pub const JOINING_CONTRIBUTION_CENTS: u64 = 50;

/// Smallest withdrawal accepted: $50
pub const MIN_WITHDRAWAL_CENTS: u64 = 5_000;
/// Processing fee taken from each withdrawal: 10%
pub const WITHDRAWAL_FEE_BPS: u32 = 1_000;

/// Length of the daily return cycle in days. After the last day the cycle renews.
pub const DAILY_RETURN_CYCLE_DAYS: u32 = 130;

/// Errors produced by the calculation engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalcError {
    /// Malformed or out-of-range numeric input. The caller must reject it before use.
    InvalidInput(String),
    /// A tier / rank / level table violates its ordering or partition invariant.
    Configuration(String),
    /// Referral count is below the lowest rank of a ladder.
    NotEligible { count: u32, minimum: u32 },
    /// Withdrawal larger than the available balance (cents).
    InsufficientBalance { requested: u64, available: u64 },
    /// Order status change that is not a single forward step.
    InvalidTransition {
        from: order::OrderStatus,
        to: order::OrderStatus,
    },
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Configuration(msg) => write!(f, "Invalid plan configuration: {}", msg),
            Self::NotEligible { count, minimum } => write!(
                f,
                "Not yet eligible: {} referrals (minimum {})",
                count, minimum
            ),
            Self::InsufficientBalance {
                requested,
                available,
            } => write!(
                f,
                "Insufficient balance: requested {} but only {} available",
                money::format_usd(*requested),
                money::format_usd(*available)
            ),
            Self::InvalidTransition { from, to } => {
                write!(f, "Order cannot move from {} to {}", from, to)
            }
        }
    }
}

impl std::error::Error for CalcError {}

/// Multiply an amount in cents by a rate in basis points, rounding half-up to
/// the nearest cent. Intermediate math is u128 so no input can overflow.
pub fn apply_bps(amount_cents: u64, rate_bps: u32) -> u64 {
    let numerator = amount_cents as u128 * rate_bps as u128;
    let denom = BPS_DENOMINATOR as u128;
    let rounded = (numerator + denom / 2) / denom;
    // Rates above 100% can exceed u64; saturate.
    rounded.min(u64::MAX as u128) as u64
}

/// Reject a rate above 100%.
pub(crate) fn ensure_rate_at_most_whole(rate_bps: u32, what: &str) -> Result<(), CalcError> {
    if rate_bps > BPS_DENOMINATOR {
        return Err(CalcError::InvalidInput(format!(
            "{} must be within 0%..=100% (got {} bps)",
            what, rate_bps
        )));
    }
    Ok(())
}

/// Reject a rate of 100% or more.
pub(crate) fn ensure_rate_below_whole(rate_bps: u32, what: &str) -> Result<(), CalcError> {
    if rate_bps >= BPS_DENOMINATOR {
        return Err(CalcError::InvalidInput(format!(
            "{} must be within 0%..100% (got {} bps)",
            what, rate_bps
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_bps_rounds_half_up() {
        // 199.995 -> 200.00
        assert_eq!(apply_bps(199_995, 1_000), 2_000);
        // 0.005 -> 0.01
        assert_eq!(apply_bps(5, 1_000), 1);
        // 0.004 -> 0.00
        assert_eq!(apply_bps(4, 1_000), 0);
    }

    #[test]
    fn test_apply_bps_identity_and_zero() {
        assert_eq!(apply_bps(12_345, BPS_DENOMINATOR), 12_345);
        assert_eq!(apply_bps(12_345, 0), 0);
        assert_eq!(apply_bps(0, 5_000), 0);
    }

    #[test]
    fn test_apply_bps_no_overflow_at_extremes() {
        assert_eq!(apply_bps(u64::MAX, BPS_DENOMINATOR), u64::MAX);
        assert_eq!(apply_bps(u64::MAX, u32::MAX), u64::MAX);
    }

    #[test]
    fn test_standard_commission_sum() {
        assert_eq!(
            LEVEL1_COMMISSION_BPS + LEVEL2_COMMISSION_BPS + LEVEL3_COMMISSION_BPS,
            1_700
        );
    }

    #[test]
    fn test_error_display() {
        let err = CalcError::NotEligible {
            count: 4,
            minimum: 5,
        };
        assert_eq!(err.to_string(), "Not yet eligible: 4 referrals (minimum 5)");

        let err = CalcError::InsufficientBalance {
            requested: 200_000,
            available: 196_542,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: requested $2,000.00 but only $1,965.42 available"
        );
    }
}
