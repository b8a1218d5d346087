// ─────────────────────────────────────────────────────────────────
// Referral Commission - three-level fixed-rate distribution
// ─────────────────────────────────────────────────────────────────
// Level 1: 10%   Level 2: 5%   Level 3: 2%   (17% of each payment)
//
// Amounts are per referring account. Each level is rounded to the cent
// on its own; rounding drift between levels is not redistributed.
// ─────────────────────────────────────────────────────────────────

use crate::account::Account;
use crate::{
    apply_bps, ensure_rate_at_most_whole, CalcError, BPS_DENOMINATOR, COMMISSION_LEVELS,
    LEVEL1_COMMISSION_BPS, LEVEL2_COMMISSION_BPS, LEVEL3_COMMISSION_BPS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommissionLevel {
    /// 1-based referral depth
    pub level: u8,
    pub rate_bps: u32,
}

impl CommissionLevel {
    pub const fn new(level: u8, rate_bps: u32) -> Self {
        Self { level, rate_bps }
    }
}

/// Per-level commission in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CommissionPayout {
    pub level1: u64,
    pub level2: u64,
    pub level3: u64,
    pub total_distributed: u64,
}

impl CommissionPayout {
    pub fn by_level(&self) -> [u64; COMMISSION_LEVELS] {
        [self.level1, self.level2, self.level3]
    }
}

/// Standard 10% / 5% / 2% levels.
pub const STANDARD_LEVELS: [CommissionLevel; COMMISSION_LEVELS] = [
    CommissionLevel::new(1, LEVEL1_COMMISSION_BPS),
    CommissionLevel::new(2, LEVEL2_COMMISSION_BPS),
    CommissionLevel::new(3, LEVEL3_COMMISSION_BPS),
];

/// Distribute `payment` (cents) across the three referral levels.
///
/// Fails with `InvalidInput` if any rate is above 100% or the levels together
/// exceed u64 cents.
pub fn distribute_commission(
    payment: u64,
    levels: &[CommissionLevel; COMMISSION_LEVELS],
) -> Result<CommissionPayout, CalcError> {
    for lvl in levels {
        ensure_rate_at_most_whole(lvl.rate_bps, &format!("level {} rate", lvl.level))?;
    }

    let level1 = apply_bps(payment, levels[0].rate_bps);
    let level2 = apply_bps(payment, levels[1].rate_bps);
    let level3 = apply_bps(payment, levels[2].rate_bps);
    let total_distributed = level1
        .checked_add(level2)
        .and_then(|t| t.checked_add(level3))
        .ok_or_else(|| {
            CalcError::InvalidInput("commission total overflows u64 cents".to_string())
        })?;

    Ok(CommissionPayout {
        level1,
        level2,
        level3,
        total_distributed,
    })
}

/// Aggregate commission an account earns from one payment made by every
/// referral in its network: each level's per-referral amount multiplied by the
/// account's referral count at that level.
pub fn network_commission(
    payment: u64,
    account: &Account,
    levels: &[CommissionLevel; COMMISSION_LEVELS],
) -> Result<CommissionPayout, CalcError> {
    let per_referral = distribute_commission(payment, levels)?;
    let counts = account.referral_counts();

    let scale = |amount: u64, count: u32| -> Result<u64, CalcError> {
        amount.checked_mul(count as u64).ok_or_else(|| {
            CalcError::InvalidInput("network commission overflows u64 cents".to_string())
        })
    };
    let level1 = scale(per_referral.level1, counts[0])?;
    let level2 = scale(per_referral.level2, counts[1])?;
    let level3 = scale(per_referral.level3, counts[2])?;
    let total_distributed = level1
        .checked_add(level2)
        .and_then(|t| t.checked_add(level3))
        .ok_or_else(|| {
            CalcError::InvalidInput("network commission overflows u64 cents".to_string())
        })?;

    Ok(CommissionPayout {
        level1,
        level2,
        level3,
        total_distributed,
    })
}

/// A validated commission table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommissionSchedule {
    levels: [CommissionLevel; COMMISSION_LEVELS],
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl CommissionSchedule {
    pub fn standard() -> Self {
        Self {
            levels: STANDARD_LEVELS,
        }
    }

    /// Validate a table: levels numbered 1, 2, 3 in order, each rate within
    /// 0..=100%, and the rates together not exceeding 100% of the payment.
    pub fn new(levels: [CommissionLevel; COMMISSION_LEVELS]) -> Result<Self, CalcError> {
        for (i, lvl) in levels.iter().enumerate() {
            if lvl.level as usize != i + 1 {
                return Err(CalcError::Configuration(format!(
                    "commission level at position {} is numbered {}",
                    i + 1,
                    lvl.level
                )));
            }
            if lvl.rate_bps > BPS_DENOMINATOR {
                return Err(CalcError::Configuration(format!(
                    "level {} rate {} bps exceeds 100%",
                    lvl.level, lvl.rate_bps
                )));
            }
        }
        let sum: u32 = levels.iter().map(|l| l.rate_bps).sum();
        if sum > BPS_DENOMINATOR {
            return Err(CalcError::Configuration(format!(
                "commission rates sum to {} bps, more than the payment",
                sum
            )));
        }
        Ok(Self { levels })
    }

    /// Build from a slice (e.g. a config file), which must hold exactly three levels.
    pub fn from_slice(levels: &[CommissionLevel]) -> Result<Self, CalcError> {
        let arr: [CommissionLevel; COMMISSION_LEVELS] = levels.try_into().map_err(|_| {
            CalcError::Configuration(format!(
                "expected {} commission levels, found {}",
                COMMISSION_LEVELS,
                levels.len()
            ))
        })?;
        Self::new(arr)
    }

    pub fn levels(&self) -> &[CommissionLevel; COMMISSION_LEVELS] {
        &self.levels
    }

    pub fn total_rate_bps(&self) -> u32 {
        self.levels.iter().map(|l| l.rate_bps).sum()
    }

    pub fn distribute(&self, payment: u64) -> Result<CommissionPayout, CalcError> {
        distribute_commission(payment, &self.levels)
    }

    pub fn network(&self, payment: u64, account: &Account) -> Result<CommissionPayout, CalcError> {
        network_commission(payment, account, &self.levels)
    }
}
