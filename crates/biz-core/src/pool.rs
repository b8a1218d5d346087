// ─────────────────────────────────────────────────────────────────
// Global Pool - contribution allocation and weekly rank shares
// ─────────────────────────────────────────────────────────────────
// Contributions: $0.50 per new member, split
//                60% new joinings / 25% weekly payouts / 15% growth
// Ranks:         Bronze 5+ (15%)   Silver 15+ (25%)   Gold 30+ (35%)
//                Platinum 50+ (45%)   Diamond 100+ (60%)
// Share:         pool_total × rank share, rounded to the cent
//
// Distribution runs weekly (Monday); the trigger lives outside this crate.
// ─────────────────────────────────────────────────────────────────

use crate::account::Account;
use crate::ladder::{Rank, RankLadder};
use crate::{apply_bps, CalcError, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolRank {
    pub name: String,
    pub min_referrals: u32,
    pub pool_share_bps: u32,
}

impl PoolRank {
    pub fn new(name: impl Into<String>, min_referrals: u32, pool_share_bps: u32) -> Self {
        Self {
            name: name.into(),
            min_referrals,
            pool_share_bps,
        }
    }
}

impl Rank for PoolRank {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_referrals(&self) -> u32 {
        self.min_referrals
    }
}

pub fn standard_ranks() -> Vec<PoolRank> {
    vec![
        PoolRank::new("Bronze", 5, 1_500),
        PoolRank::new("Silver", 15, 2_500),
        PoolRank::new("Gold", 30, 3_500),
        PoolRank::new("Platinum", 50, 4_500),
        PoolRank::new("Diamond", 100, 6_000),
    ]
}

/// Validate a pool rank table: ladder ordering plus every share <= 100%.
pub fn pool_ladder(ranks: Vec<PoolRank>) -> Result<RankLadder<PoolRank>, CalcError> {
    if let Some(r) = ranks.iter().find(|r| r.pool_share_bps > BPS_DENOMINATOR) {
        return Err(CalcError::Configuration(format!(
            "pool rank '{}' share {} bps exceeds 100%",
            r.name, r.pool_share_bps
        )));
    }
    RankLadder::new(ranks)
}

pub fn standard_ladder() -> RankLadder<PoolRank> {
    RankLadder::from_trusted(standard_ranks())
}

/// Highest pool rank reached with `count` referrals; `NotEligible` below Bronze.
pub fn rank_for_referral_count(
    count: u32,
    ranks: &RankLadder<PoolRank>,
) -> Result<&PoolRank, CalcError> {
    ranks.rank_for(count)
}

/// Weekly share of the pool (cents) paid to an account holding `rank`.
pub fn weekly_share_amount(pool_total: u64, rank: &PoolRank) -> u64 {
    apply_bps(pool_total, rank.pool_share_bps)
}

/// How each new-member contribution is divided inside the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolContributionSplit {
    pub new_joinings_bps: u32,
    pub weekly_payouts_bps: u32,
    pub growth_bps: u32,
}

/// A contribution divided into its three parts (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolAllocation {
    pub new_joinings: u64,
    pub weekly_payouts: u64,
    pub growth: u64,
}

impl Default for PoolContributionSplit {
    fn default() -> Self {
        Self::standard()
    }
}

impl PoolContributionSplit {
    pub const fn standard() -> Self {
        Self {
            new_joinings_bps: 6_000,
            weekly_payouts_bps: 2_500,
            growth_bps: 1_500,
        }
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        let sum = self.new_joinings_bps as u64
            + self.weekly_payouts_bps as u64
            + self.growth_bps as u64;
        if sum != BPS_DENOMINATOR as u64 {
            return Err(CalcError::Configuration(format!(
                "pool contribution split sums to {} bps, expected {}",
                sum, BPS_DENOMINATOR
            )));
        }
        Ok(())
    }

    /// Divide `contribution` so the three parts always add back up to it.
    pub fn allocate(&self, contribution: u64) -> Result<PoolAllocation, CalcError> {
        self.validate()?;
        let [new_joinings, weekly_payouts, growth] = split_cumulative(
            contribution,
            [self.new_joinings_bps, self.weekly_payouts_bps],
        );
        Ok(PoolAllocation {
            new_joinings,
            weekly_payouts,
            growth,
        })
    }

    /// Allocate the contributions of `new_members` joiners paying
    /// `per_member` cents each.
    pub fn allocate_joinings(
        &self,
        new_members: u64,
        per_member: u64,
    ) -> Result<PoolAllocation, CalcError> {
        let contribution = new_members.checked_mul(per_member).ok_or_else(|| {
            CalcError::InvalidInput("joining contributions overflow u64 cents".to_string())
        })?;
        self.allocate(contribution)
    }
}

/// Split `amount` into three parts: the first two at the given rates, the third
/// taking whatever is left. Rounding is applied to the running total so the
/// parts never add up to more than `amount`.
pub(crate) fn split_cumulative(amount: u64, rates: [u32; 2]) -> [u64; 3] {
    let first = apply_bps(amount, rates[0]);
    let first_two = apply_bps(amount, rates[0] + rates[1]);
    [first, first_two - first, amount - first_two]
}

/// One account's line in a weekly distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolShareEntry {
    pub account_id: String,
    pub referrals: u32,
    /// `None` when the account has not reached the lowest rank
    pub rank: Option<String>,
    pub share_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyDistributionPlan {
    pub pool_total: u64,
    pub entries: Vec<PoolShareEntry>,
    pub eligible_accounts: usize,
    pub skipped_accounts: usize,
    /// Sum of all shares (cents). Rank shares are independent percentages of
    /// the pool, so this can exceed `pool_total`.
    pub total_requested: u128,
}

impl WeeklyDistributionPlan {
    pub fn is_oversubscribed(&self) -> bool {
        self.total_requested > self.pool_total as u128
    }
}

/// Rank every account by direct referrals and compute its weekly share.
/// Accounts below the lowest rank are listed with no rank and a zero share.
pub fn plan_weekly_distribution(
    pool_total: u64,
    ranks: &RankLadder<PoolRank>,
    accounts: &[Account],
) -> WeeklyDistributionPlan {
    let mut entries = Vec::with_capacity(accounts.len());
    let mut eligible_accounts = 0;
    let mut total_requested: u128 = 0;

    for account in accounts {
        let referrals = account.direct_referrals();
        let entry = match ranks.rank_for(referrals) {
            Ok(rank) => {
                let share_amount = weekly_share_amount(pool_total, rank);
                eligible_accounts += 1;
                total_requested += share_amount as u128;
                PoolShareEntry {
                    account_id: account.id.clone(),
                    referrals,
                    rank: Some(rank.name.clone()),
                    share_amount,
                }
            }
            Err(_) => PoolShareEntry {
                account_id: account.id.clone(),
                referrals,
                rank: None,
                share_amount: 0,
            },
        };
        entries.push(entry);
    }

    WeeklyDistributionPlan {
        pool_total,
        skipped_accounts: entries.len() - eligible_accounts,
        entries,
        eligible_accounts,
        total_requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_lookup() {
        let ladder = standard_ladder();
        assert_eq!(rank_for_referral_count(5, &ladder).unwrap().name, "Bronze");
        assert_eq!(rank_for_referral_count(29, &ladder).unwrap().name, "Silver");
        assert_eq!(rank_for_referral_count(30, &ladder).unwrap().name, "Gold");
        assert_eq!(rank_for_referral_count(100, &ladder).unwrap().name, "Diamond");
        assert_eq!(
            rank_for_referral_count(4, &ladder),
            Err(CalcError::NotEligible {
                count: 4,
                minimum: 5
            })
        );
    }

    #[test]
    fn test_weekly_share_gold() {
        let gold = standard_ladder().find("Gold").unwrap().clone();
        assert_eq!(weekly_share_amount(12_548_000, &gold), 4_391_800);
    }

    #[test]
    fn test_pool_ladder_rejects_share_above_whole() {
        let mut ranks = standard_ranks();
        ranks[4].pool_share_bps = 10_001;
        assert!(matches!(
            pool_ladder(ranks),
            Err(CalcError::Configuration(_))
        ));
        assert!(pool_ladder(standard_ranks()).is_ok());
    }

    #[test]
    fn test_contribution_split_sums_exactly() {
        let split = PoolContributionSplit::standard();
        let a = split.allocate(10_000).unwrap();
        assert_eq!(a.new_joinings, 6_000);
        assert_eq!(a.weekly_payouts, 2_500);
        assert_eq!(a.growth, 1_500);

        for amount in [0u64, 1, 3, 7, 99, 12_345, 999_999] {
            let a = split.allocate(amount).unwrap();
            assert_eq!(a.new_joinings + a.weekly_payouts + a.growth, amount);
        }
    }

    #[test]
    fn test_contribution_split_even_halves() {
        let split = PoolContributionSplit {
            new_joinings_bps: 5_000,
            weekly_payouts_bps: 5_000,
            growth_bps: 0,
        };
        let a = split.allocate(1).unwrap();
        assert_eq!(a.new_joinings + a.weekly_payouts + a.growth, 1);
    }

    #[test]
    fn test_contribution_split_must_cover_whole() {
        let split = PoolContributionSplit {
            new_joinings_bps: 5_000,
            weekly_payouts_bps: 3_000,
            growth_bps: 1_000,
        };
        assert!(matches!(
            split.allocate(100),
            Err(CalcError::Configuration(_))
        ));
    }

    #[test]
    fn test_joining_contributions() {
        let split = PoolContributionSplit::standard();
        let one = split
            .allocate_joinings(1, crate::JOINING_CONTRIBUTION_CENTS)
            .unwrap();
        assert_eq!(one.new_joinings, 30);
        assert_eq!(one.weekly_payouts, 13);
        assert_eq!(one.growth, 7);

        let many = split
            .allocate_joinings(2_847, crate::JOINING_CONTRIBUTION_CENTS)
            .unwrap();
        assert_eq!(many.new_joinings, 85_410);
        assert_eq!(many.weekly_payouts, 35_588);
        assert_eq!(many.growth, 21_352);
        assert_eq!(many.new_joinings + many.weekly_payouts + many.growth, 142_350);

        assert!(matches!(
            split.allocate_joinings(u64::MAX, 2),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_weekly_plan() {
        let ladder = standard_ladder();
        let accounts = vec![
            Account::new("a", 10, [4, 0, 0]),
            Account::new("b", 10, [30, 2, 1]),
            Account::new("c", 10, [120, 0, 0]),
        ];
        let plan = plan_weekly_distribution(875_000, &ladder, &accounts);
        assert_eq!(plan.eligible_accounts, 2);
        assert_eq!(plan.skipped_accounts, 1);
        assert_eq!(plan.entries[0].rank, None);
        assert_eq!(plan.entries[0].share_amount, 0);
        assert_eq!(plan.entries[1].rank.as_deref(), Some("Gold"));
        assert_eq!(plan.entries[1].share_amount, 306_250);
        assert_eq!(plan.entries[2].rank.as_deref(), Some("Diamond"));
        assert_eq!(plan.entries[2].share_amount, 525_000);
        assert_eq!(plan.total_requested, 831_250);
        assert!(!plan.is_oversubscribed());
    }

    #[test]
    fn test_weekly_plan_oversubscribed() {
        let ladder = standard_ladder();
        let accounts = vec![
            Account::new("x", 0, [100, 0, 0]),
            Account::new("y", 0, [100, 0, 0]),
        ];
        let plan = plan_weekly_distribution(10_000, &ladder, &accounts);
        assert_eq!(plan.total_requested, 12_000);
        assert!(plan.is_oversubscribed());
    }
}
