// Weekly salary ranks by direct referrals:
// Pioneer 5 ($100), Explorer 10 ($250), Navigator 25 ($500),
// Champion 50 ($1,000), Maestro 100 ($2,500).

use crate::account::Account;
use crate::ladder::{Rank, RankLadder};
use crate::CalcError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalaryRank {
    pub name: String,
    pub min_direct_referrals: u32,
    /// Weekly salary in cents
    pub weekly_salary: u64,
}

impl SalaryRank {
    pub fn new(name: impl Into<String>, min_direct_referrals: u32, weekly_salary: u64) -> Self {
        Self {
            name: name.into(),
            min_direct_referrals,
            weekly_salary,
        }
    }
}

impl Rank for SalaryRank {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_referrals(&self) -> u32 {
        self.min_direct_referrals
    }
}

pub fn standard_ranks() -> Vec<SalaryRank> {
    vec![
        SalaryRank::new("Pioneer", 5, 10_000),
        SalaryRank::new("Explorer", 10, 25_000),
        SalaryRank::new("Navigator", 25, 50_000),
        SalaryRank::new("Champion", 50, 100_000),
        SalaryRank::new("Maestro", 100, 250_000),
    ]
}

/// Validate a salary table. Higher ranks must not pay less than lower ones.
pub fn salary_ladder(ranks: Vec<SalaryRank>) -> Result<RankLadder<SalaryRank>, CalcError> {
    for pair in ranks.windows(2) {
        if pair[1].weekly_salary < pair[0].weekly_salary {
            return Err(CalcError::Configuration(format!(
                "salary rank '{}' pays less than '{}'",
                pair[1].name, pair[0].name
            )));
        }
    }
    RankLadder::new(ranks)
}

pub fn standard_ladder() -> RankLadder<SalaryRank> {
    RankLadder::from_trusted(standard_ranks())
}

/// Weekly salary for an account, or `NotEligible` below the lowest rank.
pub fn weekly_salary_for(
    account: &Account,
    ranks: &RankLadder<SalaryRank>,
) -> Result<u64, CalcError> {
    ranks
        .rank_for(account.direct_referrals())
        .map(|r| r.weekly_salary)
}
