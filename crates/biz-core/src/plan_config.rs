use crate::account::Account;
use crate::catalog::Product;
use crate::commission::{CommissionLevel, CommissionPayout, CommissionSchedule};
use crate::daily_return::{DailyReturnSchedule, DailyReturnTier};
use crate::ladder::RankLadder;
use crate::pool::{self, PoolAllocation, PoolContributionSplit, PoolRank};
use crate::pricing::{compute_checkout_total, CheckoutQuote};
use crate::salary::{self, SalaryRank};
use crate::wallet::{WalletSplit, WithdrawalPolicy, WithdrawalQuote};
use crate::{daily_return, CalcError, JOINING_CONTRIBUTION_CENTS, MEMBER_DISCOUNT_BPS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable naming a plan file to load instead of the standard plan.
pub const PLAN_FILE_ENV: &str = "BIZ_PLAN_FILE";
/// Environment override for the checkout member discount (basis points).
pub const MEMBER_DISCOUNT_ENV: &str = "BIZ_MEMBER_DISCOUNT_BPS";

/// Compensation plan tables as stored on disk (TOML, or JSON by extension).
/// Every table is optional in the file and falls back to the standard plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    pub member_discount_bps: u32,
    /// Cents each new member pays into the global pool
    pub joining_contribution: u64,
    pub pool_split: PoolContributionSplit,
    pub wallet_split: WalletSplit,
    pub withdrawal: WithdrawalPolicy,
    pub commission_levels: Vec<CommissionLevel>,
    pub daily_return_tiers: Vec<DailyReturnTier>,
    pub pool_ranks: Vec<PoolRank>,
    pub salary_ranks: Vec<SalaryRank>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            member_discount_bps: MEMBER_DISCOUNT_BPS,
            joining_contribution: JOINING_CONTRIBUTION_CENTS,
            pool_split: PoolContributionSplit::standard(),
            wallet_split: WalletSplit::standard(),
            withdrawal: WithdrawalPolicy::standard(),
            commission_levels: crate::commission::STANDARD_LEVELS.to_vec(),
            daily_return_tiers: daily_return::STANDARD_TIERS.to_vec(),
            pool_ranks: pool::standard_ranks(),
            salary_ranks: salary::standard_ranks(),
        }
    }
}

impl PlanConfig {
    /// Load plan config from a TOML file (`.json` files are read as JSON)
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: PlanConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        Ok(config)
    }

    /// Load from `BIZ_PLAN_FILE` if set (standard plan otherwise), then apply
    /// `BIZ_MEMBER_DISCOUNT_BPS`.
    pub fn load_from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// `load_from_env` with variables read through `lookup`.
    pub fn load_with<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(PLAN_FILE_ENV) {
            Some(path) if !path.trim().is_empty() => {
                Self::load_from_file(Path::new(path.trim()))?
            }
            _ => Self::default(),
        };
        config.apply_overrides_from(&lookup)?;
        Ok(config)
    }

    /// Apply overrides, reading each variable through `lookup`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(MEMBER_DISCOUNT_ENV) {
            self.member_discount_bps = raw.trim().parse().map_err(|e| {
                format!(
                    "{} must be an integer bps value: {}",
                    MEMBER_DISCOUNT_ENV, e
                )
            })?;
        }
        Ok(())
    }

    /// Save plan config to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check every table's invariants.
    pub fn validate(&self) -> Result<(), CalcError> {
        self.clone().into_plan().map(|_| ())
    }

    /// Validate and build the engines.
    pub fn into_plan(self) -> Result<CompensationPlan, CalcError> {
        if self.member_discount_bps >= crate::BPS_DENOMINATOR {
            return Err(CalcError::Configuration(format!(
                "member discount {} bps must be below 100%",
                self.member_discount_bps
            )));
        }
        if self.joining_contribution == 0 {
            return Err(CalcError::Configuration(
                "joining contribution must be greater than zero".to_string(),
            ));
        }
        self.pool_split.validate()?;
        self.wallet_split.validate()?;
        self.withdrawal.validate()?;

        Ok(CompensationPlan {
            member_discount_bps: self.member_discount_bps,
            joining_contribution: self.joining_contribution,
            withdrawal: self.withdrawal,
            commission: CommissionSchedule::from_slice(&self.commission_levels)?,
            daily_returns: DailyReturnSchedule::new(self.daily_return_tiers)?,
            pool_ranks: pool::pool_ladder(self.pool_ranks)?,
            salary_ranks: salary::salary_ladder(self.salary_ranks)?,
            pool_split: self.pool_split,
            wallet_split: self.wallet_split,
        })
    }
}

/// Where an account stands today under a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProjection {
    pub account_id: String,
    pub cycle_day: u32,
    pub cycles_completed: u64,
    pub daily_rate_bps: u32,
    pub pool_rank: Option<String>,
    pub salary_rank: Option<String>,
    /// Weekly salary in cents (0 below the lowest salary rank)
    pub weekly_salary: u64,
    /// Referrals still missing for the next pool rank
    pub referrals_to_next_pool_rank: Option<u32>,
}

/// A validated compensation plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompensationPlan {
    pub member_discount_bps: u32,
    pub joining_contribution: u64,
    pub commission: CommissionSchedule,
    pub daily_returns: DailyReturnSchedule,
    pub pool_ranks: RankLadder<PoolRank>,
    pub salary_ranks: RankLadder<SalaryRank>,
    pub pool_split: PoolContributionSplit,
    pub wallet_split: WalletSplit,
    pub withdrawal: WithdrawalPolicy,
}

impl Default for CompensationPlan {
    fn default() -> Self {
        Self::standard()
    }
}

impl CompensationPlan {
    pub fn standard() -> Self {
        Self {
            member_discount_bps: MEMBER_DISCOUNT_BPS,
            joining_contribution: JOINING_CONTRIBUTION_CENTS,
            commission: CommissionSchedule::standard(),
            daily_returns: DailyReturnSchedule::standard(),
            pool_ranks: pool::standard_ladder(),
            salary_ranks: salary::standard_ladder(),
            pool_split: PoolContributionSplit::standard(),
            wallet_split: WalletSplit::standard(),
            withdrawal: WithdrawalPolicy::standard(),
        }
    }

    /// The plan's tables in their on-disk form.
    pub fn to_config(&self) -> PlanConfig {
        PlanConfig {
            member_discount_bps: self.member_discount_bps,
            joining_contribution: self.joining_contribution,
            pool_split: self.pool_split,
            wallet_split: self.wallet_split,
            withdrawal: self.withdrawal,
            commission_levels: self.commission.levels().to_vec(),
            daily_return_tiers: self.daily_returns.tiers().to_vec(),
            pool_ranks: self.pool_ranks.ranks().to_vec(),
            salary_ranks: self.salary_ranks.ranks().to_vec(),
        }
    }

    pub fn checkout(
        &self,
        list_price: u64,
        product_discount_bps: u32,
    ) -> Result<CheckoutQuote, CalcError> {
        compute_checkout_total(list_price, product_discount_bps, self.member_discount_bps)
    }

    pub fn checkout_product(&self, product: &Product) -> Result<CheckoutQuote, CalcError> {
        product.checkout_quote(self.member_discount_bps)
    }

    pub fn commission(&self, payment: u64) -> Result<CommissionPayout, CalcError> {
        self.commission.distribute(payment)
    }

    pub fn network_commission(
        &self,
        payment: u64,
        account: &Account,
    ) -> Result<CommissionPayout, CalcError> {
        self.commission.network(payment, account)
    }

    pub fn rate_for_day(&self, active_days_elapsed: u64) -> u32 {
        self.daily_returns.rate_for_day(active_days_elapsed)
    }

    pub fn pool_rank(&self, referrals: u32) -> Result<&PoolRank, CalcError> {
        pool::rank_for_referral_count(referrals, &self.pool_ranks)
    }

    /// Weekly pool share for an account with `referrals` direct referrals.
    pub fn weekly_share(&self, pool_total: u64, referrals: u32) -> Result<u64, CalcError> {
        let rank = self.pool_rank(referrals)?;
        Ok(pool::weekly_share_amount(pool_total, rank))
    }

    /// Pool allocation of the contributions paid by `new_members` joiners.
    pub fn joining_allocation(&self, new_members: u64) -> Result<PoolAllocation, CalcError> {
        self.pool_split.allocate_joinings(new_members, self.joining_contribution)
    }

    pub fn withdraw(&self, amount: u64, available: u64) -> Result<WithdrawalQuote, CalcError> {
        self.withdrawal.quote(amount, available)
    }

    pub fn salary_rank(&self, direct_referrals: u32) -> Result<&SalaryRank, CalcError> {
        self.salary_ranks.rank_for(direct_referrals)
    }

    /// Rate, ranks and salary for an account snapshot.
    pub fn project_account(&self, account: &Account) -> AccountProjection {
        let days = account.active_days_elapsed;
        let direct = account.direct_referrals();
        let pool_rank = self.pool_rank(direct).ok().map(|r| r.name.clone());
        let salary = self.salary_rank(direct).ok();

        AccountProjection {
            account_id: account.id.clone(),
            cycle_day: daily_return::cycle_day(days),
            cycles_completed: daily_return::cycles_completed(days),
            daily_rate_bps: self.rate_for_day(days),
            pool_rank,
            salary_rank: salary.map(|r| r.name.clone()),
            weekly_salary: salary.map(|r| r.weekly_salary).unwrap_or(0),
            referrals_to_next_pool_rank: self.pool_ranks.next_rank(direct).map(|(_, n)| n),
        }
    }
}
