// Wallet balance breakdown (80% earnings / 10% global pool / 10% tax) and
// withdrawals ($50 minimum, 10% processing fee).

use crate::pool::split_cumulative;
use crate::{apply_bps, CalcError, BPS_DENOMINATOR, MIN_WITHDRAWAL_CENTS, WITHDRAWAL_FEE_BPS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSplit {
    pub earnings_bps: u32,
    pub global_pool_bps: u32,
    pub tax_bps: u32,
}

/// A balance divided into its parts (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBreakdown {
    pub earnings: u64,
    pub global_pool: u64,
    pub tax: u64,
}

impl Default for WalletSplit {
    fn default() -> Self {
        Self::standard()
    }
}

impl WalletSplit {
    pub const fn standard() -> Self {
        Self {
            earnings_bps: 8_000,
            global_pool_bps: 1_000,
            tax_bps: 1_000,
        }
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        let sum = self.earnings_bps as u64 + self.global_pool_bps as u64 + self.tax_bps as u64;
        if sum != BPS_DENOMINATOR as u64 {
            return Err(CalcError::Configuration(format!(
                "wallet split sums to {} bps, expected {}",
                sum, BPS_DENOMINATOR
            )));
        }
        Ok(())
    }

    /// Split `balance`; earnings absorbs the rounding remainder.
    pub fn split(&self, balance: u64) -> Result<WalletBreakdown, CalcError> {
        self.validate()?;
        let [global_pool, tax, earnings] =
            split_cumulative(balance, [self.global_pool_bps, self.tax_bps]);
        Ok(WalletBreakdown {
            earnings,
            global_pool,
            tax,
        })
    }
}

/// Withdrawal rules: a minimum amount and a processing fee taken from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalPolicy {
    /// Smallest accepted withdrawal (cents)
    pub minimum_amount: u64,
    pub fee_bps: u32,
}

/// What a withdrawal pays out (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalQuote {
    pub amount: u64,
    pub fee: u64,
    pub net_payout: u64,
    /// Balance left after the full amount is debited
    pub remaining_balance: u64,
}

impl Default for WithdrawalPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl WithdrawalPolicy {
    pub const fn standard() -> Self {
        Self {
            minimum_amount: MIN_WITHDRAWAL_CENTS,
            fee_bps: WITHDRAWAL_FEE_BPS,
        }
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        if self.minimum_amount == 0 {
            return Err(CalcError::Configuration(
                "withdrawal minimum must be greater than zero".to_string(),
            ));
        }
        if self.fee_bps >= BPS_DENOMINATOR {
            return Err(CalcError::Configuration(format!(
                "withdrawal fee {} bps must be below 100%",
                self.fee_bps
            )));
        }
        Ok(())
    }

    /// `InvalidInput` below the minimum, `InsufficientBalance` above `available`.
    pub fn check(&self, amount: u64, available: u64) -> Result<(), CalcError> {
        if amount < self.minimum_amount.max(1) {
            return Err(CalcError::InvalidInput(format!(
                "withdrawal of {} is below the minimum of {}",
                crate::money::format_usd(amount),
                crate::money::format_usd(self.minimum_amount)
            )));
        }
        if amount > available {
            return Err(CalcError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        Ok(())
    }

    /// Check the withdrawal and work out the fee and net payout.
    pub fn quote(&self, amount: u64, available: u64) -> Result<WithdrawalQuote, CalcError> {
        self.validate()?;
        self.check(amount, available)?;
        let fee = apply_bps(amount, self.fee_bps);
        Ok(WithdrawalQuote {
            amount,
            fee,
            net_payout: amount - fee,
            remaining_balance: available - amount,
        })
    }
}

/// Check a withdrawal against the standard policy.
pub fn validate_withdrawal(amount: u64, available: u64) -> Result<(), CalcError> {
    WithdrawalPolicy::standard().check(amount, available)
}
