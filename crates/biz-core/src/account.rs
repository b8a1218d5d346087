use crate::COMMISSION_LEVELS;
use serde::{Deserialize, Serialize};

/// Read-only account snapshot handed to the engines.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    /// Days the account has been active (0 = joined today)
    pub active_days_elapsed: u64,
    pub referral_level1_count: u32,
    pub referral_level2_count: u32,
    pub referral_level3_count: u32,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        active_days_elapsed: u64,
        referral_counts: [u32; COMMISSION_LEVELS],
    ) -> Self {
        Self {
            id: id.into(),
            active_days_elapsed,
            referral_level1_count: referral_counts[0],
            referral_level2_count: referral_counts[1],
            referral_level3_count: referral_counts[2],
        }
    }

    pub fn referral_counts(&self) -> [u32; COMMISSION_LEVELS] {
        [
            self.referral_level1_count,
            self.referral_level2_count,
            self.referral_level3_count,
        ]
    }

    /// Direct (level 1) referrals; pool and salary ranks are based on this.
    pub fn direct_referrals(&self) -> u32 {
        self.referral_level1_count
    }

    /// Whole network size across all three levels.
    pub fn network_size(&self) -> u64 {
        self.referral_counts().iter().map(|c| *c as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_counts() {
        let a = Account::new("USER123456", 42, [12, 8, 3]);
        assert_eq!(a.referral_counts(), [12, 8, 3]);
        assert_eq!(a.direct_referrals(), 12);
        assert_eq!(a.network_size(), 23);
    }

    #[test]
    fn test_network_size_does_not_overflow() {
        let a = Account::new("big", 0, [u32::MAX; 3]);
        assert_eq!(a.network_size(), 3 * u32::MAX as u64);
    }
}
