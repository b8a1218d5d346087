// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BIZCHAIN - DAILY RETURN SCHEDULE
//
// Maps an account's active day to a daily return rate. The schedule is a
// 130-day cycle that renews automatically:
//
//   Days   1-5   : 1%      Days 16-20 : 2.5%     Days 31-130 : 4%
//   Days   6-10  : 1.5%    Days 21-25 : 3%
//   Days  11-15  : 2%      Days 26-30 : 3.5%
//
// Day numbering: day N of activity resolves to cycle day ((N - 1) mod 130) + 1.
// Day 0 (joined today) is treated as day 1, so day 130 is the last day of the
// first cycle and day 131 is day 1 of the second.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use crate::{apply_bps, CalcError, BPS_DENOMINATOR, DAILY_RETURN_CYCLE_DAYS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyReturnTier {
    /// First cycle day of the tier (inclusive, 1-based)
    pub start_day: u32,
    /// Last cycle day of the tier (inclusive)
    pub end_day: u32,
    pub rate_bps: u32,
}

impl DailyReturnTier {
    pub const fn new(start_day: u32, end_day: u32, rate_bps: u32) -> Self {
        Self {
            start_day,
            end_day,
            rate_bps,
        }
    }

    pub fn contains(&self, cycle_day: u32) -> bool {
        self.start_day <= cycle_day && cycle_day <= self.end_day
    }

    pub fn len_days(&self) -> u32 {
        self.end_day - self.start_day + 1
    }
}

pub const STANDARD_TIERS: [DailyReturnTier; 7] = [
    DailyReturnTier::new(1, 5, 100),
    DailyReturnTier::new(6, 10, 150),
    DailyReturnTier::new(11, 15, 200),
    DailyReturnTier::new(16, 20, 250),
    DailyReturnTier::new(21, 25, 300),
    DailyReturnTier::new(26, 30, 350),
    DailyReturnTier::new(31, 130, 400),
];

/// Resolve an active-day count to its 1-based position in the cycle.
pub fn cycle_day(active_days_elapsed: u64) -> u32 {
    let day = active_days_elapsed.max(1);
    ((day - 1) % DAILY_RETURN_CYCLE_DAYS as u64) as u32 + 1
}

/// Number of times the cycle has renewed by the given day.
pub fn cycles_completed(active_days_elapsed: u64) -> u64 {
    (active_days_elapsed.max(1) - 1) / DAILY_RETURN_CYCLE_DAYS as u64
}

/// Result of accruing daily returns over a run of days. Amounts in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualSummary {
    pub principal: u64,
    pub first_day: u64,
    pub last_day: u64,
    pub total_return: u64,
    /// Cycle renewals crossed between `first_day` and `last_day`
    pub cycles_renewed: u64,
    /// Cycle day that `last_day` falls on
    pub final_cycle_day: u32,
}

/// Tier table that partitions the whole cycle, validated once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyReturnSchedule {
    tiers: Vec<DailyReturnTier>,
}

impl Default for DailyReturnSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl DailyReturnSchedule {
    pub fn standard() -> Self {
        Self {
            tiers: STANDARD_TIERS.to_vec(),
        }
    }

    /// Validate that `tiers`, in order, cover days 1..=130 with no gap or
    /// overlap and that every rate is at most 100%.
    pub fn new(tiers: Vec<DailyReturnTier>) -> Result<Self, CalcError> {
        if tiers.is_empty() {
            return Err(CalcError::Configuration(
                "daily return schedule has no tiers".to_string(),
            ));
        }

        let mut expected_start = 1u32;
        for tier in &tiers {
            if tier.start_day != expected_start {
                return Err(CalcError::Configuration(format!(
                    "tier {}-{} must start on day {} (gap or overlap)",
                    tier.start_day, tier.end_day, expected_start
                )));
            }
            if tier.end_day < tier.start_day {
                return Err(CalcError::Configuration(format!(
                    "tier {}-{} ends before it starts",
                    tier.start_day, tier.end_day
                )));
            }
            if tier.rate_bps > BPS_DENOMINATOR {
                return Err(CalcError::Configuration(format!(
                    "tier {}-{} rate {} bps exceeds 100%",
                    tier.start_day, tier.end_day, tier.rate_bps
                )));
            }
            expected_start = tier.end_day.saturating_add(1);
        }

        if expected_start != DAILY_RETURN_CYCLE_DAYS + 1 {
            return Err(CalcError::Configuration(format!(
                "tiers cover days 1-{} but the cycle is {} days",
                expected_start - 1,
                DAILY_RETURN_CYCLE_DAYS
            )));
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[DailyReturnTier] {
        &self.tiers
    }

    /// Tier active on the given day.
    pub fn tier_for_day(&self, active_days_elapsed: u64) -> &DailyReturnTier {
        let day = cycle_day(active_days_elapsed);
        // Construction guarantees the tiers partition the cycle.
        self.tiers
            .iter()
            .find(|t| t.contains(day))
            .unwrap_or(&self.tiers[self.tiers.len() - 1])
    }

    /// Daily return rate (bps) for the given day.
    pub fn rate_for_day(&self, active_days_elapsed: u64) -> u32 {
        self.tier_for_day(active_days_elapsed).rate_bps
    }

    /// Return earned on `principal` for a single day.
    pub fn daily_return(&self, principal: u64, active_days_elapsed: u64) -> u64 {
        apply_bps(principal, self.rate_for_day(active_days_elapsed))
    }

    /// Sum of daily returns for `days` consecutive days starting at `first_day`
    /// (day 0 counts as day 1). Each day is rounded to the cent before summing.
    pub fn accrue(
        &self,
        principal: u64,
        first_day: u64,
        days: u64,
    ) -> Result<AccrualSummary, CalcError> {
        if days == 0 {
            return Err(CalcError::InvalidInput(
                "accrual needs at least one day".to_string(),
            ));
        }
        let first_day = first_day.max(1);
        let last_day = first_day
            .checked_add(days - 1)
            .ok_or_else(|| CalcError::InvalidInput("accrual range overflows".to_string()))?;

        let total = self.accrued_through(principal, last_day)
            - self.accrued_through(principal, first_day - 1);
        let total_return = u64::try_from(total).map_err(|_| {
            CalcError::InvalidInput("accrued return exceeds u64 cents".to_string())
        })?;

        Ok(AccrualSummary {
            principal,
            first_day,
            last_day,
            total_return,
            cycles_renewed: cycles_completed(last_day) - cycles_completed(first_day),
            final_cycle_day: cycle_day(last_day),
        })
    }

    /// Return for one full 130-day cycle.
    pub fn cycle_return(&self, principal: u64) -> u128 {
        self.partial_cycle_return(principal, DAILY_RETURN_CYCLE_DAYS)
    }

    /// Accrued return over days 1..=`day` (0 when `day` is 0).
    fn accrued_through(&self, principal: u64, day: u64) -> u128 {
        if day == 0 {
            return 0;
        }
        let cycle = DAILY_RETURN_CYCLE_DAYS as u64;
        let full_cycles = day / cycle;
        let rest = (day % cycle) as u32;
        full_cycles as u128 * self.cycle_return(principal)
            + self.partial_cycle_return(principal, rest)
    }

    /// Return over cycle days 1..=`through`.
    fn partial_cycle_return(&self, principal: u64, through: u32) -> u128 {
        self.tiers
            .iter()
            .take_while(|t| t.start_day <= through)
            .map(|t| {
                let days = t.end_day.min(through) - t.start_day + 1;
                days as u128 * apply_bps(principal, t.rate_bps) as u128
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_day_boundaries() {
        assert_eq!(cycle_day(0), 1);
        assert_eq!(cycle_day(1), 1);
        assert_eq!(cycle_day(130), 130);
        assert_eq!(cycle_day(131), 1);
        assert_eq!(cycle_day(260), 130);
        assert_eq!(cycle_day(261), 1);
    }

    #[test]
    fn test_standard_rates() {
        let s = DailyReturnSchedule::standard();
        assert_eq!(s.rate_for_day(0), 100);
        assert_eq!(s.rate_for_day(5), 100);
        assert_eq!(s.rate_for_day(6), 150);
        assert_eq!(s.rate_for_day(15), 200);
        assert_eq!(s.rate_for_day(20), 250);
        assert_eq!(s.rate_for_day(25), 300);
        assert_eq!(s.rate_for_day(30), 350);
        assert_eq!(s.rate_for_day(31), 400);
        assert_eq!(s.rate_for_day(130), 400);
        assert_eq!(s.rate_for_day(131), s.rate_for_day(1));
        assert_eq!(
            s.rate_for_day(u64::MAX),
            s.rate_for_day(cycle_day(u64::MAX) as u64)
        );
    }

    #[test]
    fn test_standard_schedule_validates() {
        assert_eq!(
            DailyReturnSchedule::new(STANDARD_TIERS.to_vec()).unwrap(),
            DailyReturnSchedule::standard()
        );
    }

    #[test]
    fn test_rejects_gap() {
        let mut tiers = STANDARD_TIERS.to_vec();
        tiers[1].start_day = 7;
        assert!(matches!(
            DailyReturnSchedule::new(tiers),
            Err(CalcError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_overlap() {
        let mut tiers = STANDARD_TIERS.to_vec();
        tiers[1].start_day = 5;
        assert!(matches!(
            DailyReturnSchedule::new(tiers),
            Err(CalcError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_short_or_long_cover() {
        let mut tiers = STANDARD_TIERS.to_vec();
        tiers[6].end_day = 129;
        assert!(DailyReturnSchedule::new(tiers.clone()).is_err());
        tiers[6].end_day = 131;
        assert!(DailyReturnSchedule::new(tiers).is_err());
        assert!(DailyReturnSchedule::new(vec![]).is_err());
    }

    #[test]
    fn test_rejects_inverted_tier_and_huge_rate() {
        assert!(DailyReturnSchedule::new(vec![
            DailyReturnTier::new(1, 0, 100),
            DailyReturnTier::new(1, 130, 100),
        ])
        .is_err());
        assert!(DailyReturnSchedule::new(vec![DailyReturnTier::new(1, 130, 10_001)]).is_err());
        assert!(DailyReturnSchedule::new(vec![DailyReturnTier::new(1, 130, 250)]).is_ok());
    }

    #[test]
    fn test_daily_return() {
        let s = DailyReturnSchedule::standard();
        // $1,000 at 1.5%
        assert_eq!(s.daily_return(100_000, 7), 1_500);
    }

    #[test]
    fn test_full_cycle_return() {
        // $100 principal: 5 days each at 1,1.5,2,2.5,3,3.5 + 100 days at 4
        // = 5 * (1 + 1.5 + 2 + 2.5 + 3 + 3.5) + 400 = 67.5 + 400 = 467.5 dollars
        let s = DailyReturnSchedule::standard();
        assert_eq!(s.cycle_return(10_000), 46_750);
        let summary = s.accrue(10_000, 1, 130).unwrap();
        assert_eq!(summary.total_return, 46_750);
        assert_eq!(summary.cycles_renewed, 0);
        assert_eq!(summary.final_cycle_day, 130);
    }

    #[test]
    fn test_accrue_across_renewal() {
        let s = DailyReturnSchedule::standard();
        // days 129, 130 at 4% then 131, 132 at 1%
        let summary = s.accrue(10_000, 129, 4).unwrap();
        assert_eq!(summary.total_return, 400 + 400 + 100 + 100);
        assert_eq!(summary.cycles_renewed, 1);
        assert_eq!(summary.last_day, 132);
        assert_eq!(summary.final_cycle_day, 2);
    }

    #[test]
    fn test_accrue_day_zero_is_day_one() {
        let s = DailyReturnSchedule::standard();
        assert_eq!(
            s.accrue(10_000, 0, 10).unwrap().total_return,
            s.accrue(10_000, 1, 10).unwrap().total_return
        );
    }

    #[test]
    fn test_accrue_matches_day_by_day_sum() {
        let s = DailyReturnSchedule::standard();
        let principal = 12_345;
        let expected: u64 = (17..17 + 300).map(|d| s.daily_return(principal, d)).sum();
        assert_eq!(s.accrue(principal, 17, 300).unwrap().total_return, expected);
    }

    #[test]
    fn test_accrue_rejects_empty_and_overflowing_ranges() {
        let s = DailyReturnSchedule::standard();
        assert!(s.accrue(10_000, 1, 0).is_err());
        assert!(s.accrue(10_000, u64::MAX, 2).is_err());
        assert!(s.accrue(u64::MAX, 1, 1_000).is_err());
    }
}
