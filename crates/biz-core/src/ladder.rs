// Referral-count rank ladders shared by the global pool ranks and the
// weekly salary ranks.

use crate::CalcError;
use serde::Serialize;

/// A rank that is reached once an account has at least `min_referrals` referrals.
pub trait Rank {
    fn name(&self) -> &str;
    fn min_referrals(&self) -> u32;
}

/// Ranks ordered ascending by `min_referrals`, validated once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankLadder<R> {
    ranks: Vec<R>,
}

impl<R: Rank> RankLadder<R> {
    /// Build a ladder. The table must be non-empty, use unique names and have
    /// strictly ascending minimums.
    pub fn new(ranks: Vec<R>) -> Result<Self, CalcError> {
        if ranks.is_empty() {
            return Err(CalcError::Configuration(
                "rank table must contain at least one rank".to_string(),
            ));
        }
        for (i, rank) in ranks.iter().enumerate() {
            if rank.name().trim().is_empty() {
                return Err(CalcError::Configuration(format!(
                    "rank #{} has an empty name",
                    i + 1
                )));
            }
            if ranks[..i].iter().any(|r| r.name() == rank.name()) {
                return Err(CalcError::Configuration(format!(
                    "rank '{}' appears twice",
                    rank.name()
                )));
            }
        }
        for pair in ranks.windows(2) {
            if pair[1].min_referrals() <= pair[0].min_referrals() {
                return Err(CalcError::Configuration(format!(
                    "rank '{}' (min {}) must require more referrals than '{}' (min {})",
                    pair[1].name(),
                    pair[1].min_referrals(),
                    pair[0].name(),
                    pair[0].min_referrals()
                )));
            }
        }
        Ok(Self { ranks })
    }

    /// Built-in tables only; skips validation.
    pub(crate) fn from_trusted(ranks: Vec<R>) -> Self {
        debug_assert!(Self::new_checked_ok(&ranks));
        Self { ranks }
    }

    fn new_checked_ok(ranks: &[R]) -> bool {
        !ranks.is_empty()
            && ranks
                .windows(2)
                .all(|p| p[0].min_referrals() < p[1].min_referrals())
    }

    /// Highest rank whose minimum is <= `count`.
    pub fn rank_for(&self, count: u32) -> Result<&R, CalcError> {
        self.ranks
            .iter()
            .rev()
            .find(|r| r.min_referrals() <= count)
            .ok_or(CalcError::NotEligible {
                count,
                minimum: self.lowest().min_referrals(),
            })
    }

    /// The next rank above `count`, if any, with the referrals still missing.
    pub fn next_rank(&self, count: u32) -> Option<(&R, u32)> {
        self.ranks
            .iter()
            .find(|r| r.min_referrals() > count)
            .map(|r| (r, r.min_referrals() - count))
    }

    pub fn find(&self, name: &str) -> Option<&R> {
        self.ranks
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }

    pub fn lowest(&self) -> &R {
        &self.ranks[0]
    }

    pub fn ranks(&self) -> &[R] {
        &self.ranks
    }

    pub fn into_ranks(self) -> Vec<R> {
        self.ranks
    }
}
