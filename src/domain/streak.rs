/// Streak calculation over a habit's check history
///
/// This module defines the StreakSnapshot struct that holds the derived
/// streak statistics for a habit, computed on demand from the ordered set
/// of check dates. The computation is pure: it takes the date sequence and
/// the reference date ("today") as explicit inputs and never touches
/// storage or the host clock.

use serde::{Deserialize, Serialize};
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Derived streak statistics for a habit
///
/// Never persisted; recomputed from the check ledger whenever a caller
/// asks for stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSnapshot {
    /// Consecutive calendar days checked, ending at today inclusive
    pub current: u32,
    /// Longest run of consecutive checked days anywhere in history
    pub longest: u32,
    /// Most recent checked date, None if the history is empty
    pub last: Option<NaiveDate>,
}

impl StreakSnapshot {
    /// An empty snapshot for a habit with no check history
    pub fn empty() -> Self {
        Self {
            current: 0,
            longest: 0,
            last: None,
        }
    }

    /// Compute the snapshot from a habit's check dates
    ///
    /// `dates` must be sorted ascending and deduplicated, which the ledger
    /// guarantees through its uniqueness constraint and ordering contract.
    /// `today` is the UTC calendar date the current streak is anchored to.
    pub fn from_dates(dates: &[NaiveDate], today: NaiveDate) -> Self {
        if dates.is_empty() {
            return Self::empty();
        }

        Self {
            current: current_streak(dates, today),
            longest: longest_streak(dates),
            last: dates.last().copied(),
        }
    }
}

/// Count consecutive checked days walking backward from today
///
/// Today not being checked yields 0. The walk is bounded by the streak
/// length itself, not by the size of the history.
fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let set: HashSet<NaiveDate> = dates.iter().copied().collect();

    let mut current = 0;
    let mut cursor = today;
    while set.contains(&cursor) {
        current += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }

    current
}

/// Find the longest run of consecutive dates in an ascending sequence
///
/// A gap resets the run length to 1, never to 0: the date after a gap is
/// itself a checked day.
fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for &date in dates {
        run = match prev {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        prev = Some(date);
        longest = longest.max(run);
    }

    longest
}
