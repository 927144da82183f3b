//! Remaining-time badges derived from a task's completion budget.

use super::{FinishBudget, Task};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;

const NANOS_PER_MILLI: i64 = 1_000_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Remaining time until a task's budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadlineBadge {
    /// The budget has been used up.
    Expired,
    /// Less than a day remains; rounded to the nearest hour and kept
    /// within `1..=23` so it never reads as expired or as a full day.
    Hours(i64),
    /// A day or more remains; rounded to the nearest day.
    Days(i64),
}

impl DeadlineBadge {
    /// Evaluates the badge for a task at the clock's current time.
    ///
    /// Returns `None` when the task has no budget.
    #[must_use]
    pub fn evaluate(task: &Task, clock: &impl Clock) -> Option<Self> {
        Self::at(task.time_until_finish(), task.created_at(), clock.utc())
    }

    /// Evaluates the badge for a budget started at `created_at`, seen at `now`.
    #[must_use]
    pub fn at(budget: FinishBudget, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        if budget.is_unset() {
            return None;
        }
        let elapsed = now.signed_duration_since(created_at).num_milliseconds();
        let remaining = budget
            .as_nanos()
            .div_euclid(NANOS_PER_MILLI)
            .saturating_sub(elapsed);

        let badge = if remaining <= 0 {
            Self::Expired
        } else if remaining < MILLIS_PER_DAY {
            Self::Hours(rounded_div(remaining, MILLIS_PER_HOUR).clamp(1, 23))
        } else {
            Self::Days(rounded_div(remaining, MILLIS_PER_DAY))
        };
        Some(badge)
    }
}

fn rounded_div(value: i64, unit: i64) -> i64 {
    value.saturating_add(unit.div_euclid(2)).div_euclid(unit)
}

impl fmt::Display for DeadlineBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => f.write_str("expired"),
            Self::Hours(hours) => write!(f, "{hours} hours"),
            Self::Days(days) => write!(f, "{days} days"),
        }
    }
}
