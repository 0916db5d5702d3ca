//! Streak state, owned locally (one blob per user in the key-value store).

use serde::{Deserialize, Serialize};

/// Consecutive-day check-in state for a single user.
///
/// Persisted as JSON under `streak:{user_id}`. `last_check_in` is a
/// `YYYY-MM-DD` day stamp and is monotonically non-decreasing across writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakData {
    /// Current run of consecutive check-in days.
    #[serde(default)]
    pub current_streak: u32,
    /// High-water mark of `current_streak`.
    #[serde(default)]
    pub longest_streak: u32,
    /// Day of the most recent check-in (`YYYY-MM-DD`), if any.
    #[serde(default)]
    pub last_check_in: Option<String>,
    /// Whether the most recent check-in granted a streak bonus.
    #[serde(default)]
    pub streak_bonus_earned: bool,
}

/// Outcome of one `daily_check_in` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInResult {
    /// True only for the first successful check-in of the calendar day.
    pub first_today: bool,
    /// Streak length after this call.
    pub streak_days: u32,
    /// Bonus points granted by this call (0 unless the streak hit a
    /// multiple of 7).
    pub bonus_points: u32,
}

impl CheckInResult {
    /// The zero-effect result: repeat call, rejected re-entry, or storage
    /// failure. Nothing was persisted and nothing may be awarded.
    pub fn no_effect() -> Self {
        Self {
            first_today: false,
            streak_days: 0,
            bonus_points: 0,
        }
    }
}
