// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Unlocked achievement model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key into the static achievement catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementType {
    /// First task ever completed.
    FirstTask,
    /// Ten tasks completed.
    TaskMaster,
    /// 100 points accumulated.
    PointCollector,
    /// 500 points accumulated.
    PointChampion,
    /// Activity on each of seven consecutive days.
    WeekStreak,
}

/// An unlocked achievement instance, owned by the backend.
///
/// Created once when an evaluator condition transitions to true; never
/// mutated or deleted afterwards, even if the underlying activities go away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Backend row ID
    pub id: String,
    /// Family the achievement is scoped to
    pub family_id: String,
    /// User who unlocked it
    pub user_id: String,
    /// Catalog key
    pub achievement_type: AchievementType,
    /// Display title (copied from the catalog at unlock time)
    pub title: String,
    /// Display description
    pub description: String,
    /// Points granted on unlock
    pub points_reward: u32,
    /// When the unlock happened
    pub unlocked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_type_wire_format() {
        let json = serde_json::to_string(&AchievementType::WeekStreak).unwrap();
        assert_eq!(json, "\"week_streak\"");
    }
}
