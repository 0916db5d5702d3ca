// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Achievement catalog and unlock evaluation.
//!
//! The catalog is a static table; conditions are pure functions over one
//! user's activity history. Evaluation only ever adds: once an achievement
//! is in the unlocked set it is never returned again, and nothing here
//! revokes an unlock if activities later disappear upstream.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{AchievementType, ActivityType, PointsActivity};

/// One user's activity history plus the evaluation day.
pub struct ActivityWindow<'a> {
    activities: Vec<&'a PointsActivity>,
    today: NaiveDate,
}

impl<'a> ActivityWindow<'a> {
    /// Filter a family feed down to one user.
    pub fn for_user(user_id: &str, activities: &'a [PointsActivity], today: NaiveDate) -> Self {
        Self {
            activities: activities.iter().filter(|a| a.user_id == user_id).collect(),
            today,
        }
    }

    fn count_of_type(&self, kind: ActivityType) -> usize {
        self.activities
            .iter()
            .filter(|a| a.activity_type == kind)
            .count()
    }

    fn total_points(&self) -> u64 {
        self.activities
            .iter()
            .map(|a| u64::from(a.points_earned))
            .sum()
    }

    /// At least one activity on each of the last seven calendar days
    /// (today inclusive). A single missing day fails the check.
    fn active_each_of_last_seven_days(&self) -> bool {
        (0..7).all(|offset| {
            let Some(day) = self.today.checked_sub_days(chrono::Days::new(offset)) else {
                return false;
            };
            self.activities
                .iter()
                .any(|a| a.created_at.date_naive() == day)
        })
    }
}

/// Catalog entry: display copy plus the unlock condition.
pub struct AchievementDef {
    pub kind: AchievementType,
    pub title: &'static str,
    pub description: &'static str,
    pub points_reward: u32,
    condition: fn(&ActivityWindow) -> bool,
}

impl AchievementDef {
    /// Evaluate this achievement's condition against one user's history.
    pub fn is_met(&self, window: &ActivityWindow) -> bool {
        (self.condition)(window)
    }
}

/// The static achievement catalog.
pub static CATALOG: &[AchievementDef] = &[
    AchievementDef {
        kind: AchievementType::FirstTask,
        title: "First task done",
        description: "Complete your first task",
        points_reward: 10,
        condition: |w| w.count_of_type(ActivityType::TaskCompleted) >= 1,
    },
    AchievementDef {
        kind: AchievementType::TaskMaster,
        title: "Task master",
        description: "Complete 10 tasks",
        points_reward: 50,
        condition: |w| w.count_of_type(ActivityType::TaskCompleted) >= 10,
    },
    AchievementDef {
        kind: AchievementType::PointCollector,
        title: "Point collector",
        description: "Earn 100 points",
        points_reward: 25,
        condition: |w| w.total_points() >= 100,
    },
    AchievementDef {
        kind: AchievementType::PointChampion,
        title: "Point champion",
        description: "Earn 500 points",
        points_reward: 100,
        condition: |w| w.total_points() >= 500,
    },
    AchievementDef {
        kind: AchievementType::WeekStreak,
        title: "Week-long streak",
        description: "Be active every day for a week",
        points_reward: 75,
        condition: |w| w.active_each_of_last_seven_days(),
    },
];

/// Achievements whose condition holds for `user_id` and which are not in
/// the already-unlocked set.
///
/// Idempotent: a second call with the same feed and the same unlocked set
/// returns nothing once the first call's results have been recorded.
pub fn newly_unlocked(
    user_id: &str,
    activities: &[PointsActivity],
    unlocked: &HashSet<AchievementType>,
    today: NaiveDate,
) -> Vec<&'static AchievementDef> {
    let window = ActivityWindow::for_user(user_id, activities, today);

    CATALOG
        .iter()
        .filter(|def| !unlocked.contains(&def.kind) && def.is_met(&window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};

    fn make_activity(
        id: u32,
        user: &str,
        kind: ActivityType,
        points: u32,
        day: u32,
    ) -> PointsActivity {
        PointsActivity {
            id: format!("a-{id}"),
            family_id: "f-1".to_string(),
            user_id: user.to_string(),
            activity_type: kind,
            points_earned: points,
            related_entity_id: None,
            description: String::new(),
            metadata: serde_json::Map::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    #[test]
    fn test_first_task_unlocks_for_the_right_user() {
        let activities = vec![make_activity(1, "alice", ActivityType::TaskCompleted, 10, 5)];

        let unlocked = newly_unlocked("alice", &activities, &HashSet::new(), today());
        assert!(unlocked.iter().any(|d| d.kind == AchievementType::FirstTask));

        let for_bob = newly_unlocked("bob", &activities, &HashSet::new(), today());
        assert!(for_bob.is_empty());
    }

    #[test]
    fn test_already_unlocked_is_not_returned_again() {
        let activities = vec![make_activity(1, "alice", ActivityType::TaskCompleted, 10, 5)];

        let first = newly_unlocked("alice", &activities, &HashSet::new(), today());
        let recorded: HashSet<_> = first.iter().map(|d| d.kind).collect();

        let second = newly_unlocked("alice", &activities, &recorded, today());
        assert!(second.is_empty());
    }

    #[test]
    fn test_point_thresholds() {
        let activities: Vec<_> = (0..5)
            .map(|i| make_activity(i, "alice", ActivityType::EventCreated, 25, 5))
            .collect();

        let unlocked = newly_unlocked("alice", &activities, &HashSet::new(), today());
        assert!(unlocked
            .iter()
            .any(|d| d.kind == AchievementType::PointCollector));
        assert!(!unlocked
            .iter()
            .any(|d| d.kind == AchievementType::PointChampion));
    }

    #[test]
    fn test_week_streak_requires_every_day() {
        // Days 14..=20: full week ending on `today`.
        let full_week: Vec<_> = (14..=20)
            .map(|d| make_activity(d, "alice", ActivityType::DailyCheckin, 5, d))
            .collect();
        let unlocked = newly_unlocked("alice", &full_week, &HashSet::new(), today());
        assert!(unlocked
            .iter()
            .any(|d| d.kind == AchievementType::WeekStreak));

        // Drop one day in the middle: condition fails.
        let with_gap: Vec<_> = full_week
            .iter()
            .filter(|a| a.created_at.day() != 17)
            .cloned()
            .collect();
        let unlocked = newly_unlocked("alice", &with_gap, &HashSet::new(), today());
        assert!(!unlocked
            .iter()
            .any(|d| d.kind == AchievementType::WeekStreak));
    }
}
