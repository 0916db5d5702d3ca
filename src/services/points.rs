// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Points ledger: read-only aggregation over an externally-fetched
//! activity list.

use chrono::{DateTime, Utc};

use crate::models::PointsActivity;
use crate::time_utils::period_start;

/// How many entries `recent_activities` exposes.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Aggregated view over a borrowed activity slice.
///
/// Input contract: the slice is sorted newest-first. The backend orders the
/// feed that way in the query itself ([`BackendClient::list_activities`]
/// requests `order=created_at.desc`); callers holding activities from any
/// other source should run them through [`sort_newest_first`] first.
///
/// [`BackendClient::list_activities`]: crate::services::BackendClient::list_activities
pub struct Ledger<'a> {
    activities: &'a [PointsActivity],
}

impl<'a> Ledger<'a> {
    /// Wrap a newest-first activity slice.
    pub fn new(activities: &'a [PointsActivity]) -> Self {
        Self { activities }
    }

    /// Total points this user has earned across the whole feed.
    pub fn user_total_points(&self, user_id: &str) -> u64 {
        self.activities
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| u64::from(a.points_earned))
            .sum()
    }

    /// Points this user earned in the last `days` days.
    ///
    /// The lower bound is inclusive: an activity exactly `days` old counts.
    pub fn points_for_period(&self, user_id: &str, days: u32, now: DateTime<Utc>) -> u64 {
        let cutoff = period_start(now, days);
        self.activities
            .iter()
            .filter(|a| a.user_id == user_id && a.created_at >= cutoff)
            .map(|a| u64::from(a.points_earned))
            .sum()
    }

    /// The most recent activities across the family (at most
    /// [`RECENT_ACTIVITY_LIMIT`]).
    pub fn recent_activities(&self) -> &'a [PointsActivity] {
        let end = self.activities.len().min(RECENT_ACTIVITY_LIMIT);
        &self.activities[..end]
    }

    /// Everything in the feed.
    pub fn activities(&self) -> &'a [PointsActivity] {
        self.activities
    }
}

/// Sort an activity list newest-first.
///
/// For callers whose source cannot guarantee feed order.
pub fn sort_newest_first(activities: &mut [PointsActivity]) {
    activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Cumulative points needed to reach level `index + 1`.
pub const LEVEL_THRESHOLDS: &[u64] = &[0, 100, 250, 500, 1_000, 2_000, 3_500, 5_500, 8_000];

/// The level a point total corresponds to (1-based).
pub fn level_for_points(total: u64) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .take_while(|threshold| total >= **threshold)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;
    use chrono::TimeZone;

    fn make_activity(id: &str, user: &str, points: u32, created_at: DateTime<Utc>) -> PointsActivity {
        PointsActivity {
            id: id.to_string(),
            family_id: "f-1".to_string(),
            user_id: user.to_string(),
            activity_type: ActivityType::TaskCompleted,
            points_earned: points,
            related_entity_id: None,
            description: format!("Activity {}", id),
            metadata: serde_json::Map::new(),
            created_at,
        }
    }

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, n, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_user_total_points_sums_only_that_user() {
        let activities = vec![
            make_activity("a-3", "alice", 15, day(3)),
            make_activity("a-2", "bob", 40, day(2)),
            make_activity("a-1", "alice", 20, day(1)),
        ];
        let ledger = Ledger::new(&activities);

        assert_eq!(ledger.user_total_points("alice"), 35);
        assert_eq!(ledger.user_total_points("bob"), 40);
        assert_eq!(ledger.user_total_points("nobody"), 0);
    }

    #[test]
    fn test_empty_feed_totals_zero() {
        let ledger = Ledger::new(&[]);
        assert_eq!(ledger.user_total_points("alice"), 0);
        assert!(ledger.recent_activities().is_empty());
    }

    #[test]
    fn test_points_for_period_is_inclusive_at_the_boundary() {
        let now = day(8);
        let activities = vec![
            make_activity("a-2", "alice", 10, day(5)),
            // Exactly 7 days before `now`: included
            make_activity("a-1", "alice", 7, day(1)),
        ];
        let ledger = Ledger::new(&activities);

        assert_eq!(ledger.points_for_period("alice", 7, now), 17);
        assert_eq!(ledger.points_for_period("alice", 3, now), 10);
    }

    #[test]
    fn test_recent_activities_takes_the_first_ten() {
        let activities: Vec<_> = (1..=14)
            .rev()
            .map(|n| make_activity(&format!("a-{n}"), "alice", 1, day(n)))
            .collect();
        let ledger = Ledger::new(&activities);

        let recent = ledger.recent_activities();
        assert_eq!(recent.len(), RECENT_ACTIVITY_LIMIT);
        assert_eq!(recent[0].id, "a-14");
        assert_eq!(recent[9].id, "a-5");
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(99), 1);
        assert_eq!(level_for_points(100), 2);
        assert_eq!(level_for_points(5_499), 7);
        assert_eq!(level_for_points(1_000_000), LEVEL_THRESHOLDS.len() as u32);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut activities = vec![
            make_activity("a-1", "alice", 1, day(1)),
            make_activity("a-3", "alice", 1, day(3)),
            make_activity("a-2", "alice", 1, day(2)),
        ];
        sort_newest_first(&mut activities);
        let ids: Vec<_> = activities.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a-3", "a-2", "a-1"]);
    }
}
