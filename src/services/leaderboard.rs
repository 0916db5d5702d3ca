// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard derivation: rank family members by accumulated points.

use crate::models::{Achievement, FamilyMember, LeaderboardEntry, PointsActivity};
use crate::services::points::Ledger;

/// How many recent activities each entry carries.
const RECENT_PER_MEMBER: usize = 5;

/// Build the ranked leaderboard for a family.
///
/// One entry per member; members without any activity appear with zero
/// points. The sort is stable and descending by `total_points`, so members
/// with equal totals keep their relative input order and get distinct,
/// positional ranks (1..=N with no gaps). At most one entry is flagged
/// `is_current_user`.
///
/// `activities` is expected newest-first, like every feed consumer here.
pub fn build_leaderboard(
    members: &[FamilyMember],
    activities: &[PointsActivity],
    achievements: &[Achievement],
    current_user_id: Option<&str>,
) -> Vec<LeaderboardEntry> {
    let ledger = Ledger::new(activities);

    let mut entries: Vec<LeaderboardEntry> = members
        .iter()
        .map(|member| {
            let recent: Vec<PointsActivity> = activities
                .iter()
                .filter(|a| a.user_id == member.user_id)
                .take(RECENT_PER_MEMBER)
                .cloned()
                .collect();

            LeaderboardEntry {
                user_id: member.user_id.clone(),
                name: member.profile.name.clone(),
                avatar_url: member.profile.avatar_url.clone(),
                total_points: ledger.user_total_points(&member.user_id),
                recent_activities: recent,
                achievements_count: achievements
                    .iter()
                    .filter(|a| a.user_id == member.user_id)
                    .count(),
                rank: 0,
                is_current_user: current_user_id == Some(member.user_id.as_str()),
            }
        })
        .collect();

    // Vec::sort_by is stable; equal totals keep member-list order.
    entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityType, MemberProfile, MemberRole};
    use chrono::{TimeZone, Utc};

    fn make_member(user_id: &str, name: &str) -> FamilyMember {
        FamilyMember {
            user_id: user_id.to_string(),
            role: MemberRole::Adult,
            joined_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            profile: MemberProfile {
                name: name.to_string(),
                avatar_url: None,
            },
        }
    }

    fn make_activity(id: u32, user: &str, points: u32) -> PointsActivity {
        PointsActivity {
            id: format!("a-{id}"),
            family_id: "f-1".to_string(),
            user_id: user.to_string(),
            activity_type: ActivityType::TaskCompleted,
            points_earned: points,
            related_entity_id: None,
            description: String::new(),
            metadata: serde_json::Map::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_members_without_activity_rank_last_with_zero() {
        let members = vec![make_member("A", "Alice"), make_member("B", "Ben")];
        let activities = vec![make_activity(1, "A", 15), make_activity(2, "A", 20)];

        let board = build_leaderboard(&members, &activities, &[], Some("A"));

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].user_id, "A");
        assert_eq!(board[0].total_points, 35);
        assert_eq!(board[0].rank, 1);
        assert!(board[0].is_current_user);

        assert_eq!(board[1].user_id, "B");
        assert_eq!(board[1].total_points, 0);
        assert_eq!(board[1].rank, 2);
        assert!(!board[1].is_current_user);
    }

    #[test]
    fn test_ties_keep_member_order_and_distinct_ranks() {
        let members = vec![
            make_member("A", "Alice"),
            make_member("B", "Ben"),
            make_member("C", "Cleo"),
        ];
        let activities = vec![
            make_activity(1, "A", 10),
            make_activity(2, "B", 10),
            make_activity(3, "C", 10),
        ];

        let board = build_leaderboard(&members, &activities, &[], None);

        let order: Vec<_> = board.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, ["A", "B", "C"]);
        let ranks: Vec<_> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn test_recent_activities_are_capped_at_five() {
        let members = vec![make_member("A", "Alice")];
        let activities: Vec<_> = (0..8).map(|i| make_activity(i, "A", 1)).collect();

        let board = build_leaderboard(&members, &activities, &[], None);
        assert_eq!(board[0].recent_activities.len(), 5);
        assert_eq!(board[0].recent_activities[0].id, "a-0");
    }
}
