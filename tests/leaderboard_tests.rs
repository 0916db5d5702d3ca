// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use std::collections::HashSet;

use common::{day, make_activity, make_member};
use family_points::models::{Achievement, AchievementType, ActivityType};
use family_points::services::build_leaderboard;

#[test]
fn test_two_member_example() {
    let members = vec![make_member("A", "Alice", day(1)), make_member("B", "Ben", day(1))];
    let activities = vec![
        make_activity("a-1", "A", ActivityType::TaskCompleted, 15, day(2)),
        make_activity("a-2", "A", ActivityType::ShoppingItemCompleted, 20, day(2)),
    ];

    let board = build_leaderboard(&members, &activities, &[], None);

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].user_id, "A");
    assert_eq!(board[0].total_points, 35);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].user_id, "B");
    assert_eq!(board[1].total_points, 0);
    assert_eq!(board[1].rank, 2);
}

#[test]
fn test_totals_sum_matches_member_scoped_activities() {
    let members = vec![
        make_member("A", "Alice", day(1)),
        make_member("B", "Ben", day(1)),
        make_member("C", "Cleo", day(1)),
    ];
    let activities = vec![
        make_activity("a-1", "A", ActivityType::TaskCompleted, 10, day(9)),
        make_activity("a-2", "B", ActivityType::EventCreated, 8, day(8)),
        make_activity("a-3", "C", ActivityType::DailyCheckin, 5, day(7)),
        make_activity("a-4", "A", ActivityType::GoalAchieved, 50, day(6)),
        // Not a member (left the family): excluded from every entry
        make_activity("a-5", "Z", ActivityType::TaskCompleted, 999, day(5)),
    ];

    let board = build_leaderboard(&members, &activities, &[], None);

    let member_ids: HashSet<_> = members.iter().map(|m| m.user_id.as_str()).collect();
    let expected: u64 = activities
        .iter()
        .filter(|a| member_ids.contains(a.user_id.as_str()))
        .map(|a| u64::from(a.points_earned))
        .sum();
    let total: u64 = board.iter().map(|e| e.total_points).sum();
    assert_eq!(total, expected);
}

#[test]
fn test_sorted_descending_with_gapless_ranks() {
    let members: Vec<_> = (0..6)
        .map(|i| make_member(&format!("u-{i}"), &format!("User {i}"), day(1)))
        .collect();
    let activities: Vec<_> = (0..6)
        .map(|i| {
            make_activity(
                &format!("a-{i}"),
                &format!("u-{i}"),
                ActivityType::TaskCompleted,
                (i * 7) % 20,
                day(10),
            )
        })
        .collect();

    let board = build_leaderboard(&members, &activities, &[], None);

    for pair in board.windows(2) {
        assert!(pair[0].total_points >= pair[1].total_points);
    }

    let mut ranks: Vec<_> = board.iter().map(|e| e.rank).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, (1..=board.len()).collect::<Vec<_>>());
}

#[test]
fn test_current_user_flagged_once() {
    let members = vec![make_member("A", "Alice", day(1)), make_member("B", "Ben", day(1))];

    let board = build_leaderboard(&members, &[], &[], Some("B"));
    assert_eq!(board.iter().filter(|e| e.is_current_user).count(), 1);

    // Session user not in the family: nobody is flagged.
    let board = build_leaderboard(&members, &[], &[], Some("Z"));
    assert_eq!(board.iter().filter(|e| e.is_current_user).count(), 0);
}

#[test]
fn test_achievement_counts_are_per_member() {
    let members = vec![make_member("A", "Alice", day(1)), make_member("B", "Ben", day(1))];
    let achievements = vec![
        Achievement {
            id: "ach-1".to_string(),
            family_id: "f-test".to_string(),
            user_id: "A".to_string(),
            achievement_type: AchievementType::FirstTask,
            title: "First task done".to_string(),
            description: String::new(),
            points_reward: 10,
            unlocked_at: day(3),
        },
        Achievement {
            id: "ach-2".to_string(),
            family_id: "f-test".to_string(),
            user_id: "A".to_string(),
            achievement_type: AchievementType::PointCollector,
            title: "Point collector".to_string(),
            description: String::new(),
            points_reward: 25,
            unlocked_at: day(4),
        },
    ];

    let board = build_leaderboard(&members, &[], &achievements, None);

    let alice = board.iter().find(|e| e.user_id == "A").unwrap();
    let ben = board.iter().find(|e| e.user_id == "B").unwrap();
    assert_eq!(alice.achievements_count, 2);
    assert_eq!(ben.achievements_count, 0);
}
