// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived leaderboard entry. Never persisted; rebuilt from the member and
//! activity lists on every refresh.

use serde::Serialize;

use crate::models::PointsActivity;

/// One ranked row of the family leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    /// Display name from the member profile
    pub name: String,
    pub avatar_url: Option<String>,
    /// Sum of `points_earned` over this member's activities
    pub total_points: u64,
    /// This member's most recent activities (at most 5)
    pub recent_activities: Vec<PointsActivity>,
    /// Number of achievements this member has unlocked
    pub achievements_count: usize,
    /// 1-based position after the descending sort; ties keep input order
    pub rank: usize,
    /// True on exactly one entry when the session user is a member
    pub is_current_user: bool,
}
