// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod achievements;
pub mod backend;
pub mod leaderboard;
pub mod notifications;
pub mod points;
pub mod reload;
pub mod streak;

pub use achievements::{newly_unlocked, AchievementDef, ActivityWindow, CATALOG};
pub use backend::BackendClient;
pub use leaderboard::build_leaderboard;
pub use notifications::{NotificationCenter, NOTIFICATION_LIMIT};
pub use points::{
    level_for_points, sort_newest_first, Ledger, LEVEL_THRESHOLDS, RECENT_ACTIVITY_LIMIT,
};
pub use reload::{pump_events, ReloadDebouncer};
pub use streak::StreakTracker;
