// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local persistent key-value store.
//!
//! The only mutable state this crate owns lives here: streak blobs, daily
//! check-in markers, and the read-notification ID set. The interface is a
//! plain string-to-string map with per-key atomicity and no transactions.
//!
//! Each key is written by exactly one component: streak keys by the streak
//! tracker, the read set by the notification center. No two components
//! ever write the same key.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Key naming, centralized so ownership stays auditable.
pub mod keys {
    /// Streak blob for one user (JSON [`StreakData`](crate::models::StreakData)).
    pub fn streak(user_id: &str) -> String {
        format!("streak:{user_id}")
    }

    /// Fast-path day marker (`YYYY-MM-DD`) for one user's last check-in.
    pub fn check_in_marker(user_id: &str) -> String {
        format!("checkin:{user_id}")
    }

    /// Read-notification ID set for this installation (JSON string array).
    pub const NOTIFICATIONS_READ: &str = "notifications:read";
}

/// Async string key → string value store.
///
/// Implementations must make each individual `set`/`remove` atomic; nothing
/// here coordinates across keys.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}
