// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notification view models and realtime change events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ActivityType;

/// Synthetic notifications derived from family state rather than the
/// activity feed. Each has a fixed, well-known ID so read-state tracking
/// and dedup work exactly like for activity-backed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemNotification {
    /// One-time greeting shown while the family still has a single member.
    Welcome,
    /// Milestone shown once a second member has joined.
    FamilyComplete,
}

impl SystemNotification {
    /// Stable notification ID used for dedup and read-state.
    pub fn id(&self) -> &'static str {
        match self {
            SystemNotification::Welcome => "system-welcome",
            SystemNotification::FamilyComplete => "system-family-complete",
        }
    }
}

/// What produced a notification entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Activity(ActivityType),
    System(SystemNotification),
}

/// One entry of the notification list.
///
/// This is a derived view: the list is recomputed from scratch on every
/// load, and only the set of read IDs is persisted locally.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationItem {
    /// Activity row ID, or a fixed system ID
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Flips true only via an explicit mark-as-read
    pub read: bool,
    /// User the entry is attributed to, when it came from the feed
    pub user_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Kind of change reported by the realtime feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One event from the backend's realtime channel.
///
/// Consumed only as a reload trigger; the payload is never read for
/// content (the full state is refetched instead).
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeEvent {
    pub event_type: ChangeKind,
    /// Source table (`points_activities`, `family_members`, ...)
    pub table: String,
    #[serde(default)]
    pub row: serde_json::Value,
}
