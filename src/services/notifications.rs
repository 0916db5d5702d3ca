// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notification aggregation with locally-persisted read state.
//!
//! The visible list is a pure derivation: activities and synthetic system
//! entries are merged, deduplicated, sorted and truncated from scratch on
//! every load, then tagged with the read-ID set. The set is the only thing
//! persisted here; the entries themselves are never stored locally.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::{
    Family, NotificationItem, NotificationKind, PointsActivity, SystemNotification,
};
use crate::store::{keys, KeyValueStore};

/// The visible list keeps the most recent entries after the merge.
pub const NOTIFICATION_LIMIT: usize = 15;

/// Merges the activity feed with system notifications and tracks read IDs.
pub struct NotificationCenter {
    store: Arc<dyn KeyValueStore>,
    /// Read-ID set, lazily loaded from the store once per session.
    read_ids: Mutex<Option<HashSet<String>>>,
}

impl NotificationCenter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            read_ids: Mutex::new(None),
        }
    }

    /// Derive the visible notification list.
    ///
    /// Recomputed in full whenever the upstream feed changes; nothing is
    /// patched incrementally.
    pub async fn load(
        &self,
        activities: &[PointsActivity],
        family: &Family,
    ) -> Vec<NotificationItem> {
        let read = self.read_ids().await;

        let mut items: Vec<NotificationItem> = Vec::with_capacity(activities.len() + 2);

        for activity in activities {
            items.push(NotificationItem {
                id: activity.id.clone(),
                kind: NotificationKind::Activity(activity.activity_type),
                title: activity.activity_type.notification_title().to_string(),
                message: activity.description.clone(),
                timestamp: activity.created_at,
                read: false,
                user_id: Some(activity.user_id.clone()),
                metadata: if activity.metadata.is_empty() {
                    None
                } else {
                    Some(serde_json::Value::Object(activity.metadata.clone()))
                },
            });
        }

        items.extend(system_notifications(family));

        // Dedup by ID, first occurrence wins.
        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(item.id.clone()));

        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items.truncate(NOTIFICATION_LIMIT);

        for item in &mut items {
            item.read = read.contains(&item.id);
        }

        items
    }

    /// Mark one notification as read and persist the set.
    pub async fn mark_as_read(&self, id: &str) {
        let mut guard = self.read_ids.lock().await;
        let set = self.loaded(&mut guard).await;
        if set.insert(id.to_string()) {
            self.persist(set).await;
        }
    }

    /// Mark every currently-visible notification as read.
    pub async fn mark_all_as_read(&self, visible: &[NotificationItem]) {
        let mut guard = self.read_ids.lock().await;
        let set = self.loaded(&mut guard).await;
        let mut changed = false;
        for item in visible {
            changed |= set.insert(item.id.clone());
        }
        if changed {
            self.persist(set).await;
        }
    }

    /// Unread entries in a visible (post-truncation) list.
    pub fn unread_count(visible: &[NotificationItem]) -> usize {
        visible.iter().filter(|n| !n.read).count()
    }

    /// Snapshot of the read-ID set.
    pub async fn read_ids(&self) -> HashSet<String> {
        let mut guard = self.read_ids.lock().await;
        self.loaded(&mut guard).await.clone()
    }

    /// Get the cached set, loading it from the store on first use.
    ///
    /// A storage read failure logs and starts from an empty set; entries
    /// then simply show as unread again.
    async fn loaded<'a>(
        &self,
        guard: &'a mut tokio::sync::MutexGuard<'_, Option<HashSet<String>>>,
    ) -> &'a mut HashSet<String> {
        if guard.is_none() {
            let set = match self.store.get(keys::NOTIFICATIONS_READ).await {
                Ok(Some(blob)) => serde_json::from_str::<Vec<String>>(&blob)
                    .map(|ids| ids.into_iter().collect())
                    .unwrap_or_else(|e| {
                        tracing::warn!(error = %e, "Corrupt read-notification set, resetting");
                        HashSet::new()
                    }),
                Ok(None) => HashSet::new(),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load read-notification set");
                    HashSet::new()
                }
            };
            **guard = Some(set);
        }
        guard.get_or_insert_with(HashSet::new)
    }

    /// Persist the read-ID set; failures are logged and the in-memory
    /// update stands for this session (state reverts on next start).
    async fn persist(&self, set: &HashSet<String>) {
        let mut ids: Vec<&String> = set.iter().collect();
        ids.sort();
        let blob = match serde_json::to_string(&ids) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode read-notification set");
                return;
            }
        };
        if let Err(e) = self.store.set(keys::NOTIFICATIONS_READ, &blob).await {
            tracing::warn!(error = %e, "Failed to persist read-notification set");
        }
    }
}

/// Synthetic notifications derived from family state.
///
/// Fixed IDs make them deduplicatable and read-trackable like feed-backed
/// entries. Timestamps come from family state, not the wall clock, so they
/// sort stably between reloads.
fn system_notifications(family: &Family) -> Vec<NotificationItem> {
    let mut items = Vec::new();

    if family.members.len() == 1 {
        items.push(NotificationItem {
            id: SystemNotification::Welcome.id().to_string(),
            kind: NotificationKind::System(SystemNotification::Welcome),
            title: "Welcome!".to_string(),
            message: format!(
                "Welcome to {}! Share invite code {} to bring your family on board.",
                family.name, family.invite_code
            ),
            timestamp: family.created_at,
            read: false,
            user_id: None,
            metadata: None,
        });
    }

    if family.members.len() >= 2 {
        let newest_join = family
            .members
            .iter()
            .map(|m| m.joined_at)
            .max()
            .unwrap_or(family.created_at);
        items.push(NotificationItem {
            id: SystemNotification::FamilyComplete.id().to_string(),
            kind: NotificationKind::System(SystemNotification::FamilyComplete),
            title: "Family complete".to_string(),
            message: format!("{} now has {} members.", family.name, family.members.len()),
            timestamp: newest_join,
            read: false,
            user_id: None,
            metadata: None,
        });
    }

    items
}
