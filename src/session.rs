// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session context: the one place session-scoped state lives.
//!
//! Everything the UI reads goes through a [`Session`]: the fetched family
//! and feed, the derived views over them, and the services that own local
//! state. There are no module-level caches or ambient flags; the session is
//! initialized at sign-in and cleared at sign-out.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    Achievement, ActivityType, CheckInResult, Family, FamilyGoal, LeaderboardEntry, NewActivity,
    NewGoal, NotificationItem, PointsActivity, StreakData,
};
use crate::services::{
    build_leaderboard, newly_unlocked, AchievementDef, BackendClient, Ledger, NotificationCenter,
    ReloadDebouncer, StreakTracker,
};
use crate::store::{FileStore, KeyValueStore};

/// Fetched state for the current family, replaced wholesale on refresh.
#[derive(Default)]
struct SessionData {
    family: Option<Family>,
    activities: Vec<PointsActivity>,
    achievements: Vec<Achievement>,
    /// User-visible message for the most recent failed fetch.
    last_error: Option<String>,
    /// Set after a successful local write; cleared by `refresh`.
    needs_refresh: bool,
}

/// Per-sign-in context holding config, services and fetched state.
pub struct Session {
    config: Config,
    client: BackendClient,
    streaks: StreakTracker,
    notifications: NotificationCenter,
    family_id: String,
    user_id: String,
    state: RwLock<SessionData>,
}

impl Session {
    /// Start a session for one user in one family.
    ///
    /// The family context is required: if it cannot be fetched the session
    /// does not start and the error is returned. There is no fallback
    /// family: operating on a guessed ID would silently mix tenants.
    pub async fn start(config: Config, family_id: &str, user_id: &str) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.data_dir).await?);
        Self::start_with_store(config, store, family_id, user_id).await
    }

    /// Start with an explicit store implementation.
    pub async fn start_with_store(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        family_id: &str,
        user_id: &str,
    ) -> Result<Self> {
        let client = BackendClient::new(&config);
        let family = client.get_family(family_id).await?;

        tracing::info!(
            family_id,
            user_id,
            members = family.members.len(),
            "Session started"
        );

        let session = Self {
            config,
            client,
            streaks: StreakTracker::new(store.clone()),
            notifications: NotificationCenter::new(store),
            family_id: family_id.to_string(),
            user_id: user_id.to_string(),
            state: RwLock::new(SessionData {
                family: Some(family),
                ..SessionData::default()
            }),
        };

        session.refresh().await;
        Ok(session)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn family_id(&self) -> &str {
        &self.family_id
    }

    // ─── Fetch / refresh ─────────────────────────────────────────────────────

    /// Refetch everything and rebuild the session state.
    ///
    /// Failed fetches degrade to empty collections rather than stale or
    /// partial data, and leave a user-visible message in `last_error`. The
    /// family context is the exception: the previous value is kept, since
    /// views without any family are useless.
    pub async fn refresh(&self) {
        let activities = self.client.list_activities(&self.family_id).await;
        let achievements = self.client.list_achievements(&self.family_id).await;
        let family = self.client.get_family(&self.family_id).await;

        let mut state = self.state.write().await;
        state.last_error = None;
        state.needs_refresh = false;

        match activities {
            Ok(list) => state.activities = list,
            Err(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "Activity fetch failed");
                state.activities = Vec::new();
                state.last_error = Some(e.user_message().to_string());
            }
        }

        match achievements {
            Ok(list) => state.achievements = list,
            Err(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "Achievement fetch failed");
                state.achievements = Vec::new();
                state.last_error = Some(e.user_message().to_string());
            }
        }

        match family {
            Ok(f) => state.family = Some(f),
            Err(e) => {
                tracing::warn!(error = %e, timeout = e.is_timeout(), "Family fetch failed");
                state.last_error = Some(e.user_message().to_string());
            }
        }
    }

    /// Message for the most recent failed fetch, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// True once a local write has landed and the views are stale.
    pub async fn needs_refresh(&self) -> bool {
        self.state.read().await.needs_refresh
    }

    /// The current family context.
    pub async fn family(&self) -> Result<Family> {
        self.state
            .read()
            .await
            .family
            .clone()
            .ok_or(AppError::MissingContext("family"))
    }

    // ─── Derived views ───────────────────────────────────────────────────────

    /// Ranked leaderboard over the current family and feed.
    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        let state = self.state.read().await;
        let Some(family) = state.family.as_ref() else {
            return Vec::new();
        };
        build_leaderboard(
            &family.members,
            &state.activities,
            &state.achievements,
            Some(&self.user_id),
        )
    }

    /// The family's most recent activities (ledger view).
    pub async fn recent_activities(&self) -> Vec<PointsActivity> {
        let state = self.state.read().await;
        Ledger::new(&state.activities).recent_activities().to_vec()
    }

    /// Total points one member has accumulated.
    pub async fn user_total_points(&self, user_id: &str) -> u64 {
        let state = self.state.read().await;
        Ledger::new(&state.activities).user_total_points(user_id)
    }

    /// Points one member earned in the last `days` days.
    pub async fn points_for_period(&self, user_id: &str, days: u32) -> u64 {
        let state = self.state.read().await;
        Ledger::new(&state.activities).points_for_period(user_id, days, Utc::now())
    }

    /// The visible notification list, read-tagged.
    pub async fn notifications(&self) -> Vec<NotificationItem> {
        let state = self.state.read().await;
        let Some(family) = state.family.as_ref() else {
            return Vec::new();
        };
        self.notifications.load(&state.activities, family).await
    }

    /// Unread entries in the visible notification list.
    pub async fn unread_count(&self) -> usize {
        let visible = self.notifications().await;
        NotificationCenter::unread_count(&visible)
    }

    pub async fn mark_notification_read(&self, id: &str) {
        self.notifications.mark_as_read(id).await;
    }

    pub async fn mark_all_notifications_read(&self) {
        let visible = self.notifications().await;
        self.notifications.mark_all_as_read(&visible).await;
    }

    /// Achievements the session user newly qualifies for.
    pub async fn evaluate_achievements(&self) -> Vec<&'static AchievementDef> {
        let state = self.state.read().await;
        let unlocked: HashSet<_> = state
            .achievements
            .iter()
            .filter(|a| a.user_id == self.user_id)
            .map(|a| a.achievement_type)
            .collect();
        newly_unlocked(
            &self.user_id,
            &state.activities,
            &unlocked,
            Utc::now().date_naive(),
        )
    }

    /// The session user's streak state.
    pub async fn streak(&self) -> Result<StreakData> {
        self.streaks.streak_data(&self.user_id).await
    }

    // ─── Writes ──────────────────────────────────────────────────────────────

    /// Perform the daily check-in and award its points.
    ///
    /// On the first check-in of the day this appends a daily-checkin
    /// activity and, when the streak hits a bonus multiple, a streak-bonus
    /// activity. Award failures propagate after the client's bounded
    /// retries; the caller must not assume the write landed.
    pub async fn check_in(&self) -> Result<CheckInResult> {
        let result = self.streaks.daily_check_in(&self.user_id).await;
        if !result.first_today {
            return Ok(result);
        }

        let base = NewActivity::with_base_points(
            self.user_id.clone(),
            ActivityType::DailyCheckin,
            "Daily check-in",
        );
        self.client.award_points(&self.family_id, &base).await?;

        if result.bonus_points > 0 {
            let bonus = NewActivity {
                user_id: self.user_id.clone(),
                activity_type: ActivityType::StreakBonus,
                points_earned: result.bonus_points,
                description: format!("{}-day streak bonus", result.streak_days),
                related_entity_id: None,
                metadata: serde_json::Map::new(),
            };
            self.client.award_points(&self.family_id, &bonus).await?;
        }

        self.state.write().await.needs_refresh = true;
        Ok(result)
    }

    /// Append a points activity through the backend sink.
    pub async fn award(&self, activity: &NewActivity) -> Result<PointsActivity> {
        let created = self.client.award_points(&self.family_id, activity).await?;
        self.state.write().await.needs_refresh = true;
        Ok(created)
    }

    /// Create a family goal.
    pub async fn create_goal(&self, goal: &NewGoal) -> Result<FamilyGoal> {
        let created = self.client.create_goal(&self.family_id, goal).await?;
        self.state.write().await.needs_refresh = true;
        Ok(created)
    }

    /// Add points to a goal's progress.
    pub async fn add_goal_progress(&self, goal_id: &str, points: u32) -> Result<FamilyGoal> {
        let updated = self
            .client
            .add_goal_progress(&self.family_id, goal_id, points)
            .await?;
        self.state.write().await.needs_refresh = true;
        Ok(updated)
    }

    // ─── Realtime ────────────────────────────────────────────────────────────

    /// Spawn a debouncer that refreshes this session on realtime bursts.
    ///
    /// Feed it from the SDK's change stream via
    /// [`pump_events`](crate::services::pump_events). Dropping the returned
    /// handle cancels any pending reload.
    pub fn spawn_reload_debouncer(self: &Arc<Self>) -> ReloadDebouncer {
        let session = Arc::clone(self);
        ReloadDebouncer::spawn(self.config.debounce_window(), move || {
            let session = Arc::clone(&session);
            async move {
                session.refresh().await;
            }
        })
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────────

    /// Clear session state at sign-out.
    ///
    /// Local persistence (streaks, read markers) survives; the fetched
    /// family and feed do not. Later view calls return empty results and
    /// `family()` reports the missing context.
    pub async fn end(&self) {
        let mut state = self.state.write().await;
        *state = SessionData::default();
        tracing::info!(family_id = %self.family_id, "Session ended");
    }
}
