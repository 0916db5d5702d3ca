// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily check-in streak tracking.
//!
//! Streak state lives in the local key-value store, one blob per user, plus
//! a fast-path day marker. The read-modify-write is not atomic, so a
//! per-user guard rejects re-entrant calls instead of letting them race.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{ActivityType, CheckInResult, StreakData};
use crate::store::{keys, KeyValueStore};
use crate::time_utils::{format_day, parse_day, previous_day};

/// A streak bonus fires every time the streak reaches a multiple of this.
const STREAK_BONUS_INTERVAL: u32 = 7;

/// Tracks consecutive-day check-ins per user.
pub struct StreakTracker {
    store: Arc<dyn KeyValueStore>,
    /// Per-user guard serializing the check-in read-modify-write.
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl StreakTracker {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            in_flight: DashMap::new(),
        }
    }

    /// Record today's check-in for `user_id`.
    ///
    /// Idempotent within a calendar day: repeat calls return
    /// `first_today = false` and change nothing.
    pub async fn daily_check_in(&self, user_id: &str) -> CheckInResult {
        self.check_in_on(user_id, Utc::now().date_naive()).await
    }

    /// Record a check-in for an explicit calendar day.
    ///
    /// [`daily_check_in`](Self::daily_check_in) supplies today's date; the
    /// day is a parameter so calendar logic stays deterministic.
    ///
    /// A second call for the same user while one is in flight is rejected
    /// with the zero-effect result, as is any storage failure: a failed
    /// attempt must never look like a successful first check-in, or points
    /// could be awarded twice.
    pub async fn check_in_on(&self, user_id: &str, today: NaiveDate) -> CheckInResult {
        let guard = self
            .in_flight
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let Ok(_held) = guard.try_lock() else {
            tracing::warn!(user_id, "Check-in already in flight, ignoring");
            return CheckInResult::no_effect();
        };

        match self.try_check_in(user_id, today).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Check-in failed, treating as not checked in");
                CheckInResult::no_effect()
            }
        }
    }

    /// Current streak state for `user_id` (default when never checked in).
    pub async fn streak_data(&self, user_id: &str) -> Result<StreakData> {
        match self.store.get(&keys::streak(user_id)).await? {
            Some(blob) => serde_json::from_str(&blob)
                .map_err(|e| AppError::Storage(format!("Corrupt streak blob: {}", e))),
            None => Ok(StreakData::default()),
        }
    }

    async fn try_check_in(&self, user_id: &str, today: NaiveDate) -> Result<CheckInResult> {
        let today_stamp = format_day(today);
        let marker_key = keys::check_in_marker(user_id);

        // Fast path: the day marker says we already checked in today.
        if let Some(marker) = self.store.get(&marker_key).await? {
            if marker == today_stamp {
                let data = self.streak_data(user_id).await?;
                return Ok(CheckInResult {
                    first_today: false,
                    streak_days: data.current_streak,
                    bonus_points: 0,
                });
            }
        }

        let mut data = self.streak_data(user_id).await?;
        let last = data.last_check_in.as_deref().and_then(parse_day);

        if let Some(last) = last {
            // `last_check_in` is monotone. `last == today` means the marker
            // write was lost last time; `last > today` means the clock went
            // backwards. Neither may re-award.
            if last >= today {
                self.store.set(&marker_key, &format_day(last)).await?;
                return Ok(CheckInResult {
                    first_today: false,
                    streak_days: data.current_streak,
                    bonus_points: 0,
                });
            }

            if previous_day(today) == Some(last) {
                data.current_streak += 1;
            } else {
                data.current_streak = 1;
            }
        } else {
            data.current_streak = 1;
        }

        data.longest_streak = data.longest_streak.max(data.current_streak);

        let bonus_points = if data.current_streak >= STREAK_BONUS_INTERVAL
            && data.current_streak % STREAK_BONUS_INTERVAL == 0
        {
            ActivityType::StreakBonus.base_points()
        } else {
            0
        };
        data.streak_bonus_earned = bonus_points > 0;
        data.last_check_in = Some(today_stamp.clone());

        // Blob before marker: if the marker write is lost, the next attempt
        // sees `last_check_in == today` above and stays idempotent.
        let blob = serde_json::to_string(&data)
            .map_err(|e| AppError::Storage(format!("Failed to encode streak blob: {}", e)))?;
        self.store.set(&keys::streak(user_id), &blob).await?;
        self.store.set(&marker_key, &today_stamp).await?;

        tracing::info!(
            user_id,
            streak = data.current_streak,
            bonus_points,
            "Daily check-in recorded"
        );

        Ok(CheckInResult {
            first_today: true,
            streak_days: data.current_streak,
            bonus_points,
        })
    }
}
