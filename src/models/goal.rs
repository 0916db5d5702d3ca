// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Family goal model with monotonic progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shared points target for the whole family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyGoal {
    /// Backend row ID
    pub id: String,
    /// Family the goal belongs to
    pub family_id: String,
    pub title: String,
    pub description: String,
    /// Points required to complete the goal (> 0)
    pub target_points: u32,
    /// Points accumulated so far; only ever increases until completion
    pub current_points: u32,
    /// Optional deadline (`YYYY-MM-DD`)
    pub target_date: Option<String>,
    /// True iff `current_points >= target_points`
    pub completed: bool,
    /// User who created the goal
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FamilyGoal {
    /// Apply earned points to the goal.
    ///
    /// Progress is monotonic: once `completed` flips to true, further calls
    /// are ignored. Returns `true` exactly once, on the call that completes
    /// the goal.
    pub fn add_points(&mut self, points: u32, now: DateTime<Utc>) -> bool {
        if self.completed {
            return false;
        }

        self.current_points = self.current_points.saturating_add(points);
        self.updated_at = now;

        if self.current_points >= self.target_points {
            self.completed = true;
            return true;
        }
        false
    }
}

/// Payload for creating a goal through the backend.
#[derive(Debug, Clone, Serialize)]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    pub target_points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    pub created_by: String,
}
