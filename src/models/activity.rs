// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Points activity model: one recorded gamification event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of gamification event, as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    TaskCompleted,
    ShoppingItemCompleted,
    MemberAdded,
    DailyCheckin,
    EventCreated,
    GoalAchieved,
    StreakBonus,
    FamilyMilestone,
    /// Catch-all for types added server-side after this build shipped.
    #[serde(other)]
    Unknown,
}

impl ActivityType {
    /// Base points awarded when an event of this type is recorded.
    pub fn base_points(&self) -> u32 {
        match self {
            ActivityType::TaskCompleted => 10,
            ActivityType::ShoppingItemCompleted => 5,
            ActivityType::MemberAdded => 25,
            ActivityType::DailyCheckin => 5,
            ActivityType::EventCreated => 10,
            ActivityType::GoalAchieved => 50,
            ActivityType::StreakBonus => 50,
            ActivityType::FamilyMilestone => 100,
            ActivityType::Unknown => 0,
        }
    }

    /// Notification title for events of this type.
    pub fn notification_title(&self) -> &'static str {
        match self {
            ActivityType::TaskCompleted => "Task completed",
            ActivityType::ShoppingItemCompleted => "Shopping item checked off",
            ActivityType::MemberAdded => "New family member",
            ActivityType::DailyCheckin => "Daily check-in",
            ActivityType::EventCreated => "Event added to the calendar",
            ActivityType::GoalAchieved => "Family goal achieved",
            ActivityType::StreakBonus => "Streak bonus earned",
            ActivityType::FamilyMilestone => "Family milestone",
            ActivityType::Unknown => "Family activity",
        }
    }
}

/// One gamification event, owned by the backend. The client only reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsActivity {
    /// Backend row ID (unique)
    pub id: String,
    /// Family the event is scoped to
    pub family_id: String,
    /// User who earned the points
    pub user_id: String,
    /// Event kind
    pub activity_type: ActivityType,
    /// Points earned by this event
    pub points_earned: u32,
    /// Row the event refers to (task ID, shopping item ID, ...)
    pub related_entity_id: Option<String>,
    /// Human-readable description
    pub description: String,
    /// Open key-value bag
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// When the event was recorded
    pub created_at: DateTime<Utc>,
}

/// Payload for the points-award sink (backend appends the rest server-side).
#[derive(Debug, Clone, Serialize)]
pub struct NewActivity {
    pub user_id: String,
    pub activity_type: ActivityType,
    pub points_earned: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_entity_id: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl NewActivity {
    /// Build an award payload with the type's base point value.
    pub fn with_base_points(
        user_id: impl Into<String>,
        activity_type: ActivityType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            activity_type,
            points_earned: activity_type.base_points(),
            description: description.into(),
            related_entity_id: None,
            metadata: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_wire_format() {
        let json = serde_json::to_string(&ActivityType::ShoppingItemCompleted).unwrap();
        assert_eq!(json, "\"shopping_item_completed\"");

        let parsed: ActivityType = serde_json::from_str("\"task_completed\"").unwrap();
        assert_eq!(parsed, ActivityType::TaskCompleted);
    }

    #[test]
    fn test_unrecognized_type_falls_back() {
        let parsed: ActivityType = serde_json::from_str("\"pet_fed\"").unwrap();
        assert_eq!(parsed, ActivityType::Unknown);
        assert_eq!(parsed.notification_title(), "Family activity");
        assert_eq!(parsed.base_points(), 0);
    }

    #[test]
    fn test_activity_deserializes_without_metadata() {
        let json = r#"{
            "id": "a-1",
            "family_id": "f-1",
            "user_id": "u-1",
            "activity_type": "daily_checkin",
            "points_earned": 5,
            "related_entity_id": null,
            "description": "Checked in",
            "created_at": "2024-01-15T10:30:00Z"
        }"#;
        let activity: PointsActivity = serde_json::from_str(json).unwrap();
        assert!(activity.metadata.is_empty());
        assert_eq!(activity.points_earned, 5);
    }
}
