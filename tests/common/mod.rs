// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use family_points::models::{
    ActivityType, Family, FamilyMember, MemberProfile, MemberRole, PointsActivity,
};

/// Timestamp on day `n` of January 2024.
#[allow(dead_code)]
pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, n, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn make_activity(
    id: &str,
    user_id: &str,
    activity_type: ActivityType,
    points: u32,
    created_at: DateTime<Utc>,
) -> PointsActivity {
    PointsActivity {
        id: id.to_string(),
        family_id: "f-test".to_string(),
        user_id: user_id.to_string(),
        activity_type,
        points_earned: points,
        related_entity_id: None,
        description: format!("Test activity {}", id),
        metadata: serde_json::Map::new(),
        created_at,
    }
}

#[allow(dead_code)]
pub fn make_member(user_id: &str, name: &str, joined_at: DateTime<Utc>) -> FamilyMember {
    FamilyMember {
        user_id: user_id.to_string(),
        role: MemberRole::Adult,
        joined_at,
        profile: MemberProfile {
            name: name.to_string(),
            avatar_url: None,
        },
    }
}

#[allow(dead_code)]
pub fn make_family(members: Vec<FamilyMember>) -> Family {
    Family {
        id: "f-test".to_string(),
        name: "The Testers".to_string(),
        invite_code: "TEST42".to_string(),
        created_at: day(1),
        members,
    }
}
