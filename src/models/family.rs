//! Family and member models, as returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Member role within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    Adult,
    Child,
}

/// Display profile attached to a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    pub name: String,
    pub avatar_url: Option<String>,
}

/// One member of a family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyMember {
    pub user_id: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    pub profile: MemberProfile,
}

/// Family metadata with its member list embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    pub id: String,
    pub name: String,
    /// Code other users enter to join this family
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub members: Vec<FamilyMember>,
}

impl Family {
    /// Look up a member by user ID.
    pub fn member(&self, user_id: &str) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }
}
