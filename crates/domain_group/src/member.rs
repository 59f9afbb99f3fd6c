//! Group members and their roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{MemberId, UserId};

/// Role of a member within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl MemberRole {
    /// Can invite, revoke and remove members
    pub fn can_manage_members(&self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::Admin)
    }

    /// Can change other members' roles
    pub fn can_assign_roles(&self) -> bool {
        matches!(self, MemberRole::Owner)
    }

    /// Can add or edit shared expenses
    pub fn can_record_expenses(&self) -> bool {
        !matches!(self, MemberRole::Viewer)
    }

    /// Can set and change group budgets
    pub fn can_manage_budget(&self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::Admin)
    }

    pub fn can_view(&self) -> bool {
        true
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemberRole::Owner => "owner",
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
            MemberRole::Viewer => "viewer",
        };
        f.write_str(name)
    }
}

/// A member of a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub user_id: UserId,
    pub display_name: String,
    pub email: Option<String>,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// Creates a new member
    pub fn new(user_id: UserId, display_name: impl Into<String>, role: MemberRole) -> Self {
        Self {
            id: MemberId::new_v7(),
            user_id,
            display_name: display_name.into(),
            email: None,
            role,
            joined_at: Utc::now(),
        }
    }

    /// Sets the member's email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Label shown in balance tables: the display name, or the email if no name was given
    pub fn label(&self) -> String {
        let name = self.display_name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
        self.email.clone().unwrap_or_else(|| self.id.to_string())
    }

    /// Returns true if the email matches, ignoring case
    pub fn has_email(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(email.trim()))
    }
}
