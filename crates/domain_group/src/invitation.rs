//! Invitations to join a group

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{InvitationId, MemberId};
use crate::error::GroupError;
use crate::member::MemberRole;

/// Invitation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Revoked,
}

/// An invitation sent to an email address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub email: String,
    pub role: MemberRole,
    pub invited_by: MemberId,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl Invitation {
    /// Creates a pending invitation
    pub fn new(email: impl Into<String>, role: MemberRole, invited_by: MemberId) -> Self {
        Self {
            id: InvitationId::new_v7(),
            email: email.into(),
            role,
            invited_by,
            status: InvitationStatus::Pending,
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    /// Moves the invitation to `status`
    ///
    /// Only pending invitations can change status.
    pub fn transition(&mut self, status: InvitationStatus) -> Result<(), GroupError> {
        if !self.can_transition_to(status) {
            return Err(GroupError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", status),
            });
        }
        self.status = status;
        self.responded_at = Some(Utc::now());
        Ok(())
    }

    fn can_transition_to(&self, target: InvitationStatus) -> bool {
        use InvitationStatus::*;
        matches!(
            (self.status, target),
            (Pending, Accepted) | (Pending, Declined) | (Pending, Revoked)
        )
    }
}
