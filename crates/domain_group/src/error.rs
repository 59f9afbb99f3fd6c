//! Group domain errors

use thiserror::Error;

/// Errors that can occur in the group domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("Group name must not be empty")]
    EmptyName,

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Invitation not found: {0}")]
    InvitationNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Already a member or invited: {0}")]
    DuplicateMember(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("A group must keep at least one owner")]
    LastOwner,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
}
