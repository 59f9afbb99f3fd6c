//! The group aggregate
//!
//! All membership changes go through `Group` so that role checks and the
//! "at least one owner" rule are enforced in one place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::ValidateEmail;

use core_kernel::{Currency, GroupId, InvitationId, MemberId, UserId};
use crate::error::GroupError;
use crate::invitation::{Invitation, InvitationStatus};
use crate::member::{Member, MemberRole};

/// A shared-expense group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub currency: Currency,
    members: Vec<Member>,
    invitations: Vec<Invitation>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates a group with its creator as the sole owner
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` for a blank name, `InvalidEmail` if the owner's email is malformed
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        owner_user: UserId,
        owner_name: impl Into<String>,
        owner_email: Option<String>,
    ) -> Result<Self, GroupError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(GroupError::EmptyName);
        }

        let mut owner = Member::new(owner_user, owner_name, MemberRole::Owner);
        if let Some(email) = owner_email {
            owner = owner.with_email(normalize_email(&email)?);
        }

        let group = Self {
            id: GroupId::new_v7(),
            name,
            currency,
            members: vec![owner],
            invitations: Vec::new(),
            created_at: Utc::now(),
        };
        info!(group_id = %group.id, "Group created");
        Ok(group)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn member_by_user(&self, user: &UserId) -> Option<&Member> {
        self.members.iter().find(|m| &m.user_id == user)
    }

    pub fn pending_invitations(&self) -> impl Iterator<Item = &Invitation> {
        self.invitations.iter().filter(|i| i.is_pending())
    }

    /// Invites an email address to the group
    ///
    /// # Arguments
    ///
    /// * `actor` - The member sending the invitation
    /// * `email` - Invitee's email address
    /// * `role` - Role granted on acceptance; Owner cannot be granted this way
    pub fn invite(
        &mut self,
        actor: &MemberId,
        email: &str,
        role: MemberRole,
    ) -> Result<InvitationId, GroupError> {
        let actor_role = self.role_of(actor)?;
        if !actor_role.can_manage_members() {
            return Err(GroupError::PermissionDenied(format!(
                "{} cannot invite members",
                actor_role
            )));
        }
        if role == MemberRole::Owner {
            return Err(GroupError::PermissionDenied(
                "owner role cannot be granted by invitation".to_string(),
            ));
        }

        let email = normalize_email(email)?;
        let already_member = self.members.iter().any(|m| m.has_email(&email));
        let already_invited = self
            .pending_invitations()
            .any(|i| i.email.eq_ignore_ascii_case(&email));
        if already_member || already_invited {
            return Err(GroupError::DuplicateMember(email));
        }

        let invitation = Invitation::new(email, role, *actor);
        let id = invitation.id;
        self.invitations.push(invitation);
        debug!(group_id = %self.id, invitation_id = %id, "Invitation created");
        Ok(id)
    }

    /// Accepts a pending invitation, adding the invitee as a member
    pub fn accept_invitation(
        &mut self,
        id: &InvitationId,
        user: UserId,
        display_name: impl Into<String>,
    ) -> Result<MemberId, GroupError> {
        if self.member_by_user(&user).is_some() {
            return Err(GroupError::DuplicateMember(user.to_string()));
        }

        let invitation = self.invitation_mut(id)?;
        invitation.transition(InvitationStatus::Accepted)?;
        let member = Member::new(user, display_name, invitation.role)
            .with_email(invitation.email.clone());

        let member_id = member.id;
        self.members.push(member);
        info!(group_id = %self.id, member_id = %member_id, "Invitation accepted");
        Ok(member_id)
    }

    /// Declines a pending invitation
    pub fn decline_invitation(&mut self, id: &InvitationId) -> Result<(), GroupError> {
        self.invitation_mut(id)?.transition(InvitationStatus::Declined)
    }

    /// Revokes a pending invitation
    pub fn revoke_invitation(
        &mut self,
        actor: &MemberId,
        id: &InvitationId,
    ) -> Result<(), GroupError> {
        let actor_role = self.role_of(actor)?;
        if !actor_role.can_manage_members() {
            return Err(GroupError::PermissionDenied(format!(
                "{} cannot revoke invitations",
                actor_role
            )));
        }
        self.invitation_mut(id)?.transition(InvitationStatus::Revoked)
    }

    /// Changes a member's role
    ///
    /// Only owners can assign roles, and the last owner cannot be demoted.
    pub fn assign_role(
        &mut self,
        actor: &MemberId,
        target: &MemberId,
        role: MemberRole,
    ) -> Result<(), GroupError> {
        let actor_role = self.role_of(actor)?;
        if !actor_role.can_assign_roles() {
            return Err(GroupError::PermissionDenied(format!(
                "{} cannot assign roles",
                actor_role
            )));
        }

        let current = self.role_of(target)?;
        if current == MemberRole::Owner && role != MemberRole::Owner && self.owner_count() == 1 {
            return Err(GroupError::LastOwner);
        }

        if let Some(member) = self.members.iter_mut().find(|m| &m.id == target) {
            member.role = role;
        }
        info!(group_id = %self.id, member_id = %target, role = %role, "Role assigned");
        Ok(())
    }

    /// Removes a member from the group
    ///
    /// Members may always leave; removing someone else requires member management rights.
    pub fn remove_member(&mut self, actor: &MemberId, target: &MemberId) -> Result<Member, GroupError> {
        let actor_role = self.role_of(actor)?;
        if actor != target && !actor_role.can_manage_members() {
            return Err(GroupError::PermissionDenied(format!(
                "{} cannot remove members",
                actor_role
            )));
        }

        let target_role = self.role_of(target)?;
        if target_role == MemberRole::Owner {
            if actor != target && actor_role != MemberRole::Owner {
                return Err(GroupError::PermissionDenied(
                    "only owners can remove an owner".to_string(),
                ));
            }
            if self.owner_count() == 1 {
                return Err(GroupError::LastOwner);
            }
        }

        let index = self
            .members
            .iter()
            .position(|m| &m.id == target)
            .ok_or_else(|| GroupError::MemberNotFound(target.to_string()))?;
        let removed = self.members.remove(index);
        info!(group_id = %self.id, member_id = %target, "Member removed");
        Ok(removed)
    }

    fn role_of(&self, id: &MemberId) -> Result<MemberRole, GroupError> {
        self.member(id)
            .map(|m| m.role)
            .ok_or_else(|| GroupError::MemberNotFound(id.to_string()))
    }

    fn owner_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.role == MemberRole::Owner)
            .count()
    }

    fn invitation_mut(&mut self, id: &InvitationId) -> Result<&mut Invitation, GroupError> {
        self.invitations
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| GroupError::InvitationNotFound(id.to_string()))
    }
}

fn normalize_email(email: &str) -> Result<String, GroupError> {
    let email = email.trim().to_string();
    if !email.validate_email() {
        return Err(GroupError::InvalidEmail(email));
    }
    Ok(email)
}
