//! Group Domain
//!
//! A group is the unit of shared spending: its members split expenses,
//! share budgets and settle up with one another.
//!
//! # Roles
//!
//! - **Owner**: full control, including role assignment
//! - **Admin**: manages members, invitations and budgets
//! - **Member**: records expenses
//! - **Viewer**: read-only access
//!
//! # Invitation Lifecycle
//!
//! ```text
//! Pending -> Accepted | Declined | Revoked
//! ```

pub mod group;
pub mod member;
pub mod invitation;
pub mod error;

pub use group::Group;
pub use member::{Member, MemberRole};
pub use invitation::{Invitation, InvitationStatus};
pub use error::GroupError;
