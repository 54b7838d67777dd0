//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod policy;
pub mod invite_link;
pub mod member;

// Re-export commonly used models
pub use policy::{GroupPolicy, GroupLink, InviteLinkExpiry};
pub use invite_link::InviteLinkRecord;
pub use member::{MemberStatus, ChatInfo, AdminRights};
