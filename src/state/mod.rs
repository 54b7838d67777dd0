//! State management module
//!
//! This module holds the bot's only mutable, persisted state: the active
//! invite link of each private group.

pub mod storage;

pub use storage::InviteLinkStore;
