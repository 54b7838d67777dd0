//! Test helpers module
//!
//! Mock Telegram gateways (in-memory and HTTP) and update fixtures shared by
//! the integration tests.

#![allow(dead_code)]

pub mod fixtures;
pub mod gateway;
pub mod telegram_mock;

pub use fixtures::*;
pub use gateway::*;
pub use telegram_mock::*;
