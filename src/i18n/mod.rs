//! Internationalization module
//!
//! System responses are fixed, operator-localized (zh-TW) strings. Only the
//! per-group message templates are configurable.

pub mod messages;
