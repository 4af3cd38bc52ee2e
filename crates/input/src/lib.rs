//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::Command`]s. Each key press
//! yields at most one command; repeats are left to the terminal.

pub mod map;

pub use heightview_types as types;

pub use map::{describe_key, handle_key_event, should_quit};
