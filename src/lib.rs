//! Heightview (workspace facade crate).
//!
//! Re-exports the member crates as `heightview::{core,input,term,types}` and
//! carries the pieces only the binary needs: command-line configuration and
//! heightmap loading.

pub mod config;
pub mod loader;

pub use heightview_core as core;
pub use heightview_input as input;
pub use heightview_term as term;
pub use heightview_types as types;
