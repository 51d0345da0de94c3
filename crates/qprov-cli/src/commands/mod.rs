//! CLI command implementations.

pub mod common;
pub mod delete;
pub mod diff;
pub mod drift;
pub mod export;
pub mod list;
pub mod score;
pub mod show;
pub mod validate;
pub mod version;
