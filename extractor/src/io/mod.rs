//! I/O helpers for extractor commands.

pub mod artifact_set;
pub mod config;
pub mod meta;
