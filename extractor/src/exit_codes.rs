//! Stable exit codes for extractor CLI commands.

/// Command succeeded; for `extract`, an optimal path was written.
pub const OK: i32 = 0;
/// Command failed due to unreadable input, invalid config, or other errors.
pub const INVALID: i32 = 1;
/// `extractor extract` finished with an error result (no init, no goal, no path).
pub const NOT_FOUND: i32 = 2;
