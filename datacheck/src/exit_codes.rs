//! Stable exit codes for datacheck CLI commands.

/// All checks passed.
pub const OK: i32 = 0;
/// One or more checks reported diagnostics.
pub const FAILED: i32 = 1;
/// The run could not start: dataset location missing or config invalid.
pub const ERROR: i32 = 2;
