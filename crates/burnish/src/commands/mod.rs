//! Subcommands of the `burnish` binary.

pub mod rules;
pub mod validate;

/// No Fatal or Error findings
pub const EXIT_OK: i32 = 0;
/// Findings fail the run
pub const EXIT_FINDINGS: i32 = 1;
/// Bad configuration or nothing to validate
pub const EXIT_USAGE: i32 = 2;
