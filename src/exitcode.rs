//! Exit codes used by the wrapper itself
//!
//! Once the wrapped CLI runs, its own exit code is passed through unchanged.

/// Successful termination
pub const OK: i32 = 0;

/// Any wrapper-side failure (credentials, lookup, arguments, CLI not found)
pub const FAILURE: i32 = 1;

/// Child killed by signal N exits with `SIGNAL_BASE + N` (shell convention)
pub const SIGNAL_BASE: i32 = 128;
