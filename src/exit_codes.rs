//! Standard exit codes for the distribtest tools
//!
//! Shared by every binary in this crate so automation can tell a bad
//! catalog from an infrastructure failure.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Generic error (avoid using - be more specific)
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Unsupported target configuration in the catalog
pub const EXIT_CONFIG_ERROR: i32 = 102;
