//! Stable exit codes for the launcher binary.

/// The launcher always exits with this code, even when the delegated
/// `compose up` call fails or never starts.
pub const OK: i32 = 0;
