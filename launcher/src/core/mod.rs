//! Pure launcher logic. No filesystem or process access.

pub mod invocation;
pub mod outcome;
