//! Application operations. Each takes the store explicitly, and the caller's
//! identity arrives as a `Session` or user id rather than ambient state.

pub mod identity;
pub mod posts;
pub mod reactions;
