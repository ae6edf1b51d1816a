//! Shared helpers for input validation and resource limits.

pub mod validation;
