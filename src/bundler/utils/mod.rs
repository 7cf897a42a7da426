//! Shared helpers for plan execution.

pub mod archive;
pub mod fs;
pub mod http;
