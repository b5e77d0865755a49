//! Tower middleware for the HTTP stack.

pub mod cors;
pub mod logging;
