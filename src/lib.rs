//! TapMath library exports for testing

pub mod content;
pub mod core;
pub mod tui;
