//! Small helpers shared by the presentation layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Kept free of state-store and auth dependencies so pages and the CLI can
//! call them directly.

pub mod format;
pub mod theme;
