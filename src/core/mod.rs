//! Core model — movie entries, the scroll model, list geometry, and the
//! interpolation engine.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod interpolate;
pub mod movie;
pub mod scroll;
pub mod window;
