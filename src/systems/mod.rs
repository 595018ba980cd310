//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod render;

pub use render::{InitError, RenderError, RenderSystem};
