//! Octa - Spinning textured octahedron
//!
//! Library surface for the application modules so integration tests can
//! reach configuration and the render system.

pub mod config;
pub mod scene;
pub mod systems;
