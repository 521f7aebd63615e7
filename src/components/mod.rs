//! UI components.

pub mod particles_canvas;
