//! Animated particle field component.
//!
//! Renders a population of particles on an HTML canvas with:
//! - Per-frame motion with bounce, wrap or destroy at the canvas edges
//! - Size and opacity oscillation
//! - Link lines, attraction and elastic collisions between nearby particles
//! - Pointer grab, bubble and repulse effects, click push and remove
//!
//! The simulation core ([`ParticlesState`] and the free functions in
//! [`updater`], [`interaction`] and [`pointer`]) is independent of the
//! browser and draws through the [`Drawer`] trait.
//!
//! # Example
//!
//! ```ignore
//! use particles_canvas::{ParticlesCanvas, ParticlesOptions};
//!
//! let options = ParticlesOptions::from_json(r#"{"particles": {"number": {"value": 120}}}"#)?;
//!
//! view! { <ParticlesCanvas options=options.into() fullscreen=true /> }
//! ```

pub mod color;
mod component;
pub mod drawer;
mod error;
pub mod interaction;
pub mod options;
pub mod particle;
pub mod pointer;
mod render;
pub mod spawner;
mod state;
pub mod updater;

pub use component::ParticlesCanvas;
pub use drawer::{Appearance, Drawer, Stroke};
pub use error::ConfigError;
pub use options::ParticlesOptions;
pub use particle::{CanvasSize, Particle, Point, Shape, Velocity};
pub use render::{CanvasDrawer, ImageCache};
pub use state::{NOMINAL_FPS, ParticlesState};
