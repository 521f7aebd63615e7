//! The particle container: owns the collection and drives it frame by frame.
//!
//! Each [`ParticlesState::tick`] runs the phases in a fixed order over the
//! whole collection: integrate, resolve boundaries, pairwise interactions,
//! pointer effects, then drop whatever was destroyed along the way.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::color::{Rgb, hex_to_rgb};
use super::drawer::{Drawer, Stroke, draw_frame};
use super::error::ConfigError;
use super::interaction::{LinkSegment, resolve_interactions};
use super::options::{ClickMode, HoverMode, OutMode, ParticlesOptions};
use super::particle::{CanvasSize, Particle, Point};
use super::pointer::{
	Click, PointerState, PointerStatus, bubble_click, bubble_hover, grab, repulse_click,
	repulse_hover, restore_velocity,
};
use super::spawner::Spawner;
use super::updater::{
	move_parallax, move_particle, resolve_boundary, update_opacity, update_size,
};

/// Frame rate at which `delta` is 1.0.
pub const NOMINAL_FPS: f64 = 60.0;

/// Owns the particle collection and everything a frame needs.
pub struct ParticlesState {
	options: ParticlesOptions,
	spawner: Spawner,
	rng: StdRng,
	canvas: CanvasSize,
	pointer: PointerState,
	particles: Vec<Particle>,
	/// Lines produced by the last tick, drawn under the particles.
	links: Vec<LinkSegment>,
	/// Simulation clock in seconds.
	time: f64,
	line_color: Rgb,
	bubble_color: Option<Rgb>,
	stroke: Option<Stroke>,
	/// Click repulse overrode velocities that still need restoring.
	repulsing: bool,
}

impl ParticlesState {
	/// Validates the options and populates a canvas of the given size.
	pub fn new(options: ParticlesOptions, width: f64, height: f64) -> Result<Self, ConfigError> {
		Self::with_rng(options, width, height, StdRng::from_entropy())
	}

	/// Like [`ParticlesState::new`] with a caller-provided generator.
	pub fn with_rng(
		options: ParticlesOptions,
		width: f64,
		height: f64,
		rng: StdRng,
	) -> Result<Self, ConfigError> {
		options.validate()?;
		let spawner = Spawner::new(&options.particles)?;
		let line_color = options.particles.line_linked.color_rgb()?;
		let bubble_color = options.interactivity.modes.bubble.color_rgb()?;
		let stroke_options = &options.particles.shape.stroke;
		let stroke = if stroke_options.width > 0.0 {
			Some(Stroke {
				width: stroke_options.width,
				color: hex_to_rgb(&stroke_options.color)?,
			})
		} else {
			None
		};

		let mut state = Self {
			options,
			spawner,
			rng,
			canvas: CanvasSize::new(width, height),
			pointer: PointerState::default(),
			particles: Vec::new(),
			links: Vec::new(),
			time: 0.0,
			line_color,
			bubble_color,
			stroke,
			repulsing: false,
		};
		let count = state.target_count();
		state.push(count, None);
		info!(
			"particles-canvas: spawned {} particles on {}x{}",
			state.particles.len(),
			width,
			height
		);
		Ok(state)
	}

	/// The validated options.
	pub fn options(&self) -> &ParticlesOptions {
		&self.options
	}

	/// Live particles, oldest first.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Lines produced by the last tick.
	pub fn links(&self) -> &[LinkSegment] {
		&self.links
	}

	/// Current canvas size.
	pub fn canvas(&self) -> CanvasSize {
		self.canvas
	}

	/// Current pointer state.
	pub fn pointer(&self) -> &PointerState {
		&self.pointer
	}

	/// Seconds of simulated time since construction.
	pub fn time(&self) -> f64 {
		self.time
	}

	fn target_count(&self) -> usize {
		self.options
			.particles
			.number
			.count_for(self.canvas.width, self.canvas.height)
	}

	/// Advances the simulation by one frame. `delta` is 1.0 at [`NOMINAL_FPS`].
	pub fn tick(&mut self, delta: f64) {
		self.time += delta / NOMINAL_FPS;

		let particle_options = &self.options.particles;
		let hover = &self.options.interactivity.events.onhover;
		let parallax = (hover.enable && hover.parallax.enable).then_some(&hover.parallax);
		let pointer = self.pointer.hover_position();

		for particle in &mut self.particles {
			move_particle(particle, &particle_options.movement, delta);
			if let Some(parallax) = parallax {
				move_parallax(particle, parallax, pointer, self.canvas);
			}
			update_size(particle, &particle_options.size, delta);
			update_opacity(particle, &particle_options.opacity, delta);
		}

		let out_mode = particle_options.movement.out_mode;
		for particle in self.particles.iter_mut().filter(|p| !p.is_destroyed()) {
			resolve_boundary(particle, self.canvas, out_mode);
		}

		self.links = resolve_interactions(&mut self.particles, particle_options, self.line_color);
		// Separating colliding pairs can push one through a wall.
		if out_mode == OutMode::Bounce && particle_options.movement.bounce {
			for particle in self.particles.iter_mut().filter(|p| !p.is_destroyed()) {
				resolve_boundary(particle, self.canvas, out_mode);
			}
		}
		self.apply_pointer_effects();

		let before = self.particles.len();
		self.particles.retain(|p| !p.is_destroyed());
		let removed = before - self.particles.len();
		if removed > 0 {
			debug!("particles-canvas: removed {removed} destroyed particles");
		}
	}

	fn apply_pointer_effects(&mut self) {
		let options = &self.options;
		let modes = &options.interactivity.modes;
		let out_mode = options.particles.movement.out_mode;
		let hover = self.pointer.hover_position();
		let live = self.particles.iter_mut().filter(|p| !p.is_destroyed());

		let grabbing = hover.filter(|_| options.hover_mode(HoverMode::Grab));
		let hover_repulse = hover.filter(|_| options.hover_mode(HoverMode::Repulse));

		let bubble = &modes.bubble;
		let click_bubble = self
			.pointer
			.click
			.filter(|click| options.click_mode(ClickMode::Bubble) && self.time - click.time < bubble.duration * 2.0);
		let hover_bubble = options.hover_mode(HoverMode::Bubble);
		let clear_bubble = options.click_mode(ClickMode::Bubble);

		let click_repulse = self
			.pointer
			.click
			.filter(|click| options.click_mode(ClickMode::Repulse) && self.time - click.time < modes.repulse.duration);
		let restore = click_repulse.is_none() && self.repulsing;

		for particle in live {
			if let Some(pointer) = grabbing {
				self.links.extend(grab(
					particle,
					pointer,
					&modes.grab,
					&options.particles.line_linked,
					self.line_color,
				));
			}
			if let Some(pointer) = hover_repulse {
				repulse_hover(particle, pointer, &modes.repulse, out_mode, self.canvas);
			}

			if let Some(click) = click_bubble {
				bubble_click(particle, click, self.time, bubble, self.bubble_color);
			} else if hover_bubble {
				bubble_hover(particle, hover, bubble, self.bubble_color);
			} else if clear_bubble {
				particle.bubble.clear();
			}

			if let Some(click) = click_repulse {
				repulse_click(particle, click.position, &modes.repulse, out_mode, self.canvas);
			} else if restore {
				restore_velocity(particle);
			}
		}
		self.repulsing = click_repulse.is_some();
	}

	/// Changes the canvas size and brings the population back to the
	/// density target. Without movement the field is re-seeded entirely.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.canvas = CanvasSize::new(width, height);
		if !self.options.particles.movement.enable {
			self.particles.clear();
		}

		let target = self.target_count();
		let current = self.particles.len();
		if current > target {
			self.remove(current - target);
		} else {
			self.push(target - current, None);
		}
		debug!(
			"particles-canvas: resized to {width}x{height}, {} particles",
			self.particles.len()
		);
	}

	/// Records the pointer at `position`, over the canvas.
	pub fn pointer_move(&mut self, position: Point) {
		self.pointer.position = Some(position);
		self.pointer.status = PointerStatus::Moving;
	}

	/// Records that the pointer left the canvas.
	pub fn pointer_leave(&mut self) {
		self.pointer.position = None;
		self.pointer.status = PointerStatus::Outside;
	}

	/// Handles a click at `position` according to the configured click modes.
	/// Bubble and repulse play out over the following ticks.
	pub fn click(&mut self, position: Point) {
		if !self.options.interactivity.events.onclick.enable {
			return;
		}
		self.pointer.click = Some(Click {
			position,
			time: self.time,
		});

		let modes = &self.options.interactivity.modes;
		let (push, remove) = (modes.push.particles_nb, modes.remove.particles_nb);
		if self.options.click_mode(ClickMode::Push) {
			let added = self.push(push, Some(position));
			debug!("particles-canvas: click pushed {added} particles");
		}
		if self.options.click_mode(ClickMode::Remove) {
			let removed = self.remove(remove);
			debug!("particles-canvas: click removed {removed} particles");
		}
	}

	/// Spawns up to `count` particles, respecting `number.limit`.
	/// Returns how many were added.
	pub fn push(&mut self, count: usize, position: Option<Point>) -> usize {
		let limit = self.options.particles.number.limit;
		let count = if limit > 0 {
			count.min(limit.saturating_sub(self.particles.len()))
		} else {
			count
		};

		self.particles.reserve(count);
		for _ in 0..count {
			let particle = self
				.spawner
				.spawn(&mut self.rng, self.canvas, &self.particles, position);
			self.particles.push(particle);
		}
		count
	}

	/// Drops up to `count` of the oldest particles. Returns how many went.
	pub fn remove(&mut self, count: usize) -> usize {
		let count = count.min(self.particles.len());
		self.particles.drain(..count);
		count
	}

	/// Draws the current frame: link lines first, then particles.
	pub fn render<D: Drawer + ?Sized>(&self, drawer: &mut D) {
		draw_frame(drawer, self.canvas, &self.particles, &self.links, self.stroke);
	}
}
