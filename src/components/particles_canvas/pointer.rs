//! Pointer-driven effects: grab lines, bubble highlighting and repulsion.
//!
//! These are free functions over a single particle; the caller decides which
//! modes are active and passes the pointer position or click explicitly.

use super::color::Rgb;
use super::interaction::{LinkSegment, link_opacity};
use super::options::{BubbleMode, GrabMode, LineLinkedOptions, OutMode, RepulseMode};
use super::particle::{CanvasSize, MIN_RADIUS, Particle, Point};

/// Strength of hover repulsion before clamping.
const REPULSE_VELOCITY: f64 = 100.0;

/// Most a single tick of repulsion may move a particle.
pub const MAX_REPULSE_STEP: f64 = 50.0;

/// Whether the pointer is over the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerStatus {
	/// No pointer over the canvas.
	#[default]
	Outside,
	/// Pointer over the canvas.
	Moving,
}

/// A click and the simulation time it happened at, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Click {
	/// Where the click landed.
	pub position: Point,
	/// When it landed.
	pub time: f64,
}

/// Pointer state as tracked by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	/// Last known pointer position.
	pub position: Option<Point>,
	/// Whether the pointer is over the canvas.
	pub status: PointerStatus,
	/// Most recent click.
	pub click: Option<Click>,
}

impl PointerState {
	/// Pointer position, only while the pointer is over the canvas.
	pub fn hover_position(&self) -> Option<Point> {
		match self.status {
			PointerStatus::Moving => self.position,
			PointerStatus::Outside => None,
		}
	}
}

/// A line from the particle to the pointer, fading out with distance.
pub fn grab(
	particle: &Particle,
	pointer: Point,
	grab: &GrabMode,
	line: &LineLinkedOptions,
	color: Rgb,
) -> Option<LinkSegment> {
	let distance = particle.position.distance(pointer);
	if distance > grab.distance {
		return None;
	}
	let opacity = link_opacity(distance, grab.distance, grab.line_linked.opacity);
	(opacity > 0.0).then(|| LinkSegment {
		from: particle.draw_position(),
		to: pointer,
		color,
		opacity,
		width: line.width,
	})
}

/// Hover bubble: the closer the pointer, the nearer the displayed radius,
/// opacity and color get to the bubble targets.
pub fn bubble_hover(
	particle: &mut Particle,
	pointer: Option<Point>,
	bubble: &BubbleMode,
	bubble_color: Option<Rgb>,
) {
	let Some(pointer) = pointer else {
		particle.bubble.clear();
		return;
	};
	let distance = particle.position.distance(pointer);
	if bubble.distance <= 0.0 || distance > bubble.distance {
		particle.bubble.clear();
		return;
	}
	apply_bubble(particle, 1.0 - distance / bubble.distance, bubble, bubble_color);
}

/// Click bubble: particles near the click grow toward the targets for one
/// `duration`, then shrink back over a second one. Returns false once the
/// effect has run its course.
pub fn bubble_click(
	particle: &mut Particle,
	click: Click,
	now: f64,
	bubble: &BubbleMode,
	bubble_color: Option<Rgb>,
) -> bool {
	let elapsed = (now - click.time).max(0.0);
	if bubble.duration <= 0.0 || elapsed >= bubble.duration * 2.0 {
		particle.bubble.clear();
		return false;
	}
	if particle.position.distance(click.position) > bubble.distance {
		particle.bubble.clear();
		return true;
	}

	let phase = elapsed / bubble.duration;
	let ratio = if phase <= 1.0 { phase } else { 2.0 - phase };
	apply_bubble(particle, ratio, bubble, bubble_color);
	true
}

fn apply_bubble(particle: &mut Particle, ratio: f64, bubble: &BubbleMode, color: Option<Rgb>) {
	let ratio = ratio.clamp(0.0, 1.0);
	let lerp = |from: f64, to: f64| from + (to - from) * ratio;

	particle.bubble.radius = Some(lerp(particle.radius, bubble.size).max(MIN_RADIUS));
	particle.bubble.opacity = Some(lerp(particle.opacity.value, bubble.opacity).clamp(0.0, 1.0));
	particle.bubble.color = color.map(|target| particle.color.to_rgb().lerp(target, ratio));
}

/// Hover repulse: shoves the particle directly away from the pointer.
/// Returns whether the particle was in range.
pub fn repulse_hover(
	particle: &mut Particle,
	pointer: Point,
	repulse: &RepulseMode,
	out_mode: OutMode,
	canvas: CanvasSize,
) -> bool {
	let dx = particle.position.x - pointer.x;
	let dy = particle.position.y - pointer.y;
	let distance = (dx * dx + dy * dy).sqrt();
	if repulse.distance <= 0.0 || distance > repulse.distance {
		return false;
	}

	let (nx, ny) = away_direction(particle, dx, dy, distance);
	let falloff = 1.0 - (distance / repulse.distance).powi(2);
	let step = (REPULSE_VELOCITY * falloff).clamp(0.0, MAX_REPULSE_STEP);
	let target = Point::new(particle.position.x + nx * step, particle.position.y + ny * step);

	if out_mode == OutMode::Bounce {
		let r = particle.radius;
		if target.x - r > 0.0 && target.x + r < canvas.width {
			particle.position.x = target.x;
		}
		if target.y - r > 0.0 && target.y + r < canvas.height {
			particle.position.y = target.y;
		}
	} else {
		particle.position = target;
	}
	true
}

/// Click repulse: gives the particle a velocity away from the click,
/// stronger the closer it is, and applies it immediately. Reach is capped at
/// `repulse.distance`. In bounce mode the step stops at the wall; the
/// velocity still points away from the click.
/// Returns whether the particle was in range.
pub fn repulse_click(
	particle: &mut Particle,
	click: Point,
	repulse: &RepulseMode,
	out_mode: OutMode,
	canvas: CanvasSize,
) -> bool {
	let dx = particle.position.x - click.x;
	let dy = particle.position.y - click.y;
	let dist_sq = dx * dx + dy * dy;
	let reach = (repulse.distance / 6.0).powi(3);
	if dist_sq > reach || dist_sq > repulse.distance * repulse.distance {
		return false;
	}

	let force = (reach / dist_sq.max(f64::EPSILON)).min(MAX_REPULSE_STEP);
	let (nx, ny) = away_direction(particle, dx, dy, dist_sq.sqrt());
	particle.velocity.horizontal = nx * force;
	particle.velocity.vertical = ny * force;

	let target_x = particle.position.x + particle.velocity.horizontal;
	let target_y = particle.position.y + particle.velocity.vertical;
	if out_mode == OutMode::Bounce {
		let r = particle.radius;
		particle.position.x = stop_at_wall(particle.position.x, target_x, r, canvas.width);
		particle.position.y = stop_at_wall(particle.position.y, target_y, r, canvas.height);
	} else {
		particle.position = Point::new(target_x, target_y);
	}
	true
}

/// Moves from `from` toward `to` along one axis, stopping at the edges of
/// `[r, extent - r]`. A particle already past the wall is not pushed farther
/// out.
fn stop_at_wall(from: f64, to: f64, r: f64, extent: f64) -> f64 {
	if extent < r * 2.0 {
		return to;
	}
	let (lo, hi) = (r, extent - r);
	if to > hi {
		to.min(from.max(hi))
	} else if to < lo {
		to.max(from.min(lo))
	} else {
		to
	}
}

/// Puts the particle back on its spawn velocity after a click repulse.
pub fn restore_velocity(particle: &mut Particle) {
	particle.velocity = particle.initial_velocity();
}

/// Unit vector from the pointer to the particle. A particle sitting exactly
/// on the pointer keeps its own heading, or goes right if it has none.
fn away_direction(particle: &Particle, dx: f64, dy: f64, distance: f64) -> (f64, f64) {
	if distance > f64::EPSILON {
		return (dx / distance, dy / distance);
	}
	let speed = particle.velocity.speed();
	if speed > f64::EPSILON {
		(
			particle.velocity.horizontal / speed,
			particle.velocity.vertical / speed,
		)
	} else {
		(1.0, 0.0)
	}
}
