//! The drawing capability the simulation renders through.
//!
//! The core never touches a canvas directly. A frame is handed to any
//! [`Drawer`]: the web build uses [`super::render::CanvasDrawer`], tests use
//! a recorder.

use std::f64::consts::{PI, TAU};

use super::color::{ParticleColor, Rgb};
use super::interaction::LinkSegment;
use super::particle::{CanvasSize, Particle, Point, Shape};

/// Inner radius of a star as a fraction of its outer radius.
pub const STAR_INSET: f64 = 0.5;

/// Outline drawn around every particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
	/// Outline width in pixels.
	pub width: f64,
	/// Outline color.
	pub color: Rgb,
}

/// What a particle looks like this frame, with bubble overrides applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance<'a> {
	/// Draw position, parallax offset included.
	pub position: Point,
	/// Displayed radius.
	pub radius: f64,
	/// Fill color.
	pub color: ParticleColor,
	/// Fill opacity in `[0, 1]`.
	pub opacity: f64,
	/// Outline to trace.
	pub shape: &'a Shape,
}

impl<'a> Appearance<'a> {
	/// Resolves the displayed values of `particle`.
	pub fn of(particle: &'a Particle) -> Self {
		let bubble = &particle.bubble;
		Self {
			position: particle.draw_position(),
			radius: bubble.radius.unwrap_or(particle.radius),
			color: bubble
				.color
				.map(ParticleColor::Rgb)
				.unwrap_or(particle.color),
			opacity: bubble.opacity.unwrap_or(particle.opacity.value),
			shape: &particle.shape,
		}
	}
}

/// A surface that can draw lines and particle shapes.
pub trait Drawer {
	/// Wipes the previous frame.
	fn clear(&mut self, canvas: CanvasSize);

	/// Strokes a link or grab line.
	fn draw_line(&mut self, segment: &LinkSegment);

	/// Fills one particle, outlining it when `stroke` is set.
	fn draw_particle(&mut self, appearance: &Appearance<'_>, stroke: Option<Stroke>);
}

/// Draws one frame: lines first so particles sit on top of them.
pub fn draw_frame<D: Drawer + ?Sized>(
	drawer: &mut D,
	canvas: CanvasSize,
	particles: &[Particle],
	lines: &[LinkSegment],
	stroke: Option<Stroke>,
) {
	drawer.clear(canvas);
	for line in lines {
		drawer.draw_line(line);
	}
	for particle in particles {
		drawer.draw_particle(&Appearance::of(particle), stroke);
	}
}

/// Vertices of a regular polygon inscribed in the particle's circle, first
/// vertex pointing up.
pub fn polygon_points(center: Point, radius: f64, sides: u32) -> Vec<Point> {
	let sides = sides.max(3);
	(0..sides)
		.map(|k| {
			let angle = -PI / 2.0 + k as f64 * TAU / sides as f64;
			Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
		})
		.collect()
}

/// Outline of a star with `points` tips, alternating outer and inner radius.
pub fn star_points(center: Point, radius: f64, points: u32) -> Vec<Point> {
	let points = points.max(3);
	let steps = points * 2;
	(0..steps)
		.map(|k| {
			let r = if k % 2 == 0 { radius } else { radius * STAR_INSET };
			let angle = -PI / 2.0 + k as f64 * PI / points as f64;
			Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
		})
		.collect()
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::particles_canvas::particle::{AnimationState, Opacity, Velocity};

	/// Records draw calls in order.
	#[derive(Debug, Default)]
	pub(crate) struct RecordingDrawer {
		pub clears: usize,
		pub lines: Vec<LinkSegment>,
		pub particles: Vec<(Point, f64, f64, ParticleColor)>,
		pub order: Vec<&'static str>,
	}

	impl Drawer for RecordingDrawer {
		fn clear(&mut self, _canvas: CanvasSize) {
			self.clears += 1;
			self.order.push("clear");
		}

		fn draw_line(&mut self, segment: &LinkSegment) {
			self.lines.push(*segment);
			self.order.push("line");
		}

		fn draw_particle(&mut self, appearance: &Appearance<'_>, _stroke: Option<Stroke>) {
			self.particles.push((
				appearance.position,
				appearance.radius,
				appearance.opacity,
				appearance.color,
			));
			self.order.push("particle");
		}
	}

	fn particle() -> Particle {
		Particle::new(
			Point::new(10.0, 10.0),
			3.0,
			Velocity::default(),
			ParticleColor::Rgb(Rgb::new(10, 20, 30)),
			Opacity {
				value: 0.4,
				animation: AnimationState::default(),
			},
			Shape::Circle,
		)
	}

	#[test]
	fn test_appearance_prefers_bubble_values() {
		let mut p = particle();
		let plain = Appearance::of(&p);
		assert_eq!(plain.radius, 3.0);
		assert_eq!(plain.opacity, 0.4);

		p.bubble.radius = Some(9.0);
		p.bubble.opacity = Some(0.9);
		p.bubble.color = Some(Rgb::WHITE);
		p.offset = Point::new(1.0, -1.0);
		let bubbled = Appearance::of(&p);
		assert_eq!(bubbled.radius, 9.0);
		assert_eq!(bubbled.opacity, 0.9);
		assert_eq!(bubbled.color, ParticleColor::Rgb(Rgb::WHITE));
		assert_eq!(bubbled.position, Point::new(11.0, 9.0));
	}

	#[test]
	fn test_frame_draws_lines_before_particles() {
		let mut drawer = RecordingDrawer::default();
		let segment = LinkSegment {
			from: Point::new(0.0, 0.0),
			to: Point::new(1.0, 1.0),
			color: Rgb::WHITE,
			opacity: 0.3,
			width: 1.0,
		};
		draw_frame(
			&mut drawer,
			CanvasSize::new(100.0, 100.0),
			&[particle(), particle()],
			&[segment],
			None,
		);
		assert_eq!(drawer.order, vec!["clear", "line", "particle", "particle"]);
	}

	#[test]
	fn test_polygon_points_lie_on_circle() {
		let center = Point::new(5.0, 5.0);
		let points = polygon_points(center, 2.0, 6);
		assert_eq!(points.len(), 6);
		for p in &points {
			assert!((p.distance(center) - 2.0).abs() < 1e-9);
		}
		assert!((points[0].y - 3.0).abs() < 1e-9);
		assert_eq!(polygon_points(center, 1.0, 1).len(), 3);
	}

	#[test]
	fn test_star_alternates_radii() {
		let center = Point::new(0.0, 0.0);
		let points = star_points(center, 4.0, 5);
		assert_eq!(points.len(), 10);
		assert!((points[0].distance(center) - 4.0).abs() < 1e-9);
		assert!((points[1].distance(center) - 2.0).abs() < 1e-9);
	}
}
