//! Pairwise particle interactions: link lines, attraction and collisions.
//!
//! The scan visits every unordered pair once, so it is O(n²) per frame and
//! only suitable for the few hundred particles a background effect uses.

use super::color::Rgb;
use super::options::{AttractOptions, LineLinkedOptions, ParticleOptions};
use super::particle::{Particle, Point};

/// Divisor scale for attraction, chosen so a pair 100px apart with
/// `rotate = 600` pulls about as hard as the classic linear formula.
const ATTRACT_SCALE: f64 = 10.0;

/// Extra gap left between colliding particles after they are pushed apart.
const SEPARATION_SLOP: f64 = 0.01;

/// A line to draw once the frame's interaction pass is complete.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkSegment {
	/// Start point, at the first particle.
	pub from: Point,
	/// End point.
	pub to: Point,
	/// Stroke color.
	pub color: Rgb,
	/// Stroke opacity.
	pub opacity: f64,
	/// Stroke width.
	pub width: f64,
}

/// Linear opacity falloff: `line_opacity` at distance 0, zero at `max_distance`.
pub fn link_opacity(distance: f64, max_distance: f64, line_opacity: f64) -> f64 {
	if max_distance <= 0.0 {
		return if distance <= 0.0 { line_opacity } else { 0.0 };
	}
	(line_opacity - distance / max_distance * line_opacity).max(0.0)
}

/// The connecting line between two particles, if they are close enough for
/// it to be visible.
pub fn link(
	p1: &Particle,
	p2: &Particle,
	line: &LineLinkedOptions,
	color: Rgb,
) -> Option<LinkSegment> {
	let distance = p1.position.distance(p2.position);
	if distance > line.distance {
		return None;
	}
	let opacity = link_opacity(distance, line.distance, line.opacity);
	(opacity > 0.0).then(|| LinkSegment {
		from: p1.draw_position(),
		to: p2.draw_position(),
		color,
		opacity,
		width: line.width,
	})
}

/// Pulls two particles toward each other, weaker the farther apart they are.
/// Touching particles are left alone.
pub fn attract(p1: &mut Particle, p2: &mut Particle, attract: &AttractOptions, max_distance: f64) {
	if attract.rotate_x <= 0.0 || attract.rotate_y <= 0.0 {
		return;
	}
	let dx = p1.position.x - p2.position.x;
	let dy = p1.position.y - p2.position.y;
	let distance = (dx * dx + dy * dy).sqrt();
	if distance > max_distance || distance <= p1.radius + p2.radius {
		return;
	}

	let dist_sq = distance * distance;
	let ax = dx * ATTRACT_SCALE / (attract.rotate_x * dist_sq);
	let ay = dy * ATTRACT_SCALE / (attract.rotate_y * dist_sq);

	p1.velocity.horizontal -= ax;
	p1.velocity.vertical -= ay;
	p2.velocity.horizontal += ax;
	p2.velocity.vertical += ay;
}

/// Resolves an overlap as an equal-mass elastic collision.
///
/// Approaching particles exchange the velocity components along the
/// collision normal, which keeps the sum of squared speeds, and both are
/// pushed apart so they no longer intersect. Returns whether they collided.
pub fn bounce(p1: &mut Particle, p2: &mut Particle) -> bool {
	let dx = p2.position.x - p1.position.x;
	let dy = p2.position.y - p1.position.y;
	let distance = (dx * dx + dy * dy).sqrt();
	let min_distance = p1.radius + p2.radius;
	if distance > min_distance {
		return false;
	}

	let (nx, ny) = if distance > f64::EPSILON {
		(dx / distance, dy / distance)
	} else {
		(1.0, 0.0)
	};

	let v1n = p1.velocity.horizontal * nx + p1.velocity.vertical * ny;
	let v2n = p2.velocity.horizontal * nx + p2.velocity.vertical * ny;
	if v1n > v2n {
		let exchange = v2n - v1n;
		p1.velocity.horizontal += exchange * nx;
		p1.velocity.vertical += exchange * ny;
		p2.velocity.horizontal -= exchange * nx;
		p2.velocity.vertical -= exchange * ny;
	}

	let push = (min_distance - distance + SEPARATION_SLOP) / 2.0;
	p1.position.x -= nx * push;
	p1.position.y -= ny * push;
	p2.position.x += nx * push;
	p2.position.y += ny * push;
	true
}

/// Runs link, attract and bounce over every pair of live particles and
/// returns the link lines to draw.
pub fn resolve_interactions(
	particles: &mut [Particle],
	options: &ParticleOptions,
	line_color: Rgb,
) -> Vec<LinkSegment> {
	let line = &options.line_linked;
	let movement = &options.movement;
	let mut links = Vec::new();
	if !(line.enable || movement.attract.enable || movement.bounce) {
		return links;
	}

	for i in 0..particles.len() {
		let (head, tail) = particles.split_at_mut(i + 1);
		let p1 = &mut head[i];
		if p1.is_destroyed() {
			continue;
		}

		for p2 in tail.iter_mut().filter(|p| !p.is_destroyed()) {
			if line.enable {
				links.extend(link(p1, p2, line, line_color));
			}
			if movement.attract.enable {
				attract(p1, p2, &movement.attract, line.distance);
			}
			if movement.bounce {
				bounce(p1, p2);
			}
		}
	}

	links
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particles_canvas::color::ParticleColor;
	use crate::components::particles_canvas::particle::{AnimationState, Opacity, Shape, Velocity};

	fn particle(x: f64, y: f64, radius: f64, vx: f64, vy: f64) -> Particle {
		Particle::new(
			Point::new(x, y),
			radius,
			Velocity::new(vx, vy),
			ParticleColor::Rgb(Rgb::WHITE),
			Opacity {
				value: 1.0,
				animation: AnimationState::default(),
			},
			Shape::Circle,
		)
	}

	#[test]
	fn test_link_opacity_falloff() {
		assert_eq!(link_opacity(0.0, 150.0, 0.4), 0.4);
		assert_eq!(link_opacity(150.0, 150.0, 0.4), 0.0);
		assert!((link_opacity(75.0, 150.0, 0.4) - 0.2).abs() < 1e-12);
		assert_eq!(link_opacity(300.0, 150.0, 0.4), 0.0);
	}

	#[test]
	fn test_link_opacity_zero_max_distance() {
		assert_eq!(link_opacity(0.0, 0.0, 0.7), 0.7);
		assert_eq!(link_opacity(1.0, 0.0, 0.7), 0.0);
		assert!(!link_opacity(0.0, 0.0, 0.7).is_nan());
	}

	#[test]
	fn test_link_segment_uses_draw_positions() {
		let line = LineLinkedOptions::default();
		let mut a = particle(10.0, 10.0, 1.0, 0.0, 0.0);
		a.offset = Point::new(1.0, 1.0);
		let b = particle(10.0, 10.0, 1.0, 0.0, 0.0);

		let segment = link(&a, &b, &line, Rgb::WHITE).unwrap();
		assert_eq!(segment.opacity, line.opacity);
		assert_eq!(segment.from, Point::new(11.0, 11.0));
		assert_eq!(segment.to, Point::new(10.0, 10.0));

		let far = particle(10.0 + line.distance, 10.0, 1.0, 0.0, 0.0);
		assert!(link(&b, &far, &line, Rgb::WHITE).is_none());
	}

	#[test]
	fn test_resolve_collects_links_for_close_pairs() {
		let options = ParticleOptions::default();
		let mut particles = vec![
			particle(0.0, 0.0, 1.0, 0.0, 0.0),
			particle(30.0, 0.0, 1.0, 0.0, 0.0),
			particle(1000.0, 1000.0, 1.0, 0.0, 0.0),
		];
		let links = resolve_interactions(&mut particles, &options, Rgb::WHITE);
		assert_eq!(links.len(), 1);
		assert_eq!(links[0].to, Point::new(30.0, 0.0));
	}

	#[test]
	fn test_attract_pulls_together() {
		let attract_options = AttractOptions {
			enable: true,
			..AttractOptions::default()
		};
		let mut a = particle(0.0, 0.0, 1.0, 0.0, 0.0);
		let mut b = particle(100.0, 50.0, 1.0, 0.0, 0.0);
		attract(&mut a, &mut b, &attract_options, 150.0);

		assert!(a.velocity.horizontal > 0.0 && a.velocity.vertical > 0.0);
		assert!(b.velocity.horizontal < 0.0 && b.velocity.vertical < 0.0);
		assert_eq!(a.velocity.horizontal, -b.velocity.horizontal);
	}

	#[test]
	fn test_attract_is_weaker_farther_away() {
		let attract_options = AttractOptions::default();
		let pull_at = |d: f64| {
			let mut a = particle(0.0, 0.0, 1.0, 0.0, 0.0);
			let mut b = particle(d, 0.0, 1.0, 0.0, 0.0);
			attract(&mut a, &mut b, &attract_options, 500.0);
			a.velocity.horizontal
		};
		assert!(pull_at(20.0) > pull_at(200.0));
		assert_eq!(pull_at(1.5), 0.0);
		assert_eq!(pull_at(600.0), 0.0);
	}

	#[test]
	fn test_head_on_bounce_separates() {
		let mut a = particle(50.0, 50.0, 5.0, 1.0, 0.0);
		let mut b = particle(55.0, 50.0, 5.0, -1.0, 0.0);
		let energy = |p: &Particle| p.velocity.speed().powi(2);
		let before = energy(&a) + energy(&b);

		assert!(bounce(&mut a, &mut b));
		assert_eq!(a.velocity, Velocity::new(-1.0, 0.0));
		assert_eq!(b.velocity, Velocity::new(1.0, 0.0));
		assert!((energy(&a) + energy(&b) - before).abs() < 1e-12);
		assert!(a.position.distance(b.position) > a.radius + b.radius);

		let gap = a.position.distance(b.position);
		a.position.x += a.velocity.horizontal;
		b.position.x += b.velocity.horizontal;
		assert!(a.position.distance(b.position) > gap);
	}

	#[test]
	fn test_bounce_at_zero_distance() {
		let mut a = particle(50.0, 50.0, 5.0, 0.0, 0.0);
		let mut b = particle(50.0, 50.0, 5.0, 0.0, 0.0);
		assert!(bounce(&mut a, &mut b));
		assert!(a.position.x < b.position.x);
		assert!(a.position.distance(b.position) > 10.0);
		assert!(!a.position.x.is_nan() && !a.velocity.horizontal.is_nan());
	}

	#[test]
	fn test_separating_pair_keeps_velocity() {
		let mut a = particle(50.0, 50.0, 5.0, -1.0, 0.0);
		let mut b = particle(55.0, 50.0, 5.0, 1.0, 0.0);
		bounce(&mut a, &mut b);
		assert_eq!(a.velocity, Velocity::new(-1.0, 0.0));
		assert_eq!(b.velocity, Velocity::new(1.0, 0.0));
	}

	#[test]
	fn test_no_bounce_when_apart() {
		let mut a = particle(0.0, 0.0, 5.0, 1.0, 0.0);
		let mut b = particle(20.0, 0.0, 5.0, -1.0, 0.0);
		assert!(!bounce(&mut a, &mut b));
		assert_eq!(a.position, Point::new(0.0, 0.0));
	}
}
