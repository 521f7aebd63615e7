//! Per-tick motion: integration, size/opacity oscillation, parallax, and the
//! out-of-canvas policy applied afterwards.

use super::options::{
	AnimationOptions, DestroyMode, MoveOptions, OpacityOptions, OutMode, ParallaxOptions,
	SizeOptions,
};
use super::particle::{
	AnimationState, AnimationStatus, CanvasSize, MIN_RADIUS, Particle, Point,
};

/// Advances position by one tick of velocity.
///
/// `delta` is the host's frame-time multiplier (1.0 at the nominal rate).
pub fn move_particle(particle: &mut Particle, movement: &MoveOptions, delta: f64) {
	if !movement.enable {
		return;
	}
	let step = movement.speed / 2.0 * delta;
	particle.position.x += particle.velocity.horizontal * step;
	particle.position.y += particle.velocity.vertical * step;
}

/// Eases the parallax offset toward a pointer-driven target, or back toward
/// zero when there is no pointer.
pub fn move_parallax(
	particle: &mut Particle,
	parallax: &ParallaxOptions,
	pointer: Option<Point>,
	canvas: CanvasSize,
) {
	if !parallax.enable || parallax.force <= 0.0 || parallax.smooth <= 0.0 {
		return;
	}

	let target = match pointer {
		Some(pointer) => {
			let center = canvas.center();
			let scale = particle.radius / parallax.force;
			Point::new((pointer.x - center.x) * scale, (pointer.y - center.y) * scale)
		}
		None => Point::default(),
	};

	particle.offset.x += (target.x - particle.offset.x) / parallax.smooth;
	particle.offset.y += (target.y - particle.offset.y) / parallax.smooth;
}

/// Oscillates the radius between the animation minimum and the configured size.
pub fn update_size(particle: &mut Particle, size: &SizeOptions, delta: f64) {
	if !size.anim.enable {
		return;
	}
	let min = size.anim.min.max(MIN_RADIUS);
	let max = size.value.max(min);
	let destroy = oscillate(
		&mut particle.radius,
		&mut particle.size,
		(min, max),
		&size.anim,
		delta,
	);
	if destroy {
		particle.mark_destroyed();
	}
}

/// Oscillates opacity between the animation minimum and the configured opacity.
pub fn update_opacity(particle: &mut Particle, opacity: &OpacityOptions, delta: f64) {
	if !opacity.anim.enable {
		return;
	}
	let min = opacity.anim.min.clamp(0.0, 1.0);
	let max = opacity.value.clamp(min, 1.0);
	let destroy = oscillate(
		&mut particle.opacity.value,
		&mut particle.opacity.animation,
		(min, max),
		&opacity.anim,
		delta,
	);
	if destroy {
		particle.mark_destroyed();
	}
}

/// Ping-pongs `value` inside `bounds`. Returns true when a bound was hit
/// that the destroy policy says ends the particle.
fn oscillate(
	value: &mut f64,
	state: &mut AnimationState,
	(min, max): (f64, f64),
	anim: &AnimationOptions,
	delta: f64,
) -> bool {
	let (Some(status), Some(velocity)) = (state.status, state.velocity) else {
		return false;
	};

	match status {
		AnimationStatus::Increasing => {
			*value += velocity * delta;
			if *value >= max {
				*value = max;
				if anim.destroy == DestroyMode::Max {
					return true;
				}
				state.status = Some(AnimationStatus::Decreasing);
			}
		}
		AnimationStatus::Decreasing => {
			*value -= velocity * delta;
			if *value <= min {
				*value = min;
				if anim.destroy == DestroyMode::Min {
					return true;
				}
				state.status = Some(AnimationStatus::Increasing);
			}
		}
	}
	false
}

/// What a boundary pass did to a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryOutcome {
	/// No correction was needed.
	Unchanged,
	/// Clamped to an edge with velocity reflected.
	Bounced,
	/// Teleported to the opposite edge.
	Wrapped,
	/// Left the canvas and was marked destroyed.
	Destroyed,
}

/// Applies the out-mode policy to a particle after integration.
pub fn resolve_boundary(
	particle: &mut Particle,
	canvas: CanvasSize,
	out_mode: OutMode,
) -> BoundaryOutcome {
	match out_mode {
		OutMode::Bounce => bounce_off_edges(particle, canvas),
		OutMode::Out => wrap_around(particle, canvas),
		OutMode::Destroy => {
			if fully_outside(particle, canvas) {
				particle.mark_destroyed();
				BoundaryOutcome::Destroyed
			} else {
				BoundaryOutcome::Unchanged
			}
		}
		OutMode::None => BoundaryOutcome::Unchanged,
	}
}

fn bounce_off_edges(particle: &mut Particle, canvas: CanvasSize) -> BoundaryOutcome {
	let r = particle.radius;
	let mut outcome = BoundaryOutcome::Unchanged;

	if particle.position.x + r > canvas.width {
		particle.position.x = canvas.width - r;
		particle.velocity.horizontal = -particle.velocity.horizontal.abs();
		outcome = BoundaryOutcome::Bounced;
	} else if particle.position.x - r < 0.0 {
		particle.position.x = r;
		particle.velocity.horizontal = particle.velocity.horizontal.abs();
		outcome = BoundaryOutcome::Bounced;
	}

	if particle.position.y + r > canvas.height {
		particle.position.y = canvas.height - r;
		particle.velocity.vertical = -particle.velocity.vertical.abs();
		outcome = BoundaryOutcome::Bounced;
	} else if particle.position.y - r < 0.0 {
		particle.position.y = r;
		particle.velocity.vertical = particle.velocity.vertical.abs();
		outcome = BoundaryOutcome::Bounced;
	}

	outcome
}

fn wrap_around(particle: &mut Particle, canvas: CanvasSize) -> BoundaryOutcome {
	let r = particle.radius;
	let mut outcome = BoundaryOutcome::Unchanged;

	if particle.position.x - r > canvas.width {
		particle.position.x = -r;
		outcome = BoundaryOutcome::Wrapped;
	} else if particle.position.x + r < 0.0 {
		particle.position.x = canvas.width + r;
		outcome = BoundaryOutcome::Wrapped;
	}

	if particle.position.y - r > canvas.height {
		particle.position.y = -r;
		outcome = BoundaryOutcome::Wrapped;
	} else if particle.position.y + r < 0.0 {
		particle.position.y = canvas.height + r;
		outcome = BoundaryOutcome::Wrapped;
	}

	outcome
}

fn fully_outside(particle: &Particle, canvas: CanvasSize) -> bool {
	let (p, r) = (particle.position, particle.radius);
	p.x - r > canvas.width || p.x + r < 0.0 || p.y - r > canvas.height || p.y + r < 0.0
}

/// True when a circle at `candidate` would touch any particle in `existing`.
pub fn check_overlap(candidate: Point, radius: f64, existing: &[Particle]) -> bool {
	existing
		.iter()
		.any(|other| candidate.distance(other.position) <= radius + other.radius)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particles_canvas::color::{ParticleColor, Rgb};
	use crate::components::particles_canvas::particle::{Opacity, Shape, Velocity};

	const CANVAS: CanvasSize = CanvasSize::new(100.0, 100.0);

	fn particle(x: f64, y: f64, radius: f64, vx: f64, vy: f64) -> Particle {
		Particle::new(
			Point::new(x, y),
			radius,
			Velocity::new(vx, vy),
			ParticleColor::Rgb(Rgb::WHITE),
			Opacity {
				value: 0.5,
				animation: AnimationState::default(),
			},
			Shape::Circle,
		)
	}

	#[test]
	fn test_move_scales_with_speed_and_delta() {
		let movement = MoveOptions {
			speed: 2.0,
			..MoveOptions::default()
		};
		let mut p = particle(10.0, 10.0, 1.0, 1.0, 2.0);
		move_particle(&mut p, &movement, 1.0);
		assert_eq!(p.position, Point::new(11.0, 12.0));
		move_particle(&mut p, &movement, 0.5);
		assert_eq!(p.position, Point::new(11.5, 13.0));

		let frozen = MoveOptions {
			enable: false,
			..movement
		};
		move_particle(&mut p, &frozen, 1.0);
		assert_eq!(p.position, Point::new(11.5, 13.0));
	}

	#[test]
	fn test_bounce_flips_velocity_at_right_edge() {
		let r = 10.0;
		let mut p = particle(CANVAS.width - r / 2.0, 50.0, r, 2.0, 0.5);
		let outcome = resolve_boundary(&mut p, CANVAS, OutMode::Bounce);

		assert_eq!(outcome, BoundaryOutcome::Bounced);
		assert!(p.velocity.horizontal < 0.0);
		assert!(p.position.x <= CANVAS.width - r);
		assert_eq!(p.velocity.vertical, 0.5);
	}

	#[test]
	fn test_bounce_at_top_left_corner() {
		let mut p = particle(-3.0, 2.0, 5.0, -1.0, -1.0);
		resolve_boundary(&mut p, CANVAS, OutMode::Bounce);
		assert_eq!(p.position, Point::new(5.0, 5.0));
		assert_eq!(p.velocity, Velocity::new(1.0, 1.0));
	}

	#[test]
	fn test_boundary_pass_is_idempotent() {
		for mode in [OutMode::Bounce, OutMode::Out, OutMode::Destroy, OutMode::None] {
			let mut p = particle(40.0, 60.0, 5.0, 1.0, -1.0);
			let before = p.clone();
			assert_eq!(resolve_boundary(&mut p, CANVAS, mode), BoundaryOutcome::Unchanged);
			assert_eq!(resolve_boundary(&mut p, CANVAS, mode), BoundaryOutcome::Unchanged);
			assert_eq!(p, before);
		}

		let mut edge = particle(99.0, 50.0, 5.0, 3.0, 0.0);
		resolve_boundary(&mut edge, CANVAS, OutMode::Bounce);
		let corrected = edge.clone();
		assert_eq!(
			resolve_boundary(&mut edge, CANVAS, OutMode::Bounce),
			BoundaryOutcome::Unchanged
		);
		assert_eq!(edge, corrected);
	}

	#[test]
	fn test_wrap_teleports_to_opposite_edge() {
		let mut p = particle(CANVAS.width + 6.0, 30.0, 5.0, 1.0, 0.0);
		assert_eq!(
			resolve_boundary(&mut p, CANVAS, OutMode::Out),
			BoundaryOutcome::Wrapped
		);
		assert_eq!(p.position, Point::new(-5.0, 30.0));

		let mut p = particle(30.0, -6.0, 5.0, 0.0, -1.0);
		resolve_boundary(&mut p, CANVAS, OutMode::Out);
		assert_eq!(p.position, Point::new(30.0, CANVAS.height + 5.0));
	}

	#[test]
	fn test_destroy_only_when_fully_outside() {
		let mut partial = particle(CANVAS.width + 2.0, 50.0, 5.0, 1.0, 0.0);
		resolve_boundary(&mut partial, CANVAS, OutMode::Destroy);
		assert!(!partial.is_destroyed());

		let mut gone = particle(CANVAS.width + 6.0, 50.0, 5.0, 1.0, 0.0);
		assert_eq!(
			resolve_boundary(&mut gone, CANVAS, OutMode::Destroy),
			BoundaryOutcome::Destroyed
		);
		assert!(gone.is_destroyed());
	}

	#[test]
	fn test_none_lets_particles_leave() {
		let mut p = particle(-50.0, 500.0, 5.0, -1.0, 1.0);
		resolve_boundary(&mut p, CANVAS, OutMode::None);
		assert_eq!(p.position, Point::new(-50.0, 500.0));
		assert!(!p.is_destroyed());
	}

	#[test]
	fn test_size_ping_pong() {
		let mut size = SizeOptions::default();
		size.value = 3.0;
		size.anim.enable = true;
		size.anim.min = 1.0;

		let mut p = particle(50.0, 50.0, 3.0, 0.0, 0.0);
		p.size = AnimationState::enabled(1.0);

		update_size(&mut p, &size, 1.0);
		assert_eq!(p.radius, 2.0);
		update_size(&mut p, &size, 1.0);
		assert_eq!(p.radius, 1.0);
		assert_eq!(p.size.status, Some(AnimationStatus::Increasing));
		update_size(&mut p, &size, 1.0);
		update_size(&mut p, &size, 1.0);
		assert_eq!(p.radius, 3.0);
		assert_eq!(p.size.status, Some(AnimationStatus::Decreasing));
		assert!(!p.is_destroyed());
	}

	#[test]
	fn test_size_destroy_at_min() {
		let mut size = SizeOptions::default();
		size.anim.enable = true;
		size.anim.min = 1.0;
		size.anim.destroy = DestroyMode::Min;

		let mut p = particle(50.0, 50.0, 1.5, 0.0, 0.0);
		p.size = AnimationState::enabled(1.0);
		update_size(&mut p, &size, 1.0);
		assert!(p.is_destroyed());
		assert_eq!(p.radius, 1.0);
	}

	#[test]
	fn test_destroy_at_max() {
		let mut size = SizeOptions::default();
		size.anim.enable = true;
		size.anim.destroy = DestroyMode::Max;

		let mut p = particle(50.0, 50.0, 2.9, 0.0, 0.0);
		p.size = AnimationState {
			status: Some(AnimationStatus::Increasing),
			velocity: Some(0.5),
		};
		update_size(&mut p, &size, 1.0);
		assert!(p.is_destroyed());
		assert_eq!(p.radius, 3.0);

		let mut opacity = OpacityOptions::default();
		opacity.value = 0.8;
		opacity.anim.enable = true;
		opacity.anim.destroy = DestroyMode::Max;
		let mut q = particle(50.0, 50.0, 2.0, 0.0, 0.0);
		q.opacity.value = 0.5;
		q.opacity.animation = AnimationState {
			status: Some(AnimationStatus::Decreasing),
			velocity: Some(0.5),
		};
		update_opacity(&mut q, &opacity, 1.0);
		assert!(!q.is_destroyed());
		assert_eq!(q.opacity.value, opacity.anim.min);
		for _ in 0..2 {
			update_opacity(&mut q, &opacity, 1.0);
		}
		assert!(q.is_destroyed());
		assert_eq!(q.opacity.value, 0.8);
	}

	#[test]
	fn test_opacity_stays_in_unit_range() {
		let mut opacity = OpacityOptions::default();
		opacity.value = 1.0;
		opacity.anim.enable = true;
		opacity.anim.min = 0.0;

		let mut p = particle(50.0, 50.0, 1.0, 0.0, 0.0);
		p.opacity.value = 0.9;
		p.opacity.animation = AnimationState {
			status: Some(AnimationStatus::Increasing),
			velocity: Some(0.25),
		};
		for _ in 0..20 {
			update_opacity(&mut p, &opacity, 1.0);
			assert!((0.0..=1.0).contains(&p.opacity.value));
		}
	}

	#[test]
	fn test_disabled_animation_leaves_values() {
		let mut p = particle(50.0, 50.0, 2.0, 0.0, 0.0);
		p.size = AnimationState::enabled(1.0);
		update_size(&mut p, &SizeOptions::default(), 1.0);
		update_opacity(&mut p, &OpacityOptions::default(), 1.0);
		assert_eq!(p.radius, 2.0);
		assert_eq!(p.opacity.value, 0.5);
	}

	#[test]
	fn test_parallax_eases_toward_pointer_and_back() {
		let parallax = ParallaxOptions {
			enable: true,
			force: 10.0,
			smooth: 10.0,
		};
		let mut p = particle(50.0, 50.0, 2.0, 0.0, 0.0);
		let pointer = Some(Point::new(CANVAS.width / 2.0 + 100.0, CANVAS.height / 2.0));

		move_parallax(&mut p, &parallax, pointer, CANVAS);
		assert_eq!(p.offset, Point::new(2.0, 0.0));
		assert_eq!(p.position, Point::new(50.0, 50.0));

		move_parallax(&mut p, &parallax, None, CANVAS);
		assert!(p.offset.x > 0.0 && p.offset.x < 2.0);
	}

	#[test]
	fn test_check_overlap() {
		let existing = [particle(50.0, 50.0, 10.0, 0.0, 0.0)];
		assert!(check_overlap(Point::new(60.0, 50.0), 10.0, &existing));
		assert!(check_overlap(Point::new(70.0, 50.0), 10.0, &existing));
		assert!(!check_overlap(Point::new(70.5, 50.0), 10.0, &existing));
		assert!(!check_overlap(Point::new(0.0, 0.0), 10.0, &[]));
	}
}
