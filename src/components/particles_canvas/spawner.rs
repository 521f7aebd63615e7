//! Builds new particles from validated configuration.
//!
//! [`Spawner::new`] checks the particle options once and pre-resolves the
//! color palette and shape list, so [`Spawner::spawn`] itself cannot fail.
//! All randomness comes from the caller's RNG.

use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;

use super::color::{ParticleColor, Rgb, hex_to_rgb};
use super::error::ConfigError;
use super::options::{AnimationOptions, ColorValue, MoveDirection, ParticleOptions, ShapeType};
use super::particle::{
	AnimationState, CanvasSize, Opacity, Particle, ParticleImage, Point, Shape, Velocity,
};
use super::updater::check_overlap;

/// Re-rolls allowed when looking for a free spot. Past this the particle is
/// placed at its last candidate even if it overlaps.
pub const MAX_OVERLAP_RETRIES: usize = 100;

/// Where spawned colors come from.
#[derive(Clone, Debug, PartialEq)]
enum Palette {
	Fixed(ParticleColor),
	Choices(Vec<Rgb>),
	Random,
}

impl Palette {
	fn resolve(value: &ColorValue) -> Result<Self, ConfigError> {
		match value {
			ColorValue::Single(s) if s == "random" => Ok(Self::Random),
			ColorValue::Single(hex) => Ok(Self::Fixed(ParticleColor::Rgb(hex_to_rgb(hex)?))),
			ColorValue::List(hexes) => {
				if hexes.is_empty() {
					return Err(ConfigError::EmptyList {
						field: "particles.color.value",
					});
				}
				let colors = hexes
					.iter()
					.map(|hex| hex_to_rgb(hex))
					.collect::<Result<Vec<_>, _>>()?;
				Ok(Self::Choices(colors))
			}
			ColorValue::Rgb(rgb) => Ok(Self::Fixed(ParticleColor::Rgb(*rgb))),
			ColorValue::Hsl(hsl) => {
				ConfigError::ensure_range("particles.color.value.s", hsl.s, 0.0, 100.0)?;
				ConfigError::ensure_range("particles.color.value.l", hsl.l, 0.0, 100.0)?;
				Ok(Self::Fixed(ParticleColor::Hsl(*hsl)))
			}
		}
	}

	fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleColor {
		match self {
			Self::Fixed(color) => *color,
			Self::Choices(colors) => {
				ParticleColor::Rgb(colors.choose(rng).copied().unwrap_or(Rgb::WHITE))
			}
			Self::Random => ParticleColor::Rgb(Rgb::new(rng.r#gen(), rng.r#gen(), rng.r#gen())),
		}
	}
}

/// Particle factory bound to one set of particle options.
#[derive(Clone, Debug)]
pub struct Spawner {
	options: ParticleOptions,
	palette: Palette,
	shapes: Vec<ShapeType>,
}

impl Spawner {
	/// Validates `options` and resolves the palette and shape list.
	pub fn new(options: &ParticleOptions) -> Result<Self, ConfigError> {
		ConfigError::ensure_positive("particles.size.value", options.size.value)?;
		validate_animation("particles.size.anim", &options.size.anim, options.size.value)?;
		ConfigError::ensure_range("particles.opacity.value", options.opacity.value, 0.0, 1.0)?;
		validate_animation(
			"particles.opacity.anim",
			&options.opacity.anim,
			options.opacity.value,
		)?;

		let shapes = options.shape.kind.as_slice().to_vec();
		if shapes.is_empty() {
			return Err(ConfigError::EmptyList {
				field: "particles.shape.type",
			});
		}
		if shapes.contains(&ShapeType::Char) && options.shape.character.value.as_slice().is_empty()
		{
			return Err(ConfigError::EmptyList {
				field: "particles.shape.character.value",
			});
		}
		if shapes
			.iter()
			.any(|s| matches!(s, ShapeType::Polygon | ShapeType::Star))
		{
			ConfigError::ensure_range(
				"particles.shape.polygon.nb_sides",
				options.shape.polygon.nb_sides as f64,
				3.0,
				u32::MAX as f64,
			)?;
		}
		ConfigError::ensure_range(
			"particles.shape.stroke.width",
			options.shape.stroke.width,
			0.0,
			f64::MAX,
		)?;
		if options.shape.stroke.width > 0.0 {
			hex_to_rgb(&options.shape.stroke.color)?;
		}

		Ok(Self {
			options: options.clone(),
			palette: Palette::resolve(&options.color.value)?,
			shapes,
		})
	}

	/// The options particles are built from.
	pub fn options(&self) -> &ParticleOptions {
		&self.options
	}

	/// Creates one particle.
	///
	/// Uses `position` when given, otherwise a uniformly random spot. With
	/// particle bouncing enabled the spot is re-rolled until it clears every
	/// particle in `existing`, up to [`MAX_OVERLAP_RETRIES`] times.
	pub fn spawn<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		canvas: CanvasSize,
		existing: &[Particle],
		position: Option<Point>,
	) -> Particle {
		let size = &self.options.size;
		let radius = size.value * if size.random { unit_open(rng) } else { 1.0 };
		let size_animation = animation_state(&size.anim, rng);

		let position = self.place(rng, canvas, radius, existing, position);
		let color = self.palette.pick(rng);

		let opacity_options = &self.options.opacity;
		let opacity = Opacity {
			value: opacity_options.value
				* if opacity_options.random {
					unit_open(rng)
				} else {
					1.0
				},
			animation: animation_state(&opacity_options.anim, rng),
		};

		let velocity = self.velocity(rng);
		let shape = self.shape(rng);

		let mut particle = Particle::new(position, radius, velocity, color, opacity, shape);
		particle.size = size_animation;
		particle
	}

	fn place<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		canvas: CanvasSize,
		radius: f64,
		existing: &[Particle],
		target: Option<Point>,
	) -> Point {
		let mut candidate = candidate_position(rng, canvas, radius, target);
		if !self.options.movement.bounce {
			return candidate;
		}

		for _ in 0..MAX_OVERLAP_RETRIES {
			if !check_overlap(candidate, radius, existing) {
				return candidate;
			}
			candidate = candidate_position(rng, canvas, radius, None);
		}

		if check_overlap(candidate, radius, existing) {
			warn!(
				"particles-canvas: no free spot after {} retries, placing overlapping particle at ({:.1}, {:.1})",
				MAX_OVERLAP_RETRIES, candidate.x, candidate.y
			);
		}
		candidate
	}

	fn velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> Velocity {
		let movement = &self.options.movement;
		let (bx, by) = match movement.angle {
			Some(degrees) => {
				let rad = degrees.to_radians();
				(rad.cos(), rad.sin())
			}
			None => direction_vector(movement.direction),
		};

		if movement.straight {
			if movement.random {
				Velocity::new(bx * rng.r#gen::<f64>(), by * rng.r#gen::<f64>())
			} else {
				Velocity::new(bx, by)
			}
		} else {
			Velocity::new(
				bx + rng.r#gen::<f64>() - 0.5,
				by + rng.r#gen::<f64>() - 0.5,
			)
		}
	}

	fn shape<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
		let shape = &self.options.shape;
		match self.shapes.choose(rng).copied().unwrap_or(ShapeType::Circle) {
			ShapeType::Circle => Shape::Circle,
			ShapeType::Edge => Shape::Edge,
			ShapeType::Triangle => Shape::Triangle,
			ShapeType::Polygon => Shape::Polygon {
				sides: shape.polygon.nb_sides,
			},
			ShapeType::Star => Shape::Star {
				sides: shape.polygon.nb_sides,
			},
			ShapeType::Image => {
				let image = &shape.image;
				let ratio = if image.width > 0.0 && image.height > 0.0 {
					image.width / image.height
				} else {
					1.0
				};
				Shape::Image(ParticleImage {
					src: image.src.clone(),
					ratio,
					replace_color: image.replace_color,
				})
			}
			ShapeType::Char => Shape::Character(
				shape
					.character
					.value
					.as_slice()
					.choose(rng)
					.cloned()
					.unwrap_or_default(),
			),
		}
	}
}

fn validate_animation(
	field: &'static str,
	anim: &AnimationOptions,
	max: f64,
) -> Result<(), ConfigError> {
	if !anim.enable {
		return Ok(());
	}
	ConfigError::ensure_range(field, anim.speed, 0.0, f64::MAX)?;
	ConfigError::ensure_range(field, anim.min, 0.0, max)
}

/// Uniform sample from (0, 1], so scaled sizes never collapse to zero.
fn unit_open<R: Rng + ?Sized>(rng: &mut R) -> f64 {
	1.0 - rng.r#gen::<f64>()
}

fn animation_state<R: Rng + ?Sized>(anim: &AnimationOptions, rng: &mut R) -> AnimationState {
	if !anim.enable {
		return AnimationState::default();
	}
	let mut velocity = anim.speed / 100.0;
	if !anim.sync {
		velocity *= rng.r#gen::<f64>();
	}
	AnimationState::enabled(velocity)
}

/// Base heading for each compass direction.
pub fn direction_vector(direction: MoveDirection) -> (f64, f64) {
	match direction {
		MoveDirection::None => (0.0, 0.0),
		MoveDirection::Top => (0.0, -1.0),
		MoveDirection::TopRight => (0.5, -0.5),
		MoveDirection::Right => (1.0, 0.0),
		MoveDirection::BottomRight => (0.5, 0.5),
		MoveDirection::Bottom => (0.0, 1.0),
		MoveDirection::BottomLeft => (-0.5, 0.5),
		MoveDirection::Left => (-1.0, 0.0),
		MoveDirection::TopLeft => (-0.5, -0.5),
	}
}

fn candidate_position<R: Rng + ?Sized>(
	rng: &mut R,
	canvas: CanvasSize,
	radius: f64,
	target: Option<Point>,
) -> Point {
	let raw = target.unwrap_or_else(|| {
		Point::new(
			rng.r#gen::<f64>() * canvas.width,
			rng.r#gen::<f64>() * canvas.height,
		)
	});
	Point::new(
		pull_inside(raw.x, canvas.width, radius),
		pull_inside(raw.y, canvas.height, radius),
	)
}

/// Nudges a coordinate near an edge inward by one radius, then clamps it so
/// the whole particle is visible.
fn pull_inside(value: f64, extent: f64, radius: f64) -> f64 {
	let nudged = if value > extent - radius * 2.0 {
		value - radius
	} else if value < radius * 2.0 {
		value + radius
	} else {
		value
	};

	if extent >= radius * 2.0 {
		nudged.clamp(radius, extent - radius)
	} else {
		extent / 2.0
	}
}
