//! Per-particle state.
//!
//! A [`Particle`] is plain data. The spawner creates it, and the updater,
//! interaction and pointer functions mutate it in place each frame. Nothing
//! here holds a reference back to the owning collection.

use super::color::{ParticleColor, Rgb};

/// Smallest radius a particle may shrink to.
pub const MIN_RADIUS: f64 = 0.05;

/// A point in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Builds a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl CanvasSize {
	/// Builds a size.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Middle of the canvas.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

/// Per-tick displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
	/// Horizontal component.
	pub horizontal: f64,
	/// Vertical component.
	pub vertical: f64,
}

impl Velocity {
	/// Builds a velocity.
	pub const fn new(horizontal: f64, vertical: f64) -> Self {
		Self {
			horizontal,
			vertical,
		}
	}

	/// Magnitude.
	pub fn speed(&self) -> f64 {
		(self.horizontal * self.horizontal + self.vertical * self.vertical).sqrt()
	}
}

/// Direction of an oscillating value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
	/// Growing toward the maximum.
	Increasing,
	/// Shrinking toward the minimum.
	Decreasing,
}

/// Oscillation bookkeeping. Both fields are `Some` exactly when the
/// corresponding animation is enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationState {
	/// Current direction.
	pub status: Option<AnimationStatus>,
	/// Step per tick.
	pub velocity: Option<f64>,
}

impl AnimationState {
	/// State of a freshly enabled animation, shrinking first.
	pub fn enabled(velocity: f64) -> Self {
		Self {
			status: Some(AnimationStatus::Decreasing),
			velocity: Some(velocity),
		}
	}
}

/// Current opacity plus its oscillation state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Opacity {
	/// Current opacity.
	pub value: f64,
	/// Oscillation state.
	pub animation: AnimationState,
}

/// Image payload of an image-shaped particle.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleImage {
	/// Image URL.
	pub src: String,
	/// Width over height; 1 when the configured dimensions don't give one.
	pub ratio: f64,
	/// Recolor with the particle color.
	pub replace_color: bool,
}

/// The drawn shape, carrying the data only some shapes need.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	/// Filled circle.
	Circle,
	/// Square.
	Edge,
	/// Triangle.
	Triangle,
	/// Regular polygon.
	Polygon { sides: u32 },
	/// Star.
	Star { sides: u32 },
	/// Bitmap image.
	Image(ParticleImage),
	/// Text glyph.
	Character(String),
}

/// Display overrides set by the bubble effect. `None` means "use the
/// particle's own value".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BubbleState {
	/// Displayed radius.
	pub radius: Option<f64>,
	/// Displayed opacity.
	pub opacity: Option<f64>,
	/// Displayed color.
	pub color: Option<Rgb>,
}

impl BubbleState {
	/// Drops every override.
	pub fn clear(&mut self) {
		*self = Self::default();
	}
}

/// A single animated particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Center in canvas coordinates.
	pub position: Point,
	/// Parallax displacement, only composited at draw time.
	pub offset: Point,
	/// Radius in pixels, never below [`MIN_RADIUS`].
	pub radius: f64,
	/// Radius oscillation state.
	pub size: AnimationState,
	/// Current velocity.
	pub velocity: Velocity,
	initial_velocity: Velocity,
	/// Own color.
	pub color: ParticleColor,
	/// Own opacity.
	pub opacity: Opacity,
	/// Drawn shape.
	pub shape: Shape,
	/// Pointer-driven display overrides.
	pub bubble: BubbleState,
	destroyed: bool,
}

impl Particle {
	/// Builds a particle, snapshotting `velocity` as its rest velocity.
	pub fn new(
		position: Point,
		radius: f64,
		velocity: Velocity,
		color: ParticleColor,
		opacity: Opacity,
		shape: Shape,
	) -> Self {
		Self {
			position,
			offset: Point::default(),
			radius: radius.max(MIN_RADIUS),
			size: AnimationState::default(),
			velocity,
			initial_velocity: velocity,
			color,
			opacity,
			shape,
			bubble: BubbleState::default(),
			destroyed: false,
		}
	}

	/// Velocity at spawn time; the rest state pointer effects return to.
	pub fn initial_velocity(&self) -> Velocity {
		self.initial_velocity
	}

	/// Where the particle is drawn: position plus parallax offset.
	pub fn draw_position(&self) -> Point {
		Point::new(
			self.position.x + self.offset.x,
			self.position.y + self.offset.y,
		)
	}

	/// Asks the owner to drop this particle after the current frame.
	pub fn mark_destroyed(&mut self) {
		self.destroyed = true;
	}

	/// Whether the particle is due for removal.
	pub fn is_destroyed(&self) -> bool {
		self.destroyed
	}

	/// True when the two circles touch or intersect.
	pub fn overlaps(&self, other: &Particle) -> bool {
		self.position.distance(other.position) <= self.radius + other.radius
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn particle_at(x: f64, y: f64, radius: f64) -> Particle {
		Particle::new(
			Point::new(x, y),
			radius,
			Velocity::new(1.0, -1.0),
			ParticleColor::Rgb(Rgb::WHITE),
			Opacity {
				value: 1.0,
				animation: AnimationState::default(),
			},
			Shape::Circle,
		)
	}

	#[test]
	fn test_draw_position_includes_offset() {
		let mut p = particle_at(10.0, 20.0, 2.0);
		p.offset = Point::new(-3.0, 4.0);
		assert_eq!(p.draw_position(), Point::new(7.0, 24.0));
		assert_eq!(p.position, Point::new(10.0, 20.0));
	}

	#[test]
	fn test_initial_velocity_survives_mutation() {
		let mut p = particle_at(0.0, 0.0, 1.0);
		p.velocity = Velocity::new(5.0, 5.0);
		assert_eq!(p.initial_velocity(), Velocity::new(1.0, -1.0));
	}

	#[test]
	fn test_overlap_is_inclusive() {
		let a = particle_at(0.0, 0.0, 5.0);
		let b = particle_at(10.0, 0.0, 5.0);
		let c = particle_at(10.1, 0.0, 5.0);
		assert!(a.overlaps(&b));
		assert!(!a.overlaps(&c));
	}

	#[test]
	fn test_radius_is_kept_positive() {
		assert!(particle_at(0.0, 0.0, 0.0).radius > 0.0);
	}
}
