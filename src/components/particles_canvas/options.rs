//! Particle configuration, deserialized from particles.js-style JSON.
//!
//! Every section has defaults, so a page may supply only the keys it wants to
//! change. Keys use the classic snake_case spelling; the camelCase spellings
//! used by newer presets are accepted as aliases.

use serde::Deserialize;

use super::color::{Hsl, Rgb, hex_to_rgb};
use super::error::ConfigError;
use super::spawner::Spawner;

/// Either a single value or a list of candidates.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
	/// A single value.
	One(T),
	/// A list of values, one picked per particle.
	Many(Vec<T>),
}

impl<T> OneOrMany<T> {
	/// All values as a slice.
	pub fn as_slice(&self) -> &[T] {
		match self {
			Self::One(value) => std::slice::from_ref(value),
			Self::Many(values) => values,
		}
	}

	/// Whether `value` is one of the values.
	pub fn contains(&self, value: &T) -> bool
	where
		T: PartialEq,
	{
		self.as_slice().contains(value)
	}
}

/// Complete configuration: particle appearance/motion plus pointer interactivity.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParticlesOptions {
	/// Particle appearance and motion.
	pub particles: ParticleOptions,
	/// Pointer events and their modes.
	pub interactivity: InteractivityOptions,
}

impl ParticlesOptions {
	/// Parses and validates a JSON document.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let options: Self = serde_json::from_str(json)?;
		options.validate()?;
		Ok(options)
	}

	/// Checks every numeric range and color string, failing on the first problem.
	pub fn validate(&self) -> Result<(), ConfigError> {
		Spawner::new(&self.particles)?;

		let line = &self.particles.line_linked;
		ConfigError::ensure_range("particles.line_linked.distance", line.distance, 0.0, f64::MAX)?;
		ConfigError::ensure_range("particles.line_linked.opacity", line.opacity, 0.0, 1.0)?;
		ConfigError::ensure_range("particles.line_linked.width", line.width, 0.0, f64::MAX)?;
		line.color_rgb()?;

		let attract = &self.particles.movement.attract;
		if attract.enable {
			ConfigError::ensure_positive("particles.move.attract.rotate_x", attract.rotate_x)?;
			ConfigError::ensure_positive("particles.move.attract.rotate_y", attract.rotate_y)?;
		}
		ConfigError::ensure_range("particles.move.speed", self.particles.movement.speed, 0.0, f64::MAX)?;

		let density = &self.particles.number.density;
		if density.enable {
			ConfigError::ensure_positive("particles.number.density.value_area", density.value_area)?;
		}

		let events = &self.interactivity.events;
		if events.onhover.parallax.enable {
			ConfigError::ensure_positive(
				"interactivity.events.onhover.parallax.force",
				events.onhover.parallax.force,
			)?;
			ConfigError::ensure_positive(
				"interactivity.events.onhover.parallax.smooth",
				events.onhover.parallax.smooth,
			)?;
		}

		let modes = &self.interactivity.modes;
		ConfigError::ensure_range("interactivity.modes.grab.distance", modes.grab.distance, 0.0, f64::MAX)?;
		ConfigError::ensure_range(
			"interactivity.modes.grab.line_linked.opacity",
			modes.grab.line_linked.opacity,
			0.0,
			1.0,
		)?;
		ConfigError::ensure_positive("interactivity.modes.bubble.distance", modes.bubble.distance)?;
		ConfigError::ensure_range("interactivity.modes.bubble.size", modes.bubble.size, 0.0, f64::MAX)?;
		ConfigError::ensure_range("interactivity.modes.bubble.opacity", modes.bubble.opacity, 0.0, 1.0)?;
		ConfigError::ensure_positive("interactivity.modes.bubble.duration", modes.bubble.duration)?;
		modes.bubble.color_rgb()?;
		ConfigError::ensure_positive("interactivity.modes.repulse.distance", modes.repulse.distance)?;
		ConfigError::ensure_positive("interactivity.modes.repulse.duration", modes.repulse.duration)?;

		Ok(())
	}

	/// Whether the hover event is enabled with `mode` among its modes.
	pub fn hover_mode(&self, mode: HoverMode) -> bool {
		let hover = &self.interactivity.events.onhover;
		hover.enable && hover.mode.contains(&mode)
	}

	/// Whether the click event is enabled with `mode` among its modes.
	pub fn click_mode(&self, mode: ClickMode) -> bool {
		let click = &self.interactivity.events.onclick;
		click.enable && click.mode.contains(&mode)
	}
}

/// Everything describing the particles themselves.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParticleOptions {
	/// Population size.
	pub number: NumberOptions,
	/// Fill color.
	pub color: ColorOptions,
	/// Shape selection and outline.
	pub shape: ShapeOptions,
	/// Opacity and its animation.
	pub opacity: OpacityOptions,
	/// Radius and its animation.
	pub size: SizeOptions,
	/// Link lines between nearby particles.
	#[serde(alias = "lineLinked")]
	pub line_linked: LineLinkedOptions,
	/// Motion settings.
	#[serde(rename = "move")]
	pub movement: MoveOptions,
}

/// How many particles to spawn.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct NumberOptions {
	/// Particles per `density.value_area`, or the absolute count without density.
	pub value: usize,
	/// Hard cap on live particles (0 = unlimited). Applies to click push.
	pub limit: usize,
	/// Scales the count with the canvas area.
	pub density: DensityOptions,
}

impl Default for NumberOptions {
	fn default() -> Self {
		Self {
			value: 80,
			limit: 0,
			density: DensityOptions::default(),
		}
	}
}

impl NumberOptions {
	/// Number of particles to populate a canvas of the given size with.
	pub fn count_for(&self, width: f64, height: f64) -> usize {
		let count = if self.density.enable && self.density.value_area > 0.0 {
			let area = width * height / 1000.0;
			(area * self.value as f64 / self.density.value_area).round() as usize
		} else {
			self.value
		};
		if self.limit > 0 {
			count.min(self.limit)
		} else {
			count
		}
	}
}

/// Canvas-area scaling of the particle count.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DensityOptions {
	/// Whether the count scales with area.
	pub enable: bool,
	/// Area, in thousands of square pixels, that holds `value` particles.
	#[serde(alias = "area", alias = "valueArea")]
	pub value_area: f64,
}

impl Default for DensityOptions {
	fn default() -> Self {
		Self {
			enable: true,
			value_area: 800.0,
		}
	}
}

/// A configured color: one hex string, a list of hex strings, an RGB or HSL
/// object, or the literal `"random"`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColorValue {
	/// One hex color, or `"random"`.
	Single(String),
	/// Hex colors picked at random per particle.
	List(Vec<String>),
	/// An RGB object.
	Rgb(Rgb),
	/// An HSL object.
	Hsl(Hsl),
}

/// Particle fill color.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ColorOptions {
	/// The configured color.
	pub value: ColorValue,
}

impl Default for ColorOptions {
	fn default() -> Self {
		Self {
			value: ColorValue::Single("#ffffff".to_string()),
		}
	}
}

/// Shapes a particle can be drawn as.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
	/// Filled circle.
	Circle,
	/// Axis-aligned square.
	#[serde(alias = "square")]
	Edge,
	/// Equilateral triangle.
	Triangle,
	/// Regular polygon with `polygon.nb_sides` sides.
	Polygon,
	/// Star with `polygon.nb_sides` tips.
	Star,
	/// Bitmap from `image.src`.
	#[serde(alias = "images")]
	Image,
	/// Text glyph from `character.value`.
	#[serde(alias = "character")]
	Char,
}

/// Shape selection and per-shape settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ShapeOptions {
	/// Shape, or shapes picked at random per particle.
	#[serde(rename = "type")]
	pub kind: OneOrMany<ShapeType>,
	/// Outline drawn around each particle.
	pub stroke: StrokeOptions,
	/// Polygon and star settings.
	pub polygon: PolygonOptions,
	/// Image shape settings.
	pub image: ImageOptions,
	/// Character shape settings.
	pub character: CharacterOptions,
}

impl Default for ShapeOptions {
	fn default() -> Self {
		Self {
			kind: OneOrMany::One(ShapeType::Circle),
			stroke: StrokeOptions::default(),
			polygon: PolygonOptions::default(),
			image: ImageOptions::default(),
			character: CharacterOptions::default(),
		}
	}
}

/// Particle outline.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StrokeOptions {
	/// Outline width; 0 disables it.
	pub width: f64,
	/// Outline color (hex).
	pub color: String,
}

impl Default for StrokeOptions {
	fn default() -> Self {
		Self {
			width: 0.0,
			color: "#000000".to_string(),
		}
	}
}

/// Polygon and star settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PolygonOptions {
	/// Number of sides or star tips.
	#[serde(alias = "sides")]
	pub nb_sides: u32,
}

impl Default for PolygonOptions {
	fn default() -> Self {
		Self { nb_sides: 5 }
	}
}

/// Image shape settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
	/// Image URL.
	pub src: String,
	/// Intrinsic width, used for the aspect ratio.
	pub width: f64,
	/// Intrinsic height, used for the aspect ratio.
	pub height: f64,
	/// Recolor the image with the particle color.
	#[serde(alias = "replaceColor")]
	pub replace_color: bool,
}

impl Default for ImageOptions {
	fn default() -> Self {
		Self {
			src: String::new(),
			width: 100.0,
			height: 100.0,
			replace_color: false,
		}
	}
}

/// Character shape settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CharacterOptions {
	/// Glyph, or glyphs picked at random per particle.
	pub value: OneOrMany<String>,
	/// Font family.
	pub font: String,
	/// CSS font weight.
	pub weight: String,
	/// CSS font style.
	pub style: String,
}

impl Default for CharacterOptions {
	fn default() -> Self {
		Self {
			value: OneOrMany::One("*".to_string()),
			font: "Verdana".to_string(),
			weight: "400".to_string(),
			style: String::new(),
		}
	}
}

/// What happens when an animated value reaches one of its bounds.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DestroyMode {
	/// Ping-pong between the bounds forever.
	#[default]
	None,
	/// Destroy the particle once the minimum is reached.
	Min,
	/// Destroy the particle once the maximum is reached.
	Max,
}

/// Oscillation of size or opacity between `min` and the configured value.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
	/// Whether the value oscillates.
	pub enable: bool,
	/// Oscillation speed; a hundredth of it is the per-tick step.
	pub speed: f64,
	/// Lower bound of the oscillation.
	#[serde(alias = "size_min", alias = "opacity_min", alias = "minimumValue")]
	pub min: f64,
	/// Give every particle the same step instead of a random fraction.
	pub sync: bool,
	/// What happens at the bounds.
	pub destroy: DestroyMode,
}

impl Default for AnimationOptions {
	fn default() -> Self {
		Self {
			enable: false,
			speed: 1.0,
			min: 0.1,
			sync: false,
			destroy: DestroyMode::None,
		}
	}
}

/// Particle opacity.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OpacityOptions {
	/// Opacity in `[0, 1]`.
	pub value: f64,
	/// Scale the opacity by a random factor in `(0, 1]`.
	pub random: bool,
	/// Opacity oscillation.
	#[serde(alias = "animation")]
	pub anim: AnimationOptions,
}

impl Default for OpacityOptions {
	fn default() -> Self {
		Self {
			value: 0.5,
			random: false,
			anim: AnimationOptions::default(),
		}
	}
}

/// Particle radius.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SizeOptions {
	/// Radius in pixels.
	pub value: f64,
	/// Scale the radius by a random factor in `(0, 1]`.
	pub random: bool,
	/// Radius oscillation.
	#[serde(alias = "animation")]
	pub anim: AnimationOptions,
}

impl Default for SizeOptions {
	fn default() -> Self {
		Self {
			value: 3.0,
			random: true,
			anim: AnimationOptions {
				speed: 40.0,
				..AnimationOptions::default()
			},
		}
	}
}

/// Lines drawn between nearby particles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LineLinkedOptions {
	/// Whether links are drawn.
	pub enable: bool,
	/// Longest linked distance in pixels.
	pub distance: f64,
	/// Line color (hex).
	pub color: String,
	/// Line opacity at zero distance.
	pub opacity: f64,
	/// Line width in pixels.
	pub width: f64,
}

impl Default for LineLinkedOptions {
	fn default() -> Self {
		Self {
			enable: true,
			distance: 150.0,
			color: "#ffffff".to_string(),
			opacity: 0.4,
			width: 1.0,
		}
	}
}

impl LineLinkedOptions {
	/// The line color as RGB.
	pub fn color_rgb(&self) -> Result<Rgb, ConfigError> {
		hex_to_rgb(&self.color)
	}
}

/// Base heading for spawned velocities.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MoveDirection {
	/// No preferred heading.
	#[default]
	None,
	/// Up.
	Top,
	/// Up and right.
	#[serde(alias = "topRight")]
	TopRight,
	/// Right.
	Right,
	/// Down and right.
	#[serde(alias = "bottomRight")]
	BottomRight,
	/// Down.
	Bottom,
	/// Down and left.
	#[serde(alias = "bottomLeft")]
	BottomLeft,
	/// Left.
	Left,
	/// Up and left.
	#[serde(alias = "topLeft")]
	TopLeft,
}

/// Policy for particles crossing the canvas boundary.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutMode {
	/// Reflect off the edges.
	Bounce,
	/// Wrap to the opposite edge.
	#[default]
	#[serde(alias = "wrap")]
	Out,
	/// Drop the particle once it has left.
	Destroy,
	/// Let the particle drift away.
	None,
}

/// Pairwise attraction.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AttractOptions {
	/// Whether nearby particles pull on each other.
	pub enable: bool,
	/// Horizontal divisor; larger is weaker.
	#[serde(alias = "rotateX")]
	pub rotate_x: f64,
	/// Vertical divisor; larger is weaker.
	#[serde(alias = "rotateY")]
	pub rotate_y: f64,
}

impl Default for AttractOptions {
	fn default() -> Self {
		Self {
			enable: false,
			rotate_x: 600.0,
			rotate_y: 1200.0,
		}
	}
}

/// Particle motion.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MoveOptions {
	/// Whether particles move at all.
	pub enable: bool,
	/// Speed multiplier.
	pub speed: f64,
	/// Base heading.
	pub direction: MoveDirection,
	/// Explicit heading in degrees, overriding `direction` when set.
	pub angle: Option<f64>,
	/// Scale a straight velocity by random factors.
	pub random: bool,
	/// Keep the base heading without jitter.
	pub straight: bool,
	/// Policy at the canvas edges.
	#[serde(alias = "outMode", alias = "out_modes")]
	pub out_mode: OutMode,
	/// Particle-particle collisions; also enables overlap-free spawning.
	pub bounce: bool,
	/// Pairwise attraction.
	pub attract: AttractOptions,
}

impl Default for MoveOptions {
	fn default() -> Self {
		Self {
			enable: true,
			speed: 6.0,
			direction: MoveDirection::None,
			angle: None,
			random: false,
			straight: false,
			out_mode: OutMode::Out,
			bounce: false,
			attract: AttractOptions::default(),
		}
	}
}

/// Pointer interaction settings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct InteractivityOptions {
	/// Which pointer events are handled.
	pub events: EventsOptions,
	/// Parameters of each mode.
	pub modes: ModesOptions,
}

/// Pointer event bindings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventsOptions {
	/// Hover behavior.
	#[serde(alias = "onHover")]
	pub onhover: HoverEvent,
	/// Click behavior.
	#[serde(alias = "onClick")]
	pub onclick: ClickEvent,
}

/// Effects while the pointer hovers the canvas.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
	/// Lines from nearby particles to the pointer.
	Grab,
	/// Grow nearby particles.
	Bubble,
	/// Push nearby particles away.
	Repulse,
}

/// Effects of a click.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClickMode {
	/// Spawn particles at the click.
	Push,
	/// Remove the oldest particles.
	Remove,
	/// Grow particles near the click for a while.
	Bubble,
	/// Push particles away from the click for a while.
	Repulse,
}

/// Hover event binding.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HoverEvent {
	/// Whether hover effects run.
	pub enable: bool,
	/// Active hover mode or modes.
	pub mode: OneOrMany<HoverMode>,
	/// Pointer-driven parallax.
	pub parallax: ParallaxOptions,
}

impl Default for HoverEvent {
	fn default() -> Self {
		Self {
			enable: true,
			mode: OneOrMany::One(HoverMode::Grab),
			parallax: ParallaxOptions::default(),
		}
	}
}

/// Click event binding.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClickEvent {
	/// Whether clicks are handled.
	pub enable: bool,
	/// Active click mode or modes.
	pub mode: OneOrMany<ClickMode>,
}

impl Default for ClickEvent {
	fn default() -> Self {
		Self {
			enable: true,
			mode: OneOrMany::One(ClickMode::Push),
		}
	}
}

/// Pointer-driven parallax displacement.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ParallaxOptions {
	/// Whether parallax is applied.
	pub enable: bool,
	/// Divisor of the displacement; larger is subtler.
	pub force: f64,
	/// Easing divisor; larger is slower.
	pub smooth: f64,
}

impl Default for ParallaxOptions {
	fn default() -> Self {
		Self {
			enable: false,
			force: 60.0,
			smooth: 10.0,
		}
	}
}

/// Parameters of each interactivity mode.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ModesOptions {
	/// Grab mode.
	pub grab: GrabMode,
	/// Bubble mode.
	pub bubble: BubbleMode,
	/// Repulse mode.
	pub repulse: RepulseMode,
	/// Push mode.
	pub push: PushMode,
	/// Remove mode.
	pub remove: RemoveMode,
}

/// Grab mode parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GrabMode {
	/// Reach of the grab lines in pixels.
	pub distance: f64,
	/// Grab line style.
	#[serde(alias = "lineLinked")]
	pub line_linked: GrabLine,
}

impl Default for GrabMode {
	fn default() -> Self {
		Self {
			distance: 400.0,
			line_linked: GrabLine { opacity: 1.0 },
		}
	}
}

/// Grab line style.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GrabLine {
	/// Line opacity at the pointer.
	pub opacity: f64,
}

/// Bubble mode parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BubbleMode {
	/// Reach of the effect in pixels.
	pub distance: f64,
	/// Target radius at the pointer.
	pub size: f64,
	/// Target opacity at the pointer.
	pub opacity: f64,
	/// Seconds a click bubble takes to grow, and again to shrink back.
	pub duration: f64,
	/// Optional target color (hex).
	pub color: Option<String>,
}

impl Default for BubbleMode {
	fn default() -> Self {
		Self {
			distance: 400.0,
			size: 40.0,
			opacity: 0.8,
			duration: 2.0,
			color: None,
		}
	}
}

impl BubbleMode {
	/// The bubble target color as RGB, if one is set.
	pub fn color_rgb(&self) -> Result<Option<Rgb>, ConfigError> {
		self.color.as_deref().map(hex_to_rgb).transpose()
	}
}

/// Repulse mode parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RepulseMode {
	/// Reach of the effect in pixels.
	pub distance: f64,
	/// Seconds a click repulse stays active.
	pub duration: f64,
}

impl Default for RepulseMode {
	fn default() -> Self {
		Self {
			distance: 200.0,
			duration: 0.4,
		}
	}
}

/// Push mode parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PushMode {
	/// Particles spawned per click.
	#[serde(alias = "quantity")]
	pub particles_nb: usize,
}

impl Default for PushMode {
	fn default() -> Self {
		Self { particles_nb: 4 }
	}
}

/// Remove mode parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RemoveMode {
	/// Particles removed per click.
	#[serde(alias = "quantity")]
	pub particles_nb: usize,
}

impl Default for RemoveMode {
	fn default() -> Self {
		Self { particles_nb: 2 }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_document_uses_defaults() {
		let options = ParticlesOptions::from_json("{}").unwrap();
		assert_eq!(options.particles.number.value, 80);
		assert_eq!(options.particles.movement.out_mode, OutMode::Out);
		assert!(options.hover_mode(HoverMode::Grab));
		assert!(options.click_mode(ClickMode::Push));
	}

	#[test]
	fn test_color_value_variants() {
		let parse = |json: &str| serde_json::from_str::<ColorValue>(json).unwrap();
		assert_eq!(parse(r#""random""#), ColorValue::Single("random".into()));
		assert_eq!(
			parse(r##"["#ff0000", "#00ff00"]"##),
			ColorValue::List(vec!["#ff0000".into(), "#00ff00".into()])
		);
		assert_eq!(
			parse(r#"{"r": 1, "g": 2, "b": 3}"#),
			ColorValue::Rgb(Rgb::new(1, 2, 3))
		);
		assert!(matches!(
			parse(r#"{"h": 120, "s": 50, "l": 50}"#),
			ColorValue::Hsl(_)
		));
	}

	#[test]
	fn test_inconsistent_color_object_is_rejected() {
		let json = r#"{"particles": {"color": {"value": {"r": 1, "g": 2}}}}"#;
		assert!(matches!(
			ParticlesOptions::from_json(json),
			Err(ConfigError::Json(_))
		));
	}

	#[test]
	fn test_camel_case_aliases() {
		let json = r#"{
			"particles": {
				"lineLinked": {"enable": false},
				"move": {"outMode": "bounce", "direction": "topRight"}
			},
			"interactivity": {"events": {"onHover": {"enable": true, "mode": ["bubble", "repulse"]}}}
		}"#;
		let options = ParticlesOptions::from_json(json).unwrap();
		assert!(!options.particles.line_linked.enable);
		assert_eq!(options.particles.movement.out_mode, OutMode::Bounce);
		assert_eq!(options.particles.movement.direction, MoveDirection::TopRight);
		assert!(options.hover_mode(HoverMode::Bubble));
		assert!(!options.hover_mode(HoverMode::Grab));
	}

	#[test]
	fn test_validation_fails_fast() {
		let bad_size = r#"{"particles": {"size": {"value": 0}}}"#;
		assert!(matches!(
			ParticlesOptions::from_json(bad_size),
			Err(ConfigError::NotPositive { .. })
		));

		let bad_line = r#"{"particles": {"line_linked": {"color": "white"}}}"#;
		assert!(matches!(
			ParticlesOptions::from_json(bad_line),
			Err(ConfigError::InvalidHexColor(_))
		));

		let bad_opacity = r#"{"particles": {"opacity": {"value": 1.5}}}"#;
		assert!(matches!(
			ParticlesOptions::from_json(bad_opacity),
			Err(ConfigError::OutOfRange { .. })
		));
	}

	#[test]
	fn test_density_scales_count() {
		let number = NumberOptions {
			value: 80,
			limit: 0,
			density: DensityOptions {
				enable: true,
				value_area: 800.0,
			},
		};
		assert_eq!(number.count_for(800.0, 1000.0), 80);
		assert_eq!(number.count_for(400.0, 1000.0), 40);

		let capped = NumberOptions { limit: 10, ..number };
		assert_eq!(capped.count_for(800.0, 1000.0), 10);
	}

	#[test]
	fn test_partial_anim_object_oscillates() {
		use rand::SeedableRng;
		use rand::rngs::StdRng;

		use crate::components::particles_canvas::particle::CanvasSize;
		use crate::components::particles_canvas::spawner::Spawner;
		use crate::components::particles_canvas::updater::update_size;

		let options = ParticlesOptions::from_json(
			r#"{"particles":{"size":{"value":3,"random":false,"anim":{"enable":true,"sync":true}}}}"#,
		)
		.unwrap();
		let anim = &options.particles.size.anim;
		assert!(anim.enable);
		assert_eq!(anim.speed, 1.0);
		assert_eq!(anim.min, 0.1);
		assert_eq!(anim.destroy, DestroyMode::None);

		let spawner = Spawner::new(&options.particles).unwrap();
		let mut rng = StdRng::seed_from_u64(5);
		let mut p = spawner.spawn(&mut rng, CanvasSize::new(100.0, 100.0), &[], None);
		assert_eq!(p.radius, 3.0);
		for _ in 0..10 {
			update_size(&mut p, &options.particles.size, 1.0);
		}
		assert!((p.radius - 2.9).abs() < 1e-9);
		assert!(p.size.status.is_some());
	}
}
