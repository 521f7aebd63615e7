//! Color models used by particles and link lines.
//!
//! Particles resolve their color once at spawn time into either an RGB or an
//! HSL triple. Drawing and bubble blending work in RGB.

use serde::Deserialize;

use super::error::ConfigError;

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rgb {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

impl Rgb {
	/// Opaque white, the default particle and line color.
	pub const WHITE: Self = Self::new(255, 255, 255);

	/// Builds a color from its channels.
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Linear interpolation between two colors, `t` clamped to [0, 1].
	pub fn lerp(self, other: Rgb, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
		}
	}

	/// CSS `rgba()` string at the given alpha.
	pub fn to_css(self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
	}
}

/// HSL triple: hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hsl {
	/// Hue in degrees.
	pub h: f64,
	/// Saturation in percent.
	pub s: f64,
	/// Lightness in percent.
	pub l: f64,
}

impl Hsl {
	/// Converts to 8-bit RGB.
	pub fn to_rgb(self) -> Rgb {
		let h = self.h.rem_euclid(360.0) / 360.0;
		let s = (self.s / 100.0).clamp(0.0, 1.0);
		let l = (self.l / 100.0).clamp(0.0, 1.0);

		if s == 0.0 {
			let v = (l * 255.0).round() as u8;
			return Rgb::new(v, v, v);
		}

		let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
		let p = 2.0 * l - q;
		let channel = |mut t: f64| {
			if t < 0.0 {
				t += 1.0;
			}
			if t > 1.0 {
				t -= 1.0;
			}
			let v = if t < 1.0 / 6.0 {
				p + (q - p) * 6.0 * t
			} else if t < 0.5 {
				q
			} else if t < 2.0 / 3.0 {
				p + (q - p) * (2.0 / 3.0 - t) * 6.0
			} else {
				p
			};
			(v * 255.0).round() as u8
		};

		Rgb::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
	}

	/// CSS `hsla()` string at the given alpha.
	pub fn to_css(self, alpha: f64) -> String {
		format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, alpha)
	}
}

/// A particle's resolved color. Exactly one model is ever populated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleColor {
	/// Resolved from a hex string, a palette or an RGB object.
	Rgb(Rgb),
	/// Configured as an HSL object; drawn in HSL.
	Hsl(Hsl),
}

impl ParticleColor {
	/// The RGB triple, if this color is RGB.
	pub fn rgb(&self) -> Option<Rgb> {
		match self {
			Self::Rgb(rgb) => Some(*rgb),
			Self::Hsl(_) => None,
		}
	}

	/// The HSL triple, if this color is HSL.
	pub fn hsl(&self) -> Option<Hsl> {
		match self {
			Self::Rgb(_) => None,
			Self::Hsl(hsl) => Some(*hsl),
		}
	}

	/// The color in RGB, converting from HSL when needed.
	pub fn to_rgb(&self) -> Rgb {
		match self {
			Self::Rgb(rgb) => *rgb,
			Self::Hsl(hsl) => hsl.to_rgb(),
		}
	}

	/// CSS color string at the given alpha.
	pub fn to_css(&self, alpha: f64) -> String {
		match self {
			Self::Rgb(rgb) => rgb.to_css(alpha),
			Self::Hsl(hsl) => hsl.to_css(alpha),
		}
	}
}

/// Parses `#rrggbb` or the `#rgb` shorthand (the leading `#` is optional).
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ConfigError> {
	let invalid = || ConfigError::InvalidHexColor(hex.to_string());
	let digits = hex.strip_prefix('#').unwrap_or(hex);
	if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(invalid());
	}

	let expanded: String = match digits.len() {
		3 => digits.chars().flat_map(|c| [c, c]).collect(),
		6 => digits.to_string(),
		_ => return Err(invalid()),
	};
	let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());

	Ok(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hex_to_rgb() {
		assert_eq!(hex_to_rgb("#ff0000").unwrap(), Rgb::new(255, 0, 0));
		assert_eq!(hex_to_rgb("00ff7f").unwrap(), Rgb::new(0, 255, 127));
		assert_eq!(hex_to_rgb("#fff").unwrap(), Rgb::WHITE);
	}

	#[test]
	fn test_hex_to_rgb_rejects_garbage() {
		assert!(matches!(
			hex_to_rgb("#ff00"),
			Err(ConfigError::InvalidHexColor(_))
		));
		assert!(hex_to_rgb("#gg0000").is_err());
		assert!(hex_to_rgb("").is_err());
	}

	#[test]
	fn test_hsl_to_rgb() {
		assert_eq!(
			Hsl {
				h: 0.0,
				s: 100.0,
				l: 50.0
			}
			.to_rgb(),
			Rgb::new(255, 0, 0)
		);
		assert_eq!(
			Hsl {
				h: 240.0,
				s: 100.0,
				l: 50.0
			}
			.to_rgb(),
			Rgb::new(0, 0, 255)
		);
		assert_eq!(
			Hsl {
				h: 90.0,
				s: 0.0,
				l: 100.0
			}
			.to_rgb(),
			Rgb::WHITE
		);
	}

	#[test]
	fn test_lerp_endpoints() {
		let black = Rgb::new(0, 0, 0);
		assert_eq!(black.lerp(Rgb::WHITE, 0.0), black);
		assert_eq!(black.lerp(Rgb::WHITE, 1.0), Rgb::WHITE);
		assert_eq!(black.lerp(Rgb::WHITE, 2.0), Rgb::WHITE);
	}

	#[test]
	fn test_particle_color_single_model() {
		let color = ParticleColor::Rgb(Rgb::new(1, 2, 3));
		assert!(color.rgb().is_some() && color.hsl().is_none());
		assert_eq!(color.to_css(0.5), "rgba(1, 2, 3, 0.5)");
	}
}
