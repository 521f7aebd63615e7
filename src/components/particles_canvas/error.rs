//! Configuration errors raised while loading options or building a spawner.

use thiserror::Error;

/// Malformed or inconsistent particle configuration.
///
/// Returned before any particle exists, so a bad configuration never yields
/// partially initialized particles.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The document is not valid JSON or has the wrong shape.
	#[error("could not parse particle options: {0}")]
	Json(#[from] serde_json::Error),
	/// A color string is not `#rgb` or `#rrggbb`.
	#[error("invalid hex color {0:?}")]
	InvalidHexColor(String),
	/// A list that needs at least one entry is empty.
	#[error("{field} must not be empty")]
	EmptyList { field: &'static str },
	/// A value that must be strictly positive is not.
	#[error("{field} must be greater than zero, got {value}")]
	NotPositive { field: &'static str, value: f64 },
	/// A value lies outside its allowed range.
	#[error("{field} must be within {min}..={max}, got {value}")]
	OutOfRange {
		field: &'static str,
		value: f64,
		min: f64,
		max: f64,
	},
}

impl ConfigError {
	/// Fails with [`ConfigError::NotPositive`] unless `value > 0`.
	pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), Self> {
		if value > 0.0 && value.is_finite() {
			Ok(())
		} else {
			Err(Self::NotPositive { field, value })
		}
	}

	/// Fails with [`ConfigError::OutOfRange`] unless `min <= value <= max`.
	pub(crate) fn ensure_range(
		field: &'static str,
		value: f64,
		min: f64,
		max: f64,
	) -> Result<(), Self> {
		if (min..=max).contains(&value) {
			Ok(())
		} else {
			Err(Self::OutOfRange {
				field,
				value,
				min,
				max,
			})
		}
	}
}
