//! Canvas 2D implementation of [`Drawer`].
//!
//! Every frame clears the canvas, then draws link lines and particles on top.
//! Image particles are loaded lazily and skipped until the browser has
//! finished decoding them.

use std::collections::HashMap;
use std::f64::consts::TAU;

use log::{debug, warn};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::drawer::{Appearance, Drawer, Stroke, polygon_points, star_points};
use super::interaction::LinkSegment;
use super::options::CharacterOptions;
use super::particle::{CanvasSize, ParticleImage, Point, Shape};
use super::state::ParticlesState;

/// Decoded images keyed by source URL, kept across frames.
#[derive(Default)]
pub struct ImageCache {
	images: HashMap<String, HtmlImageElement>,
}

impl ImageCache {
	/// The image for `src` once it is ready to draw. The first request
	/// starts the load.
	pub fn get(&mut self, src: &str) -> Option<&HtmlImageElement> {
		if !self.images.contains_key(src) {
			match HtmlImageElement::new() {
				Ok(image) => {
					image.set_src(src);
					self.images.insert(src.to_string(), image);
					debug!("particles-canvas: loading image {src}");
				}
				Err(e) => {
					warn!("particles-canvas: cannot create image element: {:?}", e);
					return None;
				}
			}
		}
		self.images
			.get(src)
			.filter(|image| image.complete() && image.natural_width() > 0)
	}
}

/// Draws onto a browser canvas.
pub struct CanvasDrawer<'a> {
	ctx: &'a CanvasRenderingContext2d,
	images: &'a mut ImageCache,
	character: &'a CharacterOptions,
}

impl<'a> CanvasDrawer<'a> {
	/// A drawer for `ctx` that loads images into `images`.
	pub fn new(
		ctx: &'a CanvasRenderingContext2d,
		images: &'a mut ImageCache,
		character: &'a CharacterOptions,
	) -> Self {
		Self {
			ctx,
			images,
			character,
		}
	}

	fn trace(&self, points: &[Point]) {
		let Some((first, rest)) = points.split_first() else {
			return;
		};
		self.ctx.move_to(first.x, first.y);
		for point in rest {
			self.ctx.line_to(point.x, point.y);
		}
	}

	fn draw_character(&self, text: &str, appearance: &Appearance<'_>) {
		let Point { x, y } = appearance.position;
		let font = format!(
			"{} {} {}px {}",
			self.character.style,
			self.character.weight,
			(appearance.radius * 2.0).round(),
			self.character.font
		);
		self.ctx.set_font(font.trim_start());
		self.ctx.set_text_align("center");
		self.ctx.set_text_baseline("middle");
		self.ctx
			.set_fill_style_str(&appearance.color.to_css(appearance.opacity));
		let _ = self.ctx.fill_text(text, x, y);
	}

	fn draw_image(&mut self, image: &ParticleImage, appearance: &Appearance<'_>) {
		let Some(element) = self.images.get(&image.src) else {
			return;
		};
		let Point { x, y } = appearance.position;
		let r = appearance.radius;
		let ratio = if image.ratio > 0.0 { image.ratio } else { 1.0 };

		self.ctx.set_global_alpha(appearance.opacity);
		let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
			element,
			x - r,
			y - r / ratio,
			r * 2.0,
			r * 2.0 / ratio,
		);
		self.ctx.set_global_alpha(1.0);
	}
}

impl Drawer for CanvasDrawer<'_> {
	fn clear(&mut self, canvas: CanvasSize) {
		self.ctx.clear_rect(0.0, 0.0, canvas.width, canvas.height);
	}

	fn draw_line(&mut self, segment: &LinkSegment) {
		let ctx = self.ctx;
		ctx.set_stroke_style_str(&segment.color.to_css(segment.opacity));
		ctx.set_line_width(segment.width);
		ctx.begin_path();
		ctx.move_to(segment.from.x, segment.from.y);
		ctx.line_to(segment.to.x, segment.to.y);
		ctx.stroke();
		ctx.close_path();
	}

	fn draw_particle(&mut self, appearance: &Appearance<'_>, stroke: Option<Stroke>) {
		let ctx = self.ctx;
		let Point { x, y } = appearance.position;
		let r = appearance.radius;

		ctx.begin_path();
		match appearance.shape {
			Shape::Circle => {
				let _ = ctx.arc(x, y, r, 0.0, TAU);
			}
			Shape::Edge => ctx.rect(x - r, y - r, r * 2.0, r * 2.0),
			Shape::Triangle => self.trace(&polygon_points(appearance.position, r, 3)),
			Shape::Polygon { sides } => {
				self.trace(&polygon_points(appearance.position, r, *sides))
			}
			Shape::Star { sides } => self.trace(&star_points(appearance.position, r, *sides)),
			Shape::Character(text) => {
				self.draw_character(text, appearance);
				return;
			}
			Shape::Image(image) => {
				self.draw_image(image, appearance);
				return;
			}
		}
		ctx.close_path();

		ctx.set_fill_style_str(&appearance.color.to_css(appearance.opacity));
		ctx.fill();

		if let Some(stroke) = stroke {
			ctx.set_stroke_style_str(&stroke.color.to_css(appearance.opacity));
			ctx.set_line_width(stroke.width);
			ctx.stroke();
		}
	}
}

/// Renders the current state of the simulation to the canvas.
pub fn render(state: &ParticlesState, ctx: &CanvasRenderingContext2d, images: &mut ImageCache) {
	let character = &state.options().particles.shape.character;
	let mut drawer = CanvasDrawer::new(ctx, images, character);
	state.render(&mut drawer);
}
