//! Leptos component hosting the particle field on a canvas element.
//!
//! The component sizes the canvas, builds a [`ParticlesState`] from the
//! options signal and drives it with `requestAnimationFrame`. Mouse events
//! feed the pointer handlers.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::options::ParticlesOptions;
use super::particle::Point;
use super::render::{self, ImageCache};
use super::state::{NOMINAL_FPS, ParticlesState};

/// Longest frame step the simulation will take, in nominal frames. Keeps a
/// tab that was in the background from teleporting everything on return.
const MAX_DELTA: f64 = 4.0;

/// Simulation state plus the per-canvas resources it renders with.
struct CanvasContext {
	state: ParticlesState,
	images: ImageCache,
	/// Timestamp of the previous frame in milliseconds.
	last_frame: Option<f64>,
}

impl CanvasContext {
	/// Frame multiplier since the previous frame, 1.0 at the nominal rate.
	fn delta(&mut self, now: f64) -> f64 {
		let delta = match self.last_frame {
			Some(last) => (now - last) / (1000.0 / NOMINAL_FPS),
			None => 1.0,
		};
		self.last_frame = Some(now);
		delta.clamp(0.0, MAX_DELTA)
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an animated particle field on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and follow window resizes.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn ParticlesCanvas(
	#[prop(into)] options: Signal<ParticlesOptions>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = match window_size(&window).filter(|_| fullscreen) {
			Some(size) => size,
			None => (
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			),
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("particles-canvas: 2d context unavailable");
			return;
		};

		let state = match ParticlesState::new(options.get(), w, h) {
			Ok(state) => state,
			Err(e) => {
				warn!("particles-canvas: invalid options, using defaults: {}", e);
				match ParticlesState::new(ParticlesOptions::default(), w, h) {
					Ok(state) => state,
					Err(e) => {
						warn!("particles-canvas: cannot start: {}", e);
						return;
					}
				}
			}
		};
		*context_init.borrow_mut() = Some(CanvasContext {
			state,
			images: ImageCache::default(),
			last_frame: None,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let delta = c.delta(js_sys::Date::now());
				c.state.tick(delta);
				render::render(&c.state, &ctx, &mut c.images);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let position = pointer_position(&canvas, &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(position);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	let context_cl = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let position = pointer_position(&canvas, &ev);
		if let Some(ref mut c) = *context_cl.borrow_mut() {
			c.state.click(position);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particles-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn context() -> CanvasContext {
		let mut options = ParticlesOptions::default();
		options.particles.number.value = 0;
		CanvasContext {
			state: ParticlesState::new(options, 100.0, 100.0).unwrap(),
			images: ImageCache::default(),
			last_frame: None,
		}
	}

	#[test]
	fn test_frame_delta_is_normalized_and_clamped() {
		let mut c = context();
		assert_eq!(c.delta(1000.0), 1.0);
		assert!((c.delta(1000.0 + 1000.0 / 60.0) - 1.0).abs() < 1e-9);
		assert!((c.delta(1000.0 + 1000.0 / 60.0 * 3.0) - 2.0).abs() < 1e-9);
		assert_eq!(c.delta(60_000.0), MAX_DELTA);
		assert_eq!(c.delta(1.0), 0.0);
	}
}
