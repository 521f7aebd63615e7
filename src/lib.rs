//! particles-canvas: animated, interactive particle backgrounds for the web.
//!
//! This crate provides a WASM-based canvas component that animates particles
//! with linking lines, collisions and pointer effects, configured from a
//! particles.js-style JSON document.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Pulled in for its `js` feature so `rand` can seed itself in the browser.
use getrandom as _;

pub mod components;

pub use components::particles_canvas::{
	ConfigError, ParticlesCanvas, ParticlesOptions, ParticlesState,
};

/// Id of the script element the page provides its configuration in.
pub const CONFIG_ELEMENT_ID: &str = "particles-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particles-canvas: logging initialized");
}

/// Load options from a script element with id="particles-config".
/// Expected format: particles.js JSON with { particles: {...}, interactivity: {...} }
fn load_options() -> Option<ParticlesOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match ParticlesOptions::from_json(&json_text) {
		Ok(options) => {
			info!(
				"particles-canvas: loaded options, {} particles requested",
				options.particles.number.value
			);
			Some(options)
		}
		Err(e) => {
			warn!("particles-canvas: failed to load options: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads options from the DOM and renders a full-screen particle field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let options = load_options().unwrap_or_default();
	let options_signal = Signal::derive(move || options.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Particles" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-particles">
			<ParticlesCanvas options=options_signal fullscreen=true />
		</div>
	}
}
