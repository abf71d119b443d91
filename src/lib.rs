//! trade-network: Interactive three-layer trade network explorer.
//!
//! Builds an importer / second partner / exporter graph from trade rows and
//! renders it as a WASM canvas app in which clicking a node highlights the
//! transactions it takes part in.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod network;

pub use components::trade_graph::{Camera, TradeGraphCanvas};
pub use config::ViewConfig;
pub use network::TradeNetwork;
pub use network::loader::{LoadError, TradeData};

use components::trade_graph::Theme;
use network::MarkerColors;
use network::colors::Palette;
use network::jitter::{BrowserJitter, SeededJitter};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("trade-network: logging initialized");
}

/// Load trade rows from a script element with id="trade-data".
///
/// `type="text/csv"` is read as headed CSV with the default column names;
/// anything else as JSON: `{ rows: [...], config: {...} }`.
fn load_trade_data() -> Result<TradeData, LoadError> {
	let window: Window = web_sys::window().ok_or(LoadError::MissingElement)?;
	let script: HtmlScriptElement = window
		.document()
		.and_then(|d| d.get_element_by_id("trade-data"))
		.and_then(|e| e.dyn_into().ok())
		.ok_or(LoadError::MissingElement)?;
	let text = script.text().map_err(|_| LoadError::MissingElement)?;

	let data = match script.type_().as_str() {
		"text/csv" => TradeData::from_csv(&text, ViewConfig::default())?,
		"" | "application/json" => TradeData::from_json(&text)?,
		other => return Err(LoadError::UnsupportedType(other.to_string())),
	};
	info!(
		"trade-network: loaded {} rows ({})",
		data.rows.len(),
		data.config.columns
	);
	Ok(data)
}

/// Build the snapshot the canvas renders, honoring the configured palette and
/// jitter seed.
pub fn build_network(data: &TradeData, markers: MarkerColors) -> TradeNetwork {
	let palette = data.config.palette().unwrap_or_else(|e| {
		error!("trade-network: {}, using default palette", e);
		Palette::default()
	});
	match data.config.seed {
		Some(seed) => TradeNetwork::build(&data.rows, &palette, markers, &mut SeededJitter::new(seed)),
		None => TradeNetwork::build(&data.rows, &palette, markers, &mut BrowserJitter),
	}
}

/// Main application component.
/// Loads trade data from the DOM and renders the trade network.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = load_trade_data().unwrap_or_else(|e| {
		error!("trade-network: failed to load trade data: {}", e);
		TradeData::default()
	});
	let theme = Theme::by_name(&data.config.theme);
	let title = data.config.title.clone();
	let network = build_network(&data, theme.markers);
	let network_signal = Signal::derive(move || network.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=title.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<TradeGraphCanvas network=network_signal title=title theme=theme fullscreen=true />
			<div class="graph-overlay">
				<p class="subtitle">"Click a node to highlight its trades. Drag to rotate. Scroll to zoom."</p>
			</div>
		</div>
	}
}
