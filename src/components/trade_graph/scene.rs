//! Scene state: the current figure, the camera and pointer interaction.
//!
//! The network snapshot is fixed at mount. Each click replaces the figure's
//! traces with a freshly computed highlight; the camera the user has set up is
//! read before the figure is rebuilt and put back afterwards.

use log::warn;

use super::camera::{Camera, Projected, Projector, SceneBounds};
use super::scale::ScaleConfig;
use crate::network::TradeNetwork;
use crate::network::highlight::{self, Highlight};
use crate::network::payload::{ClickEvent, RenderPayload};

/// Figure-level settings kept across rebuilds.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
	pub title: String,
	pub camera: Camera,
}

/// Traces plus layout: one complete drawable state.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
	pub data: RenderPayload,
	pub layout: Layout,
}

impl Figure {
	pub fn new(data: RenderPayload, title: &str) -> Self {
		Self {
			data,
			layout: Layout {
				title: title.to_string(),
				camera: Camera::default(),
			},
		}
	}
}

/// Tracks an in-progress orbit drag. A press released without movement is a
/// click.
#[derive(Clone, Debug, Default)]
pub struct OrbitState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub last_x: f64,
	pub last_y: f64,
	pub moved: bool,
}

/// Pixels a press may travel and still count as a click.
const CLICK_TOLERANCE: f64 = 4.0;

impl OrbitState {
	pub fn begin(&mut self, x: f64, y: f64) {
		*self = Self {
			active: true,
			start_x: x,
			start_y: y,
			last_x: x,
			last_y: y,
			moved: false,
		};
	}

	/// Record a pointer move and return the delta since the last one.
	pub fn drag_to(&mut self, x: f64, y: f64) -> (f64, f64) {
		let delta = (x - self.last_x, y - self.last_y);
		self.last_x = x;
		self.last_y = y;
		if (x - self.start_x).hypot(y - self.start_y) > CLICK_TOLERANCE {
			self.moved = true;
		}
		delta
	}

	/// End the drag; true when it was a click.
	pub fn end(&mut self) -> bool {
		let was_click = self.active && !self.moved;
		self.active = false;
		was_click
	}
}

pub struct TradeGraphState {
	network: TradeNetwork,
	pub figure: Figure,
	pub orbit: OrbitState,
	pub hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
}

impl TradeGraphState {
	pub fn new(network: TradeNetwork, title: &str, width: f64, height: f64) -> Self {
		let figure = Figure::new(RenderPayload::overview(&network), title);
		Self {
			network,
			figure,
			orbit: OrbitState::default(),
			hovered: None,
			width,
			height,
		}
	}

	pub fn network(&self) -> &TradeNetwork {
		&self.network
	}

	pub fn camera(&self) -> &Camera {
		&self.figure.layout.camera
	}

	pub fn camera_mut(&mut self) -> &mut Camera {
		&mut self.figure.layout.camera
	}

	pub fn projector(&self) -> Projector {
		Projector::new(
			self.camera(),
			SceneBounds::of(&self.figure.data.nodes),
			self.width,
			self.height,
		)
	}

	/// Every node's projection, indexed like the node trace.
	pub fn projected_nodes(&self, projector: &Projector) -> Vec<Option<Projected>> {
		(0..self.figure.data.nodes.len())
			.map(|i| {
				self.figure
					.data
					.nodes
					.position(i)
					.and_then(|p| projector.project(p))
			})
			.collect()
	}

	/// The nearest node whose hit circle contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<usize> {
		let projector = self.projector();
		self.projected_nodes(&projector)
			.into_iter()
			.enumerate()
			.filter_map(|(i, p)| p.map(|p| (i, p)))
			.filter(|(_, p)| (p.x - sx).hypot(p.y - sy) <= config.hit_radius(p.k))
			.min_by(|(_, a), (_, b)| a.depth.total_cmp(&b.depth))
			.map(|(i, _)| i)
	}

	/// Answer a click on node `index`, or on empty canvas when `None`.
	///
	/// Empty-canvas clicks reset to the idle state (neutral nodes, no edges).
	/// Failed highlights are logged and shown as the idle state too.
	pub fn click(&mut self, index: Option<usize>) {
		let event = index.map(|i| match self.network.nodes().get(i) {
			Some(node) => ClickEvent::for_node(node),
			None => ClickEvent {
				point_number: i,
				custom_data: Some("[]".to_string()),
			},
		});
		let result = highlight::highlight(&self.network, event.as_ref()).unwrap_or_else(|e| {
			warn!("trade-network: {}", e);
			Highlight::idle(&self.network)
		});
		self.show(RenderPayload::from_highlight(&self.network, &result));
	}

	/// Replace the figure with `payload`, keeping the current camera.
	pub fn show(&mut self, payload: RenderPayload) {
		let camera = self.camera().clone();
		let mut figure = Figure::new(payload, &self.figure.layout.title);
		figure.layout.camera = camera;
		self.figure = figure;
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.hovered = node;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::MarkerColors;
	use crate::network::colors::Palette;
	use crate::network::jitter::SeededJitter;
	use crate::network::transactions::TradeRow;

	fn state() -> TradeGraphState {
		let network = TradeNetwork::build(
			&[TradeRow::new("A", "C", "B"), TradeRow::new("D", "C", "B")],
			&Palette::plotly(),
			MarkerColors::default(),
			&mut SeededJitter::new(2),
		);
		TradeGraphState::new(network, "Trade Network", 800.0, 600.0)
	}

	#[test]
	fn highlight_keeps_the_users_camera() {
		let mut state = state();
		state.camera_mut().orbit(80.0, 25.0);
		state.camera_mut().zoom(0.7);
		let camera = state.camera().clone();

		state.click(Some(1));
		assert_eq!(state.camera(), &camera);
		assert_eq!(state.figure.data.selected, Some(1));

		state.click(None);
		assert_eq!(state.camera(), &camera);
		assert_eq!(state.figure.layout.title, "Trade Network");
	}

	#[test]
	fn out_of_range_click_degrades_to_idle() {
		let mut state = state();
		state.click(Some(42));
		assert_eq!(state.figure.data.selected, None);
		assert!(state.figure.data.edges.x.is_empty());
	}

	#[test]
	fn empty_canvas_click_resets_to_idle() {
		let mut state = state();
		let overview = state.network().edges().len();
		assert_eq!(state.figure.data.edges.segments().count(), overview);

		state.click(Some(1));
		assert_eq!(state.figure.data.edges.segments().count(), 3);
		state.click(None);

		let idle = Highlight::idle(state.network());
		assert_eq!(state.figure.data.selected, None);
		assert_eq!(state.figure.data.edges.segments().count(), 0);
		assert_eq!(state.figure.data.nodes.colors, idle.node_colors);
	}

	#[test]
	fn picking_finds_the_projected_node() {
		let state = state();
		let projector = state.projector();
		let target = state.projected_nodes(&projector)[2].unwrap();
		let config = ScaleConfig::default();
		let hit = state.node_at_position(target.x, target.y, &config);
		assert!(hit.is_some());
		assert_eq!(state.node_at_position(-500.0, -500.0, &config), None);
	}

	#[test]
	fn press_without_motion_is_a_click() {
		let mut orbit = OrbitState::default();
		orbit.begin(10.0, 10.0);
		orbit.drag_to(11.0, 12.0);
		assert!(orbit.end());

		orbit.begin(10.0, 10.0);
		assert_eq!(orbit.drag_to(40.0, 10.0), (30.0, 0.0));
		assert!(!orbit.end());
	}
}
