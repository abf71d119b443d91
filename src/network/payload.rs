//! Render and interaction boundary types.
//!
//! Node and edge traces are flat coordinate arrays. The edge trace separates
//! segments with `None`, so each edge occupies three consecutive entries.
//! Per-node custom data is the node's associated transactions as JSON text.

use serde::{Deserialize, Serialize};

use super::TradeNetwork;
use super::builder::{Edge, Node, NodeTable, Position};
use super::colors::Color;
use super::highlight::Highlight;

/// A click on a rendered node.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ClickEvent {
	/// Index of the clicked point in the node trace.
	pub point_number: usize,
	/// The clicked point's custom data. Clicks without it are ignored.
	#[serde(default)]
	pub custom_data: Option<String>,
}

impl ClickEvent {
	pub fn for_node(node: &Node) -> Self {
		Self {
			point_number: node.index,
			custom_data: Some(custom_data(node)),
		}
	}
}

/// JSON list of the node's associated transactions.
pub fn custom_data(node: &Node) -> String {
	serde_json::to_string(&node.associated_transactions).unwrap_or_else(|_| "[]".to_string())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NodeTrace {
	pub x: Vec<f64>,
	pub y: Vec<f64>,
	pub z: Vec<f64>,
	pub labels: Vec<String>,
	pub colors: Vec<Color>,
	pub custom_data: Vec<String>,
}

impl NodeTrace {
	/// `colors` is indexed like the node table.
	pub fn new(nodes: &NodeTable, colors: &[Color]) -> Self {
		let mut trace = Self::default();
		for node in nodes.nodes() {
			trace.x.push(node.position.x);
			trace.y.push(node.position.y);
			trace.z.push(node.position.z);
			trace.labels.push(node.label().to_string());
			trace.colors.push(colors.get(node.index).copied().unwrap_or(node.color));
			trace.custom_data.push(custom_data(node));
		}
		trace
	}

	pub fn len(&self) -> usize {
		self.x.len()
	}

	pub fn is_empty(&self) -> bool {
		self.x.is_empty()
	}

	pub fn position(&self, index: usize) -> Option<Position> {
		Some(Position {
			x: *self.x.get(index)?,
			y: *self.y.get(index)?,
			z: *self.z.get(index)?,
		})
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EdgeTrace {
	pub x: Vec<Option<f64>>,
	pub y: Vec<Option<f64>>,
	pub z: Vec<Option<f64>>,
}

impl EdgeTrace {
	pub fn new(nodes: &NodeTable, edges: &[Edge]) -> Self {
		let mut trace = Self::default();
		for edge in edges {
			let (Some(from), Some(to)) = (nodes.get(edge.from), nodes.get(edge.to)) else {
				continue;
			};
			let (a, b) = (from.position, to.position);
			trace.x.extend([Some(a.x), Some(b.x), None]);
			trace.y.extend([Some(a.y), Some(b.y), None]);
			trace.z.extend([Some(a.z), Some(b.z), None]);
		}
		trace
	}

	/// Line segments, decoded from the gap-separated arrays.
	pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
		self.x
			.chunks_exact(3)
			.zip(self.y.chunks_exact(3))
			.zip(self.z.chunks_exact(3))
			.filter_map(|((x, y), z)| match (x, y, z) {
				(
					[Some(x1), Some(x2), None],
					[Some(y1), Some(y2), None],
					[Some(z1), Some(z2), None],
				) => Some((
					Position { x: *x1, y: *y1, z: *z1 },
					Position { x: *x2, y: *y2, z: *z2 },
				)),
				_ => None,
			})
	}
}

/// Everything the view needs to draw one state of the graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderPayload {
	pub nodes: NodeTrace,
	pub edges: EdgeTrace,
	pub selected: Option<usize>,
}

impl RenderPayload {
	pub fn from_highlight(network: &TradeNetwork, highlight: &Highlight) -> Self {
		Self {
			nodes: NodeTrace::new(network.nodes(), &highlight.node_colors),
			edges: EdgeTrace::new(network.nodes(), &highlight.edges),
			selected: highlight.selected,
		}
	}

	/// The initial figure: neutral nodes and the full edge set.
	pub fn overview(network: &TradeNetwork) -> Self {
		let neutral = vec![network.markers().neutral; network.nodes().len()];
		Self {
			nodes: NodeTrace::new(network.nodes(), &neutral),
			edges: EdgeTrace::new(network.nodes(), network.edges()),
			selected: None,
		}
	}
}
