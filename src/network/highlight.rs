//! Click-driven highlight computation.
//!
//! Stateless: each call starts from the reset state (all nodes neutral, no
//! edges), so the result depends only on the snapshot and the click. A click
//! is answered in three steps:
//!
//! - the clicked node takes the selected marker color;
//! - for each transaction of the clicked entity, in first-seen order, every
//!   other node on a different layer whose label takes part in the
//!   transaction takes the transaction's color (later transactions win);
//! - when the clicked entity plays, in a transaction, the role of its own
//!   layer, that transaction's importer-partner-exporter chain is drawn.
//!
//! Edges are emitted once, in order of first emission.

use indexmap::IndexSet;
use log::{debug, warn};
use thiserror::Error;

use super::TradeNetwork;
use super::builder::{Edge, Layer, Node};
use super::colors::Color;
use super::payload::ClickEvent;
use super::transactions::Transaction;

#[derive(Debug, Error, PartialEq)]
pub enum HighlightError {
	#[error("clicked node {index} is out of range ({len} nodes)")]
	NodeOutOfRange { index: usize, len: usize },
}

/// Node colors (indexed like the node table) and the edges to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlight {
	pub node_colors: Vec<Color>,
	pub edges: Vec<Edge>,
	/// Index of the clicked node, `None` in the idle state.
	pub selected: Option<usize>,
}

impl Highlight {
	/// The reset state: every node neutral, nothing selected, no edges.
	pub fn idle(network: &TradeNetwork) -> Self {
		Self {
			node_colors: vec![network.markers().neutral; network.nodes().len()],
			edges: Vec::new(),
			selected: None,
		}
	}

	pub fn is_idle(&self) -> bool {
		self.selected.is_none()
	}
}

/// Whether the clicked node's entity fills its own layer's role in `transaction`.
fn plays_own_role(node: &Node, transaction: &Transaction) -> bool {
	let entity = match node.layer() {
		Layer::Importer => &transaction.importer,
		Layer::SecondPartner => &transaction.second_partner,
		Layer::Exporter => &transaction.exporter,
	};
	entity == node.label()
}

/// Recompute highlighted node colors and edges for `click`.
///
/// A missing click, or one without a custom-data payload, yields the idle
/// state. A click naming a node that does not exist is rejected.
pub fn highlight(
	network: &TradeNetwork,
	click: Option<&ClickEvent>,
) -> Result<Highlight, HighlightError> {
	let mut result = Highlight::idle(network);

	let Some(click) = click.filter(|c| c.custom_data.is_some()) else {
		return Ok(result);
	};

	let nodes = network.nodes();
	let clicked = nodes
		.get(click.point_number)
		.ok_or(HighlightError::NodeOutOfRange {
			index: click.point_number,
			len: nodes.len(),
		})?;

	result.node_colors[clicked.index] = network.markers().selected;
	result.selected = Some(clicked.index);

	let mut edges: IndexSet<Edge> = IndexSet::new();
	for transaction in &clicked.associated_transactions {
		match network.colors().get(transaction) {
			Some(color) => {
				for node in nodes.nodes() {
					if node.index != clicked.index
						&& node.layer() != clicked.layer()
						&& transaction.involves(node.label())
					{
						result.node_colors[node.index] = color;
					}
				}
			}
			None => warn!(
				"trade-network: transaction {:?} has no color, skipping recolor",
				transaction
			),
		}

		if plays_own_role(clicked, transaction) {
			edges.extend(nodes.transaction_edges(transaction));
		}
	}
	result.edges = edges.into_iter().collect();

	debug!(
		"trade-network: highlight {} ({} transactions, {} edges)",
		clicked.key,
		clicked.associated_transactions.len(),
		result.edges.len()
	);

	Ok(result)
}
