//! Trade network model: everything between raw rows and renderable traces.
//!
//! Built once at load time into an immutable [`TradeNetwork`] snapshot.
//! Clicks are answered by [`highlight::highlight`], a pure function of the
//! snapshot and the click event.

pub mod builder;
pub mod colors;
pub mod highlight;
pub mod jitter;
pub mod loader;
pub mod payload;
pub mod transactions;

use log::info;

use builder::{Edge, NodeTable};
use colors::{Color, ColorMap, Palette};
use jitter::Jitter;
use transactions::{TradeRow, TransactionIndex};

/// The two fixed marker colors used outside the transaction palette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerColors {
	/// Color of every node not touched by the current highlight.
	pub neutral: Color,
	/// Color of the clicked node.
	pub selected: Color,
}

impl Default for MarkerColors {
	fn default() -> Self {
		Self {
			neutral: Color::rgb(128, 128, 128),
			selected: Color::rgb(255, 0, 0),
		}
	}
}

/// Load-time snapshot of the graph. Never mutated after [`TradeNetwork::build`].
#[derive(Clone, Debug, Default)]
pub struct TradeNetwork {
	index: TransactionIndex,
	colors: ColorMap,
	nodes: NodeTable,
	edges: Vec<Edge>,
	markers: MarkerColors,
}

impl TradeNetwork {
	pub fn build(
		rows: &[TradeRow],
		palette: &Palette,
		markers: MarkerColors,
		jitter: &mut impl Jitter,
	) -> Self {
		let index = TransactionIndex::build(rows);
		let colors = ColorMap::assign(index.unique_transactions(), palette);
		let (nodes, edges) = builder::build(rows, &index, markers.neutral, jitter);

		info!(
			"trade-network: {} rows, {} unique transactions, {} nodes, {} edges",
			rows.len(),
			index.len(),
			nodes.len(),
			edges.len()
		);

		Self {
			index,
			colors,
			nodes,
			edges,
			markers,
		}
	}

	pub fn transactions(&self) -> &TransactionIndex {
		&self.index
	}

	pub fn colors(&self) -> &ColorMap {
		&self.colors
	}

	pub fn nodes(&self) -> &NodeTable {
		&self.nodes
	}

	/// Full, unhighlighted edge set.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn markers(&self) -> MarkerColors {
		self.markers
	}
}
