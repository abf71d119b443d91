//! Node table and full edge set for the three-layer graph.
//!
//! Node identity is first-occurrence order over rows, visiting each row's
//! importer, second partner and exporter in that order. A node's index is its
//! position in that order and is what click events refer back to.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::colors::Color;
use super::jitter::Jitter;
use super::transactions::{Entity, TradeRow, Transaction, TransactionIndex};

/// The role slot a node occupies; doubles as its z coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Layer {
	Importer = 0,
	SecondPartner = 1,
	Exporter = 2,
}

impl Layer {
	pub const ALL: [Layer; 3] = [Layer::Importer, Layer::SecondPartner, Layer::Exporter];

	pub fn z(self) -> f64 {
		self as u8 as f64
	}

	/// Axis tick text.
	pub fn title(self) -> &'static str {
		match self {
			Layer::Importer => "Importer",
			Layer::SecondPartner => "2nd Partner",
			Layer::Exporter => "Exporter",
		}
	}
}

/// Node identity: the same entity in two layers is two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey {
	pub entity: Entity,
	pub layer: Layer,
}

impl NodeKey {
	pub fn new(entity: impl Into<Entity>, layer: Layer) -> Self {
		Self {
			entity: entity.into(),
			layer,
		}
	}
}

impl fmt::Display for NodeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}_{}", self.entity, self.layer as u8)
	}
}

/// Scene coordinates: `x` is the node index, `z` the layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

#[derive(Clone, Debug)]
pub struct Node {
	pub key: NodeKey,
	pub index: usize,
	pub position: Position,
	pub color: Color,
	/// Every transaction the entity takes part in, any role, first-seen order.
	pub associated_transactions: IndexSet<Transaction>,
}

impl Node {
	pub fn label(&self) -> &str {
		&self.key.entity
	}

	pub fn layer(&self) -> Layer {
		self.key.layer
	}
}

/// Which pair of adjacent layers an edge spans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeSpan {
	ImporterPartner,
	PartnerExporter,
}

/// A segment between two nodes, by node index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	pub from: usize,
	pub to: usize,
	pub span: EdgeSpan,
}

/// The built graph: nodes in index order plus a key lookup.
#[derive(Clone, Debug, Default)]
pub struct NodeTable {
	nodes: Vec<Node>,
	by_key: IndexMap<NodeKey, usize>,
}

impl NodeTable {
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn get(&self, index: usize) -> Option<&Node> {
		self.nodes.get(index)
	}

	pub fn index_of(&self, entity: &str, layer: Layer) -> Option<usize> {
		self.by_key.get(&NodeKey::new(entity, layer)).copied()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// The importer->partner and partner->exporter edges of `transaction`,
	/// skipping any whose endpoints have no node.
	pub fn transaction_edges(&self, transaction: &Transaction) -> impl Iterator<Item = Edge> {
		let importer = self.index_of(&transaction.importer, Layer::Importer);
		let partner = self.index_of(&transaction.second_partner, Layer::SecondPartner);
		let exporter = self.index_of(&transaction.exporter, Layer::Exporter);

		let first = importer.zip(partner).map(|(from, to)| Edge {
			from,
			to,
			span: EdgeSpan::ImporterPartner,
		});
		let second = partner.zip(exporter).map(|(from, to)| Edge {
			from,
			to,
			span: EdgeSpan::PartnerExporter,
		});
		first.into_iter().chain(second)
	}
}

/// Create one node per unseen `(entity, layer)` pair and derive every edge.
pub fn build(
	rows: &[TradeRow],
	index: &TransactionIndex,
	neutral: Color,
	jitter: &mut impl Jitter,
) -> (NodeTable, Vec<Edge>) {
	let mut table = NodeTable::default();

	for row in rows {
		let slots = [
			(&row.importer, Layer::Importer),
			(&row.second_partner, Layer::SecondPartner),
			(&row.exporter, Layer::Exporter),
		];
		for (entity, layer) in slots {
			let key = NodeKey::new(entity.as_str(), layer);
			if table.by_key.contains_key(&key) {
				continue;
			}
			let node_index = table.nodes.len();
			table.nodes.push(Node {
				position: Position {
					x: node_index as f64,
					y: jitter.next_offset(),
					z: layer.z(),
				},
				index: node_index,
				color: neutral,
				associated_transactions: index.transactions_of(entity).cloned().unwrap_or_default(),
				key: key.clone(),
			});
			table.by_key.insert(key, node_index);
		}
	}

	let edges = index
		.unique_transactions()
		.iter()
		.flat_map(|t| table.transaction_edges(t))
		.collect();

	(table, edges)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::jitter::SeededJitter;

	const GREY: Color = Color::rgb(128, 128, 128);

	fn build_rows(rows: &[TradeRow], seed: u64) -> (NodeTable, Vec<Edge>) {
		let index = TransactionIndex::build(rows);
		build(rows, &index, GREY, &mut SeededJitter::new(seed))
	}

	fn keys(table: &NodeTable) -> Vec<String> {
		table.nodes().iter().map(|n| n.key.to_string()).collect()
	}

	#[test]
	fn single_row_yields_three_nodes_and_two_edges() {
		let (table, edges) = build_rows(&[TradeRow::new("A", "C", "B")], 1);

		assert_eq!(keys(&table), vec!["A_0", "B_1", "C_2"]);
		assert_eq!(
			edges,
			vec![
				Edge { from: 0, to: 1, span: EdgeSpan::ImporterPartner },
				Edge { from: 1, to: 2, span: EdgeSpan::PartnerExporter },
			]
		);
		let c = &table.nodes()[2];
		assert_eq!((c.position.x, c.position.z), (2.0, 2.0));
		assert!((-1.0..=1.0).contains(&c.position.y));
		assert_eq!(c.color, GREY);
	}

	#[test]
	fn same_entity_in_two_layers_is_two_nodes() {
		let rows = [TradeRow::new("A", "B", "C"), TradeRow::new("B", "A", "C")];
		let (table, _) = build_rows(&rows, 1);

		assert_eq!(keys(&table), vec!["A_0", "C_1", "B_2", "B_0", "A_2"]);
		let a0 = table.index_of("A", Layer::Importer).unwrap();
		let a2 = table.index_of("A", Layer::Exporter).unwrap();
		assert_ne!(a0, a2);
		assert_eq!(
			table.get(a0).unwrap().associated_transactions,
			table.get(a2).unwrap().associated_transactions
		);
	}

	#[test]
	fn identity_is_stable_across_builds() {
		let rows = [
			TradeRow::new("NO", "SE", "DK"),
			TradeRow::new("DE", "NO", "DK"),
			TradeRow::new("NO", "SE", "DK"),
			TradeRow::new("FI", "DE", "SE"),
		];
		let (first, _) = build_rows(&rows, 1);
		let (second, _) = build_rows(&rows, 99);

		assert_eq!(keys(&first), keys(&second));
		for (i, node) in first.nodes().iter().enumerate() {
			assert_eq!(node.index, i);
			assert_eq!(second.nodes()[i].index, i);
		}
	}

	#[test]
	fn edge_count_is_bounded_by_transactions() {
		let rows = [
			TradeRow::new("NO", "SE", "DK"),
			TradeRow::new("DE", "NO", "DK"),
			TradeRow::new("NO", "SE", "DK"),
			TradeRow::new("FI", "DE", "SE"),
		];
		let index = TransactionIndex::build(&rows);
		let (_, edges) = build(&rows, &index, GREY, &mut SeededJitter::new(3));
		assert!(edges.len() <= 2 * index.len());
		assert_eq!(edges.len(), 6);
	}

	#[test]
	fn missing_endpoints_are_skipped() {
		let (table, _) = build_rows(&[TradeRow::new("A", "C", "B")], 1);
		let stray = Transaction::from(("A".to_string(), "Z".to_string(), "B".to_string()));
		let edges: Vec<_> = table.transaction_edges(&stray).collect();
		assert_eq!(edges, vec![Edge { from: 0, to: 1, span: EdgeSpan::ImporterPartner }]);
	}
}
