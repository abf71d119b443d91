//! Typed trade rows, deduplicated transactions and the per-entity index.
//!
//! Transactions are kept in insertion-ordered sets, so every transaction has a
//! stable first-seen position. Downstream code (color assignment, highlight
//! propagation) iterates in that order and is therefore deterministic.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A named trade participant. Equality is exact string match.
pub type Entity = String;

/// One input record: the three participants of a trade.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TradeRow {
	pub importer: Entity,
	pub exporter: Entity,
	pub second_partner: Entity,
}

impl TradeRow {
	pub fn new(
		importer: impl Into<Entity>,
		exporter: impl Into<Entity>,
		second_partner: impl Into<Entity>,
	) -> Self {
		Self {
			importer: importer.into(),
			exporter: exporter.into(),
			second_partner: second_partner.into(),
		}
	}

	pub fn transaction(&self) -> Transaction {
		Transaction {
			importer: self.importer.clone(),
			exporter: self.exporter.clone(),
			second_partner: self.second_partner.clone(),
		}
	}
}

/// A deduplicated `(importer, exporter, second partner)` triple.
///
/// Serialized as a three-element array, matching the custom-data payload
/// attached to each rendered node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(from = "(Entity, Entity, Entity)", into = "(Entity, Entity, Entity)")]
pub struct Transaction {
	pub importer: Entity,
	pub exporter: Entity,
	pub second_partner: Entity,
}

impl Transaction {
	/// Whether `entity` takes part in this transaction in any role.
	pub fn involves(&self, entity: &str) -> bool {
		self.importer == entity || self.exporter == entity || self.second_partner == entity
	}
}

impl From<(Entity, Entity, Entity)> for Transaction {
	fn from((importer, exporter, second_partner): (Entity, Entity, Entity)) -> Self {
		Self {
			importer,
			exporter,
			second_partner,
		}
	}
}

impl From<Transaction> for (Entity, Entity, Entity) {
	fn from(t: Transaction) -> Self {
		(t.importer, t.exporter, t.second_partner)
	}
}

/// Deduplicated transactions plus, for every entity, the transactions it
/// participates in.
#[derive(Clone, Debug, Default)]
pub struct TransactionIndex {
	unique: IndexSet<Transaction>,
	by_entity: IndexMap<Entity, IndexSet<Transaction>>,
}

impl TransactionIndex {
	pub fn build<'a>(rows: impl IntoIterator<Item = &'a TradeRow>) -> Self {
		let mut index = Self::default();
		for row in rows {
			let transaction = row.transaction();
			for entity in [&row.importer, &row.exporter, &row.second_partner] {
				index
					.by_entity
					.entry(entity.clone())
					.or_default()
					.insert(transaction.clone());
			}
			index.unique.insert(transaction);
		}
		index
	}

	/// Every distinct transaction, in first-seen order.
	pub fn unique_transactions(&self) -> &IndexSet<Transaction> {
		&self.unique
	}

	pub fn by_entity(&self) -> &IndexMap<Entity, IndexSet<Transaction>> {
		&self.by_entity
	}

	/// Transactions `entity` participates in, if it appears at all.
	pub fn transactions_of(&self, entity: &str) -> Option<&IndexSet<Transaction>> {
		self.by_entity.get(entity)
	}

	pub fn len(&self) -> usize {
		self.unique.len()
	}

	pub fn is_empty(&self) -> bool {
		self.unique.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn duplicate_rows_collapse_to_one_transaction() {
		let rows = vec![TradeRow::new("A", "C", "B"), TradeRow::new("A", "C", "B")];
		let index = TransactionIndex::build(&rows);

		assert_eq!(index.len(), 1);
		for entity in ["A", "B", "C"] {
			assert_eq!(index.transactions_of(entity).map(|s| s.len()), Some(1));
		}
	}

	#[test]
	fn entity_in_several_roles_collects_all_its_transactions() {
		let rows = vec![
			TradeRow::new("A", "C", "B"),
			TradeRow::new("D", "A", "B"),
			TradeRow::new("E", "F", "G"),
		];
		let index = TransactionIndex::build(&rows);

		let of_a: Vec<_> = index.transactions_of("A").unwrap().iter().cloned().collect();
		assert_eq!(of_a, vec![rows[0].transaction(), rows[1].transaction()]);
		assert!(index.transactions_of("Z").is_none());
	}

	#[test]
	fn unique_set_is_union_of_entity_sets() {
		let rows = vec![
			TradeRow::new("A", "C", "B"),
			TradeRow::new("B", "A", "C"),
			TradeRow::new("A", "C", "B"),
		];
		let index = TransactionIndex::build(&rows);

		let union: IndexSet<Transaction> = index
			.by_entity()
			.values()
			.flat_map(|set| set.iter().cloned())
			.collect();
		assert_eq!(union.len(), index.len());
		assert!(union.iter().all(|t| index.unique_transactions().contains(t)));
		assert_eq!(index.unique_transactions().get_index_of(&rows[1].transaction()), Some(1));
	}

	#[test]
	fn transaction_serializes_as_triple() {
		let t = TradeRow::new("Norway", "Sweden", "Denmark").transaction();
		let json = serde_json::to_string(&t).unwrap();
		assert_eq!(json, r#"["Norway","Sweden","Denmark"]"#);
		assert_eq!(serde_json::from_str::<Transaction>(&json).unwrap(), t);
	}
}
