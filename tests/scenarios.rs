//! End-to-end behavior of the trade network through the public API.

use trade_network::network::MarkerColors;
use trade_network::network::builder::{Edge, EdgeSpan, Layer};
use trade_network::network::colors::Palette;
use trade_network::network::highlight::highlight;
use trade_network::network::jitter::SeededJitter;
use trade_network::network::payload::{ClickEvent, RenderPayload};
use trade_network::network::transactions::{TradeRow, Transaction};
use trade_network::{TradeData, TradeNetwork, ViewConfig, build_network};

fn build(rows: &[TradeRow], seed: u64) -> TradeNetwork {
	TradeNetwork::build(
		rows,
		&Palette::plotly(),
		MarkerColors::default(),
		&mut SeededJitter::new(seed),
	)
}

/// Importer A, second partner B, exporter C.
fn abc() -> TradeRow {
	TradeRow::new("A", "C", "B")
}

fn keys(network: &TradeNetwork) -> Vec<String> {
	network
		.nodes()
		.nodes()
		.iter()
		.map(|n| n.key.to_string())
		.collect()
}

#[test]
fn scenario_a_single_transaction() {
	let net = build(&[abc()], 1);

	let unique: Vec<_> = net.transactions().unique_transactions().iter().cloned().collect();
	assert_eq!(
		unique,
		vec![Transaction::from(("A".to_string(), "C".to_string(), "B".to_string()))]
	);
	assert_eq!(keys(&net), vec!["A_0", "B_1", "C_2"]);
	assert_eq!(
		net.edges(),
		&[
			Edge { from: 0, to: 1, span: EdgeSpan::ImporterPartner },
			Edge { from: 1, to: 2, span: EdgeSpan::PartnerExporter },
		]
	);
}

#[test]
fn scenario_b_duplicate_rows() {
	let net = build(&[abc(), abc()], 1);
	assert_eq!(net.transactions().len(), 1);
	assert_eq!(net.nodes().len(), 3);
	assert_eq!(net.edges().len(), 2);
}

#[test]
fn scenario_c_click_second_partner() {
	let net = build(&[abc()], 1);
	let b = net.nodes().index_of("B", Layer::SecondPartner).unwrap();
	let click = ClickEvent::for_node(net.nodes().get(b).unwrap());

	let result = highlight(&net, Some(&click)).unwrap();
	let color = net.colors().get(&abc().transaction()).unwrap();

	assert_eq!(result.node_colors[0], color);
	assert_eq!(result.node_colors[2], color);
	assert_eq!(result.node_colors[b], MarkerColors::default().selected);
	assert_eq!(result.edges, net.edges());
}

#[test]
fn node_identity_is_deterministic() {
	let rows = [
		TradeRow::new("Norway", "Sweden", "Denmark"),
		TradeRow::new("Germany", "Norway", "Denmark"),
		TradeRow::new("Norway", "Sweden", "Denmark"),
		TradeRow::new("Finland", "Germany", "Sweden"),
	];
	let first = build(&rows, 1);
	let second = build(&rows, 2);

	assert_eq!(keys(&first), keys(&second));
	for (i, node) in first.nodes().nodes().iter().enumerate() {
		assert_eq!(node.index, i);
	}
}

#[test]
fn color_map_is_total_and_edges_bounded() {
	let rows: Vec<_> = (0..25)
		.map(|i| TradeRow::new(format!("I{}", i % 7), format!("E{}", i % 5), format!("P{}", i % 3)))
		.collect();
	let net = build(&rows, 3);

	for t in net.transactions().unique_transactions() {
		assert!(net.colors().get(t).is_some());
	}
	assert!(net.edges().len() <= 2 * net.transactions().len());
}

#[test]
fn reset_is_idempotent() {
	let net = build(&[abc(), TradeRow::new("D", "F", "E")], 1);
	let _ = highlight(&net, Some(&ClickEvent::for_node(net.nodes().get(4).unwrap()))).unwrap();

	let idle = highlight(&net, None).unwrap();
	assert!(idle.edges.is_empty());
	assert!(
		idle.node_colors
			.iter()
			.all(|c| *c == MarkerColors::default().neutral)
	);
	assert_eq!(idle, highlight(&net, None).unwrap());
}

#[test]
fn csv_to_rendered_highlight() {
	let csv = "Importer,Exporter,partner2Desc\nNorway,Sweden,Denmark\nGermany,Norway,Denmark\n";
	let config = ViewConfig {
		seed: Some(11),
		..ViewConfig::default()
	};
	let data = TradeData::from_csv(csv, config).unwrap();
	let net = build_network(&data, MarkerColors::default());

	let denmark = net.nodes().index_of("Denmark", Layer::SecondPartner).unwrap();
	let click = ClickEvent::for_node(net.nodes().get(denmark).unwrap());
	let payload = RenderPayload::from_highlight(&net, &highlight(&net, Some(&click)).unwrap());

	assert_eq!(payload.selected, Some(denmark));
	assert_eq!(payload.edges.segments().count(), 4);
	assert_eq!(payload.nodes.custom_data[denmark], click.custom_data.unwrap());
}
