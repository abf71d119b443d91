//! UI components.

pub mod trade_graph;
