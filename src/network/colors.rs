//! Display colors and the transaction color assignment.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transactions::Transaction;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// An ordered, non-empty list of colors handed out to transactions.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	colors: Vec<Color>,
}

#[derive(Debug, Error, PartialEq)]
pub enum PaletteError {
	#[error("palette must contain at least one color")]
	Empty,
	#[error("unknown palette `{0}`")]
	Unknown(String),
}

impl Palette {
	pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
		if colors.is_empty() {
			return Err(PaletteError::Empty);
		}
		Ok(Self { colors })
	}

	/// Plotly's qualitative palette (default)
	pub fn plotly() -> Self {
		Self {
			colors: vec![
				Color::rgb(99, 110, 250),  // #636EFA
				Color::rgb(239, 85, 59),   // #EF553B
				Color::rgb(0, 204, 150),   // #00CC96
				Color::rgb(171, 99, 250),  // #AB63FA
				Color::rgb(255, 161, 90),  // #FFA15A
				Color::rgb(25, 211, 243),  // #19D3F3
				Color::rgb(255, 102, 146), // #FF6692
				Color::rgb(182, 232, 128), // #B6E880
				Color::rgb(255, 151, 255), // #FF97FF
				Color::rgb(254, 203, 82),  // #FECB52
			],
		}
	}

	/// Fifteen CSS named colors, avoiding the neutral grey and selection red
	pub fn named() -> Self {
		Self {
			colors: vec![
				Color::rgb(0, 128, 0),     // green
				Color::rgb(255, 255, 0),   // yellow
				Color::rgb(0, 0, 255),     // blue
				Color::rgb(128, 0, 128),   // purple
				Color::rgb(255, 165, 0),   // orange
				Color::rgb(255, 192, 203), // pink
				Color::rgb(0, 128, 128),   // teal
				Color::rgb(0, 255, 0),     // lime
				Color::rgb(165, 42, 42),   // brown
				Color::rgb(255, 215, 0),   // gold
				Color::rgb(192, 192, 192), // silver
				Color::rgb(0, 255, 255),   // cyan
				Color::rgb(255, 0, 255),   // magenta
				Color::rgb(128, 128, 0),   // olive
				Color::rgb(128, 0, 0),     // maroon
			],
		}
	}

	pub fn by_name(name: &str) -> Result<Self, PaletteError> {
		match name {
			"plotly" => Ok(Self::plotly()),
			"named" => Ok(Self::named()),
			other => Err(PaletteError::Unknown(other.to_string())),
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::plotly()
	}
}

/// Transaction to color mapping, fixed once built.
#[derive(Clone, Debug, Default)]
pub struct ColorMap {
	colors: IndexMap<Transaction, Color>,
}

impl ColorMap {
	/// Assign `palette[i mod len]` to the `i`-th transaction in iteration order.
	/// Colors repeat once the palette is exhausted.
	pub fn assign(transactions: &IndexSet<Transaction>, palette: &Palette) -> Self {
		let colors = transactions
			.iter()
			.enumerate()
			.map(|(i, t)| (t.clone(), palette.get(i)))
			.collect();
		Self { colors }
	}

	pub fn get(&self, transaction: &Transaction) -> Option<Color> {
		self.colors.get(transaction).copied()
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::transactions::{TradeRow, TransactionIndex};

	fn transactions(n: usize) -> IndexSet<Transaction> {
		let rows: Vec<_> = (0..n)
			.map(|i| TradeRow::new(format!("I{i}"), format!("E{i}"), format!("P{i}")))
			.collect();
		TransactionIndex::build(&rows).unique_transactions().clone()
	}

	#[test]
	fn every_transaction_gets_a_color() {
		let set = transactions(4);
		let map = ColorMap::assign(&set, &Palette::plotly());
		assert_eq!(map.len(), 4);
		assert!(set.iter().all(|t| map.get(t).is_some()));
	}

	#[test]
	fn colors_cycle_when_palette_runs_out() {
		let palette = Palette::new(vec![Color::rgb(1, 0, 0), Color::rgb(2, 0, 0)]).unwrap();
		let set = transactions(5);
		let map = ColorMap::assign(&set, &palette);

		let assigned: Vec<_> = set.iter().map(|t| map.get(t).unwrap().r).collect();
		assert_eq!(assigned, vec![1, 2, 1, 2, 1]);
	}

	#[test]
	fn empty_palette_is_rejected() {
		assert_eq!(Palette::new(Vec::new()), Err(PaletteError::Empty));
		assert!(matches!(Palette::by_name("neon"), Err(PaletteError::Unknown(_))));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(99, 110, 250).to_css(), "#636efa");
		assert_eq!(Color::rgba(0, 0, 0, 0.5).to_css(), "rgba(0, 0, 0, 0.5)");
	}
}
