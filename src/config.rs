//! View configuration carried alongside the trade data.
//!
//! Every field has a default, so an absent or partial `config` object in the
//! data payload is valid.

use serde::Deserialize;

use crate::network::colors::{Palette, PaletteError};
use crate::network::loader::ColumnProfile;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
	/// Figure title drawn in the top-left corner.
	pub title: String,
	/// Theme name, see [`crate::components::trade_graph::Theme::by_name`].
	pub theme: String,
	/// Transaction palette name: `plotly` or `named`.
	pub palette: String,
	pub columns: ColumnProfile,
	/// Fixed jitter seed; node y-offsets are random when unset.
	pub seed: Option<u64>,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			title: "Trade Network".to_string(),
			theme: "default".to_string(),
			palette: "plotly".to_string(),
			columns: ColumnProfile::default(),
			seed: None,
		}
	}
}

impl ViewConfig {
	pub fn palette(&self) -> Result<Palette, PaletteError> {
		Palette::by_name(&self.palette)
	}
}
