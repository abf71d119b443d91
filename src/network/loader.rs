//! Trade rows from embedded CSV or JSON text.
//!
//! Both formats name their columns; a [`ColumnProfile`] maps those names to
//! the three trade roles. Any row with a missing or empty role field fails
//! the whole load, reporting the 1-based data row number.

use std::fmt::{Display, Formatter};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::transactions::TradeRow;
use crate::config::ViewConfig;

#[derive(Debug, Error)]
pub enum LoadError {
	#[error("trade data element not found")]
	MissingElement,
	#[error("unsupported trade data type `{0}`")]
	UnsupportedType(String),
	#[error("invalid JSON trade data: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid CSV trade data: {0}")]
	Csv(#[from] csv::Error),
	#[error("column `{0}` not found")]
	MissingColumn(String),
	#[error("row {row}: missing value for `{column}`")]
	MissingField { row: usize, column: String },
	#[error("row {0}: expected an object")]
	NotAnObject(usize),
}

/// Column names for each trade role.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnProfile {
	pub importer: String,
	pub exporter: String,
	pub second_partner: String,
}

impl Default for ColumnProfile {
	fn default() -> Self {
		Self {
			importer: "Importer".to_string(),
			exporter: "Exporter".to_string(),
			second_partner: "partner2Desc".to_string(),
		}
	}
}

impl Display for ColumnProfile {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Trade columns: importer:{}, exporter:{}, second_partner:{}",
			self.importer, self.exporter, self.second_partner,
		)
	}
}

/// Rows plus the view configuration that travelled with them.
#[derive(Clone, Debug, Default)]
pub struct TradeData {
	pub rows: Vec<TradeRow>,
	pub config: ViewConfig,
}

#[derive(Deserialize)]
struct JsonPayload {
	rows: Vec<Value>,
	#[serde(default)]
	config: ViewConfig,
}

fn required(value: Option<&str>, row: usize, column: &str) -> Result<String, LoadError> {
	match value.map(str::trim) {
		Some(v) if !v.is_empty() => Ok(v.to_string()),
		_ => Err(LoadError::MissingField {
			row,
			column: column.to_string(),
		}),
	}
}

impl TradeData {
	/// Parse `{ "rows": [{ "<column>": "<entity>", .. }], "config": { .. } }`.
	pub fn from_json(text: &str) -> Result<Self, LoadError> {
		let payload: JsonPayload = serde_json::from_str(text)?;
		let rows = json_rows(&payload.rows, &payload.config.columns)?;
		Ok(Self {
			rows,
			config: payload.config,
		})
	}

	/// Parse headed CSV, using `config.columns` to find the role columns.
	pub fn from_csv(text: &str, config: ViewConfig) -> Result<Self, LoadError> {
		let rows = csv_rows(text, &config.columns)?;
		Ok(Self { rows, config })
	}
}

fn json_rows(values: &[Value], columns: &ColumnProfile) -> Result<Vec<TradeRow>, LoadError> {
	values
		.iter()
		.enumerate()
		.map(|(i, value)| -> Result<TradeRow, LoadError> {
			let row = i + 1;
			let object: &Map<String, Value> = value.as_object().ok_or(LoadError::NotAnObject(row))?;
			let field = |column: &str| required(object.get(column).and_then(Value::as_str), row, column);
			Ok(TradeRow {
				importer: field(&columns.importer)?,
				exporter: field(&columns.exporter)?,
				second_partner: field(&columns.second_partner)?,
			})
		})
		.collect()
}

fn csv_rows(text: &str, columns: &ColumnProfile) -> Result<Vec<TradeRow>, LoadError> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(true)
		.flexible(true)
		.from_reader(text.as_bytes());

	let headers = reader.headers()?.clone();
	let position = |name: &str| {
		headers
			.iter()
			.position(|h| h.trim() == name)
			.ok_or_else(|| LoadError::MissingColumn(name.to_string()))
	};
	let importer = position(&columns.importer)?;
	let exporter = position(&columns.exporter)?;
	let second_partner = position(&columns.second_partner)?;

	let mut rows = Vec::new();
	for (i, record) in reader.records().enumerate() {
		let record = record?;
		let row = i + 1;
		rows.push(TradeRow {
			importer: required(record.get(importer), row, &columns.importer)?,
			exporter: required(record.get(exporter), row, &columns.exporter)?,
			second_partner: required(record.get(second_partner), row, &columns.second_partner)?,
		});
	}
	Ok(rows)
}

#[cfg(test)]
mod tests {
	use super::*;

	const CSV: &str = "\
Importer,Exporter,partner2Desc,tradeValue
Norway,Sweden,Denmark,10
Germany,Norway,Denmark,4
";

	#[test]
	fn csv_rows_follow_the_column_profile() {
		let data = TradeData::from_csv(CSV, ViewConfig::default()).unwrap();
		assert_eq!(
			data.rows,
			vec![
				TradeRow::new("Norway", "Sweden", "Denmark"),
				TradeRow::new("Germany", "Norway", "Denmark"),
			]
		);
	}

	#[test]
	fn csv_empty_field_fails_with_row_number() {
		let text = "Importer,Exporter,partner2Desc\nA,B,C\nD,,F\n";
		let err = TradeData::from_csv(text, ViewConfig::default()).unwrap_err();
		assert!(matches!(
			err,
			LoadError::MissingField { row: 2, ref column } if column == "Exporter"
		));
	}

	#[test]
	fn csv_missing_column_is_reported() {
		let text = "Importer,Exporter\nA,B\n";
		let err = TradeData::from_csv(text, ViewConfig::default()).unwrap_err();
		assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "partner2Desc"));
	}

	#[test]
	fn json_rows_and_config() {
		let text = r#"{
			"rows": [{ "from": "A", "to": "C", "via": "B" }],
			"config": {
				"palette": "named",
				"columns": { "importer": "from", "exporter": "to", "second_partner": "via" }
			}
		}"#;
		let data = TradeData::from_json(text).unwrap();
		assert_eq!(data.rows, vec![TradeRow::new("A", "C", "B")]);
		assert_eq!(data.config.palette, "named");
	}

	#[test]
	fn json_non_string_field_is_missing() {
		let text = r#"{ "rows": [{ "Importer": "A", "Exporter": 3, "partner2Desc": "B" }] }"#;
		let err = TradeData::from_json(text).unwrap_err();
		assert!(matches!(err, LoadError::MissingField { row: 1, .. }));
	}

	#[test]
	fn profile_display() {
		assert_eq!(
			ColumnProfile::default().to_string(),
			"Trade columns: importer:Importer, exporter:Exporter, second_partner:partner2Desc"
		);
	}
}
