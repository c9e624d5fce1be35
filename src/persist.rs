//! # Persistence Boundary
//!
//! Tabular and structured-document adapters at the process boundary. The
//! core pipeline hands data between stages in memory; these helpers exist
//! only so neighbouring processes (data acquisition upstream, reporting
//! downstream) can exchange artifacts with it.
//!
//! ## Price CSV contract
//!
//! | Column     | Example      | Notes                          |
//! |------------|--------------|--------------------------------|
//! | `Date`     | `2024-01-31` | ISO-8601, strictly increasing  |
//! | `<ticker>` | `184.50`     | one column per tracked asset   |

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;
use ndarray::Array2;
use prettytable::row;
use prettytable::Table;
use serde_json::json;
use serde_json::Map;
use serde_json::Value;
use tracing::info;

use crate::data::PriceTable;
use crate::error::FrontierError;
use crate::error::Result;
use crate::select::PortfolioSelection;
use crate::types::ResultTable;

/// Read a price table from a `Date`-indexed CSV file.
pub fn read_price_table(path: impl AsRef<Path>) -> Result<PriceTable> {
  let mut reader = csv::Reader::from_path(path.as_ref())?;
  let headers = reader.headers()?.clone();

  if headers.get(0) != Some("Date") {
    return Err(FrontierError::malformed(
      "price csv must start with a 'Date' column",
    ));
  }

  let tickers: Vec<String> = headers.iter().skip(1).map(String::from).collect();
  if tickers.is_empty() {
    return Err(FrontierError::malformed("price csv has no asset columns"));
  }

  let mut dates = Vec::new();
  let mut flat = Vec::new();

  for (row_idx, record) in reader.records().enumerate() {
    let record = record?;
    let raw_date = &record[0];
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
      FrontierError::malformed(format!("row {row_idx}: cannot parse date '{raw_date}'"))
    })?;
    dates.push(date);

    for (ticker, raw) in tickers.iter().zip(record.iter().skip(1)) {
      let price: f64 = raw.parse().map_err(|_| {
        FrontierError::malformed(format!(
          "row {row_idx}: cannot parse price '{raw}' for '{ticker}'"
        ))
      })?;
      flat.push(price);
    }
  }

  let prices = Array2::from_shape_vec((dates.len(), tickers.len()), flat)
    .map_err(|e| FrontierError::malformed(format!("price csv shape: {e}")))?;

  info!(
    rows = dates.len(),
    assets = tickers.len(),
    "loaded price table"
  );

  PriceTable::new(dates, tickers, prices)
}

/// Write a result table as CSV: `Return`, `Volatility`, one `<ticker>
/// Weight` column per asset, `Sharpe Ratio`; one row per retained trial.
pub fn write_result_table(path: impl AsRef<Path>, table: &ResultTable) -> Result<()> {
  let mut writer = csv::Writer::from_path(path.as_ref())?;

  let mut header = vec!["Return".to_string(), "Volatility".to_string()];
  header.extend(table.tickers.iter().map(|t| format!("{t} Weight")));
  header.push("Sharpe Ratio".to_string());
  writer.write_record(&header)?;

  for record in &table.records {
    let mut row = vec![
      record.metrics.expected_return.to_string(),
      record.metrics.volatility.to_string(),
    ];
    row.extend(record.weights.iter().map(|w| w.to_string()));
    row.push(record.metrics.sharpe.to_string());
    writer.write_record(&row)?;
  }

  writer.flush()?;
  info!(trials = table.len(), path = %path.as_ref().display(), "wrote result table");
  Ok(())
}

/// Write one selection record as a structured JSON document with a
/// `metrics` object and a `weights` object keyed by asset identifier.
pub fn write_selection(path: impl AsRef<Path>, selection: &PortfolioSelection) -> Result<()> {
  let weights: Map<String, Value> = selection
    .weight_map()
    .map(|(ticker, weight)| (ticker.to_string(), json!(weight)))
    .collect();

  let document = json!({
    "criterion": selection.criterion.label(),
    "metrics": selection.metrics,
    "weights": weights,
  });

  let file = BufWriter::new(File::create(path.as_ref())?);
  serde_json::to_writer_pretty(file, &document)?;
  info!(criterion = selection.criterion.label(), path = %path.as_ref().display(), "wrote selection");
  Ok(())
}

/// Render selections as a human-readable summary table.
pub fn selection_summary(selections: &[PortfolioSelection]) -> String {
  let mut table = Table::new();
  table.add_row(row!["Criterion", "Return", "Volatility", "Sharpe Ratio"]);

  for selection in selections {
    table.add_row(row![
      selection.criterion.label(),
      format!("{:.4}", selection.metrics.expected_return),
      format!("{:.4}", selection.metrics.volatility),
      format!("{:.4}", selection.metrics.sharpe)
    ]);
  }

  table.to_string()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use approx::assert_abs_diff_eq;

  use super::*;
  use crate::config::SimulationConfig;
  use crate::data::MarketEstimate;
  use crate::engine::MonteCarloEngine;
  use crate::select::select_all;
  use crate::select::Criterion;

  const PRICES_CSV: &str = "\
Date,AAPL,MSFT
2024-01-02,185.64,370.87
2024-01-03,184.25,370.60
2024-01-04,181.91,368.44
2024-01-05,181.18,367.75
";

  fn write_prices(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("historical_prices.csv");
    fs::write(&path, PRICES_CSV).unwrap();
    path
  }

  #[test]
  fn reads_a_price_csv() {
    let dir = tempfile::tempdir().unwrap();
    let table = read_price_table(write_prices(&dir)).unwrap();

    assert_eq!(table.tickers(), ["AAPL", "MSFT"]);
    assert_eq!(table.len(), 4);
    assert_abs_diff_eq!(table.prices()[[0, 1]], 370.87, epsilon = 1e-12);
  }

  #[test]
  fn rejects_missing_date_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "Day,AAPL\n2024-01-02,185.64\n").unwrap();

    assert!(matches!(
      read_price_table(&path),
      Err(FrontierError::MalformedInput { .. })
    ));
  }

  #[test]
  fn rejects_unparseable_price() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "Date,AAPL\n2024-01-02,n/a\n").unwrap();

    assert!(matches!(
      read_price_table(&path),
      Err(FrontierError::MalformedInput { .. })
    ));
  }

  #[test]
  fn pipeline_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let prices = read_price_table(write_prices(&dir)).unwrap();
    let market = MarketEstimate::from_prices(&prices, 252.0).unwrap();

    let engine = MonteCarloEngine::new(SimulationConfig {
      trials: 200,
      seed: Some(17),
      ..SimulationConfig::default()
    });
    let table = engine.run(&market).unwrap();

    let csv_path = dir.path().join("monte_carlo_simulation.csv");
    write_result_table(&csv_path, &table).unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
      headers.iter().collect::<Vec<_>>(),
      [
        "Return",
        "Volatility",
        "AAPL Weight",
        "MSFT Weight",
        "Sharpe Ratio"
      ]
    );
    assert_eq!(reader.records().count(), 200);

    let selections = select_all(&table).unwrap();
    let json_path = dir.path().join("optimal_portfolios.json");
    write_selection(&json_path, &selections[0]).unwrap();

    let document: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(document["criterion"], "max_sharpe");
    assert!(document["metrics"]["Sharpe Ratio"].is_number());
    assert!(document["weights"]["AAPL"].is_number());
    assert!(document["weights"]["MSFT"].is_number());
  }

  #[test]
  fn summary_lists_every_criterion() {
    let selections: Vec<PortfolioSelection> = Criterion::ALL
      .iter()
      .map(|&criterion| PortfolioSelection {
        criterion,
        metrics: Default::default(),
        tickers: vec!["AAPL".into()],
        weights: vec![1.0],
      })
      .collect();

    let summary = selection_summary(&selections);
    assert!(summary.contains("max_sharpe"));
    assert!(summary.contains("max_return"));
    assert!(summary.contains("min_volatility"));
  }
}
