//! # Extremal Selector
//!
//! $$
//! k^\* = \arg\max_k f(\mathbf{r}_k)
//! $$
//!
//! Reduction over the result table: one record per optimality criterion.
//! Ties keep the earliest record in generation order, so selection is
//! deterministic under a fixed seed.

use serde::Deserialize;
use serde::Serialize;

use crate::error::FrontierError;
use crate::error::Result;
use crate::types::PortfolioMetrics;
use crate::types::ResultTable;

/// Optimality criteria over the result table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
  /// Highest risk-adjusted score.
  MaxSharpe,
  /// Highest expected annual return.
  MaxReturn,
  /// Lowest annualized volatility.
  MinVolatility,
}

impl Criterion {
  /// All criteria, in reporting order.
  pub const ALL: [Criterion; 3] = [
    Criterion::MaxSharpe,
    Criterion::MaxReturn,
    Criterion::MinVolatility,
  ];

  /// Stable label used in persisted documents.
  pub fn label(&self) -> &'static str {
    match self {
      Criterion::MaxSharpe => "max_sharpe",
      Criterion::MaxReturn => "max_return",
      Criterion::MinVolatility => "min_volatility",
    }
  }

  /// Score to maximize for this criterion.
  fn score(&self, metrics: &PortfolioMetrics) -> f64 {
    match self {
      Criterion::MaxSharpe => metrics.sharpe,
      Criterion::MaxReturn => metrics.expected_return,
      Criterion::MinVolatility => -metrics.volatility,
    }
  }
}

/// Extremal portfolio for one criterion: metrics plus the full weight map.
#[derive(Clone, Debug)]
pub struct PortfolioSelection {
  /// Criterion this record is extremal under.
  pub criterion: Criterion,
  /// Metrics of the selected trial.
  pub metrics: PortfolioMetrics,
  /// Asset identifiers, covering the whole universe.
  pub tickers: Vec<String>,
  /// Weight per asset, aligned with `tickers`; zeros are kept.
  pub weights: Vec<f64>,
}

impl PortfolioSelection {
  /// Iterate `(ticker, weight)` pairs over the whole universe.
  pub fn weight_map(&self) -> impl Iterator<Item = (&str, f64)> {
    self
      .tickers
      .iter()
      .map(String::as_str)
      .zip(self.weights.iter().copied())
  }
}

/// Select the trial extremal under `criterion`.
///
/// Fails with [`FrontierError::NoData`] on an empty table (zero trials, or
/// every trial skipped as degenerate).
pub fn select(table: &ResultTable, criterion: Criterion) -> Result<PortfolioSelection> {
  let mut best: Option<(usize, f64)> = None;

  for (index, record) in table.records.iter().enumerate() {
    let score = criterion.score(&record.metrics);
    // Strict improvement only, so exact ties keep the earliest record.
    if best.map_or(true, |(_, top)| score > top) {
      best = Some((index, score));
    }
  }

  let (index, _) = best.ok_or(FrontierError::NoData)?;
  let record = &table.records[index];

  Ok(PortfolioSelection {
    criterion,
    metrics: record.metrics,
    tickers: table.tickers.clone(),
    weights: record.weights.to_vec(),
  })
}

/// Select all three extremal portfolios in [`Criterion::ALL`] order.
pub fn select_all(table: &ResultTable) -> Result<Vec<PortfolioSelection>> {
  Criterion::ALL
    .iter()
    .map(|&criterion| select(table, criterion))
    .collect()
}
