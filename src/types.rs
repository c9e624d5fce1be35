//! # Result Containers
//!
//! $$
//! (\mathbf{w}, \mu_p, \sigma_p, S_p)
//! $$
//!
//! Shared records produced by the simulation driver and consumed by the
//! extremal selector and the persistence boundary.

use ndarray::Array1;
use serde::Deserialize;
use serde::Serialize;

/// Performance metrics of a single portfolio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
  /// Expected annual return `w · μ`.
  #[serde(rename = "Return")]
  pub expected_return: f64,
  /// Annualized volatility `sqrt(wᵀ Σ w)`.
  #[serde(rename = "Volatility")]
  pub volatility: f64,
  /// Risk-adjusted score `(return − r_f) / volatility`.
  #[serde(rename = "Sharpe Ratio")]
  pub sharpe: f64,
}

/// One retained trial: the sampled weights and their metrics.
#[derive(Clone, Debug)]
pub struct TrialRecord {
  /// Simplex-normalized asset weights, aligned with the universe ordering.
  pub weights: Array1<f64>,
  /// Metrics computed for these weights.
  pub metrics: PortfolioMetrics,
}

/// Ordered collection of trial records from one simulation run.
///
/// Row order is generation order. It carries no meaning beyond
/// reproducibility under a fixed seed.
#[derive(Clone, Debug, Default)]
pub struct ResultTable {
  /// Asset identifiers, one per weight component.
  pub tickers: Vec<String>,
  /// Retained trials in generation order.
  pub records: Vec<TrialRecord>,
  /// Number of degenerate trials that were skipped.
  pub skipped: usize,
}

impl ResultTable {
  /// Number of retained trials.
  pub fn len(&self) -> usize {
    self.records.len()
  }

  /// True when no trial was retained.
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn metrics_serialize_with_report_column_names() {
    let metrics = PortfolioMetrics {
      expected_return: 0.1,
      volatility: 0.2,
      sharpe: 0.4,
    };
    let json = serde_json::to_value(metrics).unwrap();
    assert_eq!(json["Return"], 0.1);
    assert_eq!(json["Volatility"], 0.2);
    assert_eq!(json["Sharpe Ratio"], 0.4);
  }

  #[test]
  fn empty_table_reports_empty() {
    let table = ResultTable::default();
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
  }
}
