//! # Errors
//!
//! $$
//! \text{Outcome} = \mathrm{Ok}(T) \ \cup\ \mathrm{Err}(E)
//! $$
//!
//! Value-level error taxonomy shared by every pipeline stage.

use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, FrontierError>;

/// Errors produced by estimation, simulation and selection.
#[derive(Error, Debug)]
pub enum FrontierError {
  /// Covariance estimation needs at least two valid return rows.
  #[error("insufficient data: need at least 2 valid return rows, got {rows}")]
  InsufficientData { rows: usize },

  /// A trial produced a zero-volatility portfolio and cannot be scored.
  #[error("degenerate trial: portfolio volatility is zero")]
  DegenerateTrial,

  /// Selection was invoked on an empty result table.
  #[error("no data: selection requires at least one retained trial")]
  NoData,

  /// Inputs are inconsistent with the configured asset universe.
  #[error("malformed input: {message}")]
  MalformedInput { message: String },

  /// I/O failure at the persistence boundary.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// CSV read/write failure at the persistence boundary.
  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  /// JSON serialization failure at the persistence boundary.
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

impl FrontierError {
  /// Create a malformed input error from any displayable message.
  pub fn malformed(message: impl Into<String>) -> Self {
    Self::MalformedInput {
      message: message.into(),
    }
  }
}
