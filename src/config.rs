//! # Simulation Configuration
//!
//! $$
//! \theta = (d, r_f, N, s)
//! $$
//!
//! Explicit configuration passed into every pipeline entry point. There is no
//! module-level mutable state; reproducibility is controlled solely by the
//! optional seed carried here.

use crate::sampler::SamplingMethod;

/// Default trading days per year used for annualization.
pub const TRADING_DAYS: f64 = 252.0;
/// Default risk-free rate used in Sharpe computations.
pub const RISK_FREE_RATE: f64 = 0.02;
/// Default number of simulated portfolios.
pub const NUM_PORTFOLIOS: usize = 50_000;

/// Runtime configuration for the Monte Carlo engine.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
  /// Trading days per year used to annualize daily statistics.
  pub trading_days: f64,
  /// Risk-free rate used in Sharpe computations.
  pub risk_free_rate: f64,
  /// Number of random portfolios to draw.
  pub trials: usize,
  /// Seed for the random source; `None` seeds from entropy.
  pub seed: Option<u64>,
  /// Weight sampling method, see [`SamplingMethod`].
  pub sampling: SamplingMethod,
}

impl Default for SimulationConfig {
  fn default() -> Self {
    Self {
      trading_days: TRADING_DAYS,
      risk_free_rate: RISK_FREE_RATE,
      trials: NUM_PORTFOLIOS,
      seed: None,
      sampling: SamplingMethod::default(),
    }
  }
}

impl SimulationConfig {
  /// Configuration with an explicit seed, other fields at their defaults.
  pub fn seeded(seed: u64) -> Self {
    Self {
      seed: Some(seed),
      ..Self::default()
    }
  }
}
