//! # Monte Carlo Engine
//!
//! $$
//! \{(\mathbf{w}_k, \mu_k, \sigma_k, S_k)\}_{k=1}^{N},\quad
//! \mathbf{w}_k \overset{\text{iid}}{\sim} \text{sampler}
//! $$
//!
//! Simulation driver: a data-parallel map from trial index to trial record.
//! Trials depend only on the shared read-only moments and a private random
//! draw, so the sequential and `rayon` paths produce tables of identical
//! shape. Degenerate (zero-volatility) trials are skipped and counted; any
//! other evaluation error aborts the run.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;
use tracing::warn;

use crate::config::SimulationConfig;
use crate::data::MarketEstimate;
use crate::error::FrontierError;
use crate::error::Result;
use crate::metrics::evaluate;
use crate::sampler::WeightSampler;
use crate::types::ResultTable;
use crate::types::TrialRecord;

/// Trials per unit of work: the cancellation check granularity of
/// [`MonteCarloEngine::run_with_cancel`] and the per-stream chunk of
/// [`MonteCarloEngine::run_par`].
const CHUNK_TRIALS: usize = 4096;

/// Mix a stream index into the base seed (splitmix64 finalizer), so each
/// worker owns an independent random stream.
fn stream_seed(base: u64, stream: u64) -> u64 {
  let mut z = base.wrapping_add(stream.wrapping_mul(0x9e37_79b9_7f4a_7c15));
  z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
  z ^ (z >> 31)
}

/// Monte Carlo simulation driver over a fixed asset universe.
#[derive(Clone, Debug)]
pub struct MonteCarloEngine {
  config: SimulationConfig,
}

impl MonteCarloEngine {
  /// Construct a new engine with explicit configuration.
  pub fn new(config: SimulationConfig) -> Self {
    Self { config }
  }

  /// Borrow engine configuration.
  pub fn config(&self) -> &SimulationConfig {
    &self.config
  }

  /// Run all configured trials sequentially.
  ///
  /// With a fixed seed the result table is byte-identical across runs; this
  /// is the reference execution mode.
  pub fn run(&self, market: &MarketEstimate) -> Result<ResultTable> {
    self.run_with_cancel(market, &AtomicBool::new(false))
  }

  /// Run sequentially, checking `cancel` between batches of trials.
  ///
  /// A cancelled run returns the partial table accumulated so far, which is
  /// a valid selector input.
  pub fn run_with_cancel(&self, market: &MarketEstimate, cancel: &AtomicBool) -> Result<ResultTable> {
    self.validate(market)?;

    let trials = self.config.trials;
    let sampler = WeightSampler::new(market.n_assets(), self.config.sampling);
    let mut rng = self.rng(0);
    let mut records = Vec::with_capacity(trials);
    let mut skipped = 0usize;

    info!(
      trials,
      assets = market.n_assets(),
      method = ?self.config.sampling,
      "running Monte Carlo simulation"
    );

    let mut start = 0usize;
    while start < trials {
      if cancel.load(Ordering::Relaxed) {
        warn!(completed = records.len(), "simulation cancelled");
        break;
      }

      let end = (start + CHUNK_TRIALS).min(trials);
      self.run_trials(market, &sampler, &mut rng, end - start, &mut records, &mut skipped)?;
      start = end;
    }

    if skipped > 0 {
      warn!(skipped, "skipped degenerate zero-volatility trials");
    }

    Ok(ResultTable {
      tickers: market.tickers.clone(),
      records,
      skipped,
    })
  }

  /// Run all configured trials on the `rayon` thread pool.
  ///
  /// Trials are split into fixed-size chunks; every chunk owns a random
  /// stream derived from the base seed and results are concatenated in
  /// chunk order, so a seeded parallel run is reproducible as well.
  pub fn run_par(&self, market: &MarketEstimate) -> Result<ResultTable> {
    self.validate(market)?;

    let trials = self.config.trials;
    let sampler = WeightSampler::new(market.n_assets(), self.config.sampling);
    let n_chunks = trials.div_ceil(CHUNK_TRIALS);

    info!(
      trials,
      assets = market.n_assets(),
      chunks = n_chunks,
      method = ?self.config.sampling,
      "running Monte Carlo simulation in parallel"
    );

    let chunks = (0..n_chunks)
      .into_par_iter()
      .map(|chunk| {
        let count = CHUNK_TRIALS.min(trials - chunk * CHUNK_TRIALS);
        let mut rng = self.rng(chunk as u64);
        let mut records = Vec::with_capacity(count);
        let mut skipped = 0usize;
        self.run_trials(market, &sampler, &mut rng, count, &mut records, &mut skipped)?;
        Ok((records, skipped))
      })
      .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::with_capacity(trials);
    let mut skipped = 0usize;
    for (chunk_records, chunk_skipped) in chunks {
      records.extend(chunk_records);
      skipped += chunk_skipped;
    }

    if skipped > 0 {
      warn!(skipped, "skipped degenerate zero-volatility trials");
    }

    Ok(ResultTable {
      tickers: market.tickers.clone(),
      records,
      skipped,
    })
  }

  fn run_trials(
    &self,
    market: &MarketEstimate,
    sampler: &WeightSampler,
    rng: &mut StdRng,
    count: usize,
    records: &mut Vec<TrialRecord>,
    skipped: &mut usize,
  ) -> Result<()> {
    for _ in 0..count {
      let weights = sampler.sample(rng);
      match evaluate(&weights, market, self.config.risk_free_rate) {
        Ok(metrics) => records.push(TrialRecord { weights, metrics }),
        Err(FrontierError::DegenerateTrial) => *skipped += 1,
        Err(err) => return Err(err),
      }
    }
    Ok(())
  }

  fn rng(&self, stream: u64) -> StdRng {
    match self.config.seed {
      Some(seed) => StdRng::seed_from_u64(stream_seed(seed, stream)),
      None => StdRng::seed_from_u64(rand::thread_rng().gen()),
    }
  }

  /// Reject misaligned moments before any trial runs.
  fn validate(&self, market: &MarketEstimate) -> Result<()> {
    let n = market.n_assets();
    if n == 0 {
      return Err(FrontierError::malformed("asset universe is empty"));
    }
    if market.mean_returns.len() != n {
      return Err(FrontierError::malformed(format!(
        "mean return vector has {} entries for {} assets",
        market.mean_returns.len(),
        n
      )));
    }
    if market.covariance.nrows() != n || market.covariance.ncols() != n {
      return Err(FrontierError::malformed(format!(
        "covariance matrix is {}x{}, expected {}x{}",
        market.covariance.nrows(),
        market.covariance.ncols(),
        n,
        n
      )));
    }
    Ok(())
  }
}
