//! # Market Data & Estimation
//!
//! $$
//! r_t = \ln\frac{p_t}{p_{t-1}},\qquad
//! \Sigma = d\,\mathrm{Cov}(r),\qquad
//! \mu = d\,\bar r
//! $$
//!
//! Price table container and the return/covariance estimator. Prices flow in
//! from the acquisition boundary already aligned (one price per asset per
//! retained date); everything derived here is immutable afterwards.

use chrono::NaiveDate;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;
use tracing::debug;

use crate::error::FrontierError;
use crate::error::Result;

/// Chronologically ordered close prices, one column per tracked asset.
#[derive(Clone, Debug)]
pub struct PriceTable {
  dates: Vec<NaiveDate>,
  tickers: Vec<String>,
  prices: Array2<f64>,
}

impl PriceTable {
  /// Build a price table, validating shape and date ordering.
  pub fn new(dates: Vec<NaiveDate>, tickers: Vec<String>, prices: Array2<f64>) -> Result<Self> {
    if prices.nrows() != dates.len() || prices.ncols() != tickers.len() {
      return Err(FrontierError::malformed(format!(
        "price matrix is {}x{}, expected {}x{}",
        prices.nrows(),
        prices.ncols(),
        dates.len(),
        tickers.len()
      )));
    }

    if dates.windows(2).any(|w| w[0] >= w[1]) {
      return Err(FrontierError::malformed(
        "price table dates must be strictly increasing",
      ));
    }

    Ok(Self {
      dates,
      tickers,
      prices,
    })
  }

  /// Restrict the table to an explicit, ordered asset universe.
  ///
  /// Unknown tickers are an error; weight columns are never inferred by
  /// exclusion downstream, so the ordering fixed here is authoritative.
  pub fn select(&self, universe: &[String]) -> Result<Self> {
    let indices = universe
      .iter()
      .map(|ticker| {
        self
          .tickers
          .iter()
          .position(|t| t == ticker)
          .ok_or_else(|| {
            FrontierError::malformed(format!("ticker '{ticker}' not in price table"))
          })
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      dates: self.dates.clone(),
      tickers: universe.to_vec(),
      prices: self.prices.select(Axis(1), &indices),
    })
  }

  /// Dates of the retained rows.
  pub fn dates(&self) -> &[NaiveDate] {
    &self.dates
  }

  /// Asset identifiers, in column order.
  pub fn tickers(&self) -> &[String] {
    &self.tickers
  }

  /// Price matrix, dates × assets.
  pub fn prices(&self) -> &Array2<f64> {
    &self.prices
  }

  /// Number of dated rows.
  pub fn len(&self) -> usize {
    self.dates.len()
  }

  /// True when the table holds no rows.
  pub fn is_empty(&self) -> bool {
    self.dates.is_empty()
  }
}

/// Daily log returns, one row per consecutive date pair.
#[derive(Clone, Debug)]
pub struct ReturnTable {
  /// Asset identifiers, in column order.
  pub tickers: Vec<String>,
  /// Log returns, (T − 1 − dropped) × assets.
  pub returns: Array2<f64>,
}

impl ReturnTable {
  /// Compute daily log returns from consecutive prices.
  ///
  /// Rows containing any non-finite cell (zero or negative price in either
  /// endpoint) are dropped whole rather than imputed.
  pub fn from_prices(prices: &PriceTable) -> Self {
    let matrix = prices.prices();
    let n_assets = matrix.ncols();
    let mut flat = Vec::with_capacity(matrix.nrows().saturating_sub(1) * n_assets);
    let mut kept = 0usize;

    for i in 1..matrix.nrows() {
      let row: Vec<f64> = (0..n_assets)
        .map(|a| (matrix[[i, a]] / matrix[[i - 1, a]]).ln())
        .collect();

      if row.iter().all(|r| r.is_finite()) {
        flat.extend_from_slice(&row);
        kept += 1;
      }
    }

    debug!(
      rows = kept,
      assets = n_assets,
      "computed daily log return table"
    );

    let returns = Array2::from_shape_vec((kept, n_assets), flat)
      .expect("return table shape is consistent by construction");

    Self {
      tickers: prices.tickers().to_vec(),
      returns,
    }
  }

  /// Number of retained return rows.
  pub fn len(&self) -> usize {
    self.returns.nrows()
  }

  /// True when no return row was retained.
  pub fn is_empty(&self) -> bool {
    self.returns.nrows() == 0
  }
}

/// Annualized mean returns and covariance for a fixed asset universe.
#[derive(Clone, Debug)]
pub struct MarketEstimate {
  /// Asset identifiers, fixing the ordering of `mean_returns` and `covariance`.
  pub tickers: Vec<String>,
  /// Annualized expected return per asset.
  pub mean_returns: Array1<f64>,
  /// Annualized sample covariance matrix, assets × assets.
  pub covariance: Array2<f64>,
}

impl MarketEstimate {
  /// Estimate annualized moments from a daily log return table.
  ///
  /// The sample covariance uses the `n − 1` denominator; both moments are
  /// scaled by `trading_days` under the i.i.d.-daily assumption. Fewer than
  /// two retained rows cannot produce a covariance and is a distinct error.
  pub fn from_returns(returns: &ReturnTable, trading_days: f64) -> Result<Self> {
    let t = returns.returns.nrows();
    if t < 2 {
      return Err(FrontierError::InsufficientData { rows: t });
    }

    let daily_mean = returns.returns.sum_axis(Axis(0)) / t as f64;
    let centered = &returns.returns - &daily_mean;
    let covariance = centered.t().dot(&centered) * (trading_days / (t as f64 - 1.0));

    Ok(Self {
      tickers: returns.tickers.clone(),
      mean_returns: daily_mean * trading_days,
      covariance,
    })
  }

  /// Convenience: log returns and annualized moments straight from prices.
  pub fn from_prices(prices: &PriceTable, trading_days: f64) -> Result<Self> {
    Self::from_returns(&ReturnTable::from_prices(prices), trading_days)
  }

  /// Number of assets in the universe.
  pub fn n_assets(&self) -> usize {
    self.tickers.len()
  }
}
