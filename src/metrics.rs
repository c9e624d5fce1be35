//! # Performance Evaluator
//!
//! $$
//! \mu_p = \mathbf{w}\cdot\mu,\qquad
//! \sigma_p = \sqrt{\mathbf{w}^\top \Sigma \mathbf{w}},\qquad
//! S_p = \frac{\mu_p - r_f}{\sigma_p}
//! $$

use ndarray::Array1;

use crate::data::MarketEstimate;
use crate::error::FrontierError;
use crate::error::Result;
use crate::types::PortfolioMetrics;

/// Score one weight vector against annualized market moments.
///
/// A negative radicand in the variance quadratic form means the covariance
/// input was not positive semi-definite and is a fatal numerical-input
/// error. Zero volatility is a recoverable [`FrontierError::DegenerateTrial`];
/// neither case is ever coerced into `inf`/`NaN`.
pub fn evaluate(
  weights: &Array1<f64>,
  market: &MarketEstimate,
  risk_free_rate: f64,
) -> Result<PortfolioMetrics> {
  let expected_return = weights.dot(&market.mean_returns);
  let variance = weights.dot(&market.covariance.dot(weights));

  if variance < 0.0 {
    return Err(FrontierError::malformed(format!(
      "covariance produced negative portfolio variance {variance:e}"
    )));
  }

  let volatility = variance.sqrt();
  if volatility == 0.0 {
    return Err(FrontierError::DegenerateTrial);
  }

  Ok(PortfolioMetrics {
    expected_return,
    volatility,
    sharpe: (expected_return - risk_free_rate) / volatility,
  })
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;

  fn market() -> MarketEstimate {
    MarketEstimate {
      tickers: vec!["A".into(), "B".into()],
      mean_returns: array![0.10, 0.06],
      covariance: array![[0.04, 0.01], [0.01, 0.09]],
    }
  }

  #[test]
  fn evaluates_known_two_asset_portfolio() {
    let weights = array![0.5, 0.5];
    let metrics = evaluate(&weights, &market(), 0.02).unwrap();

    assert_abs_diff_eq!(metrics.expected_return, 0.08, epsilon = 1e-12);
    // wᵀΣw = 0.25·0.04 + 2·0.25·0.01 + 0.25·0.09 = 0.0375
    assert_abs_diff_eq!(metrics.volatility, 0.0375_f64.sqrt(), epsilon = 1e-12);
    assert_abs_diff_eq!(
      metrics.sharpe,
      (0.08 - 0.02) / 0.0375_f64.sqrt(),
      epsilon = 1e-12
    );
  }

  #[test]
  fn sharpe_increases_with_return_at_fixed_volatility() {
    let weights = array![1.0, 0.0];
    let mut low = market();
    let mut high = market();
    low.mean_returns = array![0.05, 0.0];
    high.mean_returns = array![0.09, 0.0];

    let s_low = evaluate(&weights, &low, 0.02).unwrap().sharpe;
    let s_high = evaluate(&weights, &high, 0.02).unwrap().sharpe;
    assert!(s_high > s_low);
  }

  #[test]
  fn sharpe_decreases_with_volatility_at_fixed_return() {
    let weights = array![1.0, 0.0];
    let mut calm = market();
    let mut wild = market();
    calm.covariance = array![[0.01, 0.0], [0.0, 0.01]];
    wild.covariance = array![[0.16, 0.0], [0.0, 0.16]];

    let s_calm = evaluate(&weights, &calm, 0.02).unwrap().sharpe;
    let s_wild = evaluate(&weights, &wild, 0.02).unwrap().sharpe;
    assert!(s_calm > s_wild);
  }

  #[test]
  fn zero_volatility_is_a_degenerate_trial() {
    let mut degenerate = market();
    degenerate.covariance = array![[0.0, 0.0], [0.0, 0.0]];

    let result = evaluate(&array![0.5, 0.5], &degenerate, 0.02);
    assert!(matches!(result, Err(FrontierError::DegenerateTrial)));
  }

  #[test]
  fn negative_variance_is_fatal() {
    let mut broken = market();
    broken.covariance = array![[-1.0, 0.0], [0.0, -1.0]];

    let result = evaluate(&array![0.5, 0.5], &broken, 0.02);
    assert!(matches!(result, Err(FrontierError::MalformedInput { .. })));
  }
}
