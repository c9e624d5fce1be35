//! # Weight Sampler
//!
//! $$
//! w_i = \frac{u_i}{\sum_j u_j},\quad u_i \sim \mathcal{U}[0,1)
//! $$
//!
//! Per-trial random weight vectors over the simplex. The random source is
//! always passed in explicitly; the sampler holds no RNG state of its own,
//! so every stream stays seedable and independent.

use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Dirichlet;
use rand_distr::Distribution;
use rand_distr::Uniform;

/// Weight generation method.
///
/// The default draws independent uniforms and renormalizes. The resulting
/// weights sum to one but are *not* uniform over the simplex; they
/// concentrate near `1/A`. Callers relying on that concentration get it
/// unchanged; [`SamplingMethod::Dirichlet`] (flat, α = 1) is the opt-in
/// true-uniform alternative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SamplingMethod {
  /// Independent `U[0, 1)` draws divided by their sum.
  #[default]
  NormalizedUniform,
  /// Flat Dirichlet draw, uniform over the simplex.
  Dirichlet,
}

/// Draws one simplex-normalized weight vector per call.
#[derive(ImplNew, Clone, Copy, Debug)]
pub struct WeightSampler {
  /// Number of assets in the universe.
  pub n_assets: usize,
  /// Active sampling method.
  pub method: SamplingMethod,
}

impl WeightSampler {
  /// Sample one weight vector: non-negative components summing to one.
  pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<f64> {
    if self.n_assets == 1 {
      return Array1::ones(1);
    }

    match self.method {
      SamplingMethod::NormalizedUniform => {
        let raw = Array1::random_using(self.n_assets, Uniform::new(0.0, 1.0), rng);
        let sum = raw.sum();
        if sum < 1e-15 {
          // All draws collapsed to zero; fall back to equal weights.
          return Array1::from_elem(self.n_assets, 1.0 / self.n_assets as f64);
        }
        raw / sum
      }
      SamplingMethod::Dirichlet => {
        let dirichlet = Dirichlet::new_with_size(1.0, self.n_assets).unwrap();
        Array1::from(dirichlet.sample(rng))
      }
    }
  }
}
