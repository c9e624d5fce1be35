//! # frontier-rs
//!
//! `frontier-rs` estimates the risk/return tradeoff of a fixed universe of
//! assets and selects extremal portfolios by dense random sampling rather
//! than closed-form convex optimization: historical prices are reduced to
//! daily log returns and annualized moments, a large number of random
//! simplex-normalized weight vectors are scored, and the portfolios that
//! maximize the Sharpe ratio, maximize return, or minimize volatility are
//! extracted from the result table.
//!
//! ## Modules
//!
//! | Module      | Description                                                             |
//! |-------------|-------------------------------------------------------------------------|
//! | [`config`]  | Explicit simulation configuration with documented defaults.             |
//! | [`data`]    | Price table container and the return/covariance estimator.              |
//! | [`sampler`] | Random simplex-normalized weight vectors, seedable per stream.          |
//! | [`metrics`] | Scores one weight vector into return, volatility and Sharpe ratio.      |
//! | [`engine`]  | Simulation driver: sequential, parallel and cancellable trial runs.     |
//! | [`select`]  | Extremal selection over the result table with deterministic tie-breaks. |
//! | [`persist`] | CSV/JSON adapters and a summary report at the process boundary.         |
//! | [`error`]   | Value-level error taxonomy shared by every stage.                       |
//!
//! ## Example Usage
//!
//! ```rust
//! use frontier_rs::config::SimulationConfig;
//! use frontier_rs::data::MarketEstimate;
//! use frontier_rs::engine::MonteCarloEngine;
//! use frontier_rs::persist::read_price_table;
//! use frontier_rs::select::select_all;
//!
//! let prices = read_price_table("data/historical_prices.csv")?;
//! let config = SimulationConfig::seeded(42);
//! let market = MarketEstimate::from_prices(&prices, config.trading_days)?;
//! let table = MonteCarloEngine::new(config).run_par(&market)?;
//! let optimal = select_all(&table)?;
//! ```
//!
//! ## Parallelism
//!
//! [`engine::MonteCarloEngine::run_par`] distributes trials over `rayon`
//! with one seeded random stream per chunk, so parallel runs stay
//! reproducible under a fixed seed.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod persist;
pub mod sampler;
pub mod select;
pub mod types;

pub use config::SimulationConfig;
pub use data::MarketEstimate;
pub use data::PriceTable;
pub use data::ReturnTable;
pub use engine::MonteCarloEngine;
pub use error::FrontierError;
pub use error::Result;
pub use metrics::evaluate;
pub use sampler::SamplingMethod;
pub use sampler::WeightSampler;
pub use select::select;
pub use select::select_all;
pub use select::Criterion;
pub use select::PortfolioSelection;
pub use types::PortfolioMetrics;
pub use types::ResultTable;
pub use types::TrialRecord;
