//! edge-validator: statistical validation of arbitrage strategies
//!
//! This library provides the core components for:
//! - Seeded, re-entrant random streams
//! - Block-bootstrap Monte Carlo simulation of return series
//! - Hypothesis tests, in/out-of-sample and walk-forward validation
//! - Kelly position sizing
//! - Competitive execution backtests against rival searchers
//! - Configuration, CLI and observability

pub mod backtest;
pub mod cli;
pub mod config;
pub mod random;
pub mod risk;
pub mod stats;
pub mod telemetry;
pub mod validation;
