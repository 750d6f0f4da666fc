//! Integration tests

mod backtest_test;
mod cli_test;
mod config_test;
mod validation_test;
