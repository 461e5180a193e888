//! Swapfees: a desktop dashboard for Uniswap WETH-USDC swap transactions.
//!
//! Reads transactions and aggregate fee statistics from the tracker backend's REST API
//! and renders them in an egui window that refreshes on a fixed interval.

pub mod api;
pub mod async_job;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod gui;
pub mod listing;
pub mod query;
pub mod search;
pub mod types;
pub mod user_settings;
