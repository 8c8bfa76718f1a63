//! Alpaca-style brokerage REST client.

pub mod client;
pub mod config;
pub mod types;

pub use client::AlpacaClient;
pub use config::AlpacaConfig;
