//! fleet-rs: client for the GPU fleet stats backend
//!
//! This crate provides endpoint configuration and a small HTTP client for the
//! aggregate stats endpoint served by the fleet's telemetry backend.
//!
//! # Example
//!
//! ```no_run
//! use fleet_rs::{DashboardConfig, StatsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::load_default()?;
//!     let client = StatsClient::from_config(&config)?;
//!
//!     let stats = client.overview_stats().await?;
//!     println!("{}", stats["total_gpus"]);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::StatsClient;
pub use config::{DashboardConfig, Endpoint};
pub use error::FleetError;
