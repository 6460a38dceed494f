//! Yearly Top-Songs Harvester Library
//!
//! This library harvests, per calendar year over a fixed historical range, a
//! representative playlist from the Spotify Web API, normalizes and enriches its
//! tracks and delivers them in bounded batches to a remote ingestion endpoint and
//! a local directory.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy of the pipeline
//! - `harvest` - Normalizer, enricher, batcher, sink and the year loop
//! - `management` - Token lifecycle and the delivery ledger
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use songharvest::{cli, config, config::HarvestConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await.ok();
//!     cli::harvest(HarvestConfig::default()).await;
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod harvest;
pub mod management;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational line prefixed with a blue `o`.
///
/// ```
/// info!("Fetching data for year {}", year);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a completion line prefixed with a green `✓`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits the process with code 1.
///
/// Only for failures nothing can recover from, such as missing client
/// credentials or a rejected token grant. Library code returns errors instead.
///
/// ```
/// error!("environment variable {} must be set", "SPOTIFY_CLIENT_ID");
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a recoverable problem prefixed with a yellow `!`.
///
/// Used for skipped years and failed deliveries; the run goes on.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
