//! # CLI Module
//!
//! Command implementations behind the `songharvest` binary. Each command
//! wires configuration, the Spotify client and the pipeline together and is
//! responsible for user-facing output.
//!
//! ## Commands
//!
//! - [`harvest`] - Runs the year loop and prints a per-year summary table
//! - [`token`] - Checks the client credentials by requesting a token
//!
//! ## Error Handling
//!
//! Fatal problems (missing credentials, rejected grant) terminate the process
//! through the `error!` macro. Everything recoverable is printed with
//! `warning!` and the run continues.
//!
//! ## Usage
//!
//! ```bash
//! songharvest token
//! songharvest harvest --from 2014 --to 1961
//! songharvest harvest --repeat --delivery whole-year --enrichment batched
//! ```

mod harvest;
mod token;

pub use harvest::harvest;
pub use token::token;
