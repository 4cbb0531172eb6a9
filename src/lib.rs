// file: src/lib.rs
// version: 1.0.0
// guid: 8ec07370-403b-43a0-8689-d4dc7c5819ad

//! # sidechain-scripts
//!
//! Helpers for driving `cardano-cli` and `cabal` from scripts: derive
//! addresses, query UTXOs and protocol parameters, compute policy IDs,
//! build, sign and submit transactions, and run the sidechain export.
//!
//! Every call blocks until the external tool exits. Anything the tool writes
//! to stderr is treated as the error.

pub mod cabal;
pub mod cardano;
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod executor;
pub mod logging;
pub mod network;
pub mod outcome;
pub mod prereqs;
pub mod utils;

pub use cabal::{Cabal, ExportRequest};
pub use cardano::{CardanoCli, KeyKind, TxBuild};
pub use config::Config;
pub use error::{Result, ToolError};
pub use executor::{CommandRunner, Invocation, SystemRunner};
pub use network::Network;
pub use outcome::{Outcome, Payload};

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
