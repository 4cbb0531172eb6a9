// file: src/cli/mod.rs
// version: 1.0.0
// guid: 13634d38-09a1-4bc6-b93e-91960a559421

//! Command line interface for sidechain-scripts

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::{execute, resolve_config};
