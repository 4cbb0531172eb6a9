// file: src/logging/mod.rs
// version: 1.0.0
// guid: 94cc879b-1331-45ca-af9a-83ecdaae1a74

//! Logging setup for sidechain-scripts

pub mod logger;

pub use logger::init_logger;
