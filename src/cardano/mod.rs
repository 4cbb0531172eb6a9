// file: src/cardano/mod.rs
// version: 1.0.0
// guid: 3fef25c0-2aed-4945-88a2-56a5ceb50b5e

//! Wrappers around `cardano-cli`
//!
//! Every operation formats a command line, runs it and parses the result.
//! Lookups that do not change while a script runs (addresses, the protocol
//! parameters file, policy IDs) are memoized on the client.

pub mod policy;
pub mod query;
pub mod transaction;

pub use query::KeyKind;
pub use transaction::TxBuild;

use crate::config::{Config, Era, TempConfig};
use crate::executor::{CommandRunner, Executor, Invocation};
use crate::network::Network;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Client for the node CLI
pub struct CardanoCli<R> {
    executor: Executor<R>,
    program: String,
    network: Network,
    era: Era,
    temp: TempConfig,
    addresses: RefCell<HashMap<(PathBuf, KeyKind), String>>,
    params_file: RefCell<Option<PathBuf>>,
    policy_ids: RefCell<HashMap<PathBuf, String>>,
}

impl<R: CommandRunner> CardanoCli<R> {
    pub fn new(runner: R, network: Network) -> Self {
        Self {
            executor: Executor::new(runner),
            program: "cardano-cli".to_string(),
            network,
            era: Era::default(),
            temp: TempConfig::default(),
            addresses: RefCell::new(HashMap::new()),
            params_file: RefCell::new(None),
            policy_ids: RefCell::new(HashMap::new()),
        }
    }

    pub fn from_config(runner: R, config: &Config) -> Self {
        Self::new(runner, Network::from(&config.network))
            .with_program(config.tools.cardano_cli.clone())
            .with_era(config.era)
            .with_temp(config.temp.clone())
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_era(mut self, era: Era) -> Self {
        self.era = era;
        self
    }

    pub fn with_temp(mut self, temp: TempConfig) -> Self {
        self.temp = temp;
        self
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn era(&self) -> Era {
        self.era
    }

    /// `cardano-cli <words...>` without the network selector
    fn command(&self, words: &[&str]) -> Invocation {
        Invocation::new(self.program.as_str()).args(words.iter())
    }

    /// `cardano-cli <words...> <network>`
    fn network_command(&self, words: &[&str]) -> Invocation {
        self.network.apply(self.command(words))
    }

    fn executor(&self) -> &Executor<R> {
        &self.executor
    }

    fn temp_file(&self) -> crate::Result<tempfile::NamedTempFile> {
        Ok(tempfile::Builder::new()
            .prefix(&self.temp.prefix)
            .suffix(&self.temp.suffix)
            .tempfile()?)
    }
}
