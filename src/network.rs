// file: src/network.rs
// version: 1.0.0
// guid: a7310435-6ddd-45a6-b33d-05be18570902

//! Network selection flags shared by cardano-cli subcommands

use crate::config::NetworkConfig;
use crate::executor::Invocation;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet(u32),
}

impl Network {
    /// Append the network selector to an invocation
    pub fn apply(&self, invocation: Invocation) -> Invocation {
        match self {
            Network::Mainnet => invocation.switch("mainnet"),
            Network::Testnet(magic) => invocation.flag("testnet-magic", magic),
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        NetworkConfig::default().into()
    }
}

impl From<&NetworkConfig> for Network {
    fn from(config: &NetworkConfig) -> Self {
        if config.mainnet {
            Network::Mainnet
        } else {
            Network::Testnet(config.magic)
        }
    }
}

impl From<NetworkConfig> for Network {
    fn from(config: NetworkConfig) -> Self {
        Network::from(&config)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet(magic) => write!(f, "testnet (magic {})", magic),
        }
    }
}
