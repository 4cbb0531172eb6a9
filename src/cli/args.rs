// file: src/cli/args.rs
// version: 1.0.0
// guid: bdcd33e8-62be-44c2-a6c2-8e285fb1b850

//! Command line argument definitions

use crate::cardano::KeyKind;
use crate::config::Era;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sidechain-scripts")]
#[command(about = "Build, sign and submit sidechain transactions through cardano-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Testnet network magic
    #[arg(long, global = true)]
    pub testnet_magic: Option<u32>,

    /// Talk to mainnet instead of a testnet
    #[arg(long, global = true, conflicts_with = "testnet_magic")]
    pub mainnet: bool,

    #[arg(long, value_enum, global = true)]
    pub era: Option<EraArg>,

    /// Directory containing cabal.project
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Config file to use instead of the user and project files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// cardano-cli executable
    #[arg(long, global = true)]
    pub cardano_cli: Option<String>,

    /// cabal executable
    #[arg(long, global = true)]
    pub cabal: Option<String>,

    /// Directory searched before PATH; may be repeated
    #[arg(long = "extra-path", global = true)]
    pub extra_paths: Vec<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive the payment address of a key or script file
    Address {
        file: PathBuf,

        #[arg(long, value_enum, default_value = "verification-key")]
        kind: KindArg,
    },

    /// Fetch protocol parameters into a file that is kept on disk
    ProtocolParams,

    /// List UTXOs at an address
    Utxos {
        #[arg(required_unless_present = "key_file")]
        address: Option<String>,

        /// Derive the address from this verification key instead
        #[arg(long, conflicts_with = "address")]
        key_file: Option<PathBuf>,
    },

    /// Print the policy id of a minting script
    PolicyId { script: PathBuf },

    /// Print `<policy id>.<hex name>` for an asset minted by a script
    AssetId { script: PathBuf, name: String },

    /// Build a transaction, optionally signing and submitting it
    Build {
        /// Input as <tx hash>#<index>; may be repeated
        #[arg(long = "tx-in", required = true)]
        tx_ins: Vec<String>,

        #[arg(long)]
        tx_out: String,

        #[arg(long)]
        collateral: String,

        /// Base path; .raw and .sig are appended
        #[arg(long)]
        out_file: PathBuf,

        /// Verification key of the change address
        #[arg(long)]
        public_key_file: PathBuf,

        #[arg(long)]
        signing_key_file: Option<PathBuf>,

        #[arg(long)]
        script: Option<PathBuf>,

        #[arg(long)]
        datum: Option<PathBuf>,

        #[arg(long)]
        redeemer: Option<PathBuf>,

        #[arg(long)]
        inline_datum: Option<PathBuf>,

        #[arg(long)]
        mint: Option<String>,

        #[arg(long)]
        mint_script: Option<PathBuf>,

        #[arg(long)]
        mint_redeemer: Option<PathBuf>,

        /// Sign and submit after building
        #[arg(long, requires = "signing_key_file")]
        submit: bool,
    },

    /// Sign <OUT_FILE>.raw into <OUT_FILE>.sig
    Sign {
        out_file: PathBuf,

        #[arg(long)]
        signing_key_file: PathBuf,
    },

    /// Submit <OUT_FILE>.sig
    Submit { out_file: PathBuf },

    /// Run the sidechain parameter export through cabal
    Export {
        tx_in: String,
        chain_id: String,
        genesis_hash: String,
        spo_key: Option<String>,
        sidechain_key: Option<String>,
    },

    /// Check that cardano-cli and cabal can be found
    CheckPrereqs,
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Address { .. } => "address",
            Commands::ProtocolParams => "protocol-params",
            Commands::Utxos { .. } => "utxos",
            Commands::PolicyId { .. } => "policy-id",
            Commands::AssetId { .. } => "asset-id",
            Commands::Build { .. } => "build",
            Commands::Sign { .. } => "sign",
            Commands::Submit { .. } => "submit",
            Commands::Export { .. } => "export",
            Commands::CheckPrereqs => "check-prereqs",
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    VerificationKey,
    Script,
}

impl From<KindArg> for KeyKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::VerificationKey => KeyKind::VerificationKey,
            KindArg::Script => KeyKind::Script,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum EraArg {
    Alonzo,
    Babbage,
    Conway,
}

impl From<EraArg> for Era {
    fn from(era: EraArg) -> Self {
        match era {
            EraArg::Alonzo => Era::Alonzo,
            EraArg::Babbage => Era::Babbage,
            EraArg::Conway => Era::Conway,
        }
    }
}
