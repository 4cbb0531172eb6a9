// file: src/cli/commands.rs
// version: 1.0.0
// guid: 79d1442e-52dc-456f-86c0-c70fa0632c25

//! Command implementations for the CLI

use super::args::{Cli, Commands};
use crate::{
    cabal::{Cabal, ExportRequest},
    cardano::{CardanoCli, KeyKind, TxBuild},
    config::Config,
    error::{Result, ToolError},
    executor::SystemRunner,
    logging::logger::with_command_span,
    prereqs,
    Outcome,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::{debug, info};

/// Resolve configuration: files and environment first, then CLI flags
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_explicit(path)?,
        None => Config::load()?,
    };

    if let Some(magic) = cli.testnet_magic {
        config.network.magic = magic;
        config.network.mainnet = false;
    }
    if cli.mainnet {
        config.network.mainnet = true;
    }
    if let Some(era) = cli.era {
        config.era = era.into();
    }
    if let Some(root) = &cli.project_root {
        config.project.root = Some(root.clone());
    }
    if let Some(program) = &cli.cardano_cli {
        config.tools.cardano_cli = program.clone();
    }
    if let Some(program) = &cli.cabal {
        config.tools.cabal = program.clone();
    }
    if !cli.extra_paths.is_empty() {
        let mut extra = cli.extra_paths.clone();
        extra.append(&mut config.tools.extra_paths);
        config.tools.extra_paths = extra;
    }

    Ok(config)
}

/// Run one subcommand and fold the result into an [`Outcome`]
pub fn execute(command: Commands, config: &Config) -> Outcome {
    let name = command.name();
    with_command_span(name, || {
        debug!("Running {}", name);
        run_command(command, config)
    })
    .into()
}

fn cardano(config: &Config) -> Result<CardanoCli<SystemRunner>> {
    let runner = SystemRunner::new(&config.tools.extra_paths)?;
    Ok(CardanoCli::from_config(runner, config))
}

fn path_value(path: PathBuf) -> Value {
    Value::String(path.display().to_string())
}

fn run_command(command: Commands, config: &Config) -> Result<Value> {
    match command {
        Commands::Address { file, kind } => {
            let address = cardano(config)?.address(&file, kind.into())?;
            Ok(Value::String(address))
        }

        Commands::ProtocolParams => {
            let path = cardano(config)?.protocol_params_file()?;
            info!("Protocol parameters kept at {}", path.display());
            Ok(path_value(path))
        }

        Commands::Utxos { address, key_file } => {
            let cli = cardano(config)?;
            let address = match (address, key_file) {
                (Some(address), _) => address,
                (None, Some(key_file)) => cli.address(&key_file, KeyKind::VerificationKey)?,
                (None, None) => {
                    return Err(ToolError::validation("an address or --key-file is required"))
                }
            };
            cli.utxos(&address)
        }

        Commands::PolicyId { script } => Ok(Value::String(cardano(config)?.policy_id(&script)?)),

        Commands::AssetId { script, name } => {
            let id = cardano(config)?.asset_id(&script, &name)?;
            Ok(id.map(Value::String).unwrap_or(Value::Null))
        }

        Commands::Build {
            tx_ins,
            tx_out,
            collateral,
            out_file,
            public_key_file,
            signing_key_file,
            script,
            datum,
            redeemer,
            inline_datum,
            mint,
            mint_script,
            mint_redeemer,
            submit,
        } => {
            let tx = TxBuild {
                tx_ins,
                tx_out,
                collateral,
                out_file,
                public_key_file,
                signing_key_file,
                script,
                datum,
                redeemer,
                inline_datum,
                mint,
                mint_script,
                mint_redeemer,
                submit,
            };
            Ok(cardano(config)?.build(&tx)?.into())
        }

        Commands::Sign {
            out_file,
            signing_key_file,
        } => Ok(cardano(config)?.sign(&out_file, &signing_key_file)?.into()),

        Commands::Submit { out_file } => Ok(cardano(config)?.submit(&out_file)?.into()),

        Commands::Export {
            tx_in,
            chain_id,
            genesis_hash,
            spo_key,
            sidechain_key,
        } => {
            let runner = SystemRunner::new(&config.tools.extra_paths)?;
            let cabal = Cabal::from_config(runner, config, std::env::current_dir()?);
            let request = ExportRequest {
                tx_in,
                chain_id,
                genesis_hash,
                spo_key,
                sidechain_key,
            };
            Ok(cabal.export(&request)?.into())
        }

        Commands::CheckPrereqs => {
            let statuses = prereqs::check_prerequisites(config)?;
            let missing = prereqs::missing(&statuses);
            if !missing.is_empty() {
                return Err(ToolError::tool_not_found(missing.join(", ")));
            }
            Ok(json!(statuses))
        }
    }
}
