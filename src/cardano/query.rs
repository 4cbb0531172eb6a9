// file: src/cardano/query.rs
// version: 1.0.0
// guid: 78562f21-aa9e-437d-9037-86126343c119

//! Address derivation and chain queries

use super::CardanoCli;
use crate::error::{Result, ToolError};
use crate::executor::CommandRunner;
use crate::utils;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which kind of payment credential file an address is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyKind {
    #[default]
    VerificationKey,
    Script,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::VerificationKey => "verification-key",
            KeyKind::Script => "script",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<R: CommandRunner> CardanoCli<R> {
    /// Payment address for a verification key or script file. Memoized.
    pub fn address(&self, file: &Path, kind: KeyKind) -> Result<String> {
        let key = (file.to_path_buf(), kind);
        if let Some(address) = self.addresses.borrow().get(&key) {
            return Ok(address.clone());
        }

        let invocation = self
            .network_command(&["address", "build"])
            .flag(&format!("payment-{}-file", kind), file.display());
        let address = self.executor().run_text(&invocation)?;
        if address.is_empty() {
            return Err(ToolError::validation(format!(
                "{} printed no address for {}",
                self.program,
                file.display()
            )));
        }

        debug!("Derived address {} from {}", address, file.display());
        self.addresses.borrow_mut().insert(key, address.clone());
        Ok(address)
    }

    /// Path of a file holding the current protocol parameters. Memoized.
    ///
    /// The file is left on disk for the rest of the run and afterwards.
    pub fn protocol_params_file(&self) -> Result<PathBuf> {
        if let Some(path) = self.params_file.borrow().as_ref() {
            return Ok(path.clone());
        }

        let path = self
            .temp_file()?
            .into_temp_path()
            .keep()
            .map_err(|e| ToolError::Io(e.error))?;

        let invocation = self
            .network_command(&["query", "protocol-parameters"])
            .flag("out-file", path.display());
        self.executor().run(&invocation)?;

        info!("Protocol parameters written to {}", path.display());
        *self.params_file.borrow_mut() = Some(path.clone());
        Ok(path)
    }

    /// UTXOs sitting at `address`, as the JSON object cardano-cli writes.
    ///
    /// The out-file only lives for the duration of the call.
    pub fn utxos(&self, address: &str) -> Result<Value> {
        let out = self.temp_file()?;

        let invocation = self
            .network_command(&["query", "utxo"])
            .flag("address", address)
            .flag("out-file", out.path().display());
        self.executor().run(&invocation)?;

        utils::read_json(out.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::{flag_value, FakeRunner};
    use crate::executor::RawOutput;
    use crate::network::Network;
    use serde_json::json;
    use std::path::Path;

    fn write_out_file(inv: &crate::executor::Invocation, content: &str) {
        if let Some(path) = flag_value(inv, "out-file") {
            std::fs::write(path, content).unwrap();
        }
    }

    #[test]
    fn test_address_command_line() {
        let runner = FakeRunner::new().respond(RawOutput::ok("addr_test1vz7yq\n"));
        let cli = CardanoCli::new(&runner, Network::Testnet(9));

        let address = cli
            .address(Path::new("keys/payment.vkey"), KeyKind::VerificationKey)
            .unwrap();

        assert_eq!(address, "addr_test1vz7yq");
        let call = runner.call(0);
        assert_eq!(call.program(), "cardano-cli");
        assert_eq!(
            call.get_args(),
            &[
                "address",
                "build",
                "--testnet-magic=9",
                "--payment-verification-key-file=keys/payment.vkey",
            ]
        );
    }

    #[test]
    fn test_script_address_flag() {
        let runner = FakeRunner::new().respond(RawOutput::ok("addr_test1wpscript"));
        let cli = CardanoCli::new(&runner, Network::Testnet(2));

        cli.address(Path::new("fuel.plutus"), KeyKind::Script).unwrap();
        assert_eq!(
            flag_value(&runner.call(0), "payment-script-file").as_deref(),
            Some("fuel.plutus")
        );
    }

    #[test]
    fn test_address_is_memoized_per_key() {
        let runner = FakeRunner::new()
            .respond(RawOutput::ok("addr_a"))
            .respond(RawOutput::ok("addr_b"));
        let cli = CardanoCli::new(&runner, Network::Testnet(9));

        let a1 = cli.address(Path::new("a.vkey"), KeyKind::VerificationKey).unwrap();
        let a2 = cli.address(Path::new("a.vkey"), KeyKind::VerificationKey).unwrap();
        let b = cli.address(Path::new("b.vkey"), KeyKind::VerificationKey).unwrap();

        assert_eq!(a1, "addr_a");
        assert_eq!(a2, "addr_a");
        assert_eq!(b, "addr_b");
        assert_eq!(runner.call_count(), 2);
    }

    #[test]
    fn test_failed_address_is_not_cached() {
        let runner = FakeRunner::new()
            .respond(RawOutput::err("Invalid key file\n"))
            .respond(RawOutput::ok("addr_ok"));
        let cli = CardanoCli::new(&runner, Network::Testnet(9));

        let err = cli
            .address(Path::new("a.vkey"), KeyKind::VerificationKey)
            .unwrap_err();
        assert_eq!(err.message(), "Invalid key file\n");

        let ok = cli.address(Path::new("a.vkey"), KeyKind::VerificationKey).unwrap();
        assert_eq!(ok, "addr_ok");
        assert_eq!(runner.call_count(), 2);
    }

    #[test]
    fn test_protocol_params_file_is_kept_and_memoized() {
        let runner = FakeRunner::new().with_hook(|inv| write_out_file(inv, "{\"txFeePerByte\": 44}"));
        let cli = CardanoCli::new(&runner, Network::Testnet(9));

        let path = cli.protocol_params_file().unwrap();
        let again = cli.protocol_params_file().unwrap();

        assert_eq!(path, again);
        assert_eq!(runner.call_count(), 1);
        assert!(path.exists());

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("trustless-sidechain-"));
        assert!(name.ends_with(".json"));

        let call = runner.call(0);
        assert_eq!(&call.get_args()[..3], &["query", "protocol-parameters", "--testnet-magic=9"]);
        assert_eq!(flag_value(&call, "out-file"), Some(path.display().to_string()));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_protocol_params_error_propagates() {
        let runner = FakeRunner::new().respond(RawOutput::err("node socket not found"));
        let cli = CardanoCli::new(&runner, Network::Testnet(9));

        let err = cli.protocol_params_file().unwrap_err();
        assert_eq!(err.message(), "node socket not found");
    }

    #[test]
    fn test_utxos_reads_out_file_and_cleans_up() {
        let runner = FakeRunner::new().with_hook(|inv| {
            write_out_file(
                inv,
                r#"{"5e1a#0": {"address": "addr_test1", "value": {"lovelace": 10000000}}}"#,
            )
        });
        let cli = CardanoCli::new(&runner, Network::Testnet(9));

        let utxos = cli.utxos("addr_test1").unwrap();
        assert_eq!(utxos["5e1a#0"]["value"]["lovelace"], json!(10000000));

        let call = runner.call(0);
        assert_eq!(
            &call.get_args()[..4],
            &["query", "utxo", "--testnet-magic=9", "--address=addr_test1"]
        );
        let out_file = flag_value(&call, "out-file").unwrap();
        assert!(!Path::new(&out_file).exists());
    }

    #[test]
    fn test_utxos_error_skips_reading() {
        let runner = FakeRunner::new().respond(RawOutput::err("bad address"));
        let cli = CardanoCli::new(&runner, Network::Mainnet);

        let err = cli.utxos("nope").unwrap_err();
        assert!(matches!(err, ToolError::Cli { .. }));
        assert_eq!(runner.call(0).get_args()[2], "--mainnet");
    }
}
