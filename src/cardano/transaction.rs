// file: src/cardano/transaction.rs
// version: 1.0.0
// guid: 6085d6af-cd6a-4517-bf3c-65e968885a1e

//! Building, signing and submitting transactions
//!
//! Files follow a fixed naming scheme around a caller-chosen base path:
//! the unsigned body is written to `<base>.raw` and the signed transaction
//! to `<base>.sig`.

use super::{CardanoCli, KeyKind};
use crate::error::{Result, ToolError};
use crate::executor::CommandRunner;
use crate::outcome::Payload;
use crate::utils::with_suffix;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything `transaction build` needs
#[derive(Debug, Clone, Default)]
pub struct TxBuild {
    /// Inputs as `<tx hash>#<index>`
    pub tx_ins: Vec<String>,
    /// Output as `<address>+<amount>[+<assets>]`
    pub tx_out: String,
    pub collateral: String,
    /// Base path; `.raw` and `.sig` are appended
    pub out_file: PathBuf,
    /// Verification key of the wallet that receives change
    pub public_key_file: PathBuf,
    /// Required when `submit` is set
    pub signing_key_file: Option<PathBuf>,

    pub script: Option<PathBuf>,
    pub datum: Option<PathBuf>,
    pub redeemer: Option<PathBuf>,
    pub inline_datum: Option<PathBuf>,

    pub mint: Option<String>,
    pub mint_script: Option<PathBuf>,
    pub mint_redeemer: Option<PathBuf>,

    /// Sign and submit after a successful build
    pub submit: bool,
}

impl TxBuild {
    pub fn new(
        tx_ins: Vec<String>,
        tx_out: impl Into<String>,
        collateral: impl Into<String>,
        out_file: impl Into<PathBuf>,
        public_key_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tx_ins,
            tx_out: tx_out.into(),
            collateral: collateral.into(),
            out_file: out_file.into(),
            public_key_file: public_key_file.into(),
            ..Self::default()
        }
    }

    pub fn signed_with(mut self, signing_key_file: impl Into<PathBuf>) -> Self {
        self.signing_key_file = Some(signing_key_file.into());
        self
    }

    pub fn submitted(mut self) -> Self {
        self.submit = true;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.tx_ins.is_empty() {
            return Err(ToolError::validation("at least one tx-in is required"));
        }
        if self.submit && self.signing_key_file.is_none() {
            return Err(ToolError::validation(
                "a signing key is required to submit the transaction",
            ));
        }
        Ok(())
    }
}

fn display(path: &Option<PathBuf>) -> Option<std::path::Display<'_>> {
    path.as_ref().map(|p| p.display())
}

impl<R: CommandRunner> CardanoCli<R> {
    /// Build `<out_file>.raw`, then optionally sign and submit it.
    ///
    /// Returns the output of the last step that ran. The first failing step
    /// ends the chain.
    pub fn build(&self, tx: &TxBuild) -> Result<Payload> {
        tx.validate()?;

        let own_address = self.address(&tx.public_key_file, KeyKind::VerificationKey)?;
        let params = self.protocol_params_file()?;

        let era = self
            .command(&["transaction", "build"])
            .switch(&format!("{}-era", self.era));
        let mut invocation = self.network.apply(era);
        invocation = invocation
            .opt_flag("tx-in-script-file", display(&tx.script))
            .opt_flag("tx-in-datum-file", display(&tx.datum))
            .opt_flag("tx-in-redeemer-file", display(&tx.redeemer));

        for tx_in in &tx.tx_ins {
            invocation = invocation.flag("tx-in", tx_in);
        }

        let invocation = invocation
            .flag("tx-in-collateral", &tx.collateral)
            .flag("tx-out", &tx.tx_out)
            .opt_flag("tx-out-inline-datum-file", display(&tx.inline_datum))
            .opt_flag("mint", tx.mint.as_deref())
            .opt_flag("mint-script-file", display(&tx.mint_script))
            .opt_flag("mint-redeemer-file", display(&tx.mint_redeemer))
            .flag("change-address", &own_address)
            .flag("protocol-params-file", params.display())
            .flag("out-file", with_suffix(&tx.out_file, "raw").display());

        let built = self.executor().run(&invocation)?;
        info!("Built transaction body {}", with_suffix(&tx.out_file, "raw").display());

        if !tx.submit {
            return Ok(built);
        }

        // checked by validate()
        let signing_key = tx
            .signing_key_file
            .as_deref()
            .ok_or_else(|| ToolError::validation("missing signing key"))?;
        self.sign(&tx.out_file, signing_key)?;
        self.submit(&tx.out_file)
    }

    /// Sign `<out_file>.raw` into `<out_file>.sig`
    pub fn sign(&self, out_file: &Path, signing_key_file: &Path) -> Result<Payload> {
        let invocation = self
            .network_command(&["transaction", "sign"])
            .flag("tx-body-file", with_suffix(out_file, "raw").display())
            .flag("signing-key-file", signing_key_file.display())
            .flag("out-file", with_suffix(out_file, "sig").display());

        let payload = self.executor().run(&invocation)?;
        info!("Signed transaction {}", with_suffix(out_file, "sig").display());
        Ok(payload)
    }

    /// Submit `<out_file>.sig` to the node
    pub fn submit(&self, out_file: &Path) -> Result<Payload> {
        let invocation = self
            .network_command(&["transaction", "submit"])
            .flag("tx-file", with_suffix(out_file, "sig").display());

        let payload = self.executor().run(&invocation)?;
        info!("Submitted transaction {}", with_suffix(out_file, "sig").display());
        Ok(payload)
    }
}
