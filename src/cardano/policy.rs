// file: src/cardano/policy.rs
// version: 1.0.0
// guid: 13466b1c-bde2-4183-9b28-3c9d1bba3f62

//! Minting policy IDs and asset identifiers

use super::CardanoCli;
use crate::error::{Result, ToolError};
use crate::executor::CommandRunner;
use std::path::Path;
use tracing::debug;

/// The ada pseudo-asset, which has no policy
pub const LOVELACE: &str = "lovelace";

impl<R: CommandRunner> CardanoCli<R> {
    /// Policy ID of a minting script. Memoized per script file.
    pub fn policy_id(&self, script: &Path) -> Result<String> {
        if let Some(id) = self.policy_ids.borrow().get(script) {
            return Ok(id.clone());
        }

        let invocation = self
            .command(&["transaction", "policyid"])
            .flag("script-file", script.display());
        let id = self.executor().run_text(&invocation)?;
        if id.is_empty() {
            return Err(ToolError::validation(format!(
                "{} printed no policy id for {}",
                self.program,
                script.display()
            )));
        }

        debug!("Policy id of {} is {}", script.display(), id);
        self.policy_ids
            .borrow_mut()
            .insert(script.to_path_buf(), id.clone());
        Ok(id)
    }

    /// `<policy id>.<hex asset name>` for a native asset, `None` for lovelace
    pub fn asset_id(&self, script: &Path, name: &str) -> Result<Option<String>> {
        if name == LOVELACE {
            return Ok(None);
        }
        let policy = self.policy_id(script)?;
        Ok(Some(format!("{}.{}", policy, hex::encode(name.as_bytes()))))
    }
}
