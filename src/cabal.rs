// file: src/cabal.rs
// version: 1.0.0
// guid: 183ef6a2-9ca6-4757-a7db-3957c98fbd8e

//! Project build tool: locating the project and running its export executable

use crate::config::Config;
use crate::error::{Result, ToolError};
use crate::executor::{CommandRunner, Executor, Invocation};
use crate::outcome::Payload;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments for the sidechain parameter export
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    /// Genesis UTXO as `<tx hash>#<index>`
    pub tx_in: String,
    pub chain_id: String,
    pub genesis_hash: String,
    pub spo_key: Option<String>,
    /// Only passed along when `spo_key` is set
    pub sidechain_key: Option<String>,
}

impl ExportRequest {
    fn positional(&self) -> Vec<&str> {
        let mut args = vec![
            self.tx_in.as_str(),
            self.chain_id.as_str(),
            self.genesis_hash.as_str(),
        ];
        if let Some(spo_key) = present(&self.spo_key) {
            args.push(spo_key);
            if let Some(sidechain_key) = present(&self.sidechain_key) {
                args.push(sidechain_key);
            }
        }
        args
    }
}

/// An empty key counts as not given
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Walk up from `start` to the first directory holding `marker`
pub fn locate_project_root(start: &Path, marker: &str) -> Result<PathBuf> {
    let start = start.canonicalize().map_err(|e| ToolError::file(start, e))?;
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            ToolError::project_root(format!("no {} in {} or any parent", marker, start.display()))
        })
}

/// Check that an explicitly configured root really is the project root
pub fn verify_project_root(root: &Path, marker: &str) -> Result<PathBuf> {
    let root = root.canonicalize().map_err(|e| ToolError::file(root, e))?;
    if !root.join(marker).is_file() {
        return Err(ToolError::project_root(format!(
            "got wrong root path {}: {} is missing",
            root.display(),
            marker
        )));
    }
    Ok(root)
}

/// Client for the build tool
pub struct Cabal<R> {
    executor: Executor<R>,
    program: String,
    export_target: String,
    marker: String,
    configured_root: Option<PathBuf>,
    search_start: PathBuf,
    root: RefCell<Option<PathBuf>>,
}

impl<R: CommandRunner> Cabal<R> {
    /// Client that searches for the project upwards from `search_start`
    pub fn new(runner: R, search_start: impl Into<PathBuf>) -> Self {
        let defaults = crate::config::ProjectConfig::default();
        Self {
            executor: Executor::new(runner),
            program: "cabal".to_string(),
            export_target: defaults.export_target,
            marker: defaults.marker,
            configured_root: None,
            search_start: search_start.into(),
            root: RefCell::new(None),
        }
    }

    pub fn from_config(runner: R, config: &Config, search_start: impl Into<PathBuf>) -> Self {
        let mut cabal = Self::new(runner, search_start);
        cabal.program = config.tools.cabal.clone();
        cabal.export_target = config.project.export_target.clone();
        cabal.marker = config.project.marker.clone();
        cabal.configured_root = config.project.root.clone();
        cabal
    }

    /// Use `root` instead of searching for it
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.configured_root = Some(root.into());
        self
    }

    /// Project root directory. Memoized.
    pub fn project_root(&self) -> Result<PathBuf> {
        if let Some(root) = self.root.borrow().as_ref() {
            return Ok(root.clone());
        }

        let root = match &self.configured_root {
            Some(root) => verify_project_root(root, &self.marker)?,
            None => locate_project_root(&self.search_start, &self.marker)?,
        };

        debug!("Project root: {}", root.display());
        *self.root.borrow_mut() = Some(root.clone());
        Ok(root)
    }

    /// `cabal run <export target> -- <tx_in> <chain_id> <genesis_hash> [<spo key> [<sidechain key>]]`
    pub fn export(&self, request: &ExportRequest) -> Result<Payload> {
        let root = self.project_root()?;

        let invocation = Invocation::new(self.program.as_str())
            .arg("run")
            .arg(&self.export_target)
            .arg("--")
            .args(request.positional())
            .current_dir(&root);

        info!("Exporting sidechain parameters from {}", root.display());
        self.executor.run(&invocation)
    }
}
