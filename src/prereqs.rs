// file: src/prereqs.rs
// version: 1.0.0
// guid: 8ef4069e-96a8-417b-8426-06f02e342ee8

//! Checks that the wrapped tools can be found

use crate::config::Config;
use crate::env;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// Where a required tool resolved to, if anywhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub name: String,
    pub path: Option<PathBuf>,
}

impl ToolStatus {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Resolve every configured tool against the tool search path
pub fn check_prerequisites(config: &Config) -> Result<Vec<ToolStatus>> {
    let tool_env = env::build_env(&config.tools.extra_paths)?;
    let search_path = env::search_path(&tool_env).cloned();
    let cwd = std::env::current_dir()?;

    let statuses = [&config.tools.cardano_cli, &config.tools.cabal]
        .into_iter()
        .map(|name| {
            let path = which::which_in(name, search_path.as_ref(), &cwd).ok();
            if path.is_none() {
                warn!("{} not found on the search path", name);
            }
            ToolStatus {
                name: name.clone(),
                path,
            }
        })
        .collect();

    Ok(statuses)
}

/// Names of the tools that could not be found
pub fn missing(statuses: &[ToolStatus]) -> Vec<String> {
    statuses
        .iter()
        .filter(|s| !s.found())
        .map(|s| s.name.clone())
        .collect()
}
