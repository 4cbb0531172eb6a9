// file: src/env.rs
// version: 1.0.0
// guid: 5e81df66-a4ff-42db-b6e5-62af38785870

//! Environment handed to every spawned tool

use crate::error::{Result, ToolError};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;

static TOOL_ENV: OnceLock<HashMap<OsString, OsString>> = OnceLock::new();

/// Build the environment for tool invocations: the current environment
/// with `extra_paths` placed in front of `PATH`.
pub fn build_env(extra_paths: &[PathBuf]) -> Result<HashMap<OsString, OsString>> {
    let mut env: HashMap<OsString, OsString> = std::env::vars_os().collect();

    let mut search: Vec<PathBuf> = extra_paths.to_vec();
    if let Some(path) = env.get(&OsString::from("PATH")) {
        search.extend(std::env::split_paths(path));
    }

    let joined = std::env::join_paths(search)
        .map_err(|e| ToolError::config(format!("Invalid search path entry: {}", e)))?;
    env.insert(OsString::from("PATH"), joined);
    Ok(env)
}

/// Process-wide tool environment.
///
/// The first caller decides the extra search paths; later callers get the
/// cached value.
pub fn tool_env(extra_paths: &[PathBuf]) -> Result<&'static HashMap<OsString, OsString>> {
    if let Some(env) = TOOL_ENV.get() {
        return Ok(env);
    }
    let env = build_env(extra_paths)?;
    debug!("Tool search path prepared with {} extra entries", extra_paths.len());
    Ok(TOOL_ENV.get_or_init(|| env))
}

/// The `PATH` value from a prepared environment
pub fn search_path(env: &HashMap<OsString, OsString>) -> Option<&OsString> {
    env.get(&OsString::from("PATH"))
}
