// file: src/config.rs
// version: 1.0.0
// guid: c7ecdfc6-84e7-4196-95fe-ec54e86333bd

use crate::error::{Result, ToolError};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_TESTNET_MAGIC: u32 = 9;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub era: Era,
    pub tools: ToolsConfig,
    pub project: ProjectConfig,
    pub temp: TempConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub magic: u32,
    pub mainnet: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub cardano_cli: String,
    pub cabal: String,
    pub extra_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub root: Option<PathBuf>,
    pub marker: String,
    pub export_target: String,
}

/// Naming of the temp files handed to cardano-cli
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TempConfig {
    pub prefix: String,
    pub suffix: String,
}

/// Ledger era passed as `--<era>-era`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    Alonzo,
    Babbage,
    Conway,
}

impl Era {
    pub fn as_str(&self) -> &'static str {
        match self {
            Era::Alonzo => "alonzo",
            Era::Babbage => "babbage",
            Era::Conway => "conway",
        }
    }
}

impl Default for Era {
    fn default() -> Self {
        Era::Babbage
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Era {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "alonzo" => Ok(Era::Alonzo),
            "babbage" => Ok(Era::Babbage),
            "conway" => Ok(Era::Conway),
            _ => Err(ToolError::validation(format!("Unknown era: {}", s))),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            magic: DEFAULT_TESTNET_MAGIC,
            mainnet: false,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            cardano_cli: "cardano-cli".to_string(),
            cabal: "cabal".to_string(),
            extra_paths: Vec::new(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: None,
            marker: "cabal.project".to_string(),
            export_target: "trustless-sidechain-export".to_string(),
        }
    }
}

impl Default for TempConfig {
    fn default() -> Self {
        Self {
            prefix: "trustless-sidechain-".to_string(),
            suffix: ".json".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            era: Era::default(),
            tools: ToolsConfig::default(),
            project: ProjectConfig::default(),
            temp: TempConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the user file, the project file and the environment
    pub fn load() -> Result<Self> {
        let mut layers = Vec::new();

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                info!("Loading user configuration from: {}", user_config.display());
                layers.push(user_config);
            }
        }

        let project_config = PathBuf::from("sidechain-scripts.toml");
        if project_config.exists() {
            info!(
                "Loading project configuration from: {}",
                project_config.display()
            );
            layers.push(project_config);
        }

        let mut config = Self::apply_env_overrides(Self::load_layers(&layers)?)?;
        config.expand_paths()?;

        debug!("Final configuration: {:#?}", config);
        Ok(config)
    }

    /// Load an explicit config file, then apply environment overrides
    pub fn load_explicit(path: &Path) -> Result<Self> {
        let mut config = Self::apply_env_overrides(Self::load_from_file(path)?)?;
        config.expand_paths()?;
        Ok(config)
    }

    /// Get the user configuration file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sidechain-scripts").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::load_layers(&[path])
    }

    /// Merge TOML files in order, later files overriding single keys of
    /// earlier ones, on top of the defaults
    pub fn load_layers<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut merged = toml::Table::new();
        for path in paths {
            merge_tables(&mut merged, Self::read_table(path.as_ref())?);
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e| ToolError::config(format!("Invalid configuration: {}", e)))
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ToolError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            ToolError::config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Self) -> Result<Self> {
        Self::apply_overrides(config, |name| std::env::var_os(name))
    }

    /// Apply `SIDECHAIN_*` overrides read through `lookup`
    fn apply_overrides<F>(mut config: Self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if let Some(magic) = lookup("SIDECHAIN_TESTNET_MAGIC") {
            let magic = magic.to_string_lossy();
            config.network.magic = magic.parse().map_err(|_| {
                ToolError::config(format!("SIDECHAIN_TESTNET_MAGIC is not a number: {}", magic))
            })?;
        }

        if let Some(era) = lookup("SIDECHAIN_ERA") {
            config.era = era.to_string_lossy().parse()?;
        }

        if let Some(root) = lookup("SIDECHAIN_PROJECT_ROOT") {
            config.project.root = Some(PathBuf::from(root));
        }

        if let Some(paths) = lookup("SIDECHAIN_EXTRA_PATHS") {
            config.tools.extra_paths = std::env::split_paths(&paths).collect();
        }

        Ok(config)
    }

    /// Expand `~` and `$VAR` in configured paths
    fn expand_paths(&mut self) -> Result<()> {
        if let Some(root) = self.project.root.take() {
            self.project.root = Some(expand_path(&root)?);
        }
        self.tools.extra_paths = self
            .tools
            .extra_paths
            .iter()
            .map(|p| expand_path(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(())
    }
}

/// Recursively merge `overlay` into `base`; tables merge key by key, any
/// other value replaces what was there
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Expand `~` and environment variables in a path
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .map_err(|e| ToolError::config(format!("Cannot expand {}: {}", raw, e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.network.magic, 9);
        assert!(!config.network.mainnet);
        assert_eq!(config.era, Era::Babbage);
        assert_eq!(config.tools.cardano_cli, "cardano-cli");
        assert_eq!(config.project.marker, "cabal.project");
        assert_eq!(config.temp.prefix, "trustless-sidechain-");
        assert_eq!(config.temp.suffix, ".json");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
era = "conway"

[network]
magic = 42

[tools]
extra_paths = ["/opt/cardano/bin"]
"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.network.magic, 42);
        assert_eq!(config.era, Era::Conway);
        assert_eq!(config.tools.extra_paths, vec![PathBuf::from("/opt/cardano/bin")]);
        assert_eq!(config.tools.cabal, "cabal");
        assert_eq!(config.project.export_target, "trustless-sidechain-export");
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "network = 3").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ToolError::Config(_)));
    }

    #[test]
    fn test_project_file_layers_over_user_file() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("user.toml");
        let project = dir.path().join("sidechain-scripts.toml");
        std::fs::write(&user, "[network]\nmagic = 42\n\n[tools]\ncabal = \"/opt/ghc/bin/cabal\"\n").unwrap();
        std::fs::write(&project, "era = \"conway\"\n\n[tools]\ncardano_cli = \"/opt/node/bin/cardano-cli\"\n").unwrap();

        let config = Config::load_layers(&[&user, &project]).unwrap();
        assert_eq!(config.network.magic, 42);
        assert_eq!(config.era, Era::Conway);
        assert_eq!(config.tools.cabal, "/opt/ghc/bin/cabal");
        assert_eq!(config.tools.cardano_cli, "/opt/node/bin/cardano-cli");
    }

    #[test]
    fn test_later_layer_wins_on_same_key() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("user.toml");
        let project = dir.path().join("project.toml");
        std::fs::write(&user, "[network]\nmagic = 42\nmainnet = true\n").unwrap();
        std::fs::write(&project, "[network]\nmagic = 7\n").unwrap();

        let config = Config::load_layers(&[&user, &project]).unwrap();
        assert_eq!(config.network.magic, 7);
        assert!(config.network.mainnet);
    }

    #[test]
    fn test_no_layers_is_default() {
        let config = Config::load_layers::<&Path>(&[]).unwrap();
        assert_eq!(config, Config::default());
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let vars: std::collections::HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_env_overrides_apply() {
        let extra = std::env::join_paths(["/opt/cardano/bin", "/nix/bin"]).unwrap();
        let extra = extra.to_string_lossy().into_owned();
        let lookup = lookup_from(&[
            ("SIDECHAIN_TESTNET_MAGIC", "2"),
            ("SIDECHAIN_ERA", "conway"),
            ("SIDECHAIN_PROJECT_ROOT", "/work/trustless-sidechain"),
            ("SIDECHAIN_EXTRA_PATHS", extra.as_str()),
        ]);

        let config = Config::apply_overrides(Config::default(), lookup).unwrap();
        assert_eq!(config.network.magic, 2);
        assert_eq!(config.era, Era::Conway);
        assert_eq!(config.project.root, Some(PathBuf::from("/work/trustless-sidechain")));
        assert_eq!(
            config.tools.extra_paths,
            vec![PathBuf::from("/opt/cardano/bin"), PathBuf::from("/nix/bin")]
        );
    }

    #[test]
    fn test_env_overrides_absent_keep_config() {
        let config = Config::apply_overrides(Config::default(), lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_non_numeric_magic_is_config_error() {
        let lookup = lookup_from(&[("SIDECHAIN_TESTNET_MAGIC", "preview")]);
        let err = Config::apply_overrides(Config::default(), lookup).unwrap_err();
        assert!(matches!(err, ToolError::Config(_)));
    }

    #[test]
    fn test_unknown_era_is_validation_error() {
        let lookup = lookup_from(&[("SIDECHAIN_ERA", "shelley")]);
        let err = Config::apply_overrides(Config::default(), lookup).unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn test_era_parsing() {
        assert_eq!("Babbage".parse::<Era>().unwrap(), Era::Babbage);
        assert!("shelley".parse::<Era>().is_err());
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_path(Path::new("~/keys")).unwrap();
            assert_eq!(expanded, home.join("keys"));
        }
    }
}
