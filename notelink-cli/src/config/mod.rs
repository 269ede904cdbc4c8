//! Configuration module

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Vault scanning configuration
    #[serde(default)]
    pub scan: ScanConfig,

    /// Link output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scanning-related configuration
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ScanConfig {
    /// Glob patterns, relative to the vault, whose files are not notes
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for linkified copies, relative to the vault
    pub dir: String,

    /// Overwrite existing destination files
    pub force: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "linkified".to_string(),
            force: false,
        }
    }
}

impl CliConfig {
    /// Load configuration.
    ///
    /// An explicitly given file must exist and parse. Otherwise
    /// `<vault>/.notelink.toml` is used when present, and the defaults
    /// apply when it is not.
    pub fn load(explicit: Option<&Path>, vault: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let implicit = vault.join(".notelink.toml");
                if !implicit.is_file() {
                    return Ok(Self::default());
                }
                implicit
            }
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .map_err(|err| CliError::ConfigError(format!("{}: {err}", path.display())))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig::load(None, dir.path()).unwrap();
        assert!(config.scan.ignore.is_empty());
        assert_eq!(config.output.dir, "linkified");
        assert!(!config.output.force);
    }

    #[test]
    fn the_vault_config_is_picked_up_implicitly() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".notelink.toml"),
            "[scan]\nignore = [\"drafts/**\"]\n",
        )
        .unwrap();

        let config = CliConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.scan.ignore, vec!["drafts/**".to_string()]);
        assert_eq!(config.output.dir, "linkified");
    }

    #[test]
    fn partial_sections_fall_back_to_defaults() {
        let config: CliConfig =
            toml::from_str("[output]\ndir = \"out\"\nforce = true\n").unwrap();
        assert_eq!(config.output.dir, "out");
        assert!(config.output.force);
        assert!(config.scan.ignore.is_empty());
    }

    #[test]
    fn an_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = CliConfig::load(Some(&missing), dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[scan\n").unwrap();
        let err = CliConfig::load(Some(&path), dir.path()).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }
}
