use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::contract::parse_contract_list;
use crate::domain::ConfigError;
use crate::infrastructure::abi::{DEFAULT_ARTIFACTS_ROOT, DEFAULT_SOURCE_EXTENSION};
use crate::modules::batch::{BatchConfig, DEFAULT_OUTPUT_DIR};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "abisync.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "ABISYNC_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub artifacts_root: String,
    pub source_extension: String,
    pub output_dir: String,
    pub contracts: Vec<String>,
    pub validate_abi: bool,
    pub trailing_newline: bool,
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifacts_root: DEFAULT_ARTIFACTS_ROOT.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            contracts: Vec::new(),
            validate_abi: false,
            trailing_newline: true,
            jobs: 1,
        }
    }
}

/// A config together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config was read from; `None` when defaults were used
    pub source: Option<PathBuf>,
}

/// Command-line values that take precedence over the file
///
/// Paths here are resolved against the working directory, not the config
/// file's directory.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub artifacts_root: Option<PathBuf>,
    pub source_extension: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub contracts: Vec<String>,
    pub validate_abi: bool,
    pub jobs: Option<usize>,
}

/// Where to look for the config file, and whether it must exist
///
/// An explicit path or `$ABISYNC_CONFIG` must exist; the default
/// `./abisync.toml` is optional.
pub fn config_path(explicit: Option<&Path>) -> (PathBuf, bool) {
    if let Some(path) = explicit {
        return (path.to_path_buf(), true);
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        return (path, true);
    }
    (PathBuf::from(DEFAULT_CONFIG_FILE), false)
}

pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let (path, required) = config_path(explicit);
    load_from(&path, required)
}

pub fn load_from(path: &Path, required: bool) -> Result<LoadedConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(LoadedConfig {
                config: Config::default(),
                source: None,
            });
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(LoadedConfig {
        config,
        source: Some(path.to_path_buf()),
    })
}

impl LoadedConfig {
    /// Directory that relative paths in the file are resolved against
    pub fn base_dir(&self, cwd: &Path) -> PathBuf {
        match self.source.as_deref().and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => cwd.join(parent),
            _ => cwd.to_path_buf(),
        }
    }

    /// Merge command-line overrides and validate into a batch configuration
    pub fn into_batch_config(
        self,
        cwd: &Path,
        overrides: Overrides,
    ) -> Result<BatchConfig, ConfigError> {
        let base = self.base_dir(cwd);
        let config = self.config;

        let raw_contracts = if overrides.contracts.is_empty() {
            config.contracts
        } else {
            overrides.contracts
        };
        let contracts = parse_contract_list(raw_contracts)?;

        let artifacts_root = match overrides.artifacts_root {
            Some(path) => expand_path(&path, cwd),
            None => expand_path(Path::new(&config.artifacts_root), &base),
        };
        let output_dir = match overrides.output_dir {
            Some(path) => expand_path(&path, cwd),
            None => expand_path(Path::new(&config.output_dir), &base),
        };

        Ok(BatchConfig {
            contracts,
            artifacts_root,
            source_extension: overrides
                .source_extension
                .unwrap_or(config.source_extension),
            output_dir,
            validate_abi: overrides.validate_abi || config.validate_abi,
            trailing_newline: config.trailing_newline,
            jobs: overrides.jobs.unwrap_or(config.jobs),
        })
    }
}

/// Expand `~/` against `$HOME` and anchor relative paths at `base`
pub fn expand_path(path: &Path, base: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return home.join(rest);
        }
    }
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            artifacts_root = "build/artifacts"
            source_extension = "vy"
            output_dir = "../frontend/src/abis"
            contracts = ["TaskRegistry", "Token"]
            validate_abi = true
            trailing_newline = false
            jobs = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.artifacts_root, "build/artifacts");
        assert_eq!(config.source_extension, "vy");
        assert_eq!(config.contracts, vec!["TaskRegistry", "Token"]);
        assert!(config.validate_abi);
        assert!(!config.trailing_newline);
        assert_eq!(config.jobs, 4);
    }

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: Config = toml::from_str("contracts = [\"A\"]").unwrap();
        assert_eq!(config.artifacts_root, DEFAULT_ARTIFACTS_ROOT);
        assert_eq!(config.source_extension, DEFAULT_SOURCE_EXTENSION);
        assert_eq!(config.output_dir, DEFAULT_OUTPUT_DIR);
        assert!(config.trailing_newline);
        assert_eq!(config.jobs, 1);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<Config>("contract = [\"A\"]").is_err());
    }

    #[test]
    fn test_explicit_path_is_required() {
        let (path, required) = config_path(Some(Path::new("custom.toml")));
        assert_eq!(path, Path::new("custom.toml"));
        assert!(required);
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_from(&dir.path().join("abisync.toml"), false).unwrap();
        assert!(loaded.source.is_none());
        assert!(loaded.config.contracts.is_empty());
    }

    #[test]
    fn test_missing_required_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("nope.toml"), true).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abisync.toml");
        fs::write(&path, "contracts = [").unwrap();
        let err = load_from(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_file_paths_relative_to_config_dir() {
        let loaded = LoadedConfig {
            config: Config {
                contracts: vec!["A".to_string()],
                ..Config::default()
            },
            source: Some(PathBuf::from("contracts/abisync.toml")),
        };
        let batch = loaded
            .into_batch_config(Path::new("/work"), Overrides::default())
            .unwrap();
        assert_eq!(batch.artifacts_root, Path::new("/work/contracts/artifacts/contracts"));
        assert_eq!(batch.output_dir, Path::new("/work/contracts/abis"));
    }

    #[test]
    fn test_overrides_win_and_use_cwd() {
        let loaded = LoadedConfig {
            config: Config {
                contracts: vec!["A".to_string(), "B".to_string()],
                jobs: 2,
                ..Config::default()
            },
            source: Some(PathBuf::from("contracts/abisync.toml")),
        };
        let overrides = Overrides {
            output_dir: Some(PathBuf::from("out")),
            contracts: vec!["C".to_string()],
            source_extension: Some("vy".to_string()),
            validate_abi: true,
            jobs: Some(8),
            ..Overrides::default()
        };
        let batch = loaded
            .into_batch_config(Path::new("/work"), overrides)
            .unwrap();
        assert_eq!(batch.output_dir, Path::new("/work/out"));
        assert_eq!(batch.contracts.len(), 1);
        assert_eq!(batch.contracts[0].as_str(), "C");
        assert_eq!(batch.source_extension, "vy");
        assert!(batch.validate_abi);
        assert_eq!(batch.jobs, 8);
    }

    #[test]
    fn test_empty_contract_list_is_fatal() {
        let loaded = LoadedConfig {
            config: Config::default(),
            source: None,
        };
        let err = loaded
            .into_batch_config(Path::new("/work"), Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::NoContracts));
    }

    #[test]
    fn test_expand_path_absolute_untouched() {
        assert_eq!(
            expand_path(Path::new("/abs/abis"), Path::new("/work")),
            Path::new("/abs/abis")
        );
        assert_eq!(
            expand_path(Path::new("abis"), Path::new("/work")),
            Path::new("/work/abis")
        );
    }
}
