//! Error types for the ABI export pipeline

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Per-contract failure
///
/// None of these abort a batch. `NotFound` is reported as a skip, the rest
/// as failures of the contract they occurred for.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Artifact file is absent (build not run, or misconfigured name)
    #[error("artifact not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// Artifact exists but is not valid JSON
    #[error("failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Read or write failure other than a missing artifact
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `abi` field is not an Ethereum JSON ABI (only checked when validation is on)
    #[error("artifact {} has an invalid ABI: {source}", path.display())]
    InvalidAbi {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ExportError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify a failed artifact read
    pub fn from_read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::io(path, source)
        }
    }

    /// Short machine-readable tag, used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Parse { .. } => "parse",
            Self::Io { .. } => "io",
            Self::InvalidAbi { .. } => "invalid_abi",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Parse { path, .. }
            | Self::Io { path, .. }
            | Self::InvalidAbi { path, .. } => path,
        }
    }

    /// Copy of an I/O error shared by several contracts
    ///
    /// Only `Io` and `NotFound` are ever shared; other variants collapse to
    /// an `Io` error carrying the original message.
    pub fn duplicate(&self) -> Self {
        match self {
            Self::NotFound { path } => Self::NotFound { path: path.clone() },
            Self::Io { path, source } => {
                Self::io(path.clone(), io::Error::new(source.kind(), source.to_string()))
            }
            other => Self::io(other.path().to_path_buf(), io::Error::other(other.to_string())),
        }
    }
}

/// Configuration error - fatal, raised before any contract is processed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no contracts configured")]
    NoContracts,

    #[error("contract `{0}` is listed more than once")]
    DuplicateContract(String),

    #[error("invalid contract name `{name}`: {reason}")]
    InvalidContractName { name: String, reason: &'static str },
}
