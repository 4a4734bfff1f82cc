//! Artifact path resolution for Hardhat-style build output

use std::path::{Path, PathBuf};

use crate::domain::ContractName;

/// Default build-output root, relative to the project
pub const DEFAULT_ARTIFACTS_ROOT: &str = "artifacts/contracts";

/// Default source-unit extension
pub const DEFAULT_SOURCE_EXTENSION: &str = "sol";

/// Maps a contract name to its artifact file
///
/// The build nests each artifact under a directory named after its source
/// unit: `<root>/<name>.<ext>/<name>.json`.
#[derive(Debug, Clone)]
pub struct ArtifactResolver {
    root: PathBuf,
    extension: String,
}

impl ArtifactResolver {
    pub fn new(root: impl Into<PathBuf>, extension: impl AsRef<str>) -> Self {
        Self {
            root: root.into(),
            extension: extension.as_ref().trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Expected artifact path; pure path computation, no I/O
    pub fn resolve(&self, contract: &ContractName) -> PathBuf {
        let unit_dir = if self.extension.is_empty() {
            contract.to_string()
        } else {
            format!("{}.{}", contract, self.extension)
        };
        self.root.join(unit_dir).join(contract.json_file_name())
    }
}

impl Default for ArtifactResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACTS_ROOT, DEFAULT_SOURCE_EXTENSION)
    }
}
