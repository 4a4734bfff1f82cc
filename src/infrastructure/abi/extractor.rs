//! ABI extractor - reads an artifact file and pulls out its `abi` field

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::domain::{AbiDocument, ExportError};

/// Reads artifacts as inert JSON data
///
/// The read is attempted directly; a missing file surfaces as
/// `ExportError::NotFound` rather than through a prior existence check.
#[derive(Debug, Clone, Default)]
pub struct AbiExtractor {
    validate: bool,
}

impl AbiExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the extracted value to parse as an Ethereum JSON ABI
    pub fn validating(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn extract(&self, path: &Path) -> Result<AbiDocument, ExportError> {
        let content = fs::read(path).map_err(|err| ExportError::from_read(path, err))?;
        let artifact: Value =
            serde_json::from_slice(&content).map_err(|source| ExportError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let abi = AbiDocument::from_artifact(artifact);

        if self.validate {
            abi.typed().map_err(|source| ExportError::InvalidAbi {
                path: path.to_path_buf(),
                source,
            })?;
        }

        debug!(
            path = %path.display(),
            entries = ?abi.entry_count(),
            bytes = content.len(),
            "extracted ABI"
        );

        Ok(abi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_extract_returns_abi_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let abi = json!([{"type": "function", "name": "f"}]);
        let artifact = json!({
            "_format": "hh-sol-artifact-1",
            "contractName": "A",
            "abi": abi,
            "bytecode": "0x"
        });
        let path = write(dir.path(), "A.json", &artifact.to_string());

        let doc = AbiExtractor::new().extract(&path).unwrap();
        assert_eq!(doc.value(), &abi);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = AbiExtractor::new()
            .extract(&dir.path().join("Missing.sol/Missing.json"))
            .unwrap_err();
        assert!(matches!(err, ExportError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "Bad.json", "{\"abi\": [");
        let err = AbiExtractor::new().extract(&path).unwrap_err();
        assert!(matches!(err, ExportError::Parse { .. }));
    }

    #[test]
    fn test_no_abi_field_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "NoAbi.json", "{\"bytecode\": \"0x\"}");
        let doc = AbiExtractor::new().extract(&path).unwrap();
        assert_eq!(doc, AbiDocument::empty());
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AbiExtractor::new().extract(dir.path()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_validation_rejects_non_abi() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "Odd.json", "{\"abi\": [42]}");

        // Passed through untouched when not validating
        let doc = AbiExtractor::new().extract(&path).unwrap();
        assert_eq!(doc.value(), &json!([42]));

        let err = AbiExtractor::new().validating(true).extract(&path).unwrap_err();
        assert!(matches!(err, ExportError::InvalidAbi { .. }));
        assert_eq!(err.kind(), "invalid_abi");
    }

    #[test]
    fn test_validation_accepts_real_abi() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = json!({
            "abi": [{
                "type": "function",
                "name": "balanceOf",
                "inputs": [{"name": "owner", "type": "address", "internalType": "address"}],
                "outputs": [{"name": "", "type": "uint256", "internalType": "uint256"}],
                "stateMutability": "view"
            }]
        });
        let path = write(dir.path(), "Token.json", &artifact.to_string());
        let doc = AbiExtractor::new().validating(true).extract(&path).unwrap();
        assert_eq!(doc.entry_count(), Some(1));
    }
}
