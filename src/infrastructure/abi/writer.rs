//! ABI writer - persists extracted ABIs into the output directory

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{AbiDocument, ContractName, ExportError};

/// An output directory that is known to exist
///
/// Obtained once per batch through [`OutputDir::prepare`]; writes take a
/// reference to it, so no ABI can be written before the directory exists.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Create the directory and any missing parents; no-op if present
    pub fn prepare(path: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|err| ExportError::io(&path, err))?;
        debug!(path = %path.display(), "output directory ready");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<dir>/<name>.json`
    pub fn target_for(&self, contract: &ContractName) -> PathBuf {
        self.path.join(contract.json_file_name())
    }
}

/// Serializes ABIs as two-space pretty JSON
#[derive(Debug, Clone)]
pub struct AbiWriter {
    trailing_newline: bool,
}

impl AbiWriter {
    pub fn new() -> Self {
        Self {
            trailing_newline: true,
        }
    }

    pub fn trailing_newline(mut self, enabled: bool) -> Self {
        self.trailing_newline = enabled;
        self
    }

    /// Exact bytes written for `abi`
    pub fn render(&self, abi: &AbiDocument) -> serde_json::Result<String> {
        let mut json = abi.to_pretty_json()?;
        if self.trailing_newline {
            json.push('\n');
        }
        Ok(json)
    }

    /// Write `abi` to `<dir>/<name>.json`, replacing any existing file
    ///
    /// Content goes to a temporary file in the same directory which is then
    /// renamed over the target, so a failed write leaves the previous file
    /// (or no file) in place.
    pub fn write(
        &self,
        out: &OutputDir,
        contract: &ContractName,
        abi: &AbiDocument,
    ) -> Result<PathBuf, ExportError> {
        let target = out.target_for(contract);
        let json = self
            .render(abi)
            .map_err(|err| ExportError::io(&target, err.into()))?;

        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{}.", contract))
            .suffix(".tmp")
            .tempfile_in(out.path())
            .map_err(|err| ExportError::io(out.path(), err))?;
        tmp.write_all(json.as_bytes())
            .map_err(|err| ExportError::io(tmp.path(), err))?;
        make_readable(&tmp).map_err(|err| ExportError::io(tmp.path(), err))?;

        tmp.persist(&target)
            .map_err(|err| ExportError::io(&target, err.error))?;

        debug!(path = %target.display(), bytes = json.len(), "wrote ABI");
        Ok(target)
    }
}

impl Default for AbiWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Temp files are created owner-only; exported ABIs are meant to be shared
#[cfg(unix)]
fn make_readable(tmp: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn make_readable(_tmp: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
