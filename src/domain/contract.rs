//! Contract names - the key shared by artifacts and exported ABI files

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use super::error::ConfigError;

/// A validated contract name (e.g. "TaskRegistry")
///
/// Names are used verbatim as path components, so anything that could
/// address a different directory is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct ContractName(String);

impl ContractName {
    pub fn new(raw: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = raw.into();
        let reason = if raw.is_empty() {
            Some("name is empty")
        } else if raw.trim() != raw {
            Some("name has leading or trailing whitespace")
        } else if raw == "." || raw == ".." {
            Some("name is a relative path component")
        } else if raw.contains(['/', '\\']) {
            Some("name contains a path separator")
        } else if raw.contains('\0') {
            Some("name contains a NUL byte")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ConfigError::InvalidContractName { name: raw, reason }),
            None => Ok(Self(raw)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the exported ABI (`<name>.json`)
    pub fn json_file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl TryFrom<String> for ContractName {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContractName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parse a configured list of names, rejecting malformed names and duplicates
pub fn parse_contract_list<I, S>(raw: I) -> Result<Vec<ContractName>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for item in raw {
        let name = ContractName::new(item)?;
        if !seen.insert(name.clone()) {
            return Err(ConfigError::DuplicateContract(name.0));
        }
        names.push(name);
    }
    if names.is_empty() {
        return Err(ConfigError::NoContracts);
    }
    Ok(names)
}
