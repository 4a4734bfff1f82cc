//! ABI document - the `abi` field of a build artifact, held verbatim

use alloy_json_abi::JsonAbi;
use serde_json::Value;

/// Key holding the interface description inside a build artifact
pub const ABI_FIELD: &str = "abi";

/// An ABI extracted from an artifact
///
/// The value is kept exactly as it was read. Entry order and key order
/// inside entries survive serialization (serde_json `preserve_order`).
#[derive(Debug, Clone, PartialEq)]
pub struct AbiDocument {
    value: Value,
}

/// Entry counts used for status lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbiStats {
    /// Number of top-level entries, `None` when the ABI is not an array
    pub entries: Option<usize>,
    pub functions: usize,
    pub events: usize,
    pub errors: usize,
    /// Whether the ABI parsed as a typed Ethereum JSON ABI
    pub typed: bool,
}

impl AbiDocument {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// An ABI with no entries
    pub fn empty() -> Self {
        Self::new(Value::Array(Vec::new()))
    }

    /// Take the `abi` field out of a parsed artifact
    ///
    /// A missing or `null` field, or an artifact that is not an object,
    /// yields an empty ABI.
    pub fn from_artifact(artifact: Value) -> Self {
        match artifact {
            Value::Object(mut fields) => match fields.remove(ABI_FIELD) {
                None | Some(Value::Null) => Self::empty(),
                Some(abi) => Self::new(abi),
            },
            _ => Self::empty(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Number of top-level entries, if the ABI is an array
    pub fn entry_count(&self) -> Option<usize> {
        self.value.as_array().map(Vec::len)
    }

    /// Parse as a typed Ethereum JSON ABI
    pub fn typed(&self) -> serde_json::Result<JsonAbi> {
        serde_json::from_value(self.value.clone())
    }

    /// Two-space indented JSON, no trailing newline
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.value)
    }

    pub fn stats(&self) -> AbiStats {
        let entries = self.entry_count();
        match self.typed() {
            Ok(abi) => AbiStats {
                entries,
                functions: abi.functions().count(),
                events: abi.events().count(),
                errors: abi.errors().count(),
                typed: true,
            },
            Err(_) => AbiStats {
                entries,
                ..AbiStats::default()
            },
        }
    }
}

impl AbiStats {
    /// Short human-readable summary, e.g. "3 entries: 2 functions, 1 event"
    pub fn describe(&self) -> String {
        let Some(entries) = self.entries else {
            return "non-array ABI".to_string();
        };
        let mut out = plural(entries, "entry", "entries");
        if self.typed && entries > 0 {
            let mut parts = Vec::new();
            if self.functions > 0 {
                parts.push(plural(self.functions, "function", "functions"));
            }
            if self.events > 0 {
                parts.push(plural(self.events, "event", "events"));
            }
            if self.errors > 0 {
                parts.push(plural(self.errors, "error", "errors"));
            }
            if !parts.is_empty() {
                out.push_str(": ");
                out.push_str(&parts.join(", "));
            }
        }
        out
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{} {}", count, one)
    } else {
        format!("{} {}", count, many)
    }
}
