//! ABI domain models
//!
//! The pipeline treats an ABI as opaque JSON. Typed parsing through
//! alloy-json-abi is only used for statistics and the optional shape check.

mod document;

pub use document::{AbiDocument, AbiStats};
