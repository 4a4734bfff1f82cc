//! Domain layer - pipeline types independent of the filesystem
//!
//! - `abi`: the extracted ABI document and its statistics
//! - `contract`: validated contract names
//! - `error`: per-contract and configuration error taxonomy
//! - `report`: per-contract outcomes and the batch summary

pub mod abi;
pub mod contract;
pub mod error;
pub mod report;

pub use abi::{AbiDocument, AbiStats};
pub use contract::ContractName;
pub use error::{ConfigError, ExportError};
pub use report::{BatchReport, ContractOutcome, SkipReason};
