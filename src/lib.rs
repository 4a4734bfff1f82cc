//! abisync - export contract ABIs from compiled build artifacts
//!
//! For every configured contract name the pipeline resolves the artifact
//! written by the contract build (`<root>/<name>.sol/<name>.json`), extracts
//! its `abi` field verbatim and writes it pretty-printed to
//! `<output>/<name>.json`. Contracts are processed independently; a missing
//! or broken artifact is reported and the batch carries on.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod modules;

pub use domain::{
    AbiDocument, AbiStats, BatchReport, ConfigError, ContractName, ContractOutcome, ExportError,
    SkipReason,
};
pub use infrastructure::{AbiExtractor, AbiWriter, ArtifactResolver, OutputDir};
pub use modules::batch::{BatchConfig, BatchDriver};
pub use modules::export::write_report;
