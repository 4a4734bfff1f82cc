//! Export Module
//!
//! Writes the batch report as JSON for CI and tooling.

mod json_export;

pub use json_export::write_report;
