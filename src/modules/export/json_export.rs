//! JSON Export
//!
//! Writes the batch report to a JSON file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::{BatchReport, ContractOutcome};

/// Exportable report (plain strings, no domain types)
#[derive(Serialize)]
struct ExportableReport {
    generated_at: String,
    total: usize,
    succeeded: usize,
    skipped: usize,
    failed: usize,
    contracts: Vec<ExportableOutcome>,
}

#[derive(Serialize)]
struct ExportableOutcome {
    contract: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&ContractOutcome> for ExportableOutcome {
    fn from(outcome: &ContractOutcome) -> Self {
        let contract = outcome.contract().to_string();
        match outcome {
            ContractOutcome::Succeeded { output, stats, .. } => Self {
                contract,
                status: "succeeded",
                path: Some(output.display().to_string()),
                entries: stats.entries,
                reason: None,
                error_kind: None,
                error: None,
            },
            ContractOutcome::Skipped {
                artifact, reason, ..
            } => Self {
                contract,
                status: "skipped",
                path: Some(artifact.display().to_string()),
                entries: None,
                reason: Some(reason.as_str()),
                error_kind: None,
                error: None,
            },
            ContractOutcome::Failed { error, .. } => Self {
                contract,
                status: "failed",
                path: Some(error.path().display().to_string()),
                entries: None,
                reason: None,
                error_kind: Some(error.kind()),
                error: Some(error.to_string()),
            },
        }
    }
}

impl From<&BatchReport> for ExportableReport {
    fn from(report: &BatchReport) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            total: report.total(),
            succeeded: report.succeeded(),
            skipped: report.skipped(),
            failed: report.failed(),
            contracts: report.outcomes().iter().map(ExportableOutcome::from).collect(),
        }
    }
}

/// Write the report to `path`, creating parent directories; returns the
/// number of contracts written
pub fn write_report(path: &Path, report: &BatchReport) -> Result<usize> {
    let exportable = ExportableReport::from(report);
    let json = serde_json::to_string_pretty(&exportable)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    Ok(report.total())
}
