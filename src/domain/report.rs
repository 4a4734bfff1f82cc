//! Batch outcomes and summary

use std::fmt;
use std::path::PathBuf;

use super::abi::AbiStats;
use super::contract::ContractName;
use super::error::ExportError;

/// Why a contract was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No artifact at the resolved path
    NotFound,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotFound => "not_found",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => f.write_str("artifact not found"),
        }
    }
}

/// Result of processing one contract
#[derive(Debug)]
pub enum ContractOutcome {
    Succeeded {
        contract: ContractName,
        /// Written ABI file
        output: PathBuf,
        stats: AbiStats,
    },
    Skipped {
        contract: ContractName,
        /// Artifact path that was looked up
        artifact: PathBuf,
        reason: SkipReason,
    },
    Failed {
        contract: ContractName,
        error: ExportError,
    },
}

impl ContractOutcome {
    pub fn contract(&self) -> &ContractName {
        match self {
            Self::Succeeded { contract, .. }
            | Self::Skipped { contract, .. }
            | Self::Failed { contract, .. } => contract,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// One line per contract for the terminal
    pub fn status_line(&self) -> String {
        match self {
            Self::Succeeded {
                contract,
                output,
                stats,
            } => format!(
                "ok      {} -> {} ({})",
                contract,
                output.display(),
                stats.describe()
            ),
            Self::Skipped {
                contract,
                artifact,
                reason,
            } => format!("skipped {}: {} ({})", contract, reason, artifact.display()),
            Self::Failed { contract, error } => format!("FAILED  {}: {}", contract, error),
        }
    }
}

/// Ordered outcomes of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<ContractOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<ContractOutcome>) -> Self {
        Self { outcomes }
    }

    /// Outcomes in the order contracts were configured
    pub fn outcomes(&self) -> &[ContractOutcome] {
        &self.outcomes
    }

    pub fn get(&self, contract: &str) -> Option<&ContractOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.contract().as_str() == contract)
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Every configured contract failed
    pub fn is_total_failure(&self) -> bool {
        !self.outcomes.is_empty() && self.failed() == self.total()
    }

    /// Process exit code for this report
    ///
    /// Permissive mode only signals a run where every contract failed.
    /// Strict mode also signals any failure or skip.
    pub fn exit_code(&self, strict: bool) -> u8 {
        if self.is_total_failure() {
            return 1;
        }
        if strict && (self.failed() > 0 || self.skipped() > 0) {
            return 1;
        }
        0
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} contract{}: {} succeeded, {} skipped, {} failed",
            self.total(),
            if self.total() == 1 { "" } else { "s" },
            self.succeeded(),
            self.skipped(),
            self.failed()
        )
    }
}
