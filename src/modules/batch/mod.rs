//! Batch driver
//!
//! Runs resolve -> extract -> write for every configured contract and
//! records one outcome per contract. A contract's failure never stops the
//! remaining contracts from being processed.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use crate::domain::{BatchReport, ContractName, ContractOutcome, ExportError, SkipReason};
use crate::infrastructure::abi::{
    AbiExtractor, AbiWriter, ArtifactResolver, OutputDir, DEFAULT_ARTIFACTS_ROOT,
    DEFAULT_SOURCE_EXTENSION,
};

/// Default output directory for exported ABIs
pub const DEFAULT_OUTPUT_DIR: &str = "abis";

/// Everything a batch run needs
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Contracts to export, in reporting order
    pub contracts: Vec<ContractName>,
    /// Build-output root holding `<name>.<ext>/<name>.json`
    pub artifacts_root: PathBuf,
    pub source_extension: String,
    pub output_dir: PathBuf,
    /// Reject ABIs that do not parse as Ethereum JSON ABIs
    pub validate_abi: bool,
    pub trailing_newline: bool,
    /// Worker threads; 1 runs sequentially, 0 uses every core
    pub jobs: usize,
}

impl BatchConfig {
    pub fn new(contracts: Vec<ContractName>) -> Self {
        Self {
            contracts,
            artifacts_root: PathBuf::from(DEFAULT_ARTIFACTS_ROOT),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            validate_abi: false,
            trailing_newline: true,
            jobs: 1,
        }
    }
}

/// Drives the per-contract pipeline
#[derive(Debug, Clone)]
pub struct BatchDriver {
    resolver: ArtifactResolver,
    extractor: AbiExtractor,
    writer: AbiWriter,
    output_dir: PathBuf,
    jobs: usize,
}

impl BatchDriver {
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            resolver: ArtifactResolver::new(&config.artifacts_root, &config.source_extension),
            extractor: AbiExtractor::new().validating(config.validate_abi),
            writer: AbiWriter::new().trailing_newline(config.trailing_newline),
            output_dir: config.output_dir.clone(),
            jobs: config.jobs,
        }
    }

    /// Build a driver and run it over the configured contracts
    pub fn run_config(config: &BatchConfig) -> BatchReport {
        Self::new(config).run(&config.contracts)
    }

    /// Process `contracts` in order and report every outcome
    pub fn run(&self, contracts: &[ContractName]) -> BatchReport {
        let started = Instant::now();

        // Established once, before any contract is written
        let output = OutputDir::prepare(&self.output_dir);
        if let Err(err) = &output {
            warn!(error = %err, "output directory unavailable; extracted ABIs cannot be written");
        }

        let outcomes = if self.jobs == 1 || contracts.len() < 2 {
            contracts
                .iter()
                .map(|contract| self.process(contract, &output))
                .collect()
        } else {
            self.process_parallel(contracts, &output)
        };

        let report = BatchReport::new(outcomes);
        info!(
            total = report.total(),
            succeeded = report.succeeded(),
            skipped = report.skipped(),
            failed = report.failed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch finished"
        );
        report
    }

    fn process_parallel(
        &self,
        contracts: &[ContractName],
        output: &Result<OutputDir, ExportError>,
    ) -> Vec<ContractOutcome> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|index| format!("abisync-{}", index))
            .build();

        match pool {
            Ok(pool) => pool.install(|| {
                contracts
                    .par_iter()
                    .map(|contract| self.process(contract, output))
                    .collect()
            }),
            Err(err) => {
                warn!(error = %err, "failed to start worker pool; running sequentially");
                contracts
                    .iter()
                    .map(|contract| self.process(contract, output))
                    .collect()
            }
        }
    }

    /// Resolve -> extract -> write for a single contract
    fn process(
        &self,
        contract: &ContractName,
        output: &Result<OutputDir, ExportError>,
    ) -> ContractOutcome {
        let span = info_span!("contract", contract = %contract);
        let _guard = span.enter();

        let artifact = self.resolver.resolve(contract);
        debug!(path = %artifact.display(), "resolved artifact");

        let abi = match self.extractor.extract(&artifact) {
            Ok(abi) => abi,
            Err(ExportError::NotFound { path }) => {
                info!(path = %path.display(), "artifact not found, skipping");
                return ContractOutcome::Skipped {
                    contract: contract.clone(),
                    artifact: path,
                    reason: SkipReason::NotFound,
                };
            }
            Err(error) => {
                warn!(%error, "extraction failed");
                return ContractOutcome::Failed {
                    contract: contract.clone(),
                    error,
                };
            }
        };

        let out = match output {
            Ok(out) => out,
            Err(err) => {
                return ContractOutcome::Failed {
                    contract: contract.clone(),
                    error: err.duplicate(),
                }
            }
        };

        match self.writer.write(out, contract, &abi) {
            Ok(path) => {
                info!(path = %path.display(), "exported ABI");
                ContractOutcome::Succeeded {
                    contract: contract.clone(),
                    output: path,
                    stats: abi.stats(),
                }
            }
            Err(error) => {
                warn!(%error, "write failed");
                ContractOutcome::Failed {
                    contract: contract.clone(),
                    error,
                }
            }
        }
    }
}
