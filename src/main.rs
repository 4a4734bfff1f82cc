use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use abisync::config::{self, Overrides};
use abisync::{write_report, BatchDriver};

/// Exit code for configuration errors; no contract was processed
const EXIT_CONFIG: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "abisync",
    version,
    about = "Copy contract ABIs out of build artifacts for client apps"
)]
struct Args {
    /// Config file (default: ./abisync.toml, or $ABISYNC_CONFIG)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Build-output root holding <name>.<ext>/<name>.json
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Source-unit extension of the artifact directories (e.g. sol)
    #[arg(long)]
    ext: Option<String>,

    /// Output directory for <name>.json ABI files
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Contract to export; repeat to list several. Replaces the configured list
    #[arg(long = "contract", value_name = "NAME")]
    contracts: Vec<String>,

    /// Fail contracts whose `abi` is not a valid Ethereum JSON ABI
    #[arg(long)]
    validate: bool,

    /// Worker threads (1 = sequential, 0 = all cores)
    #[arg(long, short = 'j')]
    jobs: Option<usize>,

    /// Exit non-zero if any contract failed or was skipped
    #[arg(long)]
    strict: bool,

    /// Write a JSON report of the run
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,

    /// Only print the summary line
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

/// Runs the batch; `Err` only for failures before any contract is processed
fn run(args: Args) -> Result<u8> {
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let loaded = config::load(args.config.as_deref())?;

    let overrides = Overrides {
        artifacts_root: args.artifacts,
        source_extension: args.ext,
        output_dir: args.out,
        contracts: args.contracts,
        validate_abi: args.validate,
        jobs: args.jobs,
    };
    let batch = loaded.into_batch_config(&cwd, overrides)?;

    let report = BatchDriver::run_config(&batch);

    if !args.quiet {
        for outcome in report.outcomes() {
            println!("{}", outcome.status_line());
        }
    }
    println!("{}", report);

    let mut code = report.exit_code(args.strict);

    if let Some(path) = args.report {
        let path = config::expand_path(&path, &cwd);
        if let Err(err) = write_report(&path, &report) {
            error!(path = %path.display(), "failed to write report: {err:#}");
            code = code.max(1);
        }
    }

    Ok(code)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("abisync={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
