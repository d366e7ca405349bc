//! Calculator CLI entry point.
//!
//! `calculator <operation> <a> <b>` prints the result, or `Error: <message>`,
//! and exits 0. A wrong number of arguments prints usage and exits 1.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use mathformer_calc::core::transport::{CliTransport, cli::USAGE};
use mathformer_calc::core::{Config, init_logging};
use mathformer_calc::domains::calculator::{BackendSelection, Calculator};

/// Every argument is taken verbatim, so `-5` or `--help` reach the
/// calculator as operands or operation names instead of being read as flags.
#[derive(Parser)]
#[command(name = "calculator")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// `<operation> <a> <b>`
    #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let Some([operation, a, b]) = Args::try_parse()
        .ok()
        .and_then(|parsed| <[String; 3]>::try_from(parsed.args).ok())
    else {
        return usage();
    };

    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging);
    config.log_summary();

    let selection = BackendSelection::resolve(&config.backend).await;
    debug!("Using backend {}", selection.name());

    let cli = CliTransport::new(Calculator::from_selection(&selection));
    println!("{}", cli.evaluate(&operation, &a, &b).await);

    ExitCode::SUCCESS
}

fn usage() -> ExitCode {
    println!("{}", USAGE);
    ExitCode::from(1)
}
