//! Command-line argument definitions

use clap::Parser;

/// Command-line arguments for the cadence binary.
#[derive(Debug, Parser)]
#[command(
    name = "cadence",
    version,
    about = "Deterministic cooperative scheduler demonstrations"
)]
pub struct Cli {
    /// Name of the scenario to run
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// List the available scenarios
    #[arg(long)]
    pub list: bool,

    /// Maximum call stack depth for the scheduler
    #[arg(long, default_value_t = scheduler::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}
