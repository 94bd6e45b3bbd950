//! Cadence scheduler CLI
//!
//! Entry point for the scheduler demonstrations. Parses CLI arguments
//! and runs the requested scenario, printing its trace line by line.

use clap::Parser;
use sched_cli::{list_scenarios, run_scenario, Cli, CliError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.list {
        for name in list_scenarios() {
            println!("{}", name);
        }
        return Ok(());
    }

    if let Some(name) = cli.scenario {
        match run_scenario(&name, cli.max_depth) {
            Ok(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(CliError::UnknownScenario(name)) => {
                eprintln!("Error: unknown scenario '{}'", name);
                eprintln!("Run 'cadence --list' to see the available scenarios.");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Default: show usage
    println!("Cadence scheduler v0.1.0");
    println!();
    println!("Usage:");
    println!("  cadence --scenario <NAME>   Run a demonstration scenario");
    println!("  cadence --list              List available scenarios");
    println!();
    println!("Run 'cadence --help' for more options.");

    Ok(())
}
