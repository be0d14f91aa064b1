//! Endless CLI
//!
//! Runs scripted infinite scroll sessions against a simulated container and
//! validates config files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use endless_scroll::headless::scenario::{Scenario, ScenarioReport};
use endless_scroll::InfiniteScrollConfig;
use tracing_subscriber::EnvFilter;

/// Infinite scroll scenario runner
#[derive(Parser, Debug)]
#[command(name = "endless")]
#[command(about = "Run headless infinite scroll scenarios and check config files")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON scenario and report the final state
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate an infinite scroll config file
    Check {
        /// TOML config file
        config: PathBuf,
    },

    /// Print the default config as TOML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run { scenario, json } => run(&scenario, json),
        Command::Check { config } => check(&config),
        Command::Defaults => {
            let text = InfiniteScrollConfig::default()
                .to_toml()
                .context("Failed to render default config")?;
            print!("{text}");
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(path: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::from_path(path)
        .with_context(|| format!("Failed to load scenario {}", path.display()))?;
    tracing::info!(steps = scenario.steps.len(), "running {}", path.display());

    let report = scenario
        .run()
        .with_context(|| format!("Scenario {} failed", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let config = InfiniteScrollConfig::load(path)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    tracing::info!("{} is valid", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}

fn print_report(report: &ScenarioReport) {
    println!("steps run:      {}", report.steps_run);
    println!("handler calls:  {}", report.handler_calls);
    println!("loading:        {}", report.loading);
    println!("content height: {}", report.content_height);
    println!("content offset: {}", report.content_offset.y);
    println!("bottom inset:   {}", report.content_inset.bottom);
    for transition in &report.transitions {
        println!("  {transition}");
    }
}
