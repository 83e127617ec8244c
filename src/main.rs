mod cli;
mod logging;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, SweepArgs};
use colored::*;
use dotenv::dotenv;
use flavor_sweep::config::load_configuration;
use flavor_sweep::{
    ConsolePrompter, KalturaClient, SweepEngine, SweepOptions, SweepOutcome, SweepReport,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Sweep(sweep_args)) => run_sweep(args.config.as_deref(), &sweep_args).await,
        Some(Commands::PrintConfig) => print_config(args.config.as_deref()),
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run_sweep(config_path: Option<&Path>, args: &SweepArgs) -> Result<()> {
    let config = load_configuration(config_path).context("Error loading configuration")?;
    config.validate()?;

    let client = KalturaClient::new(
        &config.service_url,
        config.session()?,
        config.request_timeout(),
    )?;
    let options = SweepOptions::from_config(&config, !args.confirm);
    let mut engine = SweepEngine::new(client, ConsolePrompter::new(), options);

    let report = engine.run().await;
    print_summary(&report, !args.confirm);

    if let SweepOutcome::Halted { page_index, reason } = &report.outcome {
        anyhow::bail!("sweep halted on page {}: {}", page_index, reason);
    }
    Ok(())
}

fn print_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_configuration(config_path).context("Error loading configuration")?;
    println!("Configuration: {:#?}", config.redacted());
    Ok(())
}

fn print_summary(report: &SweepReport, dry_run: bool) {
    println!();
    info!(
        "Swept {} pages, {} entities ({} with a single flavor) in {}",
        report.pages_fetched,
        report.entities_checked,
        report.entities_skipped,
        format!("{:.2}s", report.duration.as_secs_f64()).green(),
    );
    info!(
        "{} source flavors found, {} declined, {} deleted, {} simulated",
        format!("{}", report.candidates).cyan(),
        format!("{}", report.declined).yellow(),
        format!("{}", report.deleted).red(),
        format!("{}", report.simulated).yellow(),
    );
    if dry_run && report.simulated > 0 {
        info!("Dry run only; rerun with --confirm to delete the approved flavors");
    }
}
