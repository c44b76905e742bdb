use std::path::PathBuf;

use clap::Parser;

use sanctum_replay::config::ReplayConfig;
use sanctum_replay::logging::init_logging;
use sanctum_replay::runner::ReplayRunner;

/// Replays recorded trial-map snapshots through the route advisor.
#[derive(Debug, Parser)]
#[command(
    name = "sanctum-replay",
    author,
    version,
    about = "Offline replay harness for the sanctum route advisor"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "replay/replay.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the scoring profile.
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Include per-room score breakdowns in the report rows.
    #[arg(long)]
    debug: bool,

    /// Replace the recorded evasion rating in every snapshot.
    #[arg(long, value_name = "RATING")]
    evasion_rating: Option<u32>,

    /// Exit after validating the configuration (nothing is replayed).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ReplayConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(profile) = cli.profile {
        config.profile = profile;
    }

    if cli.debug {
        config.debug = true;
    }

    if let Some(evasion) = cli.evasion_rating {
        config.evasion_rating = Some(evasion);
    }

    config.validate()?;

    let paths = config.resolved_paths();
    let run_id = config.run_id.clone();
    println!(
        "Loaded configuration '{run_id}' (profile {}, snapshots from {})",
        config.profile,
        paths.snapshots.display()
    );

    let logging_guard = init_logging(&config.logging, &paths)?;
    let mut runner = ReplayRunner::new(config, paths)?;

    if cli.validate_only {
        println!("Validation-only mode: replay skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Replay complete for '{run_id}': {} ticks ({} refreshed, {} hidden, {} context resets) → {}",
        summary.ticks,
        summary.refreshed,
        summary.hidden,
        summary.context_resets,
        summary.jsonl_path.display()
    );
    println!("Summary: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
