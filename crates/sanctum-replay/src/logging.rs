use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedPaths};

const ADVISOR_TARGET: &str = "sanctum_advisor";
const REPLAY_TARGET: &str = "sanctum_replay";

/// Keeps the non-blocking writer flushing until dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Install a JSON subscriber writing `telemetry.jsonl` beside the summary.
/// Does nothing unless structured logging is enabled.
pub fn init_logging(logging: &LoggingConfig, paths: &ResolvedPaths) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_dir = paths
        .summary_md
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&telemetry_dir).with_context(|| {
        format!(
            "creating telemetry directory at {}",
            telemetry_dir.display()
        )
    })?;

    let telemetry_path = telemetry_dir.join("telemetry.jsonl");
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A global subscriber may already be installed by an earlier run in the same process.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

/// The configured level everywhere, with the advisor's route and context
/// targets kept at debug or finer so every recompute lands in the log.
fn default_directives(level: Level) -> String {
    let advisor = std::cmp::max(level, Level::DEBUG);
    format!(
        "{level},{ADVISOR_TARGET}={advisor},{REPLAY_TARGET}={level}",
        level = level.as_str().to_ascii_lowercase(),
        advisor = advisor.as_str().to_ascii_lowercase(),
    )
}
