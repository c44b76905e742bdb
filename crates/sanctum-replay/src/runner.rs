use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use sanctum_advisor::{Advisor, AdvisorError, AdvisorSettings, TickOutcome};
use sanctum_core::knowledge::ContextId;
use sanctum_core::model::coordinate::Coordinate;
use sanctum_core::profile::ProfileSet;
use sanctum_core::snapshot::FloorSnapshot;
use sanctum_core::weight::BuildSignal;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ReplayConfig, ResolvedPaths};

/// Feeds recorded floor snapshots through an [`Advisor`], one tick per line.
pub struct ReplayRunner {
    config: ReplayConfig,
    paths: ResolvedPaths,
    advisor: Advisor,
}

/// Totals reported after a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub ticks: usize,
    pub refreshed: usize,
    pub hidden: usize,
    pub context_resets: usize,
    pub contexts: usize,
    pub known_rooms: usize,
    pub final_route: Vec<Coordinate>,
    pub final_score: Option<f64>,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct TickRow<'a> {
    run_id: &'a str,
    tick: usize,
    context_id: ContextId,
    outcome: &'static str,
    profile: &'a str,
    known_rooms: usize,
    route: &'a [Coordinate],
    highlight: Vec<Coordinate>,
    route_score: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<AnnotationRow>,
}

#[derive(Debug, Serialize)]
struct AnnotationRow {
    coordinate: Coordinate,
    score: f64,
    text: String,
}

impl ReplayRunner {
    /// Load profiles and build the advisor. Fails on an unknown profile name
    /// before any snapshot is read.
    pub fn new(config: ReplayConfig, paths: ResolvedPaths) -> Result<Self, RunnerError> {
        let mut profiles = ProfileSet::builtin();
        if let Some(path) = paths.profiles.as_ref() {
            profiles.extend(load_profiles(path)?);
        }
        let settings = AdvisorSettings::new(config.profile.clone()).with_debug(config.debug);
        let advisor = Advisor::new(settings, profiles)?;
        Ok(Self {
            config,
            paths,
            advisor,
        })
    }

    pub fn advisor(&self) -> &Advisor {
        &self.advisor
    }

    pub fn run(&mut self) -> Result<ReplaySummary, RunnerError> {
        ensure_parent(self.paths.jsonl.parent())?;
        ensure_parent(self.paths.summary_md.parent())?;

        let input = File::open(&self.paths.snapshots).map_err(|source| RunnerError::Input {
            path: self.paths.snapshots.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(File::create(&self.paths.jsonl)?);

        let mut summary = ReplaySummary {
            ticks: 0,
            refreshed: 0,
            hidden: 0,
            context_resets: 0,
            contexts: 0,
            known_rooms: 0,
            final_route: Vec::new(),
            final_score: None,
            jsonl_path: self.paths.jsonl.clone(),
            summary_path: self.paths.summary_md.clone(),
        };
        let mut contexts = BTreeSet::new();

        for (index, line) in BufReader::new(input).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut snapshot =
                FloorSnapshot::from_json(&line).map_err(|source| RunnerError::Snapshot {
                    line: index + 1,
                    source,
                })?;
            if let Some(evasion) = self.config.evasion_rating {
                snapshot.build = BuildSignal::with_evasion(evasion);
            }

            let outcome = self.advisor.tick(&snapshot);
            contexts.insert(snapshot.context_id);
            match outcome {
                TickOutcome::Refreshed => summary.refreshed += 1,
                TickOutcome::Hidden => summary.hidden += 1,
                TickOutcome::ContextReset => summary.context_resets += 1,
            }

            self.log_tick(summary.ticks, &snapshot, outcome);
            self.write_row(&mut writer, summary.ticks, snapshot.context_id, outcome)?;
            summary.ticks += 1;
        }
        writer.flush()?;

        let route = self.advisor.route();
        summary.contexts = contexts.len();
        summary.known_rooms = self.advisor.store().len();
        summary.final_route = route.coordinates().to_vec();
        summary.final_score = (!route.is_empty()).then(|| route.score());

        write_markdown(&self.paths.summary_md, &self.config, self.advisor.active_profile(), &summary)?;
        Ok(summary)
    }

    fn write_row(
        &self,
        writer: &mut BufWriter<File>,
        tick: usize,
        context_id: ContextId,
        outcome: TickOutcome,
    ) -> Result<(), RunnerError> {
        let route = self.advisor.route();
        let row = TickRow {
            run_id: &self.config.run_id,
            tick,
            context_id,
            outcome: outcome.label(),
            profile: self.advisor.active_profile(),
            known_rooms: self.advisor.store().len(),
            route: route.coordinates(),
            highlight: self.advisor.highlight_path(),
            route_score: (!route.is_empty()).then(|| route.score()),
            annotations: self
                .advisor
                .debug_annotations()
                .into_iter()
                .map(|annotation| AnnotationRow {
                    coordinate: annotation.coordinate,
                    score: annotation.score,
                    text: annotation.text,
                })
                .collect(),
        };
        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn log_tick(&self, tick: usize, snapshot: &FloorSnapshot, outcome: TickOutcome) {
        if !self.config.logging.enable_structured || !tracing::enabled!(Level::INFO) {
            return;
        }
        let route = self.advisor.route();
        event!(
            target: "sanctum_replay::tick",
            Level::INFO,
            run_id = %self.config.run_id,
            tick = tick as u64,
            context_id = snapshot.context_id,
            visible = snapshot.visible,
            outcome = outcome.label(),
            known_rooms = self.advisor.store().len() as u64,
            route_len = route.len() as u64,
            route_score = route.score(),
        );
    }
}

fn load_profiles(path: &Path) -> Result<ProfileSet, RunnerError> {
    let raw = fs::read_to_string(path).map_err(|source| RunnerError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    ProfileSet::from_json(&raw).map_err(|source| RunnerError::Profiles {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_markdown(
    path: &Path,
    config: &ReplayConfig,
    profile: &str,
    summary: &ReplaySummary,
) -> Result<(), RunnerError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "# Replay `{}`", config.run_id)?;
    writeln!(out)?;
    writeln!(out, "| Metric | Value |")?;
    writeln!(out, "| --- | --- |")?;
    writeln!(out, "| Profile | {profile} |")?;
    writeln!(out, "| Ticks | {} |", summary.ticks)?;
    writeln!(out, "| Refreshed | {} |", summary.refreshed)?;
    writeln!(out, "| Hidden | {} |", summary.hidden)?;
    writeln!(out, "| Context resets | {} |", summary.context_resets)?;
    writeln!(out, "| Trial contexts | {} |", summary.contexts)?;
    writeln!(out, "| Known rooms | {} |", summary.known_rooms)?;
    writeln!(out)?;
    writeln!(out, "## Final route")?;
    writeln!(out)?;
    if summary.final_route.is_empty() {
        writeln!(out, "_No route._")?;
    } else {
        let steps = summary
            .final_route
            .iter()
            .map(|coordinate| coordinate.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        writeln!(out, "{steps}")?;
        if let Some(score) = summary.final_score {
            writeln!(out)?;
            writeln!(out, "Score: {score}")?;
        }
    }
    out.flush()?;
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to read {path:?}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot on line {line} is malformed: {source}")]
    Snapshot {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse profiles {path:?}: {source}")]
    Profiles {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize report row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
}
