use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

use sanctum_core::profile::DEFAULT_PROFILE;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Replay configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReplayConfig {
    pub run_id: String,
    #[serde(default = "default_profile_name")]
    pub profile: String,
    #[serde(default)]
    pub debug: bool,
    /// JSON file with extra named profiles, merged over the built-in ones.
    #[serde(default)]
    pub profiles_path: Option<String>,
    /// Replaces the build signal recorded in every snapshot.
    #[serde(default)]
    pub evasion_rating: Option<u32>,
    pub input: InputConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReplayConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let mut cfg: ReplayConfig =
            serde_yaml::from_reader(BufReader::new(file)).map_err(|source| {
                ConfigError::Parse {
                    source,
                    path: path_buf.clone(),
                }
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Normalise and check fields without touching the filesystem.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;

        self.profile = self.profile.trim().to_string();
        if self.profile.is_empty() {
            self.profile = default_profile_name();
        }

        if let Some(path) = self.profiles_path.as_ref() {
            if path.trim().is_empty() {
                self.profiles_path = None;
            }
        }

        self.input.validate(&self.run_id)?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown tracing level '{}'", self.logging.tracing_level),
            });
        }
        Ok(())
    }

    pub fn resolved_paths(&self) -> ResolvedPaths {
        ResolvedPaths {
            snapshots: resolve_template(&self.run_id, &self.input.snapshots),
            profiles: self
                .profiles_path
                .as_deref()
                .map(|path| resolve_template(&self.run_id, path)),
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE.to_string()
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InputConfig {
    /// JSONL file with one floor snapshot per line.
    pub snapshots: String,
}

impl InputConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        validate_path("input.snapshots", run_id, &self.snapshots)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        validate_path("outputs.jsonl", run_id, &self.jsonl)?;
        validate_path("outputs.summary_md", run_id, &self.summary_md)?;
        if self.jsonl.trim() == self.summary_md.trim() {
            return Err(ValidationError::InvalidField {
                field: "outputs".to_string(),
                message: "jsonl and summary_md must be different files".to_string(),
            });
        }
        Ok(())
    }
}

/// Structured logging is off unless asked for.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_path(field: &str, run_id: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: field.to_string(),
            message: "path must not be empty".to_string(),
        });
    }
    if resolve_template(run_id, value).components().count() == 0 {
        return Err(ValidationError::InvalidField {
            field: field.to_string(),
            message: "resolved path is invalid".to_string(),
        });
    }
    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.trim().replace("{run_id}", run_id))
}

/// Input and output locations with `{run_id}` substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub snapshots: PathBuf,
    pub profiles: Option<PathBuf>,
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
