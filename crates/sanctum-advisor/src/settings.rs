use sanctum_core::profile::DEFAULT_PROFILE;

pub const DEBUG_OVERLAY_ENV: &str = "SANCTUM_DEBUG_OVERLAY";
pub const PROFILE_ENV: &str = "SANCTUM_PROFILE";

/// User-facing toggles: which profile scores the floor and whether per-room
/// score breakdowns are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorSettings {
    pub profile: String,
    pub debug: bool,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            debug: false,
        }
    }
}

impl AdvisorSettings {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            ..Self::default()
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let debug = read(DEBUG_OVERLAY_ENV)
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);

        let profile = read(PROFILE_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        Self { profile, debug }
    }
}
