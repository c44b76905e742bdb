use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const IRON_MANACLES: &str = "Iron Manacles";
/// Evasion rating above which losing evasion is a real threat.
pub const EVASION_THRESHOLD: u32 = 6_000;
pub const HIGH_EVASION_PENALTY: f64 = -5_000.0;

/// Player build statistics read from the host each refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildSignal {
    #[serde(default)]
    pub evasion_rating: u32,
}

impl BuildSignal {
    pub const fn with_evasion(evasion_rating: u32) -> Self {
        Self { evasion_rating }
    }
}

/// Replacement for a modifier's static weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierOverride {
    pub weight: f64,
    pub note: &'static str,
}

pub type OverrideFn = fn(&BuildSignal) -> Option<ModifierOverride>;

/// Build-dependent weights keyed by modifier name. A registered strategy that
/// returns `None` falls through to the profile's static weight.
#[derive(Clone, Default)]
pub struct ModifierOverrides {
    strategies: HashMap<String, OverrideFn>,
}

impl ModifierOverrides {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut overrides = Self::empty();
        overrides.register(IRON_MANACLES, iron_manacles);
        overrides
    }

    pub fn register(&mut self, modifier: impl Into<String>, strategy: OverrideFn) {
        self.strategies.insert(modifier.into(), strategy);
    }

    pub fn resolve(&self, modifier: &str, signal: &BuildSignal) -> Option<ModifierOverride> {
        self.strategies
            .get(modifier)
            .and_then(|strategy| strategy(signal))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl fmt::Debug for ModifierOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ModifierOverrides")
            .field("modifiers", &names)
            .finish()
    }
}

fn iron_manacles(signal: &BuildSignal) -> Option<ModifierOverride> {
    if signal.evasion_rating > EVASION_THRESHOLD {
        Some(ModifierOverride {
            weight: HIGH_EVASION_PENALTY,
            note: "high evasion build",
        })
    } else {
        Some(ModifierOverride {
            weight: 0.0,
            note: "evasion not relied on",
        })
    }
}
