//! Named scoring profiles.
//!
//! A profile is an immutable set of weight tables. Profiles are shared behind
//! `Arc` so that switching the active profile only swaps a reference.

mod builtin;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use builtin::{DEFAULT_PROFILE, NO_HIT_PROFILE, default_profile, no_hit_profile};

/// Weight tables keyed by room kind, modifier and reward name. Missing keys
/// weigh zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringProfile {
    #[serde(default)]
    pub room_kind_weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub modifier_weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub reward_weights: BTreeMap<String, f64>,
}

impl ScoringProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_room_kind(mut self, kind: impl Into<String>, weight: f64) -> Self {
        self.room_kind_weights.insert(kind.into(), weight);
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>, weight: f64) -> Self {
        self.modifier_weights.insert(modifier.into(), weight);
        self
    }

    pub fn with_reward(mut self, reward: impl Into<String>, weight: f64) -> Self {
        self.reward_weights.insert(reward.into(), weight);
        self
    }

    pub fn room_kind_weight(&self, kind: &str) -> Option<f64> {
        self.room_kind_weights.get(kind).copied()
    }

    pub fn modifier_weight(&self, modifier: &str) -> Option<f64> {
        self.modifier_weights.get(modifier).copied()
    }

    pub fn reward_weight(&self, reward: &str) -> Option<f64> {
        self.reward_weights.get(reward).copied()
    }

    fn from_tables(
        room_kinds: &[(&str, f64)],
        modifiers: &[(&str, f64)],
        rewards: &[(&str, f64)],
    ) -> Self {
        let table = |entries: &[(&str, f64)]| {
            entries
                .iter()
                .map(|(key, weight)| (key.to_string(), *weight))
                .collect::<BTreeMap<_, _>>()
        };
        Self {
            room_kind_weights: table(room_kinds),
            modifier_weights: table(modifiers),
            reward_weights: table(rewards),
        }
    }
}

/// Profiles addressable by name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "BTreeMap<String, ScoringProfile>")]
pub struct ProfileSet {
    profiles: BTreeMap<String, Arc<ScoringProfile>>,
}

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The profiles shipped with the advisor.
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.insert(DEFAULT_PROFILE, default_profile());
        set.insert(NO_HIT_PROFILE, no_hit_profile());
        set
    }

    /// Profiles from a JSON object of `name -> profile`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add or replace a profile. Holders of the previous `Arc` keep their copy.
    pub fn insert(&mut self, name: impl Into<String>, profile: ScoringProfile) {
        self.profiles.insert(name.into(), Arc::new(profile));
    }

    /// Add every profile of `other`, replacing same-named entries.
    pub fn extend(&mut self, other: ProfileSet) {
        self.profiles.extend(other.profiles);
    }

    pub fn get(&self, name: &str) -> Option<Arc<ScoringProfile>> {
        self.profiles.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl From<BTreeMap<String, ScoringProfile>> for ProfileSet {
    fn from(profiles: BTreeMap<String, ScoringProfile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|(name, profile)| (name, Arc::new(profile)))
                .collect(),
        }
    }
}
