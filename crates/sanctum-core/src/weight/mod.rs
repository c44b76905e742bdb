//! Room desirability scoring.
//!
//! A room's weight is the base constant plus one term per known attribute and
//! a connectivity term. Terms are recorded in a breakdown for debug overlays.

mod grid;
mod overrides;

use core::fmt;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::knowledge::{KnowledgeStore, RoomRecord};
use crate::model::coordinate::Coordinate;
use crate::model::floor::Floor;
use crate::profile::ScoringProfile;

pub use grid::WeightGrid;
pub use overrides::{
    BuildSignal, EVASION_THRESHOLD, HIGH_EVASION_PENALTY, IRON_MANACLES, ModifierOverride,
    ModifierOverrides, OverrideFn,
};

/// Offset keeping every weight far from zero so that penalties and bonuses
/// compare on the same side.
pub const BASE_WEIGHT: f64 = 1_000_000.0;
/// Bonus per outgoing edge beyond the first.
pub const CONNECTION_BONUS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTerm {
    pub label: String,
    pub value: f64,
}

/// Ordered contributions to a room's score. Display only.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    terms: Vec<ScoreTerm>,
}

impl ScoreBreakdown {
    fn push(&mut self, label: impl Into<String>, value: f64) {
        self.terms.push(ScoreTerm {
            label: label.into(),
            value,
        });
    }

    pub fn terms(&self) -> &[ScoreTerm] {
        &self.terms
    }

    pub fn total(&self) -> f64 {
        self.terms.iter().map(|term| term.value).sum()
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, term) in self.terms.iter().enumerate() {
            if position > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}: {}", term.label, term.value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomScore {
    pub value: f64,
    pub breakdown: ScoreBreakdown,
}

/// Weights and breakdowns for every present room of a floor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoredFloor {
    pub weights: WeightGrid,
    pub scores: BTreeMap<Coordinate, RoomScore>,
}

#[derive(Debug, Clone)]
pub struct WeightEvaluator {
    overrides: ModifierOverrides,
}

impl Default for WeightEvaluator {
    fn default() -> Self {
        Self::new(ModifierOverrides::standard())
    }
}

impl WeightEvaluator {
    pub fn new(overrides: ModifierOverrides) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &ModifierOverrides {
        &self.overrides
    }

    pub fn overrides_mut(&mut self) -> &mut ModifierOverrides {
        &mut self.overrides
    }

    /// Score one room. An unobserved room scores exactly [`BASE_WEIGHT`].
    pub fn score(
        &self,
        record: Option<&RoomRecord>,
        profile: &ScoringProfile,
        signal: &BuildSignal,
    ) -> RoomScore {
        let mut breakdown = ScoreBreakdown::default();
        let mut value = BASE_WEIGHT;
        breakdown.push("Base", BASE_WEIGHT);

        let Some(record) = record else {
            return RoomScore { value, breakdown };
        };

        if let Some(kind) = record.kind() {
            if let Some(weight) = profile.room_kind_weight(kind) {
                value += weight;
                breakdown.push(format!("Room ({kind})"), weight);
            }
        }

        if let Some(modifier) = record.modifier() {
            if let Some(replacement) = self.overrides.resolve(modifier, signal) {
                value += replacement.weight;
                breakdown.push(
                    format!("Affliction ({modifier}, {})", replacement.note),
                    replacement.weight,
                );
            } else if let Some(weight) = profile.modifier_weight(modifier) {
                value += weight;
                breakdown.push(format!("Affliction ({modifier})"), weight);
            }
        }

        if let Some(reward) = record.reward() {
            if let Some(weight) = profile.reward_weight(reward) {
                value += weight;
                breakdown.push(format!("Reward ({reward})"), weight);
            }
        }

        let connectivity = (record.connections as f64 - 1.0) * CONNECTION_BONUS;
        value += connectivity;
        breakdown.push("Connections", connectivity);

        RoomScore { value, breakdown }
    }

    /// Score every present room of `floor` from what `store` knows about it.
    pub fn score_floor(
        &self,
        store: &KnowledgeStore,
        floor: &Floor,
        profile: &ScoringProfile,
        signal: &BuildSignal,
    ) -> ScoredFloor {
        let mut scored = ScoredFloor::default();
        for (coordinate, _) in floor.rooms() {
            let score = self.score(store.get(coordinate), profile, signal);
            scored.weights.set(coordinate, score.value);
            scored.scores.insert(coordinate, score);
        }
        scored
    }
}
