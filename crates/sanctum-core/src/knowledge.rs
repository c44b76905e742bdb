//! Best-known room facts accumulated across refreshes of the same run.
//!
//! The host only reveals part of a room at a time (smoke afflictions hide
//! rewards, far layers hide everything), so each refresh is merged into the
//! stored record attribute by attribute. A revealed attribute is never lost to
//! a later refresh that hides it again.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::coordinate::Coordinate;
use crate::model::floor::Floor;
use crate::model::room::{RoomObservation, revealed};

/// Identifier of the run instance the stored facts belong to.
pub type ContextId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoomRecord {
    pub kind: Option<String>,
    pub modifier: Option<String>,
    pub reward: Option<String>,
    pub connections: usize,
}

impl RoomRecord {
    pub fn seeded(observation: &RoomObservation, connections: usize) -> Self {
        Self {
            kind: observation.kind().map(str::to_string),
            modifier: observation.modifier().map(str::to_string),
            reward: observation.reward().map(str::to_string),
            connections,
        }
    }

    /// Merge a later observation. Each attribute is replaced only when the
    /// observation reveals it; the connectivity count always follows the
    /// latest layout.
    pub fn merge(&mut self, observation: &RoomObservation, connections: usize) {
        absorb(&mut self.kind, &observation.kind);
        absorb(&mut self.modifier, &observation.modifier);
        absorb(&mut self.reward, &observation.reward);
        self.connections = connections;
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }

    pub fn reward(&self) -> Option<&str> {
        self.reward.as_deref()
    }
}

fn absorb(slot: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = revealed(incoming) {
        *slot = Some(value.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    context: Option<ContextId>,
    rooms: BTreeMap<Coordinate, RoomRecord>,
}

impl KnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &mut self,
        coordinate: Coordinate,
        observation: &RoomObservation,
        connections: usize,
    ) {
        self.rooms
            .entry(coordinate)
            .and_modify(|record| record.merge(observation, connections))
            .or_insert_with(|| RoomRecord::seeded(observation, connections));
    }

    /// Merge every present room of a refresh. Returns the number of rooms seen.
    pub fn observe_floor(&mut self, floor: &Floor) -> usize {
        let mut seen = 0usize;
        for (coordinate, room) in floor.rooms() {
            self.update(coordinate, &room.observation, room.connections);
            seen += 1;
        }
        seen
    }

    pub fn get(&self, coordinate: Coordinate) -> Option<&RoomRecord> {
        self.rooms.get(&coordinate)
    }

    /// Clear everything when `context` differs from the tracked one. Returns
    /// whether a reset happened.
    pub fn reset(&mut self, context: ContextId) -> bool {
        if self.context == Some(context) {
            return false;
        }
        self.context = Some(context);
        self.rooms.clear();
        true
    }

    /// A fresh store adopts the first id it is asked about and reports it as
    /// different.
    pub fn is_same_context(&mut self, context: ContextId) -> bool {
        match self.context {
            Some(current) => current == context,
            None => {
                self.context = Some(context);
                false
            }
        }
    }

    pub fn context(&self) -> Option<ContextId> {
        self.context
    }

    pub fn has_data(&self) -> bool {
        !self.rooms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &RoomRecord)> + '_ {
        self.rooms.iter().map(|(coordinate, record)| (*coordinate, record))
    }
}
