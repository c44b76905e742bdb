use serde::{Deserialize, Serialize};

/// Screen-space anchor of a room. The core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f32,
    pub y: f32,
}

impl ScreenPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What a single refresh reveals about a room. Every attribute may be hidden.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoomObservation {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub modifier: Option<String>,
    #[serde(default)]
    pub reward: Option<String>,
}

impl RoomObservation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    pub fn with_reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = Some(reward.into());
        self
    }

    pub fn kind(&self) -> Option<&str> {
        revealed(&self.kind)
    }

    pub fn modifier(&self) -> Option<&str> {
        revealed(&self.modifier)
    }

    pub fn reward(&self) -> Option<&str> {
        revealed(&self.reward)
    }

    /// True when nothing about the room is revealed.
    pub fn is_blank(&self) -> bool {
        self.kind().is_none() && self.modifier().is_none() && self.reward().is_none()
    }
}

/// Empty strings count as hidden.
pub(crate) fn revealed(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.trim().is_empty())
}

/// A room slot as the graph provider reports it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Room {
    #[serde(flatten)]
    pub observation: RoomObservation,
    /// Number of edges towards the next inner layer.
    #[serde(default)]
    pub connections: usize,
    #[serde(default)]
    pub position: Option<ScreenPosition>,
}

impl Room {
    pub fn new(observation: RoomObservation, connections: usize) -> Self {
        Self {
            observation,
            connections,
            position: None,
        }
    }

    pub fn hidden(connections: usize) -> Self {
        Self::new(RoomObservation::new(), connections)
    }

    pub fn at(mut self, position: ScreenPosition) -> Self {
        self.position = Some(position);
        self
    }
}
