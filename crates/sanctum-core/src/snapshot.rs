use serde::{Deserialize, Serialize};

use crate::knowledge::ContextId;
use crate::model::coordinate::Coordinate;
use crate::model::floor::Floor;
use crate::model::room::Room;
use crate::weight::BuildSignal;

/// Everything the host reported on one refresh, in its own inbound layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSnapshot {
    pub context_id: ContextId,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub current: Option<Coordinate>,
    pub rooms: Vec<Vec<Option<Room>>>,
    /// `connections[layer][index]` lists the rooms of `layer + 1` leading in.
    #[serde(default)]
    pub connections: Vec<Vec<Vec<usize>>>,
    #[serde(default)]
    pub build: BuildSignal,
}

fn default_visible() -> bool {
    true
}

impl FloorSnapshot {
    /// Rebuild the floor, deriving connectivity counts from the layout.
    pub fn floor(&self) -> Floor {
        Floor::from_inbound(self.rooms.clone(), &self.connections)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::room::RoomObservation;

    const TWO_LAYER: &str = r#"{
        "context_id": 99,
        "current": { "layer": 1, "index": 0 },
        "rooms": [
            [ { "kind": "Chalice", "reward": "Gold Key" }, null ],
            [ { "modifier": "Death Toll" } ]
        ],
        "connections": [ [ [0], [] ] ],
        "build": { "evasion_rating": 6500 }
    }"#;

    #[test]
    fn parses_host_snapshot() {
        let snapshot = FloorSnapshot::from_json(TWO_LAYER).unwrap();
        assert_eq!(snapshot.context_id, 99);
        assert!(snapshot.visible);
        assert_eq!(snapshot.current, Some(Coordinate::new(1, 0)));
        assert_eq!(snapshot.build.evasion_rating, 6500);

        let floor = snapshot.floor();
        assert_eq!(floor.layer_count(), 2);
        assert!(!floor.contains(Coordinate::new(0, 1)));
        let entrance = floor.room(Coordinate::new(1, 0)).unwrap();
        assert_eq!(entrance.observation.modifier(), Some("Death Toll"));
        assert_eq!(entrance.connections, 1);
        let exits: Vec<_> = floor.adjacency().neighbors(Coordinate::new(1, 0)).collect();
        assert_eq!(exits, vec![Coordinate::new(0, 0)]);
    }

    #[test]
    fn optional_fields_default() {
        let snapshot = FloorSnapshot::from_json(r#"{"context_id": 1, "rooms": []}"#).unwrap();
        assert!(snapshot.visible);
        assert_eq!(snapshot.current, None);
        assert!(snapshot.connections.is_empty());
        assert_eq!(snapshot.build, BuildSignal::default());
        assert_eq!(snapshot.floor().layer_count(), 0);
    }

    #[test]
    fn json_roundtrip_keeps_rooms() {
        let snapshot = FloorSnapshot {
            context_id: 5,
            visible: false,
            current: None,
            rooms: vec![vec![Some(Room::new(
                RoomObservation::new().with_kind("Escape"),
                0,
            ))]],
            connections: vec![vec![vec![]]],
            build: BuildSignal::with_evasion(10),
        };
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"kind\":\"Escape\""));
        assert_eq!(FloorSnapshot::from_json(&json).unwrap(), snapshot);
    }
}
