use core::fmt;
use serde::{Deserialize, Serialize};

/// Position of a room: `layer` counts down towards the terminal layer 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub layer: usize,
    pub index: usize,
}

impl Coordinate {
    pub const fn new(layer: usize, index: usize) -> Self {
        Self { layer, index }
    }

    /// Layer this room's outgoing edges lead into, if any.
    pub const fn inner_layer(self) -> Option<usize> {
        self.layer.checked_sub(1)
    }

    pub const fn is_terminal(self) -> bool {
        self.layer == 0
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.layer, self.index)
    }
}
