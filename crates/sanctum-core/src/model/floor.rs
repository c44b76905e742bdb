use super::coordinate::Coordinate;
use super::room::Room;

/// Outbound edges of a layered floor: `links[layer][index]` lists the indices
/// of `layer - 1` reachable from that room. Layer 0 never has edges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Adjacency {
    links: Vec<Vec<Vec<usize>>>,
}

impl Adjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the outbound form. Edge lists are sorted and deduplicated;
    /// anything listed on layer 0 is discarded.
    pub fn from_outbound(mut links: Vec<Vec<Vec<usize>>>) -> Self {
        if let Some(terminal) = links.first_mut() {
            terminal.iter_mut().for_each(Vec::clear);
        }
        for targets in links.iter_mut().flatten() {
            targets.sort_unstable();
            targets.dedup();
        }
        Self { links }
    }

    /// Build from the host's inbound form: `inbound[layer][index]` lists the
    /// rooms of `layer + 1` that lead into that room.
    pub fn from_inbound(inbound: &[Vec<Vec<usize>>]) -> Self {
        let mut adjacency = Self::new();
        for (layer, rooms) in inbound.iter().enumerate() {
            for (index, sources) in rooms.iter().enumerate() {
                for &source in sources {
                    adjacency.connect(Coordinate::new(layer + 1, source), index);
                }
            }
        }
        adjacency
    }

    /// Add an edge from `from` into `target_index` of the next inner layer.
    /// Edges out of layer 0 are ignored.
    pub fn connect(&mut self, from: Coordinate, target_index: usize) {
        if from.is_terminal() {
            return;
        }
        if self.links.len() <= from.layer {
            self.links.resize_with(from.layer + 1, Vec::new);
        }
        let layer = &mut self.links[from.layer];
        if layer.len() <= from.index {
            layer.resize_with(from.index + 1, Vec::new);
        }
        let targets = &mut layer[from.index];
        if let Err(position) = targets.binary_search(&target_index) {
            targets.insert(position, target_index);
        }
    }

    /// Rooms of the next inner layer reachable from `from`, ascending by index.
    pub fn neighbors(&self, from: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        let inner = from.inner_layer();
        self.targets(from)
            .iter()
            .filter_map(move |&index| inner.map(|layer| Coordinate::new(layer, index)))
    }

    pub fn out_degree(&self, from: Coordinate) -> usize {
        self.targets(from).len()
    }

    /// Drop edges pointing past the end of their target layer. Returns the
    /// number of edges removed.
    pub fn prune(&mut self, widths: &[usize]) -> usize {
        let mut removed = 0usize;
        for (layer, rooms) in self.links.iter_mut().enumerate().skip(1) {
            let width = widths.get(layer - 1).copied().unwrap_or(0);
            for targets in rooms.iter_mut() {
                let before = targets.len();
                targets.retain(|&index| index < width);
                removed += before - targets.len();
            }
        }
        removed
    }

    pub fn edge_count(&self) -> usize {
        self.links.iter().flatten().map(Vec::len).sum()
    }

    fn targets(&self, from: Coordinate) -> &[usize] {
        if from.is_terminal() {
            return &[];
        }
        self.links
            .get(from.layer)
            .and_then(|layer| layer.get(from.index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// One refresh of the layered graph: room slots per layer plus adjacency.
/// Absent slots are rooms not known to exist.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Floor {
    layers: Vec<Vec<Option<Room>>>,
    adjacency: Adjacency,
}

impl Floor {
    /// Edges referencing slots outside their target layer are dropped.
    pub fn new(layers: Vec<Vec<Option<Room>>>, mut adjacency: Adjacency) -> Self {
        let widths: Vec<usize> = layers.iter().map(Vec::len).collect();
        adjacency.prune(&widths);
        Self { layers, adjacency }
    }

    /// Build from the host's inbound connection layout, deriving each room's
    /// connectivity count from its outbound edges.
    pub fn from_inbound(layers: Vec<Vec<Option<Room>>>, inbound: &[Vec<Vec<usize>>]) -> Self {
        let mut floor = Self::new(layers, Adjacency::from_inbound(inbound));
        for (layer, slots) in floor.layers.iter_mut().enumerate() {
            for (index, slot) in slots.iter_mut().enumerate() {
                if let Some(room) = slot.as_mut() {
                    room.connections = floor.adjacency.out_degree(Coordinate::new(layer, index));
                }
            }
        }
        floor
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn width(&self, layer: usize) -> usize {
        self.layers.get(layer).map(Vec::len).unwrap_or(0)
    }

    pub fn room(&self, coordinate: Coordinate) -> Option<&Room> {
        self.layers
            .get(coordinate.layer)
            .and_then(|layer| layer.get(coordinate.index))
            .and_then(Option::as_ref)
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.room(coordinate).is_some()
    }

    /// Present rooms in ascending `(layer, index)` order.
    pub fn rooms(&self) -> impl Iterator<Item = (Coordinate, &Room)> + '_ {
        self.layers.iter().enumerate().flat_map(|(layer, slots)| {
            slots.iter().enumerate().filter_map(move |(index, slot)| {
                slot.as_ref()
                    .map(|room| (Coordinate::new(layer, index), room))
            })
        })
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// First slot of the outermost layer, where every run begins.
    pub fn entrance(&self) -> Option<Coordinate> {
        self.layers
            .len()
            .checked_sub(1)
            .map(|layer| Coordinate::new(layer, 0))
    }
}
