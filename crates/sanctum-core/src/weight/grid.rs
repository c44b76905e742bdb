use crate::model::coordinate::Coordinate;

/// Node weights of a layered floor. Cells without a weight are rooms the
/// solver must treat as non-existent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightGrid {
    cells: Vec<Vec<Option<f64>>>,
}

impl WeightGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layers(cells: Vec<Vec<Option<f64>>>) -> Self {
        Self { cells }
    }

    pub fn set(&mut self, coordinate: Coordinate, weight: f64) {
        if self.cells.len() <= coordinate.layer {
            self.cells.resize_with(coordinate.layer + 1, Vec::new);
        }
        let layer = &mut self.cells[coordinate.layer];
        if layer.len() <= coordinate.index {
            layer.resize(coordinate.index + 1, None);
        }
        layer[coordinate.index] = Some(weight);
    }

    pub fn get(&self, coordinate: Coordinate) -> Option<f64> {
        self.cells
            .get(coordinate.layer)
            .and_then(|layer| layer.get(coordinate.index))
            .copied()
            .flatten()
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.get(coordinate).is_some()
    }

    pub fn layer_count(&self) -> usize {
        self.cells.len()
    }

    /// First slot of the outermost layer.
    pub fn entrance(&self) -> Option<Coordinate> {
        self.cells
            .len()
            .checked_sub(1)
            .map(|layer| Coordinate::new(layer, 0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, f64)> + '_ {
        self.cells.iter().enumerate().flat_map(|(layer, cells)| {
            cells.iter().enumerate().filter_map(move |(index, weight)| {
                weight.map(|weight| (Coordinate::new(layer, index), weight))
            })
        })
    }
}
