//! Highest-value route through a layered floor.
//!
//! Edges only ever lead from a layer into the next inner one, so the floor is
//! a DAG and the best route is a longest path over node weights. Scores are
//! relaxed from the start room with a max-first frontier until nothing
//! improves.

mod frontier;

use std::collections::HashMap;

use serde::Serialize;

use crate::model::coordinate::Coordinate;
use crate::model::floor::Adjacency;
use crate::weight::WeightGrid;
use frontier::Frontier;

/// Recommended route, ordered from the start room towards layer 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Route {
    coordinates: Vec<Coordinate>,
    score: f64,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Cumulative weight of every room on the route.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.coordinates.contains(&coordinate)
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.coordinates.first().copied()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.coordinates.last().copied()
    }
}

/// Best cumulative score and predecessor of every room reachable from `start`.
#[derive(Debug, Clone, Default)]
pub struct Relaxation {
    start: Option<Coordinate>,
    best: HashMap<Coordinate, f64>,
    predecessor: HashMap<Coordinate, Coordinate>,
}

impl Relaxation {
    /// Relax every room reachable from `start`. Rooms without a weight are
    /// never expanded.
    pub fn run(weights: &WeightGrid, adjacency: &Adjacency, start: Coordinate) -> Self {
        let mut relaxation = Self::default();
        let Some(start_weight) = weights.get(start) else {
            return relaxation;
        };
        relaxation.start = Some(start);
        relaxation.best.insert(start, start_weight);

        let mut frontier = Frontier::new();
        frontier.push(start, start_weight);

        while let Some((current, popped)) = frontier.pop() {
            let current_best = relaxation.best[&current];
            if popped < current_best {
                continue;
            }
            for next in adjacency.neighbors(current) {
                let Some(weight) = weights.get(next) else {
                    continue;
                };
                let candidate = current_best + weight;
                let known = relaxation
                    .best
                    .get(&next)
                    .copied()
                    .unwrap_or(f64::NEG_INFINITY);
                if candidate > known {
                    relaxation.best.insert(next, candidate);
                    relaxation.predecessor.insert(next, current);
                    frontier.push(next, candidate);
                }
            }
        }

        relaxation
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }

    /// Best cumulative score ending at `coordinate`, if reachable.
    pub fn score(&self, coordinate: Coordinate) -> Option<f64> {
        self.best.get(&coordinate).copied()
    }

    pub fn is_reachable(&self, coordinate: Coordinate) -> bool {
        self.best.contains_key(&coordinate)
    }

    pub fn settled(&self) -> impl Iterator<Item = (Coordinate, f64)> + '_ {
        self.best.iter().map(|(coordinate, score)| (*coordinate, *score))
    }

    /// Route from the start to `end` along best predecessors.
    pub fn route_to(&self, end: Coordinate) -> Option<Route> {
        let score = self.score(end)?;
        let mut coordinates = vec![end];
        let mut cursor = end;
        while let Some(&previous) = self.predecessor.get(&cursor) {
            coordinates.push(previous);
            cursor = previous;
        }
        coordinates.reverse();
        Some(Route { coordinates, score })
    }

    fn depth(&self, end: Coordinate) -> usize {
        let mut depth = 1usize;
        let mut cursor = end;
        while let Some(&previous) = self.predecessor.get(&cursor) {
            depth += 1;
            cursor = previous;
        }
        depth
    }

    /// The deepest reachable room; ties go to the higher score, then to the
    /// smaller coordinate.
    pub fn deepest(&self) -> Option<Coordinate> {
        let mut best: Option<(usize, f64, Coordinate)> = None;
        for (coordinate, score) in self.settled() {
            let depth = self.depth(coordinate);
            let better = match best {
                None => true,
                Some((best_depth, best_score, best_coordinate)) => {
                    depth > best_depth
                        || (depth == best_depth && score > best_score)
                        || (depth == best_depth
                            && score == best_score
                            && coordinate < best_coordinate)
                }
            };
            if better {
                best = Some((depth, score, coordinate));
            }
        }
        best.map(|(_, _, coordinate)| coordinate)
    }
}

/// Pick the route to recommend.
///
/// Without an explicit `start` the route begins at the first slot of the
/// outermost layer. When `preferred_end` is reachable the route ends there;
/// otherwise it ends at the deepest reachable room. A start room without a
/// weight yields an empty route.
pub fn find_best_path(
    weights: &WeightGrid,
    adjacency: &Adjacency,
    start: Option<Coordinate>,
    preferred_end: Option<Coordinate>,
) -> Route {
    let Some(start) = start.or_else(|| weights.entrance()) else {
        return Route::empty();
    };
    let relaxation = Relaxation::run(weights, adjacency, start);

    if let Some(route) = preferred_end.and_then(|end| relaxation.route_to(end)) {
        return route;
    }

    relaxation
        .deepest()
        .and_then(|end| relaxation.route_to(end))
        .unwrap_or_default()
}
