use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::model::coordinate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    score: f64,
    coordinate: Coordinate,
}

impl Eq for Entry {}

impl Ord for Entry {
    // Max-heap: higher score first, then the smaller coordinate.
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.coordinate.cmp(&self.coordinate))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier with lazy deletion: re-pushing a coordinate leaves the
/// old entry behind, and callers discard entries whose score is stale.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, coordinate: Coordinate, score: f64) {
        self.heap.push(Entry { score, coordinate });
    }

    pub(crate) fn pop(&mut self) -> Option<(Coordinate, f64)> {
        self.heap
            .pop()
            .map(|entry| (entry.coordinate, entry.score))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_highest_score_first() {
        let mut frontier = Frontier::new();
        frontier.push(Coordinate::new(1, 0), 5.0);
        frontier.push(Coordinate::new(1, 1), 50.0);
        frontier.push(Coordinate::new(1, 2), -3.0);

        assert_eq!(frontier.pop(), Some((Coordinate::new(1, 1), 50.0)));
        assert_eq!(frontier.pop(), Some((Coordinate::new(1, 0), 5.0)));
        assert_eq!(frontier.pop(), Some((Coordinate::new(1, 2), -3.0)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn ties_break_towards_smaller_coordinate() {
        let mut frontier = Frontier::new();
        frontier.push(Coordinate::new(2, 1), 10.0);
        frontier.push(Coordinate::new(1, 3), 10.0);
        frontier.push(Coordinate::new(2, 0), 10.0);

        assert_eq!(frontier.pop().map(|(c, _)| c), Some(Coordinate::new(1, 3)));
        assert_eq!(frontier.pop().map(|(c, _)| c), Some(Coordinate::new(2, 0)));
        assert_eq!(frontier.pop().map(|(c, _)| c), Some(Coordinate::new(2, 1)));
    }

    #[test]
    fn stale_entries_remain_until_popped() {
        let mut frontier = Frontier::new();
        frontier.push(Coordinate::new(0, 0), 1.0);
        frontier.push(Coordinate::new(0, 0), 9.0);
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop(), Some((Coordinate::new(0, 0), 9.0)));
        assert_eq!(frontier.pop(), Some((Coordinate::new(0, 0), 1.0)));
    }
}
