use std::{cmp::Ordering, collections::BinaryHeap};

use crate::grid::Point;

/// The objects that we store in the priority queue
#[derive(Debug)]
struct ToVisit {
    priority: usize,
    // insertion counter, earlier insertions win ties
    seq: usize,
    cost: usize,
    point: Point,
}

impl Ord for ToVisit {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse for BinaryHeap to be a min-heap
        (self.priority, self.seq)
            .cmp(&(other.priority, other.seq))
            .reverse()
    }
}

impl PartialOrd for ToVisit {
    fn partial_cmp(&self, other: &ToVisit) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ToVisit {
    fn eq(&self, other: &ToVisit) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ToVisit {}

/// Min-priority frontier with stable tie-breaking.
///
/// Among equal priorities, entries come out in the order they were pushed.
/// Updating the priority of a queued point is done by pushing it again: the
/// new entry takes its place at the back of its priority class and the old
/// entry goes stale. Stale entries are recognised by their cost no longer
/// matching the cost the caller has on record and are skipped by
/// [`PriorityFrontier::pop`].
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<ToVisit>,
    seq: usize,
    live: usize,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `point` with the given priority. `replaces` must be true when the
    /// point is already queued, so the number of live entries stays correct.
    pub fn push(&mut self, point: Point, cost: usize, priority: usize, replaces: bool) {
        self.heap.push(ToVisit {
            priority,
            seq: self.seq,
            cost,
            point,
        });
        self.seq += 1;
        if !replaces {
            self.live += 1;
        }
    }

    /// Pop the live entry with the lowest priority. `is_current` tells whether
    /// a (point, cost) pair is still the one on record.
    pub fn pop(
        &mut self,
        mut is_current: impl FnMut(Point, usize) -> bool,
    ) -> Option<(Point, usize)> {
        while let Some(entry) = self.heap.pop() {
            if is_current(entry.point, entry.cost) {
                self.live = self.live.saturating_sub(1);
                return Some((entry.point, entry.cost));
            }
        }
        None
    }

    /// Number of distinct points waiting
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
