//! Per-query BFS bookkeeping.
//!
//! A `SearchState` lives for exactly one path query. It is owned by the task
//! driving the search, which is the only writer; expansion tasks hand their
//! neighbor sets back to that task instead of touching the state directly.

use std::collections::{HashMap, HashSet, VecDeque};

use mutuals_core::username::Username;

/// Visited set, distance-tagged FIFO frontier, and parent pointers.
///
/// Every frontier entry and every predecessor key is also in the visited
/// set, and the source is the only node without a parent.
#[derive(Debug)]
pub struct SearchState {
    visited: HashSet<Username>,
    frontier: VecDeque<(Username, usize)>,
    predecessor: HashMap<Username, Option<Username>>,
}

impl SearchState {
    /// Start a search rooted at `source` (distance 0).
    pub fn new(source: Username) -> Self {
        let mut state = Self {
            visited: HashSet::new(),
            frontier: VecDeque::new(),
            predecessor: HashMap::new(),
        };
        state.visited.insert(source.clone());
        state.predecessor.insert(source.clone(), None);
        state.frontier.push_back((source, 0));
        state
    }

    pub fn is_visited(&self, user: &str) -> bool {
        self.visited.contains(user)
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Distance of the next entry to dequeue.
    pub fn front_distance(&self) -> Option<usize> {
        self.frontier.front().map(|(_, distance)| *distance)
    }

    /// Record `node` as first reached from `parent`. Returns `false` (and
    /// changes nothing) if it was already visited.
    pub fn discover(&mut self, node: Username, parent: &Username, distance: usize) -> bool {
        if !self.visited.insert(node.clone()) {
            return false;
        }
        self.predecessor.insert(node.clone(), Some(parent.clone()));
        self.frontier.push_back((node, distance));
        true
    }

    /// Dequeue up to `max` entries from the front, all at the front's distance.
    ///
    /// Entries of the next layer are never mixed into the same batch.
    pub fn pop_batch(&mut self, max: usize) -> Vec<(Username, usize)> {
        let Some(distance) = self.front_distance() else {
            return Vec::new();
        };
        let mut batch = Vec::new();
        while batch.len() < max.max(1) && self.front_distance() == Some(distance) {
            if let Some(entry) = self.frontier.pop_front() {
                batch.push(entry);
            }
        }
        batch
    }

    /// Drop every remaining frontier entry, returning how many there were.
    pub fn clear_frontier(&mut self) -> usize {
        let remaining = self.frontier.len();
        self.frontier.clear();
        remaining
    }

    /// Path from the source to `current`, followed by `target`.
    pub fn path_to(&self, current: &Username, target: Username) -> Vec<Username> {
        let mut path = vec![target];
        let mut cursor = Some(current.clone());
        while let Some(node) = cursor {
            cursor = self.predecessor.get(&node).cloned().flatten();
            path.push(node);
        }
        path.reverse();
        path
    }
}
