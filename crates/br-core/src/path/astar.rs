//! A* search on the grid
//!
//! Movement is 4-directional with unit cost and the heuristic is the
//! Manhattan distance, which is consistent, so the first time the goal is
//! taken from the open set its path is optimal.
//!
//! Tie-break: among open nodes with equal `f`, the one first inserted into
//! the open set wins. A decrease-key keeps the node's original insertion
//! rank. Neighbours are inserted in [`Direction`] order (west, east,
//! north, south).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use log::debug;
use strum::IntoEnumIterator;

use crate::error::PathError;
use crate::grid::{Coord, Direction, Grid};

/// Search node, owned by the arena of one search
#[derive(Debug, Clone, Copy)]
struct PathNode {
    pos: Coord,
    g: usize,
    h: usize,
    /// Arena index of the predecessor
    parent: Option<usize>,
}

impl PathNode {
    fn f(&self) -> usize {
        self.g + self.h
    }
}

/// Heap entry; stale entries are skipped when popped
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenEntry {
    f: usize,
    /// Insertion rank of the node
    seq: usize,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn heuristic(a: Coord, b: Coord) -> usize {
    a.manhattan(b)
}

/// Follow predecessor links back to the start, then reverse
fn reconstruct_path(nodes: &[PathNode], end: usize) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut current = Some(end);
    while let Some(idx) = current {
        path.push(nodes[idx].pos);
        current = nodes[idx].parent;
    }
    path.reverse();
    path
}

/// Find a shortest path from `start` to `goal`, both endpoints included
///
/// Returns an empty path when the goal is unreachable, including when
/// either endpoint is a wall. Out-of-bounds endpoints are an error.
pub fn find_path(start: Coord, goal: Coord, grid: &Grid) -> Result<Vec<Coord>, PathError> {
    for c in [start, goal] {
        if !grid.in_bounds(c) {
            return Err(PathError::OutOfBounds {
                coord: c,
                width: grid.width(),
                height: grid.height(),
            });
        }
    }
    if !grid.is_path(start) || !grid.is_path(goal) {
        debug!("no path {} -> {}: endpoint is a wall", start, goal);
        return Ok(Vec::new());
    }

    let mut nodes: Vec<PathNode> = Vec::new();
    let mut open_set = BinaryHeap::new();
    // Packed grid index -> arena index of the node still in the open set
    let mut open_index: HashMap<usize, usize> = HashMap::new();
    let mut closed: HashSet<usize> = HashSet::new();

    nodes.push(PathNode {
        pos: start,
        g: 0,
        h: heuristic(start, goal),
        parent: None,
    });
    open_set.push(OpenEntry {
        f: nodes[0].f(),
        seq: 0,
        node: 0,
    });
    open_index.insert(grid.index_of(start), 0);

    while let Some(entry) = open_set.pop() {
        let current = nodes[entry.node];
        let key = grid.index_of(current.pos);
        if closed.contains(&key) || entry.f != current.f() {
            continue;
        }

        if current.pos == goal {
            return Ok(reconstruct_path(&nodes, entry.node));
        }

        open_index.remove(&key);
        closed.insert(key);

        for dir in Direction::iter() {
            let Some(next) = current.pos.step(dir, 1, grid.width(), grid.height()) else {
                continue;
            };
            let next_key = grid.index_of(next);
            if !grid.is_path(next) || closed.contains(&next_key) {
                continue;
            }

            let g = current.g + 1;
            match open_index.get(&next_key) {
                Some(&idx) => {
                    if g < nodes[idx].g {
                        nodes[idx].g = g;
                        nodes[idx].parent = Some(entry.node);
                        open_set.push(OpenEntry {
                            f: nodes[idx].f(),
                            seq: idx,
                            node: idx,
                        });
                    }
                }
                None => {
                    let idx = nodes.len();
                    nodes.push(PathNode {
                        pos: next,
                        g,
                        h: heuristic(next, goal),
                        parent: Some(entry.node),
                    });
                    open_set.push(OpenEntry {
                        f: nodes[idx].f(),
                        seq: idx,
                        node: idx,
                    });
                    open_index.insert(next_key, idx);
                }
            }
        }
    }

    debug!(
        "no path {} -> {} after expanding {} cells",
        start,
        goal,
        closed.len()
    );
    Ok(Vec::new())
}

/// Number of steps (edges) in a path
pub fn path_length(path: &[Coord]) -> usize {
    path.len().saturating_sub(1)
}
