//! Pathfinding trait and default A* implementation.
//!
//! # Pluggability
//!
//! Movement calls search through the [`Pathfinder`] trait only: given a
//! start tile, a goal tile and the map, produce waypoints or report that no
//! route exists.  The default [`AStarPathfinder`] searches the 8-connected
//! grid.
//!
//! # Cost units
//!
//! Straight steps cost 10 and diagonal steps 14 (integer octile metric), so
//! the heap holds plain `u32`s and tie-breaking is deterministic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ts_core::{TileCoord, Vec2};

use crate::{SpatialError, SpatialResult, TileMap};

const STRAIGHT: u32 = 10;
const DIAGONAL: u32 = 14;

const NEIGHBOURS: [(i32, i32); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

// ── Path ──────────────────────────────────────────────────────────────────────

/// Ordered world-space waypoints from just after the start tile to the goal
/// tile centre.  Empty when start and goal are the same tile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub waypoints: Vec<Vec2>,
}

impl Path {
    pub fn is_trivial(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Sum of segment lengths, starting from `from`.
    pub fn length_from(&self, from: Vec2) -> f32 {
        let mut prev = from;
        let mut total = 0.0;
        for &w in &self.waypoints {
            total += prev.distance(w);
            prev = w;
        }
        total
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable search engine.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// by every agent of a simulation.
pub trait Pathfinder: Send + Sync {
    fn find_path(&self, map: &TileMap, start: TileCoord, goal: TileCoord) -> SpatialResult<Path>;
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* over the walkability grid with an octile heuristic.
///
/// Diagonal moves may not cut a blocked corner: both orthogonal neighbours
/// must be walkable.
#[derive(Debug, Clone)]
pub struct AStarPathfinder {
    /// Give up (as [`SpatialError::SearchLimit`]) after this many node
    /// expansions.
    pub max_expansions: usize,
}

impl AStarPathfinder {
    pub fn new(max_expansions: usize) -> Self {
        Self { max_expansions }
    }
}

impl Default for AStarPathfinder {
    fn default() -> Self {
        Self { max_expansions: 16_384 }
    }
}

impl Pathfinder for AStarPathfinder {
    fn find_path(&self, map: &TileMap, start: TileCoord, goal: TileCoord) -> SpatialResult<Path> {
        astar(map, start, goal, self.max_expansions)
    }
}

#[inline]
fn octile(a: TileCoord, b: TileCoord) -> u32 {
    let dx = (a.x - b.x).unsigned_abs();
    let dy = (a.y - b.y).unsigned_abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL * lo + STRAIGHT * (hi - lo)
}

fn astar(map: &TileMap, start: TileCoord, goal: TileCoord, limit: usize) -> SpatialResult<Path> {
    let Some(start_idx) = map.index_of(start) else {
        return Err(SpatialError::OutOfBounds(start));
    };
    let Some(goal_idx) = map.index_of(goal) else {
        return Err(SpatialError::OutOfBounds(goal));
    };
    if start == goal {
        return Ok(Path::default());
    }
    if !map.is_walkable(goal) {
        return Err(SpatialError::NoPath { from: start, to: goal });
    }

    let n = map.tile_count();
    let mut g = vec![u32::MAX; n];
    let mut came_from = vec![u32::MAX; n];
    g[start_idx] = 0;

    // Min-heap on (f, h, index); h breaks f-ties toward the goal.
    let mut open: BinaryHeap<Reverse<(u32, u32, u32)>> = BinaryHeap::new();
    let h0 = octile(start, goal);
    open.push(Reverse((h0, h0, start_idx as u32)));

    let mut expanded = 0usize;
    while let Some(Reverse((f, _, idx))) = open.pop() {
        let idx = idx as usize;
        if idx == goal_idx {
            return Ok(reconstruct(map, &came_from, start_idx, goal_idx));
        }
        let tile = map.tile_at(idx);
        // Stale entry: a cheaper route to this tile was already expanded.
        if f > g[idx].saturating_add(octile(tile, goal)) {
            continue;
        }
        expanded += 1;
        if expanded > limit {
            return Err(SpatialError::SearchLimit { from: start, to: goal, expanded });
        }

        for (dx, dy) in NEIGHBOURS {
            let next = tile.offset(dx, dy);
            if !map.is_walkable(next) {
                continue;
            }
            let diagonal = dx != 0 && dy != 0;
            if diagonal && !(map.is_walkable(tile.offset(dx, 0)) && map.is_walkable(tile.offset(0, dy))) {
                continue;
            }
            let Some(next_idx) = map.index_of(next) else { continue };
            let step = if diagonal { DIAGONAL } else { STRAIGHT };
            let cost = g[idx].saturating_add(step);
            if cost < g[next_idx] {
                g[next_idx] = cost;
                came_from[next_idx] = idx as u32;
                let h = octile(next, goal);
                open.push(Reverse((cost + h, h, next_idx as u32)));
            }
        }
    }

    Err(SpatialError::NoPath { from: start, to: goal })
}

fn reconstruct(map: &TileMap, came_from: &[u32], start: usize, goal: usize) -> Path {
    let mut waypoints = Vec::new();
    let mut cur = goal;
    while cur != start {
        waypoints.push(map.tile_at(cur).center());
        cur = came_from[cur] as usize;
    }
    waypoints.reverse();
    Path { waypoints }
}
