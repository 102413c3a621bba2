//! The three agent orderings maintained for the scheduler.
//!
//! | Ordering      | Key                  | Readers                           |
//! |---------------|----------------------|-----------------------------------|
//! | `by_x`        | position.x ascending | path sharing, nearest-agent sweep |
//! | `by_y`        | position.y ascending | path sharing                      |
//! | `by_priority` | priority descending  | the budgeted scheduler            |
//!
//! Orderings are only rebuilt by [`AgentOrderings::resort`], which the
//! scheduler calls every few frames.  Between resorts agents keep moving and
//! priorities keep changing, so readers must treat the spatial orderings as
//! approximately sorted: searches stay in bounds and terminate, but may miss
//! the exact nearest agent by a frame or two of movement.

use ts_core::{AgentId, Vec2};

use crate::{AgentStore, OrderSlots, partition_sort_by};

#[derive(Debug, Default, Clone)]
pub struct AgentOrderings {
    by_x: Vec<AgentId>,
    by_y: Vec<AgentId>,
    by_priority: Vec<AgentId>,
    resorts: u64,
}

impl AgentOrderings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build orderings over the living agents of `store`.
    pub fn build(store: &mut AgentStore) -> Self {
        let mut orderings = Self::new();
        orderings.rebuild(store);
        orderings
    }

    /// Reset membership to exactly the living agents, then sort.
    pub fn rebuild(&mut self, store: &mut AgentStore) {
        let alive: Vec<AgentId> = store.alive_ids().collect();
        self.by_x = alive.clone();
        self.by_y = alive.clone();
        self.by_priority = alive;
        self.resort(store);
    }

    /// Drop dead agents, re-sort all three orderings in place, and write
    /// every agent's slot indices back into the store.
    pub fn resort(&mut self, store: &mut AgentStore) {
        self.by_x.retain(|&a| store.is_alive(a));
        self.by_y.retain(|&a| store.is_alive(a));
        self.by_priority.retain(|&a| store.is_alive(a));

        let pos = &store.position;
        partition_sort_by(&mut self.by_x, &|a: &AgentId, b: &AgentId| {
            pos[a.index()].x < pos[b.index()].x
        });
        partition_sort_by(&mut self.by_y, &|a: &AgentId, b: &AgentId| {
            pos[a.index()].y < pos[b.index()].y
        });
        let prio = &store.priority;
        partition_sort_by(&mut self.by_priority, &|a: &AgentId, b: &AgentId| {
            prio[a.index()] > prio[b.index()]
        });

        store.slots.fill(OrderSlots::ABSENT);
        for (i, a) in self.by_x.iter().enumerate() {
            store.slots[a.index()].x = i as u32;
        }
        for (i, a) in self.by_y.iter().enumerate() {
            store.slots[a.index()].y = i as u32;
        }
        for (i, a) in self.by_priority.iter().enumerate() {
            store.slots[a.index()].priority = i as u32;
        }
        self.resorts += 1;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn by_x(&self) -> &[AgentId] {
        &self.by_x
    }

    pub fn by_y(&self) -> &[AgentId] {
        &self.by_y
    }

    pub fn by_priority(&self) -> &[AgentId] {
        &self.by_priority
    }

    /// Number of agents in each ordering.
    pub fn len(&self) -> usize {
        self.by_priority.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_priority.is_empty()
    }

    /// How many times [`resort`](Self::resort) has run.
    pub fn resort_count(&self) -> u64 {
        self.resorts
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// First index in `by_x` whose agent has `position.x >= x`.
    pub fn lower_bound_x(&self, store: &AgentStore, x: f32) -> usize {
        self.by_x.partition_point(|a| store.position[a.index()].x < x)
    }

    /// First index in `by_y` whose agent has `position.y >= y`.
    pub fn lower_bound_y(&self, store: &AgentStore, y: f32) -> usize {
        self.by_y.partition_point(|a| store.position[a.index()].y < y)
    }

    /// Up to `window` agents of `by_x` nearest in x to `x`, nearest first.
    pub fn window_x(&self, store: &AgentStore, x: f32, window: usize) -> OutwardScan<'_> {
        OutwardScan::new(&self.by_x, self.lower_bound_x(store, x), window)
    }

    /// Up to `window` agents of `by_y` nearest in y to `y`, nearest first.
    pub fn window_y(&self, store: &AgentStore, y: f32, window: usize) -> OutwardScan<'_> {
        OutwardScan::new(&self.by_y, self.lower_bound_y(store, y), window)
    }

    /// Nearest living agent to `from` within `max_dist` that satisfies
    /// `pred`.
    ///
    /// Sweeps `by_x` outward from `from.x` and stops once the x gap alone
    /// exceeds the best distance found so far.
    pub fn nearest_where<F>(
        &self,
        store:    &AgentStore,
        from:     Vec2,
        max_dist: f32,
        mut pred: F,
    ) -> Option<AgentId>
    where
        F: FnMut(AgentId) -> bool,
    {
        let px = |a: AgentId| store.position[a.index()].x;
        let start = self.lower_bound_x(store, from.x);
        let (mut lo, mut hi) = (start, start);
        let mut best: Option<AgentId> = None;
        let mut limit = max_dist;

        loop {
            let left = lo.checked_sub(1).map(|i| self.by_x[i]);
            let right = self.by_x.get(hi).copied();
            let (agent, gap, go_left) = match (left, right) {
                (None, None) => break,
                (Some(a), None) => (a, from.x - px(a), true),
                (None, Some(b)) => (b, px(b) - from.x, false),
                (Some(a), Some(b)) => {
                    let l = from.x - px(a);
                    let r = px(b) - from.x;
                    if l <= r { (a, l, true) } else { (b, r, false) }
                }
            };
            if gap.abs() > limit {
                break;
            }
            if go_left {
                lo -= 1;
            } else {
                hi += 1;
            }
            if !store.is_alive(agent) || !pred(agent) {
                continue;
            }
            let d = from.distance(store.position[agent.index()]);
            if d < limit || (best.is_none() && d <= limit) {
                limit = d;
                best = Some(agent);
            }
        }
        best
    }
}

/// Iterator over an ordering that alternates outward from a start index:
/// `start, start-1, start+1, start-2, …`, yielding at most `window` ids.
pub struct OutwardScan<'a> {
    list: &'a [AgentId],
    below: usize,
    above: usize,
    remaining: usize,
    take_below: bool,
}

impl<'a> OutwardScan<'a> {
    fn new(list: &'a [AgentId], start: usize, window: usize) -> Self {
        let start = start.min(list.len());
        Self { list, below: start, above: start, remaining: window, take_below: false }
    }
}

impl Iterator for OutwardScan<'_> {
    type Item = AgentId;

    fn next(&mut self) -> Option<AgentId> {
        if self.remaining == 0 {
            return None;
        }
        let can_above = self.above < self.list.len();
        let can_below = self.below > 0;
        let use_below = match (can_below, can_above) {
            (false, false) => return None,
            (true, false) => true,
            (false, true) => false,
            (true, true) => self.take_below,
        };
        self.take_below = !use_below;
        self.remaining -= 1;
        if use_below {
            self.below -= 1;
            Some(self.list[self.below])
        } else {
            let id = self.list[self.above];
            self.above += 1;
            Some(id)
        }
    }
}
