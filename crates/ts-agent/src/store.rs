//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! RNG state lives outside the store so a caller can hold `&mut AgentRngs`
//! while lending `&AgentStore` to a planner that only reads world state.

use ts_core::{AgentId, AgentRng, Vec2};

use crate::{Inventory, Personality};

/// Priority every agent returns to right after a full update.
pub const BASELINE_PRIORITY: u32 = 1;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── OrderSlots ────────────────────────────────────────────────────────────────

/// Where an agent currently sits in each of the three scheduler orderings.
/// `u32::MAX` means "not present" (dead, or not yet sorted in).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OrderSlots {
    pub x: u32,
    pub y: u32,
    pub priority: u32,
}

impl OrderSlots {
    pub const ABSENT: OrderSlots = OrderSlots { x: u32::MAX, y: u32::MAX, priority: u32::MAX };
}

impl Default for OrderSlots {
    fn default() -> Self {
        Self::ABSENT
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` has exactly `count` elements and `AgentId` is the index into
/// all of them.  Dead agents keep their slot (health <= 0) until the
/// simulation is reset, so ids stay stable for the whole run.
///
/// Movement along a path lives in `ts-mobility`; action stacks and planners
/// live in their own crates.  Everything here is plain per-agent data.
pub struct AgentStore {
    /// Number of agent slots, dead or alive.
    pub count: usize,

    // ── Vitals ────────────────────────────────────────────────────────────
    pub health: Vec<f32>,
    pub max_health: Vec<f32>,
    /// Agents on different teams shoot at each other; same-team agents heal
    /// each other.
    pub team: Vec<u8>,

    // ── Movement ──────────────────────────────────────────────────────────
    pub position: Vec<Vec2>,
    /// Unit facing vector, updated while walking.
    pub forward: Vec<Vec2>,

    // ── Decision inputs ───────────────────────────────────────────────────
    pub personality: Vec<Personality>,
    pub inventory: Vec<Inventory>,

    // ── Scheduling ────────────────────────────────────────────────────────
    /// Full-update priority.  Grows while the agent is skipped, resets to
    /// [`BASELINE_PRIORITY`] after a full update.
    pub priority: Vec<u32>,
    pub slots: Vec<OrderSlots>,
}

impl AgentStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// All ids in ascending order, dead ones included.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Ids of agents with health above zero.
    pub fn alive_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|&a| self.is_alive(a))
    }

    pub fn alive_count(&self) -> usize {
        self.health.iter().filter(|&&h| h > 0.0).count()
    }

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        agent.index() < self.count && self.health[agent.index()] > 0.0
    }

    /// `health / max_health` in `[0, 1]`.
    #[inline]
    pub fn health_fraction(&self, agent: AgentId) -> f32 {
        let max = self.max_health[agent.index()];
        if max <= 0.0 {
            return 0.0;
        }
        (self.health[agent.index()] / max).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_injured(&self, agent: AgentId) -> bool {
        self.is_alive(agent) && self.health[agent.index()] < self.max_health[agent.index()]
    }

    /// Subtract `amount` health.  Returns `true` if this hit killed the agent.
    pub fn apply_damage(&mut self, agent: AgentId, amount: f32) -> bool {
        let i = agent.index();
        if self.health[i] <= 0.0 {
            return false;
        }
        self.health[i] -= amount;
        self.health[i] <= 0.0
    }

    /// Add health up to `max_health`.  Returns the amount actually restored.
    pub fn restore_health(&mut self, agent: AgentId, amount: f32) -> f32 {
        let i = agent.index();
        if self.health[i] <= 0.0 {
            return 0.0;
        }
        let before = self.health[i];
        self.health[i] = (before + amount).min(self.max_health[i]);
        self.health[i] - before
    }

    #[inline]
    pub fn are_enemies(&self, a: AgentId, b: AgentId) -> bool {
        self.team[a.index()] != self.team[b.index()]
    }

    /// Bump priority by `step` (saturating).
    #[inline]
    pub fn raise_priority(&mut self, agent: AgentId, step: u32) {
        let p = &mut self.priority[agent.index()];
        *p = p.saturating_add(step);
    }

    #[inline]
    pub fn reset_priority(&mut self, agent: AgentId) {
        self.priority[agent.index()] = BASELINE_PRIORITY;
    }

    /// Restore every agent to full health, empty inventory and baseline
    /// priority.  Positions are left for the caller to re-place.
    pub fn revive_all(&mut self) {
        self.health.copy_from_slice(&self.max_health);
        for inv in &mut self.inventory {
            inv.clear();
        }
        self.priority.fill(BASELINE_PRIORITY);
        self.forward.fill(Vec2::new(1.0, 0.0));
        self.slots.fill(OrderSlots::ABSENT);
    }

    pub(crate) fn new(count: usize, max_health: f32) -> Self {
        Self {
            count,
            health:      vec![max_health; count],
            max_health:  vec![max_health; count],
            team:        vec![0; count],
            position:    vec![Vec2::ZERO; count],
            forward:     vec![Vec2::new(1.0, 0.0); count],
            personality: vec![Personality::neutral(); count],
            inventory:   vec![Inventory::default(); count],
            priority:    vec![BASELINE_PRIORITY; count],
            slots:       vec![OrderSlots::ABSENT; count],
        }
    }
}
