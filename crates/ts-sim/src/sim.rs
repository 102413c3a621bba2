//! The `Sim` struct and its frame loop.

use tracing::{debug, info};

use ts_action::ActionStep;
use ts_agent::{AgentStore, Inventory};
use ts_core::{AgentId, Frame, PlanKind, SimClock, SimConfig, SimRng, Vec2};
use ts_schedule::{AgentScheduler, BudgetClock, FrameReport};
use ts_spatial::Pathfinder;
use ts_utility::{PlannerState, UtilityHistory};

use crate::{FireEvents, SimObserver, World, step_fires};

// ── AgentSummary ──────────────────────────────────────────────────────────────

/// Read-only view of one agent for inspection and debugging.
#[derive(Clone, Debug)]
pub struct AgentSummary<'a> {
    pub agent:       AgentId,
    pub alive:       bool,
    pub team:        u8,
    pub health:      f32,
    pub position:    Vec2,
    pub priority:    u32,
    pub plan:        PlanKind,
    pub state:       PlannerState,
    pub plan_score:  f32,
    pub inventory:   &'a Inventory,
    pub stack_depth: usize,
    pub current:     Option<ActionStep>,
    pub moving:      bool,
    pub history:     &'a UtilityHistory,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each frame runs in three phases:
///
/// 1. **World**: fires ignite, grow, spread and burn buildings.  The time
///    this takes is reported to the scheduler as overhead.
/// 2. **Agents**: the [`AgentScheduler`] gives as many agents as the budget
///    allows a full update (re-plan and execute) and every other living agent
///    a quick update (execute only).
/// 3. **Deaths**: agents killed during the frame have their stacks cleared
///    and are reported to the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: Pathfinder> {
    pub config: SimConfig,
    pub clock: SimClock,
    pub agents: AgentStore,
    pub world: World<P>,
    pub scheduler: AgentScheduler,
    /// Where each agent stood at frame 0; [`reset`](Self::reset) puts them back.
    pub spawn_points: Vec<Vec2>,
    budget_clock: Box<dyn BudgetClock>,
    world_rng: SimRng,
    resets: u64,
}

impl<P: Pathfinder> Sim<P> {
    pub(crate) fn new(
        config:       SimConfig,
        agents:       AgentStore,
        world:        World<P>,
        scheduler:    AgentScheduler,
        spawn_points: Vec<Vec2>,
        budget_clock: Box<dyn BudgetClock>,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            world_rng: SimRng::new(config.seed),
            config,
            agents,
            world,
            scheduler,
            spawn_points,
            budget_clock,
            resets: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current frame to `config.end_frame()`.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        info!(
            agents = self.agents.count,
            frames = self.config.total_frames,
            seed = self.config.seed,
            "simulation start",
        );
        while self.clock.current_frame < self.config.end_frame() {
            self.step(observer);
        }
        let frame = self.clock.current_frame;
        observer.on_sim_end(frame);
        info!(
            %frame,
            alive = self.agents.alive_count(),
            full_updates = self.scheduler.total_full_updates(),
            quick_updates = self.scheduler.total_quick_updates(),
            "simulation end",
        );
    }

    /// Run exactly `n` frames from the current position, ignoring
    /// `end_frame`.
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Simulate one frame.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> FrameReport {
        let now = self.clock.current_frame;
        let dt = self.config.frame_secs;
        observer.on_frame_start(now);

        let started = self.budget_clock.now_us();
        let fires = self.step_world(dt);
        let overhead = self.budget_clock.now_us().saturating_sub(started);
        self.scheduler.record_overhead(overhead);
        if fires.ignitions > 0 || !fires.destroyed.is_empty() {
            debug!(%now, ignitions = fires.ignitions, destroyed = fires.destroyed.len(), "fires");
        }

        let report = self.scheduler.run_frame(&mut self.agents, &mut self.world, dt, &mut *self.budget_clock);

        for victim in self.world.drain_kills() {
            observer.on_agent_death(now, victim);
        }
        observer.on_frame_end(now, &report);

        let interval = self.config.snapshot_interval_frames;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.agents, &self.world.mobility.store);
        }

        self.clock.advance();
        report
    }

    /// Restart from frame 0 on the same map.
    ///
    /// Agents are revived at their spawn points with empty inventories and
    /// baseline priority; buildings are rebuilt and fires put out; every
    /// memo cache, action stack, path and utility history is cleared and the
    /// orderings are rebuilt.
    pub fn reset(&mut self) {
        self.agents.revive_all();
        self.agents.position.copy_from_slice(&self.spawn_points);
        self.world.reset();
        self.scheduler.reset(&mut self.agents);
        self.clock.reset();
        self.world_rng = SimRng::new(self.config.seed);
        self.resets += 1;
        info!(resets = self.resets, agents = self.agents.count, "simulation reset");
    }

    /// How many times [`reset`](Self::reset) has run.
    pub fn resets(&self) -> u64 {
        self.resets
    }

    pub fn current_frame(&self) -> Frame {
        self.clock.current_frame
    }

    /// Snapshot of `agent`'s vitals, plan and pending work.
    pub fn summary(&self, agent: AgentId) -> AgentSummary<'_> {
        let i = agent.index();
        let planner = self.world.planners.planner(agent);
        AgentSummary {
            agent,
            alive:       self.agents.is_alive(agent),
            team:        self.agents.team[i],
            health:      self.agents.health[i],
            position:    self.agents.position[i],
            priority:    self.agents.priority[i],
            plan:        planner.current_plan(),
            state:       planner.state(),
            plan_score:  planner.info().score,
            inventory:   &self.agents.inventory[i],
            stack_depth: self.world.executor.depth(agent),
            current:     self.world.executor.current(agent).copied(),
            moving:      self.world.mobility.store.is_moving(agent),
            history:     planner.history(),
        }
    }

    fn step_world(&mut self, dt: f32) -> FireEvents {
        let world = &mut self.world;
        step_fires(&mut world.poi, &world.map, &world.config, dt, &mut self.world_rng)
    }
}
