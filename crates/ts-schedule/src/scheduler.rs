//! The budgeted full/quick update scheduler.

use tracing::{trace, warn};

use ts_agent::{AgentOrderings, AgentStore};
use ts_core::AgentId;

use crate::{AgentUpdater, BudgetClock, ScheduleResult, SchedulerConfig};

/// What one [`AgentScheduler::run_frame`] call did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub full_updates: usize,
    pub quick_updates: usize,
    /// Budget this frame after subtracting last frame's overhead.
    pub budget_us: u64,
    /// Time spent in agent updates, full and quick.
    pub elapsed_us: u64,
    /// The orderings were resorted at the start of the frame.
    pub resorted: bool,
    /// Full updates stopped because time ran out, not because of the cap or
    /// the end of the list.
    pub budget_exhausted: bool,
}

/// Owns the three agent orderings and decides, each frame, who is fully
/// updated.
pub struct AgentScheduler {
    config: SchedulerConfig,
    orderings: AgentOrderings,
    /// Next index into the priority ordering.  Back to 0 on every resort.
    cursor: usize,
    frames_since_resort: u32,
    overhead_us: u64,
    /// Per-frame scratch: fully updated this frame.
    serviced: Vec<bool>,

    frames: u64,
    total_full: u64,
    total_quick: u64,
}

impl AgentScheduler {
    /// Validate `config` and sort the living agents of `agents`.
    pub fn new(config: SchedulerConfig, agents: &mut AgentStore) -> ScheduleResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            orderings: AgentOrderings::build(agents),
            cursor: 0,
            frames_since_resort: 0,
            overhead_us: 0,
            serviced: vec![false; agents.count],
            frames: 0,
            total_full: 0,
            total_quick: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    #[inline]
    pub fn orderings(&self) -> &AgentOrderings {
        &self.orderings
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Time spent outside agent updates last frame; taken off the next budget.
    #[inline]
    pub fn record_overhead(&mut self, us: u64) {
        self.overhead_us = us;
    }

    #[inline]
    pub fn budget_us(&self) -> u64 {
        self.config.frame_budget_us.saturating_sub(self.overhead_us)
    }

    /// Resort all three orderings now and restart the cursor.
    pub fn resort(&mut self, agents: &mut AgentStore) {
        self.orderings.resort(agents);
        self.cursor = 0;
        self.frames_since_resort = 0;
    }

    /// Run one frame of agent updates.
    ///
    /// Agents are taken from the priority ordering starting at the cursor and
    /// fully updated while time remains (at least `min_full_updates`, at most
    /// `max_full_updates`).  An update already started is never cut short.
    /// Every other living agent gets a quick update and a priority bump.
    pub fn run_frame<U, C>(&mut self, agents: &mut AgentStore, updater: &mut U, dt: f32, clock: &mut C) -> FrameReport
    where
        U: AgentUpdater,
        C: BudgetClock + ?Sized,
    {
        let resorted = self.frames_since_resort >= self.config.resort_interval;
        if resorted {
            self.resort(agents);
        }

        let budget_us = self.budget_us();
        let start = clock.now_us();
        self.serviced.fill(false);

        let list = self.orderings.by_priority();
        let n = list.len();
        let mut full = 0;
        let mut visited = 0;
        let mut budget_exhausted = false;
        while visited < n {
            if self.config.max_full_updates.is_some_and(|max| full >= max) {
                break;
            }
            if full >= self.config.min_full_updates && clock.now_us().saturating_sub(start) >= budget_us {
                budget_exhausted = true;
                break;
            }
            let agent = list[(self.cursor + visited) % n];
            visited += 1;
            if !agents.is_alive(agent) {
                continue;
            }
            updater.update(agent, dt, agents, &self.orderings);
            agents.reset_priority(agent);
            self.serviced[agent.index()] = true;
            full += 1;
        }
        if n > 0 {
            self.cursor = (self.cursor + visited) % n;
        }

        let mut quick = 0;
        for i in 0..agents.count {
            let agent = AgentId(i as u32);
            if self.serviced[i] || !agents.is_alive(agent) {
                continue;
            }
            updater.quick_update(agent, dt, agents, &self.orderings);
            agents.raise_priority(agent, self.config.priority_increment);
            quick += 1;
        }

        let elapsed_us = clock.now_us().saturating_sub(start);
        self.frames_since_resort += 1;
        self.frames += 1;
        self.total_full += full as u64;
        self.total_quick += quick as u64;

        if full == 0 && quick > 0 {
            warn!(frame = self.frames, budget_us, "no full updates this frame");
        }
        trace!(full, quick, budget_us, elapsed_us, resorted, "scheduler frame");

        FrameReport { full_updates: full, quick_updates: quick, budget_us, elapsed_us, resorted, budget_exhausted }
    }

    /// Forget all history and rebuild the orderings from the living agents.
    pub fn reset(&mut self, agents: &mut AgentStore) {
        self.orderings.rebuild(agents);
        self.serviced = vec![false; agents.count];
        self.cursor = 0;
        self.frames_since_resort = 0;
        self.overhead_us = 0;
        self.frames = 0;
        self.total_full = 0;
        self.total_quick = 0;
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn total_full_updates(&self) -> u64 {
        self.total_full
    }

    #[inline]
    pub fn total_quick_updates(&self) -> u64 {
        self.total_quick
    }
}
