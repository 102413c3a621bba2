//! The per-agent planner state machine and the store that owns all of them.

use tracing::debug;

use ts_action::{ActionExecutor, ActionStep, Behavior};
use ts_core::{AgentId, AgentRng, PlanKind, Vec2};

use crate::scorer::{self, PlanningView, UtilityResult};
use crate::{PlannerConfig, PlanningResult, Skew, UtilityCaches, UtilityError, UtilityHistory};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlannerState {
    /// Nothing beat the idle threshold; the agent wanders.
    #[default]
    Idle,
    HasPlan,
}

/// What [`UtilityPlanner::update_plan`] settled on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlanDecision {
    pub plan: PlanKind,
    /// `plan` differs from the plan current before the evaluation.
    pub changed: bool,
    pub result: UtilityResult,
}

/// One agent's decision state.
#[derive(Clone, Debug)]
pub struct UtilityPlanner {
    state: PlannerState,
    current: PlanKind,
    info: UtilityResult,
    history: UtilityHistory,
}

impl Default for UtilityPlanner {
    fn default() -> Self {
        Self {
            state: PlannerState::Idle,
            current: PlanKind::Idle,
            info: UtilityResult::none(Vec2::ZERO),
            history: UtilityHistory::default(),
        }
    }
}

impl UtilityPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> PlannerState {
        self.state
    }

    #[inline]
    pub fn current_plan(&self) -> PlanKind {
        self.current
    }

    /// The winning result of the last evaluation.
    #[inline]
    pub fn info(&self) -> &UtilityResult {
        &self.info
    }

    #[inline]
    pub fn history(&self) -> &UtilityHistory {
        &self.history
    }

    /// Score every candidate and make the best one current.
    ///
    /// `executing` says whether the current plan still has queued steps; only
    /// then does its category skew apply.  A plan with no target scores zero
    /// and is never skewed, so it cannot win.
    pub fn update_plan(
        &mut self,
        agent:     AgentId,
        view:      &PlanningView<'_>,
        caches:    &mut UtilityCaches,
        config:    &PlannerConfig,
        rng:       &mut AgentRng,
        executing: bool,
    ) -> PlanDecision {
        let mut results = [UtilityResult::none(view.agents.position[agent.index()]); PlanKind::COUNT];
        for plan in PlanKind::ALL {
            let r = scorer::score(plan, agent, view, caches, config, rng);
            self.history.record(plan, r.score);
            results[plan.index()] = r;
        }

        let favored = executing.then(|| {
            let bias = view.agents.personality[agent.index()].bias(self.current);
            (self.current, config.skew(self.current), bias)
        });
        let mut scores = results.map(|r| r.score);
        let best = select_plan(&mut scores, favored);
        let best_score = scores[best.index()];

        let changed = best != self.current;
        if changed {
            debug!(%agent, from = self.current.as_str(), to = best.as_str(), score = best_score, "plan switch");
        }
        self.current = best;
        self.info = UtilityResult { score: best_score, ..results[best.index()] };
        self.state = if best.is_idle() { PlannerState::Idle } else { PlannerState::HasPlan };
        self.history.finish(best);

        PlanDecision { plan: best, changed, result: self.info }
    }

    /// Push the steps that carry out the current plan: the behavior first,
    /// then the walk to its destination on top so it runs first.
    ///
    /// Refuses while the agent's stack still holds steps.  Returns the number
    /// of steps pushed.
    pub fn queue_actions_from_current_plan(
        &self,
        agent:    AgentId,
        executor: &mut ActionExecutor,
        config:   &PlannerConfig,
    ) -> PlanningResult<usize> {
        if !executor.is_idle(agent) {
            return Err(UtilityError::StackNotEmpty(agent));
        }
        let UtilityResult { destination, target, .. } = self.info;
        match Behavior::for_plan(self.current) {
            Some(behavior) => {
                let stop_within = executor.config().reach(behavior) * config.approach_margin;
                executor.add_action(agent, ActionStep::new(behavior, destination, target));
                executor.add_action(agent, ActionStep::move_to(destination, stop_within));
                Ok(2)
            }
            None => {
                executor.add_action(agent, ActionStep::move_to(destination, 0.0));
                Ok(1)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Pick the winner from per-plan scores.
///
/// `favored` is the plan being executed with its skew and the agent's bias
/// for it; the skew is applied in place, and only to a positive score.  A
/// non-idle plan must beat idle strictly.  Among non-idle plans the favored
/// one wins an exact tie, otherwise the earlier in `PlanKind::ALL` does.
pub(crate) fn select_plan(
    scores:  &mut [f32; PlanKind::COUNT],
    favored: Option<(PlanKind, Skew, f32)>,
) -> PlanKind {
    let held = favored.map(|(plan, _, _)| plan);
    if let Some((plan, skew, bias)) = favored {
        let s = &mut scores[plan.index()];
        if *s > 0.0 {
            *s = skew.apply(*s, bias);
        }
    }

    let mut best = PlanKind::Idle;
    let mut best_score = scores[PlanKind::Idle.index()];
    for plan in PlanKind::ALL.into_iter().filter(|p| !p.is_idle()) {
        let s = scores[plan.index()];
        let keeps_tie = held == Some(plan) && !best.is_idle() && s >= best_score;
        if s > best_score || keeps_tie {
            best = plan;
            best_score = s;
        }
    }
    best
}

// ── PlannerStore ──────────────────────────────────────────────────────────────

/// Every agent's planner plus the memo caches they share.
pub struct PlannerStore {
    pub config: PlannerConfig,
    pub caches: UtilityCaches,
    planners: Vec<UtilityPlanner>,
}

impl PlannerStore {
    pub fn new(agent_count: usize, config: PlannerConfig) -> PlanningResult<Self> {
        config.validate()?;
        Ok(Self {
            caches: UtilityCaches::new(config.memo_divisions)?,
            config,
            planners: vec![UtilityPlanner::new(); agent_count],
        })
    }

    #[inline]
    pub fn planner(&self, agent: AgentId) -> &UtilityPlanner {
        &self.planners[agent.index()]
    }

    pub fn update_plan(
        &mut self,
        agent:     AgentId,
        view:      &PlanningView<'_>,
        rng:       &mut AgentRng,
        executing: bool,
    ) -> PlanDecision {
        self.planners[agent.index()].update_plan(agent, view, &mut self.caches, &self.config, rng, executing)
    }

    pub fn queue_actions_from_current_plan(
        &self,
        agent:    AgentId,
        executor: &mut ActionExecutor,
    ) -> PlanningResult<usize> {
        self.planners[agent.index()].queue_actions_from_current_plan(agent, executor, &self.config)
    }

    /// Back to the start-of-simulation state: every planner idle, every memo empty.
    pub fn reset(&mut self) {
        self.planners.iter_mut().for_each(UtilityPlanner::reset);
        self.caches.reset();
    }
}
