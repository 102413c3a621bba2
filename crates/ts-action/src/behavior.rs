//! Behavior variants and the steps that carry them.

use ts_core::{PlanKind, Resource, Target, Vec2};

use crate::ActionFailure;

/// What a step does each tick.  A closed set dispatched by the executor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Behavior {
    /// Walk toward the step's destination until within `stop_within` of it.
    MoveTo { stop_within: f32 },
    /// Take stock from the target building into the inventory.
    Gather(Resource),
    /// Fire arrows at the target agent.
    Shoot,
    /// Spend lumber restoring the target building's health.
    Repair,
    /// Spend bandages restoring the target agent's health.
    Heal,
    /// Spend water lowering the target fire's intensity.
    Extinguish,
}

impl Behavior {
    /// The behavior that carries out `plan` once the agent is in place.
    /// `Idle` is pure movement and has none.
    pub fn for_plan(plan: PlanKind) -> Option<Behavior> {
        if let Some(r) = plan.gathered() {
            return Some(Behavior::Gather(r));
        }
        match plan {
            PlanKind::Shoot => Some(Behavior::Shoot),
            PlanKind::Repair => Some(Behavior::Repair),
            PlanKind::Heal => Some(Behavior::Heal),
            PlanKind::PutOutFire => Some(Behavior::Extinguish),
            _ => None,
        }
    }

    /// The plan whose personality efficiency scales this behavior.
    pub fn plan(self) -> PlanKind {
        match self {
            Behavior::MoveTo { .. } => PlanKind::Idle,
            Behavior::Gather(r) => r.gather_plan(),
            Behavior::Shoot => PlanKind::Shoot,
            Behavior::Repair => PlanKind::Repair,
            Behavior::Heal => PlanKind::Heal,
            Behavior::Extinguish => PlanKind::PutOutFire,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Behavior::MoveTo { .. } => "move-to",
            Behavior::Gather(_) => "gather",
            Behavior::Shoot => "shoot",
            Behavior::Repair => "repair",
            Behavior::Heal => "heal",
            Behavior::Extinguish => "extinguish",
        }
    }
}

/// One pending unit of work on an agent's stack.  Never mutated after push.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActionStep {
    pub behavior: Behavior,
    pub destination: Vec2,
    pub target: Option<Target>,
}

impl ActionStep {
    pub fn new(behavior: Behavior, destination: Vec2, target: Option<Target>) -> Self {
        Self { behavior, destination, target }
    }

    pub fn move_to(destination: Vec2, stop_within: f32) -> Self {
        Self::new(Behavior::MoveTo { stop_within }, destination, None)
    }
}

/// Result of running the top step for one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepStatus {
    InProgress,
    /// The step finished and was popped.
    Done,
    /// The step gave up; the stack has been cleared.
    Failed(ActionFailure),
}

impl StepStatus {
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, StepStatus::Failed(_))
    }
}
