//! Behavior categories an agent can plan for, and the resources they trade in.

/// The closed set of plans.  Exactly one is current per agent.
///
/// The declaration order is the candidate enumeration order used by the
/// planner: on an exact score tie the earlier variant wins.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanKind {
    GatherArrows,
    GatherLumber,
    GatherBandages,
    GatherWater,
    Shoot,
    Repair,
    Heal,
    PutOutFire,
    /// Wander to a random walkable tile.  Wins whenever nothing beats the idle
    /// threshold.
    #[default]
    Idle,
}

impl PlanKind {
    pub const COUNT: usize = 9;

    /// Every plan in enumeration order.
    pub const ALL: [PlanKind; PlanKind::COUNT] = [
        PlanKind::GatherArrows,
        PlanKind::GatherLumber,
        PlanKind::GatherBandages,
        PlanKind::GatherWater,
        PlanKind::Shoot,
        PlanKind::Repair,
        PlanKind::Heal,
        PlanKind::PutOutFire,
        PlanKind::Idle,
    ];

    /// Dense index for per-category arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The resource a gather plan collects.
    pub fn gathered(self) -> Option<Resource> {
        match self {
            PlanKind::GatherArrows   => Some(Resource::Arrows),
            PlanKind::GatherLumber   => Some(Resource::Lumber),
            PlanKind::GatherBandages => Some(Resource::Bandages),
            PlanKind::GatherWater    => Some(Resource::Water),
            _ => None,
        }
    }

    /// The resource a plan spends while it executes.
    pub fn consumed(self) -> Option<Resource> {
        match self {
            PlanKind::Shoot      => Some(Resource::Arrows),
            PlanKind::Repair     => Some(Resource::Lumber),
            PlanKind::Heal       => Some(Resource::Bandages),
            PlanKind::PutOutFire => Some(Resource::Water),
            _ => None,
        }
    }

    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, PlanKind::Idle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanKind::GatherArrows   => "gather-arrows",
            PlanKind::GatherLumber   => "gather-lumber",
            PlanKind::GatherBandages => "gather-bandages",
            PlanKind::GatherWater    => "gather-water",
            PlanKind::Shoot          => "shoot",
            PlanKind::Repair         => "repair",
            PlanKind::Heal           => "heal",
            PlanKind::PutOutFire     => "put-out-fire",
            PlanKind::Idle           => "idle",
        }
    }
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inventory item kinds.  Each maps to one resource building kind.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    Arrows,
    Lumber,
    Bandages,
    Water,
}

impl Resource {
    pub const COUNT: usize = 4;

    pub const ALL: [Resource; Resource::COUNT] =
        [Resource::Arrows, Resource::Lumber, Resource::Bandages, Resource::Water];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn gather_plan(self) -> PlanKind {
        match self {
            Resource::Arrows   => PlanKind::GatherArrows,
            Resource::Lumber   => PlanKind::GatherLumber,
            Resource::Bandages => PlanKind::GatherBandages,
            Resource::Water    => PlanKind::GatherWater,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Arrows   => "arrows",
            Resource::Lumber   => "lumber",
            Resource::Bandages => "bandages",
            Resource::Water    => "water",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
