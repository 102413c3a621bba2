//! Per-agent personality and inventory.

use ts_core::{AgentRng, PlanKind, Resource};

/// Per-behavior bias and efficiency scalars.
///
/// `bias` scales how much an agent wants a plan category and sits in
/// `[0, 1]`.  `efficiency` scales how fast the agent performs the matching
/// behavior; `1.0` is nominal and values above it are allowed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Personality {
    pub bias: [f32; PlanKind::COUNT],
    pub efficiency: [f32; PlanKind::COUNT],
}

impl Personality {
    /// Every bias 1.0, every efficiency 1.0.
    pub fn neutral() -> Self {
        Self {
            bias:       [1.0; PlanKind::COUNT],
            efficiency: [1.0; PlanKind::COUNT],
        }
    }

    /// Roll bias uniformly in `[0.25, 1.0)` and efficiency in `[0.5, 1.5)`.
    pub fn random(rng: &mut AgentRng) -> Self {
        let mut p = Self::neutral();
        for kind in PlanKind::ALL {
            p.bias[kind.index()] = rng.gen_range(0.25..1.0);
            p.efficiency[kind.index()] = rng.gen_range(0.5..1.5);
        }
        p
    }

    #[inline]
    pub fn bias(&self, kind: PlanKind) -> f32 {
        self.bias[kind.index()]
    }

    #[inline]
    pub fn efficiency(&self, kind: PlanKind) -> f32 {
        self.efficiency[kind.index()]
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Item counts carried by one agent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    counts: [u32; Resource::COUNT],
}

impl Inventory {
    #[inline]
    pub fn count(&self, r: Resource) -> u32 {
        self.counts[r.index()]
    }

    #[inline]
    pub fn has(&self, r: Resource) -> bool {
        self.counts[r.index()] > 0
    }

    pub fn add(&mut self, r: Resource, n: u32) {
        let slot = &mut self.counts[r.index()];
        *slot = slot.saturating_add(n);
    }

    /// Remove up to `n` items, returning how many were actually taken.
    pub fn take(&mut self, r: Resource, n: u32) -> u32 {
        let slot = &mut self.counts[r.index()];
        let taken = n.min(*slot);
        *slot -= taken;
        taken
    }

    pub fn arrows(&self) -> u32 { self.count(Resource::Arrows) }
    pub fn lumber(&self) -> u32 { self.count(Resource::Lumber) }
    pub fn bandages(&self) -> u32 { self.count(Resource::Bandages) }
    pub fn water(&self) -> u32 { self.count(Resource::Water) }

    pub fn clear(&mut self) {
        self.counts = [0; Resource::COUNT];
    }
}
