//! Typed index wrappers for the three entity arenas.
//!
//! Agents, buildings and fires each live in a contiguous store and are
//! referenced by index, never by address.  Resorting the scheduler's
//! orderings or growing a store therefore never invalidates an id.

use std::fmt;

/// Generate a typed id wrapper around a `u32` arena index.
macro_rules! arena_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel for "no entity".
            pub const INVALID: $name = $name(u32::MAX);

            /// Position in the owning arena.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

arena_id! {
    /// Index of an agent in the SoA `AgentStore`.
    pub struct AgentId;
}

arena_id! {
    /// Index of a building in `PointsOfInterest`.
    pub struct BuildingId;
}

arena_id! {
    /// Index of a fire in `PointsOfInterest`.  Extinguished fires keep their
    /// slot so outstanding ids stay meaningful.
    pub struct FireId;
}

/// The entity an action step or utility result is aimed at.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Agent(AgentId),
    Building(BuildingId),
    Fire(FireId),
}

impl Target {
    pub fn agent(self) -> Option<AgentId> {
        match self {
            Target::Agent(a) => Some(a),
            _ => None,
        }
    }

    pub fn building(self) -> Option<BuildingId> {
        match self {
            Target::Building(b) => Some(b),
            _ => None,
        }
    }

    pub fn fire(self) -> Option<FireId> {
        match self {
            Target::Fire(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Agent(a)    => a.fmt(f),
            Target::Building(b) => b.fmt(f),
            Target::Fire(x)     => x.fmt(f),
        }
    }
}
