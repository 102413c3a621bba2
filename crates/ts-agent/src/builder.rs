//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use ts_agent::AgentStoreBuilder;
//!
//! let (store, rngs) = AgentStoreBuilder::new(100, /*seed=*/ 42)
//!     .teams(2)
//!     .max_health(80.0)
//!     .build();
//!
//! assert_eq!(store.count, 100);
//! assert_eq!(rngs.len(), 100);
//! assert_eq!(store.team[1], 1);
//! ```

use ts_core::AgentId;

use crate::{AgentRngs, AgentStore, Personality};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Arrays are allocated once; positions start at the origin and are placed
/// by the simulation builder.
pub struct AgentStoreBuilder {
    count: usize,
    seed: u64,
    teams: u8,
    max_health: f32,
    random_personality: bool,
}

impl AgentStoreBuilder {
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            teams: 1,
            max_health: 100.0,
            random_personality: true,
        }
    }

    /// Assign agents to `n` teams round-robin by id.  `0` is treated as `1`.
    pub fn teams(mut self, n: u8) -> Self {
        self.teams = n.max(1);
        self
    }

    pub fn max_health(mut self, hp: f32) -> Self {
        self.max_health = hp;
        self
    }

    /// Give every agent [`Personality::neutral`] instead of a random roll.
    /// Handy for tests that need exact utility values.
    pub fn neutral_personalities(mut self) -> Self {
        self.random_personality = false;
        self
    }

    pub fn build(self) -> (AgentStore, AgentRngs) {
        let mut store = AgentStore::new(self.count, self.max_health);
        let mut rngs = AgentRngs::new(self.count, self.seed);

        for i in 0..self.count {
            store.team[i] = (i % self.teams as usize) as u8;
            if self.random_personality {
                store.personality[i] = Personality::random(rngs.get_mut(AgentId(i as u32)));
            }
        }

        (store, rngs)
    }
}
