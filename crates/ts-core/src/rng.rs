//! Seeded random streams.
//!
//! Every agent draws from its own stream, keyed by the run seed and its id,
//! so which agents got a full update earlier in a frame never changes what an
//! agent rolls next.  World events (fire ignition and spread, spawn
//! placement) draw from one shared [`SimRng`].

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Odd multiplier that scatters consecutive agent ids across the seed space.
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Generate a newtype over `SmallRng` with the sampling helpers the
/// simulation uses.
macro_rules! seeded_stream {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        $vis struct $name(SmallRng);

        impl $name {
            /// The underlying generator, for APIs generic over `rand::Rng`.
            #[inline]
            pub fn inner(&mut self) -> &mut SmallRng {
                &mut self.0
            }

            #[inline]
            pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
                self.0.gen_range(range)
            }

            /// `true` with probability `p`; out-of-range `p` saturates.
            #[inline]
            pub fn chance(&mut self, p: f64) -> bool {
                self.0.gen_bool(p.clamp(0.0, 1.0))
            }
        }
    };
}

seeded_stream! {
    /// One agent's stream: personality rolls and wander targets.
    pub struct AgentRng;
}

seeded_stream! {
    /// The world's stream.  Single-threaded use only.
    pub struct SimRng;
}

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        Self(SmallRng::seed_from_u64(run_seed ^ u64::from(agent.0).wrapping_mul(SEED_SPREAD)))
    }
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}
