//! Response curves and the per-factor memo caches.

use crate::{PlanningResult, UtilityMemo};

/// Maps a normalized input in `[0, 1]` to a utility in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Curve {
    Linear,
    /// `1 - x`.
    Inverse,
    /// `x^exponent`.
    Power(f32),
    /// `1 / (1 + e^(-steepness * (x - midpoint)))`.  Negative steepness
    /// falls off instead of rising.
    Logistic { steepness: f32, midpoint: f32 },
}

impl Curve {
    pub fn evaluate(self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        let y = match self {
            Curve::Linear => x,
            Curve::Inverse => 1.0 - x,
            Curve::Power(e) => x.powf(e),
            Curve::Logistic { steepness, midpoint } => 1.0 / (1.0 + (-steepness * (x - midpoint)).exp()),
        };
        y.clamp(0.0, 1.0)
    }
}

/// The normalized sub-inputs scorers feed through the caches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Factor {
    /// Distance over the map diagonal; high utility when close.
    Proximity,
    /// Building stock fraction.
    Stock,
    /// How empty the agent's own supply is: `1 - held / capacity`.
    Need,
    /// Enemy distance over the threat horizon.
    Threat,
    /// `1 - health_fraction` of the patient.
    Injury,
    /// Building damage fraction.
    Damage,
    /// Fire intensity over the configured maximum.
    Blaze,
}

impl Factor {
    pub const COUNT: usize = 7;

    pub const ALL: [Factor; Factor::COUNT] = [
        Factor::Proximity,
        Factor::Stock,
        Factor::Need,
        Factor::Threat,
        Factor::Injury,
        Factor::Damage,
        Factor::Blaze,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn default_curve(self) -> Curve {
        match self {
            Factor::Proximity => Curve::Logistic { steepness: -10.0, midpoint: 0.35 },
            Factor::Stock => Curve::Power(0.5),
            Factor::Need => Curve::Power(1.5),
            Factor::Threat => Curve::Logistic { steepness: -8.0, midpoint: 0.5 },
            Factor::Injury => Curve::Logistic { steepness: 8.0, midpoint: 0.4 },
            Factor::Damage => Curve::Logistic { steepness: 8.0, midpoint: 0.3 },
            Factor::Blaze => Curve::Power(0.5),
        }
    }
}

/// One memo per [`Factor`], plus hit/miss counters over all of them.
///
/// Owned by the planner subsystem and shared by every agent's evaluation.
#[derive(Clone, Debug)]
pub struct UtilityCaches {
    curves: [Curve; Factor::COUNT],
    memos: Vec<UtilityMemo>,
    hits: u64,
    misses: u64,
}

impl UtilityCaches {
    /// Every factor over `[0, 1]` with `divisions` buckets and its default curve.
    pub fn new(divisions: usize) -> PlanningResult<Self> {
        let memos = Factor::ALL
            .iter()
            .map(|_| UtilityMemo::new(0.0, 1.0, divisions))
            .collect::<PlanningResult<Vec<_>>>()?;
        Ok(Self {
            curves: Factor::ALL.map(Factor::default_curve),
            memos,
            hits: 0,
            misses: 0,
        })
    }

    /// Replace a factor's curve.  Clears that factor's memo.
    pub fn with_curve(mut self, factor: Factor, curve: Curve) -> Self {
        self.curves[factor.index()] = curve;
        self.memos[factor.index()].reset();
        self
    }

    /// Curve output for `input`, from the memo when the bucket is filled.
    pub fn evaluate(&mut self, factor: Factor, input: f32) -> f32 {
        let memo = &mut self.memos[factor.index()];
        let found = memo.lookup(input);
        if found.hit {
            self.hits += 1;
            return found.value;
        }
        self.misses += 1;
        let value = self.curves[factor.index()].evaluate(input);
        memo.store(value, found.bucket);
        value
    }

    #[inline]
    pub fn memo(&self, factor: Factor) -> &UtilityMemo {
        &self.memos[factor.index()]
    }

    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Empty every memo and zero the counters.
    pub fn reset(&mut self) {
        self.memos.iter_mut().for_each(UtilityMemo::reset);
        self.hits = 0;
        self.misses = 0;
    }
}

