//! Bucketed memoization over a continuous input domain.

use crate::{PlanningResult, UtilityError};

/// Outcome of [`UtilityMemo::lookup`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MemoLookup {
    pub hit: bool,
    /// The stored value on a hit, `0.0` on a miss.
    pub value: f32,
    /// Bucket the input fell into; pass it back to [`UtilityMemo::store`].
    pub bucket: usize,
}

/// `[min, max]` split into `divisions` equal buckets, each holding the last
/// value stored for it.
///
/// Inputs outside the domain are clamped onto the first or last bucket.  Two
/// inputs in the same bucket always see the same value until the bucket is
/// overwritten or the memo is reset.
#[derive(Clone, Debug)]
pub struct UtilityMemo {
    min: f32,
    max: f32,
    width: f32,
    buckets: Vec<Option<f32>>,
}

impl UtilityMemo {
    pub fn new(min: f32, max: f32, divisions: usize) -> PlanningResult<Self> {
        if divisions == 0 {
            return Err(UtilityError::NoDivisions);
        }
        if !(min < max) || !min.is_finite() || !max.is_finite() {
            return Err(UtilityError::InvalidDomain { min, max });
        }
        Ok(Self {
            min,
            max,
            width: (max - min) / divisions as f32,
            buckets: vec![None; divisions],
        })
    }

    /// Bucket index for `input`, always in `0..divisions`.  NaN maps to 0.
    pub fn bucket_of(&self, input: f32) -> usize {
        let x = if input.is_nan() { self.min } else { input.clamp(self.min, self.max) };
        let b = ((x - self.min) / self.width).floor() as usize;
        b.min(self.buckets.len() - 1)
    }

    pub fn lookup(&self, input: f32) -> MemoLookup {
        let bucket = self.bucket_of(input);
        match self.buckets[bucket] {
            Some(value) => MemoLookup { hit: true, value, bucket },
            None => MemoLookup { hit: false, value: 0.0, bucket },
        }
    }

    /// Overwrite `bucket`.  Out-of-range indices are ignored.
    pub fn store(&mut self, value: f32, bucket: usize) {
        if let Some(slot) = self.buckets.get_mut(bucket) {
            *slot = Some(value);
        }
    }

    pub fn reset(&mut self) {
        self.buckets.fill(None);
    }

    #[inline]
    pub fn divisions(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn domain(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Buckets holding a value.
    pub fn filled(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_some()).count()
    }
}
