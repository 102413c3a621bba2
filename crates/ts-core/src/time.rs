//! Frame-based simulation time.
//!
//! The simulation advances in fixed discrete frames.  Every frame carries the
//! same simulated duration (`frame_secs`), which is the `delta_seconds` handed
//! to every agent update.  Wall-clock time only matters to the scheduler's
//! per-frame update budget, which lives in `ts-schedule`.

use std::fmt;

use crate::{TsError, TsResult};

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Monotonically increasing frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    #[inline]
    pub fn next(self) -> Frame {
        Frame(self.0 + 1)
    }

    /// Frames elapsed from `earlier` to `self` (saturating).
    #[inline]
    pub fn since(self, earlier: Frame) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Frame {
    type Output = Frame;
    #[inline]
    fn add(self, rhs: u64) -> Frame {
        Frame(self.0 + rhs)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Current frame plus the fixed simulated duration of one frame.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds per frame.
    pub frame_secs: f32,
    pub current_frame: Frame,
}

impl SimClock {
    pub fn new(frame_secs: f32) -> Self {
        Self { frame_secs, current_frame: Frame::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_frame = self.current_frame.next();
    }

    /// Simulated seconds since frame 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_frame.0 as f64 * self.frame_secs as f64
    }

    /// Rewind to frame 0 (simulation restart).
    pub fn reset(&mut self) {
        self.current_frame = Frame::ZERO;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_frame, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed and the same budget decisions give
    /// identical runs.
    pub seed: u64,

    /// Frames simulated by `Sim::run`.
    pub total_frames: u64,

    /// Simulated seconds per frame (the `delta_seconds` given to agents).
    pub frame_secs: f32,

    /// Call the observer's snapshot hook every N frames.  0 disables it.
    pub snapshot_interval_frames: u64,
}

impl SimConfig {
    #[inline]
    pub fn end_frame(&self) -> Frame {
        Frame(self.total_frames)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.frame_secs)
    }

    /// Frames must have a positive, finite duration.
    pub fn validate(&self) -> TsResult<()> {
        if !(self.frame_secs > 0.0 && self.frame_secs.is_finite()) {
            return Err(TsError::Config(format!("frame_secs must be > 0, got {}", self.frame_secs)));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                     0,
            total_frames:             600,
            frame_secs:               1.0 / 30.0,
            snapshot_interval_frames: 0,
        }
    }
}
