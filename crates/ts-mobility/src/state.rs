//! Per-agent movement state.

use ts_core::Vec2;

/// One agent's current route.
///
/// The agent is walking while `index < waypoints.len()`; `waypoints[index]`
/// is the next point it is heading for.  A finished or cleared route is
/// simply inactive, there is no separate flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementState {
    pub waypoints: Vec<Vec2>,
    pub index: usize,
    /// Where the agent asked to go.  With a shared path the last waypoint may
    /// differ from this by up to the sharing radius.
    pub goal: Vec2,
}

impl MovementState {
    pub fn new(waypoints: Vec<Vec2>, goal: Vec2) -> Self {
        Self { waypoints, index: 0, goal }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.index < self.waypoints.len()
    }

    /// Waypoints not yet reached, starting at the current index.
    #[inline]
    pub fn remaining(&self) -> &[Vec2] {
        &self.waypoints[self.index.min(self.waypoints.len())..]
    }

    #[inline]
    pub fn next_waypoint(&self) -> Option<Vec2> {
        self.waypoints.get(self.index).copied()
    }

    #[inline]
    pub fn final_waypoint(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }
}
