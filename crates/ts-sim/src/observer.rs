//! Simulation observer trait for progress reporting and data collection.

use ts_agent::AgentStore;
use ts_core::{AgentId, Frame};
use ts_mobility::MobilityStore;
use ts_schedule::FrameReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// frame loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: budget printer
///
/// ```rust,ignore
/// struct BudgetPrinter;
///
/// impl SimObserver for BudgetPrinter {
///     fn on_frame_end(&mut self, frame: Frame, report: &FrameReport) {
///         println!("{frame}: {} full / {} quick", report.full_updates, report.quick_updates);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each frame, before world dynamics.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called once the scheduler has serviced every living agent.
    fn on_frame_end(&mut self, _frame: Frame, _report: &FrameReport) {}

    /// Called once per agent killed during `frame`, after the frame's
    /// updates, in the order the kills happened.
    fn on_agent_death(&mut self, _frame: Frame, _agent: AgentId) {}

    /// Called every `config.snapshot_interval_frames` frames with read-only
    /// agent and movement state.
    fn on_snapshot(&mut self, _frame: Frame, _agents: &AgentStore, _mobility: &MobilityStore) {}

    /// Called once after the final frame completes.
    fn on_sim_end(&mut self, _final_frame: Frame) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
