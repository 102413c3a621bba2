//! Unit tests for ts-schedule.

use ts_agent::{AgentOrderings, AgentStore, AgentStoreBuilder, BASELINE_PRIORITY};
use ts_core::AgentId;

use crate::{AgentScheduler, AgentUpdater, BudgetClock, FrozenClock, SchedulerConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Counts full and quick updates per agent.
struct Counter {
    full: Vec<u32>,
    quick: Vec<u32>,
}

impl Counter {
    fn new(n: usize) -> Self {
        Self { full: vec![0; n], quick: vec![0; n] }
    }
}

impl AgentUpdater for Counter {
    fn update(&mut self, agent: AgentId, _dt: f32, _agents: &mut AgentStore, _o: &AgentOrderings) {
        self.full[agent.index()] += 1;
    }

    fn quick_update(&mut self, agent: AgentId, _dt: f32, _agents: &mut AgentStore, _o: &AgentOrderings) {
        self.quick[agent.index()] += 1;
    }
}

/// Advances by `step` µs on every read.
struct StepClock {
    t: u64,
    step: u64,
}

impl BudgetClock for StepClock {
    fn now_us(&mut self) -> u64 {
        let now = self.t;
        self.t += self.step;
        now
    }
}

fn agents(n: usize) -> AgentStore {
    AgentStoreBuilder::new(n, 1).build().0
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn rejects_zero_increment_and_interval() {
        let mut a = agents(2);
        let cfg = SchedulerConfig { priority_increment: 0, ..SchedulerConfig::default() };
        assert!(AgentScheduler::new(cfg, &mut a).is_err());
        let cfg = SchedulerConfig { resort_interval: 0, ..SchedulerConfig::default() };
        assert!(AgentScheduler::new(cfg, &mut a).is_err());
        let cfg = SchedulerConfig { max_full_updates: Some(1), min_full_updates: 2, ..SchedulerConfig::default() };
        assert!(AgentScheduler::new(cfg, &mut a).is_err());
    }

    #[test]
    fn fixed_is_valid() {
        assert!(SchedulerConfig::fixed(10).validate().is_ok());
        assert!(SchedulerConfig::fixed(0).validate().is_ok());
    }
}

// ── Frames ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod frames {
    use super::*;

    #[test]
    fn cap_splits_full_and_quick() {
        let mut a = agents(20);
        let mut s = AgentScheduler::new(SchedulerConfig::fixed(5), &mut a).unwrap();
        let mut c = Counter::new(20);
        let r = s.run_frame(&mut a, &mut c, 0.1, &mut FrozenClock);
        assert_eq!(r.full_updates, 5);
        assert_eq!(r.quick_updates, 15);
        assert!(!r.budget_exhausted);
        for i in 0..20 {
            assert_eq!(c.full[i] + c.quick[i], 1, "each agent updated exactly once");
        }
    }

    #[test]
    fn priorities_reset_or_rise() {
        let mut a = agents(4);
        let cfg = SchedulerConfig { priority_increment: 3, ..SchedulerConfig::fixed(1) };
        let mut s = AgentScheduler::new(cfg, &mut a).unwrap();
        let mut c = Counter::new(4);
        s.run_frame(&mut a, &mut c, 0.1, &mut FrozenClock);
        for i in 0..4 {
            let expect = if c.full[i] == 1 { BASELINE_PRIORITY } else { BASELINE_PRIORITY + 3 };
            assert_eq!(a.priority[i], expect);
        }
    }

    #[test]
    fn budget_stops_new_full_updates() {
        let mut a = agents(50);
        let cfg = SchedulerConfig { frame_budget_us: 100, ..SchedulerConfig::default() };
        let mut s = AgentScheduler::new(cfg, &mut a).unwrap();
        let mut c = Counter::new(50);
        let r = s.run_frame(&mut a, &mut c, 0.1, &mut StepClock { t: 0, step: 10 });
        assert_eq!(r.full_updates, 10);
        assert!(r.budget_exhausted);
        assert_eq!(r.quick_updates, 40);
    }

    #[test]
    fn overhead_shrinks_next_budget() {
        let mut a = agents(50);
        let cfg = SchedulerConfig { frame_budget_us: 100, ..SchedulerConfig::default() };
        let mut s = AgentScheduler::new(cfg, &mut a).unwrap();
        s.record_overhead(60);
        assert_eq!(s.budget_us(), 40);
        let mut c = Counter::new(50);
        let r = s.run_frame(&mut a, &mut c, 0.1, &mut StepClock { t: 0, step: 10 });
        assert_eq!(r.budget_us, 40);
        assert_eq!(r.full_updates, 4);

        s.record_overhead(1_000);
        assert_eq!(s.budget_us(), 0);
    }

    #[test]
    fn spent_budget_still_grants_minimum() {
        let mut a = agents(10);
        let cfg = SchedulerConfig { frame_budget_us: 0, min_full_updates: 2, ..SchedulerConfig::default() };
        let mut s = AgentScheduler::new(cfg, &mut a).unwrap();
        let mut c = Counter::new(10);
        let r = s.run_frame(&mut a, &mut c, 0.1, &mut StepClock { t: 0, step: 10 });
        assert_eq!(r.full_updates, 2);
    }

    #[test]
    fn dead_agents_get_nothing() {
        let mut a = agents(6);
        let mut s = AgentScheduler::new(SchedulerConfig::fixed(6), &mut a).unwrap();
        a.health[2] = 0.0;
        let mut c = Counter::new(6);
        let r = s.run_frame(&mut a, &mut c, 0.1, &mut FrozenClock);
        assert_eq!(r.full_updates, 5);
        assert_eq!(r.quick_updates, 0);
        assert_eq!((c.full[2], c.quick[2]), (0, 0));
    }

    #[test]
    fn resort_happens_on_interval() {
        let mut a = agents(4);
        let cfg = SchedulerConfig { resort_interval: 3, ..SchedulerConfig::fixed(1) };
        let mut s = AgentScheduler::new(cfg, &mut a).unwrap();
        let mut c = Counter::new(4);
        let resorted: Vec<bool> =
            (0..7).map(|_| s.run_frame(&mut a, &mut c, 0.1, &mut FrozenClock).resorted).collect();
        assert_eq!(resorted, vec![false, false, false, true, false, false, true]);
    }

    #[test]
    fn dead_agents_leave_orderings_on_resort() {
        let mut a = agents(5);
        let mut s = AgentScheduler::new(SchedulerConfig::fixed(1), &mut a).unwrap();
        a.health[0] = 0.0;
        a.health[4] = 0.0;
        let mut c = Counter::new(5);
        s.run_frame(&mut a, &mut c, 0.1, &mut FrozenClock);
        s.run_frame(&mut a, &mut c, 0.1, &mut FrozenClock);
        assert_eq!(s.orderings().len(), 3);
    }

    #[test]
    fn reset_clears_totals() {
        let mut a = agents(3);
        let mut s = AgentScheduler::new(SchedulerConfig::fixed(1), &mut a).unwrap();
        let mut c = Counter::new(3);
        s.run_frame(&mut a, &mut c, 0.1, &mut FrozenClock);
        assert_eq!((s.total_full_updates(), s.total_quick_updates()), (1, 2));
        s.reset(&mut a);
        assert_eq!(s.frames(), 0);
        assert_eq!(s.total_full_updates(), 0);
        assert_eq!(s.cursor(), 0);
    }
}

// ── Fairness ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fairness {
    use super::*;

    /// Frames until every living agent has had a full update.
    fn frames_to_cover(n: usize, k: usize, resort_interval: u32) -> u32 {
        let mut a = agents(n);
        let cfg = SchedulerConfig { resort_interval, ..SchedulerConfig::fixed(k) };
        let mut s = AgentScheduler::new(cfg, &mut a).unwrap();
        let mut c = Counter::new(n);
        let mut frames = 0;
        while c.full.iter().any(|&f| f == 0) {
            s.run_frame(&mut a, &mut c, 1.0 / 30.0, &mut FrozenClock);
            frames += 1;
            assert!(frames <= 10 * n as u32, "starvation");
        }
        frames
    }

    #[test]
    fn hundred_agents_ten_per_frame_cover_in_ten_frames() {
        assert_eq!(frames_to_cover(100, 10, 1), 10);
    }

    #[test]
    fn bound_holds_for_any_resort_interval() {
        for interval in [1, 2, 3, 7, 10, 50] {
            let frames = frames_to_cover(100, 10, interval);
            assert_eq!(frames, 10, "resort_interval {interval}");
        }
    }

    #[test]
    fn ceil_n_over_k() {
        assert_eq!(frames_to_cover(25, 10, 1), 3);
        assert_eq!(frames_to_cover(7, 3, 4), 3);
    }

    #[test]
    fn nobody_serviced_twice_before_everyone_once() {
        let mut a = agents(30);
        let mut s = AgentScheduler::new(SchedulerConfig::fixed(4), &mut a).unwrap();
        let mut c = Counter::new(30);
        for _ in 0..7 {
            s.run_frame(&mut a, &mut c, 0.1, &mut FrozenClock);
        }
        assert!(c.full.iter().all(|&f| f <= 1), "28 updates over 30 agents");
        assert_eq!(c.full.iter().sum::<u32>(), 28);
    }

    #[test]
    fn skipped_priority_tracks_frames_waited() {
        let mut a = agents(10);
        let mut s = AgentScheduler::new(SchedulerConfig::fixed(1), &mut a).unwrap();
        let mut c = Counter::new(10);
        for _ in 0..5 {
            s.run_frame(&mut a, &mut c, 0.1, &mut FrozenClock);
        }
        for i in 0..10 {
            if c.full[i] == 0 {
                assert_eq!(a.priority[i], BASELINE_PRIORITY + 5);
            }
        }
    }
}
