//! village: two teams of villagers on a walled map, gathering, fighting,
//! healing and putting out fires under a 4 ms per-frame update budget.
//!
//! ```text
//! RUST_LOG=info cargo run -p village --release
//! RUST_LOG=ts_utility=debug,info cargo run -p village   # every plan switch
//! ```

use std::time::Instant;

use anyhow::Result;
use tracing::info;

use ts_agent::{AgentStore, AgentStoreBuilder};
use ts_core::{AgentId, Frame, PlanKind, SimConfig};
use ts_mobility::MobilityStore;
use ts_schedule::{FrameReport, SchedulerConfig};
use ts_sim::{SimBuilder, SimObserver, WorldConfig};
use ts_spatial::AStarPathfinder;

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: usize = 400;
const TEAMS:       u8    = 2;
const SEED:        u64   = 42;
const FRAMES:      u64   = 30 * 60; // one simulated minute at 30 fps
const SNAPSHOT:    u64   = 30 * 10;

const MAP: &str = "
    ........................................
    ..A.......H.........#.........H.......A.
    ....................#...................
    ......L.............#.............L.....
    ....................#...................
    ..I.......W.........#.........W.......I.
    ....................#...................
    ........~~~~~~..................~~~~~~..
    ........~~~~~~..................~~~~~~..
    ....................#...................
    ..H.......L.........#.........L.......H.
    ....................#...................
    ..W.......I.........#.........I.......W.
    ........................................
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs budget use and plan mix at each snapshot.
#[derive(Default)]
struct VillageLog {
    full: usize,
    quick: usize,
    exhausted: usize,
    deaths: usize,
}

impl SimObserver for VillageLog {
    fn on_frame_end(&mut self, _frame: Frame, report: &FrameReport) {
        self.full += report.full_updates;
        self.quick += report.quick_updates;
        if report.budget_exhausted {
            self.exhausted += 1;
        }
    }

    fn on_agent_death(&mut self, frame: Frame, agent: AgentId) {
        self.deaths += 1;
        info!(%frame, %agent, total = self.deaths, "villager lost");
    }

    fn on_snapshot(&mut self, frame: Frame, agents: &AgentStore, mobility: &MobilityStore) {
        info!(
            %frame,
            alive = agents.alive_count(),
            walking = mobility.moving_count(),
            full = self.full,
            quick = self.quick,
            budget_exhausted_frames = self.exhausted,
            "snapshot",
        );
    }

    fn on_sim_end(&mut self, frame: Frame) {
        info!(%frame, deaths = self.deaths, "run finished");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let config = SimConfig {
        seed:                     SEED,
        total_frames:             FRAMES,
        frame_secs:               1.0 / 30.0,
        snapshot_interval_frames: SNAPSHOT,
    };
    let (agents, rngs) = AgentStoreBuilder::new(AGENT_COUNT, SEED).teams(TEAMS).build();

    let mut sim = SimBuilder::new(config, agents, rngs, AStarPathfinder::default())
        .ascii_map(MAP)
        .scheduler(SchedulerConfig { frame_budget_us: 4_000, ..SchedulerConfig::default() })
        .world(WorldConfig { ignite_chance: 0.01, ..WorldConfig::default() })
        .build()?;

    let t0 = Instant::now();
    let mut log = VillageLog::default();
    sim.run(&mut log);
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "wall time");

    let stats = sim.world.mobility.stats();
    info!(
        shared = stats.shared,
        searched = stats.searched,
        failed = stats.failed,
        memo_hits = sim.world.planners.caches.hits(),
        memo_misses = sim.world.planners.caches.misses(),
        "path and memo reuse",
    );

    let mut mix = [0usize; PlanKind::COUNT];
    for agent in sim.agents.alive_ids() {
        mix[sim.summary(agent).plan.index()] += 1;
    }
    for plan in PlanKind::ALL {
        info!(plan = plan.as_str(), agents = mix[plan.index()], "plan mix");
    }

    for agent in [AgentId(0), AgentId(1)] {
        let s = sim.summary(agent);
        info!(
            %agent,
            alive = s.alive,
            health = s.health,
            plan = s.plan.as_str(),
            score = s.plan_score,
            stack = s.stack_depth,
            arrows = s.inventory.arrows(),
            lumber = s.inventory.lumber(),
            bandages = s.inventory.bandages(),
            water = s.inventory.water(),
            "summary",
        );
    }

    sim.reset();
    sim.run_frames(SNAPSHOT, &mut VillageLog::default());
    info!(frame = %sim.current_frame(), alive = sim.agents.alive_count(), "after reset");

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
