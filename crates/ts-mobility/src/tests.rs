//! Unit tests for ts-mobility.

use ts_agent::{AgentOrderings, AgentStore, AgentStoreBuilder};
use ts_core::{AgentId, TileCoord, Vec2};
use ts_spatial::{AStarPathfinder, TileMap};

use crate::{MobilityEngine, PathSharing};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn agents_at(points: &[(f32, f32)]) -> AgentStore {
    let (mut store, _) = AgentStoreBuilder::new(points.len(), 3).build();
    for (i, &(x, y)) in points.iter().enumerate() {
        store.position[i] = Vec2::new(x, y);
    }
    store
}

fn engine(agent_count: usize, sharing: PathSharing) -> MobilityEngine<AStarPathfinder> {
    MobilityEngine::new(AStarPathfinder::default(), agent_count, sharing)
}

const A: AgentId = AgentId(0);
const B: AgentId = AgentId(1);

// ── MovementState / MobilityStore ─────────────────────────────────────────────

#[cfg(test)]
mod store {
    use ts_core::{AgentId, Vec2};

    use crate::{MobilityStore, MovementState};

    #[test]
    fn remaining_follows_index() {
        let mut s = MovementState::new(vec![Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)], Vec2::new(2.0, 0.0));
        assert!(s.is_active());
        s.index = 1;
        assert_eq!(s.remaining(), &[Vec2::new(2.0, 0.0)]);
        s.index = 2;
        assert!(!s.is_active());
        assert!(s.remaining().is_empty());
        assert_eq!(s.next_waypoint(), None);
        assert_eq!(s.final_waypoint(), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn clear_deactivates() {
        let mut m = MobilityStore::new(2);
        m.assign(AgentId(1), vec![Vec2::new(3.0, 3.0)], Vec2::new(3.0, 3.0));
        assert!(m.is_moving(AgentId(1)));
        assert_eq!(m.moving_count(), 1);
        m.clear(AgentId(1));
        assert!(!m.is_moving(AgentId(1)));
        assert_eq!(m.moving_count(), 0);
    }
}

// ── Travel + advance ──────────────────────────────────────────────────────────

#[cfg(test)]
mod travel {
    use super::*;
    use crate::{MobilityError, MoveStatus, TravelSource};

    #[test]
    fn searched_route_then_walk_to_arrival() {
        let map = TileMap::new(6, 6);
        let mut agents = agents_at(&[(0.5, 0.5)]);
        let orderings = AgentOrderings::build(&mut agents);
        let mut eng = engine(1, PathSharing::disabled());

        let src = eng.begin_travel(A, Vec2::new(3.5, 0.5), &agents, &orderings, &map).unwrap();
        assert_eq!(src, TravelSource::Searched);
        assert_eq!(eng.store.get(A).waypoints.len(), 3);

        assert_eq!(eng.advance(A, &mut agents, 1.0, 1.5), MoveStatus::Moving);
        assert_eq!(agents.position[0], Vec2::new(2.0, 0.5));
        assert_eq!(agents.forward[0], Vec2::new(1.0, 0.0));
        assert_eq!(eng.store.get(A).index, 1);

        assert_eq!(eng.advance(A, &mut agents, 1.0, 10.0), MoveStatus::Arrived);
        assert_eq!(agents.position[0], Vec2::new(3.5, 0.5));
        assert_eq!(eng.advance(A, &mut agents, 1.0, 1.0), MoveStatus::Stationary);
        assert_eq!(eng.stats().searched, 1);
    }

    #[test]
    fn same_tile_goal_is_direct() {
        let map = TileMap::new(3, 3);
        let mut agents = agents_at(&[(1.2, 1.2)]);
        let orderings = AgentOrderings::build(&mut agents);
        let mut eng = engine(1, PathSharing::default());

        let goal = Vec2::new(1.8, 1.2);
        assert_eq!(eng.begin_travel(A, goal, &agents, &orderings, &map).unwrap(), TravelSource::Direct);
        assert_eq!(eng.store.get(A).waypoints, vec![goal]);
        assert_eq!(eng.stats().searched, 0);
    }

    #[test]
    fn unreachable_goal_fails_and_clears_route() {
        let layout = TileMap::from_ascii("...\n.#.\n...").unwrap();
        let mut agents = agents_at(&[(0.5, 0.5)]);
        let orderings = AgentOrderings::build(&mut agents);
        let mut eng = engine(1, PathSharing::disabled());
        eng.store.assign(A, vec![Vec2::new(2.5, 2.5)], Vec2::new(2.5, 2.5));

        let err = eng.begin_travel(A, Vec2::new(1.5, 1.5), &agents, &orderings, &layout.map);
        assert!(matches!(err, Err(MobilityError::Unreachable { .. })));
        assert!(!eng.store.is_moving(A));
        assert_eq!(eng.stats().failed, 1);
    }

    #[test]
    fn dead_agent_cannot_travel() {
        let map = TileMap::new(4, 4);
        let mut agents = agents_at(&[(0.5, 0.5)]);
        agents.health[0] = 0.0;
        let orderings = AgentOrderings::new();
        let mut eng = engine(1, PathSharing::default());
        let err = eng.begin_travel(A, Vec2::new(3.5, 3.5), &agents, &orderings, &map);
        assert!(matches!(err, Err(MobilityError::Dead(_))));
    }

    #[test]
    fn reset_clears_routes_and_stats() {
        let map = TileMap::new(4, 4);
        let mut agents = agents_at(&[(0.5, 0.5)]);
        let orderings = AgentOrderings::build(&mut agents);
        let mut eng = engine(1, PathSharing::disabled());
        eng.begin_travel(A, Vec2::new(3.5, 3.5), &agents, &orderings, &map).unwrap();
        eng.reset();
        assert!(!eng.store.is_moving(A));
        assert_eq!(eng.stats().searched, 0);
    }
}

// ── Path sharing ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod sharing {
    use super::*;
    use crate::{ShareAnchor, TravelSource};

    /// B walks first; A asks for the same destination afterwards.
    fn donor_setup(sharing: PathSharing) -> (TileMap, AgentStore, MobilityEngine<AStarPathfinder>) {
        let map = TileMap::new(10, 10);
        let mut agents = agents_at(&[(1.5, 0.5), (0.5, 0.5)]);
        let orderings = AgentOrderings::build(&mut agents);
        let mut eng = engine(2, sharing);
        let src = eng.begin_travel(B, Vec2::new(8.5, 8.5), &agents, &orderings, &map).unwrap();
        assert_eq!(src, TravelSource::Searched);
        (map, agents, eng)
    }

    #[test]
    fn shared_path_equals_donor_tail() {
        let (map, mut agents, mut eng) = donor_setup(PathSharing::default());
        eng.advance(B, &mut agents, 1.0, 1.0);
        let tail = eng.store.get(B).remaining().to_vec();
        assert!(!tail.is_empty());

        let orderings = AgentOrderings::build(&mut agents);
        let src = eng.begin_travel(A, Vec2::new(8.5, 8.5), &agents, &orderings, &map).unwrap();
        assert_eq!(src, TravelSource::Shared(B));
        assert_eq!(eng.store.get(A).waypoints, tail);
        assert_eq!(eng.stats().shared, 1);
        assert_eq!(eng.stats().searched, 1);
    }

    #[test]
    fn shared_copy_is_independent() {
        let (map, mut agents, mut eng) = donor_setup(PathSharing::default());
        let orderings = AgentOrderings::build(&mut agents);
        eng.begin_travel(A, Vec2::new(8.5, 8.5), &agents, &orderings, &map).unwrap();
        let before = eng.store.get(A).waypoints.clone();
        eng.stop(B);
        assert_eq!(eng.store.get(A).waypoints, before);
    }

    #[test]
    fn requester_anchor_finds_nearby_walker() {
        let sharing = PathSharing { anchor: ShareAnchor::Requester, ..PathSharing::default() };
        let (map, mut agents, mut eng) = donor_setup(sharing);
        let orderings = AgentOrderings::build(&mut agents);
        let src = eng.begin_travel(A, Vec2::new(8.5, 8.5), &agents, &orderings, &map).unwrap();
        assert_eq!(src, TravelSource::Shared(B));
    }

    #[test]
    fn destination_outside_radius_searches() {
        let (map, mut agents, mut eng) = donor_setup(PathSharing::default());
        let orderings = AgentOrderings::build(&mut agents);
        let src = eng.begin_travel(A, Vec2::new(8.5, 5.5), &agents, &orderings, &map).unwrap();
        assert_eq!(src, TravelSource::Searched);
    }

    #[test]
    fn dead_or_finished_donors_are_skipped() {
        let (map, mut agents, mut eng) = donor_setup(PathSharing::default());
        agents.health[1] = 0.0;
        let orderings = AgentOrderings::build(&mut agents);
        let src = eng.begin_travel(A, Vec2::new(8.5, 8.5), &agents, &orderings, &map).unwrap();
        assert_eq!(src, TravelSource::Searched);

        let (map, mut agents, mut eng) = donor_setup(PathSharing::default());
        eng.advance(B, &mut agents, 100.0, 1.0);
        let orderings = AgentOrderings::build(&mut agents);
        assert!(eng.sharing.find_donor(A, Vec2::new(8.5, 8.5), &agents, &orderings, &eng.store, &map).is_none());
    }

    #[test]
    fn donor_behind_wall_is_not_shared() {
        let mut map = TileMap::new(10, 10);
        for y in 0..9 {
            map.set_walkable(TileCoord::new(5, y), false);
        }
        let mut agents = agents_at(&[(1.5, 0.5), (7.5, 0.5)]);
        let orderings = AgentOrderings::build(&mut agents);
        let mut eng = engine(2, PathSharing::default());
        let goal = Vec2::new(9.5, 0.5);
        assert_eq!(eng.begin_travel(B, goal, &agents, &orderings, &map).unwrap(), TravelSource::Searched);

        let src = eng.begin_travel(A, goal, &agents, &orderings, &map).unwrap();
        assert_eq!(src, TravelSource::Searched);
        for _ in 0..40 {
            eng.advance(A, &mut agents, 1.0, 0.25);
            assert!(map.is_walkable(agents.position[0].tile()), "A stepped onto {}", agents.position[0]);
        }
    }

    #[test]
    fn zero_window_disables_sharing() {
        let (map, mut agents, mut eng) = donor_setup(PathSharing::disabled());
        let orderings = AgentOrderings::build(&mut agents);
        let src = eng.begin_travel(A, Vec2::new(8.5, 8.5), &agents, &orderings, &map).unwrap();
        assert_eq!(src, TravelSource::Searched);
    }
}
