//! Unit tests for ts-utility.

use ts_action::ActionConfig;
use ts_agent::{AgentOrderings, AgentStore, AgentStoreBuilder};
use ts_core::{AgentId, AgentRng, Vec2};
use ts_spatial::{PointsOfInterest, TileMap};

use crate::PlanningView;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Owns what a `PlanningView` borrows.  Agents alternate teams 0/1 and have
/// neutral personalities (bias 1.0 everywhere).
struct Fixture {
    agents:    AgentStore,
    orderings: AgentOrderings,
    poi:       PointsOfInterest,
    map:       TileMap,
    actions:   ActionConfig,
}

impl Fixture {
    fn new(points: &[(f32, f32)]) -> Self {
        let (mut agents, _) = AgentStoreBuilder::new(points.len(), 11)
            .teams(2)
            .neutral_personalities()
            .build();
        for (i, &(x, y)) in points.iter().enumerate() {
            agents.position[i] = Vec2::new(x, y);
        }
        let orderings = AgentOrderings::build(&mut agents);
        Self {
            agents,
            orderings,
            poi: PointsOfInterest::new(),
            map: TileMap::new(20, 20),
            actions: ActionConfig::default(),
        }
    }

    fn view(&self) -> PlanningView<'_> {
        PlanningView {
            agents:    &self.agents,
            orderings: &self.orderings,
            poi:       &self.poi,
            map:       &self.map,
            actions:   &self.actions,
        }
    }
}

fn rng() -> AgentRng {
    AgentRng::new(5, AgentId(0))
}

const A0: AgentId = AgentId(0);

// ── UtilityMemo ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod memo {
    use crate::{UtilityError, UtilityMemo};

    #[test]
    fn rejects_bad_domains() {
        assert!(matches!(UtilityMemo::new(0.0, 1.0, 0), Err(UtilityError::NoDivisions)));
        assert!(matches!(UtilityMemo::new(1.0, 1.0, 4), Err(UtilityError::InvalidDomain { .. })));
        assert!(matches!(UtilityMemo::new(2.0, 1.0, 4), Err(UtilityError::InvalidDomain { .. })));
        assert!(matches!(UtilityMemo::new(0.0, f32::NAN, 4), Err(UtilityError::InvalidDomain { .. })));
    }

    #[test]
    fn buckets_are_equal_width_and_clamped() {
        let m = UtilityMemo::new(0.0, 10.0, 5).unwrap();
        assert_eq!(m.bucket_of(0.0), 0);
        assert_eq!(m.bucket_of(3.9), 1);
        assert_eq!(m.bucket_of(4.0), 2);
        assert_eq!(m.bucket_of(10.0), 4, "max lands in the last bucket");
        assert_eq!(m.bucket_of(-5.0), 0);
        assert_eq!(m.bucket_of(1e9), 4);
        assert_eq!(m.bucket_of(f32::NAN), 0);
    }

    #[test]
    fn offset_domain() {
        let m = UtilityMemo::new(-1.0, 1.0, 4).unwrap();
        assert_eq!(m.bucket_of(-0.75), 0);
        assert_eq!(m.bucket_of(0.0), 2);
        assert_eq!(m.bucket_of(0.99), 3);
    }

    #[test]
    fn miss_store_hit() {
        let mut m = UtilityMemo::new(0.0, 1.0, 4).unwrap();
        let first = m.lookup(0.3);
        assert!(!first.hit);
        assert_eq!(first.bucket, 1);
        m.store(0.8, first.bucket);

        let again = m.lookup(0.45);
        assert!(again.hit);
        assert_eq!(again.value, 0.8);
        assert_eq!(m.filled(), 1);
    }

    #[test]
    fn same_bucket_lookups_are_identical() {
        let mut m = UtilityMemo::new(0.0, 100.0, 10).unwrap();
        assert_eq!(m.lookup(21.0), m.lookup(29.5));
        m.store(0.25, 2);
        assert_eq!(m.lookup(21.0), m.lookup(29.5));
    }

    #[test]
    fn reset_empties_every_bucket() {
        let mut m = UtilityMemo::new(0.0, 1.0, 3).unwrap();
        m.store(1.0, 0);
        m.store(1.0, 2);
        m.store(1.0, 99);
        assert_eq!(m.filled(), 2);
        m.reset();
        assert_eq!(m.filled(), 0);
        assert!(!m.lookup(0.0).hit);
    }
}

// ── Curves + caches ───────────────────────────────────────────────────────────

#[cfg(test)]
mod curves {
    use crate::{Curve, Factor, UtilityCaches};

    #[test]
    fn shapes() {
        assert_eq!(Curve::Linear.evaluate(0.25), 0.25);
        assert_eq!(Curve::Inverse.evaluate(0.25), 0.75);
        assert_eq!(Curve::Power(2.0).evaluate(0.5), 0.25);
        let mid = Curve::Logistic { steepness: 10.0, midpoint: 0.5 }.evaluate(0.5);
        assert!((mid - 0.5).abs() < 1e-6);
        assert_eq!(Curve::Linear.evaluate(7.0), 1.0);
        assert_eq!(Curve::Inverse.evaluate(-3.0), 1.0);
    }

    #[test]
    fn falling_logistic_prefers_small_inputs() {
        let c = Factor::Proximity.default_curve();
        assert!(c.evaluate(0.0) > c.evaluate(0.5));
        assert!(c.evaluate(0.5) > c.evaluate(1.0));
    }

    #[test]
    fn caches_memoize_per_factor() {
        let mut caches = UtilityCaches::new(4).unwrap().with_curve(Factor::Stock, Curve::Linear);
        assert_eq!(caches.evaluate(Factor::Stock, 0.30), 0.30);
        assert_eq!(caches.evaluate(Factor::Stock, 0.45), 0.30, "same bucket returns the stored value");
        assert_eq!((caches.hits(), caches.misses()), (1, 1));

        caches.evaluate(Factor::Need, 0.30);
        assert_eq!(caches.misses(), 2, "factors do not share buckets");
        assert_eq!(caches.memo(Factor::Stock).filled(), 1);

        caches.reset();
        assert_eq!(caches.memo(Factor::Stock).filled(), 0);
        assert_eq!((caches.hits(), caches.misses()), (0, 0));
    }

    #[test]
    fn zero_divisions_rejected() {
        assert!(UtilityCaches::new(0).is_err());
    }
}

// ── Skew + selection ──────────────────────────────────────────────────────────

#[cfg(test)]
mod selection {
    use ts_core::PlanKind;

    use crate::planner::select_plan;
    use crate::Skew;

    fn scores(pairs: &[(PlanKind, f32)], idle: f32) -> [f32; PlanKind::COUNT] {
        let mut s = [0.0; PlanKind::COUNT];
        s[PlanKind::Idle.index()] = idle;
        for &(p, v) in pairs {
            s[p.index()] = v;
        }
        s
    }

    #[test]
    fn skew_variants() {
        assert!((Skew::default().apply(0.5, 1.0) - 0.55).abs() < 1e-6);
        let scaled = Skew { personality_scaled: true, ..Skew::default() };
        assert!((scaled.apply(0.5, 0.5) - 0.525).abs() < 1e-6);
        assert!((Skew::multiplicative(1.1).apply(0.5, 1.0) - 0.55).abs() < 1e-6);
        assert_eq!(Skew::NONE.apply(0.4, 1.0), 0.4);
    }

    #[test]
    fn current_plan_holds_against_small_margin() {
        let mut s = scores(&[(PlanKind::Shoot, 0.50), (PlanKind::Heal, 0.52)], 0.05);
        let favored = Some((PlanKind::Shoot, Skew::additive(0.02), 1.0));
        assert_eq!(select_plan(&mut s, favored), PlanKind::Shoot);
    }

    #[test]
    fn current_plan_holds_when_enumerated_after_rival() {
        let mut s = scores(&[(PlanKind::Shoot, 0.52), (PlanKind::Heal, 0.50)], 0.05);
        let favored = Some((PlanKind::Heal, Skew::additive(0.02), 1.0));
        assert_eq!(select_plan(&mut s, favored), PlanKind::Heal);
    }

    #[test]
    fn favored_tie_with_idle_still_goes_to_idle() {
        let mut s = scores(&[(PlanKind::Heal, 0.25)], 0.5);
        let favored = Some((PlanKind::Heal, Skew::additive(0.25), 1.0));
        assert_eq!(select_plan(&mut s, favored), PlanKind::Idle);
    }

    #[test]
    fn without_skew_the_higher_score_wins() {
        let mut s = scores(&[(PlanKind::Shoot, 0.50), (PlanKind::Heal, 0.52)], 0.05);
        assert_eq!(select_plan(&mut s, None), PlanKind::Heal);
    }

    #[test]
    fn larger_margin_overcomes_skew() {
        let mut s = scores(&[(PlanKind::Shoot, 0.50), (PlanKind::Heal, 0.60)], 0.05);
        let favored = Some((PlanKind::Shoot, Skew::additive(0.05), 1.0));
        assert_eq!(select_plan(&mut s, favored), PlanKind::Heal);
    }

    #[test]
    fn exact_tie_goes_to_earlier_candidate() {
        let mut s = scores(&[(PlanKind::Repair, 0.4), (PlanKind::GatherLumber, 0.4)], 0.05);
        assert_eq!(select_plan(&mut s, None), PlanKind::GatherLumber);
    }

    #[test]
    fn all_zero_means_idle() {
        let mut s = scores(&[], 0.0);
        assert_eq!(select_plan(&mut s, None), PlanKind::Idle);
        let mut s = scores(&[(PlanKind::Shoot, 0.0)], 0.05);
        let favored = Some((PlanKind::Shoot, Skew::additive(0.5), 1.0));
        assert_eq!(select_plan(&mut s, favored), PlanKind::Idle, "a zero score is never skewed");
    }

    #[test]
    fn idle_wins_ties_with_threshold() {
        let mut s = scores(&[(PlanKind::GatherArrows, 0.05)], 0.05);
        assert_eq!(select_plan(&mut s, None), PlanKind::Idle);
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use ts_action::{ActionExecutor, Behavior};
    use ts_core::{PlanKind, Resource, Target, TileCoord};
    use ts_spatial::BuildingKind;

    use super::*;
    use crate::{PlannerConfig, PlannerState, PlannerStore, UtilityError};

    fn store(n: usize) -> PlannerStore {
        PlannerStore::new(n, PlannerConfig::default()).unwrap()
    }

    #[test]
    fn nothing_to_do_is_idle() {
        let f = Fixture::new(&[(0.5, 0.5)]);
        let mut planners = store(1);
        let d = planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(d.plan, PlanKind::Idle);
        assert!(!d.changed);
        assert_eq!(planners.planner(A0).state(), PlannerState::Idle);
        assert!(f.map.is_walkable(d.result.destination.tile()));
        assert!(planners.planner(A0).history().iter().filter(|(p, _)| !p.is_idle()).all(|(_, s)| s == 0.0));
    }

    #[test]
    fn gather_from_nearest_stocked_building() {
        let mut f = Fixture::new(&[(0.5, 0.5)]);
        let id = f.poi.add_building(BuildingKind::Armory, TileCoord::new(5, 5), 100.0, 10);
        let mut planners = store(1);
        let d = planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(d.plan, PlanKind::GatherArrows);
        assert!(d.changed);
        assert_eq!(d.result.target, Some(Target::Building(id)));
        assert_eq!(d.result.destination, Vec2::new(5.5, 5.5));
        assert_eq!(planners.planner(A0).state(), PlannerState::HasPlan);
        assert!(planners.planner(A0).history().score(PlanKind::GatherArrows) > 0.05);
        assert_eq!(planners.planner(A0).history().evaluations(), 1);
    }

    #[test]
    fn full_inventory_or_empty_building_scores_zero() {
        let mut f = Fixture::new(&[(0.5, 0.5)]);
        f.poi.add_building(BuildingKind::Armory, TileCoord::new(5, 5), 100.0, 10);
        f.agents.inventory[0].add(Resource::Arrows, f.actions.carry_capacity);
        let mut planners = store(1);
        planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(planners.planner(A0).history().score(PlanKind::GatherArrows), 0.0);

        f.agents.inventory[0].clear();
        f.poi.buildings[0].stock = 0;
        let d = planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(d.plan, PlanKind::Idle);
    }

    #[test]
    fn shoots_nearest_enemy_when_armed() {
        let mut f = Fixture::new(&[(0.5, 0.5), (3.5, 0.5), (1.5, 0.5)]);
        f.agents.inventory[0].add(Resource::Arrows, 5);
        let mut planners = store(3);
        let d = planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(d.plan, PlanKind::Shoot);
        assert_eq!(d.result.target, Some(Target::Agent(AgentId(1))), "agent 2 is a teammate");
    }

    #[test]
    fn enemy_beyond_horizon_is_ignored() {
        let mut f = Fixture::new(&[(0.5, 0.5), (19.5, 19.5)]);
        f.agents.inventory[0].add(Resource::Arrows, 5);
        let mut planners = store(2);
        let d = planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(d.plan, PlanKind::Idle);
    }

    #[test]
    fn heals_injured_self() {
        let mut f = Fixture::new(&[(0.5, 0.5)]);
        f.agents.health[0] = 50.0;
        f.agents.inventory[0].add(Resource::Bandages, 2);
        let mut planners = store(1);
        let d = planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(d.plan, PlanKind::Heal);
        assert_eq!(d.result.target, Some(Target::Agent(A0)));
    }

    #[test]
    fn fire_and_repair_need_supplies() {
        let mut f = Fixture::new(&[(0.5, 0.5)]);
        let fire = f.poi.ignite(TileCoord::new(3, 3), 5.0);
        let mut planners = store(1);
        assert_eq!(planners.update_plan(A0, &f.view(), &mut rng(), false).plan, PlanKind::Idle);

        f.agents.inventory[0].add(Resource::Water, 1);
        let d = planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(d.plan, PlanKind::PutOutFire);
        assert_eq!(d.result.target, Some(Target::Fire(fire)));

        let mut f = Fixture::new(&[(0.5, 0.5)]);
        let house = f.poi.add_building(BuildingKind::House, TileCoord::new(2, 2), 100.0, 0);
        f.poi.buildings[0].health = 30.0;
        f.agents.inventory[0].add(Resource::Lumber, 3);
        let d = planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(d.plan, PlanKind::Repair);
        assert_eq!(d.result.target, Some(Target::Building(house)));
    }

    #[test]
    fn queue_pushes_walk_on_top_of_behavior() {
        let mut f = Fixture::new(&[(0.5, 0.5)]);
        f.poi.add_building(BuildingKind::Well, TileCoord::new(4, 0), 100.0, 10);
        let mut planners = store(1);
        let mut exec = ActionExecutor::new(1, ActionConfig::default());
        planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(planners.queue_actions_from_current_plan(A0, &mut exec).unwrap(), 2);

        let steps: Vec<_> = exec.stack(A0).iter().map(|s| s.behavior).collect();
        assert!(matches!(steps[0], Behavior::MoveTo { .. }));
        assert_eq!(steps[1], Behavior::Gather(Resource::Water));

        let again = planners.queue_actions_from_current_plan(A0, &mut exec);
        assert!(matches!(again, Err(UtilityError::StackNotEmpty(_))));
        assert_eq!(exec.depth(A0), 2);
    }

    #[test]
    fn idle_queues_a_single_walk() {
        let f = Fixture::new(&[(0.5, 0.5)]);
        let mut planners = store(1);
        let mut exec = ActionExecutor::new(1, ActionConfig::default());
        planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert_eq!(planners.queue_actions_from_current_plan(A0, &mut exec).unwrap(), 1);
    }

    #[test]
    fn reset_returns_to_idle_with_empty_caches() {
        let mut f = Fixture::new(&[(0.5, 0.5)]);
        f.poi.add_building(BuildingKind::Armory, TileCoord::new(5, 5), 100.0, 10);
        let mut planners = store(1);
        planners.update_plan(A0, &f.view(), &mut rng(), false);
        assert!(planners.caches.misses() > 0);

        planners.reset();
        assert_eq!(planners.planner(A0).current_plan(), PlanKind::Idle);
        assert_eq!(planners.planner(A0).history().evaluations(), 0);
        assert_eq!(planners.caches.misses(), 0);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = PlannerConfig { memo_divisions: 0, ..PlannerConfig::default() };
        assert!(PlannerStore::new(1, cfg).is_err());
        let cfg = PlannerConfig { approach_margin: 1.5, ..PlannerConfig::default() };
        assert!(PlannerStore::new(1, cfg).is_err());
    }
}
