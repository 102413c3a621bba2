//! Unit tests for ts-spatial.

use ts_core::{TileCoord, Vec2};

use crate::{AStarPathfinder, BuildingKind, Pathfinder, PointsOfInterest, SpatialError, TileMap};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 7×5 map with a wall down column 3 that has a single gap at y = 4.
const WALLED: &str = "
...#...
...#...
...#...
...#...
.......
";

fn t(x: i32, y: i32) -> TileCoord {
    TileCoord::new(x, y)
}

#[cfg(test)]
mod map {
    use super::*;

    #[test]
    fn parses_ascii_with_buildings() {
        let layout = TileMap::from_ascii(
            "
            A..#
            .W.#
            ..LH
            ",
        )
        .unwrap();
        assert_eq!(layout.map.width(), 4);
        assert_eq!(layout.map.height(), 3);
        assert!(!layout.map.is_walkable(t(3, 0)));
        assert!(layout.map.is_walkable(t(0, 0)), "building tiles are walkable");
        assert_eq!(layout.buildings.len(), 4);
        assert!(layout.buildings.contains(&(BuildingKind::Well, t(1, 1))));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TileMap::from_ascii("...\n..\n").err();
        assert!(matches!(err, Some(SpatialError::Parse { line: 1, .. })));
    }

    #[test]
    fn unknown_glyph_is_rejected() {
        assert!(TileMap::from_ascii("..?\n").is_err());
    }

    #[test]
    fn bounds_and_walkability() {
        let map = TileMap::new(10, 4);
        assert_eq!(map.bounds(), (Vec2::ZERO, Vec2::new(10.0, 4.0)));
        assert!(!map.is_walkable(t(-1, 0)));
        assert!(!map.is_walkable(t(10, 0)));
        assert!(map.is_walkable(t(9, 3)));
    }

    #[test]
    fn random_walkable_finds_the_only_open_tile() {
        let mut map = TileMap::new(8, 8);
        for i in 0..64 {
            map.set_walkable(map.tile_at(i), false);
        }
        map.set_walkable(t(5, 6), true);
        let mut rng = ts_core::SimRng::new(3);
        assert_eq!(map.random_walkable(rng.inner()), Some(t(5, 6)));

        map.set_walkable(t(5, 6), false);
        assert_eq!(map.random_walkable(rng.inner()), None);
    }

    #[test]
    fn straight_line_blocked_by_wall() {
        let map = TileMap::from_ascii(WALLED).unwrap().map;
        assert!(!map.line_walkable(Vec2::new(1.5, 0.5), Vec2::new(5.5, 0.5)));
        assert!(!map.line_walkable(Vec2::new(0.5, 0.5), Vec2::new(6.5, 3.5)));
        assert!(map.line_walkable(Vec2::new(0.5, 4.5), Vec2::new(6.5, 4.5)), "row 4 is the gap");
        assert!(map.line_walkable(Vec2::new(0.5, 0.5), Vec2::new(2.5, 3.5)));
    }

    #[test]
    fn line_through_blocked_corner_is_rejected() {
        let mut map = TileMap::new(3, 3);
        map.set_walkable(t(1, 0), false);
        assert!(!map.line_walkable(Vec2::new(0.5, 0.5), Vec2::new(1.5, 1.5)));
        assert!(map.line_walkable(Vec2::new(0.5, 1.5), Vec2::new(1.5, 2.5)));
    }

    #[test]
    fn line_from_wall_or_off_map_is_rejected() {
        let map = TileMap::from_ascii(WALLED).unwrap().map;
        assert!(!map.line_walkable(Vec2::new(3.5, 0.5), Vec2::new(3.5, 0.5)));
        assert!(!map.line_walkable(Vec2::new(6.5, 4.5), Vec2::new(8.5, 4.5)));
        assert!(map.line_walkable(Vec2::new(2.2, 2.2), Vec2::new(2.8, 2.9)));
    }
}

#[cfg(test)]
mod poi {
    use ts_core::Resource;

    use super::*;

    fn village() -> PointsOfInterest {
        let mut poi = PointsOfInterest::new();
        poi.add_building(BuildingKind::Armory, t(0, 0), 100.0, 10);
        poi.add_building(BuildingKind::Armory, t(10, 0), 100.0, 10);
        poi.add_building(BuildingKind::House, t(5, 5), 50.0, 99);
        poi
    }

    #[test]
    fn houses_hold_no_stock() {
        let poi = village();
        assert_eq!(poi.buildings[2].stock, 0);
        assert_eq!(poi.buildings[2].max_stock, 0);
    }

    #[test]
    fn nearest_supply_skips_empty_and_dead() {
        let mut poi = village();
        let from = Vec2::new(1.0, 0.5);
        assert_eq!(poi.nearest_supply(Resource::Arrows, from), Some(ts_core::BuildingId(0)));

        poi.buildings[0].stock = 0;
        assert_eq!(poi.nearest_supply(Resource::Arrows, from), Some(ts_core::BuildingId(1)));

        poi.buildings[1].health = 0.0;
        assert_eq!(poi.nearest_supply(Resource::Arrows, from), None);
        assert_eq!(poi.nearest_supply(Resource::Water, from), None);
    }

    #[test]
    fn nearest_damaged_any_kind() {
        let mut poi = village();
        assert_eq!(poi.nearest_damaged(Vec2::ZERO), None);
        poi.buildings[2].health = 20.0;
        assert_eq!(poi.nearest_damaged(Vec2::ZERO), Some(ts_core::BuildingId(2)));
        assert!((poi.buildings[2].damage_fraction() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn building_at_tile() {
        let poi = village();
        assert_eq!(poi.building_at(t(5, 5)), Some(ts_core::BuildingId(2)));
        assert_eq!(poi.building_at(t(5, 4)), None);
    }

    #[test]
    fn fires_stoke_and_nearest() {
        let mut poi = village();
        let a = poi.ignite(t(2, 2), 5.0);
        let b = poi.ignite(t(8, 8), 5.0);
        assert_eq!(poi.ignite(t(2, 2), 1.0), a, "same tile stokes the existing fire");
        assert_eq!(poi.fire(a).map(|f| f.intensity), Some(6.0));
        assert_eq!(poi.nearest_fire(Vec2::new(7.0, 7.0)), Some(b));

        poi.fire_mut(b).unwrap().intensity = 0.0;
        assert_eq!(poi.nearest_fire(Vec2::new(7.0, 7.0)), Some(a));
        assert_eq!(poi.burning_count(), 1);
        assert!(poi.is_burning_at(t(2, 2)));
    }

    #[test]
    fn extinguished_slots_are_reused() {
        let mut poi = village();
        let first = poi.ignite(t(2, 2), 1.0);
        for x in 0..50 {
            poi.fire_mut(first).unwrap().intensity = 0.0;
            assert_eq!(poi.ignite(t(x, 3), 1.0), first);
        }
        assert_eq!(poi.fires.len(), 1);
        assert_eq!(poi.fires[0].tile, t(49, 3));

        let second = poi.ignite(t(0, 9), 1.0);
        assert_ne!(second, first, "a burning slot is never taken over");
        assert_eq!(poi.fires.len(), 2);
    }

    #[test]
    fn stoking_respects_fire_cap() {
        let mut poi = village();
        poi.fire_cap = 4.0;
        let id = poi.ignite(t(2, 2), 3.0);
        poi.ignite(t(2, 2), 3.0);
        assert_eq!(poi.fire(id).map(|f| f.intensity), Some(4.0));
        let hot = poi.ignite(t(7, 7), 9.0);
        assert_eq!(poi.fire(hot).map(|f| f.intensity), Some(4.0));
    }

    #[test]
    fn reset_restores_everything() {
        let mut poi = village();
        poi.buildings[0].health = 0.0;
        poi.buildings[1].stock = 2;
        poi.ignite(t(1, 1), 3.0);
        poi.reset();
        assert!(poi.buildings[0].is_alive());
        assert_eq!(poi.buildings[1].stock, 10);
        assert!(poi.fires.is_empty());
    }
}

#[cfg(test)]
mod astar {
    use super::*;

    #[test]
    fn same_tile_is_trivial() {
        let map = TileMap::new(3, 3);
        let path = AStarPathfinder::default().find_path(&map, t(1, 1), t(1, 1)).unwrap();
        assert!(path.is_trivial());
    }

    #[test]
    fn open_field_is_diagonal() {
        let map = TileMap::new(6, 6);
        let path = AStarPathfinder::default().find_path(&map, t(0, 0), t(4, 4)).unwrap();
        assert_eq!(path.waypoints.len(), 4);
        assert_eq!(path.waypoints.last(), Some(&t(4, 4).center()));
    }

    #[test]
    fn routes_through_the_gap() {
        let map = TileMap::from_ascii(WALLED).unwrap().map;
        let path = AStarPathfinder::default().find_path(&map, t(0, 0), t(6, 0)).unwrap();
        assert!(path.waypoints.contains(&t(3, 4).center()), "must pass the only gap");
        for w in &path.waypoints {
            assert!(map.is_walkable(w.tile()));
        }
        assert_eq!(path.waypoints.last(), Some(&t(6, 0).center()));
    }

    #[test]
    fn no_corner_cutting() {
        let map = TileMap::from_ascii(
            "
            .#
            #.
            ",
        )
        .unwrap()
        .map;
        let err = AStarPathfinder::default().find_path(&map, t(0, 0), t(1, 1));
        assert!(matches!(err, Err(SpatialError::NoPath { .. })));
    }

    #[test]
    fn enclosed_goal_fails() {
        let mut map = TileMap::from_ascii(WALLED).unwrap().map;
        map.set_walkable(t(3, 4), false);
        let err = AStarPathfinder::default().find_path(&map, t(0, 0), t(6, 0));
        assert!(matches!(err, Err(SpatialError::NoPath { .. })));
    }

    #[test]
    fn expansion_limit() {
        let map = TileMap::new(50, 50);
        let err = AStarPathfinder::new(5).find_path(&map, t(0, 0), t(49, 49));
        assert!(matches!(err, Err(SpatialError::SearchLimit { .. })));
    }

    #[test]
    fn out_of_bounds() {
        let map = TileMap::new(4, 4);
        let err = AStarPathfinder::default().find_path(&map, t(0, 0), t(9, 9));
        assert!(matches!(err, Err(SpatialError::OutOfBounds(_))));
    }

    #[test]
    fn path_length() {
        let map = TileMap::new(5, 1);
        let path = AStarPathfinder::default().find_path(&map, t(0, 0), t(4, 0)).unwrap();
        let len = path.length_from(t(0, 0).center());
        assert!((len - 4.0).abs() < 1e-5);
    }
}
