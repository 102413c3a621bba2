//! Walkability grid.
//!
//! # ASCII layout
//!
//! [`TileMap::from_ascii`] reads one character per tile, rows top to bottom
//! (row 0 is `y = 0`):
//!
//! | Char | Meaning              |
//! |------|----------------------|
//! | `.`  | open ground          |
//! | `#`  | wall (not walkable)  |
//! | `~`  | water (not walkable) |
//! | `A`  | armory (arrows)      |
//! | `L`  | lumber yard (lumber) |
//! | `I`  | infirmary (bandages) |
//! | `W`  | well (water)         |
//! | `H`  | house                |
//!
//! Building tiles are walkable so agents can stand on them to gather or
//! repair.

use rand::Rng;

use ts_core::{TileCoord, Vec2};

use crate::{BuildingKind, SpatialError, SpatialResult};

/// How many uniform samples `random_walkable` tries before scanning.
const RANDOM_ATTEMPTS: usize = 32;

/// Row-major walkability grid.
#[derive(Clone, Debug)]
pub struct TileMap {
    width: u32,
    height: u32,
    walkable: Vec<bool>,
}

/// A parsed map plus the buildings it declares.
pub struct MapLayout {
    pub map: TileMap,
    pub buildings: Vec<(BuildingKind, TileCoord)>,
}

impl TileMap {
    /// A fully walkable `width × height` map.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, walkable: vec![true; (width * height) as usize] }
    }

    /// Parse the ASCII format described in the module docs.  Every row must
    /// have the same width.
    pub fn from_ascii(text: &str) -> SpatialResult<MapLayout> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(SpatialError::Parse { line: 0, msg: "empty map".into() });
        }

        let mut map = TileMap::new(width as u32, height as u32);
        let mut buildings = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(SpatialError::Parse {
                    line: y,
                    msg:  format!("expected {width} columns, found {}", row.chars().count()),
                });
            }
            for (x, c) in row.chars().enumerate() {
                let tile = TileCoord::new(x as i32, y as i32);
                match c {
                    '.' => {}
                    '#' | '~' => map.set_walkable(tile, false),
                    'A' => buildings.push((BuildingKind::Armory, tile)),
                    'L' => buildings.push((BuildingKind::LumberYard, tile)),
                    'I' => buildings.push((BuildingKind::Infirmary, tile)),
                    'W' => buildings.push((BuildingKind::Well, tile)),
                    'H' => buildings.push((BuildingKind::House, tile)),
                    other => {
                        return Err(SpatialError::Parse {
                            line: y,
                            msg:  format!("unknown tile '{other}' at column {x}"),
                        });
                    }
                }
            }
        }
        Ok(MapLayout { map, buildings })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_count(&self) -> usize {
        self.walkable.len()
    }

    /// World-space bounds `(min, max)`.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (Vec2::ZERO, Vec2::new(self.width as f32, self.height as f32))
    }

    /// Length of the world diagonal; the natural scale for distance utilities.
    pub fn diagonal(&self) -> f32 {
        let (min, max) = self.bounds();
        min.distance(max)
    }

    // ── Tile queries ──────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, tile: TileCoord) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.width && (tile.y as u32) < self.height
    }

    /// Row-major index, or `None` outside the map.
    #[inline]
    pub fn index_of(&self, tile: TileCoord) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| tile.y as usize * self.width as usize + tile.x as usize)
    }

    #[inline]
    pub fn tile_at(&self, index: usize) -> TileCoord {
        let w = self.width as usize;
        TileCoord::new((index % w) as i32, (index / w) as i32)
    }

    /// Out-of-bounds tiles are never walkable.
    #[inline]
    pub fn is_walkable(&self, tile: TileCoord) -> bool {
        self.index_of(tile).is_some_and(|i| self.walkable[i])
    }

    /// No-op outside the map.
    pub fn set_walkable(&mut self, tile: TileCoord, walkable: bool) {
        if let Some(i) = self.index_of(tile) {
            self.walkable[i] = walkable;
        }
    }

    /// Whether the straight segment `from -> to` touches only walkable tiles.
    ///
    /// Grid traversal over every tile the segment enters.  Passing exactly
    /// through a tile corner needs both side tiles walkable, the same rule
    /// the pathfinder applies to diagonal steps.
    pub fn line_walkable(&self, from: Vec2, to: Vec2) -> bool {
        let mut tile = from.tile();
        let end = to.tile();
        if !self.is_walkable(tile) {
            return false;
        }
        let d = to - from;
        let (step_x, step_y) = (if d.x > 0.0 { 1 } else { -1 }, if d.y > 0.0 { 1 } else { -1 });
        let crossing = |origin: f32, cell: i32, delta: f32| {
            if delta == 0.0 {
                return (f32::INFINITY, f32::INFINITY);
            }
            let edge = if delta > 0.0 { (cell + 1) as f32 } else { cell as f32 };
            ((edge - origin) / delta, 1.0 / delta.abs())
        };
        let (mut t_x, dt_x) = crossing(from.x, tile.x, d.x);
        let (mut t_y, dt_y) = crossing(from.y, tile.y, d.y);

        let steps = (end.x - tile.x).unsigned_abs() + (end.y - tile.y).unsigned_abs();
        for _ in 0..steps {
            if tile == end {
                break;
            }
            if t_x < t_y {
                tile.x += step_x;
                t_x += dt_x;
            } else if t_y < t_x {
                tile.y += step_y;
                t_y += dt_y;
            } else {
                if !(self.is_walkable(tile.offset(step_x, 0)) && self.is_walkable(tile.offset(0, step_y))) {
                    return false;
                }
                tile = tile.offset(step_x, step_y);
                t_x += dt_x;
                t_y += dt_y;
            }
            if !self.is_walkable(tile) {
                return false;
            }
        }
        tile == end
    }

    /// A uniformly chosen walkable tile, or `None` if the map has none.
    ///
    /// Tries a few random samples first, then falls back to a scan from a
    /// random start so sparse maps still terminate.
    pub fn random_walkable<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<TileCoord> {
        let n = self.walkable.len();
        if n == 0 {
            return None;
        }
        for _ in 0..RANDOM_ATTEMPTS {
            let i = rng.gen_range(0..n);
            if self.walkable[i] {
                return Some(self.tile_at(i));
            }
        }
        let start = rng.gen_range(0..n);
        (0..n)
            .map(|k| (start + k) % n)
            .find(|&i| self.walkable[i])
            .map(|i| self.tile_at(i))
    }
}
