//! Points of interest: buildings and fires.
//!
//! Buildings never move, so each kind gets its own R-tree (via `rstar`) and
//! "nearest building of kind K that satisfies P" is a lazy nearest-neighbour
//! walk that skips entries failing P.  Destroyed buildings stay in the tree
//! and in the arena; liveness is a predicate, not a removal.
//!
//! Fires are few and short-lived, so they are a flat arena scanned linearly.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ts_core::{BuildingId, FireId, Resource, TileCoord, Vec2};

// ── BuildingKind ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    Armory,
    LumberYard,
    Infirmary,
    Well,
    House,
}

impl BuildingKind {
    pub const COUNT: usize = 5;

    pub const ALL: [BuildingKind; BuildingKind::COUNT] = [
        BuildingKind::Armory,
        BuildingKind::LumberYard,
        BuildingKind::Infirmary,
        BuildingKind::Well,
        BuildingKind::House,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The resource agents can gather here, if any.
    pub fn supplies(self) -> Option<Resource> {
        match self {
            BuildingKind::Armory     => Some(Resource::Arrows),
            BuildingKind::LumberYard => Some(Resource::Lumber),
            BuildingKind::Infirmary  => Some(Resource::Bandages),
            BuildingKind::Well       => Some(Resource::Water),
            BuildingKind::House      => None,
        }
    }

    pub fn supplying(resource: Resource) -> BuildingKind {
        match resource {
            Resource::Arrows   => BuildingKind::Armory,
            Resource::Lumber   => BuildingKind::LumberYard,
            Resource::Bandages => BuildingKind::Infirmary,
            Resource::Water    => BuildingKind::Well,
        }
    }
}

// ── Building / Fire ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    pub kind: BuildingKind,
    pub tile: TileCoord,
    pub health: f32,
    pub max_health: f32,
    /// Units left to gather.  Always 0 for houses.
    pub stock: u32,
    pub max_stock: u32,
}

impl Building {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    #[inline]
    pub fn is_damaged(&self) -> bool {
        self.is_alive() && self.health < self.max_health
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.tile.center()
    }

    /// Fraction of `max_stock` left, in `[0, 1]`.
    pub fn stock_fraction(&self) -> f32 {
        if self.max_stock == 0 {
            0.0
        } else {
            self.stock as f32 / self.max_stock as f32
        }
    }

    pub fn damage_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (1.0 - self.health / self.max_health).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fire {
    pub tile: TileCoord,
    /// Remaining intensity; 0 means extinguished.
    pub intensity: f32,
}

impl Fire {
    #[inline]
    pub fn is_burning(&self) -> bool {
        self.intensity > 0.0
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.tile.center()
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct PoiEntry {
    point: [f32; 2],
    id: BuildingId,
}

impl RTreeObject for PoiEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PoiEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── PointsOfInterest ──────────────────────────────────────────────────────────

/// Arena of buildings and fires plus the spatial index over buildings.
///
/// Fire slots are recycled: an extinguished slot is reused by the next
/// ignition, so a `FireId` only names the same fire while it burns.
pub struct PointsOfInterest {
    pub buildings: Vec<Building>,
    pub fires: Vec<Fire>,
    /// Upper bound on any fire's intensity.
    pub fire_cap: f32,
    by_kind: Vec<RTree<PoiEntry>>,
    all: RTree<PoiEntry>,
}

impl PointsOfInterest {
    pub fn new() -> Self {
        Self {
            buildings: Vec::new(),
            fires: Vec::new(),
            fire_cap: f32::INFINITY,
            by_kind: (0..BuildingKind::COUNT).map(|_| RTree::new()).collect(),
            all: RTree::new(),
        }
    }

    /// Add a building at full health and full stock.
    pub fn add_building(
        &mut self,
        kind:       BuildingKind,
        tile:       TileCoord,
        max_health: f32,
        max_stock:  u32,
    ) -> BuildingId {
        let id = BuildingId(self.buildings.len() as u32);
        let max_stock = if kind.supplies().is_some() { max_stock } else { 0 };
        self.buildings.push(Building {
            kind,
            tile,
            health: max_health,
            max_health,
            stock: max_stock,
            max_stock,
        });
        let c = tile.center();
        let entry = PoiEntry { point: [c.x, c.y], id };
        self.by_kind[kind.index()].insert(entry.clone());
        self.all.insert(entry);
        id
    }

    #[inline]
    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id.index())
    }

    #[inline]
    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.get_mut(id.index())
    }

    #[inline]
    pub fn fire(&self, id: FireId) -> Option<&Fire> {
        self.fires.get(id.index())
    }

    #[inline]
    pub fn fire_mut(&mut self, id: FireId) -> Option<&mut Fire> {
        self.fires.get_mut(id.index())
    }

    // ── Nearest queries ───────────────────────────────────────────────────

    /// Nearest building of `kind` to `from` satisfying `pred`.
    pub fn nearest_building<F>(&self, kind: BuildingKind, from: Vec2, pred: F) -> Option<BuildingId>
    where
        F: Fn(&Building) -> bool,
    {
        self.by_kind[kind.index()]
            .nearest_neighbor_iter(&[from.x, from.y])
            .find(|e| pred(&self.buildings[e.id.index()]))
            .map(|e| e.id)
    }

    /// Nearest living building that still has `resource` in stock.
    pub fn nearest_supply(&self, resource: Resource, from: Vec2) -> Option<BuildingId> {
        self.nearest_building(BuildingKind::supplying(resource), from, |b| {
            b.is_alive() && b.stock > 0
        })
    }

    /// Nearest living building of any kind below full health.
    pub fn nearest_damaged(&self, from: Vec2) -> Option<BuildingId> {
        self.all
            .nearest_neighbor_iter(&[from.x, from.y])
            .find(|e| self.buildings[e.id.index()].is_damaged())
            .map(|e| e.id)
    }

    /// Living building standing on `tile`, if any.
    pub fn building_at(&self, tile: TileCoord) -> Option<BuildingId> {
        let c = tile.center();
        self.all
            .locate_all_at_point(&[c.x, c.y])
            .find(|e| self.buildings[e.id.index()].is_alive())
            .map(|e| e.id)
    }

    /// Nearest burning fire.  Linear in the number of fire slots.
    pub fn nearest_fire(&self, from: Vec2) -> Option<FireId> {
        self.fires
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_burning())
            .min_by(|(_, a), (_, b)| {
                from.distance_squared(a.position())
                    .total_cmp(&from.distance_squared(b.position()))
            })
            .map(|(i, _)| FireId(i as u32))
    }

    // ── Fires ─────────────────────────────────────────────────────────────

    /// Start a fire on `tile`, or stoke the one already burning there.
    /// Intensity never exceeds `fire_cap`.
    pub fn ignite(&mut self, tile: TileCoord, intensity: f32) -> FireId {
        if let Some(i) = self.fires.iter().position(|f| f.is_burning() && f.tile == tile) {
            let fire = &mut self.fires[i];
            fire.intensity = (fire.intensity + intensity).min(self.fire_cap);
            return FireId(i as u32);
        }
        let fire = Fire { tile, intensity: intensity.min(self.fire_cap) };
        match self.fires.iter().position(|f| !f.is_burning()) {
            Some(i) => {
                self.fires[i] = fire;
                FireId(i as u32)
            }
            None => {
                self.fires.push(fire);
                FireId(self.fires.len() as u32 - 1)
            }
        }
    }

    /// Whether a fire is currently burning on `tile`.
    pub fn is_burning_at(&self, tile: TileCoord) -> bool {
        self.fires.iter().any(|f| f.is_burning() && f.tile == tile)
    }

    pub fn burning_count(&self) -> usize {
        self.fires.iter().filter(|f| f.is_burning()).count()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Restore every building to full health and stock and put out all fires.
    pub fn reset(&mut self) {
        for b in &mut self.buildings {
            b.health = b.max_health;
            b.stock = b.max_stock;
        }
        self.fires.clear();
    }
}

impl Default for PointsOfInterest {
    fn default() -> Self {
        Self::new()
    }
}
