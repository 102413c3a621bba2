//! Fire dynamics: ignition, growth, spread and building damage.
//!
//! Runs once per frame before the scheduler, so its cost counts as frame
//! overhead and shrinks the update budget.

use tracing::{debug, info};

use ts_core::{BuildingId, SimRng, TileCoord};
use ts_spatial::{PointsOfInterest, TileMap};

use crate::{SimError, SimResult};

// ── WorldConfig ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Chance per frame that a random living building catches fire.
    pub ignite_chance: f64,
    /// Chance per second that a fire on a building spreads to a neighbouring
    /// walkable tile.
    pub spread_chance: f64,
    /// Intensity of a freshly started fire.
    pub ignite_intensity: f32,
    /// Intensity gained per second while a building feeds the fire.
    pub growth_per_sec: f32,
    /// Intensity lost per second by a fire with nothing to burn.
    pub decay_per_sec: f32,
    pub max_intensity: f32,
    /// Building health lost per second per unit of intensity.
    pub burn_damage: f32,
    /// Health every building starts (and resets) with.
    pub building_health: f32,
    /// Stock every supply building starts (and resets) with.
    pub building_stock: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            ignite_chance:    0.002,
            spread_chance:    0.05,
            ignite_intensity: 2.0,
            growth_per_sec:   0.5,
            decay_per_sec:    0.25,
            max_intensity:    10.0,
            burn_damage:      1.0,
            building_health:  100.0,
            building_stock:   20,
        }
    }
}

impl WorldConfig {
    /// No fires ever start on their own.
    pub fn calm() -> Self {
        Self { ignite_chance: 0.0, spread_chance: 0.0, ..Self::default() }
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(0.0..=1.0).contains(&self.ignite_chance) || !(0.0..=1.0).contains(&self.spread_chance) {
            return Err(SimError::Config("fire chances must lie in [0, 1]".into()));
        }
        if self.max_intensity <= 0.0 || self.building_health <= 0.0 {
            return Err(SimError::Config("max_intensity and building_health must be positive".into()));
        }
        if self.growth_per_sec < 0.0 || self.decay_per_sec < 0.0 || self.burn_damage < 0.0 {
            return Err(SimError::Config("fire rates must not be negative".into()));
        }
        Ok(())
    }
}

// ── Frame step ────────────────────────────────────────────────────────────────

/// What the fires did during one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FireEvents {
    /// Fires started by chance or by spreading.
    pub ignitions: usize,
    /// Buildings burnt down this frame.
    pub destroyed: Vec<BuildingId>,
}

/// Advance every fire by `dt` seconds.
pub fn step_fires(
    poi:    &mut PointsOfInterest,
    map:    &TileMap,
    config: &WorldConfig,
    dt:     f32,
    rng:    &mut SimRng,
) -> FireEvents {
    let mut events = FireEvents::default();

    if !poi.buildings.is_empty() && rng.chance(config.ignite_chance) {
        let pick = rng.gen_range(0..poi.buildings.len());
        let building = &poi.buildings[pick];
        if building.is_alive() {
            let tile = building.tile;
            poi.ignite(tile, config.ignite_intensity);
            events.ignitions += 1;
            debug!(x = tile.x, y = tile.y, "fire started");
        }
    }

    let mut spread_to: Vec<TileCoord> = Vec::new();
    for fire_index in 0..poi.fires.len() {
        let fire = &poi.fires[fire_index];
        if !fire.is_burning() {
            continue;
        }
        let tile = fire.tile;

        let Some(id) = poi.building_at(tile) else {
            let fire = &mut poi.fires[fire_index];
            fire.intensity = (fire.intensity - config.decay_per_sec * dt).max(0.0);
            continue;
        };

        let fire = &mut poi.fires[fire_index];
        fire.intensity = (fire.intensity + config.growth_per_sec * dt).min(config.max_intensity);
        let damage = config.burn_damage * fire.intensity * dt;

        let Some(building) = poi.building_mut(id) else {
            continue;
        };
        building.health = (building.health - damage).max(0.0);
        if !building.is_alive() {
            info!(building = id.0, kind = ?building.kind, "building burnt down");
            events.destroyed.push(id);
            poi.fires[fire_index].intensity = 0.0;
            continue;
        }

        if rng.chance(config.spread_chance * dt as f64) {
            let dx = rng.gen_range(-1..=1);
            let dy = if dx == 0 { if rng.chance(0.5) { 1 } else { -1 } } else { rng.gen_range(-1..=1) };
            let next = tile.offset(dx, dy);
            if map.is_walkable(next) {
                spread_to.push(next);
            }
        }
    }

    for tile in spread_to {
        if !poi.is_burning_at(tile) {
            events.ignitions += 1;
        }
        poi.ignite(tile, config.ignite_intensity);
    }
    events
}
