//! Initialization parameters for a simulation run.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, ConfigurationError, EnemyCatalog, TileGrid, TowerCatalog};

/// Waypoint path followed by every enemy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Ordered, axis-aligned waypoints expressed in grid cells.
    pub waypoints: Vec<CellCoord>,
    /// Number of tiles blocked on each side of the path centre line.
    pub half_width: u32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            waypoints: vec![
                CellCoord::new(0, 10),
                CellCoord::new(10, 10),
                CellCoord::new(10, 4),
                CellCoord::new(20, 4),
                CellCoord::new(20, 15),
                CellCoord::new(28, 15),
            ],
            half_width: 1,
        }
    }
}

/// Knobs controlling wave size, composition and pacing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Number of normal enemies in the first wave.
    pub base_count: u32,
    /// Normal enemies added per subsequent wave.
    pub count_growth: u32,
    /// Hit point multiplier added per wave number.
    pub hp_step: f32,
    /// Speed multiplier added per wave number.
    pub speed_step: f32,
    /// First wave that contains fast runners.
    pub fast_from_wave: u32,
    /// Share of the base count added as fast runners.
    pub fast_share: f32,
    /// Extra speed factor applied to fast runners.
    pub fast_speed_boost: f32,
    /// First wave that contains jets.
    pub jet_from_wave: u32,
    /// Share of the base count added as jets.
    pub jet_share: f32,
    /// Extra speed factor applied to jets.
    pub jet_speed_boost: f32,
    /// First wave that contains a tank.
    pub tank_from_wave: u32,
    /// Number of waves between additional tanks.
    pub tank_every: u32,
    /// Seconds between consecutive spawns.
    pub spawn_interval: f32,
    /// Flat gold bonus granted when a wave is cleared.
    pub clear_bonus_base: u32,
    /// Gold bonus per wave number granted when a wave is cleared.
    pub clear_bonus_per_wave: u32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_count: 8,
            count_growth: 1,
            hp_step: 0.25,
            speed_step: 0.05,
            fast_from_wave: 3,
            fast_share: 0.2,
            fast_speed_boost: 1.05,
            jet_from_wave: 10,
            jet_share: 0.15,
            jet_speed_boost: 1.1,
            tank_from_wave: 5,
            tank_every: 5,
            spawn_interval: 0.8,
            clear_bonus_base: 25,
            clear_bonus_per_wave: 5,
        }
    }
}

impl WaveTuning {
    /// Rejects steps, shares, boosts and intervals that would produce
    /// negative, non-finite or unbounded wave compositions.
    ///
    /// Shares must lie in `0.0..=1.0`, boosts must be positive and every
    /// other rate must be non-negative.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid = |field: &'static str| ConfigurationError::InvalidValue {
            subject: "waves",
            field,
        };
        let non_negative = |value: f32| value.is_finite() && value >= 0.0;
        let share = |value: f32| (0.0..=1.0).contains(&value);
        let boost = |value: f32| value.is_finite() && value > 0.0;

        if !non_negative(self.hp_step) {
            return Err(invalid("hp_step"));
        }
        if !non_negative(self.speed_step) {
            return Err(invalid("speed_step"));
        }
        if !share(self.fast_share) {
            return Err(invalid("fast_share"));
        }
        if !boost(self.fast_speed_boost) {
            return Err(invalid("fast_speed_boost"));
        }
        if !share(self.jet_share) {
            return Err(invalid("jet_share"));
        }
        if !boost(self.jet_speed_boost) {
            return Err(invalid("jet_speed_boost"));
        }
        if !non_negative(self.spawn_interval) {
            return Err(invalid("spawn_interval"));
        }
        Ok(())
    }
}

/// Everything required to build a world.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Tile layout of the playfield.
    pub grid: TileGrid,
    /// Path enemies walk along.
    pub path: PathConfig,
    /// Gold available before the first placement.
    pub starting_gold: u32,
    /// Leaks tolerated before the game ends.
    pub starting_lives: u32,
    /// Upper bound on the delta consumed by a single update, in seconds.
    pub max_frame_dt: f32,
    /// Distance outside the playfield at which projectiles are reclaimed.
    pub bounds_margin: f32,
    /// Wave composition and pacing.
    pub waves: WaveTuning,
    /// Tower type table.
    pub towers: TowerCatalog,
    /// Enemy type table.
    pub enemies: EnemyCatalog,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid: TileGrid::new(30, 18, 30.0),
            path: PathConfig::default(),
            starting_gold: 150,
            starting_lives: 20,
            max_frame_dt: 0.033,
            bounds_margin: 10.0,
            waves: WaveTuning::default(),
            towers: TowerCatalog::default(),
            enemies: EnemyCatalog::default(),
        }
    }
}
