//! TOML settings file that patches the built-in simulation configuration.
//!
//! Every key is optional. Tower and enemy tables are keyed by type name and
//! only override the fields they mention:
//!
//! ```toml
//! starting_gold = 300
//!
//! [waves]
//! base_count = 10
//!
//! [towers.sniper]
//! damage = 40.0
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use lane_defence_core::{
    EnemyCatalog, PathConfig, SimulationConfig, TileGrid, TowerCatalog, WaveTuning,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    starting_gold: Option<u32>,
    starting_lives: Option<u32>,
    max_frame_dt: Option<f32>,
    bounds_margin: Option<f32>,
    grid: Option<GridSettings>,
    path: Option<PathConfig>,
    waves: Option<WaveTuning>,
    towers: BTreeMap<String, TowerPatch>,
    enemies: BTreeMap<String, EnemyPatch>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridSettings {
    columns: u32,
    rows: u32,
    tile_length: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TowerPatch {
    cost: Option<u32>,
    range: Option<f32>,
    rate_of_fire: Option<f32>,
    damage: Option<f32>,
    projectile_speed: Option<f32>,
    splash_radius: Option<f32>,
    projectile_lifetime: Option<f32>,
    targets_air: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EnemyPatch {
    radius: Option<f32>,
    speed: Option<f32>,
    hp: Option<f32>,
    reward: Option<u32>,
    airborne: Option<bool>,
    scales_with_wave: Option<bool>,
}

impl Settings {
    /// Reads and parses the settings file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid settings file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("could not parse TOML")
    }

    /// Applies the patches on top of the built-in configuration.
    ///
    /// Unknown tower or enemy names abort with a configuration error.
    pub(crate) fn into_config(self) -> Result<SimulationConfig> {
        let mut config = SimulationConfig::default();
        patch(&mut config.starting_gold, self.starting_gold);
        patch(&mut config.starting_lives, self.starting_lives);
        patch(&mut config.max_frame_dt, self.max_frame_dt);
        patch(&mut config.bounds_margin, self.bounds_margin);
        if let Some(grid) = self.grid {
            config.grid = TileGrid::new(grid.columns, grid.rows, grid.tile_length);
        }
        if let Some(path) = self.path {
            config.path = path;
        }
        if let Some(waves) = self.waves {
            config.waves = waves;
        }

        for (name, tower) in self.towers {
            let kind = TowerCatalog::resolve(&name)?;
            let stats = config.towers.get_mut(kind);
            patch(&mut stats.cost, tower.cost);
            patch(&mut stats.range, tower.range);
            patch(&mut stats.rate_of_fire, tower.rate_of_fire);
            patch(&mut stats.damage, tower.damage);
            patch(&mut stats.projectile_speed, tower.projectile_speed);
            patch(&mut stats.splash_radius, tower.splash_radius);
            patch(&mut stats.projectile_lifetime, tower.projectile_lifetime);
            patch(&mut stats.targets_air, tower.targets_air);
        }

        for (name, enemy) in self.enemies {
            let kind = EnemyCatalog::resolve(&name)?;
            let stats = config.enemies.get_mut(kind);
            patch(&mut stats.radius, enemy.radius);
            patch(&mut stats.speed, enemy.speed);
            patch(&mut stats.hp, enemy.hp);
            patch(&mut stats.reward, enemy.reward);
            patch(&mut stats.airborne, enemy.airborne);
            patch(&mut stats.scales_with_wave, enemy.scales_with_wave);
        }

        Ok(config)
    }
}

fn patch<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}
