//! Static tower and enemy type tables.
//!
//! Every tower and enemy variant is a closed enum. Behaviour is selected by
//! matching on [`AttackMode`] and the per-kind stats stored in the catalogs,
//! never by string keys. Names are only parsed at the configuration boundary.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ConfigurationError;

/// Error returned when a textual type name matches no known kind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {category} type `{name}`")]
pub struct UnknownKind {
    /// Category of the lookup, either `tower` or `enemy`.
    pub category: &'static str,
    /// Name that failed to resolve.
    pub name: String,
}

/// Types of towers that can be constructed alongside the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerKind {
    /// Cheap beam tower that damages its target instantly.
    Basic,
    /// Long range, slow firing ballistic tower.
    Sniper,
    /// Lobs orbs that damage every enemy around the impact point.
    Splash,
    /// Very fast firing, low damage tracer rounds.
    Machinegun,
    /// Fires homing missiles with splash damage.
    Missile,
    /// Casts chain lightning that hops between nearby enemies.
    Wizard,
}

impl TowerKind {
    /// Number of tower variants.
    pub const COUNT: usize = 6;

    /// Every tower variant in catalog order.
    pub const ALL: [TowerKind; Self::COUNT] = [
        Self::Basic,
        Self::Sniper,
        Self::Splash,
        Self::Machinegun,
        Self::Missile,
        Self::Wizard,
    ];

    /// Stable lowercase name used by configuration files and callers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Sniper => "sniper",
            Self::Splash => "splash",
            Self::Machinegun => "machinegun",
            Self::Missile => "missile",
            Self::Wizard => "wizard",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Basic => 0,
            Self::Sniper => 1,
            Self::Splash => 2,
            Self::Machinegun => 3,
            Self::Missile => 4,
            Self::Wizard => 5,
        }
    }
}

impl fmt::Display for TowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TowerKind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == value)
            .ok_or_else(|| UnknownKind {
                category: "tower",
                name: value.to_owned(),
            })
    }
}

/// Types of enemies that walk the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Baseline ground unit that makes up the bulk of every wave.
    Normal,
    /// Light runner that moves twice as fast as a normal enemy.
    Fast,
    /// Aerial unit that only some towers can target.
    Jet,
    /// Armoured mini-boss with very high hit points.
    Tank,
}

impl EnemyKind {
    /// Number of enemy variants.
    pub const COUNT: usize = 4;

    /// Every enemy variant in catalog order.
    pub const ALL: [EnemyKind; Self::COUNT] = [Self::Normal, Self::Fast, Self::Jet, Self::Tank];

    /// Stable lowercase name used by configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::Jet => "jet",
            Self::Tank => "tank",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Fast => 1,
            Self::Jet => 2,
            Self::Tank => 3,
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnemyKind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == value)
            .ok_or_else(|| UnknownKind {
                category: "enemy",
                name: value.to_owned(),
            })
    }
}

/// Steering parameters for homing projectiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HomingProfile {
    /// Maximum heading change per second, in radians.
    pub turn_rate: f32,
    /// Speed the projectile never drops below while steering.
    pub cruise_speed: f32,
    /// Speed gained per second while steering.
    pub acceleration: f32,
    /// Hard speed ceiling.
    pub max_speed: f32,
}

/// Bounce parameters for chain attacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainProfile {
    /// Number of hops after the initial target.
    pub bounces: u32,
    /// Maximum distance between two consecutive chain targets.
    pub bounce_range: f32,
    /// Damage multiplier applied on every hop.
    pub falloff: f32,
}

/// Firing behaviour of a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttackMode {
    /// Damage lands immediately; a short-lived visual record is still emitted.
    Beam,
    /// A projectile travels in a straight line toward the target's position.
    Ballistic,
    /// A projectile that re-aims at the nearest enemy every tick.
    Homing(HomingProfile),
    /// Instant damage that hops between nearby enemies.
    Chain(ChainProfile),
}

/// Visual effect tag carried by projectiles for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileEffect {
    /// Straight energy beam between tower and target.
    Beam,
    /// High velocity sniper round with a trail.
    Snipe,
    /// Slow glowing orb.
    Orb,
    /// Thin machine gun tracer.
    Tracer,
    /// Smoking missile.
    Missile,
    /// Lightning path across every chained target.
    Chain,
}

/// Static parameters describing a tower kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    /// Gold deducted when the tower is placed.
    pub cost: u32,
    /// Targeting radius in world units.
    pub range: f32,
    /// Seconds between consecutive shots.
    pub rate_of_fire: f32,
    /// Damage dealt by a direct hit.
    pub damage: f32,
    /// Launch speed of fired projectiles in world units per second.
    pub projectile_speed: f32,
    /// Splash radius in world units, zero when the tower deals direct damage.
    pub splash_radius: f32,
    /// Seconds a fired projectile stays alive without hitting anything.
    pub projectile_lifetime: f32,
    /// Whether the tower may target airborne enemies.
    pub targets_air: bool,
    /// Firing behaviour.
    pub attack: AttackMode,
    /// Visual tag copied onto fired projectiles.
    pub effect: ProjectileEffect,
}

impl TowerStats {
    /// Returns the built-in stats for the provided tower kind.
    #[must_use]
    pub const fn defaults_for(kind: TowerKind) -> Self {
        match kind {
            TowerKind::Basic => Self {
                cost: 50,
                range: 110.0,
                rate_of_fire: 0.8,
                damage: 12.0,
                projectile_speed: 360.0,
                splash_radius: 0.0,
                projectile_lifetime: 0.12,
                targets_air: true,
                attack: AttackMode::Beam,
                effect: ProjectileEffect::Beam,
            },
            TowerKind::Sniper => Self {
                cost: 70,
                range: 220.0,
                rate_of_fire: 1.5,
                damage: 25.0,
                projectile_speed: 520.0,
                splash_radius: 0.0,
                projectile_lifetime: 1.2,
                targets_air: true,
                attack: AttackMode::Ballistic,
                effect: ProjectileEffect::Snipe,
            },
            TowerKind::Splash => Self {
                cost: 90,
                range: 120.0,
                rate_of_fire: 1.2,
                damage: 14.0,
                projectile_speed: 320.0,
                splash_radius: 80.0,
                projectile_lifetime: 1.2,
                targets_air: false,
                attack: AttackMode::Ballistic,
                effect: ProjectileEffect::Orb,
            },
            TowerKind::Machinegun => Self {
                cost: 80,
                range: 100.0,
                rate_of_fire: 0.15,
                damage: 3.0,
                projectile_speed: 560.0,
                splash_radius: 0.0,
                projectile_lifetime: 1.2,
                targets_air: false,
                attack: AttackMode::Ballistic,
                effect: ProjectileEffect::Tracer,
            },
            TowerKind::Missile => Self {
                cost: 120,
                range: 180.0,
                rate_of_fire: 1.8,
                damage: 30.0,
                projectile_speed: 220.0,
                splash_radius: 70.0,
                projectile_lifetime: 3.0,
                targets_air: true,
                attack: AttackMode::Homing(HomingProfile {
                    turn_rate: 4.0,
                    cruise_speed: 180.0,
                    acceleration: 80.0,
                    max_speed: 320.0,
                }),
                effect: ProjectileEffect::Missile,
            },
            TowerKind::Wizard => Self {
                cost: 110,
                range: 160.0,
                rate_of_fire: 1.0,
                damage: 16.0,
                projectile_speed: 0.0,
                splash_radius: 0.0,
                projectile_lifetime: 0.12,
                targets_air: false,
                attack: AttackMode::Chain(ChainProfile {
                    bounces: 3,
                    bounce_range: 160.0,
                    falloff: 0.7,
                }),
                effect: ProjectileEffect::Chain,
            },
        }
    }

    /// Reports whether a tower with these stats may select the enemy.
    ///
    /// Ground enemies are always eligible; airborne enemies require
    /// [`TowerStats::targets_air`].
    #[must_use]
    pub const fn can_target(&self, airborne: bool) -> bool {
        !airborne || self.targets_air
    }

    fn validate(&self, kind: TowerKind) -> Result<(), ConfigurationError> {
        let invalid = |field: &'static str| ConfigurationError::InvalidValue {
            subject: kind.name(),
            field,
        };

        if !(self.range > 0.0) {
            return Err(invalid("range"));
        }
        if !(self.rate_of_fire > 0.0) {
            return Err(invalid("rate_of_fire"));
        }
        if !(self.damage >= 0.0) {
            return Err(invalid("damage"));
        }
        if !(self.projectile_speed >= 0.0) {
            return Err(invalid("projectile_speed"));
        }
        if !(self.splash_radius >= 0.0) {
            return Err(invalid("splash_radius"));
        }
        if !(self.projectile_lifetime > 0.0) {
            return Err(invalid("projectile_lifetime"));
        }
        if let AttackMode::Chain(chain) = self.attack {
            if !(chain.falloff > 0.0 && chain.falloff <= 1.0) {
                return Err(invalid("falloff"));
            }
            if !(chain.bounce_range >= 0.0) {
                return Err(invalid("bounce_range"));
            }
        }
        Ok(())
    }
}

/// Static parameters describing an enemy kind before wave scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Collision radius in world units.
    pub radius: f32,
    /// Base travel speed in world units per second.
    pub speed: f32,
    /// Base hit points.
    pub hp: f32,
    /// Gold granted when the enemy is destroyed.
    pub reward: u32,
    /// Whether the enemy flies and is restricted to anti-air towers.
    pub airborne: bool,
    /// Whether wave hp/speed multipliers apply to the enemy.
    pub scales_with_wave: bool,
}

impl EnemyStats {
    /// Returns the built-in stats for the provided enemy kind.
    #[must_use]
    pub const fn defaults_for(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Normal => Self {
                radius: 10.0,
                speed: 60.0,
                hp: 40.0,
                reward: 8,
                airborne: false,
                scales_with_wave: true,
            },
            EnemyKind::Fast => Self {
                radius: 8.0,
                speed: 120.0,
                hp: 25.0,
                reward: 6,
                airborne: false,
                scales_with_wave: true,
            },
            EnemyKind::Jet => Self {
                radius: 9.0,
                speed: 150.0,
                hp: 35.0,
                reward: 10,
                airborne: true,
                scales_with_wave: true,
            },
            EnemyKind::Tank => Self {
                radius: 16.0,
                speed: 36.0,
                hp: 600.0,
                reward: 50,
                airborne: false,
                scales_with_wave: false,
            },
        }
    }

    fn validate(&self, kind: EnemyKind) -> Result<(), ConfigurationError> {
        let invalid = |field: &'static str| ConfigurationError::InvalidValue {
            subject: kind.name(),
            field,
        };

        if !(self.radius > 0.0) {
            return Err(invalid("radius"));
        }
        if !(self.speed >= 0.0) {
            return Err(invalid("speed"));
        }
        if !(self.hp > 0.0) {
            return Err(invalid("hp"));
        }
        Ok(())
    }
}

/// Tower stats indexed by [`TowerKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct TowerCatalog {
    entries: [TowerStats; TowerKind::COUNT],
}

impl TowerCatalog {
    /// Stats associated with the tower kind.
    #[must_use]
    pub fn get(&self, kind: TowerKind) -> &TowerStats {
        &self.entries[kind.index()]
    }

    /// Mutable stats associated with the tower kind.
    pub fn get_mut(&mut self, kind: TowerKind) -> &mut TowerStats {
        &mut self.entries[kind.index()]
    }

    /// Resolves a configuration key to its tower kind.
    pub fn resolve(name: &str) -> Result<TowerKind, ConfigurationError> {
        name.parse()
            .map_err(|_| ConfigurationError::UnknownTowerKind(name.to_owned()))
    }

    /// Iterates over every tower kind and its stats in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (TowerKind, &TowerStats)> {
        TowerKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Verifies every entry holds usable values.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.iter().try_for_each(|(kind, stats)| stats.validate(kind))
    }
}

impl Default for TowerCatalog {
    fn default() -> Self {
        Self {
            entries: TowerKind::ALL.map(TowerStats::defaults_for),
        }
    }
}

/// Enemy stats indexed by [`EnemyKind`].
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyCatalog {
    entries: [EnemyStats; EnemyKind::COUNT],
}

impl EnemyCatalog {
    /// Stats associated with the enemy kind.
    #[must_use]
    pub fn get(&self, kind: EnemyKind) -> &EnemyStats {
        &self.entries[kind.index()]
    }

    /// Mutable stats associated with the enemy kind.
    pub fn get_mut(&mut self, kind: EnemyKind) -> &mut EnemyStats {
        &mut self.entries[kind.index()]
    }

    /// Resolves a configuration key to its enemy kind.
    pub fn resolve(name: &str) -> Result<EnemyKind, ConfigurationError> {
        name.parse()
            .map_err(|_| ConfigurationError::UnknownEnemyKind(name.to_owned()))
    }

    /// Iterates over every enemy kind and its stats in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (EnemyKind, &EnemyStats)> {
        EnemyKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Verifies every entry holds usable values.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.iter().try_for_each(|(kind, stats)| stats.validate(kind))
    }
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self {
            entries: EnemyKind::ALL.map(EnemyStats::defaults_for),
        }
    }
}
