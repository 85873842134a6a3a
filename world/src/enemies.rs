//! Enemy records and the factory that builds them from wave seeds.

use lane_defence_core::{EnemyId, EnemyKind, EnemySeed, EnemyStats, Vec2};

/// Authoritative state of a single enemy on the path.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EnemyState {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) rotation: f32,
    pub(crate) radius: f32,
    pub(crate) speed: f32,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) path_index: usize,
    pub(crate) reward: u32,
    pub(crate) airborne: bool,
    pub(crate) slowed: bool,
    pub(crate) last_damaged_at: Option<f32>,
}

/// Builds a fresh enemy standing on the first waypoint and walking toward the second.
///
/// Hit points are rounded down after scaling. Kinds that do not scale with
/// the wave ignore both multipliers.
pub(crate) fn spawn_enemy(id: EnemyId, seed: EnemySeed, stats: &EnemyStats, origin: Vec2) -> EnemyState {
    let (hp_multiplier, speed_multiplier) = if stats.scales_with_wave {
        (seed.hp_multiplier, seed.speed_multiplier)
    } else {
        (1.0, 1.0)
    };
    let hp = (stats.hp * hp_multiplier).floor();

    EnemyState {
        id,
        kind: seed.kind,
        position: origin,
        velocity: Vec2::ZERO,
        rotation: 0.0,
        radius: stats.radius,
        speed: stats.speed * speed_multiplier,
        hp,
        max_hp: hp,
        path_index: 1,
        reward: stats.reward,
        airborne: stats.airborne,
        slowed: false,
        last_damaged_at: None,
    }
}
