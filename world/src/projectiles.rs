//! Projectile records held by the world.

use lane_defence_core::{
    HomingProfile, ProjectileEffect, ProjectileId, ProjectileLaunch, TowerKind, Vec2,
};

#[derive(Clone, Debug)]
pub(crate) struct ProjectileState {
    pub(crate) id: ProjectileId,
    pub(crate) owner: TowerKind,
    pub(crate) effect: ProjectileEffect,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) damage: f32,
    pub(crate) splash_radius: f32,
    pub(crate) lifetime: f32,
    pub(crate) max_lifetime: f32,
    pub(crate) homing: Option<HomingProfile>,
    pub(crate) target_snapshot: Option<Vec2>,
    pub(crate) chain_path: Vec<Vec2>,
    pub(crate) visual_only: bool,
    pub(crate) impact: bool,
}

impl ProjectileState {
    pub(crate) fn launch(id: ProjectileId, launch: ProjectileLaunch) -> Self {
        Self {
            id,
            owner: launch.owner,
            effect: launch.effect,
            position: launch.position,
            velocity: launch.velocity,
            damage: launch.damage,
            splash_radius: launch.splash_radius,
            lifetime: launch.lifetime,
            max_lifetime: launch.lifetime,
            homing: launch.homing,
            target_snapshot: launch.target_snapshot,
            chain_path: launch.chain_path,
            visual_only: launch.visual_only,
            impact: false,
        }
    }
}
