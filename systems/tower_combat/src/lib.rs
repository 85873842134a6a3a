#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns tower targets into firing, damage and projectile commands.

use lane_defence_core::{
    nearest_enemy, AttackMode, ChainProfile, Command, EnemyId, EnemyView, ProjectileLaunch,
    TowerCatalog, TowerStats, TowerTarget, Vec2,
};

/// Tower combat system that resolves each archetype's firing behaviour.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
    chain_hits: Vec<EnemyId>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits commands for every tower that acquired a target this tick.
    ///
    /// Each target yields a `FireTower` command followed by the archetype's
    /// effect:
    /// beams damage instantly and leave a visual-only record,
    /// ballistic and homing towers launch a damaging projectile,
    /// chain towers damage every hop instantly and leave a visual path.
    pub fn handle(
        &mut self,
        tower_targets: &[TowerTarget],
        enemies: &EnemyView,
        catalog: &TowerCatalog,
        out: &mut Vec<Command>,
    ) {
        if tower_targets.is_empty() {
            return;
        }

        self.scratch.clear();

        for target in tower_targets {
            let stats = catalog.get(target.kind);
            self.scratch.push(Command::FireTower {
                tower: target.tower,
                target: target.target,
                aim: target.aim,
            });

            match stats.attack {
                AttackMode::Beam => {
                    self.scratch.push(Command::DamageEnemy {
                        enemy: target.target,
                        amount: stats.damage,
                    });
                    self.scratch.push(Command::LaunchProjectile {
                        launch: ProjectileLaunch {
                            damage: 0.0,
                            splash_radius: 0.0,
                            visual_only: true,
                            ..launch_toward(target, stats)
                        },
                    });
                }
                AttackMode::Ballistic => {
                    self.scratch.push(Command::LaunchProjectile {
                        launch: launch_toward(target, stats),
                    });
                }
                AttackMode::Homing(profile) => {
                    self.scratch.push(Command::LaunchProjectile {
                        launch: ProjectileLaunch {
                            homing: Some(profile),
                            ..launch_toward(target, stats)
                        },
                    });
                }
                AttackMode::Chain(chain) => {
                    self.fire_chain(target, stats, chain, enemies);
                }
            }
        }

        out.append(&mut self.scratch);
    }

    fn fire_chain(
        &mut self,
        target: &TowerTarget,
        stats: &TowerStats,
        chain: ChainProfile,
        enemies: &EnemyView,
    ) {
        self.chain_hits.clear();
        let mut path = vec![target.tower_position];
        let mut current = enemies.get(target.target);
        let mut multiplier = 1.0;

        for _ in 0..=chain.bounces {
            let Some(enemy) = current else {
                break;
            };
            path.push(enemy.position);
            self.chain_hits.push(enemy.id);
            self.scratch.push(Command::DamageEnemy {
                enemy: enemy.id,
                amount: stats.damage * multiplier,
            });

            let hits = &self.chain_hits;
            current = nearest_enemy(enemies.iter(), enemy.position, chain.bounce_range, |candidate| {
                !hits.contains(&candidate.id) && stats.can_target(candidate.airborne)
            });
            multiplier *= chain.falloff;
        }

        self.scratch.push(Command::LaunchProjectile {
            launch: ProjectileLaunch {
                owner: target.kind,
                effect: stats.effect,
                position: target.tower_position,
                velocity: Vec2::ZERO,
                damage: 0.0,
                splash_radius: 0.0,
                lifetime: stats.projectile_lifetime,
                homing: None,
                target_snapshot: Some(target.target_position),
                chain_path: path,
                visual_only: true,
            },
        });
    }
}

fn launch_toward(target: &TowerTarget, stats: &TowerStats) -> ProjectileLaunch {
    ProjectileLaunch {
        owner: target.kind,
        effect: stats.effect,
        position: target.tower_position,
        velocity: Vec2::from_angle(target.aim) * stats.projectile_speed,
        damage: stats.damage,
        splash_radius: stats.splash_radius,
        lifetime: stats.projectile_lifetime,
        homing: None,
        target_snapshot: Some(target.target_position),
        chain_path: Vec::new(),
        visual_only: false,
    }
}
