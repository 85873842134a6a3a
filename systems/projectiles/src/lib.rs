#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that advances projectiles and resolves their collisions.

use std::{
    f32::consts::{PI, TAU},
    time::Duration,
};

use lane_defence_core::{
    nearest_enemy, Command, EnemySnapshot, EnemyView, HomingProfile, Playfield, ProjectileEffect,
    ProjectileRemoval, ProjectileSnapshot, ProjectileView, TowerCatalog, Vec2,
};

/// Seconds a beam record stays visible after touching its target.
pub const IMPACT_LIFETIME: f32 = 0.1;
/// Share of splash damage lost at the edge of the blast radius.
pub const SPLASH_FALLOFF: f32 = 0.8;

/// Projectile system covering homing, integration, collision and removal.
#[derive(Debug, Default)]
pub struct ProjectileResolution {
    scratch: Vec<Command>,
}

impl ProjectileResolution {
    /// Creates a new projectile system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the commands that advance every projectile by `dt`.
    ///
    /// Each projectile produces an `UpdateProjectile` command with its new
    /// kinematic state, optionally followed by damage and a removal. A
    /// projectile collides with the first enemy in id order whose radius
    /// contains it, airborne or not. Splash projectiles damage every enemy
    /// inside the blast with a linear falloff.
    pub fn handle(
        &mut self,
        dt: Duration,
        projectiles: &ProjectileView,
        enemies: &EnemyView,
        catalog: &TowerCatalog,
        playfield: Playfield,
        out: &mut Vec<Command>,
    ) {
        self.scratch.clear();
        let seconds = dt.as_secs_f32();

        for projectile in projectiles.iter() {
            let stats = catalog.get(projectile.owner);
            let mut velocity = projectile.velocity;
            if let Some(profile) = projectile.homing {
                let target = nearest_enemy(enemies.iter(), projectile.position, f32::INFINITY, |enemy| {
                    enemy.hp > 0.0 && stats.can_target(enemy.airborne)
                });
                if let Some(target) = target {
                    velocity = steer(projectile.position, velocity, target.position, profile, seconds);
                }
            }

            let position = projectile.position + velocity * seconds;
            let mut lifetime = projectile.lifetime - seconds;
            self.scratch.push(Command::UpdateProjectile {
                projectile: projectile.id,
                position,
                velocity,
                lifetime,
            });

            if let Some(hit) = collision(projectile, position, enemies) {
                if projectile.visual_only {
                    lifetime = IMPACT_LIFETIME;
                    self.scratch.push(Command::MarkProjectileImpact {
                        projectile: projectile.id,
                        lifetime,
                    });
                } else {
                    self.apply_hit(projectile, position, hit, enemies);
                    self.scratch.push(Command::RemoveProjectile {
                        projectile: projectile.id,
                        reason: ProjectileRemoval::Hit,
                    });
                    continue;
                }
            }

            let reason = if lifetime <= 0.0 {
                ProjectileRemoval::Expired
            } else if !playfield.contains(position) {
                ProjectileRemoval::OutOfBounds
            } else {
                continue;
            };
            self.scratch.push(Command::RemoveProjectile {
                projectile: projectile.id,
                reason,
            });
        }

        out.append(&mut self.scratch);
    }

    fn apply_hit(
        &mut self,
        projectile: &ProjectileSnapshot,
        position: Vec2,
        hit: &EnemySnapshot,
        enemies: &EnemyView,
    ) {
        if projectile.splash_radius > 0.0 {
            for enemy in enemies.iter() {
                let distance = position.distance(enemy.position);
                if distance <= projectile.splash_radius {
                    self.scratch.push(Command::DamageEnemy {
                        enemy: enemy.id,
                        amount: splash_damage(projectile.damage, distance, projectile.splash_radius),
                    });
                }
            }
        } else {
            self.scratch.push(Command::DamageEnemy {
                enemy: hit.id,
                amount: projectile.damage,
            });
        }
    }
}

/// Damage dealt at `distance` from a blast of `radius`.
///
/// Falls linearly from full damage at the centre to a fifth of it at the edge.
#[must_use]
pub fn splash_damage(damage: f32, distance: f32, radius: f32) -> f32 {
    damage * (1.0 - SPLASH_FALLOFF * distance / radius)
}

fn collision<'a>(
    projectile: &ProjectileSnapshot,
    position: Vec2,
    enemies: &'a EnemyView,
) -> Option<&'a EnemySnapshot> {
    if projectile.impact || (projectile.visual_only && projectile.effect != ProjectileEffect::Beam) {
        return None;
    }
    enemies
        .iter()
        .find(|enemy| position.distance(enemy.position) <= enemy.radius)
}

fn steer(
    position: Vec2,
    velocity: Vec2,
    target: Vec2,
    profile: HomingProfile,
    seconds: f32,
) -> Vec2 {
    let offset = target - position;
    let desired = offset.y.atan2(offset.x);
    let current = velocity.y.atan2(velocity.x);
    let max_turn = profile.turn_rate * seconds;
    let turn = wrap_angle(desired - current).max(-max_turn).min(max_turn);

    let speed = velocity.length();
    let speed = if speed > 0.0 { speed } else { 1.0 };
    let speed = (speed.max(profile.cruise_speed) + profile.acceleration * seconds)
        .min(profile.max_speed);
    Vec2::from_angle(current + turn) * speed
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{EnemyId, EnemyKind, ProjectileId, TowerKind, TowerStats};

    const STEP: Duration = Duration::from_millis(20);

    fn playfield() -> Playfield {
        Playfield {
            width: 900.0,
            height: 540.0,
            margin: 10.0,
        }
    }

    fn enemy(id: u32, x: f32, y: f32, airborne: bool) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: if airborne {
                EnemyKind::Jet
            } else {
                EnemyKind::Normal
            },
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            rotation: 0.0,
            radius: 10.0,
            speed: 60.0,
            hp: 40.0,
            max_hp: 40.0,
            path_index: 1,
            reward: 8,
            airborne,
            slowed: false,
            last_damaged_at: None,
        }
    }

    fn projectile(owner: TowerKind, position: Vec2, velocity: Vec2) -> ProjectileSnapshot {
        let stats = TowerStats::defaults_for(owner);
        ProjectileSnapshot {
            id: ProjectileId::new(0),
            owner,
            effect: stats.effect,
            position,
            velocity,
            damage: stats.damage,
            splash_radius: stats.splash_radius,
            lifetime: stats.projectile_lifetime,
            max_lifetime: stats.projectile_lifetime,
            homing: match stats.attack {
                lane_defence_core::AttackMode::Homing(profile) => Some(profile),
                _ => None,
            },
            target_snapshot: None,
            chain_path: Vec::new(),
            visual_only: false,
            impact: false,
        }
    }

    fn run(projectile: ProjectileSnapshot, enemies: Vec<EnemySnapshot>) -> Vec<Command> {
        let mut out = Vec::new();
        ProjectileResolution::new().handle(
            STEP,
            &ProjectileView::from_snapshots(vec![projectile]),
            &EnemyView::from_snapshots(enemies),
            &TowerCatalog::default(),
            playfield(),
            &mut out,
        );
        out
    }

    fn removal(commands: &[Command]) -> Option<ProjectileRemoval> {
        commands.iter().find_map(|command| match command {
            Command::RemoveProjectile { reason, .. } => Some(*reason),
            _ => None,
        })
    }

    #[test]
    fn wrap_angle_picks_the_short_way_round() {
        assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-5);
        assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn splash_damage_falls_to_a_fifth_at_the_edge() {
        assert_eq!(splash_damage(14.0, 0.0, 80.0), 14.0);
        assert!((splash_damage(14.0, 80.0, 80.0) - 2.8).abs() < 1e-5);
        assert!((splash_damage(14.0, 40.0, 80.0) - 8.4).abs() < 1e-5);
    }

    #[test]
    fn straight_projectile_integrates_and_ages() {
        let commands = run(
            projectile(TowerKind::Sniper, Vec2::new(100.0, 100.0), Vec2::new(500.0, 0.0)),
            Vec::new(),
        );
        assert_eq!(commands.len(), 1);
        match commands[0] {
            Command::UpdateProjectile {
                position, lifetime, ..
            } => {
                assert!((position.x - 110.0).abs() < 1e-4);
                assert!((lifetime - 1.18).abs() < 1e-5);
            }
            ref other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn direct_hit_damages_only_the_first_enemy_in_reach() {
        let commands = run(
            projectile(TowerKind::Sniper, Vec2::new(95.0, 0.0), Vec2::ZERO),
            vec![enemy(0, 100.0, 0.0, false), enemy(1, 98.0, 0.0, false)],
        );
        assert!(commands.contains(&Command::DamageEnemy {
            enemy: EnemyId::new(0),
            amount: 25.0,
        }));
        assert_eq!(
            commands
                .iter()
                .filter(|command| matches!(command, Command::DamageEnemy { .. }))
                .count(),
            1
        );
        assert_eq!(removal(&commands), Some(ProjectileRemoval::Hit));
    }

    #[test]
    fn tracer_overlapping_a_jet_hits_it() {
        let commands = run(
            projectile(TowerKind::Machinegun, Vec2::new(100.0, 0.0), Vec2::ZERO),
            vec![enemy(0, 100.0, 0.0, true)],
        );
        assert!(commands.contains(&Command::DamageEnemy {
            enemy: EnemyId::new(0),
            amount: 3.0,
        }));
        assert_eq!(removal(&commands), Some(ProjectileRemoval::Hit));
    }

    #[test]
    fn splash_orb_detonates_on_the_first_overlapping_jet() {
        let commands = run(
            projectile(TowerKind::Splash, Vec2::new(100.0, 0.0), Vec2::ZERO),
            vec![enemy(0, 100.0, 0.0, true), enemy(1, 140.0, 0.0, false)],
        );
        assert!(commands.contains(&Command::DamageEnemy {
            enemy: EnemyId::new(0),
            amount: 14.0,
        }));
        assert!(commands.contains(&Command::DamageEnemy {
            enemy: EnemyId::new(1),
            amount: splash_damage(14.0, 40.0, 80.0),
        }));
        assert_eq!(removal(&commands), Some(ProjectileRemoval::Hit));
    }

    #[test]
    fn homing_ignores_jets_its_tower_cannot_target() {
        let mut orb = projectile(TowerKind::Splash, Vec2::new(100.0, 100.0), Vec2::new(0.0, 200.0));
        orb.homing = Some(HomingProfile {
            turn_rate: 4.0,
            cruise_speed: 180.0,
            acceleration: 80.0,
            max_speed: 320.0,
        });
        let commands = run(orb, vec![enemy(0, 300.0, 100.0, true)]);
        match commands[0] {
            Command::UpdateProjectile { velocity, .. } => assert_eq!(velocity, Vec2::new(0.0, 200.0)),
            ref other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn expired_and_escaped_projectiles_are_removed() {
        let mut expiring = projectile(TowerKind::Sniper, Vec2::new(100.0, 100.0), Vec2::ZERO);
        expiring.lifetime = 0.01;
        assert_eq!(
            removal(&run(expiring, Vec::new())),
            Some(ProjectileRemoval::Expired)
        );

        let escaping = projectile(TowerKind::Sniper, Vec2::new(905.0, 100.0), Vec2::new(520.0, 0.0));
        assert_eq!(
            removal(&run(escaping, Vec::new())),
            Some(ProjectileRemoval::OutOfBounds)
        );
    }

    #[test]
    fn beam_visual_marks_impact_instead_of_damaging() {
        let mut beam = projectile(TowerKind::Basic, Vec2::new(100.0, 0.0), Vec2::ZERO);
        beam.visual_only = true;
        beam.damage = 0.0;
        let commands = run(beam.clone(), vec![enemy(0, 100.0, 0.0, false)]);
        assert!(commands.contains(&Command::MarkProjectileImpact {
            projectile: ProjectileId::new(0),
            lifetime: IMPACT_LIFETIME,
        }));
        assert_eq!(removal(&commands), None);

        beam.impact = true;
        let commands = run(beam, vec![enemy(0, 100.0, 0.0, false)]);
        assert_eq!(commands.len(), 1, "impacted beams stop colliding");
    }

    #[test]
    fn missile_turns_toward_the_nearest_enemy_within_turn_rate() {
        let missile = projectile(TowerKind::Missile, Vec2::ZERO, Vec2::new(220.0, 0.0));
        let commands = run(missile, vec![enemy(0, 0.0, 200.0, false)]);
        match commands[0] {
            Command::UpdateProjectile { velocity, .. } => {
                let heading = velocity.y.atan2(velocity.x);
                assert!((heading - 4.0 * 0.02).abs() < 1e-4);
                assert!((velocity.length() - (220.0 + 80.0 * 0.02)).abs() < 1e-3);
            }
            ref other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn missile_flies_straight_without_targets() {
        let missile = projectile(TowerKind::Missile, Vec2::ZERO, Vec2::new(220.0, 0.0));
        match run(missile, Vec::new())[0] {
            Command::UpdateProjectile { velocity, .. } => {
                assert_eq!(velocity, Vec2::new(220.0, 0.0));
            }
            ref other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn missile_speed_is_capped() {
        let missile = projectile(TowerKind::Missile, Vec2::ZERO, Vec2::new(319.0, 0.0));
        match run(missile, vec![enemy(0, 300.0, 0.0, false)])[0] {
            Command::UpdateProjectile { velocity, .. } => {
                assert!((velocity.length() - 320.0).abs() < 1e-3);
            }
            ref other => panic!("unexpected command {other:?}"),
        }
    }
}
