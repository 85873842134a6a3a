use std::time::Duration;

use lane_defence_core::{
    CellCoord, Command, EnemyKind, EnemySeed, Event, PlacementError, ProjectileEffect,
    ProjectileLaunch, ProjectileRemoval, SimulationConfig, TowerKind, Vec2, WavePhase, WavePlan,
};
use lane_defence_world::{self as world, query, World};

fn new_world(config: SimulationConfig) -> World {
    World::new(&config).expect("configuration is valid")
}

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn plan(wave: u32, kinds: &[EnemyKind]) -> WavePlan {
    WavePlan {
        wave,
        enemies: kinds
            .iter()
            .map(|kind| EnemySeed {
                kind: *kind,
                hp_multiplier: 1.0,
                speed_multiplier: 1.0,
            })
            .collect(),
    }
}

fn spawn_now() -> Command {
    Command::SpawnNextEnemy {
        next_spawn_in: Duration::ZERO,
    }
}

#[test]
fn placement_deducts_cost_then_rejects_unaffordable_tower() {
    let mut world = new_world(SimulationConfig::default());

    let events = apply_all(
        &mut world,
        vec![
            Command::PlaceTower {
                kind: TowerKind::Basic,
                cell: CellCoord::new(3, 3),
            },
            Command::PlaceTower {
                kind: TowerKind::Missile,
                cell: CellCoord::new(4, 3),
            },
        ],
    );

    assert!(matches!(
        events[0],
        Event::TowerPlaced {
            kind: TowerKind::Basic,
            cost: 50,
            ..
        }
    ));
    assert_eq!(
        events[1],
        Event::TowerPlacementRejected {
            kind: TowerKind::Missile,
            cell: CellCoord::new(4, 3),
            reason: PlacementError::InsufficientGold,
        }
    );
    assert_eq!(query::resources(&world).gold, 100);
    assert_eq!(query::tower_view(&world).len(), 1);
}

#[test]
fn every_path_cell_rejects_placement() {
    let mut world = new_world(SimulationConfig::default());
    let path_cells = query::blocked_cells(&world);
    assert!(!path_cells.is_empty());

    for cell in path_cells {
        let events = apply_all(
            &mut world,
            vec![Command::PlaceTower {
                kind: TowerKind::Basic,
                cell,
            }],
        );
        assert_eq!(
            events,
            vec![Event::TowerPlacementRejected {
                kind: TowerKind::Basic,
                cell,
                reason: PlacementError::BlockedCell,
            }]
        );
    }
    assert_eq!(query::resources(&world).gold, 150);
}

#[test]
fn occupied_cell_is_blocked() {
    let mut world = new_world(SimulationConfig::default());
    let cell = CellCoord::new(2, 2);
    let events = apply_all(
        &mut world,
        vec![
            Command::PlaceTower {
                kind: TowerKind::Basic,
                cell,
            },
            Command::PlaceTower {
                kind: TowerKind::Basic,
                cell,
            },
        ],
    );

    assert!(query::is_cell_blocked(&world, cell));
    assert!(query::blocked_cells(&world).contains(&cell));
    assert!(matches!(
        events[1],
        Event::TowerPlacementRejected {
            reason: PlacementError::BlockedCell,
            ..
        }
    ));
    assert_eq!(query::resources(&world).gold, 100);
}

#[test]
fn direct_damage_leaves_enemy_alive_without_reward() {
    let mut world = new_world(SimulationConfig::default());
    let _ = apply_all(
        &mut world,
        vec![
            Command::StartWave {
                plan: plan(1, &[EnemyKind::Normal]),
            },
            spawn_now(),
        ],
    );
    let enemy = query::enemy_view(&world).into_vec()[0];
    assert_eq!(enemy.hp, 40.0);

    let events = apply_all(
        &mut world,
        vec![
            Command::DamageEnemy {
                enemy: enemy.id,
                amount: 12.0,
            },
            Command::SweepDeaths,
        ],
    );

    let after = query::enemy_view(&world).into_vec();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].hp, 28.0);
    assert_eq!(after[0].max_hp, 40.0);
    assert_eq!(after[0].last_damaged_at, Some(0.0));
    assert_eq!(query::resources(&world).gold, 150);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::EnemyKilled { .. })));
}

#[test]
fn overkill_clamps_hit_points_and_pays_reward_once() {
    let mut world = new_world(SimulationConfig::default());
    let _ = apply_all(
        &mut world,
        vec![
            Command::StartWave {
                plan: plan(1, &[EnemyKind::Fast]),
            },
            spawn_now(),
        ],
    );
    let enemy = query::enemy_view(&world).into_vec()[0].id;

    let events = apply_all(
        &mut world,
        vec![
            Command::DamageEnemy { enemy, amount: 100.0 },
            Command::DamageEnemy { enemy, amount: 5.0 },
            Command::SweepDeaths,
            Command::SweepDeaths,
        ],
    );

    assert_eq!(
        events[0],
        Event::EnemyDamaged {
            enemy,
            amount: 25.0,
            remaining: 0.0,
        }
    );
    let kills: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, Event::EnemyKilled { .. }))
        .collect();
    assert_eq!(kills.len(), 1);
    assert_eq!(query::resources(&world).gold, 156);
    assert!(query::enemy_view(&world).is_empty());
}

#[test]
fn leaked_enemies_cost_one_life_each() {
    let mut world = new_world(SimulationConfig::default());
    let _ = apply_all(
        &mut world,
        vec![
            Command::StartWave {
                plan: plan(1, &[EnemyKind::Normal, EnemyKind::Normal]),
            },
            spawn_now(),
            spawn_now(),
        ],
    );
    let enemies = query::enemy_view(&world).into_vec();
    let waypoint_count = query::path_view(&world).len();

    let mut commands = Vec::new();
    for _ in 1..waypoint_count {
        commands.push(Command::AdvanceWaypoint {
            enemy: enemies[0].id,
        });
    }
    commands.push(Command::SweepLeaks);
    let events = apply_all(&mut world, commands);

    assert!(events.contains(&Event::EnemyLeaked {
        enemy: enemies[0].id,
        lives_remaining: 19,
    }));
    assert_eq!(query::resources(&world).lives, 19);
    assert_eq!(query::enemy_view(&world).len(), 1);
}

#[test]
fn losing_the_last_life_ends_the_game_and_blocks_waves() {
    let config = SimulationConfig {
        starting_lives: 1,
        ..SimulationConfig::default()
    };
    let mut world = new_world(config);
    let _ = apply_all(
        &mut world,
        vec![
            Command::StartWave {
                plan: plan(1, &[EnemyKind::Normal, EnemyKind::Normal]),
            },
            spawn_now(),
            spawn_now(),
        ],
    );
    let waypoint_count = query::path_view(&world).len();
    let mut commands = Vec::new();
    for enemy in query::enemy_view(&world).iter() {
        for _ in 1..waypoint_count {
            commands.push(Command::AdvanceWaypoint { enemy: enemy.id });
        }
    }
    commands.push(Command::SweepLeaks);
    let events = apply_all(&mut world, commands);

    let game_overs = events
        .iter()
        .filter(|event| matches!(event, Event::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);
    assert_eq!(query::resources(&world).lives, 0);
    assert!(query::is_game_over(&world));

    let _ = apply_all(
        &mut world,
        vec![Command::ClearWave { bonus: 30 }],
    );
    let events = apply_all(
        &mut world,
        vec![Command::StartWave {
            plan: plan(2, &[EnemyKind::Normal]),
        }],
    );
    assert_eq!(events, vec![Event::WaveStartRejected { wave: 1 }]);
}

#[test]
fn wave_clears_only_when_queue_and_path_are_empty() {
    let mut world = new_world(SimulationConfig::default());
    let _ = apply_all(
        &mut world,
        vec![
            Command::StartWave {
                plan: plan(1, &[EnemyKind::Normal]),
            },
            Command::ClearWave { bonus: 30 },
        ],
    );
    assert_eq!(query::wave_snapshot(&world).phase, WavePhase::Spawning);

    let _ = apply_all(&mut world, vec![spawn_now()]);
    let enemy = query::enemy_view(&world).into_vec()[0].id;
    let events = apply_all(
        &mut world,
        vec![
            Command::DamageEnemy {
                enemy,
                amount: 50.0,
            },
            Command::SweepDeaths,
            Command::ClearWave { bonus: 30 },
        ],
    );

    assert!(events.contains(&Event::WaveCleared { wave: 1, bonus: 30 }));
    assert_eq!(query::wave_snapshot(&world).phase, WavePhase::Idle);
    assert_eq!(query::resources(&world).gold, 150 + 8 + 30);
}

#[test]
fn starting_a_wave_while_spawning_is_rejected() {
    let mut world = new_world(SimulationConfig::default());
    let events = apply_all(
        &mut world,
        vec![
            Command::StartWave {
                plan: plan(1, &[EnemyKind::Normal]),
            },
            Command::StartWave {
                plan: plan(2, &[EnemyKind::Normal]),
            },
        ],
    );
    assert_eq!(
        events,
        vec![
            Event::WaveStarted { wave: 1, enemies: 1 },
            Event::WaveStartRejected { wave: 1 },
        ]
    );
}

#[test]
fn enemy_movement_updates_facing_only_above_threshold() {
    let mut world = new_world(SimulationConfig::default());
    let _ = apply_all(
        &mut world,
        vec![
            Command::StartWave {
                plan: plan(1, &[EnemyKind::Normal]),
            },
            spawn_now(),
        ],
    );
    let enemy = query::enemy_view(&world).into_vec()[0].id;

    let _ = apply_all(
        &mut world,
        vec![Command::MoveEnemy {
            enemy,
            position: Vec2::new(20.0, 315.0),
            velocity: Vec2::new(0.0, 5.0),
        }],
    );
    let snapshot = query::enemy_view(&world).into_vec()[0];
    assert!((snapshot.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

    let _ = apply_all(
        &mut world,
        vec![Command::MoveEnemy {
            enemy,
            position: Vec2::new(20.0, 316.0),
            velocity: Vec2::new(0.05, 0.0),
        }],
    );
    let snapshot = query::enemy_view(&world).into_vec()[0];
    assert!((snapshot.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(snapshot.position, Vec2::new(20.0, 316.0));
}

#[test]
fn firing_resets_cooldown_to_rate_of_fire() {
    let mut world = new_world(SimulationConfig::default());
    let _ = apply_all(
        &mut world,
        vec![
            Command::PlaceTower {
                kind: TowerKind::Sniper,
                cell: CellCoord::new(2, 2),
            },
            Command::StartWave {
                plan: plan(1, &[EnemyKind::Normal]),
            },
            spawn_now(),
        ],
    );
    let tower = query::tower_view(&world).into_vec()[0].id;
    let enemy = query::enemy_view(&world).into_vec()[0].id;

    let _ = apply_all(
        &mut world,
        vec![Command::FireTower {
            tower,
            target: enemy,
            aim: 1.0,
        }],
    );

    let snapshot = query::tower_view(&world).into_vec()[0];
    assert_eq!(snapshot.cooldown, 1.5);
    assert_eq!(snapshot.aim, Some(1.0));
    assert!(!snapshot.is_ready());
}

#[test]
fn projectiles_are_launched_updated_and_removed() {
    let mut world = new_world(SimulationConfig::default());
    let launch = ProjectileLaunch {
        owner: TowerKind::Basic,
        effect: ProjectileEffect::Beam,
        position: Vec2::new(100.0, 100.0),
        velocity: Vec2::new(360.0, 0.0),
        damage: 0.0,
        splash_radius: 0.0,
        lifetime: 0.12,
        homing: None,
        target_snapshot: Some(Vec2::new(150.0, 100.0)),
        chain_path: Vec::new(),
        visual_only: true,
    };
    let events = apply_all(&mut world, vec![Command::LaunchProjectile { launch }]);
    let Event::ProjectileLaunched { projectile, owner } = events[0] else {
        panic!("expected launch event, got {events:?}");
    };
    assert_eq!(owner, TowerKind::Basic);

    let events = apply_all(
        &mut world,
        vec![
            Command::UpdateProjectile {
                projectile,
                position: Vec2::new(110.0, 100.0),
                velocity: Vec2::new(360.0, 0.0),
                lifetime: 0.09,
            },
            Command::MarkProjectileImpact {
                projectile,
                lifetime: 0.1,
            },
        ],
    );
    assert_eq!(events, vec![Event::ProjectileImpacted { projectile }]);
    let snapshot = query::projectile_view(&world).into_vec().remove(0);
    assert!(snapshot.impact);
    assert_eq!(snapshot.lifetime, 0.1);
    assert_eq!(snapshot.max_lifetime, 0.12);
    assert_eq!(snapshot.position, Vec2::new(110.0, 100.0));

    let events = apply_all(
        &mut world,
        vec![Command::RemoveProjectile {
            projectile,
            reason: ProjectileRemoval::Expired,
        }],
    );
    assert_eq!(
        events,
        vec![Event::ProjectileRemoved {
            projectile,
            reason: ProjectileRemoval::Expired,
        }]
    );
    assert!(query::projectile_view(&world).is_empty());
}
