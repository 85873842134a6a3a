use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use lane_defence_core::{
    CellCoord, Command, EnemyId, EnemyKind, EnemySeed, SimulationConfig, TowerKind, TowerTarget,
    Vec2, WavePlan,
};
use lane_defence_system_tower_targeting::TowerTargeting;
use lane_defence_world::{self as world, query, World};

#[test]
fn deterministic_replay_selects_identical_targets() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(fingerprint(&first), fingerprint(&second));
    assert!(
        first.iter().any(|targets| !targets.is_empty()),
        "script must produce at least one assignment"
    );
}

#[test]
fn anti_air_restriction_holds_at_any_distance() {
    let config = SimulationConfig {
        starting_gold: 1_000,
        ..SimulationConfig::default()
    };
    let mut world = World::new(&config).expect("valid configuration");
    let mut events = Vec::new();
    for (kind, column) in [
        (TowerKind::Splash, 2),
        (TowerKind::Machinegun, 4),
        (TowerKind::Wizard, 6),
    ] {
        world::apply(
            &mut world,
            Command::PlaceTower {
                kind,
                cell: CellCoord::new(column, 12),
            },
            &mut events,
        );
    }
    assert_eq!(query::tower_view(&world).len(), 3);
    world::apply(
        &mut world,
        Command::StartWave {
            plan: WavePlan {
                wave: 1,
                enemies: vec![seed(EnemyKind::Jet)],
            },
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SpawnNextEnemy {
            next_spawn_in: Duration::ZERO,
        },
        &mut events,
    );
    let jet = query::enemy_view(&world).into_vec()[0];

    let mut targeting = TowerTargeting::new();
    let mut targets = Vec::new();
    for tower in query::tower_view(&world).iter() {
        let position = tower.position;
        for offset in [Vec2::ZERO, Vec2::new(5.0, 0.0), Vec2::new(0.0, 40.0)] {
            world::apply(
                &mut world,
                Command::MoveEnemy {
                    enemy: jet.id,
                    position: position + offset,
                    velocity: Vec2::ZERO,
                },
                &mut events,
            );
            targeting.handle(
                &query::tower_view(&world),
                &query::enemy_view(&world),
                query::tower_catalog(&world),
                &mut targets,
            );
            assert!(targets.is_empty(), "{:?} targeted a jet", tower.kind);
        }
    }
}

fn seed(kind: EnemyKind) -> EnemySeed {
    EnemySeed {
        kind,
        hp_multiplier: 1.0,
        speed_multiplier: 1.0,
    }
}

fn replay(commands: Vec<Command>) -> Vec<Vec<TowerTarget>> {
    let mut world = World::new(&SimulationConfig::default()).expect("valid configuration");
    let mut targeting = TowerTargeting::new();
    let mut current = Vec::new();
    let mut assignments = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);

        targeting.handle(
            &query::tower_view(&world),
            &query::enemy_view(&world),
            query::tower_catalog(&world),
            &mut current,
        );
        assignments.push(current.clone());
    }

    assignments
}

fn scripted_commands() -> Vec<Command> {
    let spawn = Command::SpawnNextEnemy {
        next_spawn_in: Duration::ZERO,
    };
    vec![
        Command::PlaceTower {
            kind: TowerKind::Basic,
            cell: CellCoord::new(3, 8),
        },
        Command::StartWave {
            plan: WavePlan {
                wave: 1,
                enemies: vec![
                    seed(EnemyKind::Normal),
                    seed(EnemyKind::Jet),
                    seed(EnemyKind::Fast),
                ],
            },
        },
        spawn.clone(),
        spawn.clone(),
        spawn,
        Command::MoveEnemy {
            enemy: EnemyId::new(1),
            position: Vec2::new(105.0, 255.0),
            velocity: Vec2::ZERO,
        },
        Command::Tick {
            dt: Duration::from_millis(33),
        },
    ]
}

fn fingerprint(assignments: &[Vec<TowerTarget>]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for targets in assignments {
        targets.len().hash(&mut hasher);
        for target in targets {
            target.tower.hash(&mut hasher);
            target.target.hash(&mut hasher);
            target.aim.to_bits().hash(&mut hasher);
        }
    }
    hasher.finish()
}
