use std::time::Duration;

use lane_defence_core::{Command, EnemyKind, Event, SimulationConfig, WavePhase};
use lane_defence_system_waves::WaveDirector;
use lane_defence_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(250);

fn step(world: &mut World, director: &WaveDirector, dt: Duration) -> Vec<Event> {
    let mut commands = Vec::new();
    director.handle(
        dt,
        &query::wave_snapshot(world),
        query::enemy_view(world).len(),
        &mut commands,
    );
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn start(world: &mut World, director: &WaveDirector, wave: u32) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::StartWave {
            plan: director.compose(wave),
        },
        &mut events,
    );
    events
}

#[test]
fn releases_one_enemy_per_spawn_interval() {
    let mut world = World::new(&SimulationConfig::default()).expect("valid configuration");
    let director = WaveDirector::default();
    let events = start(&mut world, &director, 1);
    assert_eq!(events, vec![Event::WaveStarted { wave: 1, enemies: 8 }]);

    let events = step(&mut world, &director, FRAME);
    assert!(matches!(
        events.as_slice(),
        [Event::EnemySpawned {
            kind: EnemyKind::Normal,
            ..
        }]
    ));

    for _ in 0..3 {
        assert!(step(&mut world, &director, FRAME).is_empty());
    }
    assert_eq!(query::enemy_view(&world).len(), 1);

    let events = step(&mut world, &director, FRAME);
    assert_eq!(events.len(), 1);
    assert_eq!(query::enemy_view(&world).len(), 2);
    assert_eq!(query::wave_snapshot(&world).pending, 6);
}

#[test]
fn wave_clears_after_last_enemy_is_gone_and_pays_bonus() {
    let mut world = World::new(&SimulationConfig::default()).expect("valid configuration");
    let director = WaveDirector::default();
    let _ = start(&mut world, &director, 1);

    let mut spawned = 0;
    for _ in 0..64 {
        let events = step(&mut world, &director, FRAME);
        spawned += events
            .iter()
            .filter(|event| matches!(event, Event::EnemySpawned { .. }))
            .count();
        if query::wave_snapshot(&world).pending == 0 {
            break;
        }
    }
    assert_eq!(spawned, 8);
    assert_eq!(query::wave_snapshot(&world).phase, WavePhase::Spawning);

    let mut events = Vec::new();
    for enemy in query::enemy_view(&world).iter() {
        world::apply(
            &mut world,
            Command::DamageEnemy {
                enemy: enemy.id,
                amount: enemy.hp,
            },
            &mut events,
        );
    }
    world::apply(&mut world, Command::SweepDeaths, &mut events);
    let gold_after_kills = query::resources(&world).gold;
    assert_eq!(gold_after_kills, 150 + 8 * 8);

    let events = step(&mut world, &director, FRAME);
    assert_eq!(events, vec![Event::WaveCleared { wave: 1, bonus: 30 }]);
    assert_eq!(query::resources(&world).gold, gold_after_kills + 30);
    assert_eq!(query::wave_snapshot(&world).phase, WavePhase::Idle);

    assert!(step(&mut world, &director, FRAME).is_empty());
}

#[test]
fn composition_is_deterministic() {
    let director = WaveDirector::default();
    for wave in 1..=25 {
        assert_eq!(director.compose(wave), director.compose(wave));
    }
}

#[test]
fn tank_count_follows_five_wave_cadence() {
    let director = WaveDirector::default();
    for wave in 1..=4 {
        assert_eq!(director.compose(wave).count_of(EnemyKind::Tank), 0);
    }
    for wave in 5..=9 {
        assert_eq!(director.compose(wave).count_of(EnemyKind::Tank), 1, "wave {wave}");
    }
    assert_eq!(director.compose(15).count_of(EnemyKind::Tank), 3);
}

#[test]
fn jets_appear_from_wave_ten() {
    let director = WaveDirector::default();
    for wave in 1..10 {
        assert_eq!(director.compose(wave).count_of(EnemyKind::Jet), 0);
    }
    for wave in 10..=30 {
        assert!(director.compose(wave).count_of(EnemyKind::Jet) >= 1, "wave {wave}");
    }
}
