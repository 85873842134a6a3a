#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that walks enemies along the waypoint path.

use std::time::Duration;

use lane_defence_core::{Command, EnemySnapshot, EnemyView, PathView, Vec2};

/// Rate constant of the exponential speed easing, per second.
pub const ACCELERATION: f32 = 5.0;
/// Distance at which an enemy counts as standing on its waypoint.
pub const ARRIVAL_EPSILON: f32 = 1.0;
/// Speed factor applied to slowed enemies.
pub const SLOW_FACTOR: f32 = 0.5;

/// Pure system that eases enemies toward their next waypoint.
#[derive(Debug, Default)]
pub struct Movement {
    scratch: Vec<Command>,
}

impl Movement {
    /// Creates a new movement system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one movement or waypoint command per enemy that still has a waypoint ahead.
    ///
    /// A step that would carry an enemy past its waypoint stops on the
    /// waypoint instead. Enemies that already passed the last waypoint are
    /// left alone so that the leak sweep can remove them.
    pub fn handle(
        &mut self,
        dt: Duration,
        enemies: &EnemyView,
        path: PathView<'_>,
        out: &mut Vec<Command>,
    ) {
        self.scratch.clear();
        let seconds = dt.as_secs_f32();

        for enemy in enemies.iter() {
            let Some(target) = path.waypoint(enemy.path_index) else {
                continue;
            };
            self.scratch.push(step(enemy, target, seconds));
        }

        out.append(&mut self.scratch);
    }
}

fn step(enemy: &EnemySnapshot, target: Vec2, seconds: f32) -> Command {
    let offset = target - enemy.position;
    let distance = offset.length();
    if distance < ARRIVAL_EPSILON {
        return Command::AdvanceWaypoint { enemy: enemy.id };
    }

    let target_speed = if enemy.slowed {
        enemy.speed * SLOW_FACTOR
    } else {
        enemy.speed
    };
    let current_speed = enemy.velocity.length();
    let speed = current_speed + (target_speed - current_speed) * (1.0 - (-ACCELERATION * seconds).exp());
    let velocity = offset / distance * speed;
    let position = if speed * seconds >= distance {
        target
    } else {
        enemy.position + velocity * seconds
    };

    Command::MoveEnemy {
        enemy: enemy.id,
        position,
        velocity,
    }
}
