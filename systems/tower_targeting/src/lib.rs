#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use lane_defence_core::{nearest_enemy, EnemyView, TowerCatalog, TowerTarget, TowerView};

/// Tower targeting system that selects the nearest eligible enemy per ready tower.
#[derive(Debug, Default)]
pub struct TowerTargeting;

impl TowerTargeting {
    /// Creates a new tower targeting system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes tower targets for the provided world snapshot.
    ///
    /// Only towers whose cooldown has run out are considered. Enemies at
    /// exactly the tower's range are still eligible, and airborne enemies are
    /// skipped for towers that cannot hit air. The output buffer is cleared
    /// before populating it with the latest assignments.
    pub fn handle(
        &mut self,
        towers: &TowerView,
        enemies: &EnemyView,
        catalog: &TowerCatalog,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if towers.is_empty() || enemies.is_empty() {
            return;
        }

        for tower in towers.iter().filter(|tower| tower.is_ready()) {
            let stats = catalog.get(tower.kind);
            let Some(enemy) = nearest_enemy(enemies.iter(), tower.position, stats.range, |enemy| {
                stats.can_target(enemy.airborne)
            }) else {
                continue;
            };

            let offset = enemy.position - tower.position;
            out.push(TowerTarget {
                tower: tower.id,
                kind: tower.kind,
                target: enemy.id,
                tower_position: tower.position,
                target_position: enemy.position,
                aim: offset.y.atan2(offset.x),
            });
        }
    }
}
