#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.

mod enemies;
mod path;
mod projectiles;
mod towers;
mod waves;

use lane_defence_core::{
    CellCoord, Command, ConfigurationError, EnemyCatalog, EnemyId, Event, PlacementError,
    Playfield, ProjectileId, SimulationConfig, TileGrid, TowerCatalog, TowerId, TowerKind,
};
use tracing::{debug, info, warn};

use enemies::EnemyState;
use path::PathModel;
use projectiles::ProjectileState;
use towers::TowerRegistry;
use waves::WaveQueue;

/// Velocity component below which an enemy keeps its previous facing.
const FACING_THRESHOLD: f32 = 0.1;

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    tile_grid: TileGrid,
    playfield: Playfield,
    path: PathModel,
    tower_catalog: TowerCatalog,
    enemy_catalog: EnemyCatalog,
    towers: TowerRegistry,
    enemies: Vec<EnemyState>,
    next_enemy_id: EnemyId,
    projectiles: Vec<ProjectileState>,
    next_projectile_id: ProjectileId,
    waves: WaveQueue,
    gold: u32,
    lives: u32,
    game_over: bool,
    elapsed: f32,
    tick_index: u64,
}

impl World {
    /// Creates a new world from the provided configuration.
    ///
    /// Fails when the path is malformed or any catalog entry holds an
    /// unusable value.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigurationError> {
        config.towers.validate()?;
        config.enemies.validate()?;
        if !(config.max_frame_dt > 0.0) {
            return Err(ConfigurationError::InvalidValue {
                subject: "simulation",
                field: "max_frame_dt",
            });
        }
        if !(config.bounds_margin >= 0.0) {
            return Err(ConfigurationError::InvalidValue {
                subject: "simulation",
                field: "bounds_margin",
            });
        }
        config.waves.validate()?;

        let path = PathModel::rasterize(&config.grid, &config.path)?;
        debug!(
            blocked = path.blocked_cells().count(),
            waypoints = path.waypoints().len(),
            "rasterized path"
        );

        Ok(Self {
            playfield: config.grid.playfield(config.bounds_margin),
            tile_grid: config.grid.clone(),
            path,
            tower_catalog: config.towers.clone(),
            enemy_catalog: config.enemies.clone(),
            towers: TowerRegistry::new(),
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            projectiles: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
            waves: WaveQueue::new(),
            gold: config.starting_gold,
            lives: config.starting_lives,
            game_over: config.starting_lives == 0,
            elapsed: 0.0,
            tick_index: 0,
        })
    }

    fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut EnemyState> {
        self.enemies
            .binary_search_by_key(&id, |enemy| enemy.id)
            .ok()
            .map(|index| &mut self.enemies[index])
    }

    fn projectile_index(&self, id: ProjectileId) -> Option<usize> {
        self.projectiles
            .binary_search_by_key(&id, |projectile| projectile.id)
            .ok()
    }

    fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        id
    }

    fn allocate_projectile_id(&mut self) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().saturating_add(1));
        id
    }

    fn check_placement(&self, kind: TowerKind, cell: CellCoord) -> Result<u32, PlacementError> {
        if !self.tile_grid.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if self.path.is_blocked(cell) || self.towers.is_occupied(cell) {
            return Err(PlacementError::BlockedCell);
        }
        let cost = self.tower_catalog.get(kind).cost;
        if self.gold < cost {
            return Err(PlacementError::InsufficientGold);
        }
        Ok(cost)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            let seconds = dt.as_secs_f32();
            world.tick_index = world.tick_index.saturating_add(1);
            world.elapsed += seconds;
            for tower in world.towers.iter_mut() {
                tower.cooldown -= seconds;
            }
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::PlaceTower { kind, cell } => {
            let _ = place_tower(world, kind, cell, out_events);
        }
        Command::StartWave { plan } => {
            let expected = world.waves.wave().saturating_add(1);
            if world.game_over || world.waves.is_spawning() || plan.wave != expected {
                debug!(requested = plan.wave, current = world.waves.wave(), "wave start rejected");
                out_events.push(Event::WaveStartRejected {
                    wave: world.waves.wave(),
                });
                return;
            }
            let enemies = plan.enemies.len();
            world.waves.begin(plan.wave, plan.enemies);
            info!(wave = plan.wave, enemies, "wave started");
            out_events.push(Event::WaveStarted {
                wave: plan.wave,
                enemies,
            });
        }
        Command::AdvanceSpawnTimer { dt } => {
            if world.waves.is_spawning() {
                world.waves.count_down(dt.as_secs_f32());
            }
        }
        Command::SpawnNextEnemy { next_spawn_in } => {
            if !world.waves.is_spawning() {
                return;
            }
            let Some(origin) = world.path.waypoints().first().copied() else {
                return;
            };
            let Some(seed) = world.waves.release(next_spawn_in.as_secs_f32()) else {
                return;
            };
            let id = world.allocate_enemy_id();
            let stats = world.enemy_catalog.get(seed.kind);
            let enemy = enemies::spawn_enemy(id, seed, stats, origin);
            debug!(enemy = id.get(), kind = %seed.kind, hp = enemy.hp, "enemy spawned");
            world.enemies.push(enemy);
            out_events.push(Event::EnemySpawned {
                enemy: id,
                kind: seed.kind,
            });
        }
        Command::ClearWave { bonus } => {
            let snapshot = world.waves.snapshot();
            if !world.waves.is_spawning() || snapshot.pending > 0 || !world.enemies.is_empty() {
                return;
            }
            world.waves.finish();
            world.gold = world.gold.saturating_add(bonus);
            info!(wave = snapshot.wave, bonus, gold = world.gold, "wave cleared");
            out_events.push(Event::WaveCleared {
                wave: snapshot.wave,
                bonus,
            });
        }
        Command::MoveEnemy {
            enemy,
            position,
            velocity,
        } => {
            if let Some(state) = world.enemy_mut(enemy) {
                state.position = position;
                state.velocity = velocity;
                if velocity.x.abs() > FACING_THRESHOLD || velocity.y.abs() > FACING_THRESHOLD {
                    state.rotation = velocity.y.atan2(velocity.x);
                }
            }
        }
        Command::AdvanceWaypoint { enemy } => {
            if let Some(state) = world.enemy_mut(enemy) {
                state.path_index = state.path_index.saturating_add(1);
                out_events.push(Event::EnemyReachedWaypoint {
                    enemy,
                    path_index: state.path_index,
                });
            }
        }
        Command::SetEnemySlowed { enemy, slowed } => {
            if let Some(state) = world.enemy_mut(enemy) {
                state.slowed = slowed;
            }
        }
        Command::SweepLeaks => {
            let waypoint_count = world.path.waypoints().len();
            let (leaked, remaining): (Vec<_>, Vec<_>) = world
                .enemies
                .drain(..)
                .partition(|enemy| enemy.path_index >= waypoint_count);
            world.enemies = remaining;

            for enemy in leaked {
                world.lives = world.lives.saturating_sub(1);
                debug!(enemy = enemy.id.get(), lives = world.lives, "enemy leaked");
                out_events.push(Event::EnemyLeaked {
                    enemy: enemy.id,
                    lives_remaining: world.lives,
                });
                if world.lives == 0 && !world.game_over {
                    world.game_over = true;
                    warn!(wave = world.waves.wave(), "game over");
                    out_events.push(Event::GameOver {
                        wave: world.waves.wave(),
                    });
                }
            }
        }
        Command::FireTower { tower, target, aim } => {
            let Some(state) = world.towers.get_mut(tower) else {
                return;
            };
            state.cooldown = world.tower_catalog.get(state.kind).rate_of_fire;
            state.aim = Some(aim);
            out_events.push(Event::TowerFired { tower, target, aim });
        }
        Command::DamageEnemy { enemy, amount } => {
            let elapsed = world.elapsed;
            if let Some(state) = world.enemy_mut(enemy) {
                let applied = amount.max(0.0).min(state.hp);
                state.hp -= applied;
                state.last_damaged_at = Some(elapsed);
                out_events.push(Event::EnemyDamaged {
                    enemy,
                    amount: applied,
                    remaining: state.hp,
                });
            }
        }
        Command::LaunchProjectile { launch } => {
            let id = world.allocate_projectile_id();
            let owner = launch.owner;
            world.projectiles.push(ProjectileState::launch(id, launch));
            out_events.push(Event::ProjectileLaunched {
                projectile: id,
                owner,
            });
        }
        Command::UpdateProjectile {
            projectile,
            position,
            velocity,
            lifetime,
        } => {
            if let Some(index) = world.projectile_index(projectile) {
                let state = &mut world.projectiles[index];
                state.position = position;
                state.velocity = velocity;
                state.lifetime = lifetime;
            }
        }
        Command::MarkProjectileImpact {
            projectile,
            lifetime,
        } => {
            if let Some(index) = world.projectile_index(projectile) {
                let state = &mut world.projectiles[index];
                state.impact = true;
                state.lifetime = lifetime;
                out_events.push(Event::ProjectileImpacted { projectile });
            }
        }
        Command::RemoveProjectile { projectile, reason } => {
            if let Some(index) = world.projectile_index(projectile) {
                let _ = world.projectiles.remove(index);
                out_events.push(Event::ProjectileRemoved { projectile, reason });
            }
        }
        Command::SweepDeaths => {
            let (dead, alive): (Vec<_>, Vec<_>) =
                world.enemies.drain(..).partition(|enemy| enemy.hp <= 0.0);
            world.enemies = alive;

            for enemy in dead {
                world.gold = world.gold.saturating_add(enemy.reward);
                debug!(enemy = enemy.id.get(), reward = enemy.reward, gold = world.gold, "enemy killed");
                out_events.push(Event::EnemyKilled {
                    enemy: enemy.id,
                    reward: enemy.reward,
                });
            }
        }
    }
}

/// Builds a tower of `kind` on `cell`, deducting its cost.
///
/// Emits [`Event::TowerPlaced`] or [`Event::TowerPlacementRejected`] and
/// returns the same outcome to the caller.
pub fn place_tower(
    world: &mut World,
    kind: TowerKind,
    cell: CellCoord,
    out_events: &mut Vec<Event>,
) -> Result<TowerId, PlacementError> {
    match world.check_placement(kind, cell) {
        Ok(cost) => {
            world.gold -= cost;
            let position = world.tile_grid.cell_center(cell);
            let tower = world.towers.insert(kind, cell, position);
            debug!(tower = tower.get(), %kind, ?cell, gold = world.gold, "tower placed");
            out_events.push(Event::TowerPlaced {
                tower,
                kind,
                cell,
                cost,
            });
            Ok(tower)
        }
        Err(reason) => {
            debug!(%kind, ?cell, reason = reason.reason_code(), "tower placement rejected");
            out_events.push(Event::TowerPlacementRejected { kind, cell, reason });
            Err(reason)
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use lane_defence_core::{
        CellCoord, EnemyCatalog, EnemySnapshot, EnemyView, PathView, PlacementError, Playfield,
        ProjectileSnapshot, ProjectileView, Resources, TileGrid, TowerCatalog, TowerKind,
        TowerSnapshot, TowerView, WaveSnapshot,
    };

    use super::World;

    /// Provides read-only access to the world's tile grid definition.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.tile_grid
    }

    /// Region outside of which projectiles are reclaimed.
    #[must_use]
    pub fn playfield(world: &World) -> Playfield {
        world.playfield
    }

    /// Tower stats the world was configured with.
    #[must_use]
    pub fn tower_catalog(world: &World) -> &TowerCatalog {
        &world.tower_catalog
    }

    /// Enemy stats the world was configured with.
    #[must_use]
    pub fn enemy_catalog(world: &World) -> &EnemyCatalog {
        &world.enemy_catalog
    }

    /// Current gold, lives and wave number.
    #[must_use]
    pub fn resources(world: &World) -> Resources {
        Resources {
            gold: world.gold,
            lives: world.lives,
            wave: world.waves.wave(),
        }
    }

    /// Reports whether the last life was lost.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.game_over
    }

    /// Simulated seconds elapsed since the world was created.
    #[must_use]
    pub fn elapsed(world: &World) -> f32 {
        world.elapsed
    }

    /// Number of ticks applied so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the state of the wave queue.
    #[must_use]
    pub fn wave_snapshot(world: &World) -> WaveSnapshot {
        world.waves.snapshot()
    }

    /// Waypoint centres in world coordinates.
    #[must_use]
    pub fn path_view(world: &World) -> PathView<'_> {
        PathView::new(world.path.waypoints())
    }

    /// Captures a read-only view of the enemies on the path.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    kind: enemy.kind,
                    position: enemy.position,
                    velocity: enemy.velocity,
                    rotation: enemy.rotation,
                    radius: enemy.radius,
                    speed: enemy.speed,
                    hp: enemy.hp,
                    max_hp: enemy.max_hp,
                    path_index: enemy.path_index,
                    reward: enemy.reward,
                    airborne: enemy.airborne,
                    slowed: enemy.slowed,
                    last_damaged_at: enemy.last_damaged_at,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every placed tower.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(
            world
                .towers
                .iter()
                .map(|tower| TowerSnapshot {
                    id: tower.id,
                    kind: tower.kind,
                    cell: tower.cell,
                    position: tower.position,
                    cooldown: tower.cooldown,
                    aim: tower.aim,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every projectile in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| ProjectileSnapshot {
                    id: projectile.id,
                    owner: projectile.owner,
                    effect: projectile.effect,
                    position: projectile.position,
                    velocity: projectile.velocity,
                    damage: projectile.damage,
                    splash_radius: projectile.splash_radius,
                    lifetime: projectile.lifetime,
                    max_lifetime: projectile.max_lifetime,
                    homing: projectile.homing,
                    target_snapshot: projectile.target_snapshot,
                    chain_path: projectile.chain_path.clone(),
                    visual_only: projectile.visual_only,
                    impact: projectile.impact,
                })
                .collect(),
        )
    }

    /// Reports whether the cell is covered by the path or holds a tower.
    #[must_use]
    pub fn is_cell_blocked(world: &World, cell: CellCoord) -> bool {
        world.path.is_blocked(cell) || world.towers.is_occupied(cell)
    }

    /// Enumerates every in-grid cell covered by the path or a tower, sorted by row then column.
    #[must_use]
    pub fn blocked_cells(world: &World) -> Vec<CellCoord> {
        let mut cells: Vec<CellCoord> = world
            .path
            .blocked_cells()
            .chain(world.towers.occupied_cells())
            .collect();
        cells.sort_by_key(|cell| (cell.row(), cell.column()));
        cells.dedup();
        cells
    }

    /// Reports the cost a placement would deduct, without mutating anything.
    pub fn placement_check(
        world: &World,
        kind: TowerKind,
        cell: CellCoord,
    ) -> Result<u32, PlacementError> {
        world.check_placement(kind, cell)
    }
}
