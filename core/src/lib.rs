#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects the simulation
//! driver, the authoritative world, and pure systems. The driver submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what changed. Systems query immutable views and respond
//! exclusively with new command batches.

mod catalog;
mod config;

use std::time::Duration;

pub use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{
    AttackMode, ChainProfile, EnemyCatalog, EnemyKind, EnemyStats, HomingProfile,
    ProjectileEffect, TowerCatalog, TowerKind, TowerStats, UnknownKind,
};
pub use config::{PathConfig, SimulationConfig, WaveTuning};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock and every tower cooldown.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests placement of a tower on the provided grid cell.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Grid cell that will hold the tower.
        cell: CellCoord,
    },
    /// Starts the provided wave unless one is already spawning.
    StartWave {
        /// Composition of the wave.
        plan: WavePlan,
    },
    /// Counts the spawn timer of the active wave down.
    AdvanceSpawnTimer {
        /// Time elapsed since the previous countdown.
        dt: Duration,
    },
    /// Releases the head of the pending queue onto the path.
    SpawnNextEnemy {
        /// Delay applied to the spawn timer after the release.
        next_spawn_in: Duration,
    },
    /// Ends the active wave and grants the clear bonus.
    ClearWave {
        /// Gold granted for clearing the wave.
        bonus: u32,
    },
    /// Replaces an enemy's kinematic state.
    MoveEnemy {
        /// Enemy being moved.
        enemy: EnemyId,
        /// New world position.
        position: Vec2,
        /// New velocity in world units per second.
        velocity: Vec2,
    },
    /// Retargets an enemy at the next waypoint of the path.
    AdvanceWaypoint {
        /// Enemy that reached its current waypoint.
        enemy: EnemyId,
    },
    /// Toggles the half-speed state of an enemy.
    SetEnemySlowed {
        /// Enemy being affected.
        enemy: EnemyId,
        /// Whether the enemy moves at half speed.
        slowed: bool,
    },
    /// Removes every enemy that exhausted the path and charges one life each.
    SweepLeaks,
    /// Records that a tower fired at a target and restarts its cooldown.
    FireTower {
        /// Tower that fired.
        tower: TowerId,
        /// Enemy the tower aimed at.
        target: EnemyId,
        /// Aim angle in radians.
        aim: f32,
    },
    /// Subtracts hit points from an enemy.
    DamageEnemy {
        /// Enemy receiving the damage.
        enemy: EnemyId,
        /// Hit points removed.
        amount: f32,
    },
    /// Creates a new projectile record.
    LaunchProjectile {
        /// Initial state of the projectile.
        launch: ProjectileLaunch,
    },
    /// Replaces a projectile's kinematic state after integration.
    UpdateProjectile {
        /// Projectile being updated.
        projectile: ProjectileId,
        /// New world position.
        position: Vec2,
        /// New velocity in world units per second.
        velocity: Vec2,
        /// Remaining lifetime in seconds.
        lifetime: f32,
    },
    /// Flags a visual projectile as having reached its target.
    MarkProjectileImpact {
        /// Projectile that touched an enemy.
        projectile: ProjectileId,
        /// Remaining lifetime granted for the impact visual.
        lifetime: f32,
    },
    /// Reclaims a projectile.
    RemoveProjectile {
        /// Projectile being reclaimed.
        projectile: ProjectileId,
        /// Why the projectile is gone.
        reason: ProjectileRemoval,
    },
    /// Removes every enemy with no hit points left and pays its reward.
    SweepDeaths,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a tower was placed.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Cell that holds the tower.
        cell: CellCoord,
        /// Gold deducted for the placement.
        cost: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that a new wave started spawning.
    WaveStarted {
        /// Wave number, starting at one.
        wave: u32,
        /// Number of enemies queued for the wave.
        enemies: usize,
    },
    /// Reports that a wave start request was ignored.
    WaveStartRejected {
        /// Wave number that is still in progress.
        wave: u32,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Type of the spawned enemy.
        kind: EnemyKind,
    },
    /// Reports that an enemy reached its current waypoint.
    EnemyReachedWaypoint {
        /// Enemy that advanced.
        enemy: EnemyId,
        /// Index of the waypoint the enemy now walks toward.
        path_index: usize,
    },
    /// Announces that the active wave is over.
    WaveCleared {
        /// Wave number that was cleared.
        wave: u32,
        /// Gold granted for clearing the wave.
        bonus: u32,
    },
    /// Reports that an enemy reached the end of the path.
    EnemyLeaked {
        /// Enemy that leaked.
        enemy: EnemyId,
        /// Lives left after the leak.
        lives_remaining: u32,
    },
    /// Announces that the last life was lost.
    GameOver {
        /// Wave during which the game ended.
        wave: u32,
    },
    /// Confirms that a tower fired.
    TowerFired {
        /// Tower that fired.
        tower: TowerId,
        /// Enemy the tower aimed at.
        target: EnemyId,
        /// Aim angle in radians.
        aim: f32,
    },
    /// Reports damage applied to an enemy.
    EnemyDamaged {
        /// Enemy that took damage.
        enemy: EnemyId,
        /// Hit points removed, after clamping at zero.
        amount: f32,
        /// Hit points left.
        remaining: f32,
    },
    /// Confirms that a projectile record was created.
    ProjectileLaunched {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower type that fired the projectile.
        owner: TowerKind,
    },
    /// Reports that a visual projectile touched its target.
    ProjectileImpacted {
        /// Projectile that touched an enemy.
        projectile: ProjectileId,
    },
    /// Confirms that a projectile was reclaimed.
    ProjectileRemoved {
        /// Projectile that was reclaimed.
        projectile: ProjectileId,
        /// Why the projectile is gone.
        reason: ProjectileRemoval,
    },
    /// Reports that an enemy was destroyed.
    EnemyKilled {
        /// Enemy that was destroyed.
        enemy: EnemyId,
        /// Gold granted for the kill.
        reward: u32,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the projectile identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that requests aimed outside the grid can be
/// represented and rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

/// Describes the discrete tile layout of the playfield.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_length: f32,
}

impl TileGrid {
    /// Creates a new tile grid description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_length: f32) -> Self {
        Self {
            columns,
            rows,
            tile_length,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the grid measured in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the grid measured in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        u32::try_from(cell.column()).map_or(false, |column| column < self.columns)
            && u32::try_from(cell.row()).map_or(false, |row| row < self.rows)
    }

    /// World position of the centre of the cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            (cell.column() as f32 + 0.5) * self.tile_length,
            (cell.row() as f32 + 0.5) * self.tile_length,
        )
    }

    /// Cell that contains the provided world position.
    #[must_use]
    pub fn cell_at(&self, point: Vec2) -> CellCoord {
        CellCoord::new(
            (point.x / self.tile_length).floor() as i32,
            (point.y / self.tile_length).floor() as i32,
        )
    }

    /// Region in which projectiles stay alive, extended by `margin` on every side.
    #[must_use]
    pub fn playfield(&self, margin: f32) -> Playfield {
        Playfield {
            width: self.width(),
            height: self.height(),
            margin,
        }
    }
}

/// World-space extent of the playfield plus a reclaim margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    /// Width of the canvas in world units.
    pub width: f32,
    /// Height of the canvas in world units.
    pub height: f32,
    /// Distance outside the canvas that still counts as inside.
    pub margin: f32,
}

impl Playfield {
    /// Reports whether the point lies within the canvas plus margin.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= -self.margin
            && point.y >= -self.margin
            && point.x <= self.width + self.margin
            && point.y <= self.height + self.margin
    }
}

/// Recipe for a single pending enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySeed {
    /// Type of enemy to create.
    pub kind: EnemyKind,
    /// Multiplier applied to base hit points.
    pub hp_multiplier: f32,
    /// Multiplier applied to base speed.
    pub speed_multiplier: f32,
}

/// Ordered composition of a wave.
#[derive(Clone, Debug, PartialEq)]
pub struct WavePlan {
    /// Wave number the plan belongs to.
    pub wave: u32,
    /// Enemies in spawn order.
    pub enemies: Vec<EnemySeed>,
}

impl WavePlan {
    /// Counts the enemies of the provided kind.
    #[must_use]
    pub fn count_of(&self, kind: EnemyKind) -> usize {
        self.enemies.iter().filter(|seed| seed.kind == kind).count()
    }
}

/// Lifecycle of the wave director.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// No wave is in progress.
    Idle,
    /// A wave is releasing enemies or still has enemies on the path.
    Spawning,
}

/// Read-only snapshot of the wave queue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSnapshot {
    /// Most recently started wave number, zero before the first wave.
    pub wave: u32,
    /// Current lifecycle phase.
    pub phase: WavePhase,
    /// Enemies still waiting to spawn.
    pub pending: usize,
    /// Seconds until the next release, may be negative.
    pub spawn_timer: f32,
}

/// Player resources shown on the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resources {
    /// Spendable gold.
    pub gold: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Most recently started wave number.
    pub wave: u32,
}

/// Why a projectile left the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileRemoval {
    /// The projectile collided with an enemy.
    Hit,
    /// The projectile ran out of lifetime.
    Expired,
    /// The projectile left the playfield.
    OutOfBounds,
}

/// Initial state of a projectile created by a firing tower.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileLaunch {
    /// Tower type that fired the projectile.
    pub owner: TowerKind,
    /// Visual tag.
    pub effect: ProjectileEffect,
    /// Launch position.
    pub position: Vec2,
    /// Launch velocity.
    pub velocity: Vec2,
    /// Damage applied on hit.
    pub damage: f32,
    /// Splash radius, zero for direct damage.
    pub splash_radius: f32,
    /// Seconds the projectile may live.
    pub lifetime: f32,
    /// Steering parameters when the projectile homes.
    pub homing: Option<HomingProfile>,
    /// Target position at fire time, used to draw beams.
    pub target_snapshot: Option<Vec2>,
    /// Points visited by a chain attack.
    pub chain_path: Vec<Vec2>,
    /// Whether the record only exists for rendering and never deals damage.
    pub visual_only: bool,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Type of the enemy.
    pub kind: EnemyKind,
    /// World position.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Facing angle in radians.
    pub rotation: f32,
    /// Collision radius.
    pub radius: f32,
    /// Travel speed before slowing.
    pub speed: f32,
    /// Hit points left.
    pub hp: f32,
    /// Hit points at spawn.
    pub max_hp: f32,
    /// Index of the waypoint the enemy walks toward.
    pub path_index: usize,
    /// Gold granted when the enemy is destroyed.
    pub reward: u32,
    /// Whether the enemy is airborne.
    pub airborne: bool,
    /// Whether the enemy moves at half speed.
    pub slowed: bool,
    /// Simulation time of the latest damage application.
    pub last_damaged_at: Option<f32>,
}

/// Read-only snapshot describing all enemies on the path.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a specific enemy.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no enemy is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Grid cell holding the tower.
    pub cell: CellCoord,
    /// World position of the cell centre.
    pub position: Vec2,
    /// Seconds until the tower may fire again, may be negative.
    pub cooldown: f32,
    /// Angle of the most recent shot.
    pub aim: Option<f32>,
}

impl TowerSnapshot {
    /// Reports whether the tower may fire this tick.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }
}

/// Read-only snapshot describing all towers placed on the grid.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Number of towers captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no tower has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Tower type that fired the projectile.
    pub owner: TowerKind,
    /// Visual tag.
    pub effect: ProjectileEffect,
    /// World position.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Damage applied on hit.
    pub damage: f32,
    /// Splash radius, zero for direct damage.
    pub splash_radius: f32,
    /// Seconds left before expiry.
    pub lifetime: f32,
    /// Lifetime at launch.
    pub max_lifetime: f32,
    /// Steering parameters when the projectile homes.
    pub homing: Option<HomingProfile>,
    /// Target position at fire time.
    pub target_snapshot: Option<Vec2>,
    /// Points visited by a chain attack.
    pub chain_path: Vec<Vec2>,
    /// Whether the record only exists for rendering.
    pub visual_only: bool,
    /// Whether a visual record already touched its target.
    pub impact: bool,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in launch order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of projectiles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no projectile is in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Read-only view of the waypoint path in world coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PathView<'a> {
    waypoints: &'a [Vec2],
}

impl<'a> PathView<'a> {
    /// Captures a new path view backed by the provided waypoint slice.
    #[must_use]
    pub fn new(waypoints: &'a [Vec2]) -> Self {
        Self { waypoints }
    }

    /// Centre of the waypoint at the provided index.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<Vec2> {
        self.waypoints.get(index).copied()
    }

    /// Number of waypoints along the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Reports whether the path has no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Target selected for a ready tower during the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that will fire.
    pub tower: TowerId,
    /// Type of the tower.
    pub kind: TowerKind,
    /// Enemy selected as target.
    pub target: EnemyId,
    /// World position of the tower.
    pub tower_position: Vec2,
    /// World position of the target when it was selected.
    pub target_position: Vec2,
    /// Angle from tower to target in radians.
    pub aim: f32,
}

/// Finds the enemy closest to `origin` within `max_distance` that satisfies `eligible`.
///
/// Candidates are scanned in iteration order and only a strictly closer
/// candidate replaces the current best, so ties resolve to the first found.
pub fn nearest_enemy<'a, I, P>(
    enemies: I,
    origin: Vec2,
    max_distance: f32,
    mut eligible: P,
) -> Option<&'a EnemySnapshot>
where
    I: IntoIterator<Item = &'a EnemySnapshot>,
    P: FnMut(&EnemySnapshot) -> bool,
{
    let mut best: Option<(&EnemySnapshot, f32)> = None;
    for enemy in enemies {
        if !eligible(enemy) {
            continue;
        }
        let distance = origin.distance(enemy.position);
        if distance > max_distance {
            continue;
        }
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((enemy, distance));
        }
    }
    best.map(|(enemy, _)| enemy)
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The requested cell is part of the path or already holds a tower.
    #[error("cell is on the path or already holds a tower")]
    BlockedCell,
    /// The player cannot afford the tower.
    #[error("not enough gold")]
    InsufficientGold,
    /// The requested tower type does not exist.
    #[error("unknown tower type")]
    UnknownType,
}

impl PlacementError {
    /// Stable reason code reported to callers.
    #[must_use]
    pub const fn reason_code(self) -> &'static str {
        match self {
            Self::OutOfBounds => "out_of_bounds",
            Self::BlockedCell => "blocked_cell",
            Self::InsufficientGold => "insufficient_gold",
            Self::UnknownType => "unknown_type",
        }
    }
}

/// Defects in the static configuration detected while building a world.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The grid has no cells.
    #[error("tile grid must contain at least one column and one row")]
    EmptyGrid,
    /// The path cannot form a single segment.
    #[error("path needs at least two waypoints, found {0}")]
    TooFewWaypoints(usize),
    /// Two consecutive waypoints are neither horizontally nor vertically aligned.
    #[error("path segment {index} from {from:?} to {to:?} is diagonal")]
    DiagonalSegment {
        /// Index of the segment's first waypoint.
        index: usize,
        /// Segment start.
        from: CellCoord,
        /// Segment end.
        to: CellCoord,
    },
    /// A waypoint lies outside the grid.
    #[error("waypoint {index} at {cell:?} lies outside the grid")]
    WaypointOutOfBounds {
        /// Index of the offending waypoint.
        index: usize,
        /// Offending cell.
        cell: CellCoord,
    },
    /// A configuration key names no tower type.
    #[error("unknown tower type `{0}`")]
    UnknownTowerKind(String),
    /// A configuration key names no enemy type.
    #[error("unknown enemy type `{0}`")]
    UnknownEnemyKind(String),
    /// A numeric parameter is out of range.
    #[error("invalid `{field}` for {subject}")]
    InvalidValue {
        /// Entry that holds the parameter.
        subject: &'static str,
        /// Parameter name.
        field: &'static str,
    },
}
