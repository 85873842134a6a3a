#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-stepped simulation that drives the world through a fixed phase pipeline.
//!
//! A [`Simulation`] owns the authoritative [`World`] together with every
//! system. Each call to [`Simulation::update`] runs the phases listed in
//! [`Phase::PIPELINE`] in order. Every phase captures fresh views, lets its
//! system emit commands and applies them before the next phase starts.

use std::time::Duration;

use lane_defence_core::{
    CellCoord, Command, ConfigurationError, EnemyId, EnemyView, Event, PlacementError,
    ProjectileView, Resources, SimulationConfig, TowerCatalog, TowerId, TowerKind, TowerTarget,
    TowerView, WaveSnapshot,
};
use lane_defence_system_movement::Movement;
use lane_defence_system_projectiles::ProjectileResolution;
use lane_defence_system_tower_combat::TowerCombat;
use lane_defence_system_tower_targeting::TowerTargeting;
use lane_defence_system_waves::WaveDirector;
use lane_defence_world::{self as world, query, World};
use tracing::{debug, trace};

/// Discrete step of a simulation update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Advances the clock and tower cooldowns.
    Clock,
    /// Counts down the spawn timer, releases enemies and clears finished waves.
    Spawn,
    /// Walks enemies along the path.
    Movement,
    /// Removes enemies that reached the end of the path.
    Leaks,
    /// Lets ready towers select targets and fire.
    Towers,
    /// Advances projectiles and resolves their hits.
    Projectiles,
    /// Removes destroyed enemies and pays out rewards.
    Deaths,
}

impl Phase {
    /// Order in which [`Simulation::update`] runs the phases.
    pub const PIPELINE: [Phase; 7] = [
        Phase::Clock,
        Phase::Spawn,
        Phase::Movement,
        Phase::Leaks,
        Phase::Towers,
        Phase::Projectiles,
        Phase::Deaths,
    ];
}

/// Owns the world and the systems that advance it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    director: WaveDirector,
    movement: Movement,
    targeting: TowerTargeting,
    combat: TowerCombat,
    projectiles: ProjectileResolution,
    max_frame_dt: Duration,
    commands: Vec<Command>,
    targets: Vec<TowerTarget>,
    events: Vec<Event>,
}

impl Simulation {
    /// Builds a simulation from the provided configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigurationError> {
        let world = World::new(&config)?;
        let max_frame_dt = Duration::try_from_secs_f32(config.max_frame_dt).map_err(|_| {
            ConfigurationError::InvalidValue {
                subject: "simulation",
                field: "max_frame_dt",
            }
        })?;

        Ok(Self {
            world,
            director: WaveDirector::new(config.waves),
            movement: Movement::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            projectiles: ProjectileResolution::new(),
            max_frame_dt,
            commands: Vec::new(),
            targets: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Advances the simulation by `dt`, clamped to the configured maximum frame delta.
    ///
    /// Once the game is over the call does nothing.
    pub fn update(&mut self, dt: Duration) {
        self.events.clear();
        if query::is_game_over(&self.world) {
            trace!("update skipped after game over");
            return;
        }

        let dt = dt.min(self.max_frame_dt);
        for phase in Phase::PIPELINE {
            self.run_phase(phase, dt);
        }
    }

    /// Runs a single phase of the pipeline against the current world state.
    pub fn run_phase(&mut self, phase: Phase, dt: Duration) {
        self.commands.clear();
        match phase {
            Phase::Clock => self.commands.push(Command::Tick { dt }),
            Phase::Spawn => {
                let live = query::enemy_view(&self.world).len();
                self.director.handle(
                    dt,
                    &query::wave_snapshot(&self.world),
                    live,
                    &mut self.commands,
                );
            }
            Phase::Movement => self.movement.handle(
                dt,
                &query::enemy_view(&self.world),
                query::path_view(&self.world),
                &mut self.commands,
            ),
            Phase::Leaks => self.commands.push(Command::SweepLeaks),
            Phase::Towers => {
                let enemies = query::enemy_view(&self.world);
                let catalog = query::tower_catalog(&self.world);
                self.targeting.handle(
                    &query::tower_view(&self.world),
                    &enemies,
                    catalog,
                    &mut self.targets,
                );
                self.combat
                    .handle(&self.targets, &enemies, catalog, &mut self.commands);
            }
            Phase::Projectiles => self.projectiles.handle(
                dt,
                &query::projectile_view(&self.world),
                &query::enemy_view(&self.world),
                query::tower_catalog(&self.world),
                query::playfield(&self.world),
                &mut self.commands,
            ),
            Phase::Deaths => self.commands.push(Command::SweepDeaths),
        }

        trace!(?phase, commands = self.commands.len(), "phase applied");
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    /// Attempts to build a tower of `kind` on `cell`, deducting its cost on success.
    pub fn request_placement(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
    ) -> Result<TowerId, PlacementError> {
        world::place_tower(&mut self.world, kind, cell, &mut self.events)
    }

    /// Same as [`Simulation::request_placement`] for a textual tower type.
    ///
    /// Names that match no tower type are rejected with
    /// [`PlacementError::UnknownType`].
    pub fn request_placement_by_name(
        &mut self,
        name: &str,
        cell: CellCoord,
    ) -> Result<TowerId, PlacementError> {
        let Ok(kind) = TowerCatalog::resolve(name) else {
            debug!(name, ?cell, "placement of unknown tower type rejected");
            return Err(PlacementError::UnknownType);
        };
        self.request_placement(kind, cell)
    }

    /// Starts the next wave, returning whether one actually started.
    ///
    /// Fails while a wave is in progress or after the game is over.
    pub fn start_wave(&mut self) -> bool {
        let next = query::resources(&self.world).wave.saturating_add(1);
        let plan = self.director.compose(next);
        let first = self.events.len();
        world::apply(&mut self.world, Command::StartWave { plan }, &mut self.events);

        self.events[first..]
            .iter()
            .any(|event| matches!(event, Event::WaveStarted { .. }))
    }

    /// Flags an enemy as slowed, halving its travel speed.
    pub fn set_enemy_slowed(&mut self, enemy: EnemyId, slowed: bool) {
        world::apply(
            &mut self.world,
            Command::SetEnemySlowed { enemy, slowed },
            &mut self.events,
        );
    }

    /// Previews a placement without mutating anything, reporting the cost it would deduct.
    pub fn placement_check(&self, kind: TowerKind, cell: CellCoord) -> Result<u32, PlacementError> {
        query::placement_check(&self.world, kind, cell)
    }

    /// Remaining lives.
    #[must_use]
    pub fn lives(&self) -> u32 {
        query::resources(&self.world).lives
    }

    /// Spendable gold.
    #[must_use]
    pub fn gold(&self) -> u32 {
        query::resources(&self.world).gold
    }

    /// Most recently started wave number.
    #[must_use]
    pub fn wave(&self) -> u32 {
        query::resources(&self.world).wave
    }

    /// Gold, lives and wave in one snapshot.
    #[must_use]
    pub fn resources(&self) -> Resources {
        query::resources(&self.world)
    }

    /// Progress of the current wave.
    #[must_use]
    pub fn wave_snapshot(&self) -> WaveSnapshot {
        query::wave_snapshot(&self.world)
    }

    /// Reports whether the player ran out of lives.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        query::is_game_over(&self.world)
    }

    /// Enemies currently on the path.
    #[must_use]
    pub fn enemies(&self) -> EnemyView {
        query::enemy_view(&self.world)
    }

    /// Towers placed so far.
    #[must_use]
    pub fn towers(&self) -> TowerView {
        query::tower_view(&self.world)
    }

    /// Projectiles and visual records in flight.
    #[must_use]
    pub fn projectiles(&self) -> ProjectileView {
        query::projectile_view(&self.world)
    }

    /// Events emitted since the most recent update began.
    #[must_use]
    pub fn frame_events(&self) -> &[Event] {
        &self.events
    }

    /// Read-only access to the underlying world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }
}
