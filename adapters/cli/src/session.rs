//! Headless session that builds towers and plays a fixed number of waves.

use std::{fmt, time::Duration};

use lane_defence_core::{Event, WavePhase};
use lane_defence_simulation::Simulation;
use tracing::{info, warn};

use crate::placement::TowerOrder;

/// Pacing and length of a headless session.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SessionPlan {
    pub(crate) waves: u32,
    pub(crate) frame: Duration,
    pub(crate) max_frames: u64,
}

/// Outcome reported once the session ends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) towers_placed: usize,
    pub(crate) towers_rejected: usize,
    pub(crate) waves_cleared: u32,
    pub(crate) kills: usize,
    pub(crate) leaks: usize,
    pub(crate) frames: u64,
    pub(crate) gold: u32,
    pub(crate) lives: u32,
    pub(crate) wave: u32,
    pub(crate) game_over: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "towers: {} placed, {} rejected",
            self.towers_placed, self.towers_rejected
        )?;
        writeln!(
            f,
            "waves:  {} cleared of {} started",
            self.waves_cleared, self.wave
        )?;
        writeln!(f, "kills:  {}", self.kills)?;
        writeln!(f, "leaks:  {}", self.leaks)?;
        writeln!(f, "gold:   {}", self.gold)?;
        writeln!(f, "lives:  {}", self.lives)?;
        write!(
            f,
            "result: {} after {} frames",
            if self.game_over { "game over" } else { "survived" },
            self.frames
        )
    }
}

/// Places every order, then plays waves back to back until the plan is done.
pub(crate) fn play(simulation: &mut Simulation, orders: &[TowerOrder], plan: SessionPlan) -> Summary {
    let mut summary = Summary::default();

    for order in orders {
        match simulation.request_placement_by_name(&order.kind, order.cell) {
            Ok(tower) => {
                summary.towers_placed += 1;
                info!(tower = tower.get(), kind = %order.kind, cell = ?order.cell, "tower built");
            }
            Err(reason) => {
                summary.towers_rejected += 1;
                warn!(
                    kind = %order.kind,
                    cell = ?order.cell,
                    reason = reason.reason_code(),
                    "tower rejected"
                );
            }
        }
    }

    while summary.frames < plan.max_frames && !simulation.is_game_over() {
        if simulation.wave_snapshot().phase == WavePhase::Idle {
            if simulation.wave() >= plan.waves || !simulation.start_wave() {
                break;
            }
        }

        simulation.update(plan.frame);
        summary.frames += 1;
        for event in simulation.frame_events() {
            match event {
                Event::EnemyKilled { .. } => summary.kills += 1,
                Event::EnemyLeaked { .. } => summary.leaks += 1,
                Event::WaveCleared { wave, bonus } => {
                    summary.waves_cleared += 1;
                    info!(wave, bonus, "wave cleared");
                }
                _ => {}
            }
        }
    }

    let resources = simulation.resources();
    summary.gold = resources.gold;
    summary.lives = resources.lives;
    summary.wave = resources.wave;
    summary.game_over = simulation.is_game_over();
    summary
}
