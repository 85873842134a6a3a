//! Pending enemy queue and spawn timer of the active wave.

use std::collections::VecDeque;

use lane_defence_core::{EnemySeed, WavePhase, WaveSnapshot};

#[derive(Debug)]
pub(crate) struct WaveQueue {
    wave: u32,
    phase: WavePhase,
    pending: VecDeque<EnemySeed>,
    spawn_timer: f32,
}

impl WaveQueue {
    pub(crate) fn new() -> Self {
        Self {
            wave: 0,
            phase: WavePhase::Idle,
            pending: VecDeque::new(),
            spawn_timer: 0.0,
        }
    }

    pub(crate) fn wave(&self) -> u32 {
        self.wave
    }

    pub(crate) fn is_spawning(&self) -> bool {
        self.phase == WavePhase::Spawning
    }

    /// Enters the spawning phase with a fresh queue and an expired timer.
    pub(crate) fn begin(&mut self, wave: u32, enemies: Vec<EnemySeed>) {
        self.wave = wave;
        self.phase = WavePhase::Spawning;
        self.pending = enemies.into();
        self.spawn_timer = 0.0;
    }

    pub(crate) fn count_down(&mut self, seconds: f32) {
        self.spawn_timer -= seconds;
    }

    /// Pops the head of the queue when the timer has run out.
    pub(crate) fn release(&mut self, next_spawn_in: f32) -> Option<EnemySeed> {
        if self.spawn_timer > 0.0 {
            return None;
        }
        let seed = self.pending.pop_front()?;
        self.spawn_timer = next_spawn_in;
        Some(seed)
    }

    pub(crate) fn finish(&mut self) {
        self.phase = WavePhase::Idle;
        self.pending.clear();
    }

    pub(crate) fn snapshot(&self) -> WaveSnapshot {
        WaveSnapshot {
            wave: self.wave,
            phase: self.phase,
            pending: self.pending.len(),
            spawn_timer: self.spawn_timer,
        }
    }
}
