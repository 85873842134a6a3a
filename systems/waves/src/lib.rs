#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave director that composes waves and throttles enemy releases.
//!
//! Composition is deterministic: every wave starts from a block of normal
//! enemies and then splices each special group into evenly spaced slots,
//! fast runners first, then jets, then tanks. Slot `k` of a group of `n`
//! lands at `floor((k + 1) / (n + 1) * len)`, where `len` is the length of
//! the list at the moment of insertion.

use std::time::Duration;

use lane_defence_core::{Command, EnemyKind, EnemySeed, WavePhase, WavePlan, WaveSnapshot, WaveTuning};

/// Pure system that plans waves and emits spawn commands for the active one.
#[derive(Clone, Debug)]
pub struct WaveDirector {
    tuning: WaveTuning,
    spawn_interval: Duration,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new(WaveTuning::default())
    }
}

impl WaveDirector {
    /// Creates a new wave director using the supplied tuning.
    #[must_use]
    pub fn new(tuning: WaveTuning) -> Self {
        let spawn_interval =
            Duration::try_from_secs_f32(tuning.spawn_interval).unwrap_or(Duration::ZERO);
        Self {
            tuning,
            spawn_interval,
        }
    }

    /// Tuning the director was built with.
    #[must_use]
    pub fn tuning(&self) -> &WaveTuning {
        &self.tuning
    }

    /// Gold granted for clearing the provided wave.
    #[must_use]
    pub fn clear_bonus(&self, wave: u32) -> u32 {
        self.tuning
            .clear_bonus_base
            .saturating_add(self.tuning.clear_bonus_per_wave.saturating_mul(wave))
    }

    /// Builds the ordered enemy list for the provided wave number.
    #[must_use]
    pub fn compose(&self, wave: u32) -> WavePlan {
        let tuning = &self.tuning;
        let hp_multiplier = 1.0 + wave as f32 * tuning.hp_step;
        let speed_multiplier = 1.0 + wave as f32 * tuning.speed_step;
        let count = tuning
            .base_count
            .saturating_add(tuning.count_growth.saturating_mul(wave.saturating_sub(1)));

        let seed = |kind: EnemyKind, boost: f32| EnemySeed {
            kind,
            hp_multiplier,
            speed_multiplier: speed_multiplier * boost,
        };

        let mut enemies = vec![seed(EnemyKind::Normal, 1.0); count as usize];

        if wave >= tuning.fast_from_wave {
            let fast = share_of(count, tuning.fast_share);
            insert_evenly(
                &mut enemies,
                fast,
                seed(EnemyKind::Fast, tuning.fast_speed_boost),
            );
        }

        if wave >= tuning.jet_from_wave {
            let jets = share_of(count, tuning.jet_share);
            insert_evenly(
                &mut enemies,
                jets,
                seed(EnemyKind::Jet, tuning.jet_speed_boost),
            );
        }

        if wave >= tuning.tank_from_wave {
            let tanks = match tuning.tank_every {
                0 => 1,
                every => 1 + (wave - tuning.tank_from_wave) / every,
            };
            insert_evenly(&mut enemies, tanks, seed(EnemyKind::Tank, 1.0));
        }

        WavePlan { wave, enemies }
    }

    /// Emits spawn timer, release and clear commands for the active wave.
    ///
    /// `live_enemies` is the number of enemies currently on the path.
    pub fn handle(
        &self,
        dt: Duration,
        wave: &WaveSnapshot,
        live_enemies: usize,
        out: &mut Vec<Command>,
    ) {
        if wave.phase != WavePhase::Spawning {
            return;
        }

        out.push(Command::AdvanceSpawnTimer { dt });
        let timer = wave.spawn_timer - dt.as_secs_f32();

        let mut pending = wave.pending;
        let mut live = live_enemies;
        if timer <= 0.0 && pending > 0 {
            out.push(Command::SpawnNextEnemy {
                next_spawn_in: self.spawn_interval,
            });
            pending -= 1;
            live += 1;
        }

        if pending == 0 && live == 0 {
            out.push(Command::ClearWave {
                bonus: self.clear_bonus(wave.wave),
            });
        }
    }
}

/// At least one unit, otherwise the floored share of `count`.
fn share_of(count: u32, share: f32) -> u32 {
    ((f64::from(count) * f64::from(share)).floor() as u32).max(1)
}

fn insert_evenly(enemies: &mut Vec<EnemySeed>, group: u32, seed: EnemySeed) {
    let slots = f64::from(group) + 1.0;
    for k in 0..group {
        let fraction = (f64::from(k) + 1.0) / slots;
        let index = (fraction * enemies.len() as f64).floor() as usize;
        enemies.insert(index.min(enemies.len()), seed);
    }
}
