//! Enemy spawn timer
//!
//! Runs on elapsed wall time rather than ticks, so the spawn rate does not
//! depend on the frame rate.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval_ms: u32,
    /// Time accumulated since the last spawn
    elapsed_ms: u64,
}

impl SpawnTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0,
        }
    }

    /// Feed elapsed time; returns how many spawns came due
    pub fn advance(&mut self, dt_ms: u64) -> u32 {
        let interval = u64::from(self.interval_ms.max(1));
        self.elapsed_ms += dt_ms;
        let due = self.elapsed_ms / interval;
        self.elapsed_ms %= interval;
        due as u32
    }

    /// Time left until the next spawn
    pub fn remaining_ms(&self) -> u64 {
        u64::from(self.interval_ms).saturating_sub(self.elapsed_ms)
    }
}

/// Pick a spawn column: a random multiple of `cell` inside
/// `[0, arena_width - enemy_width)`, shifted right by `inset`.
pub fn spawn_column<R: Rng>(
    rng: &mut R,
    arena_width: f32,
    enemy_width: f32,
    cell: f32,
    inset: f32,
) -> f32 {
    let span = (arena_width - enemy_width).max(0.0);
    let r: f32 = rng.random();
    (r * span / cell).floor() * cell + inset
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_fires_every_interval() {
        let mut timer = SpawnTimer::new(4000);
        assert_eq!(timer.advance(3999), 0);
        assert_eq!(timer.advance(1), 1);
        assert_eq!(timer.remaining_ms(), 4000);
    }

    #[test]
    fn test_rate_independent_of_frame_size() {
        let mut fast = SpawnTimer::new(4000);
        let mut slow = SpawnTimer::new(4000);

        let fast_total: u32 = (0..1000).map(|_| fast.advance(16)).sum();
        let slow_total: u32 = (0..16).map(|_| slow.advance(1000)).sum();
        assert_eq!(fast_total, 4);
        assert_eq!(slow_total, 4);
    }

    #[test]
    fn test_long_gap_catches_up() {
        let mut timer = SpawnTimer::new(4000);
        assert_eq!(timer.advance(12_500), 3);
        assert_eq!(timer.remaining_ms(), 3500);
    }

    #[test]
    fn test_columns_on_grid_inside_arena() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let x = spawn_column(&mut rng, 576.0, 50.0, 50.0, 12.0);
            assert!(x >= 12.0);
            assert!(x + 50.0 <= 576.0);
            assert_eq!((x - 12.0) % 50.0, 0.0);
        }
    }

    #[test]
    fn test_columns_deterministic_per_seed() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                spawn_column(&mut a, 576.0, 50.0, 50.0, 12.0),
                spawn_column(&mut b, 576.0, 50.0, 50.0, 12.0)
            );
        }
    }
}
