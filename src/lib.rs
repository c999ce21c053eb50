//! Arena Brawl - a top-down arena brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, attacks, spawning)
//! - `config`: Data-driven game balance
//! - `input`: Key events and input sources
//! - `render`: Renderer trait the host implements
//! - `runner`: Fixed-timestep host loop

pub mod config;
pub mod input;
pub mod render;
pub mod runner;
pub mod sim;

pub use config::{ConfigError, Tuning};
pub use runner::GameLoop;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const FRAME_MS: u32 = 16;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-time gap a single frame will account for
    pub const MAX_FRAME_MS: u64 = 250;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 576.0;
    pub const ARENA_HEIGHT: f32 = 1024.0;

    /// Player defaults
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(263.0, 950.0);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_HIT_POINTS: i32 = 1;

    /// Melee margin around any combatant
    pub const COMBATANT_RANGE: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: Vec2 = Vec2::new(50.0, 50.0);
    pub const ENEMY_SPEED: f32 = 1.0;
    pub const ENEMY_HIT_POINTS: i32 = 2;
    pub const ENEMY_SPAWN_INTERVAL_MS: u32 = 4000;
    pub const SPAWN_GRID_CELL: f32 = 50.0;
    pub const SPAWN_GRID_INSET: f32 = 12.0;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: Vec2 = Vec2::new(4.0, 8.0);
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Attacks
    pub const RANGED_DAMAGE: u32 = 1;
    pub const RANGED_DELAY_MS: u32 = 700;
    pub const MELEE_DAMAGE: u32 = 5;
    pub const MELEE_DELAY_MS: u32 = 100;
}
