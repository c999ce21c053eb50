//! Gameplay tuning
//!
//! Every balance number lives here. Loaded from JSON (missing fields fall back
//! to the defaults in `consts`) and validated before a simulation is built.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::AttackSpec;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub spawn: Vec2,
    pub size: Vec2,
    /// Pixels per tick contributed by each held direction key
    pub speed: f32,
    pub hit_points: i32,
    pub range: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn: PLAYER_SPAWN,
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            hit_points: PLAYER_HIT_POINTS,
            range: COMBATANT_RANGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub size: Vec2,
    /// Downward pixels per tick
    pub speed: f32,
    pub hit_points: i32,
    pub range: f32,
    pub spawn_interval_ms: u32,
    /// Spawn columns are `grid_cell` apart, offset by `grid_inset`
    pub grid_cell: f32,
    pub grid_inset: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: ENEMY_SIZE,
            speed: ENEMY_SPEED,
            hit_points: ENEMY_HIT_POINTS,
            range: COMBATANT_RANGE,
            spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            grid_cell: SPAWN_GRID_CELL,
            grid_inset: SPAWN_GRID_INSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub size: Vec2,
    /// Upward pixels per tick
    pub speed: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            size: PROJECTILE_SIZE,
            speed: PROJECTILE_SPEED,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub ranged: AttackSpec,
    pub melee: AttackSpec,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena: ArenaTuning::default(),
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            projectile: ProjectileTuning::default(),
            ranged: AttackSpec {
                damage: RANGED_DAMAGE,
                delay_ms: RANGED_DELAY_MS,
            },
            melee: AttackSpec {
                damage: MELEE_DAMAGE,
                delay_ms: MELEE_DELAY_MS,
            },
        }
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, format!("must be a finite value >= 0, got {value}")));
    }
    Ok(())
}

fn check_size(field: &'static str, size: Vec2) -> Result<(), ConfigError> {
    if !size.is_finite() || size.x < 0.0 || size.y < 0.0 {
        return Err(invalid(field, format!("components must be >= 0, got {size}")));
    }
    Ok(())
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = Vec2::new(self.arena.width, self.arena.height);
        if !arena.is_finite() || arena.x <= 0.0 || arena.y <= 0.0 {
            return Err(invalid("arena", "width and height must be > 0"));
        }

        let p = &self.player;
        check_size("player.size", p.size)?;
        check_non_negative("player.speed", p.speed)?;
        check_non_negative("player.range", p.range)?;
        if p.hit_points <= 0 {
            return Err(invalid("player.hit_points", "must be > 0"));
        }
        if p.size.x > arena.x || p.size.y > arena.y {
            return Err(invalid("player.size", "player does not fit in the arena"));
        }
        if !p.spawn.is_finite()
            || p.spawn.x < 0.0
            || p.spawn.y < 0.0
            || p.spawn.x + p.size.x > arena.x
            || p.spawn.y + p.size.y > arena.y
        {
            return Err(invalid("player.spawn", format!("{} is outside the arena", p.spawn)));
        }

        let e = &self.enemy;
        check_size("enemy.size", e.size)?;
        check_non_negative("enemy.speed", e.speed)?;
        check_non_negative("enemy.range", e.range)?;
        check_non_negative("enemy.grid_inset", e.grid_inset)?;
        if e.hit_points <= 0 {
            return Err(invalid("enemy.hit_points", "must be > 0"));
        }
        if e.size.x > arena.x {
            return Err(invalid("enemy.size", "enemy is wider than the arena"));
        }
        if e.spawn_interval_ms == 0 {
            return Err(invalid("enemy.spawn_interval_ms", "must be > 0"));
        }
        if !e.grid_cell.is_finite() || e.grid_cell <= 0.0 {
            return Err(invalid("enemy.grid_cell", "must be > 0"));
        }
        // The first spawn column must already fit inside the arena
        if e.grid_inset + e.size.x > arena.x {
            return Err(invalid(
                "enemy.grid_inset",
                format!(
                    "inset {} plus enemy width {} exceeds arena width {}",
                    e.grid_inset, e.size.x, arena.x
                ),
            ));
        }

        check_size("projectile.size", self.projectile.size)?;
        check_non_negative("projectile.speed", self.projectile.speed)?;

        if self.ranged.damage == 0 {
            return Err(invalid("ranged.damage", "must be > 0"));
        }
        if self.melee.damage == 0 {
            return Err(invalid("melee.damage", "must be > 0"));
        }

        Ok(())
    }

    /// Attack parameters for `kind`
    pub fn attack(&self, kind: crate::sim::AttackKind) -> AttackSpec {
        match kind {
            crate::sim::AttackKind::Ranged => self.ranged,
            crate::sim::AttackKind::Melee => self.melee,
        }
    }
}
