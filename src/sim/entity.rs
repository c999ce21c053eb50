//! Bodies and combatants
//!
//! A `Body` is a moving box. A `Combatant` wraps a body with hit points and an
//! attack range; players and enemies are both combatants, told apart by `Role`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Rect, overlaps};
use super::state::SimEvent;

/// Fill colors (display only, never read by gameplay)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
    Blue,
    LightCoral,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::LightCoral => "lightcoral",
        }
    }
}

/// A rectangular body moving at constant velocity per tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Color,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2, color: Color) -> Self {
        Self {
            pos,
            size,
            vel,
            color,
        }
    }

    /// Integrate velocity (once per tick)
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// True once the whole body is at or above the top edge (y = 0)
    #[inline]
    pub fn is_above_top(&self) -> bool {
        self.pos.y + self.size.y <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub max: i32,
    pub current: i32,
}

impl HitPoints {
    pub fn full(max: i32) -> Self {
        Self { max, current: max }
    }
}

/// Which side a combatant fights on; selects its death effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub body: Body,
    pub hp: HitPoints,
    /// Set when hit points first reach zero; never cleared
    pub dead: bool,
    /// Margin added around the body for melee targeting
    pub range: f32,
    pub role: Role,
}

impl Combatant {
    pub fn new(body: Body, hit_points: i32, range: f32, role: Role) -> Self {
        Self {
            body,
            hp: HitPoints::full(hit_points),
            dead: false,
            range,
            role,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    /// The body's box grown by `range` on every side
    pub fn area_of_effect(&self) -> Rect {
        self.body.bounds().grow(self.range)
    }

    pub fn in_range_of(&self, other: &Combatant) -> bool {
        overlaps(&self.area_of_effect(), &other.bounds())
    }

    /// Subtract `amount` from current hit points.
    ///
    /// Returns true only on the hit that kills, so callers run the death
    /// effect exactly once. Further damage keeps lowering `current`.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.hp.current = self.hp.current.saturating_sub(amount);
        log::debug!(
            "{:?} took {} damage ({} / {})",
            self.role,
            amount,
            self.hp.current,
            self.hp.max
        );

        if self.hp.current <= 0 && !self.dead {
            self.dead = true;
            return true;
        }
        false
    }

    /// Death effect
    pub fn die(&self, id: u32) -> SimEvent {
        match self.role {
            Role::Player => log::info!("Player is dead!"),
            Role::Enemy => log::info!("Enemy {} died", id),
        }
        SimEvent::CombatantDied {
            role: self.role,
            id,
        }
    }
}
