//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod attack;
pub mod entity;
pub mod geom;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use attack::{AttackKind, AttackSpec, AttackState, PendingAttack};
pub use entity::{Body, Color, Combatant, HitPoints, Role};
pub use geom::{Rect, overlaps};
pub use schedule::EventQueue;
pub use spawn::SpawnTimer;
pub use state::{Controls, Enemy, Player, Projectile, SimEvent, Simulation, Snapshot};
pub use tick::tick;
