//! Player attack state machine
//!
//! Idle -> Winding on request, Winding -> Idle when the windup resolves.
//! While winding every new request is refused.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackKind {
    /// Fires a projectile straight up
    Ranged,
    /// Damages every enemy inside the player's area of effect
    Melee,
}

/// Damage and windup of one attack kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackSpec {
    pub damage: u32,
    pub delay_ms: u32,
}

/// An accepted attack waiting for its windup to elapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAttack {
    pub id: u32,
    pub kind: AttackKind,
    pub damage: u32,
    pub resolve_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackState {
    #[default]
    Idle,
    Winding(PendingAttack),
}

impl AttackState {
    pub fn is_idle(&self) -> bool {
        matches!(self, AttackState::Idle)
    }

    pub fn pending(&self) -> Option<&PendingAttack> {
        match self {
            AttackState::Idle => None,
            AttackState::Winding(p) => Some(p),
        }
    }

    /// Start winding up. Returns the captured attack, or None if one is
    /// already in flight (the pending attack is left untouched).
    pub fn begin(
        &mut self,
        id: u32,
        kind: AttackKind,
        spec: AttackSpec,
        now_ms: u64,
    ) -> Option<PendingAttack> {
        if !self.is_idle() {
            return None;
        }
        let pending = PendingAttack {
            id,
            kind,
            damage: spec.damage,
            resolve_at: now_ms + u64::from(spec.delay_ms),
        };
        *self = AttackState::Winding(pending);
        Some(pending)
    }

    /// Return to Idle if `attack` is the one winding. Returns false for a
    /// stale or unknown attack.
    pub fn finish(&mut self, attack: &PendingAttack) -> bool {
        match self {
            AttackState::Winding(p) if p.id == attack.id => {
                *self = AttackState::Idle;
                true
            }
            _ => false,
        }
    }
}
