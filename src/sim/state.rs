//! Simulation state
//!
//! `Simulation` owns every entity, the clock, the seeded RNG and the queue of
//! pending attack windups. Nothing outside it holds mutable game state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::attack::{AttackKind, AttackState, PendingAttack};
use super::entity::{Body, Color, Combatant, Role};
use super::schedule::EventQueue;
use super::spawn::{SpawnTimer, spawn_column};
use crate::config::{ConfigError, Tuning};
use crate::input::{InputEvent, Key};

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    EnemySpawned { id: u32, x: f32 },
    AttackStarted { attack: PendingAttack },
    /// Attack requested while another was still winding
    AttackRejected { kind: AttackKind },
    /// `hits` counts enemies damaged by a melee swing (always 0 for ranged)
    AttackResolved { id: u32, kind: AttackKind, hits: u32 },
    ProjectileFired { id: u32, origin: u32 },
    EnemyHit { enemy: u32, damage: u32, remaining: i32 },
    CombatantDied { role: Role, id: u32 },
    /// Enemy left through the top of the arena without being killed
    EnemyEscaped { id: u32 },
    /// Enemy dropped fully below the floor
    EnemyFellOut { id: u32 },
    /// Projectile left the top of the arena without hitting anything
    ProjectileExpired { id: u32 },
}

/// Held direction keys, each worth `speed` pixels per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub up: f32,
    pub down: f32,
    pub left: f32,
    pub right: f32,
}

impl Controls {
    /// Velocity requested by the held keys
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.right - self.left, self.down - self.up)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub combatant: Combatant,
    pub attack: AttackState,
    pub controls: Controls,
}

impl Player {
    /// Entity id reserved for the player
    pub const ID: u32 = 0;

    pub fn new(tuning: &Tuning) -> Self {
        let p = &tuning.player;
        let body = Body::new(p.spawn, p.size, Vec2::ZERO, Color::Black);
        Self {
            combatant: Combatant::new(body, p.hit_points, p.range, Role::Player),
            attack: AttackState::Idle,
            controls: Controls::default(),
        }
    }

    /// Keep the fill color in step with the attack state: red while winding
    pub(crate) fn sync_color(&mut self) {
        self.combatant.body.color = if self.attack.is_idle() {
            Color::Black
        } else {
            Color::Red
        };
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Spawn order
    pub id: u32,
    pub combatant: Combatant,
    /// Marked for compaction at the end of the tick
    pub removed: bool,
}

impl Enemy {
    /// Still a valid collision / damage target
    #[inline]
    pub fn targetable(&self) -> bool {
        !self.removed && !self.combatant.dead
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
    pub damage: u32,
    /// Id of the attack that fired it
    pub origin: u32,
    /// Hit something or left the arena; dropped at the end of the tick
    pub spent: bool,
}

/// Read-only copy of the world for hosts and renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ms: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
}

#[derive(Debug)]
pub struct Simulation {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation clock
    pub now_ms: u64,
    /// Number of ticks run so far
    pub time_ticks: u64,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles in firing order
    pub projectiles: Vec<Projectile>,
    pub spawner: SpawnTimer,
    /// Attack windups keyed by resolve time
    pub(crate) pending: EventQueue<PendingAttack>,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<SimEvent>,
    next_id: u32,
    next_attack_id: u32,
}

impl Simulation {
    /// Validate `tuning` and build a fresh world with the player at its spawn
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        log::info!(
            "New simulation: arena {}x{}, seed {}",
            tuning.arena.width,
            tuning.arena.height,
            seed
        );
        Ok(Self {
            player: Player::new(&tuning),
            spawner: SpawnTimer::new(tuning.enemy.spawn_interval_ms),
            tuning,
            seed,
            now_ms: 0,
            time_ticks: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pending: EventQueue::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: Player::ID + 1,
            next_attack_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Feed the spawn timer and spawn every enemy that came due.
    /// Meant to be called between ticks.
    pub fn advance_spawner(&mut self, dt_ms: u64) -> u32 {
        let due = self.spawner.advance(dt_ms);
        for _ in 0..due {
            self.spawn_enemy();
        }
        due
    }

    /// Spawn one enemy on a random grid column at the top edge
    pub fn spawn_enemy(&mut self) -> u32 {
        let e = &self.tuning.enemy;
        let x = spawn_column(
            &mut self.rng,
            self.tuning.arena.width,
            e.size.x,
            e.grid_cell,
            e.grid_inset,
        );
        self.spawn_enemy_at(Vec2::new(x, 0.0))
    }

    /// Spawn one enemy at an exact position
    pub fn spawn_enemy_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let e = &self.tuning.enemy;
        let body = Body::new(pos, e.size, Vec2::new(0.0, e.speed), Color::Blue);
        self.enemies.push(Enemy {
            id,
            combatant: Combatant::new(body, e.hit_points, e.range, Role::Enemy),
            removed: false,
        });
        log::debug!("Spawned enemy {} at {}", id, pos);
        self.events.push(SimEvent::EnemySpawned { id, x: pos.x });
        id
    }

    /// Request an attack. Returns false (and changes nothing) if one is
    /// already winding.
    pub fn request_attack(&mut self, kind: AttackKind) -> bool {
        let spec = self.tuning.attack(kind);
        let id = self.next_attack_id;
        match self.player.attack.begin(id, kind, spec, self.now_ms) {
            Some(attack) => {
                self.next_attack_id += 1;
                self.player.sync_color();
                self.pending.schedule(attack.resolve_at, attack);
                log::debug!("{:?} attack {} winding until {}", kind, id, attack.resolve_at);
                self.events.push(SimEvent::AttackStarted { attack });
                true
            }
            None => {
                log::debug!("{:?} attack ignored, already winding", kind);
                self.events.push(SimEvent::AttackRejected { kind });
                false
            }
        }
    }

    /// Apply a key event: direction keys set or clear intent, attack keys
    /// request an attack on key-down
    pub fn handle_input(&mut self, event: InputEvent) {
        let (key, held) = match event {
            InputEvent::KeyDown(key) => (key, true),
            InputEvent::KeyUp(key) => (key, false),
        };
        let value = if held { self.tuning.player.speed } else { 0.0 };
        let controls = &mut self.player.controls;
        match key {
            Key::Up => controls.up = value,
            Key::Down => controls.down = value,
            Key::Left => controls.left = value,
            Key::Right => controls.right = value,
            Key::Ranged | Key::Melee if !held => {}
            Key::Ranged => {
                self.request_attack(AttackKind::Ranged);
            }
            Key::Melee => {
                self.request_attack(AttackKind::Melee);
            }
        }
    }

    /// Number of attacks waiting to resolve (0 or 1)
    pub fn pending_attacks(&self) -> usize {
        self.pending.len()
    }

    /// Take every event recorded since the last call
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ms: self.now_ms,
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            projectiles: self.projectiles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        Simulation::new(Tuning::default(), 12345).unwrap()
    }

    #[test]
    fn test_new_places_player_at_spawn() {
        let s = sim();
        assert_eq!(s.player.combatant.body.pos, Vec2::new(263.0, 950.0));
        assert_eq!(s.player.combatant.role, Role::Player);
        assert!(s.player.attack.is_idle());
        assert!(s.enemies.is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let mut t = Tuning::default();
        t.enemy.range = -3.0;
        assert!(Simulation::new(t, 1).is_err());
    }

    #[test]
    fn test_spawned_enemy_defaults() {
        let mut s = sim();
        let id = s.spawn_enemy();
        let x = {
            let e = &s.enemies[0];
            assert_eq!(e.id, id);
            assert_eq!(e.combatant.hp.current, 2);
            assert_eq!(e.combatant.body.vel, Vec2::new(0.0, 1.0));
            assert_eq!(e.combatant.body.pos.y, 0.0);
            assert_eq!(e.combatant.body.color, Color::Blue);
            e.combatant.body.pos.x
        };
        assert_eq!(s.take_events(), vec![SimEvent::EnemySpawned { id, x }]);
    }

    #[test]
    fn test_advance_spawner_appends_in_order() {
        let mut s = sim();
        assert_eq!(s.advance_spawner(3_000), 0);
        assert_eq!(s.advance_spawner(5_000), 2);
        let ids: Vec<u32> = s.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_request_attack_is_exclusive() {
        let mut s = sim();
        assert!(s.request_attack(AttackKind::Ranged));
        let pending = *s.player.attack.pending().unwrap();

        assert!(!s.request_attack(AttackKind::Melee));
        assert_eq!(s.player.attack.pending(), Some(&pending));
        assert_eq!(pending.kind, AttackKind::Ranged);
        assert_eq!(pending.damage, 1);
        assert_eq!(pending.resolve_at, 700);
        assert_eq!(s.pending_attacks(), 1);
        assert_eq!(
            s.take_events().last(),
            Some(&SimEvent::AttackRejected {
                kind: AttackKind::Melee
            })
        );
    }

    #[test]
    fn test_handle_input_sets_and_clears_intent() {
        let mut s = sim();
        s.handle_input(InputEvent::KeyDown(Key::Right));
        s.handle_input(InputEvent::KeyDown(Key::Up));
        assert_eq!(s.player.controls.velocity(), Vec2::new(3.0, -3.0));

        s.handle_input(InputEvent::KeyDown(Key::Left));
        assert_eq!(s.player.controls.velocity().x, 0.0);

        s.handle_input(InputEvent::KeyUp(Key::Right));
        s.handle_input(InputEvent::KeyUp(Key::Up));
        assert_eq!(s.player.controls.velocity(), Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_attack_keys_fire_on_key_down_only() {
        let mut s = sim();
        s.handle_input(InputEvent::KeyUp(Key::Melee));
        assert!(s.player.attack.is_idle());

        s.handle_input(InputEvent::KeyDown(Key::Melee));
        assert_eq!(
            s.player.attack.pending().map(|p| p.kind),
            Some(AttackKind::Melee)
        );
        assert_eq!(s.player.combatant.body.color, Color::Red);
        assert_eq!(s.snapshot().player.combatant.body.color, Color::Red);
    }
}
