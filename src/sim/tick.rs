//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame. Order within a tick:
//! player movement, due attack windups, enemies, projectiles, compaction.
//! Entities are only marked during the passes and dropped at the end.

use glam::Vec2;

use super::attack::{AttackKind, PendingAttack};
use super::entity::{Body, Color};
use super::geom::overlaps;
use super::state::{Projectile, SimEvent, Simulation};

/// Advance the simulation by one tick of `dt_ms` milliseconds
pub fn tick(sim: &mut Simulation, dt_ms: u32) {
    sim.time_ticks += 1;

    move_player(sim);

    // Windups resolve here and only here, before the collision passes
    sim.now_ms += u64::from(dt_ms);
    for attack in sim.pending.drain_due(sim.now_ms) {
        resolve_attack(sim, attack);
    }

    advance_enemies(sim);
    advance_projectiles(sim);

    sim.enemies.retain(|e| !e.removed);
    sim.projectiles.retain(|p| !p.spent);
}

/// Set velocity from held keys, cancel any axis that would leave the arena,
/// then move
fn move_player(sim: &mut Simulation) {
    let arena = Vec2::new(sim.tuning.arena.width, sim.tuning.arena.height);
    let mut vel = sim.player.controls.velocity();
    let body = &mut sim.player.combatant.body;

    let next = body.pos + vel;
    if next.x < 0.0 || next.x + body.size.x > arena.x {
        vel.x = 0.0;
    }
    if next.y < 0.0 || next.y + body.size.y > arena.y {
        vel.y = 0.0;
    }

    body.vel = vel;
    body.advance();
}

fn resolve_attack(sim: &mut Simulation, attack: PendingAttack) {
    if !sim.player.attack.finish(&attack) {
        log::warn!("Dropping stale attack {}", attack.id);
        return;
    }
    sim.player.sync_color();

    let hits = match attack.kind {
        AttackKind::Ranged => {
            fire_projectile(sim, &attack);
            0
        }
        AttackKind::Melee => melee_sweep(sim, attack.damage),
    };

    log::debug!("{:?} attack {} resolved, {} hit(s)", attack.kind, attack.id, hits);
    sim.events.push(SimEvent::AttackResolved {
        id: attack.id,
        kind: attack.kind,
        hits,
    });
}

/// Spawn a projectile centred on the player's top edge
fn fire_projectile(sim: &mut Simulation, attack: &PendingAttack) {
    let id = sim.next_entity_id();
    let size = sim.tuning.projectile.size;
    let player = sim.player.combatant.bounds();
    let pos = Vec2::new(player.center_x() - size.x / 2.0, player.pos.y);
    let vel = Vec2::new(0.0, -sim.tuning.projectile.speed);

    sim.projectiles.push(Projectile {
        id,
        body: Body::new(pos, size, vel, Color::Black),
        damage: attack.damage,
        origin: attack.id,
        spent: false,
    });
    sim.events.push(SimEvent::ProjectileFired {
        id,
        origin: attack.id,
    });
}

/// Damage every targetable enemy inside the player's current area of effect
fn melee_sweep(sim: &mut Simulation, damage: u32) -> u32 {
    let player = &sim.player.combatant;
    let mut hits = 0;

    for enemy in sim.enemies.iter_mut().filter(|e| e.targetable()) {
        if !player.in_range_of(&enemy.combatant) {
            continue;
        }
        hits += 1;
        let died = enemy.combatant.apply_damage(damage);
        sim.events.push(SimEvent::EnemyHit {
            enemy: enemy.id,
            damage,
            remaining: enemy.combatant.hp.current,
        });
        if died {
            sim.events.push(enemy.combatant.die(enemy.id));
            enemy.removed = true;
        }
    }
    hits
}

fn advance_enemies(sim: &mut Simulation) {
    let floor = sim.tuning.arena.height;

    for enemy in sim.enemies.iter_mut().filter(|e| e.targetable()) {
        let body = &mut enemy.combatant.body;
        body.advance();
        if body.is_above_top() {
            enemy.removed = true;
            log::debug!("Enemy {} escaped through the top", enemy.id);
            sim.events.push(SimEvent::EnemyEscaped { id: enemy.id });
        } else if body.pos.y >= floor {
            enemy.removed = true;
            log::debug!("Enemy {} fell below the floor", enemy.id);
            sim.events.push(SimEvent::EnemyFellOut { id: enemy.id });
        }
    }
}

fn advance_projectiles(sim: &mut Simulation) {
    for p in sim.projectiles.iter_mut().filter(|p| !p.spent) {
        p.body.advance();
        let bounds = p.body.bounds();

        // First live enemy in spawn order takes the hit; no piercing
        let target = sim
            .enemies
            .iter_mut()
            .find(|e| e.targetable() && overlaps(&bounds, &e.combatant.bounds()));

        if let Some(enemy) = target {
            p.spent = true;
            let died = enemy.combatant.apply_damage(p.damage);
            sim.events.push(SimEvent::EnemyHit {
                enemy: enemy.id,
                damage: p.damage,
                remaining: enemy.combatant.hp.current,
            });
            if died {
                sim.events.push(enemy.combatant.die(enemy.id));
                enemy.removed = true;
            }
        } else if p.body.is_above_top() {
            p.spent = true;
            sim.events.push(SimEvent::ProjectileExpired { id: p.id });
        }
    }
}
