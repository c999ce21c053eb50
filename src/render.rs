//! Rendering seam
//!
//! The simulation never draws. A host implements `Renderer` for its canvas and
//! calls `draw_frame` once per frame after the ticks have run.

use glam::Vec2;

use crate::sim::{AttackKind, Color, Rect, Simulation};

/// Minimal fill-rect drawing surface
pub trait Renderer {
    fn clear(&mut self, region: Rect);
    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
}

/// Draw the current state: arena clear, melee overlay while a melee attack
/// winds up, then player, enemies and projectiles
pub fn draw_frame<R: Renderer + ?Sized>(sim: &Simulation, renderer: &mut R) {
    let arena = Vec2::new(sim.tuning.arena.width, sim.tuning.arena.height);
    renderer.clear(Rect::new(Vec2::ZERO, arena));

    let player = &sim.player;
    if player
        .attack
        .pending()
        .is_some_and(|p| p.kind == AttackKind::Melee)
    {
        let aoe = player.combatant.area_of_effect();
        renderer.draw_rect(aoe.pos, aoe.size, Color::LightCoral);
    }

    let body = &player.combatant.body;
    renderer.draw_rect(body.pos, body.size, body.color);

    for enemy in &sim.enemies {
        let body = &enemy.combatant.body;
        renderer.draw_rect(body.pos, body.size, body.color);
    }
    for p in &sim.projectiles {
        renderer.draw_rect(p.body.pos, p.body.size, p.body.color);
    }
}

/// A draw call captured by `RecordingRenderer`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Clear(Rect),
    Rect { pos: Vec2, size: Vec2, color: Color },
}

/// Keeps the last frame's draw calls (headless runs and tests)
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
    pub frames: u64,
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, region: Rect) {
        self.calls.clear();
        self.frames += 1;
        self.calls.push(DrawCall::Clear(region));
    }

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.calls.push(DrawCall::Rect { pos, size, color });
    }
}
