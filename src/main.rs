//! Arena Brawl entry point
//!
//! Headless native runner: plays a scripted session against the simulation,
//! logs what happens and prints the final world state as JSON.
//!
//! Usage: `arena-brawl [tuning.json] [seed]`

use arena_brawl::input::{Key, ScriptedInput};
use arena_brawl::render::RecordingRenderer;
use arena_brawl::sim::{SimEvent, Simulation};
use arena_brawl::{GameLoop, Tuning};

/// Length of the scripted session
const SESSION_MS: u64 = 20_000;
/// Simulated display refresh
const REFRESH_MS: u64 = 16;
const DEFAULT_SEED: u64 = 0x5EED;

fn demo_script() -> ScriptedInput {
    let mut input = ScriptedInput::default();
    // Drift left, swing, shoot, come back and repeat
    for round in 0..4u64 {
        let t = round * 5_000;
        input.press(Key::Left, t, 600);
        input.press(Key::Up, t + 200, 1_500);
        input.press(Key::Ranged, t + 1_000, 50);
        input.press(Key::Melee, t + 4_300, 50);
        input.press(Key::Right, t + 2_000, 600);
        input.press(Key::Down, t + 2_500, 1_500);
    }
    input
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::EnemySpawned { id, x } => log::info!("enemy {id} spawned at x={x}"),
        SimEvent::CombatantDied { role, id } => log::info!("{role:?} {id} died"),
        SimEvent::EnemyEscaped { id } => log::info!("enemy {id} escaped"),
        SimEvent::EnemyFellOut { id } => log::info!("enemy {id} fell out of the arena"),
        other => log::debug!("{other:?}"),
    }
}

fn main() {
    env_logger::init();
    log::info!("Arena Brawl (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let sim = match Simulation::new(tuning, seed) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut game = GameLoop::new(sim);
    let mut input = demo_script();
    let mut renderer = RecordingRenderer::default();

    let mut kills = 0u32;
    while game.wall_ms < SESSION_MS {
        game.frame(REFRESH_MS, &mut input, &mut renderer);
        for event in game.events.drain(..) {
            if matches!(event, SimEvent::CombatantDied { .. }) {
                kills += 1;
            }
            log_event(&event);
        }
    }

    log::info!(
        "Session over: {} ticks, {} kills, {} enemies alive, {} draw calls last frame",
        game.sim.time_ticks,
        kills,
        game.sim.enemies.len(),
        renderer.calls.len()
    );

    match serde_json::to_string_pretty(&game.sim.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}
