//! Headless demo: run the simulation for a few seconds of scripted play and
//! log what happens. `RUST_LOG=debug` shows per-cast and per-event detail.

use log::info;

use skirmish_game::{
    ArenaMode, GameMode, HeroKind, Level, MatchStatus, PlayerInput, Simulation, SimulationConfig,
    Team,
};

const TICK: f32 = 1.0 / 60.0;
const SECONDS: u32 = 12;

fn main() {
    env_logger::init();

    let mut sim = Simulation::new(
        SimulationConfig::default(),
        Level::test_arena(),
        GameMode::Arena(ArenaMode::new(3)),
    );
    sim.add_hero(1, Team::Red, HeroKind::Vanguard);
    sim.add_hero(2, Team::Blue, HeroKind::Tempest);

    info!("running {} ({} seconds)", sim.level.name, SECONDS);

    for tick in 0..(SECONDS * 60) {
        let seconds = tick as f32 * TICK;
        let inputs = [script_red(seconds), script_blue(seconds)];
        sim.advance(TICK, &inputs);

        if tick % 60 == 0 {
            report(&sim);
        }
        if let MatchStatus::Won(team) = sim.status() {
            info!("{:?} wins", team);
            break;
        }
    }

    report(&sim);
}

/// Red walks toward the middle, jumping occasionally and swinging Q.
fn script_red(seconds: f32) -> PlayerInput {
    let mut input = PlayerInput::default();
    input.right = seconds < 4.0;
    input.jump = (seconds % 2.0) < TICK;
    input.ability1 = seconds > 1.0 && (seconds % 1.6) < TICK;
    input
}

/// Blue hops onto the right ledge, then drops back down.
fn script_blue(seconds: f32) -> PlayerInput {
    let mut input = PlayerInput::default();
    input.left = seconds < 3.0;
    input.jump = seconds > 1.0 && (seconds % 1.5) < TICK;
    input.drop_through = (6.0..6.1).contains(&seconds);
    input
}

fn report(sim: &Simulation) {
    for (hero, hud) in sim.heroes.iter().zip(sim.hud()) {
        info!(
            "t={:>4} {} ({:?}) pos=({:6.2},{:5.2}) hp={:3.0}% ult={:3.0}% k/d={}/{}",
            sim.tick_count(),
            hud.name,
            hud.team,
            hero.position.x,
            hero.position.y,
            hud.health_ratio * 100.0,
            hud.ultimate_ratio * 100.0,
            hud.kills,
            hud.deaths,
        );
    }
    for enemy in sim.level.enemies.iter().filter(|e| e.is_alive()) {
        info!(
            "       walker {} at ({:5.2},{:5.2}) hp={:.0}",
            enemy.id, enemy.position.x, enemy.position.y,
            enemy.health.current(),
        );
    }
}
