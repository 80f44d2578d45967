//! The deterministic simulation loop.
//!
//! All mutable game state lives here and is touched only inside `advance`,
//! on one thread. Every tick follows the same fixed order, so two
//! simulations fed the same inputs produce the same states bit for bit.

use glam::Vec2;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use skirmish_physics::BodyEvent;

use crate::camera::{CameraConfig, FollowCamera};
use crate::combat::area_damage;
use crate::enemy::EnemyConfig;
use crate::hero::{AbilityContext, Hero, HeroConfig, HeroKind, Team, UltimateConfig};
use crate::input::{InputTracker, PlayerInput};
use crate::level::Level;
use crate::modes::{GameMode, MatchStatus};

/// How simulated time advances relative to wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timestep {
    /// One step per frame, using the frame's (clamped) delta directly.
    Variable,
    /// Accumulate real time and drain fixed-size sub-steps, at most
    /// `max_substeps` per frame. Excess time is dropped, not banked.
    Fixed { max_substeps: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Sub-step rate for fixed timestep mode (steps per second).
    pub tick_rate: f32,

    /// Frame deltas above this are clamped before stepping, so a debugger
    /// pause or hitch cannot launch entities through geometry.
    pub max_delta_time: f32,

    pub timestep: Timestep,

    pub hero: HeroConfig,
    pub ultimate: UltimateConfig,
    pub enemy: EnemyConfig,
    pub camera: CameraConfig,

    /// Damage an enemy deals to a hero it touches.
    pub contact_damage: f32,

    /// Invulnerability window granted after contact damage, so a hero
    /// standing in an enemy takes discrete hits rather than a drain.
    pub contact_invulnerability: f32,

    /// Horizontal knockback speed applied with contact damage.
    pub contact_knockback: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_delta_time: 0.1,
            timestep: Timestep::Fixed { max_substeps: 5 },
            hero: HeroConfig::default(),
            ultimate: UltimateConfig::default(),
            enemy: EnemyConfig::default(),
            camera: CameraConfig::default(),
            contact_damage: 10.0,
            contact_invulnerability: 0.8,
            contact_knockback: 5.0,
        }
    }
}

/// Read-only per-hero snapshot for the HUD.
#[derive(Debug, Clone, Serialize)]
pub struct HeroHud {
    pub id: u32,
    pub name: &'static str,
    pub team: Team,
    pub alive: bool,
    pub health_ratio: f32,
    /// Remaining cooldown fraction per slot, Q/W/E/R order.
    pub cooldowns: [f32; 4],
    pub ultimate_ratio: f32,
    pub kills: u32,
    pub deaths: u32,
}

pub struct Simulation {
    pub config: SimulationConfig,
    pub level: Level,
    pub heroes: Vec<Hero>,
    pub camera: FollowCamera,
    pub mode: GameMode,

    trackers: Vec<InputTracker>,
    accumulator: f32,
    tick_count: u64,
    status: MatchStatus,
}

impl Simulation {
    pub fn new(config: SimulationConfig, level: Level, mode: GameMode) -> Self {
        let camera = FollowCamera::new(config.camera);
        Self {
            config,
            level,
            heroes: Vec::new(),
            camera,
            mode,
            trackers: Vec::new(),
            accumulator: 0.0,
            tick_count: 0,
            status: MatchStatus::InProgress,
        }
    }

    /// Add a hero at a claimed spawn point for its team.
    pub fn add_hero(&mut self, id: u32, team: Team, kind: HeroKind) {
        let spawn = self
            .level
            .claim_spawn(team)
            .unwrap_or(Vec2::new(0.0, self.config.hero.half.y));
        self.heroes
            .push(Hero::new(id, team, kind, spawn, &self.config.hero));
        self.trackers.push(InputTracker::new());
        info!("hero {} ({:?}, {:?}) spawned at {}", id, kind, team, spawn);
    }

    #[inline]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Advance by one frame of real time. `inputs` is indexed like `heroes`;
    /// missing entries read as neutral input.
    pub fn advance(&mut self, dt: f32, inputs: &[PlayerInput]) {
        let dt = dt.clamp(0.0, self.config.max_delta_time);

        match self.config.timestep {
            Timestep::Variable => self.step(dt, inputs),
            Timestep::Fixed { max_substeps } => {
                let step_dt = 1.0 / self.config.tick_rate;
                self.accumulator += dt;

                let mut substeps = 0;
                while self.accumulator >= step_dt && substeps < max_substeps {
                    self.step(step_dt, inputs);
                    self.accumulator -= step_dt;
                    substeps += 1;
                }
                // Drop time we couldn't drain; banking it would cause a
                // spiral after a long hitch.
                if self.accumulator >= step_dt {
                    self.accumulator = self.accumulator.min(step_dt);
                }
            }
        }
    }

    /// One simulation step. The phase order is fixed and load-bearing:
    /// timers, then input and movement, then collision, then interactions,
    /// then bodies and enemies, then scoring and camera.
    fn step(&mut self, dt: f32, inputs: &[PlayerInput]) {
        self.tick_count += 1;
        let deaths_before: Vec<u32> = self.heroes.iter().map(|h| h.deaths).collect();

        // Phase 1: cooldowns, status timers, passive charge, respawns.
        for hero in &mut self.heroes {
            hero.abilities.update_all(dt);
            hero.tick_status(&self.config.ultimate, dt);
        }

        // Phase 2: input edges, ability casts, movement integration.
        let neutral = PlayerInput::default();
        for i in 0..self.heroes.len() {
            let input = inputs.get(i).unwrap_or(&neutral);
            let edges = self.trackers[i].edges(input);

            let hero = &mut self.heroes[i];
            let slots = [
                (edges.ability1, crate::ability::Slot::Q),
                (edges.ability2, crate::ability::Slot::W),
                (edges.ability3, crate::ability::Slot::E),
                (edges.ultimate, crate::ability::Slot::R),
            ];
            for (pressed, slot) in slots {
                if !pressed {
                    continue;
                }
                let mut ctx = AbilityContext {
                    enemies: &mut self.level.enemies,
                    bodies: &mut self.level.bodies,
                    ultimate: &self.config.ultimate,
                };
                match hero.try_cast(slot, &mut ctx) {
                    Ok(outcome) => debug!("hero {} cast {:?}: {:?}", hero.id, slot, outcome),
                    Err(err) => debug!("hero {} cast {:?} refused: {}", hero.id, slot, err),
                }
            }

            hero.integrate(input, &edges, &self.config.hero, dt);
        }

        // Phase 3: platforms move, then every hero is swept against them.
        self.level.update(dt);
        for hero in &mut self.heroes {
            self.level.sweep_hero(hero);
        }

        // Phase 4: enemy contact damage with knockback.
        for hero in &mut self.heroes {
            if !hero.is_alive() || hero.is_invulnerable() {
                continue;
            }
            let bounds = hero.bounds();
            for enemy in self.level.enemies.iter().filter(|e| e.is_alive()) {
                if bounds.overlaps(&enemy.bounds()) {
                    hero.take_damage(self.config.contact_damage);
                    let away = (hero.position.x - enemy.position.x).signum();
                    hero.push(away * self.config.contact_knockback);
                    hero.set_invulnerable(self.config.contact_invulnerability);
                    break;
                }
            }
        }

        // Phase 5: destructible bodies tick; detonations blast everything
        // in their region this same step.
        let mut events: Vec<BodyEvent> = Vec::new();
        for body in &mut self.level.bodies {
            events.extend(body.update(dt, &self.level.platforms));
        }
        for event in events {
            match event {
                BodyEvent::Detonated { id, region, damage } => {
                    info!("body {} detonated for {} damage", id, damage);
                    let report = area_damage(&region, damage, 1.0, &mut self.level.enemies);
                    debug!("blast hit {} enemies ({} kills)", report.hits, report.kills);
                    for hero in &mut self.heroes {
                        if region.overlaps(&hero.bounds()) {
                            hero.take_damage(damage);
                        }
                    }
                    crate::combat::damage_bodies(&region, damage, &mut self.level.bodies);
                }
                BodyEvent::Destroyed(id) => debug!("body {} destroyed", id),
                BodyEvent::Respawned(id) => debug!("body {} respawned", id),
            }
        }

        // Phase 6: enemies patrol.
        for enemy in &mut self.level.enemies {
            enemy.update(dt, &self.level.platforms, &self.config.enemy);
        }

        // Phase 7: death hooks and spawn reassignment for heroes that died
        // this step, then scoring.
        for i in 0..self.heroes.len() {
            if self.heroes[i].deaths > deaths_before[i] {
                let (id, team, position) = {
                    let h = &self.heroes[i];
                    (h.id, h.team, h.position)
                };
                info!("hero {} died at {}", id, position);
                self.mode.on_hero_death(id, position);
                if let Some(spawn) = self.level.claim_spawn(team) {
                    self.heroes[i].spawn_point = spawn;
                }
            }
        }

        if self.status == MatchStatus::InProgress {
            self.status = self.mode.update(&self.heroes, dt);
            if let MatchStatus::Won(team) = self.status {
                info!("match won by {:?}", team);
            }
        }

        // Phase 8: camera follows the living.
        let targets: Vec<Vec2> = self
            .heroes
            .iter()
            .filter(|h| h.is_alive())
            .map(|h| h.position)
            .collect();
        self.camera.update(&targets);
    }

    /// HUD snapshot. Read-only; there is no mutation path back into the
    /// simulation from here.
    pub fn hud(&self) -> Vec<HeroHud> {
        self.heroes
            .iter()
            .map(|hero| HeroHud {
                id: hero.id,
                name: hero.kind.name(),
                team: hero.team,
                alive: hero.is_alive(),
                health_ratio: hero.health.ratio(),
                cooldowns: [
                    hero.abilities.q.cooldown_ratio(),
                    hero.abilities.w.cooldown_ratio(),
                    hero.abilities.e.cooldown_ratio(),
                    hero.abilities.r.cooldown_ratio(),
                ],
                ultimate_ratio: hero.ultimate_ratio(&self.config.ultimate),
                kills: hero.kills,
                deaths: hero.deaths,
            })
            .collect()
    }
}
