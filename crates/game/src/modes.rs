//! Game-mode controllers.
//!
//! A mode is a thin layer over the simulation: it reads hero state every
//! tick and maintains its own scoring state. Modes never mutate heroes
//! except through explicit hooks (flag drop on death is driven by the
//! simulation reporting deaths, not by the mode reaching into combat).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use skirmish_physics::Aabb;

use crate::hero::{Hero, Team};

/// Whether the match has been decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress,
    Won(Team),
}

/// Per-team score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub red: u32,
    pub blue: u32,
}

impl Scoreboard {
    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::Red => self.red,
            Team::Blue => self.blue,
        }
    }

    pub fn add(&mut self, team: Team, points: u32) {
        match team {
            Team::Red => self.red += points,
            Team::Blue => self.blue += points,
        }
    }
}

// ============================================================================
// Arena: team elimination
// ============================================================================

/// Round-based elimination: a team with no living heroes loses the round,
/// first to `rounds_to_win` takes the match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaMode {
    pub rounds_to_win: u32,
    pub score: Scoreboard,

    /// False between a wipe and the next time both teams field someone,
    /// so one wipe scores exactly one round.
    round_live: bool,
}

impl ArenaMode {
    pub fn new(rounds_to_win: u32) -> Self {
        Self {
            rounds_to_win: rounds_to_win.max(1),
            score: Scoreboard::default(),
            round_live: true,
        }
    }

    pub fn update(&mut self, heroes: &[Hero]) -> MatchStatus {
        let red_alive = heroes.iter().any(|h| h.team == Team::Red && h.is_alive());
        let blue_alive = heroes.iter().any(|h| h.team == Team::Blue && h.is_alive());

        if self.round_live {
            // Simultaneous wipes score nobody.
            if red_alive && !blue_alive {
                self.score.add(Team::Red, 1);
                self.round_live = false;
            } else if blue_alive && !red_alive {
                self.score.add(Team::Blue, 1);
                self.round_live = false;
            }
        } else if red_alive && blue_alive {
            // Respawns brought both teams back; the next round is on.
            self.round_live = true;
        }

        self.status()
    }

    pub fn status(&self) -> MatchStatus {
        if self.score.red >= self.rounds_to_win {
            MatchStatus::Won(Team::Red)
        } else if self.score.blue >= self.rounds_to_win {
            MatchStatus::Won(Team::Blue)
        } else {
            MatchStatus::InProgress
        }
    }
}

// ============================================================================
// King of the hill
// ============================================================================

/// One capture zone. A team alone in the zone accrues capture progress;
/// both teams present freezes it. Full capture converts progress into score
/// ticks over time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KothMode {
    pub zone: Aabb,
    pub capture_time: f32,
    pub score_to_win: u32,
    pub score: Scoreboard,

    /// Who currently owns the hill, if anyone.
    pub owner: Option<Team>,

    /// Seconds per score point while owned.
    pub score_interval: f32,

    progress: f32,
    progress_team: Option<Team>,
    score_clock: f32,
}

impl KothMode {
    pub fn new(zone: Aabb, capture_time: f32, score_to_win: u32) -> Self {
        Self {
            zone,
            capture_time: capture_time.max(0.01),
            score_to_win,
            score: Scoreboard::default(),
            owner: None,
            score_interval: 1.0,
            progress: 0.0,
            progress_team: None,
            score_clock: 0.0,
        }
    }

    pub fn capture_ratio(&self) -> f32 {
        self.progress / self.capture_time
    }

    pub fn update(&mut self, heroes: &[Hero], dt: f32) -> MatchStatus {
        let red_in = Self::team_in_zone(heroes, Team::Red, &self.zone);
        let blue_in = Self::team_in_zone(heroes, Team::Blue, &self.zone);

        match (red_in, blue_in) {
            // Contested: progress freezes.
            (true, true) => {}
            (true, false) => self.advance(Team::Red, dt),
            (false, true) => self.advance(Team::Blue, dt),
            (false, false) => {}
        }

        if let Some(owner) = self.owner {
            self.score_clock += dt;
            while self.score_clock >= self.score_interval {
                self.score_clock -= self.score_interval;
                self.score.add(owner, 1);
            }
        }

        self.status()
    }

    fn advance(&mut self, team: Team, dt: f32) {
        if self.owner == Some(team) {
            return;
        }
        // Switching contender restarts the capture.
        if self.progress_team != Some(team) {
            self.progress_team = Some(team);
            self.progress = 0.0;
        }
        self.progress += dt;
        if self.progress >= self.capture_time {
            self.owner = Some(team);
            self.progress = 0.0;
            self.progress_team = None;
            self.score_clock = 0.0;
        }
    }

    pub fn status(&self) -> MatchStatus {
        if self.score.red >= self.score_to_win {
            MatchStatus::Won(Team::Red)
        } else if self.score.blue >= self.score_to_win {
            MatchStatus::Won(Team::Blue)
        } else {
            MatchStatus::InProgress
        }
    }

    fn team_in_zone(heroes: &[Hero], team: Team, zone: &Aabb) -> bool {
        heroes
            .iter()
            .any(|h| h.team == team && h.is_alive() && zone.overlaps(&h.bounds()))
    }
}

// ============================================================================
// Capture the flag
// ============================================================================

/// Where a team's flag currently is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlagState {
    /// On its home stand.
    Home,
    /// Carried by the hero with this id.
    Carried(u32),
    /// Dropped in the field at this position.
    Dropped(Vec2),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub team: Team,
    pub home: Vec2,
    pub state: FlagState,
}

impl Flag {
    fn new(team: Team, home: Vec2) -> Self {
        Self {
            team,
            home,
            state: FlagState::Home,
        }
    }

    /// The flag's pickup bounds, if it is on the ground.
    fn bounds(&self) -> Option<Aabb> {
        let position = match self.state {
            FlagState::Home => self.home,
            FlagState::Dropped(p) => p,
            FlagState::Carried(_) => return None,
        };
        Some(Aabb::new(position, Vec2::splat(0.5)))
    }
}

/// Two flags, two home stands. Pick up the enemy flag on overlap; drop it
/// where you died; score by carrying it onto your own stand while your own
/// flag sits at home.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtfMode {
    pub flags: [Flag; 2],
    pub captures_to_win: u32,
    pub score: Scoreboard,

    /// Pickup/capture radius around home stands.
    pub stand_half: Vec2,
}

impl CtfMode {
    pub fn new(red_home: Vec2, blue_home: Vec2, captures_to_win: u32) -> Self {
        Self {
            flags: [Flag::new(Team::Red, red_home), Flag::new(Team::Blue, blue_home)],
            captures_to_win: captures_to_win.max(1),
            score: Scoreboard::default(),
            stand_half: Vec2::splat(1.0),
        }
    }

    fn flag_mut(&mut self, team: Team) -> &mut Flag {
        match team {
            Team::Red => &mut self.flags[0],
            Team::Blue => &mut self.flags[1],
        }
    }

    fn flag(&self, team: Team) -> &Flag {
        match team {
            Team::Red => &self.flags[0],
            Team::Blue => &self.flags[1],
        }
    }

    pub fn carrier_of(&self, team: Team) -> Option<u32> {
        match self.flag(team).state {
            FlagState::Carried(id) => Some(id),
            _ => None,
        }
    }

    /// Death hook: a dead carrier drops the flag in place.
    pub fn drop_carried_by(&mut self, hero_id: u32, position: Vec2) {
        for flag in &mut self.flags {
            if flag.state == FlagState::Carried(hero_id) {
                flag.state = FlagState::Dropped(position);
            }
        }
    }

    pub fn update(&mut self, heroes: &[Hero]) -> MatchStatus {
        // Pickups: a hero overlapping the opposing flag takes it.
        for hero in heroes.iter().filter(|h| h.is_alive()) {
            let enemy_flag = self.flag_mut(hero.team.opponent());
            if let Some(bounds) = enemy_flag.bounds() {
                if bounds.overlaps(&hero.bounds()) {
                    enemy_flag.state = FlagState::Carried(hero.id);
                }
            }
        }

        // Captures: carrier on own stand while own flag is home.
        for team in [Team::Red, Team::Blue] {
            let Some(carrier_id) = self.carrier_of(team.opponent()) else {
                continue;
            };
            if self.flag(team).state != FlagState::Home {
                continue;
            }
            let stand = Aabb::new(self.flag(team).home, self.stand_half);
            let carried_home = heroes
                .iter()
                .any(|h| h.id == carrier_id && h.is_alive() && stand.overlaps(&h.bounds()));
            if carried_home {
                self.flag_mut(team.opponent()).state = FlagState::Home;
                self.score.add(team, 1);
            }
        }

        self.status()
    }

    pub fn status(&self) -> MatchStatus {
        if self.score.red >= self.captures_to_win {
            MatchStatus::Won(Team::Red)
        } else if self.score.blue >= self.captures_to_win {
            MatchStatus::Won(Team::Blue)
        } else {
            MatchStatus::InProgress
        }
    }
}

// ============================================================================
// Mode dispatch
// ============================================================================

/// The active mode, selected at match start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameMode {
    Arena(ArenaMode),
    Koth(KothMode),
    Ctf(CtfMode),
}

impl GameMode {
    pub fn update(&mut self, heroes: &[Hero], dt: f32) -> MatchStatus {
        match self {
            GameMode::Arena(mode) => mode.update(heroes),
            GameMode::Koth(mode) => mode.update(heroes, dt),
            GameMode::Ctf(mode) => mode.update(heroes),
        }
    }

    pub fn status(&self) -> MatchStatus {
        match self {
            GameMode::Arena(mode) => mode.status(),
            GameMode::Koth(mode) => mode.status(),
            GameMode::Ctf(mode) => mode.status(),
        }
    }

    /// Death hook forwarded by the simulation.
    pub fn on_hero_death(&mut self, hero_id: u32, position: Vec2) {
        if let GameMode::Ctf(mode) = self {
            mode.drop_carried_by(hero_id, position);
        }
    }
}
