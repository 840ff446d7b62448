//! The timed state machine that owns a game instance.
//!
//! All mutation goes through one owner: the host holds a [`Game`] and calls
//! `start`, `apply_direction`, `dismiss` and `advance` from a single loop.
//! The countdown and ghost tickers are duration accumulators fed by
//! `advance`, so a real frontend drives them with wall-clock deltas while
//! tests drive them with synthetic ones. No accumulator is serviced outside
//! the phase that owns it, which is what guarantees no tick ever fires after
//! the game leaves Running.

use std::time::Duration;

use rand::Rng;

use crate::agent::Agent;
use crate::cookies::{self, ScatterError};
use crate::ghost::{Ghost, GhostColor};
use crate::grid::{Dir, Pos};
use crate::maze::{Maze, MAZE_LAYOUT};

/// Countdown ticker period. One second per remaining-time unit.
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Lifecycle stage of a game instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Won,
    Lost,
    Closed,
}

/// Why a game was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossCause {
    Caught,
    Timeout,
}

/// Signals the engine sends back to its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged(Phase),
}

/// Where a ghost starts and what it looks like.
#[derive(Clone, Debug)]
pub struct GhostSpawn {
    pub color: GhostColor,
    pub pos: Pos,
    pub facing: Dir,
}

/// How the cookie set is produced on each start.
#[derive(Clone, Debug)]
pub enum CookieSource {
    /// The same positions every game, as in the original storefront reward.
    Fixed(Vec<Pos>),
    /// Random scatter bounded to `[min, max]` cookies.
    Scattered { min: usize, max: usize },
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub maze: Maze,
    pub agent_start: Pos,
    pub agent_facing: Dir,
    pub ghosts: Vec<GhostSpawn>,
    pub cookies: CookieSource,
    /// Time limit in whole seconds.
    pub time_limit: u32,
    /// Period of the ghost ticker.
    pub ghost_period: Duration,
    /// Delay between entering Lost and auto-closing.
    pub grace_delay: Duration,
}

impl GameConfig {
    /// The maze-chase variant: walled maze, three wandering ghosts,
    /// scattered cookies, 90 seconds.
    pub fn maze_chase() -> Self {
        Self {
            maze: Maze::parse(MAZE_LAYOUT),
            agent_start: Pos::new(9, 7),
            agent_facing: Dir::Right,
            ghosts: vec![
                GhostSpawn {
                    color: GhostColor::Red,
                    pos: Pos::new(9, 3),
                    facing: Dir::Left,
                },
                GhostSpawn {
                    color: GhostColor::Pink,
                    pos: Pos::new(3, 5),
                    facing: Dir::Right,
                },
                GhostSpawn {
                    color: GhostColor::Cyan,
                    pos: Pos::new(15, 5),
                    facing: Dir::Left,
                },
            ],
            cookies: CookieSource::Scattered { min: 12, max: 24 },
            time_limit: 90,
            ghost_period: Duration::from_millis(550),
            grace_delay: Duration::from_secs(3),
        }
    }

    /// The original storefront reward game: open 20x16 grid, no ghosts,
    /// eight fixed cookies, 45 seconds. Same engine, different config.
    pub fn cookie_grid() -> Self {
        Self {
            maze: Maze::open(20, 16),
            agent_start: Pos::new(10, 10),
            agent_facing: Dir::Right,
            ghosts: Vec::new(),
            cookies: CookieSource::Fixed(vec![
                Pos::new(5, 5),
                Pos::new(15, 5),
                Pos::new(5, 15),
                Pos::new(15, 15),
                Pos::new(10, 5),
                Pos::new(10, 15),
                Pos::new(5, 10),
                Pos::new(15, 10),
            ]),
            time_limit: 45,
            ghost_period: Duration::from_millis(550),
            grace_delay: Duration::from_secs(3),
        }
    }
}

/// Read-only view of the full game state, consumed by renderers.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub agent_pos: Pos,
    pub agent_facing: Dir,
    pub ghosts: &'a [Ghost],
    pub cookies: &'a [Pos],
    pub score: u32,
    pub time_left: u32,
    pub phase: Phase,
    pub loss_cause: Option<LossCause>,
    pub initial_cookies: usize,
}

pub struct Game {
    config: GameConfig,
    agent: Agent,
    ghosts: Vec<Ghost>,
    cookies: Vec<Pos>,
    initial_cookies: usize,
    score: u32,
    time_left: u32,
    phase: Phase,
    loss_cause: Option<LossCause>,
    countdown_acc: Duration,
    ghost_acc: Duration,
    close_acc: Duration,
    events: Vec<GameEvent>,
}

impl Game {
    /// Creates a game in Idle. Nothing moves until `start` is called.
    pub fn new(config: GameConfig) -> Self {
        debug_assert!(
            config.maze.is_path(config.agent_start.x, config.agent_start.y),
            "agent start must be a path cell"
        );
        debug_assert!(
            config
                .ghosts
                .iter()
                .all(|spawn| config.maze.is_path(spawn.pos.x, spawn.pos.y)),
            "every ghost start must be a path cell"
        );
        let agent = Agent::new(config.agent_start, config.agent_facing);
        let ghosts = config
            .ghosts
            .iter()
            .map(|spawn| Ghost::new(spawn.color, spawn.pos, spawn.facing))
            .collect();
        let time_left = config.time_limit;
        Self {
            config,
            agent,
            ghosts,
            cookies: Vec::new(),
            initial_cookies: 0,
            score: 0,
            time_left,
            phase: Phase::Idle,
            loss_cause: None,
            countdown_acc: Duration::ZERO,
            ghost_acc: Duration::ZERO,
            close_acc: Duration::ZERO,
            events: Vec::new(),
        }
    }

    /// Starts a fresh run, or restarts one from any phase: score, timers,
    /// cookie set and every entity go back to their canonical state.
    pub fn start(&mut self, rng: &mut impl Rng) -> Result<(), ScatterError> {
        let cookies = match &self.config.cookies {
            CookieSource::Fixed(positions) => positions.clone(),
            CookieSource::Scattered { min, max } => {
                cookies::scatter(&self.config.maze, *min, *max, rng)?
            }
        };
        self.agent = Agent::new(self.config.agent_start, self.config.agent_facing);
        self.ghosts = self
            .config
            .ghosts
            .iter()
            .map(|spawn| Ghost::new(spawn.color, spawn.pos, spawn.facing))
            .collect();
        self.initial_cookies = cookies.len();
        self.cookies = cookies;
        self.score = 0;
        self.time_left = self.config.time_limit;
        self.loss_cause = None;
        self.countdown_acc = Duration::ZERO;
        self.ghost_acc = Duration::ZERO;
        self.close_acc = Duration::ZERO;
        self.set_phase(Phase::Running);
        Ok(())
    }

    /// Applies one directional command against current state. Outside
    /// Running, or against a wall, this is a silent no-op.
    pub fn apply_direction(&mut self, dir: Dir) {
        if self.phase != Phase::Running {
            return;
        }
        if !self.agent.try_move(&self.config.maze, dir) {
            return;
        }
        if let Some(index) = self.cookies.iter().position(|c| *c == self.agent.pos) {
            let _ = self.cookies.swap_remove(index);
            self.score += 10;
            if self.cookies.is_empty() {
                self.set_phase(Phase::Won);
                return;
            }
        }
        if self.ghosts.iter().any(|ghost| ghost.pos == self.agent.pos) {
            self.lose(LossCause::Caught);
        }
    }

    /// External dismissal. Accepted immediately from any state; also cancels
    /// a pending Lost auto-close.
    pub fn dismiss(&mut self) {
        if self.phase != Phase::Closed {
            self.set_phase(Phase::Closed);
        }
    }

    /// Feeds elapsed time into whichever timers the current phase owns:
    /// the countdown and ghost tickers while Running, the grace-delay
    /// auto-close while Lost. Won, Idle and Closed consume no time.
    pub fn advance(&mut self, dt: Duration, rng: &mut impl Rng) {
        match self.phase {
            Phase::Running => {
                self.ghost_acc += dt;
                self.countdown_acc += dt;
                while self.phase == Phase::Running && self.ghost_acc >= self.config.ghost_period {
                    self.ghost_acc -= self.config.ghost_period;
                    self.ghost_tick(rng);
                }
                while self.phase == Phase::Running && self.countdown_acc >= COUNTDOWN_PERIOD {
                    self.countdown_acc -= COUNTDOWN_PERIOD;
                    self.countdown_tick();
                }
            }
            Phase::Lost => {
                self.close_acc += dt;
                if self.close_acc >= self.config.grace_delay {
                    self.set_phase(Phase::Closed);
                }
            }
            Phase::Idle | Phase::Won | Phase::Closed => {}
        }
    }

    /// Drains the phase-change signals accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            maze: &self.config.maze,
            agent_pos: self.agent.pos,
            agent_facing: self.agent.facing,
            ghosts: &self.ghosts,
            cookies: &self.cookies,
            score: self.score,
            time_left: self.time_left,
            phase: self.phase,
            loss_cause: self.loss_cause,
            initial_cookies: self.initial_cookies,
        }
    }

    fn ghost_tick(&mut self, rng: &mut impl Rng) {
        for ghost in &mut self.ghosts {
            ghost.wander(&self.config.maze, rng);
        }
        if self.ghosts.iter().any(|ghost| ghost.pos == self.agent.pos) {
            self.lose(LossCause::Caught);
        }
    }

    fn countdown_tick(&mut self) {
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.lose(LossCause::Timeout);
        }
    }

    fn lose(&mut self, cause: LossCause) {
        self.loss_cause = Some(cause);
        self.close_acc = Duration::ZERO;
        self.set_phase(Phase::Lost);
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.events.push(GameEvent::PhaseChanged(phase));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_start_every_entity_on_a_path_cell() {
        for config in [GameConfig::maze_chase(), GameConfig::cookie_grid()] {
            assert!(config.maze.is_path(config.agent_start.x, config.agent_start.y));
            for spawn in &config.ghosts {
                assert!(config.maze.is_path(spawn.pos.x, spawn.pos.y));
            }
            if let CookieSource::Fixed(positions) = &config.cookies {
                for pos in positions {
                    assert!(config.maze.is_path(pos.x, pos.y), "{pos:?} off the grid");
                }
            }
        }
    }

    #[test]
    fn scatter_bounds_fit_the_canonical_maze() {
        let config = GameConfig::maze_chase();
        if let CookieSource::Scattered { min, .. } = config.cookies {
            assert!(config.maze.path_cells().count() >= min);
        } else {
            panic!("maze_chase should scatter its cookies");
        }
    }

    #[test]
    fn new_game_is_idle_and_inert() {
        let mut game = Game::new(GameConfig::maze_chase());
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        game.apply_direction(Dir::Left);
        game.advance(Duration::from_secs(10), &mut rng);
        let snap = game.snapshot();
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.agent_pos, Pos::new(9, 7));
        assert_eq!(snap.time_left, 90);
        assert!(game.take_events().is_empty());
    }
}
