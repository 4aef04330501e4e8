use log::{debug, info, trace};
use rand::Rng;

use crate::components::{Adversary, Agent, Dir};
use crate::config::{ConfigError, GameConfig};
use crate::ghost::ghost_movement;
use crate::level::{init_map, Grid, PelletSet};
use crate::movement::step_player;
use crate::player::{input_handler, setup_pacman, InputSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Fired once per terminal determination, just before the session resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalEvent {
    pub outcome: Outcome,
    pub score: u32,
}

/// Receives terminal events. Runs synchronously inside the tick, so a
/// blocking implementation delays the reset until it returns.
pub trait Notifier {
    fn notify(&mut self, event: TerminalEvent);
}

impl<F: FnMut(TerminalEvent)> Notifier for F {
    fn notify(&mut self, event: TerminalEvent) {
        self(event)
    }
}

/// Read-only view handed to renderers each frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub pellets: &'a PelletSet,
    pub player: &'a Agent,
    pub adversaries: &'a [Adversary],
    pub score: u32,
    pub rounds: u32,
    pub ticks: u64,
}

pub struct Session {
    pub grid: Grid,
    pub pellets: PelletSet,
    pub player: Agent,
    pub adversaries: Vec<Adversary>,
    pub score: u32,
    config: GameConfig,
    input: InputSlot,
    initial_pellets: usize,
    rounds: u32,
    ticks: u64,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (grid, pellets) = init_map(&config);
        let player = setup_pacman(&config);
        let adversaries = config.adversaries.iter().map(Adversary::spawn).collect();
        let initial_pellets = pellets.len();
        debug!(
            "new session: {}x{} grid, {} pellets, {} adversaries",
            grid.width(),
            grid.height(),
            initial_pellets,
            config.adversaries.len()
        );

        Ok(Session {
            grid,
            pellets,
            player,
            adversaries,
            score: 0,
            config,
            input: InputSlot::default(),
            initial_pellets,
            rounds: 0,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Pellet count of a freshly built map.
    pub fn initial_pellets(&self) -> usize {
        self.initial_pellets
    }

    /// Terminal events seen so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Queues a direction change for the next tick, replacing any unread one.
    pub fn post_input(&mut self, dir: Dir) {
        self.input.post(dir);
    }

    pub fn pending_input(&self) -> Option<Dir> {
        self.input.peek()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            pellets: &self.pellets,
            player: &self.player,
            adversaries: &self.adversaries,
            score: self.score,
            rounds: self.rounds,
            ticks: self.ticks,
        }
    }

    /// Runs one tick: input, player, adversaries in roster order, then the
    /// termination check. A terminal event is passed to `notifier` and then
    /// the session resets before this returns.
    pub fn tick(
        &mut self,
        rng: &mut impl Rng,
        notifier: &mut impl Notifier,
    ) -> Option<TerminalEvent> {
        self.ticks += 1;
        input_handler(&mut self.player, &mut self.input);

        let step = step_player(&self.grid, &mut self.pellets, &mut self.player);
        self.score += step.pellets_eaten * self.config.pellet_score;

        for adversary in &mut self.adversaries {
            ghost_movement(&self.grid, adversary, self.config.reroll_chance, rng);
        }
        trace!(
            "tick {}: player at {}, score {}, {} pellets left",
            self.ticks,
            self.player.pos,
            self.score,
            self.pellets.len()
        );

        let event = self.check_termination()?;
        self.rounds += 1;
        info!(
            "round {} ended: {:?} with score {}",
            self.rounds, event.outcome, event.score
        );
        notifier.notify(event);
        self.reset();
        Some(event)
    }

    // Loss is checked first and wins a tie.
    fn check_termination(&self) -> Option<TerminalEvent> {
        let caught = self
            .adversaries
            .iter()
            .any(|a| a.agent.pos == self.player.pos);
        let outcome = if caught {
            Outcome::Lost
        } else if self.pellets.is_empty() {
            Outcome::Won
        } else {
            return None;
        };
        Some(TerminalEvent {
            outcome,
            score: self.score,
        })
    }

    /// Rebuilds the map and returns every agent to its spawn, stationary.
    pub fn reset(&mut self) {
        let (grid, pellets) = init_map(&self.config);
        self.grid = grid;
        self.pellets = pellets;
        self.score = 0;
        self.player.halt_at(self.config.player_spawn);
        self.player.facing = self.config.player_facing;
        for (adversary, spawn) in self.adversaries.iter_mut().zip(&self.config.adversaries) {
            adversary.agent.halt_at(spawn.pos);
        }
        self.input.take();
        debug!("session reset after {} ticks", self.ticks);
    }
}
