use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Adversary, Agent, Dir, Pos};
use crate::config::AdversarySpawn;
use crate::level::Grid;
use crate::movement::{can_move, step_adversary};

impl Adversary {
    pub fn spawn(spawn: &AdversarySpawn) -> Self {
        let facing = spawn.heading.unwrap_or(Dir::Left);
        Adversary {
            agent: Agent::new(spawn.pos, spawn.heading, facing),
            name: spawn.name,
            color: spawn.color,
        }
    }
}

/// Headings that lead onto a walkable cell from `pos`, in re-roll order.
pub fn open_directions(grid: &Grid, pos: Pos) -> Vec<Dir> {
    Dir::ALL
        .into_iter()
        .filter(|dir| can_move(grid, pos, *dir).is_some())
        .collect()
}

/// With probability `chance`, picks a fresh heading uniformly among the open
/// ones. Reversing is allowed. Enclosed adversaries keep their old heading.
pub fn reroll_heading(grid: &Grid, agent: &mut Agent, chance: f64, rng: &mut impl Rng) -> bool {
    if !rng.gen_bool(chance) {
        return false;
    }
    match open_directions(grid, agent.pos).choose(rng) {
        Some(&dir) => {
            agent.steer(dir);
            true
        }
        None => false,
    }
}

/// One tick of adversary behaviour: maybe re-roll, then move.
pub fn ghost_movement(grid: &Grid, adversary: &mut Adversary, chance: f64, rng: &mut impl Rng) -> Pos {
    if reroll_heading(grid, &mut adversary.agent, chance, rng) {
        log::trace!(
            "{} re-rolled heading to {:?} at {}",
            adversary.name,
            adversary.agent.velocity,
            adversary.agent.pos
        );
    }
    step_adversary(grid, &mut adversary.agent)
}
