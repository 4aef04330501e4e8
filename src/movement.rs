use crate::components::{Agent, Dir, Pos};
use crate::level::{Grid, PelletSet};

/// Result of advancing the player by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub pos: Pos,
    pub pellets_eaten: u32,
}

/// Cell reached by moving one step from `pos` in `dir`, if it is walkable.
pub fn can_move(grid: &Grid, pos: Pos, dir: Dir) -> Option<Pos> {
    pos.offset(dir).filter(|next| grid.is_floor(*next))
}

/// Position after applying `agent`'s velocity. Blocked or stationary agents
/// stay where they are; velocity is never touched.
pub fn advance(grid: &Grid, agent: &Agent) -> Pos {
    agent
        .velocity
        .and_then(|dir| can_move(grid, agent.pos, dir))
        .unwrap_or(agent.pos)
}

/// Moves the player and eats the pellet under its (possibly unchanged) cell.
pub fn step_player(grid: &Grid, pellets: &mut PelletSet, player: &mut Agent) -> StepOutcome {
    player.pos = advance(grid, player);
    let pellets_eaten = u32::from(pellets.take(player.pos));
    StepOutcome {
        pos: player.pos,
        pellets_eaten,
    }
}

/// Moves an adversary. Adversaries never touch pellets.
pub fn step_adversary(grid: &Grid, adversary: &mut Agent) -> Pos {
    adversary.pos = advance(grid, adversary);
    adversary.pos
}
