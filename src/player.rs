use crate::components::{Agent, Dir};
use crate::config::GameConfig;

/// Single-slot mailbox for direction changes. A newer post replaces an
/// unread one; the session drains it once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSlot {
    next_direction: Option<Dir>,
}

impl InputSlot {
    pub fn post(&mut self, dir: Dir) {
        self.next_direction = Some(dir);
    }

    pub fn take(&mut self) -> Option<Dir> {
        self.next_direction.take()
    }

    pub fn peek(&self) -> Option<Dir> {
        self.next_direction
    }
}

pub fn setup_pacman(config: &GameConfig) -> Agent {
    Agent::new(config.player_spawn, None, config.player_facing)
}

/// Applies the pending direction, if any, to the player's velocity and facing.
pub fn input_handler(player: &mut Agent, input: &mut InputSlot) {
    if let Some(direction) = input.take() {
        player.steer(direction);
    }
}
