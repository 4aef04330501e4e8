use std::fmt;

// Components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Pos { x, y }
    }

    /// Neighbouring cell one step in `dir`, or `None` if it would leave the
    /// non-negative quadrant.
    pub fn offset(self, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Pos { x, y })
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Candidate order used when an adversary re-rolls its heading.
    pub const ALL: [Dir; 4] = [Dir::Right, Dir::Left, Dir::Down, Dir::Up];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Display identity of an adversary. Carries no game-logic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Anything with a grid position that moves.
///
/// `velocity` is `None` while stationary; otherwise it is a unit step along
/// one axis. `facing` only matters to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub pos: Pos,
    pub velocity: Option<Dir>,
    pub facing: Dir,
}

impl Agent {
    pub fn new(pos: Pos, velocity: Option<Dir>, facing: Dir) -> Self {
        Agent {
            pos,
            velocity,
            facing,
        }
    }

    /// Overwrites velocity and facing with `dir`.
    pub fn steer(&mut self, dir: Dir) {
        self.velocity = Some(dir);
        self.facing = dir;
    }

    pub fn halt_at(&mut self, pos: Pos) {
        self.pos = pos;
        self.velocity = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adversary {
    pub agent: Agent,
    pub name: &'static str,
    pub color: Rgb,
}
