use std::ops::Range;

use crate::components::{Dir, Pos, Rgb};
use crate::level::init_map;

pub const COLS: usize = 28;
pub const ROWS: usize = 31;
pub const CELL: u16 = 16;
pub const GAP_ROW: usize = 15;
pub const GAP_COLS: Range<usize> = 12..16;
pub const PELLET_SCORE: u32 = 10;
pub const REROLL_CHANCE: f64 = 0.25;
pub const PLAYER_SPAWN: Pos = Pos::new(14, 23);

/// Errors raised while validating a [`GameConfig`] or parsing a layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid of {cols}x{rows} has no interior; need at least 3x3")]
    GridTooSmall { cols: usize, rows: usize },
    #[error("Gap row {row}, columns {start}..{end} reaches outside the grid interior")]
    GapOutsideInterior { row: usize, start: usize, end: usize },
    #[error("Adversary roster is empty")]
    EmptyRoster,
    #[error("{who} spawn {pos} is not a floor cell")]
    SpawnBlocked { who: String, pos: Pos },
    #[error("Pellet score {pellet_score} times {pellets} pellets overflows the score counter")]
    ScoreOverflow { pellet_score: u32, pellets: usize },
    #[error("Re-roll chance {0} is not a probability")]
    RerollChance(f64),
    #[error("Layout has no rows")]
    EmptyLayout,
    #[error("Layout row {row} has width {found}, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown tile {ch:?} at ({x}, {y})")]
    UnknownTile { ch: char, x: usize, y: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdversarySpawn {
    pub name: &'static str,
    pub pos: Pos,
    /// Heading at program start. Resets always clear it.
    pub heading: Option<Dir>,
    pub color: Rgb,
}

/// Every tunable constant of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub cols: usize,
    pub rows: usize,
    pub gap_row: usize,
    pub gap_cols: Range<usize>,
    /// Pixel size of one cell for pixel-based renderers. The terminal front
    /// end draws fixed two-column cells and ignores it.
    pub cell_size: u16,
    pub pellet_score: u32,
    pub reroll_chance: f64,
    pub player_spawn: Pos,
    pub player_facing: Dir,
    pub adversaries: Vec<AdversarySpawn>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cols: COLS,
            rows: ROWS,
            gap_row: GAP_ROW,
            gap_cols: GAP_COLS,
            cell_size: CELL,
            pellet_score: PELLET_SCORE,
            reroll_chance: REROLL_CHANCE,
            player_spawn: PLAYER_SPAWN,
            player_facing: Dir::Left,
            adversaries: vec![
                AdversarySpawn {
                    name: "pink",
                    pos: Pos::new(13, 15),
                    heading: Some(Dir::Right),
                    color: Rgb(0xff, 0x5f, 0xa3),
                },
                AdversarySpawn {
                    name: "aqua",
                    pos: Pos::new(14, 15),
                    heading: Some(Dir::Left),
                    color: Rgb(0x5f, 0xff, 0xd7),
                },
            ],
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols < 3 || self.rows < 3 {
            return Err(ConfigError::GridTooSmall {
                cols: self.cols,
                rows: self.rows,
            });
        }
        let gap_inside = self.gap_cols.is_empty()
            || (self.gap_cols.start >= 1 && self.gap_cols.end < self.cols);
        if self.gap_row == 0 || self.gap_row >= self.rows - 1 || !gap_inside {
            return Err(ConfigError::GapOutsideInterior {
                row: self.gap_row,
                start: self.gap_cols.start,
                end: self.gap_cols.end,
            });
        }
        if !(0.0..=1.0).contains(&self.reroll_chance) {
            return Err(ConfigError::RerollChance(self.reroll_chance));
        }
        if self.adversaries.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        let (grid, pellets) = init_map(self);
        let max_score = u32::try_from(pellets.len())
            .ok()
            .and_then(|n| n.checked_mul(self.pellet_score));
        if max_score.is_none() {
            return Err(ConfigError::ScoreOverflow {
                pellet_score: self.pellet_score,
                pellets: pellets.len(),
            });
        }
        let spawns = std::iter::once(("player".to_string(), self.player_spawn)).chain(
            self.adversaries
                .iter()
                .map(|a| (format!("adversary {}", a.name), a.pos)),
        );
        for (who, pos) in spawns {
            if !grid.is_floor(pos) {
                return Err(ConfigError::SpawnBlocked { who, pos });
            }
        }
        Ok(())
    }
}
