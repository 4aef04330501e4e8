use std::collections::HashSet;

use crate::components::Pos;
use crate::config::{ConfigError, GameConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Floor,
}

/// Static wall layout, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid by asking `f` for the cell at every `(x, y)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Pos) -> Cell) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(Pos { x, y }));
            }
        }
        Grid {
            width,
            height,
            cells,
        }
    }

    /// Parses a layout drawn with `#` for walls and `.` (or space) for floor.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, ConfigError> {
        let width = rows.first().ok_or(ConfigError::EmptyLayout)?.chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ConfigError::RaggedLayout {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                cells.push(match ch {
                    '#' => Cell::Wall,
                    '.' | ' ' => Cell::Floor,
                    _ => return Err(ConfigError::UnknownTile { ch, x, y }),
                });
            }
        }
        Ok(Grid {
            width,
            height: rows.len(),
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Pos) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    /// True only for in-bounds floor cells.
    pub fn is_floor(&self, pos: Pos) -> bool {
        self.get(pos) == Some(Cell::Floor)
    }

    fn set(&mut self, pos: Pos, cell: Cell) {
        if self.contains(pos) {
            self.cells[pos.y * self.width + pos.x] = cell;
        }
    }

    /// Coordinates of every floor cell in row-major order.
    pub fn floor_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            (*cell == Cell::Floor).then(|| Pos {
                x: i % self.width,
                y: i / self.width,
            })
        })
    }
}

/// Pellets still on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PelletSet {
    cells: HashSet<Pos>,
}

impl PelletSet {
    /// One pellet on every floor cell of `grid`.
    pub fn fill(grid: &Grid) -> Self {
        PelletSet {
            cells: grid.floor_cells().collect(),
        }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    /// Removes the pellet at `pos`, returning whether there was one.
    pub fn take(&mut self, pos: Pos) -> bool {
        self.cells.remove(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }

    /// Keeps only the pellets for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(Pos) -> bool) {
        self.cells.retain(|pos| keep(*pos));
    }
}

/// Builds the fixed maze: a wall border around an open interior, with the
/// gap run re-opened after the border is laid. Pellets cover every floor cell.
pub fn init_map(config: &GameConfig) -> (Grid, PelletSet) {
    let (w, h) = (config.cols, config.rows);
    let mut grid = Grid::from_fn(w, h, |Pos { x, y }| {
        if y == 0 || y + 1 == h || x == 0 || x + 1 == w {
            Cell::Wall
        } else {
            Cell::Floor
        }
    });

    for x in config.gap_cols.clone() {
        let pos = Pos::new(x, config.gap_row);
        if is_border(&grid, pos) {
            continue;
        }
        grid.set(pos, Cell::Floor);
    }

    let pellets = PelletSet::fill(&grid);
    (grid, pellets)
}

fn is_border(grid: &Grid, pos: Pos) -> bool {
    pos.x == 0 || pos.y == 0 || pos.x + 1 >= grid.width() || pos.y + 1 >= grid.height()
}
