use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

use maze_chase::{Cell, Dir, Outcome, Pos, Rgb, Snapshot, TerminalEvent};

/// Terminal columns per maze cell.
const CELL_W: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Glyph {
    Player(Dir),
    Ghost,
    Wall,
    Empty,
    Pellet,
}

impl Glyph {
    fn text(self) -> &'static str {
        match self {
            Glyph::Player(Dir::Right) => "ᗧ",
            Glyph::Player(Dir::Left) => "ᗤ",
            Glyph::Player(Dir::Up) => "ᗢ",
            Glyph::Player(Dir::Down) => "ᗣ",
            Glyph::Ghost => "👻",
            Glyph::Wall => "██",
            Glyph::Empty => "",
            Glyph::Pellet => "·",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScreenCell {
    glyph: Glyph,
    color: Color,
}

/// Terminal renderer that only rewrites cells whose content changed since
/// the previous frame. `None` entries in `last` are always redrawn.
pub struct Renderer {
    width: usize,
    height: usize,
    last: Vec<Option<ScreenCell>>,
    last_hud: Option<String>,
    origin: Option<(u16, u16)>,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            last: vec![None; width * height],
            last_hud: None,
            origin: None,
        }
    }

    /// Forces the next frame to repaint everything.
    pub fn invalidate(&mut self) {
        self.origin = None;
    }

    pub fn render(&mut self, stdout: &mut Stdout, snapshot: &Snapshot<'_>) -> io::Result<()> {
        if let Some(origin) = self.place(stdout)? {
            self.draw_hud(stdout, origin, snapshot)?;
            self.draw_maze(stdout, origin, snapshot)?;
        }
        stdout.flush()
    }

    /// Centres the maze in the terminal. A new origin wipes the screen and
    /// the diff state; returns `None` while the terminal is too small.
    fn place(&mut self, stdout: &mut Stdout) -> io::Result<Option<(u16, u16)>> {
        let needed_w = (self.width * CELL_W) as u16;
        let needed_h = (self.height + 2) as u16;
        let (term_w, term_h) = terminal::size()?;

        if term_w < needed_w || term_h < needed_h {
            self.origin = None;
            stdout.queue(Clear(ClearType::All))?;
            stdout.queue(MoveTo(0, 0))?;
            stdout.queue(Print(format!(
                "Terminal too small: need {needed_w}x{needed_h}, have {term_w}x{term_h}."
            )))?;
            return Ok(None);
        }

        let origin = ((term_w - needed_w) / 2, (term_h - needed_h) / 2 + 1);
        if self.origin != Some(origin) {
            stdout.queue(Clear(ClearType::All))?;
            self.last.fill(None);
            self.last_hud = None;
            self.origin = Some(origin);
        }
        Ok(Some(origin))
    }

    fn draw_hud(&mut self, stdout: &mut Stdout, (x, y): (u16, u16), snapshot: &Snapshot<'_>) -> io::Result<()> {
        let hud = format!(
            "Score: {}  Pellets: {}  Round: {}  (q to quit)",
            snapshot.score,
            snapshot.pellets.len(),
            snapshot.rounds + 1
        );
        if self.last_hud.as_ref() == Some(&hud) {
            return Ok(());
        }
        stdout.queue(MoveTo(x, y - 1))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        self.last_hud = Some(hud);
        Ok(())
    }

    fn draw_maze(&mut self, stdout: &mut Stdout, (x0, y0): (u16, u16), snapshot: &Snapshot<'_>) -> io::Result<()> {
        for (idx, slot) in self.last.iter_mut().enumerate() {
            let pos = Pos {
                x: idx % self.width,
                y: idx / self.width,
            };
            let cell = cell_for(snapshot, pos);
            if *slot == Some(cell) {
                continue;
            }
            *slot = Some(cell);
            stdout.queue(MoveTo(x0 + (pos.x * CELL_W) as u16, y0 + pos.y as u16))?;
            stdout.queue(SetForegroundColor(cell.color))?;
            stdout.queue(Print(padded(cell.glyph.text())))?;
            stdout.queue(ResetColor)?;
        }
        Ok(())
    }

    /// Prints the outcome banner under the maze.
    pub fn draw_notice(&self, stdout: &mut Stdout, event: TerminalEvent) -> io::Result<()> {
        let banner = match event.outcome {
            Outcome::Won => "You won!",
            Outcome::Lost => "You lost!",
        };
        let (x, y) = match self.origin {
            Some((x, y)) => (x, y + self.height as u16),
            None => (0, 1),
        };
        stdout.queue(MoveTo(x, y))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(Color::Yellow))?;
        stdout.queue(Print(format!(
            "{banner} Score: {} (any key to play again, q to quit)",
            event.score
        )))?;
        stdout.queue(ResetColor)?;
        stdout.flush()
    }
}

/// Pads `text` with spaces to exactly one cell of display width.
fn padded(text: &str) -> String {
    let pad = CELL_W.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}

fn cell_for(snapshot: &Snapshot<'_>, pos: Pos) -> ScreenCell {
    if pos == snapshot.player.pos {
        return ScreenCell {
            glyph: Glyph::Player(snapshot.player.facing),
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = snapshot.adversaries.iter().find(|g| g.agent.pos == pos) {
        return ScreenCell {
            glyph: Glyph::Ghost,
            color: rgb(ghost.color),
        };
    }
    match snapshot.grid.get(pos) {
        Some(Cell::Wall) => ScreenCell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Some(Cell::Floor) if snapshot.pellets.contains(pos) => ScreenCell {
            glyph: Glyph::Pellet,
            color: Color::White,
        },
        _ => ScreenCell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
    }
}

fn rgb(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}
