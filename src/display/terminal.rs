use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use super::{Screen, HEADLINE_SIZE};
use crate::colors::{self, Rgb};
use crate::error::GameError;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
    bold: bool,
}

impl Cell {
    fn blank(bg: Rgb) -> Self {
        Self { ch: ' ', fg: colors::WHITE, bg, bold: false }
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// Cell-buffered terminal screen.  The world rectangle is stretched over the
/// whole grid, so one cell covers `world / (cols, rows)` units.
pub struct TerminalScreen<W: Write> {
    out: W,
    world: Vec2,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    follow_terminal: bool,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W, world: Vec2, cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            out,
            world,
            cols,
            rows,
            cells: vec![Cell::blank(colors::BLACK); cols as usize * rows as usize],
            follow_terminal: false,
        }
    }

    /// Re-query the terminal size at the start of every frame.
    pub fn following_terminal_size(mut self) -> Self {
        self.follow_terminal = true;
        self
    }

    pub fn grid(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Character currently buffered at a cell, mostly for inspection in tests.
    pub fn char_at(&self, col: u16, row: u16) -> Option<char> {
        self.cell(col, row).map(|c| c.ch)
    }

    /// Background colour currently buffered at a cell.
    pub fn background_at(&self, col: u16, row: u16) -> Option<Rgb> {
        self.cell(col, row).map(|c| c.bg)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get_mut(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::new(self.world.x / self.cols as f32, self.world.y / self.rows as f32)
    }

    /// Cell containing a world point, if it is on screen.
    fn cell_of(&self, point: Vec2) -> Option<(u16, u16)> {
        let cs = self.cell_size();
        let col = (point.x / cs.x).floor();
        let row = (point.y / cs.y).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn resize(&mut self, cols: u16, rows: u16, bg: Rgb) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cells = vec![Cell::blank(bg); self.cols as usize * self.rows as usize];
        tracing::debug!(cols = self.cols, rows = self.rows, "terminal resized");
    }

    /// Paint every cell whose centre satisfies `inside`, or the cell holding
    /// `anchor` when the shape is smaller than a cell.
    fn paint(&mut self, bounds: Rect, anchor: Vec2, color: Rgb, inside: impl Fn(Vec2) -> bool) {
        let cs = self.cell_size();
        let max_col = self.cols as f32 - 1.0;
        let max_row = self.rows as f32 - 1.0;
        let first_col = (bounds.left / cs.x).floor().clamp(0.0, max_col) as u16;
        let last_col = (bounds.right() / cs.x).floor().clamp(0.0, max_col) as u16;
        let first_row = (bounds.top / cs.y).floor().clamp(0.0, max_row) as u16;
        let last_row = (bounds.bottom() / cs.y).floor().clamp(0.0, max_row) as u16;

        let mut painted = false;
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let center = Vec2::new((col as f32 + 0.5) * cs.x, (row as f32 + 0.5) * cs.y);
                if inside(center) {
                    if let Some(cell) = self.cell_mut(col, row) {
                        *cell = Cell::blank(color);
                        painted = true;
                    }
                }
            }
        }
        if !painted {
            if let Some((col, row)) = self.cell_of(anchor) {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell::blank(color);
                }
            }
        }
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn size(&self) -> Vec2 {
        self.world
    }

    fn clear(&mut self, color: Rgb) {
        if self.follow_terminal {
            if let Ok((cols, rows)) = terminal::size() {
                if (cols, rows) != (self.cols, self.rows) {
                    self.resize(cols, rows, color);
                }
            }
        }
        self.cells.fill(Cell::blank(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        let bounds = Rect::around(center, radius);
        self.paint(bounds, center, color, |p| p.distance(center) <= radius);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.paint(rect, rect.center(), color, |p| {
            p.x >= rect.left && p.x < rect.right() && p.y >= rect.top && p.y < rect.bottom()
        });
    }

    fn draw_text(&mut self, position: Vec2, text: &str, size: u16, color: Rgb, background: Rgb) {
        let Some((col, row)) = self.cell_of(position) else {
            return;
        };
        let bold = size >= HEADLINE_SIZE;
        for (offset, ch) in text.chars().enumerate() {
            let Some(cell) = self.cell_mut(col.saturating_add(offset as u16), row) else {
                break;
            };
            *cell = Cell { ch, fg: color, bg: background, bold };
        }
    }

    fn text_extent(&self, text: &str, _size: u16) -> Vec2 {
        let cs = self.cell_size();
        Vec2::new(text.chars().count() as f32 * cs.x, cs.y)
    }

    fn present(&mut self) -> Result<(), GameError> {
        let mut current: Option<(Rgb, Rgb, bool)> = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            // Writing the bottom-right cell scrolls some terminals.
            let width = if row + 1 == self.rows { self.cols - 1 } else { self.cols };
            let mut run = String::new();
            for col in 0..width {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                let cell_style = (cell.fg, cell.bg, cell.bold);
                if current != Some(cell_style) {
                    if !run.is_empty() {
                        self.out.queue(Print(&run))?;
                        run.clear();
                    }
                    self.out.queue(style::SetAttribute(if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    }))?;
                    self.out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    self.out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    current = Some(cell_style);
                }
                run.push(cell.ch);
            }
            if !run.is_empty() {
                self.out.queue(Print(&run))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Log what the terminal reports about itself.
pub fn display_info() {
    let term = std::env::var("TERM").unwrap_or_else(|_| "unknown".to_string());
    match terminal::size() {
        Ok((cols, rows)) => tracing::info!(%term, cols, rows, "display driver: crossterm"),
        Err(err) => tracing::warn!(%term, error = %err, "display size unavailable"),
    }
}
