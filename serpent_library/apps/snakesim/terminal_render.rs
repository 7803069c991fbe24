// Draws FrameSnapshots into the terminal, one character cell per CELL_* pixels
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use serpent::library::algorithms::shading::Rgba;
use serpent::prelude::*;
use std::io::{self, Stdout, Write};

/// Pixels covered by one terminal cell; cells are roughly twice as tall as wide
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

const HEAD_GLYPH: char = '@';
const BODY_GLYPH: char = 'o';
const FOOD_GLYPH: char = '*';

/// Playfield matching the current terminal, leaving the last row for status
pub fn playfield_for_terminal() -> Result<Playfield> {
    let (cols, rows) = terminal::size()?;
    let rows = rows.saturating_sub(1);
    Playfield::new(cols as f64 * CELL_WIDTH, rows as f64 * CELL_HEIGHT)
}

fn to_color(rgba: Rgba) -> Color {
    Color::Rgb {
        r: rgba.r,
        g: rgba.g,
        b: rgba.b,
    }
}

#[derive(Clone, Copy)]
struct Cell {
    glyph: char,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: Color::Reset,
};

/// Terminal Render Node - paints the newest frame each tick
pub struct TerminalRenderNode {
    frames: Hub<FrameSnapshot>,
    stdout: Stdout,
    cols: usize,
    rows: usize,
    grid: Vec<Cell>,
    active: bool,
}

impl TerminalRenderNode {
    pub fn new(playfield: &Playfield) -> Result<Self> {
        Self::new_with_topic(playfield, FRAME_TOPIC)
    }

    pub fn new_with_topic(playfield: &Playfield, topic: &str) -> Result<Self> {
        let cols = (playfield.width() / CELL_WIDTH).ceil() as usize;
        let rows = (playfield.height() / CELL_HEIGHT).ceil() as usize;
        Ok(Self {
            frames: Hub::new(topic)?,
            stdout: io::stdout(),
            cols,
            rows,
            grid: vec![BLANK; cols * rows],
            active: false,
        })
    }

    fn plot(&mut self, x: f64, y: f64, cell: Cell) {
        let col = (x / CELL_WIDTH).floor();
        let row = (y / CELL_HEIGHT).floor();
        if col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        // The far edge belongs to the last cell
        let col = col.min(self.cols.saturating_sub(1));
        let row = row.min(self.rows.saturating_sub(1));
        if let Some(slot) = self.grid.get_mut(row * self.cols + col) {
            *slot = cell;
        }
    }

    fn draw(&mut self, frame: &FrameSnapshot) -> io::Result<()> {
        self.grid.fill(BLANK);

        self.plot(
            frame.food.x,
            frame.food.y,
            Cell {
                glyph: FOOD_GLYPH,
                color: to_color(frame.food.color),
            },
        );
        // Tail first so nearer segments win shared cells
        for (index, segment) in frame.segments.iter().enumerate().rev() {
            let glyph = if index == 0 { HEAD_GLYPH } else { BODY_GLYPH };
            self.plot(
                segment.x,
                segment.y,
                Cell {
                    glyph,
                    color: to_color(segment.color),
                },
            );
        }

        for row in 0..self.rows {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            let mut current = Color::Reset;
            for cell in &self.grid[row * self.cols..(row + 1) * self.cols] {
                if cell.color != current {
                    queue!(self.stdout, SetForegroundColor(cell.color))?;
                    current = cell.color;
                }
                queue!(self.stdout, Print(cell.glyph))?;
            }
        }

        let status = format!(
            " length {:>3} | longest {:>3} | resets {:>3} | Left/A Right/D steer, Esc quits",
            frame.length(),
            frame.longest,
            frame.deaths
        );
        queue!(
            self.stdout,
            ResetColor,
            cursor::MoveTo(0, self.rows as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            Print(status)
        )?;
        self.stdout.flush()
    }
}

impl Node for TerminalRenderNode {
    fn name(&self) -> &'static str {
        "TerminalRenderNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> Result<()> {
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        self.active = true;
        ctx.log_info(&format!("Rendering {}x{} cells", self.cols, self.rows));
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        let Some(frame) = self.frames.recv_latest(ctx.as_deref_mut()) else {
            return;
        };
        if let Err(e) = self.draw(&frame) {
            if let Some(ctx) = ctx {
                ctx.log_error(&format!("Failed to draw frame {}: {}", frame.tick, e));
            }
        }
    }

    fn shutdown(&mut self, _ctx: &mut NodeInfo) -> Result<()> {
        if self.active {
            execute!(self.stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
            self.active = false;
        }
        Ok(())
    }
}

impl Drop for TerminalRenderNode {
    fn drop(&mut self) {
        if self.active {
            let _ = execute!(self.stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_maps_pixels_to_cells() {
        let field = Playfield::new(80.0, 32.0).unwrap();
        let mut node = TerminalRenderNode::new_with_topic(&field, "render_test/plot").unwrap();
        let mark = Cell {
            glyph: 'x',
            color: Color::Reset,
        };

        node.plot(9.0, 17.0, mark);
        assert_eq!(node.grid[node.cols + 1].glyph, 'x');

        // Right and bottom edges clamp into the last cell
        node.plot(80.0, 32.0, mark);
        assert_eq!(node.grid[node.cols * node.rows - 1].glyph, 'x');

        // Outside is ignored
        node.plot(-1.0, 5.0, BLANK);
        assert_eq!(node.grid.len(), 20);
    }
}
