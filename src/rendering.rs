use std::io::{self, Write};
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::info;

use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};

// Palette, matching the game's "dirty kid vs soap" theme.
pub const PLAYER_COLOR: Color = Color::Rgb { r: 139, g: 69, b: 19 };
pub const PLAYER_MUDDY_COLOR: Color = Color::Rgb { r: 59, g: 35, b: 20 };
pub const PLAYER_FACE_COLOR: Color = Color::Black;
pub const DIRT_PATCH_COLOR: Color = Color::Rgb { r: 101, g: 67, b: 33 };
pub const BUBBLE_COLOR: Color = Color::Rgb { r: 173, g: 216, b: 230 };
pub const BUBBLE_SHINE_COLOR: Color = Color::White;
pub const MUD_COLOR: Color = Color::Rgb { r: 75, g: 54, b: 33 };
pub const MUD_SPOT_COLOR: Color = Color::Rgb { r: 93, g: 64, b: 55 };
pub const HUD_COLOR: Color = Color::White;

/// Maps logical canvas coordinates onto the terminal cell grid. Row 0 is
/// reserved for the HUD and the last row for the controls line.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    fn field_rows(&self) -> f64 {
        self.rows.saturating_sub(2).max(1) as f64
    }

    pub fn cell_x(&self, x: f64) -> i32 {
        (x * self.cols as f64 / CANVAS_WIDTH).floor() as i32
    }

    pub fn cell_y(&self, y: f64) -> i32 {
        (y * self.field_rows() / CANVAS_HEIGHT).floor() as i32 + 1
    }

    /// Horizontal logical length in cells.
    pub fn len_x(&self, d: f64) -> f64 {
        d * self.cols as f64 / CANVAS_WIDTH
    }

    /// Vertical logical length in cells.
    pub fn len_y(&self, d: f64) -> f64 {
        d * self.field_rows() / CANVAS_HEIGHT
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };

/// Per-frame draw surface: a grid of colored characters composited in memory
/// and flushed to the output target in one pass.
pub struct Canvas {
    cells: Vec<Cell>,
    pub width: u16,
    pub height: u16,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Canvas {
            cells: vec![BLANK; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    pub fn set_cell(&mut self, x: i32, y: i32, ch: char, color: Color) {
        if x >= 0 && y >= 0 && (x as u16) < self.width && (y as u16) < self.height {
            self.cells[y as usize * self.width as usize + x as usize] = Cell { ch, color };
        }
    }

    pub fn char_at(&self, x: u16, y: u16) -> char {
        self.cells[y as usize * self.width as usize + x as usize].ch
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, ch: char, color: Color) {
        for dy in 0..h.max(1) {
            for dx in 0..w.max(1) {
                self.set_cell(x + dx, y + dy, ch, color);
            }
        }
    }

    /// Filled ellipse; radii below half a cell still paint the center cell.
    pub fn fill_ellipse(&mut self, cx: i32, cy: i32, rx: f64, ry: f64, ch: char, color: Color) {
        let rx = rx.max(0.5);
        let ry = ry.max(0.5);
        let span_x = rx.ceil() as i32;
        let span_y = ry.ceil() as i32;
        for dy in -span_y..=span_y {
            for dx in -span_x..=span_x {
                let nx = dx as f64 / rx;
                let ny = dy as f64 / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.set_cell(cx + dx, cy + dy, ch, color);
                }
            }
        }
    }

    pub fn write_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set_cell(x + i as i32, y, ch, color);
        }
    }

    pub fn render(&self, out: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            out.execute_move_to(MoveTo(0, y))?;
            let mut current: Option<Color> = None;
            for x in 0..self.width {
                let cell = self.cells[y as usize * self.width as usize + x as usize];
                if current != Some(cell.color) {
                    out.execute_other_command(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                write!(out, "{}", cell.ch)?;
            }
        }
        out.execute_other_command(ResetColor)?;
        Ok(())
    }

    pub fn clear_screen_manual(
        &self,
        out: &mut OutputTarget,
        terminal_width: u16,
        terminal_height: u16,
    ) -> io::Result<()> {
        for y in 0..terminal_height {
            out.execute_move_to(MoveTo(0, y))?;
            write!(out, "{}", " ".repeat(terminal_width as usize))?;
        }
        out.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

/// In-memory render target for headless debug runs; frames are dumped to the
/// log instead of the terminal. Styling commands are dropped, characters kept.
pub struct ScreenBuffer {
    chars: Vec<char>,
    pub width: u16,
    pub height: u16,
    cursor_x: u16,
    cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            chars: vec![' '; width as usize * height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn set_char(&mut self, x: u16, y: u16, ch: char) {
        if x < self.width && y < self.height {
            self.chars[y as usize * self.width as usize + x as usize] = ch;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.set_char(self.cursor_x, self.cursor_y, ch);
            self.cursor_x += 1;
        }
    }

    pub fn clear(&mut self) {
        self.chars.fill(' ');
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in self.chars.chunks(self.width as usize) {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Either the real terminal or the debug screen buffer.
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}
