#![forbid(unsafe_code)]

//! A fixed-size grid of styled cells that models render into.
//!
//! Writes outside the grid are clipped silently.

use unicode_width::UnicodeWidthChar;

/// Terminal colors used by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's default color.
    #[default]
    Reset,
    Black,
    White,
    Grey,
    DarkGrey,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Rgb(u8, u8, u8),
}

/// Foreground, background and weight of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Style {
    /// The default style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            bold: false,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Render in bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The glyph, or `None` for the trailing half of a wide glyph.
    pub ch: Option<char>,
    pub style: Style,
}

impl Cell {
    /// A blank cell.
    pub const BLANK: Self = Self {
        ch: Some(' '),
        style: Style::new(),
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Render target handed to [`Model::view`](crate::Model::view).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    /// Blank frame of the given size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set one cell.
    pub fn set(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell {
                ch: Some(ch),
                style,
            };
        }
    }

    /// Write `text` starting at `(x, y)`; returns the column after the last glyph.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > self.width {
                break;
            }
            self.set(col, y, ch, style);
            if w == 2 {
                if let Some(i) = self.index(col + 1, y) {
                    self.cells[i] = Cell { ch: None, style };
                }
            }
            col += w;
        }
        col
    }

    /// Write `text` horizontally centered on row `y`.
    pub fn put_centered(&mut self, y: u16, text: &str, style: Style) {
        let w = text.chars().map(|c| c.width().unwrap_or(0)).sum::<usize>();
        let x = usize::from(self.width).saturating_sub(w) / 2;
        self.put_str(x as u16, y, text, style);
    }

    /// Fill a rectangle with `ch`.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, height: u16, ch: char, style: Style) {
        for row in y..y.saturating_add(height).min(self.height) {
            for col in x..x.saturating_add(width).min(self.width) {
                self.set(col, row, ch, style);
            }
        }
    }

    /// Cells of row `y`.
    #[must_use]
    pub fn row(&self, y: u16) -> &[Cell] {
        match self.index(0, y) {
            Some(start) => &self.cells[start..start + usize::from(self.width)],
            None => &[],
        }
    }

    /// Plain text of row `y` with trailing blanks trimmed.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let text: String = self.row(y).iter().filter_map(|c| c.ch).collect();
        text.trim_end().to_string()
    }

    /// Whole frame as plain text, one line per row.
    #[must_use]
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
