#![forbid(unsafe_code)]

//! Cell grid the host draws into before flushing to the terminal.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Writes outside the grid are dropped, never wrapped.
//! 3. A double-width glyph occupies its cell plus one continuation cell.

use std::io::{self, Write};

use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, queue};
use envswitch_core::geometry::Rect;
use envswitch_widgets::trigger::Rgb;
use unicode_width::UnicodeWidthChar;

/// Placeholder stored in the cell covered by the right half of a wide glyph.
const CONTINUATION: char = '\0';

/// Rectangle in whole cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest cell rectangle covering the visible part of `rect`.
    ///
    /// Parts left of or above the origin are cut off.
    #[must_use]
    pub fn covering(rect: Rect) -> Self {
        let left = rect.x.max(0.0).floor();
        let top = rect.y.max(0.0).floor();
        let right = rect.right().max(0.0).ceil();
        let bottom = rect.bottom().max(0.0).ceil();
        let clamp = |v: f32| v.min(f32::from(u16::MAX)) as u16;
        Self::new(
            clamp(left),
            clamp(top),
            clamp(right - left),
            clamp(bottom - top),
        )
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Visual attributes of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
    pub reverse: bool,
}

impl CellStyle {
    #[must_use]
    pub const fn colors(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            bold: false,
            reverse: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// A 2D grid of terminal cells.
#[derive(Debug, Clone)]
pub struct CellBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl CellBuffer {
    /// Create a blank buffer. Zero dimensions give an empty grid.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Reallocate for a new terminal size. Contents are cleared.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    /// Clear all cells to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Set a single cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill a region with blanks of the given style.
    pub fn fill(&mut self, rect: CellRect, style: CellStyle) {
        let right = rect.right().min(self.width);
        let bottom = rect.bottom().min(self.height);
        for y in rect.y..bottom {
            for x in rect.x..right {
                self.set(x, y, Cell { ch: ' ', style });
            }
        }
    }

    /// Write `text` starting at (`x`, `y`), clipped to `max_width` columns.
    ///
    /// Returns the number of columns written.
    pub fn put_str(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        style: CellStyle,
        max_width: u16,
    ) -> u16 {
        let mut col = 0u16;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col + w > max_width {
                break;
            }
            self.set(x.saturating_add(col), y, Cell { ch, style });
            if w == 2 {
                self.set(
                    x.saturating_add(col + 1),
                    y,
                    Cell {
                        ch: CONTINUATION,
                        style,
                    },
                );
            }
            col += w;
        }
        col
    }

    /// Visible text of row `y`, trailing blanks kept.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = usize::from(y) * usize::from(self.width);
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .filter(|c| c.ch != CONTINUATION)
            .map(|c| c.ch)
            .collect()
    }

    /// Returns true if any row contains `needle`.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    /// Write the whole grid to `out`.
    pub fn flush(&self, out: &mut impl Write) -> io::Result<()> {
        for y in 0..self.height {
            queue!(out, cursor::MoveTo(0, y))?;
            let mut current: Option<CellStyle> = None;
            for x in 0..self.width {
                let Some(cell) = self.get(x, y) else {
                    continue;
                };
                if cell.ch == CONTINUATION {
                    continue;
                }
                if current != Some(cell.style) {
                    apply_style(out, cell.style)?;
                    current = Some(cell.style);
                }
                queue!(out, Print(cell.ch))?;
            }
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

fn apply_style(out: &mut impl Write, style: CellStyle) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(to_color(fg)))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(to_color(bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut buf = CellBuffer::new(4, 2);
        buf.set(4, 0, Cell { ch: 'x', ..Cell::default() });
        buf.set(0, 2, Cell { ch: 'x', ..Cell::default() });
        assert!(!buf.contains_text("x"));
    }

    #[test]
    fn put_str_clips_and_handles_wide_glyphs() {
        let mut buf = CellBuffer::new(10, 1);
        let written = buf.put_str(0, 0, "ab日c", CellStyle::default(), 4);
        assert_eq!(written, 4);
        assert_eq!(buf.row_text(0), "ab日      ");
    }

    #[test]
    fn covering_clips_negative_origin() {
        let rect = CellRect::covering(Rect::new(-2.0, 1.5, 4.0, 1.0));
        assert_eq!(rect, CellRect::new(0, 1, 2, 2));
        assert!(rect.contains(1, 2));
        assert!(!rect.contains(2, 2));
    }

    #[test]
    fn flush_emits_text() {
        let mut buf = CellBuffer::new(3, 1);
        buf.put_str(0, 0, "EN", CellStyle::default(), 3);
        let mut out = Vec::new();
        buf.flush(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("EN"));
    }

    #[test]
    fn zero_sized_buffer_is_inert() {
        let mut buf = CellBuffer::new(0, 0);
        buf.fill(CellRect::new(0, 0, 5, 5), CellStyle::default());
        assert_eq!(buf.row_text(0), "");
        let mut out = Vec::new();
        buf.flush(&mut out).unwrap();
    }
}
