//! Character-cell framebuffer.
//!
//! All drawing is clipped to the buffer; nothing here touches the terminal.

pub use crate::types::Rgb;

const DEFAULT_FG: Rgb = Rgb::new(220, 220, 220);
const DEFAULT_BG: Rgb = Rgb::new(0, 0, 0);

/// Colors and attributes of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::fg(DEFAULT_FG)
    }
}

impl CellStyle {
    /// Plain style with the given foreground on black.
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: DEFAULT_BG,
            bold: false,
            dim: false,
        }
    }

    pub const fn on(self, bg: Rgb) -> Self {
        Self { bg, ..self }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// Axis-aligned rectangle in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.h)
    }

    /// Rectangle shrunk by one cell on every side.
    pub fn inner(&self) -> Rect {
        Rect::new(
            self.x.saturating_add(1),
            self.y.saturating_add(1),
            self.w.saturating_sub(2),
            self.h.saturating_sub(2),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut fb = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        };
        fb.resize(width, height);
        fb
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions. The allocation is reused; contents are unspecified
    /// until the next `clear`.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells.resize(width as usize * height as usize, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.offset(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, style.into_cell(ch));
    }

    /// Write `s` left to right, clipped at the right edge. Returns the column
    /// after the last character.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars().take(self.width.saturating_sub(x) as usize) {
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
        cx
    }

    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.set(x, y, cell);
            }
        }
    }

    /// Single-line box drawn on the edge of `rect`.
    pub fn draw_box(&mut self, rect: Rect, style: CellStyle) {
        if rect.w < 2 || rect.h < 2 {
            return;
        }
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);

        for x in x0 + 1..x1 {
            self.put_char(x, y0, '─', style);
            self.put_char(x, y1, '─', style);
        }
        for y in y0 + 1..y1 {
            self.put_char(x0, y, '│', style);
            self.put_char(x1, y, '│', style);
        }
        self.put_char(x0, y0, '┌', style);
        self.put_char(x1, y0, '┐', style);
        self.put_char(x0, y1, '└', style);
        self.put_char(x1, y1, '┘', style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(fb: &FrameBuffer, y: u16) -> String {
        fb.row(y).unwrap().iter().map(|c| c.ch).collect()
    }

    #[test]
    fn writes_outside_are_clipped() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_char(5, 5, 'X', CellStyle::default());
        fb.fill(Rect::new(2, 1, 10, 10), CellStyle::default().into_cell('#'));
        assert_eq!(text(&fb, 0), "   ");
        assert_eq!(text(&fb, 1), "  #");
    }

    #[test]
    fn put_str_returns_end_column() {
        let mut fb = FrameBuffer::new(4, 1);
        assert_eq!(fb.put_str(0, 0, "ab", CellStyle::default()), 2);
        assert_eq!(fb.put_str(2, 0, "cdef", CellStyle::default()), 4);
        assert_eq!(text(&fb, 0), "abcd");
    }

    #[test]
    fn draw_box_corners_and_edges() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.draw_box(Rect::new(0, 0, 4, 3), CellStyle::default());
        assert_eq!(text(&fb, 0), "┌──┐");
        assert_eq!(text(&fb, 1), "│  │");
        assert_eq!(text(&fb, 2), "└──┘");
    }

    #[test]
    fn style_builders_compose() {
        let style = CellStyle::fg(Rgb::new(1, 2, 3)).on(Rgb::new(4, 5, 6)).bold();
        assert_eq!(style.bg, Rgb::new(4, 5, 6));
        assert!(style.bold);
        assert!(!style.dim);
    }

    #[test]
    fn resize_tracks_dimensions() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(4, 3);
        assert_eq!(fb.cells().len(), 12);
        assert!(fb.row(2).is_some());
        assert!(fb.row(3).is_none());
    }
}
