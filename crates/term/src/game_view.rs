//! GameView: lays out the board, control help and overlays in a framebuffer.
//!
//! Pure (no I/O), so layouts are unit-tested directly.

use crate::core::GridSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Message box drawn over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Paused,
    GameOver,
}

impl Overlay {
    /// Title and hint line.
    fn text(self) -> Option<(&'static str, &'static str)> {
        match self {
            Overlay::None => None,
            Overlay::Paused => Some(("PAUSED", "P to resume")),
            Overlay::GameOver => Some(("GAME OVER", "ENTER to restart")),
        }
    }
}

const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PEEK_BG: Rgb = Rgb::new(18, 18, 24);
const EMPTY_FG: Rgb = Rgb::new(90, 90, 100);
const TEXT: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const HEADING: CellStyle = CellStyle::fg(Rgb::new(235, 235, 235)).bold();
const BANNER: CellStyle = CellStyle::fg(Rgb::new(255, 255, 255)).bold();

const HELP: [(&str, &str); 7] = [
    ("←/→", "move"),
    ("↓", "soft drop"),
    ("↑/X", "rotate right"),
    ("Z", "rotate left"),
    ("SPACE", "hard drop"),
    ("P", "pause"),
    ("Q", "quit"),
];
const HELP_KEY_W: u16 = 6;
const HELP_MIN_W: u16 = 18;

/// Board renderer.
///
/// Cells are `cell_w` columns by `cell_h` rows, centered in the viewport. The
/// lowest `peek_rows` hidden rows are drawn dimmed above the visible field so
/// freshly spawned pieces can be seen.
pub struct GameView {
    cell_w: u16,
    cell_h: u16,
    peek_rows: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps cells roughly square in most fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            peek_rows: 1,
        }
    }
}

impl GameView {
    /// Framed board rectangle for `snap` inside `viewport`.
    pub fn board_frame(&self, snap: &GridSnapshot, viewport: Viewport) -> Rect {
        let w = snap.num_cols() * self.cell_w + 2;
        let h = self.shown_rows(snap) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;
        Rect::new(x, y, w, h)
    }

    fn hidden_rows(snap: &GridSnapshot) -> u16 {
        snap.num_rows() - snap.visible_rows()
    }

    fn shown_rows(&self, snap: &GridSnapshot) -> u16 {
        snap.visible_rows() + self.peek_rows.min(Self::hidden_rows(snap))
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GridSnapshot,
        overlay: Overlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Default::default());

        let frame = self.board_frame(snap, viewport);
        fb.draw_box(frame, BORDER);
        self.draw_field(snap, frame.inner(), fb);
        self.draw_help(frame, fb);

        if let Some((title, hint)) = overlay.text() {
            let mid = frame.y + frame.h / 2;
            put_centered(fb, frame, mid, title, BANNER);
            put_centered(fb, frame, mid + 1, hint, TEXT);
        }
    }

    pub fn render(&self, snap: &GridSnapshot, overlay: Overlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_field(&self, snap: &GridSnapshot, field: Rect, fb: &mut FrameBuffer) {
        let hidden = Self::hidden_rows(snap);
        let first_row = snap.num_rows() - self.shown_rows(snap);

        for (y, row) in (first_row..snap.num_rows()).enumerate() {
            let peek = row < hidden;
            let bg = if peek { PEEK_BG } else { FIELD_BG };
            for col in 0..snap.num_cols() {
                let cell = match snap.get(row, col) {
                    Some(color) if peek => CellStyle::fg(color).on(bg).dim().into_cell('█'),
                    Some(color) => CellStyle::fg(color).on(bg).bold().into_cell('█'),
                    None if peek => CellStyle::fg(EMPTY_FG).on(bg).into_cell(' '),
                    None => CellStyle::fg(EMPTY_FG).on(bg).dim().into_cell('·'),
                };
                let rect = Rect::new(
                    field.x + col * self.cell_w,
                    field.y + y as u16 * self.cell_h,
                    self.cell_w,
                    self.cell_h,
                );
                fb.fill(rect, cell);
            }
        }
    }

    /// Key help to the right of the board, skipped when it does not fit.
    fn draw_help(&self, frame: Rect, fb: &mut FrameBuffer) {
        let x = frame.right().saturating_add(2);
        if fb.width().saturating_sub(x) < HELP_MIN_W {
            return;
        }

        fb.put_str(x, frame.y, "CONTROLS", HEADING);
        for (i, (key, action)) in HELP.iter().enumerate() {
            let y = frame.y + 1 + i as u16;
            fb.put_str(x, y, key, TEXT);
            fb.put_str(x + HELP_KEY_W, y, action, TEXT.dim());
        }
    }
}

fn put_centered(fb: &mut FrameBuffer, within: Rect, y: u16, s: &str, style: CellStyle) {
    let len = s.chars().count() as u16;
    let x = within.x + within.w.saturating_sub(len) / 2;
    fb.put_str(x, y, s, style);
}
