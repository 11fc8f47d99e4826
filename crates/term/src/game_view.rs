//! GameView: paints a [`SessionSnapshot`] into a framebuffer.
//!
//! Pure (no I/O). The board is drawn from the snapshot's render grid, which
//! already has the active piece overlaid.

use crate::core::{Phase, SessionSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::palette;
use crate::types::{Mood, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
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

const PANEL_W: u16 = 22;
const FLAVOR_LINES: u16 = 4;

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly compensates for terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// Top-left corner of the board frame inside `viewport`
    pub fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let total_w = frame_w + 2 + PANEL_W;
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = viewport.height.saturating_sub(frame_h) / 2;
        (x, y)
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Render one frame into `fb`, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        mood: Mood,
        flavor: &str,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (x0, y0) = self.board_origin(viewport);
        let (frame_w, frame_h) = self.frame_size();

        self.draw_border(fb, x0, y0, frame_w, frame_h);
        for (y, row) in snap.grid.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                self.draw_cell(fb, x0, y0, x as u16, y as u16, value);
            }
        }

        self.draw_panel(fb, snap, mood, flavor, x0 + frame_w + 2, y0);

        match snap.phase {
            Phase::GameOver => {
                self.draw_overlay(fb, x0, y0, frame_w, frame_h, "GAME OVER", "R to retry")
            }
            Phase::Idle if !snap.is_active => {
                self.draw_overlay(fb, x0, y0, frame_w, frame_h, "PET TETRIS", "R to start")
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        mood: Mood,
        flavor: &str,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, mood, flavor, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::new(palette::GRID, Rgb::default());
        fb.put_char(x, y, '╭', style);
        fb.put_char(x + w - 1, y, '╮', style);
        fb.put_char(x, y + h - 1, '╰', style);
        fb.put_char(x + w - 1, y + h - 1, '╯', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, x: u16, y: u16, value: u8) {
        let px = x0 + 1 + x * self.cell_w;
        let py = y0 + 1 + y;
        match palette::for_cell(value) {
            Some((fill, edge)) => {
                let style = CellStyle::new(edge, fill);
                fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
                // Deeper right edge gives each block a rounded look.
                fb.put_char(px + self.cell_w - 1, py, '▕', style);
            }
            None => {
                let style = CellStyle::new(palette::GRID, palette::EMPTY);
                fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
                fb.put_char(px, py, '·', style);
            }
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        mood: Mood,
        flavor: &str,
        x: u16,
        y: u16,
    ) {
        if x >= fb.width() {
            return;
        }
        let label = CellStyle::new(palette::ACCENT, Rgb::default()).bold();
        let value = CellStyle::new(palette::PAPER, Rgb::default());

        let mut cy = y + 1;
        for (name, n) in [("SCORE", snap.score), ("LINES", snap.lines), ("PIECES", snap.pieces)] {
            fb.put_str(x, cy, name, label);
            fb.put_u32(x, cy + 1, n, value);
            cy += 3;
        }

        fb.put_str(x, cy, "STATE", label);
        fb.put_str(x, cy + 1, snap.phase.as_str(), value);
        cy += 3;

        fb.put_str(x, cy, "MOOD", label);
        fb.put_str(x, cy + 1, mood.as_str(), value);
        cy += 3;

        if !flavor.is_empty() {
            let speech = CellStyle::new(palette::INK, palette::PAPER);
            let width = PANEL_W.min(fb.width() - x);
            fb.fill_rect(x, cy, width, FLAVOR_LINES, ' ', speech);
            fb.put_wrapped(x, cy, width, FLAVOR_LINES, flavor, speech);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        y0: u16,
        frame_w: u16,
        frame_h: u16,
        title: &str,
        hint: &str,
    ) {
        let mid = y0 + frame_h / 2;
        let title_style = CellStyle::new(palette::ACCENT, palette::PAPER).bold();
        let hint_style = CellStyle::new(palette::INK, palette::PAPER);
        for (dy, text, style) in [(0, title, title_style), (1, hint, hint_style)] {
            let w = text.chars().count() as u16;
            let x = x0 + frame_w.saturating_sub(w) / 2;
            fb.put_str(x, mid - 1 + dy, text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    const VIEW: Viewport = Viewport {
        width: 80,
        height: 24,
    };

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        fb.row(y).iter().map(|c| c.ch).collect()
    }

    fn contains(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| row_text(fb, y).contains(needle))
    }

    #[test]
    fn board_cells_use_piece_colors() {
        let view = GameView::default();
        let mut snap = SessionSnapshot {
            is_active: true,
            phase: Phase::Falling,
            ..SessionSnapshot::default()
        };
        snap.grid[19][0] = PieceKind::O.type_id();

        let fb = view.render(&snap, Mood::Mentor, "", VIEW);
        let (x0, y0) = view.board_origin(VIEW);
        let filled = fb.get(x0 + 1, y0 + 20).unwrap();
        assert_eq!(filled.style.bg, palette::fill(PieceKind::O));
        let empty = fb.get(x0 + 3, y0 + 20).unwrap();
        assert_eq!(empty.style.bg, palette::EMPTY);
    }

    #[test]
    fn panel_shows_score_mood_and_flavor() {
        let view = GameView::default();
        let snap = SessionSnapshot {
            score: 300,
            lines: 3,
            is_active: true,
            phase: Phase::Falling,
            ..SessionSnapshot::default()
        };
        let fb = view.render(&snap, Mood::Happy, "Rebuilding the tower!", VIEW);
        assert!(contains(&fb, "SCORE"));
        assert!(contains(&fb, "300"));
        assert!(contains(&fb, "MOOD"));
        assert!(contains(&fb, "HAPPY"));
        assert!(contains(&fb, "Rebuilding the"));
        assert!(!contains(&fb, "GAME OVER"));
    }

    #[test]
    fn game_over_overlay() {
        let view = GameView::default();
        let snap = SessionSnapshot {
            phase: Phase::GameOver,
            ..SessionSnapshot::default()
        };
        let fb = view.render(&snap, Mood::Shy, "", VIEW);
        assert!(contains(&fb, "GAME OVER"));
        assert!(contains(&fb, "SHY"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&SessionSnapshot::default(), Mood::Mentor, "hi", Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
