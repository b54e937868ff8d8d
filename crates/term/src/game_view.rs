//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Phase, PieceKind};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
/// Columns reserved to the right of the board for the panel.
const PANEL_W: u16 = 14;

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

/// Where the board frame sits on screen, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Draws the well, the pieces and the score panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::new(' ', Style::default()));

        let layout = self.layout(snap, viewport);
        let well = Style::plain(Rgb::new(90, 90, 100), WELL_BG).dim();

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.w - 2,
            layout.h - 2,
            ' ',
            well,
        );
        draw_border(fb, layout, Style::plain(Rgb::new(200, 200, 200), SCREEN_BG));

        for row in 0..snap.height {
            for col in 0..snap.width {
                match PieceKind::from_id(snap.cell(col as usize, row as usize)) {
                    Some(kind) => self.draw_block(fb, layout, col as i8, row as i8, kind),
                    None => self.fill_cell(fb, layout, col as i8, row as i8, '·', well),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost = Style::plain(Rgb::new(140, 140, 140), WELL_BG).dim();
            let lift = ghost_y - active.y;
            for (col, row) in active.cells() {
                self.fill_cell(fb, layout, col, row + lift, '░', ghost);
            }
        }

        if let Some(active) = snap.active {
            for (col, row) in active.cells() {
                self.draw_block(fb, layout, col, row, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        let overlay = match snap.phase {
            Phase::Ready => Some("PRESS ENTER"),
            Phase::Paused => Some("PAUSED"),
            Phase::GameOver => Some("GAME OVER"),
            Phase::Running => None,
        };
        if let Some(text) = overlay {
            draw_overlay(fb, layout, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let w = snap.width as u16 * self.cell_w + 2;
        let h = snap.height as u16 * self.cell_h + 2;
        Layout {
            x: viewport.width.saturating_sub(w + PANEL_W) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: Layout, col: i8, row: i8, kind: PieceKind) {
        let style = Style::plain(piece_color(kind), WELL_BG).bold();
        self.fill_cell(fb, layout, col, row, '█', style);
    }

    /// Fill one board cell. Cells above the top edge (negative rows) are not
    /// drawn.
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        col: i8,
        row: i8,
        ch: char,
        style: Style,
    ) {
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as u16, row as u16);
        if (col + 1) * self.cell_w + 2 > layout.w || (row + 1) * self.cell_h + 2 > layout.h {
            return;
        }
        fb.fill_rect(
            layout.x + 1 + col * self.cell_w,
            layout.y + 1 + row * self.cell_h,
            self.cell_w,
            self.cell_h,
            ch,
            style,
        );
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: Layout,
    ) {
        let x = layout.x + layout.w + 2;
        if x >= viewport.width {
            return;
        }

        let label = Style::default().bold();
        let value = Style::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = layout.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(x, y, "SPEED", label);
        let end = fb.put_u32(x, y + 1, snap.drop_interval_ms, value);
        fb.put_str(end, y + 1, "ms", value.dim());
        y += 3;

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        if let Some(next) = snap.next {
            self.draw_preview(fb, x, y, &next);
        }
        y += 3;

        let help = value.dim();
        for line in ["ENTER start", "P pause", "R reset", "Q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, help);
            y += 1;
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &PieceSnapshot) {
        let style = Style::plain(piece_color(piece.kind), SCREEN_BG).bold();
        for (dx, dy) in piece.matrix.occupied() {
            fb.fill_rect(
                x + dx as u16 * self.cell_w,
                y + dy as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: Layout, style: Style) {
    let Layout { x, y, w, h } = layout;
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for cx in x + 1..right {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, layout: Layout, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = layout.x + layout.w.saturating_sub(text_w) / 2;
    let y = layout.y + layout.h / 2;
    fb.put_str(x, y, text, Style::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold());
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
