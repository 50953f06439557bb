//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb, TextAlign};
use crate::scores::{Leaderboard, NameEntry, NAME_LEN};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, ROW_COLLAPSE_UNITS};

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

/// What covers the well, if anything.
#[derive(Debug, Clone, Copy, Default)]
pub enum Overlay<'a> {
    #[default]
    None,
    /// Demo running behind a title.
    Attract,
    GameOver,
    Scores(&'a Leaderboard),
    NameEntry(&'a NameEntry),
}

/// Session state shown next to the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewStatus<'a> {
    pub auto_play: bool,
    pub overlay: Overlay<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Bordered frame around the well for this viewport.
    pub fn frame_rect(&self, viewport: Viewport) -> Rect {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Rect::new(x, y, w, h)
    }

    /// Render a plain game frame into an existing framebuffer.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_status(snap, &ViewStatus::default(), viewport, fb);
    }

    /// Render the game plus side panel and overlay.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into_with_status(
        &self,
        snap: &GameSnapshot,
        status: &ViewStatus<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame_rect(viewport);
        let well = frame.inset(1);
        fb.fill_rect(well, ' ', CellStyle { bg: WELL_BG, ..CellStyle::default() });
        draw_border(fb, frame, CellStyle::fg(Rgb::new(200, 200, 200)));

        match status.overlay {
            Overlay::Scores(board) => draw_leaderboard(fb, well, board),
            Overlay::NameEntry(entry) => draw_name_entry(fb, well, entry),
            _ => {
                self.draw_well(fb, well, snap);
                match status.overlay {
                    Overlay::Attract => {
                        draw_banner(fb, well, "BLOCKFALL\n\nPRESS ENTER")
                    }
                    Overlay::GameOver => draw_banner(fb, well, "GAME OVER"),
                    _ => {}
                }
            }
        }

        self.draw_side_panel(fb, snap, status, viewport, frame);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, status: &ViewStatus<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_status(snap, status, viewport, &mut fb);
        fb
    }

    fn draw_well(&self, fb: &mut FrameBuffer, well: Rect, snap: &GameSnapshot) {
        let dot = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: WELL_BG,
            bold: false,
            dim: true,
        };
        for y in 0..BOARD_HEIGHT as i16 {
            for x in 0..BOARD_WIDTH as i16 {
                self.draw_tile(fb, well, x, y, '·', dot);
            }
        }

        // Locked cells; rows still collapsing are drawn lifted.
        for (y, row) in snap.board.iter().enumerate() {
            let lift = snap.row_offsets[y].div_ceil(ROW_COLLAPSE_UNITS) as i16;
            for (x, &cell) in row.iter().enumerate() {
                if let Some(kind) = PieceKind::from_cell_id(cell) {
                    self.draw_tile(fb, well, x as i16, y as i16 - lift, '█', piece_style(kind, false));
                }
            }
        }

        let Some(active) = snap.active else {
            return;
        };
        let shape = get_shape(active.kind, active.rotation);

        if let Some(ghost_y) = snap.ghost_y {
            let ghost = CellStyle {
                fg: Rgb::new(140, 140, 140),
                bg: WELL_BG,
                bold: false,
                dim: true,
            };
            for &(dx, dy) in &shape {
                let (x, y) = (active.x + dx, ghost_y + dy);
                self.draw_tile(fb, well, x.into(), y.into(), '░', ghost);
            }
        }

        for &(dx, dy) in &shape {
            let (x, y) = (active.x + dx, active.y + dy);
            self.draw_tile(fb, well, x.into(), y.into(), '█', piece_style(active.kind, true));
        }
    }

    /// One board cell; cells outside the grid are skipped.
    fn draw_tile(&self, fb: &mut FrameBuffer, well: Rect, x: i16, y: i16, ch: char, style: CellStyle) {
        if !(0..BOARD_WIDTH as i16).contains(&x) || !(0..BOARD_HEIGHT as i16).contains(&y) {
            return;
        }
        let rect = Rect::new(
            well.x + x as u16 * self.cell_w,
            well.y + y as u16 * self.cell_h,
            self.cell_w,
            self.cell_h,
        );
        fb.fill_rect(rect, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        status: &ViewStatus<'_>,
        viewport: Viewport,
        frame: Rect,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for (dx, dy) in get_shape(snap.next, Rotation::R0) {
            let rect = Rect::new(
                panel_x + dx as u16 * self.cell_w,
                y + dy as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
            );
            fb.fill_rect(rect, '█', CellStyle { bg: Rgb::new(0, 0, 0), ..piece_style(snap.next, false) });
        }
        y += 2 * self.cell_h + 1;

        fb.put_str(panel_x, y, "AUTO", label);
        fb.put_str(panel_x, y + 1, if status.auto_play { "ON" } else { "OFF" }, value);
        y += 3;

        if snap.last_clear_was_quad {
            fb.put_str(panel_x, y, "STREAK", CellStyle::fg(Rgb::new(255, 200, 60)));
        }
    }
}

fn piece_style(kind: PieceKind, bold: bool) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
    };
    CellStyle {
        fg,
        bg: WELL_BG,
        bold,
        dim: false,
    }
}

fn draw_border(fb: &mut FrameBuffer, r: Rect, style: CellStyle) {
    if r.w < 2 || r.h < 2 {
        return;
    }
    let (right, bottom) = (r.x + r.w - 1, r.y + r.h - 1);

    fb.put_char(r.x, r.y, '┌', style);
    fb.put_char(right, r.y, '┐', style);
    fb.put_char(r.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);

    for x in r.x + 1..right {
        fb.put_char(x, r.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in r.y + 1..bottom {
        fb.put_char(r.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}

fn draw_banner(fb: &mut FrameBuffer, well: Rect, text: &str) {
    let style = CellStyle {
        fg: Rgb::new(255, 255, 255),
        bg: Rgb::new(0, 0, 0),
        bold: true,
        dim: false,
    };
    fb.draw_text(well, text, TextAlign::CenterCenter, style);
}

/// "SCORES" heading, then one row per entry: name left, score right.
pub fn draw_leaderboard(fb: &mut FrameBuffer, rect: Rect, board: &Leaderboard) {
    let heading = CellStyle {
        bold: true,
        bg: WELL_BG,
        ..CellStyle::default()
    };
    let line = CellStyle { bg: WELL_BG, ..CellStyle::default() };

    fb.draw_text(rect, "SCORES", TextAlign::TopCenter, heading);
    for (i, entry) in board.entries().iter().enumerate() {
        let row = rect.row(i as u16 + 2);
        if row.y >= rect.y + rect.h {
            break;
        }
        fb.draw_text(row, &entry.name, TextAlign::TopLeft, line);
        fb.draw_text(row, &entry.score.to_string(), TextAlign::TopRight, line);
    }
}

/// Prompt, the name slots with arrows over and under the cursor, and a hint.
pub fn draw_name_entry(fb: &mut FrameBuffer, rect: Rect, entry: &NameEntry) {
    let text = CellStyle { bg: WELL_BG, ..CellStyle::default() };
    let letters = CellStyle { bold: true, ..text };

    let name_w = NAME_LEN as u16 * 2 - 1;
    let x0 = rect.x + rect.w.saturating_sub(name_w) / 2;
    let y = rect.y + rect.h / 2;

    let above = Rect::new(rect.x, rect.y, rect.w, y.saturating_sub(rect.y + 1));
    fb.draw_text(above, "ENTER NAME:", TextAlign::CenterCenter, text);

    for (i, ch) in entry.chars().enumerate() {
        fb.put_char(x0 + i as u16 * 2, y, ch, letters);
    }
    let cx = x0 + entry.cursor() as u16 * 2;
    fb.put_char(cx, y - 1, '▲', text);
    fb.put_char(cx, y + 1, '▼', text);

    let below = Rect::new(rect.x, y + 2, rect.w, (rect.y + rect.h).saturating_sub(y + 2));
    fb.draw_text(below, "PRESS ENTER\nTO CONTINUE", TextAlign::CenterCenter, text);
}
