//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{AppliedSwap, BoardLayout, BoardState, GameSnapshot};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{CellPos, PointerPos, TileKind};

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

const PANEL_GAP: u16 = 2;
const HEALTH_BAR_W: u16 = 12;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const TEXT: Style = Style::ink(Rgb::new(200, 200, 200));
const LABEL: Style = TEXT.bold();

/// Terminal renderer for the tile board and encounter panel.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Glyphs are about twice as tall as they are wide.
        Self { tile_w: 4, tile_h: 2 }
    }
}

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(2),
            tile_h: tile_h.max(1),
        }
    }

    /// Top-left corner of the board frame (border included).
    fn frame_origin(&self, rows: usize, cols: usize, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(rows, cols);
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    fn frame_size(&self, rows: usize, cols: usize) -> (u16, u16) {
        let w = (cols as u16).saturating_mul(self.tile_w).saturating_add(2);
        let h = (rows as u16).saturating_mul(self.tile_h).saturating_add(2);
        (w, h)
    }

    /// Pointer layout matching where tiles are drawn for this viewport.
    ///
    /// Terminal mouse coordinates fed through this layout land on the tile
    /// drawn under the cursor.
    pub fn board_layout(&self, rows: usize, cols: usize, viewport: Viewport) -> BoardLayout {
        let (x, y) = self.frame_origin(rows, cols, viewport);
        BoardLayout::new(
            PointerPos::new(i32::from(x) + 1, i32::from(y) + 1),
            u32::from(self.tile_w),
            u32::from(self.tile_h),
        )
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_hint(snap, None, viewport, fb);
    }

    pub fn render_into_with_hint(
        &self,
        snap: &GameSnapshot,
        hint: Option<AppliedSwap>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let (x, y) = self.frame_origin(snap.rows, snap.cols, viewport);
        let (w, h) = self.frame_size(snap.rows, snap.cols);
        let frame = BoardFrame {
            x,
            y,
            w,
            h,
            tile_w: self.tile_w,
            tile_h: self.tile_h,
        };

        fb.draw_box(frame.x, frame.y, frame.w, frame.h, Style::default());
        for row in 0..snap.rows {
            for col in 0..snap.cols {
                let pos = CellPos::new(row, col);
                match snap.cell(pos) {
                    Some(kind) => frame.draw_tile(fb, pos, kind),
                    None => frame.draw_empty(fb, pos),
                }
            }
        }

        if let Some(hint) = hint {
            let style = Style::new(Rgb::new(120, 240, 120), BOARD_BG).bold();
            frame.draw_marker(fb, hint.from, style);
            frame.draw_marker(fb, hint.to, style);
        }
        if let Some(drag) = snap.drag {
            let start = Style::new(Rgb::new(255, 255, 255), BOARD_BG).bold();
            let hover = Style::new(Rgb::new(255, 220, 80), BOARD_BG).bold();
            if drag.hover != drag.start {
                frame.draw_marker(fb, drag.hover, hover);
            }
            frame.draw_marker(fb, drag.start, start);
        }

        draw_side_panel(fb, snap, viewport, frame.x.saturating_add(frame.w), frame.y);

        if snap.complete {
            draw_victory(fb, snap, &frame);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }
}

/// Where the board frame landed for one render.
struct BoardFrame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    tile_w: u16,
    tile_h: u16,
}

impl BoardFrame {
    /// Screen position of a tile's top-left glyph.
    fn tile_origin(&self, pos: CellPos) -> (u16, u16) {
        (
            self.x + 1 + pos.col as u16 * self.tile_w,
            self.y + 1 + pos.row as u16 * self.tile_h,
        )
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, pos: CellPos, kind: TileKind) {
        let (px, py) = self.tile_origin(pos);
        let style = Style::new(Rgb::new(20, 20, 20), tile_color(kind)).bold();
        fb.fill_rect(px, py, self.tile_w, self.tile_h, ' ', style);
        fb.put_str_centered(px, self.tile_w, py + (self.tile_h - 1) / 2, tile_label(kind), style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, pos: CellPos) {
        let (px, py) = self.tile_origin(pos);
        let style = Style::new(Rgb::new(90, 90, 100), BOARD_BG);
        fb.fill_rect(px, py, self.tile_w, self.tile_h, '·', style);
    }

    /// Corner brackets around a tile.
    fn draw_marker(&self, fb: &mut FrameBuffer, pos: CellPos, style: Style) {
        let (px, py) = self.tile_origin(pos);
        let right = px + self.tile_w - 1;
        let bottom = py + self.tile_h - 1;
        if self.tile_h == 1 {
            fb.put_char(px, py, '[', style);
            fb.put_char(right, py, ']', style);
            return;
        }
        fb.put_char(px, py, '┏', style);
        fb.put_char(right, py, '┓', style);
        fb.put_char(px, bottom, '┗', style);
        fb.put_char(right, bottom, '┛', style);
    }
}

fn draw_side_panel(
    fb: &mut FrameBuffer,
    snap: &GameSnapshot,
    viewport: Viewport,
    frame_right: u16,
    top: u16,
) {
    let x = frame_right.saturating_add(PANEL_GAP);
    if x >= viewport.width || viewport.width - x < HEALTH_BAR_W + 2 {
        return;
    }

    fb.put_str(x, top, "OPPONENT", LABEL);
    fb.put_str(x, top + 1, snap.opponent.display_name(), TEXT);
    let full = Style::ink(Rgb::new(220, 60, 60));
    let empty = Style::ink(Rgb::new(70, 70, 70));
    fb.gauge(x, top + 2, HEALTH_BAR_W, snap.health_ratio(), full, empty);
    let health = format!("{}/{}", snap.opponent_health, snap.max_health);
    fb.put_str(x, top + 3, &health, TEXT);

    let mut y = top + 5;
    for (label, value) in [
        ("LEVEL", format!("{}/{}", snap.level, snap.last_level)),
        ("TICKETS", snap.score.to_string()),
        ("COMBO", snap.combo.to_string()),
    ] {
        fb.put_str(x, y, label, LABEL);
        fb.put_str(x, y + 1, &value, TEXT);
        y += 3;
    }

    if snap.last_damage > 0 {
        let flash = Style::ink(Rgb::new(255, 90, 90)).bold();
        let end = fb.put_str(x, y, "CRASH! +", flash);
        fb.put_str(end, y, &snap.last_damage.to_string(), flash);
    }
    if snap.board_state == BoardState::Settling {
        fb.put_str(x, y + 1, "settling...", TEXT);
    }
}

fn draw_victory(fb: &mut FrameBuffer, snap: &GameSnapshot, frame: &BoardFrame) {
    let style = Style::ink(Rgb::new(255, 255, 255)).bold();
    let tickets = format!("TICKETS {}", snap.score);
    let top = (frame.y + frame.h / 2).saturating_sub(1);
    for (i, text) in ["VICTORY!", tickets.as_str(), "r: again  q: quit"].iter().enumerate() {
        fb.put_str_centered(frame.x, frame.w, top + i as u16, text, style);
    }
}

fn tile_color(kind: TileKind) -> Rgb {
    match kind {
        TileKind::Car => Rgb::new(220, 80, 80),
        TileKind::Scooter => Rgb::new(255, 165, 0),
        TileKind::Bus => Rgb::new(240, 220, 80),
        TileKind::Train => Rgb::new(80, 120, 220),
        TileKind::Bike => Rgb::new(100, 220, 120),
    }
}

fn tile_label(kind: TileKind) -> &'static str {
    match kind {
        TileKind::Car => "CA",
        TileKind::Scooter => "SC",
        TileKind::Bus => "BU",
        TileKind::Train => "TR",
        TileKind::Bike => "BI",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_points_at_drawn_tiles() {
        let view = GameView::default();
        let vp = Viewport::new(80, 24);
        let layout = view.board_layout(5, 6, vp);

        // Frame is 26x12, centered: origin (27, 6), tiles start one in.
        assert_eq!(layout.origin, PointerPos::new(28, 7));
        assert_eq!(
            layout.cell_at(PointerPos::new(28 + 4 * 2 + 3, 7 + 2 * 4 + 1), 5, 6),
            Some(CellPos::new(4, 2))
        );
        // The border itself is not a tile.
        assert_eq!(layout.cell_at(PointerPos::new(27, 7), 5, 6), None);
    }

    #[test]
    fn test_tile_colors_are_distinct() {
        for a in TileKind::ALL {
            for b in TileKind::ALL {
                if a != b {
                    assert_ne!(tile_color(a), tile_color(b));
                }
            }
        }
    }
}
