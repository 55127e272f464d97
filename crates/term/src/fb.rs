//! Glyph canvas for the terminal view.
//!
//! Coordinates are terminal cells, `(x, y)` from the top-left corner. Every
//! write is clipped to the canvas, so the view can draw a panel that only
//! partly fits without checking bounds itself.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

const INK: Rgb = Rgb::new(220, 220, 220);
const PAPER: Rgb = Rgb::new(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Style {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    /// Default ink on a dark background.
    pub const fn ink(fg: Rgb) -> Self {
        Self::new(fg, PAPER)
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Same pen over another background.
    pub const fn on(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::ink(INK)
    }
}

/// One terminal cell: a character and how to paint it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph {
        ch: ' ',
        style: Style::ink(INK),
    };
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change the size; contents are blanked.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(usize::from(width) * usize::from(height), Glyph::BLANK);
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::BLANK);
    }

    fn slot(&mut self, x: u16, y: u16) -> Option<&mut Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs
            .get_mut(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        if x >= self.width {
            return None;
        }
        self.row(y).get(usize::from(x)).copied()
    }

    /// Glyphs of row `y`, left to right (empty past the bottom edge).
    pub fn row(&self, y: u16) -> &[Glyph] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.width);
        &self.glyphs[start..start + usize::from(self.width)]
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(slot) = self.slot(x, y) {
            *slot = Glyph { ch, style };
        }
    }

    /// Write `text` from `x`; returns the column after the last character.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut cx = x;
        for ch in text.chars() {
            self.put_char(cx, y, ch, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    /// Write `text` centered within `[x, x + width)`.
    pub fn put_str_centered(&mut self, x: u16, width: u16, y: u16, text: &str, style: Style) {
        let len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        self.put_str(x.saturating_add(width.saturating_sub(len) / 2), y, text, style);
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: Style) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Single-line box whose outer size is `w x h`.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, style: Style) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);
        self.fill_rect(x + 1, y, w - 2, 1, '─', style);
        self.fill_rect(x + 1, bottom, w - 2, 1, '─', style);
        self.fill_rect(x, y + 1, 1, h - 2, '│', style);
        self.fill_rect(right, y + 1, 1, h - 2, '│', style);
        self.put_char(x, y, '┌', style);
        self.put_char(right, y, '┐', style);
        self.put_char(x, bottom, '└', style);
        self.put_char(right, bottom, '┘', style);
    }

    /// `[████░░░░]` bar with `inner` cells, the first `ratio * inner` filled.
    ///
    /// Any non-zero ratio shows at least one filled cell.
    pub fn gauge(&mut self, x: u16, y: u16, inner: u16, ratio: f32, full: Style, empty: Style) {
        let ratio = ratio.clamp(0.0, 1.0);
        let filled = ((ratio * f32::from(inner)).ceil() as u16).min(inner);
        let frame = Style::default();
        self.put_char(x, y, '[', frame);
        self.fill_rect(x + 1, y, filled, 1, '█', full);
        self.fill_rect(x + 1 + filled, y, inner - filled, 1, '░', empty);
        self.put_char(x + 1 + inner, y, ']', frame);
    }

    /// Characters only, one line per row (tests, debugging).
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.glyphs.len() + usize::from(self.height));
        for y in 0..self.height {
            out.extend(self.row(y).iter().map(|g| g.ch));
            out.push('\n');
        }
        out
    }
}
