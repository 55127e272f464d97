//! TerminalRenderer: puts frames on the terminal with crossterm.
//!
//! Each frame is compared row by row against the one already on screen.
//! Changed glyphs are grouped into spans, and spans separated by a short
//! unchanged gap are merged: reprinting a few glyphs is cheaper than another
//! cursor move. Style escapes are only sent for the parts of the pen that
//! actually change.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

/// Unchanged glyphs allowed between two changes of the same span.
const MERGE_GAP: u16 = 4;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Frame currently on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Raw mode, alternate screen, hidden cursor, mouse reporting on.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(terminal::SetTitle("Tile Rush"))?
            .queue(terminal::DisableLineWrap)?
            .queue(cursor::Hide)?
            .queue(EnableMouseCapture)?;
        self.flush()
    }

    /// Undo `enter`, leaving the shell as it was.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(DisableMouseCapture)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(ResetColor)?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (resize, external output).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand the previously shown frame back through `fb`.
    ///
    /// The caller redraws into the returned buffer, so steady-state frames
    /// allocate nothing.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut spare = match self.shown.take() {
            Some(shown) if shown.width() == fb.width() && shown.height() == fb.height() => {
                encode_diff_into(&shown, fb, &mut self.buf)?;
                shown
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush()?;
        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Repaint every row of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        print_glyphs(out, &mut pen, fb.row(y))?;
    }
    pen.reset(out)
}

/// Encode only what differs between `prev` (on screen) and `next`.
///
/// Both frames must have the same size. Nothing is written when they match.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for y in 0..next.height() {
        let row = next.row(y);
        for span in changed_spans(prev.row(y), row) {
            out.queue(cursor::MoveTo(span.start, y))?;
            print_glyphs(out, &mut pen, &row[usize::from(span.start)..usize::from(span.end)])?;
        }
    }
    pen.reset(out)
}

/// Column ranges of `next` that must be reprinted to turn `prev` into it.
fn changed_spans(prev: &[Glyph], next: &[Glyph]) -> Vec<Range<u16>> {
    let mut spans: Vec<Range<u16>> = Vec::new();
    for (x, _) in prev.iter().zip(next).enumerate().filter(|(_, (a, b))| a != b) {
        let x = x as u16;
        match spans.last_mut() {
            Some(last) if x - last.end <= MERGE_GAP => last.end = x + 1,
            _ => spans.push(x..x + 1),
        }
    }
    spans
}

/// Runs of one style go out as a single `Print`.
fn print_glyphs(out: &mut Vec<u8>, pen: &mut Pen, glyphs: &[Glyph]) -> Result<()> {
    let mut text = String::with_capacity(glyphs.len());
    for glyph in glyphs {
        if pen.style != Some(glyph.style) {
            if !text.is_empty() {
                out.queue(Print(&text))?;
                text.clear();
            }
            pen.set(out, glyph.style)?;
        }
        text.push(glyph.ch);
    }
    if !text.is_empty() {
        out.queue(Print(&text))?;
    }
    Ok(())
}

/// The terminal's current drawing style, as far as this frame knows.
#[derive(Default)]
struct Pen {
    style: Option<Style>,
}

impl Pen {
    fn set(&mut self, out: &mut Vec<u8>, next: Style) -> Result<()> {
        let prev = self.style.replace(next);
        if prev.map(|s| s.bold) != Some(next.bold) {
            let weight = if next.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            out.queue(SetAttribute(weight))?;
        }
        if prev.map(|s| s.fg) != Some(next.fg) {
            out.queue(SetForegroundColor(color(next.fg)))?;
        }
        if prev.map(|s| s.bg) != Some(next.bg) {
            out.queue(SetBackgroundColor(color(next.bg)))?;
        }
        Ok(())
    }

    /// Leave the terminal in its default style if this frame changed it.
    fn reset(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(SetAttribute(Attribute::Reset))?.queue(ResetColor)?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(text: &str) -> Vec<Glyph> {
        text.chars()
            .map(|ch| Glyph {
                ch,
                style: Style::default(),
            })
            .collect()
    }

    #[test]
    fn test_nearby_changes_share_a_span() {
        let prev = glyphs("............");
        let next = glyphs(".A.B......C.");
        assert_eq!(changed_spans(&prev, &next), vec![1..4, 10..11]);
    }

    #[test]
    fn test_style_change_alone_is_a_change() {
        let prev = glyphs("BU");
        let mut next = prev.clone();
        next[1].style = Style::default().bold();
        assert_eq!(changed_spans(&prev, &next), vec![1..2]);
    }

    #[test]
    fn test_identical_frames_encode_nothing() {
        let mut a = FrameBuffer::new(6, 2);
        a.put_str(0, 0, "COMBO", Style::default());
        let b = a.clone();

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_one_style_run_sets_colors_once() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "CA", Style::default());
        fb.put_str(0, 1, "TR", Style::default());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("\x1b[38;2;").count(), 1);
        assert!(text.contains("CA  "));
        assert!(text.contains("TR  "));
    }

    #[test]
    fn test_draw_swap_only_sends_changes() {
        let mut term = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(8, 2);
        fb.put_str(0, 0, "TICKETS", Style::default());
        term.draw_swap(&mut fb).unwrap();
        let first = term.writer().len();
        assert!(String::from_utf8_lossy(term.writer()).contains("TICKETS"));

        // Same picture again: nothing to send.
        fb.clear();
        fb.put_str(0, 0, "TICKETS", Style::default());
        term.draw_swap(&mut fb).unwrap();
        assert_eq!(term.writer().len(), first);

        fb.clear();
        fb.put_str(0, 0, "TICKETS", Style::default());
        fb.put_char(0, 1, '9', Style::default());
        term.draw_swap(&mut fb).unwrap();
        let sent = String::from_utf8_lossy(&term.writer()[first..]).into_owned();
        assert!(sent.contains('9'));
        assert!(!sent.contains("TICKETS"));
    }

    #[test]
    fn test_invalidate_forces_full_repaint() {
        let mut term = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(5, 1);
        fb.put_str(0, 0, "LEVEL", Style::default());
        term.draw_swap(&mut fb).unwrap();
        let first = term.writer().len();

        term.invalidate();
        fb.put_str(0, 0, "LEVEL", Style::default());
        term.draw_swap(&mut fb).unwrap();
        assert!(String::from_utf8_lossy(&term.writer()[first..]).contains("LEVEL"));
    }
}
