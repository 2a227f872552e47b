//! TerminalRenderer: flushes framebuffers to a terminal, redrawing only what changed.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};

/// ASCII BEL, the only sound a plain terminal can make.
const BELL: &[u8] = b"\x07";

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Frame currently on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
    bell_pending: bool,
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
            bell_pending: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to repaint everything (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Ring the bell together with the next draw.
    pub fn bell(&mut self) {
        self.bell_pending = true;
    }

    /// Draw `fb`, then swap it with the previously shown frame.
    ///
    /// After the call `fb` holds stale content the caller is expected to
    /// overwrite; no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.shown.as_ref() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(prev, fb, &mut self.buf)?;
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
            }
        }
        if std::mem::take(&mut self.bell_pending) {
            self.buf.extend_from_slice(BELL);
        }
        self.flush_buf()?;

        let mut prev = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        prev.resize(fb.width(), fb.height());
        std::mem::swap(&mut prev, fb);
        self.shown = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a complete repaint of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            pen.print(out, fb.get(x, y).unwrap_or_default())?;
        }
    }
    pen.finish(out)
}

/// Encode only the runs of glyphs that differ between `prev` and `next`.
///
/// Both buffers must have the same dimensions; otherwise a full repaint is encoded.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }
    let mut pen = Pen::default();
    let mut any = false;
    for (x, y, len) in changed_runs(prev, next) {
        any = true;
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            pen.print(out, next.get(x + dx, y).unwrap_or_default())?;
        }
    }
    if any {
        pen.finish(out)?;
    }
    Ok(())
}

/// Tracks the active style so escape codes are only emitted on change.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, glyph: Glyph) -> Result<()> {
        if self.style != Some(glyph.style) {
            apply_style_into(out, glyph.style)?;
            self.style = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Maximal horizontal runs `(x, y, len)` of differing glyphs, row by row.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_runs_coalesce_adjacent_glyphs() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.set(x, 0, style.glyph('X'));
        }
        b.set(5, 1, style.glyph('Y'));

        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let fb = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn draws_full_then_diff_and_rings_bell() {
        let mut r = TerminalRenderer::with_writer(Vec::new());
        let style = CellStyle::default();

        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "abc", style);
        r.draw_swap(&mut fb).unwrap();
        let first = r.writer().len();
        assert!(first > 0);

        fb.put_str(0, 0, "abc", style);
        r.draw_swap(&mut fb).unwrap();
        assert_eq!(r.writer().len(), first, "unchanged frame writes nothing");

        fb.put_str(0, 0, "abd", style);
        r.bell();
        r.draw_swap(&mut fb).unwrap();
        let out = r.writer();
        assert!(out.len() > first);
        assert_eq!(out.last(), Some(&0x07));
    }
}
