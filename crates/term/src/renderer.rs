//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Each frame is compared with the previous one row by row. Only the span
//! between the first and last changed glyph of a row is rewritten, which keeps
//! a falling piece down to a couple of short writes per frame.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
    entered: bool,
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
            prev: None,
            buf: Vec::with_capacity(16 * 1024),
            entered: false,
        }
    }

    /// Raw mode plus alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`enter`](Self::enter). Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (terminal resize).
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Draw `fb`, writing only what changed since the last call.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.prev.as_ref(), fb, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }

        match self.prev.as_mut() {
            Some(prev) => prev.clone_from(fb),
            None => self.prev = Some(fb.clone()),
        }
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `prev` into `next` on screen. Without a
/// previous frame (or after a size change) the whole screen is repainted.
///
/// Returns the number of glyphs written; nothing at all is emitted when the
/// frames are equal.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut written = 0;
    let mut style: Option<Style> = None;
    for y in 0..next.height() {
        let row = next.row(y);
        let span = match prev {
            Some(p) => changed_span(p.row(y), row),
            None => Some((0, row.len())),
        };
        let Some((start, end)) = span else {
            continue;
        };

        out.queue(cursor::MoveTo(start as u16, y))?;
        for glyph in &row[start..end] {
            if style != Some(glyph.style) {
                apply_style(out, glyph.style)?;
                style = Some(glyph.style);
            }
            out.queue(Print(glyph.ch))?;
        }
        written += end - start;
    }

    if style.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(written)
}

/// Half-open range covering every differing glyph, `None` when equal.
fn changed_span(prev: &[Glyph], next: &[Glyph]) -> Option<(usize, usize)> {
    let start = prev.iter().zip(next).position(|(a, b)| a != b)?;
    let end = prev.iter().zip(next).rposition(|(a, b)| a != b)? + 1;
    Some((start, end))
}

fn apply_style(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
