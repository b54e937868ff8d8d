//! Framebuffer and style types for terminal rendering.

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

/// Per-glyph styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn plain(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::plain(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// One terminal cell: a character and how to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', Style::default())
    }
}

/// Row-major grid of glyphs covering the terminal.
///
/// Writes outside the grid are dropped, so drawing code can clip by simply
/// not caring.
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
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change dimensions, keeping the allocation when it is big enough.
    /// Contents are unspecified afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.glyphs
            .resize(width as usize * height as usize, Glyph::default());
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    /// Glyphs of row `y`; empty when out of range.
    pub fn row(&self, y: u16) -> &[Glyph] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.glyphs[start..start + self.width as usize]
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = Glyph::new(ch, style);
        }
    }

    /// Write `s` left to right starting at `(x, y)`; returns the column after
    /// the last character.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: Style) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
        cx
    }

    /// Decimal rendering of `value` without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: Style) -> u16 {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }

        let mut cx = x;
        for &d in digits[..len].iter().rev() {
            self.put_char(cx, y, d as char, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: Style) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.put_char(col, row, ch, style);
            }
        }
    }

    /// Characters of row `y` as a string (tests and debugging).
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }

    /// Whether `needle` appears anywhere on screen.
    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }
}
