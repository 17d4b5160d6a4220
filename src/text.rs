//! Glyph based text rendering
//!
//! Fonts are supplied by the caller through [`FontProvider`]. Glyph bitmaps
//! are column-major: each column takes `ceil(height / 8)` bytes, and row `r`
//! of column `c` is bit `r % 8` of byte `c * ceil(height / 8) + r / 8`.

use crate::canvas::Canvas;

/// Bitmap of a single character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph<'a> {
    /// Column-major glyph bits
    pub bitmap: &'a [u8],
    /// Height in pixels
    pub height: usize,
    /// Width in pixels
    pub width: usize,
}

impl<'a> Glyph<'a> {
    /// Glyph of `width` x `height` pixels
    pub const fn new(bitmap: &'a [u8], height: usize, width: usize) -> Self {
        Glyph {
            bitmap,
            height,
            width,
        }
    }

    /// Bytes used by each column
    pub const fn bytes_per_column(&self) -> usize {
        self.height.div_ceil(8)
    }

    /// Bit at `(col, row)`, `None` when the bitmap is too short to hold it
    pub fn bit(&self, col: usize, row: usize) -> Option<bool> {
        let byte = self.bitmap.get(col * self.bytes_per_column() + row / 8)?;
        Some(byte & (1 << (row % 8)) != 0)
    }
}

/// Source of glyphs for text rendering
pub trait FontProvider {
    /// Glyph for `ch`, or `None` when the font does not cover it
    fn lookup(&self, ch: char) -> Option<Glyph<'_>>;
}

impl<F: FontProvider + ?Sized> FontProvider for &F {
    fn lookup(&self, ch: char) -> Option<Glyph<'_>> {
        (**self).lookup(ch)
    }
}

/// Layout options for [`draw_text`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Pixels between characters, also the advance for unknown characters
    pub spacing: i32,
    /// Write the opposite of every glyph bit, clearing the glyph's set pixels
    /// and setting its background
    pub invert: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            spacing: 1,
            invert: false,
        }
    }
}

impl TextStyle {
    /// Normal text with `spacing` pixels between characters
    pub const fn with_spacing(spacing: i32) -> Self {
        TextStyle {
            spacing,
            invert: false,
        }
    }

    /// Same style with inversion switched on or off
    #[must_use]
    pub const fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

/// Render `text` at `(x, y)` and return the cursor position after it.
///
/// Characters without a glyph advance the cursor by `style.spacing` and are
/// otherwise skipped. In normal mode only set glyph bits are written; in
/// inverted mode every cell of the glyph box is written.
pub fn draw_text<C, F>(
    canvas: &mut C,
    text: &str,
    x: i32,
    y: i32,
    font: &F,
    style: TextStyle,
) -> i32
where
    C: Canvas + ?Sized,
    F: FontProvider + ?Sized,
{
    let mut cursor = x;
    for ch in text.chars() {
        let Some(glyph) = font.lookup(ch) else {
            cursor = cursor.saturating_add(style.spacing);
            continue;
        };

        for col in 0..glyph.width {
            for row in 0..glyph.height {
                let Some(bit) = glyph.bit(col, row) else {
                    continue;
                };

                let bx = cursor.saturating_add(col as i32);
                let by = y.saturating_add(row as i32);
                if style.invert {
                    canvas.set(bx, by, !bit);
                } else if bit {
                    canvas.set(bx, by, true);
                }
            }
        }

        cursor = cursor
            .saturating_add(glyph.width as i32)
            .saturating_add(style.spacing);
    }
    cursor
}

/// Width the cursor advances when rendering `text`
pub fn text_width<F: FontProvider + ?Sized>(text: &str, font: &F, spacing: i32) -> i32 {
    text.chars()
        .map(|ch| {
            font.lookup(ch)
                .map_or(0, |g| g.width as i32)
                .saturating_add(spacing)
        })
        .fold(0, i32::saturating_add)
}
