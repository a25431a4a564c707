//! # Glyph Rasterizer
//!
//! Turns characters into 8x8 bitmaps and text into normalized pixel
//! positions.
//!
//! Coordinates are normalized per glyph cell: the first character covers
//! `x ∈ [0, 1)`, the second `x ∈ [1, 2)`, and so on. Each line break moves
//! one unit down (`y` grows downwards, like the bitmap rows).
//!
//! Characters outside `1..=127` rasterize as a blank cell. They still
//! advance the cursor, so unknown characters read as spaces.

mod basic;

use std::str::Chars;

use basic::FONT8X8_BASIC;

/// Glyph width in pixels.
pub const GLYPH_WIDTH: u32 = 8;

/// Glyph height in pixels.
pub const GLYPH_HEIGHT: u32 = 8;

/// Size of one pixel in normalized glyph units.
const PIXEL_PITCH: f32 = 1.0 / GLYPH_WIDTH as f32;

/// An 8x8 bitmap: one byte per row, top row first, bit 0 = leftmost pixel.
pub type GlyphBitmap = [u8; 8];

/// Returns `true` for characters the font can draw.
///
/// NUL is valid ASCII but always renders empty.
#[inline]
#[must_use]
pub fn is_valid_glyph(letter: char) -> bool {
    matches!(u32::from(letter), 1..=127)
}

/// Returns the bitmap of a character, or an all-zero bitmap for characters
/// outside the font.
#[must_use]
pub fn glyph_bitmap(letter: char) -> GlyphBitmap {
    if is_valid_glyph(letter) {
        FONT8X8_BASIC[letter as usize]
    } else {
        [0; 8]
    }
}

/// Returns one row of a character's bitmap. Rows outside the glyph are
/// empty.
#[must_use]
pub fn scan_line(letter: char, row: u32) -> u8 {
    if row < GLYPH_HEIGHT {
        glyph_bitmap(letter)[row as usize]
    } else {
        0
    }
}

/// Iterates the lit pixels of one character, row by row.
#[must_use]
pub fn lit_pixels(letter: char) -> LitPixels {
    LitPixels::new(glyph_bitmap(letter))
}

/// Iterates the normalized positions of every lit pixel of `text`.
///
/// The iterator is lazy and finite. It is the only input of particle
/// generation.
#[must_use]
pub fn text_pixels(text: &str) -> TextPixels<'_> {
    TextPixels {
        chars: text.chars(),
        cursor_x: 0,
        cursor_y: 0,
        current: None,
    }
}

/// Number of positions [`text_pixels`] yields for `text`.
#[must_use]
pub fn lit_pixel_count(text: &str) -> usize {
    text.chars()
        .map(|c| {
            glyph_bitmap(c)
                .iter()
                .map(|row| row.count_ones() as usize)
                .sum::<usize>()
        })
        .sum()
}

/// Lit pixel coordinates `(x, y)` of a single glyph.
#[derive(Debug, Clone)]
pub struct LitPixels {
    bitmap: GlyphBitmap,
    /// Next pixel to test, `y * 8 + x`.
    index: u32,
}

impl LitPixels {
    fn new(bitmap: GlyphBitmap) -> Self {
        Self { bitmap, index: 0 }
    }
}

impl Iterator for LitPixels {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < GLYPH_WIDTH * GLYPH_HEIGHT {
            let x = self.index % GLYPH_WIDTH;
            let y = self.index / GLYPH_WIDTH;
            self.index += 1;

            if self.bitmap[y as usize] & (1 << x) != 0 {
                return Some((x, y));
            }
        }
        None
    }
}

/// Normalized pixel positions of a whole text.
#[derive(Debug, Clone)]
pub struct TextPixels<'a> {
    chars: Chars<'a>,
    cursor_x: u32,
    cursor_y: u32,
    /// Glyph being walked and the cell it sits in.
    current: Option<(LitPixels, u32, u32)>,
}

impl Iterator for TextPixels<'_> {
    type Item = (f32, f32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((pixels, cell_x, cell_y)) = &mut self.current {
                if let Some((x, y)) = pixels.next() {
                    return Some((
                        *cell_x as f32 + x as f32 * PIXEL_PITCH,
                        *cell_y as f32 + y as f32 * PIXEL_PITCH,
                    ));
                }
                self.current = None;
            }

            let letter = self.chars.next()?;
            if letter == '\n' {
                self.cursor_x = 0;
                self.cursor_y += 1;
            } else {
                self.current = Some((lit_pixels(letter), self.cursor_x, self.cursor_y));
                self.cursor_x += 1;
            }
        }
    }
}
