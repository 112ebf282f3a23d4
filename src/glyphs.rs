//! Label glyph rendering.
//!
//! The renderer only needs two operations from a font: measure a string and
//! draw it. Both sit behind the [`GlyphSource`] trait so the TrueType path
//! ([`TrueTypeGlyphs`], backed by `ab_glyph` + `imageproc`) and the built-in
//! 5x7 bitmap fallback ([`BitmapGlyphs`]) are interchangeable.
//! [`resolve_glyphs`] walks an ordered list of system font paths and degrades
//! to the bitmap font with a warning when none of them loads.

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs;
use std::path::Path;

/// Label font size in pixels for a given grid spacing.
pub fn font_size_for_spacing(spacing: u32) -> u32 {
    (spacing / 5).clamp(12, 24)
}

/// A glyph renderer for label text.
pub trait GlyphSource {
    /// Width and height of `text` when drawn by this source.
    fn text_size(&self, text: &str) -> (u32, u32);

    /// Draw `text` with its top-left corner at `(x, y)`. Pixels outside the
    /// canvas are clipped.
    fn draw_text(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str);
}

/// TrueType-backed glyph source.
pub struct TrueTypeGlyphs {
    font: FontVec,
    scale: PxScale,
}

impl TrueTypeGlyphs {
    /// Load a font file at the given pixel size.
    pub fn from_file(path: &Path, size: u32) -> Result<Self, String> {
        let data =
            fs::read(path).map_err(|e| format!("Failed to read font {}: {e}", path.display()))?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| format!("Failed to parse font {}: {e}", path.display()))?;
        Ok(Self {
            font,
            scale: PxScale::from(size as f32),
        })
    }
}

impl GlyphSource for TrueTypeGlyphs {
    fn text_size(&self, text: &str) -> (u32, u32) {
        text_size(self.scale, &self.font, text)
    }

    fn draw_text(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

/// Font files tried in order by [`resolve_glyphs`].
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Windows/Fonts/arial.ttf",
];

/// Pick a glyph source for the given font size.
///
/// Tries the system font candidates in order; if none can be read and
/// parsed, warns and returns the built-in bitmap font so rendering still
/// proceeds.
pub fn resolve_glyphs(size: u32) -> Box<dyn GlyphSource> {
    for candidate in SYSTEM_FONT_CANDIDATES {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match TrueTypeGlyphs::from_file(path, size) {
            Ok(glyphs) => {
                log::debug!("Using font {}", path.display());
                return Box::new(glyphs);
            }
            Err(err) => log::debug!("{err}"),
        }
    }
    log::warn!("Could not load a TrueType font, using built-in bitmap glyphs");
    Box::new(BitmapGlyphs::for_font_size(size))
}

/// Built-in 5x7 bitmap font covering `0`-`9` and `A`-`Z`, integer-scaled.
pub struct BitmapGlyphs {
    scale: u32,
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

impl BitmapGlyphs {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Scale factor approximating the requested font pixel size.
    pub fn for_font_size(size: u32) -> Self {
        Self::new(size / GLYPH_HEIGHT)
    }

    fn advance(&self) -> u32 {
        (GLYPH_WIDTH + 1) * self.scale
    }
}

impl GlyphSource for BitmapGlyphs {
    fn text_size(&self, text: &str) -> (u32, u32) {
        let n = text.chars().count() as u32;
        if n == 0 {
            return (0, 0);
        }
        (n * self.advance() - self.scale, GLYPH_HEIGHT * self.scale)
    }

    fn draw_text(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        let mut cx = x;
        for ch in text.chars() {
            if let Some(rows) = glyph_rows(ch.to_ascii_uppercase()) {
                draw_bitmap_glyph(canvas, cx, y, &rows, color, self.scale);
            }
            cx += self.advance() as i32;
        }
    }
}

fn draw_bitmap_glyph(
    canvas: &mut RgbaImage,
    x: i32,
    y: i32,
    rows: &[u8; 7],
    color: Rgba<u8>,
    scale: u32,
) {
    let (w, h) = canvas.dimensions();
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                continue;
            }
            let px = x + (col * scale) as i32;
            let py = y + (row as u32 * scale) as i32;
            for dy in 0..scale {
                for dx in 0..scale {
                    let sx = px + dx as i32;
                    let sy = py + dy as i32;
                    if sx >= 0 && sy >= 0 && (sx as u32) < w && (sy as u32) < h {
                        canvas.put_pixel(sx as u32, sy as u32, color);
                    }
                }
            }
        }
    }
}

#[rustfmt::skip]
fn glyph_rows(ch: char) -> Option<[u8; 7]> {
    // 5 bits per row, bit 4 leftmost.
    Some(match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        _ => return None,
    })
}
