//! Grid overlay rendering.
//!
//! The algorithm is a single pass: allocate a fully transparent layer the
//! size of the base image, draw every grid line and its label onto that
//! layer, then source-over composite the layer onto a copy of the base.
//! Pixels the overlay never touches keep their original color and alpha.
//!
//! The renderer is pure: no logging, no global state, and the caller's image
//! is never mutated.

use crate::glyphs::GlyphSource;
use crate::types::{Axis, GridLayout, GridStyle};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Distance of labels from the image edge, along the axis of the line.
const LABEL_MARGIN: i32 = 10;
/// Padding around the measured text box of the backing rectangle.
const LABEL_PAD: i32 = 2;
/// Near-white label backing; keeps text legible on any underlying image.
const LABEL_BG: Rgba<u8> = Rgba([255, 255, 255, 200]);
const LABEL_FG: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Render the grid described by `style` over `base` and return the
/// composited image. Line positions are derived from the base dimensions;
/// see [`GridLayout::compute`].
pub fn render_grid(base: &RgbaImage, style: &GridStyle, glyphs: &dyn GlyphSource) -> RgbaImage {
    let layout = GridLayout::compute(base.width(), base.height(), style.spacing);
    render_with_layout(base, style, &layout, glyphs)
}

/// Render with a precomputed layout (shared with logging/JSON reporting).
pub fn render_with_layout(
    base: &RgbaImage,
    style: &GridStyle,
    layout: &GridLayout,
    glyphs: &dyn GlyphSource,
) -> RgbaImage {
    let (width, height) = base.dimensions();
    let mut overlay = RgbaImage::new(width, height);
    let stroke = Rgba([style.color[0], style.color[1], style.color[2], style.opacity]);

    // Strokes are top/left-aligned at the line offset and clipped at the
    // image edges; the label anchor at offset + thickness + 2 clears them.
    for line in &layout.lines {
        match line.axis {
            Axis::Horizontal => {
                let rect = Rect::at(0, line.offset as i32).of_size(width, style.thickness);
                draw_filled_rect_mut(&mut overlay, rect, stroke);
                let y = (line.offset + style.thickness) as i32 + 2;
                draw_label(&mut overlay, glyphs, LABEL_MARGIN, y, &line.label);
            }
            Axis::Vertical => {
                let rect = Rect::at(line.offset as i32, 0).of_size(style.thickness, height);
                draw_filled_rect_mut(&mut overlay, rect, stroke);
                let x = (line.offset + style.thickness) as i32 + 2;
                draw_label(&mut overlay, glyphs, x, LABEL_MARGIN, &line.label);
            }
        }
    }

    let mut out = base.clone();
    imageops::overlay(&mut out, &overlay, 0, 0);
    out
}

fn draw_label(canvas: &mut RgbaImage, glyphs: &dyn GlyphSource, x: i32, y: i32, text: &str) {
    let (tw, th) = glyphs.text_size(text);
    let bg = Rect::at(x - LABEL_PAD, y - LABEL_PAD)
        .of_size(tw + 2 * LABEL_PAD as u32, th + 2 * LABEL_PAD as u32);
    draw_filled_rect_mut(canvas, bg, LABEL_BG);
    glyphs.draw_text(canvas, x, y, LABEL_FG, text);
}
