//! Core value types: grid styling parameters and the derived line layout.

use crate::labels::{column_label, row_label};
use serde::{Deserialize, Serialize};

/// Visual parameters of the grid overlay.
///
/// `spacing` and `thickness` must be positive; the CLI layer enforces this
/// before the style reaches the renderer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GridStyle {
    /// Pixels between adjacent grid lines.
    pub spacing: u32,
    /// Line color as an RGB triple.
    pub color: [u8; 3],
    /// Line alpha, 0 (invisible) to 255 (opaque). Applies to lines only;
    /// labels are always drawn opaque.
    pub opacity: u8,
    /// Stroke width in pixels.
    pub thickness: u32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            spacing: 100,
            color: [0, 0, 255],
            opacity: 128,
            thickness: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A single grid line with its display label.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridLine {
    pub axis: Axis,
    /// y coordinate for horizontal lines, x coordinate for vertical ones.
    pub offset: u32,
    /// 0-based index along the axis.
    pub index: usize,
    pub label: String,
}

/// All grid lines for a given image size and spacing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridLayout {
    pub width: u32,
    pub height: u32,
    pub spacing: u32,
    pub lines: Vec<GridLine>,
}

impl GridLayout {
    /// Place lines at every multiple of `spacing` strictly inside the image.
    ///
    /// `height / spacing + 1` (resp. width) is an upper bound on the line
    /// count; any offset landing at or past the far edge is skipped, so a
    /// line at offset 0 always exists and none is ever drawn out of bounds.
    pub fn compute(width: u32, height: u32, spacing: u32) -> Self {
        assert!(spacing > 0, "grid spacing must be positive");
        let mut lines = Vec::new();
        for i in 0..height / spacing + 1 {
            let y = i * spacing;
            if y < height {
                lines.push(GridLine {
                    axis: Axis::Horizontal,
                    offset: y,
                    index: i as usize,
                    label: row_label(i as usize),
                });
            }
        }
        for i in 0..width / spacing + 1 {
            let x = i * spacing;
            if x < width {
                lines.push(GridLine {
                    axis: Axis::Vertical,
                    offset: x,
                    index: i as usize,
                    label: column_label(i as usize),
                });
            }
        }
        Self {
            width,
            height,
            spacing,
            lines,
        }
    }

    pub fn horizontal(&self) -> impl Iterator<Item = &GridLine> {
        self.lines.iter().filter(|l| l.axis == Axis::Horizontal)
    }

    pub fn vertical(&self) -> impl Iterator<Item = &GridLine> {
        self.lines.iter().filter(|l| l.axis == Axis::Vertical)
    }

    /// Number of horizontal lines actually placed.
    pub fn row_count(&self) -> usize {
        self.horizontal().count()
    }

    /// Number of vertical lines actually placed.
    pub fn column_count(&self) -> usize {
        self.vertical().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_skips_far_edge() {
        // 200/100 + 1 = 3 candidates, but offset 200 is out of bounds.
        let layout = GridLayout::compute(200, 200, 100);
        assert_eq!(layout.row_count(), 2);
        assert_eq!(layout.column_count(), 2);
        let offsets: Vec<u32> = layout.vertical().map(|l| l.offset).collect();
        assert_eq!(offsets, vec![0, 100]);
    }

    #[test]
    fn non_multiple_keeps_last_interior_line() {
        let layout = GridLayout::compute(250, 199, 100);
        let xs: Vec<u32> = layout.vertical().map(|l| l.offset).collect();
        let ys: Vec<u32> = layout.horizontal().map(|l| l.offset).collect();
        assert_eq!(xs, vec![0, 100, 200]);
        assert_eq!(ys, vec![0, 100]);
    }

    #[test]
    fn spacing_larger_than_image_leaves_origin_lines() {
        let layout = GridLayout::compute(50, 30, 100);
        assert_eq!(layout.row_count(), 1);
        assert_eq!(layout.column_count(), 1);
        assert!(layout.lines.iter().all(|l| l.offset == 0));
    }

    #[test]
    fn labels_match_axis_scheme() {
        let layout = GridLayout::compute(300, 300, 100);
        let cols: Vec<&str> = layout.vertical().map(|l| l.label.as_str()).collect();
        let rows: Vec<&str> = layout.horizontal().map(|l| l.label.as_str()).collect();
        assert_eq!(cols, vec!["A", "B", "C"]);
        assert_eq!(rows, vec!["1", "2", "3"]);
    }
}
