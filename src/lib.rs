#![doc = include_str!("../README.md")]

pub mod config;
pub mod glyphs;
pub mod io;
pub mod labels;
pub mod render;
pub mod types;

// --- High-level re-exports -------------------------------------------------

pub use crate::render::{render_grid, render_with_layout};
pub use crate::types::{Axis, GridLayout, GridLine, GridStyle};

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::glyphs::GlyphSource;
    pub use crate::render::render_grid;
    pub use crate::types::{GridLayout, GridStyle};
}
