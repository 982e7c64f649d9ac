//! Word measurement and greedy line breaking for the built-in fonts.

pub mod shaper;
pub mod wrapper;

pub use shaper::{ShapedWord, TextRun, shape_runs};
pub use wrapper::{LineItem, LineLayout, break_lines};
