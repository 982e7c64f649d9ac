use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    /// A block taller than the space between the page bands can never be placed.
    #[error("block of height {0:.2}pt does not fit in {1:.2}pt of page content area")]
    ElementTooLarge(f32, f32),
    #[error("row has {cells} cells but only {columns} columns")]
    TooManyCells { cells: usize, columns: usize },
}

pub mod algorithms;
mod elements;
mod engine;
pub mod interface;
pub mod nodes;
pub mod painting;
pub mod text;

pub use self::elements::{LayoutElement, PositionedElement, RectElement, Stroke, TextElement};
pub use self::engine::{BandEdge, BandRepeat, LayoutEngine, Page, PageBand, PageTemplate};
pub use self::interface::{LayoutContext, LayoutNode, Split};
pub use self::nodes::{Column, ColumnWidth, Container, Paragraph, Row, Spacer, Span};

// Re-export geometry types used by nodes from base to prevent type mismatches
pub use tally_types::geometry::{BoxConstraints, Rect, Size};
