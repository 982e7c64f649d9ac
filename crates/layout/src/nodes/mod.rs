//! Block-level building blocks stacked by the engine.

mod container;
mod paragraph;
mod row;
mod spacer;

pub use container::Container;
pub use paragraph::{Paragraph, Span};
pub use row::{Column, ColumnWidth, Row};
pub use spacer::Spacer;
