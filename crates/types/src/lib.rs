pub mod color;
pub mod geometry;
pub mod money;

pub use color::Color;
pub use geometry::{BoxConstraints, Rect, Size};
pub use money::{Money, MoneyParseError};
