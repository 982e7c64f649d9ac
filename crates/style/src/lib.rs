pub mod dimension;
pub mod font;
pub mod metrics;
pub mod text;
pub mod theme;

pub use dimension::{Margins, PageSize};
pub use font::{BuiltinFont, FontStyle, FontWeight};
pub use metrics::text_width;
pub use text::{TextAlign, TextDecoration, TextStyle};
pub use theme::{Bands, Palette, Spacing, Theme, Typography};
