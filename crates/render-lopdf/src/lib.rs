//! Streaming PDF output for laid-out pages using lopdf.
//!
//! Pages are written with the standard Helvetica faces and WinAnsi-encoded
//! text. Text elements that carry an `href` become URI link annotations.

mod annotations;
mod content;
mod error;
mod renderer;
mod writer;

pub use content::{PageContext, to_win_ansi};
pub use error::RenderError;
pub use renderer::{DocumentInfo, PdfRenderer};
pub use writer::StreamingPdfWriter;
