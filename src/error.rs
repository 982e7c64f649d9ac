use tally_layout::LayoutError;
use tally_render_lopdf::RenderError;
use thiserror::Error;

/// Everything that can stop a quotation from reaching disk.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
