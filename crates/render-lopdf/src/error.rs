use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF object error: {0}")]
    Pdf(#[from] lopdf::Error),
    /// A PDF needs at least one page; layout never produces zero.
    #[error("document has no pages")]
    NoPages,
}
