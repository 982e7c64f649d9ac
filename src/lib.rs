//! Quotation documents for a home-cleaning business.
//!
//! A [`QuotationRenderer`] turns a customer's contact details into a
//! paginated PDF and stores it in a [`TempStore`], where it waits to be
//! attached to an email and deleted. Files that are never collected are
//! removed by the store's periodic sweep.

pub mod brand;
pub mod document;
pub mod error;
pub mod link;
pub mod quotation;
pub mod renderer;
pub mod storage;

pub use brand::Brand;
pub use document::QuotationDocument;
pub use error::QuoteError;
pub use quotation::{LineItem, Quotation, QuotationRequest, default_catalog};
pub use renderer::QuotationRenderer;
pub use storage::{SweepReport, TempStore};

pub use tally_style::Theme;
pub use tally_types::Money;
