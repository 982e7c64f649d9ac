use crate::brand::Brand;
use crate::document::QuotationDocument;
use crate::error::QuoteError;
use crate::quotation::{LineItem, Quotation, QuotationRequest, default_catalog};
use crate::storage::TempStore;
use chrono::Local;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tally_render_lopdf::{DocumentInfo, PdfRenderer};
use tally_style::Theme;

/// Renders quotations and persists them to a [`TempStore`].
///
/// Cheap to clone; every clone shares the same theme, brand and catalog.
#[derive(Debug, Clone)]
pub struct QuotationRenderer {
    theme: Arc<Theme>,
    brand: Arc<Brand>,
    catalog: Arc<Vec<LineItem>>,
    store: TempStore,
}

impl QuotationRenderer {
    pub fn new(store: TempStore) -> Self {
        Self {
            theme: Arc::new(Theme::default()),
            brand: Arc::new(Brand::default()),
            catalog: Arc::new(default_catalog()),
            store,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Arc::new(theme);
        self
    }

    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brand = Arc::new(brand);
        self
    }

    pub fn with_catalog(mut self, catalog: Vec<LineItem>) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn store(&self) -> &TempStore {
        &self.store
    }

    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    /// A quotation for `request` over the configured catalog, dated today.
    pub fn quotation_for(&self, request: &QuotationRequest) -> Quotation {
        Quotation::new(
            request.clone(),
            self.catalog.as_ref().clone(),
            Local::now().date_naive(),
        )
    }

    pub fn render_to_bytes(&self, quotation: &Quotation) -> Result<Vec<u8>, QuoteError> {
        let pages = QuotationDocument::new(&self.theme, &self.brand).layout(quotation)?;
        let info = DocumentInfo {
            title: Some(self.brand.document_title.clone()),
            author: Some(self.brand.name.clone()),
            subject: Some(format!("Quotation for {}", quotation.request.email)),
            creation_date: Some(Local::now().format("D:%Y%m%d%H%M%S").to_string()),
        };
        Ok(PdfRenderer::new(info).render_to_vec(&pages)?)
    }

    /// Lays out and serialises the quotation off the async executor, then
    /// writes it to a fresh file in the store.
    pub async fn render(&self, request: &QuotationRequest) -> Result<PathBuf, QuoteError> {
        let quotation = self.quotation_for(request);
        let this = self.clone();
        let bytes = tokio::task::spawn_blocking(move || this.render_to_bytes(&quotation)).await??;
        let path = self.store.write(&bytes).await?;
        info!("Rendered quotation to {}", path.display());
        Ok(path)
    }
}
