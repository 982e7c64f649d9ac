use crate::config::ServiceConfig;
use crate::mail::{EmailTemplates, Mailer};
use std::sync::Arc;
use tally::{QuotationRenderer, TempStore};
use tokio::sync::Semaphore;

/// Shared application state accessible to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub renderer: QuotationRenderer,

    pub mailer: Arc<dyn Mailer>,

    pub templates: Arc<EmailTemplates>,

    /// Limits concurrent renders so a burst of requests cannot pile up
    /// layout work on the blocking pool.
    pub render_permits: Arc<Semaphore>,

    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(
        config: ServiceConfig,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, handlebars::TemplateError> {
        let store = TempStore::new(&config.storage.output_dir).with_max_age(config.storage.max_age());
        let renderer = QuotationRenderer::new(store)
            .with_theme(config.theme.clone())
            .with_brand(config.brand.clone())
            .with_catalog(config.catalog.clone());
        let templates = EmailTemplates::new(
            config.brand.clone(),
            config.mail.from_email.clone(),
            config.mail.partner_url.clone(),
        )?;
        let render_permits = Arc::new(Semaphore::new(config.concurrency.max_concurrent_renders.max(1)));

        Ok(Self {
            renderer,
            mailer,
            templates: Arc::new(templates),
            render_permits,
            config: Arc::new(config),
        })
    }
}
