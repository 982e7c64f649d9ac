use std::sync::Arc;
use std::time::Duration;
use tally_service::{
    build_router,
    config::ServiceConfig,
    mail::{LogMailer, Mailer, SendGridMailer},
    state::AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("Starting quotation service...");

    let config = ServiceConfig::load()?;
    tracing::info!("Configuration loaded");

    let mailer: Arc<dyn Mailer> = match &config.mail.sendgrid_api_key {
        Some(key) => Arc::new(SendGridMailer::new(
            key.clone(),
            config.mail.sendgrid_endpoint.clone(),
            Duration::from_secs(config.mail.request_timeout_secs),
        )),
        None => {
            tracing::warn!("SENDGRID_API_KEY not set; emails will be logged, not sent");
            Arc::new(LogMailer)
        }
    };
    tracing::info!("Sending as {}", config.mail.from_email);

    let state = AppState::new(config.clone(), mailer)
        .map_err(|e| anyhow::anyhow!("Failed to compile email templates: {}", e))?;

    // Sweeps once now, then on every interval for the life of the process.
    let store = state.renderer.store();
    tracing::info!(
        "Sweeping {} every {:?} for files older than {:?}",
        store.dir().display(),
        config.storage.sweep_interval(),
        store.max_age()
    );
    let _sweeper = store.spawn_sweeper(config.storage.sweep_interval());

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Quotation service listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - POST /api/send-registration-email");
    tracing::info!("  - POST /api/send-payment-confirmation");
    tracing::info!("  - POST /api/send-appointment-confirmation");
    tracing::info!("  - GET  /api/health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tally_service=debug,tally=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
