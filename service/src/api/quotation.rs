use super::{Ack, required};
use crate::error::{ApiError, Result, ServiceError};
use crate::state::AppState;
use axum::{Json, extract::State};
use serde::Deserialize;
use tally::QuotationRequest;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationRequest {
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "zipCode")]
    pub zip_code: Option<String>,
}

impl RegistrationRequest {
    fn validate(self) -> Result<QuotationRequest> {
        match (required(self.email), required(self.address), required(self.zip_code)) {
            (Some(email), Some(address), Some(zip_code)) => {
                Ok(QuotationRequest::new(email, address, zip_code))
            }
            _ => Err(ServiceError::MissingFields(
                "Missing required fields: email, address, zipCode",
            )),
        }
    }
}

/// Renders the customer's quotation and mails it as an attachment.
pub async fn send_registration_email(
    State(state): State<AppState>,
    Json(body): Json<RegistrationRequest>,
) -> std::result::Result<Json<Ack>, ApiError> {
    deliver_quotation(&state, body)
        .await
        .map_err(|e| e.context("Failed to send email"))?;
    Ok(Json(Ack::new(
        "Registration email sent successfully with PDF quotation",
    )))
}

async fn deliver_quotation(state: &AppState, body: RegistrationRequest) -> Result<()> {
    let request = body.validate()?;

    let path = {
        let _permit = state
            .render_permits
            .acquire()
            .await
            .map_err(|_| ServiceError::Internal("render limiter closed".into()))?;
        state.renderer.render(&request).await?
    };
    tracing::info!("Generated quotation {}", path.display());

    let pdf = tokio::fs::read(&path).await?;
    let email = state.templates.quotation(&request, &pdf)?;
    // On failure the file stays behind for the sweeper.
    state.mailer.send(&email).await?;
    tracing::info!(to = %request.email, "Quotation email sent");

    if let Err(e) = state.renderer.store().delete(&path).await {
        tracing::warn!("Failed to delete {}: {}", path.display(), e);
    }
    Ok(())
}
