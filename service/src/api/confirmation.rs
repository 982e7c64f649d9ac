use super::{Ack, required};
use crate::error::{ApiError, Result, ServiceError};
use crate::mail::{AppointmentConfirmation, PaymentConfirmation};
use crate::state::AppState;
use axum::{Json, extract::State};
use chrono::Local;
use serde::Deserialize;
use tally::Money;

fn missing_fields() -> ServiceError {
    ServiceError::MissingFields("Missing required fields")
}

fn required_amount(amount: Option<Money>) -> Option<Money> {
    amount.filter(|a| *a != Money::ZERO)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentRequest {
    pub email: Option<String>,
    pub quotation_id: Option<String>,
    pub service: Option<String>,
    pub service_date: Option<String>,
    pub customer_name: Option<String>,
    pub amount: Option<Money>,
    pub payment_date: Option<String>,
}

impl PaymentRequest {
    fn validate(self) -> Result<PaymentConfirmation> {
        let (Some(email), Some(quotation_id), Some(service), Some(customer_name), Some(amount)) = (
            required(self.email),
            required(self.quotation_id),
            required(self.service),
            required(self.customer_name),
            required_amount(self.amount),
        ) else {
            return Err(missing_fields());
        };

        Ok(PaymentConfirmation {
            email,
            quotation_id,
            service,
            service_date: required(self.service_date).unwrap_or_else(|| "To be scheduled".into()),
            customer_name,
            amount,
            payment_date: required(self.payment_date)
                .unwrap_or_else(|| Local::now().format("%B %-d, %Y").to_string()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub email: Option<String>,
    pub appointment_id: Option<String>,
    pub quotation_id: Option<String>,
    pub service: Option<String>,
    pub amount: Option<Money>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
}

impl AppointmentRequest {
    fn validate(self) -> Result<AppointmentConfirmation> {
        let (
            Some(email),
            Some(appointment_id),
            Some(quotation_id),
            Some(service),
            Some(amount),
            Some(appointment_date),
            Some(appointment_time),
            Some(customer_name),
        ) = (
            required(self.email),
            required(self.appointment_id),
            required(self.quotation_id),
            required(self.service),
            required_amount(self.amount),
            required(self.appointment_date),
            required(self.appointment_time),
            required(self.customer_name),
        )
        else {
            return Err(missing_fields());
        };

        Ok(AppointmentConfirmation {
            email,
            appointment_id,
            quotation_id,
            service,
            amount,
            appointment_date,
            appointment_time,
            customer_name,
            phone_number: required(self.phone_number).unwrap_or_else(|| "Not provided".into()),
        })
    }
}

/// Sends the payment receipt and the partner promotion side by side.
pub async fn send_payment_confirmation(
    State(state): State<AppState>,
    Json(body): Json<PaymentRequest>,
) -> std::result::Result<Json<Ack>, ApiError> {
    let summary = "Failed to send payment confirmation email";
    let payment = body.validate().map_err(|e| e.context(summary))?;

    let send = async {
        let receipt = state.templates.payment(&payment)?;
        let promotion = state
            .templates
            .promotion(&payment.email, &payment.customer_name)?;
        tokio::try_join!(state.mailer.send(&receipt), state.mailer.send(&promotion))?;
        Ok::<_, ServiceError>(())
    };
    send.await.map_err(|e| e.context(summary))?;

    tracing::info!(to = %payment.email, quotation = %payment.quotation_id, "Payment confirmation sent");
    Ok(Json(Ack::new("Payment confirmation email sent successfully")))
}

pub async fn send_appointment_confirmation(
    State(state): State<AppState>,
    Json(body): Json<AppointmentRequest>,
) -> std::result::Result<Json<Ack>, ApiError> {
    let summary = "Failed to send appointment confirmation email";
    let appointment = body.validate().map_err(|e| e.context(summary))?;

    let email = state
        .templates
        .appointment(&appointment)
        .map_err(|e| ServiceError::from(e).context(summary))?;
    state
        .mailer
        .send(&email)
        .await
        .map_err(|e| ServiceError::from(e).context(summary))?;

    tracing::info!(
        to = %appointment.email,
        appointment = %appointment.appointment_id,
        "Appointment confirmation sent"
    );
    Ok(Json(Ack::new("Appointment confirmation email sent successfully")))
}
