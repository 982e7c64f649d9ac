pub mod confirmation;
pub mod health;
pub mod quotation;

pub use confirmation::{send_appointment_confirmation, send_payment_confirmation};
pub use health::health_check;
pub use quotation::send_registration_email;

use serde::Serialize;

/// Body of every successful response.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: &'static str,
}

impl Ack {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Present and not blank.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
