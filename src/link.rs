//! Customer-facing URLs that carry the customer's email address.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Page where the customer can view and manage their quotation.
pub fn quotation_url(base: &str, email: &str) -> String {
    format!("{}/quotation?email={}", base.trim_end_matches('/'), encode_component(email))
}

/// Landing page linked from the quotation email.
pub fn landing_url(base: &str, email: &str) -> String {
    format!("{}/?email={}", base.trim_end_matches('/'), encode_component(email))
}

/// Checkout page for a booked appointment.
pub fn payment_url(base: &str, appointment_id: &str) -> String {
    format!(
        "{}/payments?appointment={}",
        base.trim_end_matches('/'),
        encode_component(appointment_id)
    )
}
