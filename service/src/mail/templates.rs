//! Message bodies for every email the service sends.
//!
//! Each message has an HTML part and a plain-text part rendered from the same
//! context. HTML templates escape their inputs; text templates use
//! triple-stash expressions and print them as given.

use super::{Attachment, Email};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use tally::link::{landing_url, payment_url};
use tally::{Brand, Money, QuotationRequest};

pub const QUOTATION_FILENAME: &str = "Molly_Maid_Quotation.pdf";

const TEMPLATES: [(&str, &str); 8] = [
    ("quotation.html", include_str!("../../templates/quotation.html.hbs")),
    ("quotation.txt", include_str!("../../templates/quotation.txt.hbs")),
    ("payment.html", include_str!("../../templates/payment.html.hbs")),
    ("payment.txt", include_str!("../../templates/payment.txt.hbs")),
    ("promotion.html", include_str!("../../templates/promotion.html.hbs")),
    ("promotion.txt", include_str!("../../templates/promotion.txt.hbs")),
    ("appointment.html", include_str!("../../templates/appointment.html.hbs")),
    ("appointment.txt", include_str!("../../templates/appointment.txt.hbs")),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentConfirmation {
    pub email: String,
    pub quotation_id: String,
    pub service: String,
    pub service_date: String,
    pub customer_name: String,
    pub amount: Money,
    pub payment_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentConfirmation {
    pub email: String,
    pub appointment_id: String,
    pub quotation_id: String,
    pub service: String,
    pub amount: Money,
    pub appointment_date: String,
    pub appointment_time: String,
    pub customer_name: String,
    pub phone_number: String,
}

pub struct EmailTemplates {
    registry: Handlebars<'static>,
    brand: Brand,
    from: String,
    partner_url: String,
}

impl EmailTemplates {
    pub fn new(
        brand: Brand,
        from: impl Into<String>,
        partner_url: impl Into<String>,
    ) -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self {
            registry,
            brand,
            from: from.into(),
            partner_url: partner_url.into(),
        })
    }

    fn compose(
        &self,
        name: &str,
        to: &str,
        subject: String,
        context: &serde_json::Value,
    ) -> Result<Email, handlebars::RenderError> {
        Ok(Email {
            to: to.to_string(),
            from: self.from.clone(),
            html: self.registry.render(&format!("{name}.html"), context)?,
            text: self.registry.render(&format!("{name}.txt"), context)?,
            subject,
            attachments: Vec::new(),
        })
    }

    /// The "quotation ready" message with the rendered PDF attached.
    pub fn quotation(
        &self,
        request: &QuotationRequest,
        pdf: &[u8],
    ) -> Result<Email, handlebars::RenderError> {
        let subject = format!("{} - Quotation Ready!", self.brand.name);
        let context = json!({
            "brand": &self.brand,
            "subject": &subject,
            "request": request,
            "accept_url": landing_url(&self.brand.online_base_url, &request.email),
        });
        let mut email = self.compose("quotation", &request.email, subject, &context)?;
        email.attachments.push(Attachment::pdf(QUOTATION_FILENAME, pdf));
        Ok(email)
    }

    pub fn payment(&self, payment: &PaymentConfirmation) -> Result<Email, handlebars::RenderError> {
        let subject = format!("{} - Payment Confirmation {}", self.brand.name, payment.quotation_id);
        let context = json!({ "brand": &self.brand, "payment": payment });
        self.compose("payment", &payment.email, subject, &context)
    }

    /// Partner offer sent alongside a payment confirmation.
    pub fn promotion(&self, to: &str, customer_name: &str) -> Result<Email, handlebars::RenderError> {
        let context = json!({
            "brand": &self.brand,
            "customer_name": customer_name,
            "partner_url": &self.partner_url,
        });
        self.compose(
            "promotion",
            to,
            "Special Offer from Mr. Electric - Trusted Electrical Services".into(),
            &context,
        )
    }

    pub fn appointment(
        &self,
        appointment: &AppointmentConfirmation,
    ) -> Result<Email, handlebars::RenderError> {
        let subject = format!(
            "{} - Appointment Confirmed {}",
            self.brand.name, appointment.appointment_id
        );
        let context = json!({
            "brand": &self.brand,
            "appointment": appointment,
            "payment_url": payment_url(&self.brand.online_base_url, &appointment.appointment_id),
        });
        self.compose("appointment", &appointment.email, subject, &context)
    }
}
