use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_types::Money;

/// Contact details a quotation is issued for. Used verbatim as display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationRequest {
    pub email: String,
    pub address: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
}

impl QuotationRequest {
    pub fn new(email: impl Into<String>, address: impl Into<String>, zip_code: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            address: address.into(),
            zip_code: zip_code.into(),
        }
    }
}

/// One priced service on the quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub details: String,
    pub price: Money,
}

impl LineItem {
    pub fn new(name: impl Into<String>, details: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
            price,
        }
    }
}

/// The standard package offered to new customers.
pub fn default_catalog() -> Vec<LineItem> {
    vec![
        LineItem::new("Standard Cleaning Package", "Living room, Kitchen", Money::from_dollars(80)),
        LineItem::new("Bathroom Cleaning", "2 Bathrooms", Money::from_dollars(50)),
        LineItem::new("Deep Clean Special", "First-time discount", Money::from_dollars(20)),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quotation {
    pub request: QuotationRequest,
    pub items: Vec<LineItem>,
    pub issued_on: NaiveDate,
}

impl Quotation {
    pub fn new(request: QuotationRequest, items: Vec<LineItem>, issued_on: NaiveDate) -> Self {
        Self {
            request,
            items,
            issued_on,
        }
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Long-form issue date, e.g. `November 7, 2025`.
    pub fn issue_date(&self) -> String {
        self.issued_on.format("%B %-d, %Y").to_string()
    }
}
