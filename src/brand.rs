use serde::{Deserialize, Serialize};

/// Business-facing wording printed on every quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub name: String,
    pub tagline: String,
    pub document_title: String,
    pub thank_you: String,
    pub support_line: String,
    pub copyright: String,
    /// Root of the customer-facing web app, without a trailing slash.
    pub online_base_url: String,
    pub link_heading: String,
    pub link_caption: String,
    pub information: Vec<String>,
    pub terms: String,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: "Molly Maid".into(),
            tagline: "Professional Cleaning Services".into(),
            document_title: "Service Quotation".into(),
            thank_you: "Thank you for choosing Molly Maid!".into(),
            support_line: "Questions? Contact us at support@mollymaid.com | (555) 123-4567".into(),
            copyright: "\u{00A9} 2025 Molly Maid. All rights reserved.".into(),
            online_base_url: "http://localhost:8080".into(),
            link_heading: "View Your Quotation Online".into(),
            link_caption: "Click the link above to view and manage your quotation online".into(),
            information: vec![
                "Estimated Duration: 3 hours".into(),
                "Service Area: Living room, Kitchen, 2 Bathrooms".into(),
                "Cleaning supplies and equipment included".into(),
                "100% satisfaction guaranteed".into(),
            ],
            terms: "This quotation is valid for 30 days from the date of issue. \
                    Payment is due upon completion of service. \
                    Cancellations must be made 24 hours in advance."
                .into(),
        }
    }
}
