//! Brand presentation constants for quotation documents.
//!
//! Everything a document draws with (colors, sizes, page geometry, spacing)
//! is read from a [`Theme`]. Layout code never embeds these values.

use crate::dimension::{Margins, PageSize};
use crate::text::TextStyle;
use serde::{Deserialize, Serialize};
use tally_types::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub page_size: PageSize,
    pub margins: Margins,
    pub palette: Palette,
    pub typography: Typography,
    pub bands: Bands,
    pub spacing: Spacing,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margins: Margins::all(50.0),
            palette: Palette::default(),
            typography: Typography::default(),
            bands: Bands::default(),
            spacing: Spacing::default(),
        }
    }
}

impl Theme {
    pub fn text(&self, font_size: f32, color: Color) -> TextStyle {
        TextStyle::new(font_size, color)
    }

    pub fn body(&self) -> TextStyle {
        TextStyle::new(self.typography.body, self.palette.text)
    }

    pub fn section_heading(&self) -> TextStyle {
        TextStyle::new(self.typography.section_heading, self.palette.navy).bold()
    }

    pub fn subheading(&self) -> TextStyle {
        TextStyle::new(self.typography.subheading, self.palette.navy).bold()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Header band, link box border and link text.
    pub primary: Color,
    /// Customer box border, table header, footer support line.
    pub accent: Color,
    /// Headings, total banner, footer band.
    pub navy: Color,
    pub text: Color,
    pub muted: Color,
    /// Background of alternating table rows.
    pub stripe: Color,
    pub link_background: Color,
    /// Text drawn on filled bands.
    pub inverse: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0xCF, 0x05, 0x57),
            accent: Color::rgb(0xFB, 0x4D, 0x94),
            navy: Color::rgb(0x07, 0x1D, 0x49),
            text: Color::gray(0x33),
            muted: Color::gray(0x66),
            stripe: Color::gray(0xF9),
            link_background: Color::rgb(0xF0, 0xF9, 0xFF),
            inverse: Color::WHITE,
        }
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub brand_name: f32,
    pub tagline: f32,
    pub title: f32,
    pub date: f32,
    pub section_heading: f32,
    pub subheading: f32,
    pub body: f32,
    pub table: f32,
    pub total_label: f32,
    pub total_amount: f32,
    pub terms: f32,
    pub link: f32,
    pub caption: f32,
    pub footer: f32,
    pub footer_support: f32,
    pub footer_legal: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            brand_name: 36.0,
            tagline: 14.0,
            title: 28.0,
            date: 12.0,
            section_heading: 16.0,
            subheading: 14.0,
            body: 12.0,
            table: 11.0,
            total_label: 16.0,
            total_amount: 18.0,
            terms: 10.0,
            link: 10.0,
            caption: 9.0,
            footer: 10.0,
            footer_support: 9.0,
            footer_legal: 8.0,
        }
    }
}

/// Full-bleed page bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bands {
    pub header_height: f32,
    pub footer_height: f32,
    /// Horizontal inset of band text from the page edge.
    pub inset: f32,
    /// Vertical inset of band text from the band's top edge.
    pub header_padding_top: f32,
    pub footer_padding_top: f32,
    /// Space between a band and the flowing content next to it.
    pub content_gap: f32,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            header_height: 150.0,
            footer_height: 100.0,
            inset: 50.0,
            header_padding_top: 40.0,
            footer_padding_top: 20.0,
            content_gap: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Vertical gap between document sections.
    pub section_gap: f32,
    /// Gap between a heading and the content it introduces.
    pub heading_gap: f32,
    /// Gap between bullet lines.
    pub item_gap: f32,
    /// Inner padding of bordered boxes and table cells.
    pub box_padding: f32,
    pub border_width: f32,
    /// Minimum height of a table row.
    pub row_height: f32,
    /// Minimum height of the total banner.
    pub banner_height: f32,
    /// Indentation of bullet lists.
    pub list_indent: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            section_gap: 24.0,
            heading_gap: 8.0,
            item_gap: 4.0,
            box_padding: 10.0,
            border_width: 2.0,
            row_height: 30.0,
            banner_height: 40.0,
            list_indent: 10.0,
        }
    }
}
