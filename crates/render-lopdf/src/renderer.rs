use crate::annotations::uri_link;
use crate::content::PageContext;
use crate::writer::StreamingPdfWriter;
use crate::RenderError;
use lopdf::{Dictionary, Object, StringFormat, dictionary};
use std::io::{Cursor, Seek, Write};
use tally_layout::{LayoutElement, Page};
use tally_style::BuiltinFont;

/// Document information dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// PDF date string, e.g. `D:20250101120000`.
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    fn to_dictionary(&self) -> Dictionary {
        let mut dict = dictionary! {
            "Producer" => Object::String(b"tally".to_vec(), StringFormat::Literal),
        };
        let entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("CreationDate", &self.creation_date),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                dict.set(key, Object::String(crate::to_win_ansi(value), StringFormat::Literal));
            }
        }
        dict
    }
}

/// Writes laid-out pages as a PDF document.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    info: DocumentInfo,
}

impl PdfRenderer {
    pub fn new(info: DocumentInfo) -> Self {
        Self { info }
    }

    fn font_dictionary() -> Dictionary {
        let mut fonts = Dictionary::new();
        for font in BuiltinFont::ALL {
            let single_font_dict = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            };
            fonts.set(font.resource_name(), Object::Dictionary(single_font_dict));
        }
        fonts
    }

    pub fn render<W: Write + Seek>(&self, pages: &[Page], writer: W) -> Result<W, RenderError> {
        if pages.is_empty() {
            return Err(RenderError::NoPages);
        }
        let mut writer = StreamingPdfWriter::new(writer, "1.7", Self::font_dictionary())?;
        writer.set_info(self.info.to_dictionary());

        for page in pages {
            let page_width = page.size.width;
            let page_height = page.size.height;

            let mut ctx = PageContext::new(page_height);
            let mut annotations = Vec::new();
            for el in &page.elements {
                ctx.draw_element(el)?;
                if let LayoutElement::Text(text) = &el.element {
                    if let Some(href) = &text.href {
                        annotations.push(writer.write_object(uri_link(el, href, page_height).into())?);
                    }
                }
            }
            let content_id = writer.write_content_stream(ctx.finish())?;

            let mut page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => writer.pages_id(),
                "MediaBox" => vec![0.0.into(), 0.0.into(), page_width.into(), page_height.into()],
                "Contents" => content_id,
                "Resources" => writer.resources_id(),
            };
            if !annotations.is_empty() {
                page_dict.set(
                    "Annots",
                    Object::Array(annotations.into_iter().map(Object::Reference).collect()),
                );
            }
            let page_id = writer.write_object(page_dict.into())?;
            writer.push_page(page_id);
        }

        log::debug!("Wrote {} page(s)", writer.page_count());
        Ok(writer.finish()?)
    }

    pub fn render_to_vec(&self, pages: &[Page]) -> Result<Vec<u8>, RenderError> {
        Ok(self.render(pages, Cursor::new(Vec::new()))?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_layout::{PositionedElement, RectElement, TextElement};
    use tally_style::TextStyle;
    use tally_types::{Color, Size};

    fn text(content: &str, y: f32, href: Option<&str>) -> PositionedElement {
        PositionedElement {
            x: 50.0,
            y,
            width: 120.0,
            height: 14.4,
            element: LayoutElement::Text(TextElement {
                content: content.into(),
                style: TextStyle::new(12.0, Color::BLACK),
                baseline: 12.0,
                href: href.map(str::to_string),
            }),
        }
    }

    #[test]
    fn pages_text_and_links_survive_a_reload() {
        let pages = vec![
            Page {
                size: Size::new(612.0, 792.0),
                elements: vec![
                    PositionedElement {
                        x: 0.0,
                        y: 0.0,
                        width: 612.0,
                        height: 150.0,
                        element: LayoutElement::Rectangle(RectElement {
                            fill: Some(Color::rgb(0xCF, 0x05, 0x57)),
                            stroke: None,
                        }),
                    },
                    text("jane@example.com", 200.0, None),
                ],
            },
            Page {
                size: Size::new(612.0, 792.0),
                elements: vec![text("View online", 100.0, Some("http://localhost:8080/"))],
            },
        ];

        let renderer = PdfRenderer::new(DocumentInfo {
            title: Some("Service Quotation".into()),
            ..DocumentInfo::default()
        });
        let bytes = renderer.render_to_vec(&pages).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();

        let page_ids = doc.get_pages();
        assert_eq!(page_ids.len(), 2);
        assert!(doc.extract_text(&[1]).unwrap().contains("jane@example.com"));

        let second = doc.get_dictionary(page_ids[&2]).unwrap();
        let annots = second.get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);
    }

    #[test]
    fn no_pages_is_an_error() {
        assert!(matches!(
            PdfRenderer::default().render_to_vec(&[]),
            Err(RenderError::NoPages)
        ));
    }
}
