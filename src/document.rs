//! Builds the quotation as a stack of layout blocks.

use crate::brand::Brand;
use crate::link;
use crate::quotation::Quotation;
use tally_layout::{
    BandEdge, BandRepeat, Column, Container, LayoutEngine, LayoutError, LayoutNode, Page,
    PageTemplate, Paragraph, Row, Spacer, Span,
};
use tally_style::{Margins, TextAlign, TextStyle, Theme};

/// Width of the price column in the service table and total banner.
const PRICE_COLUMN: f32 = 110.0;

pub struct QuotationDocument<'a> {
    theme: &'a Theme,
    brand: &'a Brand,
}

impl<'a> QuotationDocument<'a> {
    pub fn new(theme: &'a Theme, brand: &'a Brand) -> Self {
        Self { theme, brand }
    }

    /// Page geometry with the first-page header band and the every-page
    /// footer band installed.
    pub fn engine(&self) -> LayoutEngine {
        let theme = self.theme;
        let template = PageTemplate {
            size: theme.page_size.dimensions_pt(),
            margins: theme.margins,
            band_gap: theme.bands.content_gap,
        };
        LayoutEngine::new(template)
            .with_band(self.header_band(), BandEdge::Top, BandRepeat::FirstPage)
            .with_band(self.footer_band(), BandEdge::Bottom, BandRepeat::EveryPage)
    }

    pub fn layout(&self, quotation: &Quotation) -> Result<Vec<Page>, LayoutError> {
        self.engine().paginate(&self.blocks(quotation))
    }

    pub fn blocks(&self, quotation: &Quotation) -> Vec<Box<dyn LayoutNode>> {
        let spacing = self.theme.spacing;
        let mut blocks: Vec<Box<dyn LayoutNode>> = Vec::new();

        self.title(&mut blocks, quotation);
        blocks.push(Box::new(Spacer(spacing.section_gap)));

        self.heading(&mut blocks, "Customer Details", self.theme.section_heading());
        blocks.push(Box::new(self.customer_box(quotation)));
        blocks.push(Box::new(Spacer(spacing.section_gap)));

        self.heading(&mut blocks, "Service Details", self.theme.section_heading());
        self.service_table(&mut blocks, quotation);
        blocks.push(Box::new(Spacer(spacing.heading_gap)));
        blocks.push(Box::new(self.total_banner(quotation)));
        blocks.push(Box::new(Spacer(spacing.section_gap)));

        self.heading(&mut blocks, "Additional Information", self.theme.subheading());
        self.bullets(&mut blocks);
        blocks.push(Box::new(Spacer(spacing.section_gap)));

        self.heading(&mut blocks, "Terms & Conditions", self.theme.subheading());
        let terms = TextStyle::new(self.theme.typography.terms, self.theme.palette.muted);
        blocks.push(Box::new(Paragraph::new(self.brand.terms.clone(), terms)));
        blocks.push(Box::new(Spacer(spacing.section_gap)));

        blocks.push(Box::new(self.link_box(quotation)));
        blocks
    }

    fn heading(&self, blocks: &mut Vec<Box<dyn LayoutNode>>, text: &str, style: TextStyle) {
        blocks.push(Box::new(Paragraph::new(text, style).kept_with_next()));
        blocks.push(Box::new(Spacer(self.theme.spacing.heading_gap)));
    }

    fn title(&self, blocks: &mut Vec<Box<dyn LayoutNode>>, quotation: &Quotation) {
        let t = &self.theme.typography;
        let p = &self.theme.palette;
        let title = TextStyle::new(t.title, p.navy).bold();
        blocks.push(Box::new(
            Paragraph::new(self.brand.document_title.clone(), title).kept_with_next(),
        ));
        blocks.push(Box::new(Spacer(self.theme.spacing.heading_gap)));
        blocks.push(Box::new(Paragraph::new(
            format!("Date: {}", quotation.issue_date()),
            TextStyle::new(t.date, p.muted),
        )));
    }

    fn labelled(&self, label: &str, value: &str) -> Paragraph {
        let body = self.theme.body();
        Paragraph::from_spans(vec![
            Span::new(format!("{label}: "), body.bold()),
            Span::new(value, body),
        ])
    }

    fn customer_box(&self, quotation: &Quotation) -> Container {
        let spacing = self.theme.spacing;
        let request = &quotation.request;
        Container::new()
            .padding(Margins::all(spacing.box_padding))
            .border(self.theme.palette.accent, spacing.border_width)
            .child(self.labelled("Email", &request.email))
            .child(Spacer(spacing.item_gap))
            .child(self.labelled("Address", &request.address))
            .child(Spacer(spacing.item_gap))
            .child(self.labelled("Zip Code", &request.zip_code))
    }

    fn table_columns() -> Vec<Column> {
        vec![Column::fraction(2.0), Column::fraction(2.0), Column::fixed(PRICE_COLUMN)]
    }

    fn service_table(&self, blocks: &mut Vec<Box<dyn LayoutNode>>, quotation: &Quotation) {
        let theme = self.theme;
        let spacing = theme.spacing;
        let cell = TextStyle::new(theme.typography.table, theme.palette.text);
        let header = cell.with_color(theme.palette.inverse).bold();

        blocks.push(Box::new(
            Row::new(
                Self::table_columns(),
                vec![
                    Paragraph::new("Service", header),
                    Paragraph::new("Details", header),
                    Paragraph::new("Price", header).align(TextAlign::Right),
                ],
            )
            .background(theme.palette.accent)
            .padding(spacing.box_padding)
            .min_height(spacing.row_height)
            .kept_with_next(),
        ));

        for (index, item) in quotation.items.iter().enumerate() {
            let mut row = Row::new(
                Self::table_columns(),
                vec![
                    Paragraph::new(item.name.clone(), cell),
                    Paragraph::new(item.details.clone(), cell),
                    Paragraph::new(item.price.to_string(), cell.bold()).align(TextAlign::Right),
                ],
            )
            .padding(spacing.box_padding)
            .min_height(spacing.row_height);
            if index % 2 == 0 {
                row = row.background(theme.palette.stripe);
            }
            blocks.push(Box::new(row));
        }
    }

    fn total_banner(&self, quotation: &Quotation) -> Row {
        let theme = self.theme;
        let inverse = theme.palette.inverse;
        Row::new(
            vec![Column::fraction(1.0), Column::fixed(PRICE_COLUMN)],
            vec![
                Paragraph::new("Total Amount:", TextStyle::new(theme.typography.total_label, inverse).bold()),
                Paragraph::new(
                    quotation.total().to_string(),
                    TextStyle::new(theme.typography.total_amount, inverse).bold(),
                )
                .align(TextAlign::Right),
            ],
        )
        .background(theme.palette.navy)
        .padding(theme.spacing.box_padding)
        .min_height(theme.spacing.banner_height)
    }

    fn bullets(&self, blocks: &mut Vec<Box<dyn LayoutNode>>) {
        let spacing = self.theme.spacing;
        let indent = Margins {
            left: spacing.list_indent,
            ..Margins::default()
        };
        for (i, line) in self.brand.information.iter().enumerate() {
            if i > 0 {
                blocks.push(Box::new(Spacer(spacing.item_gap)));
            }
            blocks.push(Box::new(
                Container::new()
                    .padding(indent)
                    .child(Paragraph::new(format!("\u{2022} {line}"), self.theme.body())),
            ));
        }
    }

    fn link_box(&self, quotation: &Quotation) -> Container {
        let theme = self.theme;
        let (t, p, spacing) = (&theme.typography, &theme.palette, theme.spacing);
        let url = link::quotation_url(&self.brand.online_base_url, &quotation.request.email);

        Container::new()
            .padding(Margins::all(spacing.box_padding))
            .background(p.link_background)
            .border(p.primary, spacing.border_width)
            .child(Paragraph::new(
                self.brand.link_heading.clone(),
                TextStyle::new(t.body, p.navy).bold(),
            ))
            .child(Spacer(spacing.item_gap))
            .child(Paragraph::from_spans(vec![
                Span::new(url.clone(), TextStyle::new(t.link, p.primary).underline()).link(url),
            ]))
            .child(Spacer(spacing.item_gap))
            .child(Paragraph::new(
                self.brand.link_caption.clone(),
                TextStyle::new(t.caption, p.muted).oblique(),
            ))
    }

    fn header_band(&self) -> Container {
        let theme = self.theme;
        let (t, p, bands) = (&theme.typography, &theme.palette, theme.bands);
        Container::new()
            .background(p.primary)
            .min_height(bands.header_height)
            .padding(Margins {
                top: bands.header_padding_top,
                right: bands.inset,
                bottom: 0.0,
                left: bands.inset,
            })
            .child(Paragraph::new(
                self.brand.name.clone(),
                TextStyle::new(t.brand_name, p.inverse).bold(),
            ))
            .child(Paragraph::new(
                self.brand.tagline.clone(),
                TextStyle::new(t.tagline, p.inverse),
            ))
    }

    fn footer_band(&self) -> Container {
        let theme = self.theme;
        let (t, p, bands) = (&theme.typography, &theme.palette, theme.bands);
        let centered = |text: &str, style: TextStyle| Paragraph::new(text, style).align(TextAlign::Center);
        Container::new()
            .background(p.navy)
            .min_height(bands.footer_height)
            .padding(Margins {
                top: bands.footer_padding_top,
                right: bands.inset,
                bottom: 0.0,
                left: bands.inset,
            })
            .child(centered(&self.brand.thank_you, TextStyle::new(t.footer, p.inverse)))
            .child(Spacer(theme.spacing.item_gap))
            .child(centered(&self.brand.support_line, TextStyle::new(t.footer_support, p.accent)))
            .child(Spacer(theme.spacing.item_gap))
            .child(centered(&self.brand.copyright, TextStyle::new(t.footer_legal, p.inverse)))
    }
}
