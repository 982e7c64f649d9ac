use crate::RenderError;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use tally_layout::{LayoutElement, PositionedElement, RectElement, TextElement};
use tally_style::{BuiltinFont, TextDecoration};
use tally_types::Color;

#[derive(Default, Clone, PartialEq)]
struct GraphicsState {
    font: Option<(BuiltinFont, f32)>,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

/// Accumulates drawing operators for one page. Layout coordinates (top-left
/// origin) are flipped to PDF user space here.
pub struct PageContext {
    page_height: f32,
    operations: Vec<Operation>,
    state: GraphicsState,
}

impl PageContext {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            operations: Vec::new(),
            state: GraphicsState::default(),
        }
    }

    pub fn finish(self) -> Content {
        Content {
            operations: self.operations,
        }
    }

    pub fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.element {
            LayoutElement::Rectangle(rect) => self.draw_rect(rect, el),
            LayoutElement::Text(text) => self.draw_text(text, el),
        }
        Ok(())
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        if self.state.stroke_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(color);
        }
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    fn set_font(&mut self, font: BuiltinFont, size: f32) {
        if self.state.font != Some((font, size)) {
            self.push(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((font, size));
        }
    }

    fn draw_rect(&mut self, rect: &RectElement, el: &PositionedElement) {
        let y = self.page_height - (el.y + el.height);
        match (rect.fill, rect.stroke) {
            (None, None) => {}
            (Some(fill), None) => {
                self.set_fill_color(fill);
                self.push("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
                self.push("f", vec![]);
            }
            (fill, Some(stroke)) => {
                // Keep the stroke inside the element's box.
                let inset = stroke.width / 2.0;
                if let Some(fill) = fill {
                    self.set_fill_color(fill);
                }
                self.set_stroke(stroke.color, stroke.width);
                self.push(
                    "re",
                    vec![
                        (el.x + inset).into(),
                        (y + inset).into(),
                        (el.width - stroke.width).max(0.0).into(),
                        (el.height - stroke.width).max(0.0).into(),
                    ],
                );
                self.push(if fill.is_some() { "B" } else { "S" }, vec![]);
            }
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        let style = &text.style;
        let baseline_y = self.page_height - (el.y + text.baseline);

        self.push("BT", vec![]);
        self.set_font(style.font(), style.font_size);
        self.set_fill_color(style.color);
        self.push("Td", vec![el.x.into(), baseline_y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)],
        );
        self.push("ET", vec![]);

        if style.decoration == TextDecoration::Underline {
            let thickness = (style.font_size * 0.05).max(0.5);
            let y = baseline_y - style.font_size * 0.1 - thickness;
            self.push("re", vec![el.x.into(), y.into(), el.width.into(), thickness.into()]);
            self.push("f", vec![]);
        }
    }
}

/// Encodes text for the standard fonts' WinAnsiEncoding. Characters outside
/// the code page become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            c if (c as u32) < 0x80 || ((c as u32) >= 0xA0 && (c as u32) <= 0xFF) => c as u8,
            _ => b'?',
        })
        .collect()
}
