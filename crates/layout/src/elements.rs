use tally_style::TextStyle;
use tally_types::Color;

/// A drawable primitive placed on a page. Coordinates are in points with the
/// origin at the top-left corner of the page and y growing downwards.
#[derive(Clone, Debug)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

#[derive(Clone, Debug)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
}

#[derive(Clone, Debug)]
pub struct TextElement {
    pub content: String,
    pub style: TextStyle,
    /// Offset of the baseline from the element's top edge.
    pub baseline: f32,
    /// External target; the renderer turns this into a link annotation.
    pub href: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct RectElement {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl PositionedElement {
    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.element {
            LayoutElement::Text(t) => Some(t),
            LayoutElement::Rectangle(_) => None,
        }
    }
}
