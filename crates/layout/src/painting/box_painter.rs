use crate::elements::RectElement;
use crate::{LayoutElement, PositionedElement, Stroke};
use tally_types::Color;
use tally_types::geometry::Rect;

/// Background and border for a rectangular region, or `None` when the region
/// has neither.
pub fn paint_box(bounds: Rect, fill: Option<Color>, stroke: Option<Stroke>) -> Option<PositionedElement> {
    if fill.is_none() && stroke.is_none() {
        return None;
    }
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }
    Some(PositionedElement {
        x: bounds.x,
        y: bounds.y,
        width: bounds.width,
        height: bounds.height,
        element: LayoutElement::Rectangle(RectElement { fill, stroke }),
    })
}
