use crate::algorithms::pagination::FIT_EPSILON;
use crate::interface::{LayoutContext, LayoutNode, Split};
use crate::painting::paint_box;
use crate::{LayoutError, Stroke};
use std::sync::Arc;
use tally_style::Margins;
use tally_types::Color;
use tally_types::geometry::{BoxConstraints, Rect, Size};

/// A box that stacks its children vertically inside padding, with an
/// optional fill and border. When it does not fit on a page it breaks
/// between children (or inside a child that can break) and each fragment
/// gets its own copy of the frame.
#[derive(Debug, Default)]
pub struct Container {
    pub children: Vec<Arc<dyn LayoutNode>>,
    pub padding: Margins,
    pub background: Option<Color>,
    pub border: Option<Stroke>,
    pub min_height: f32,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, node: impl LayoutNode + 'static) -> Self {
        self.children.push(Arc::new(node));
        self
    }

    pub fn padding(mut self, padding: Margins) -> Self {
        self.padding = padding;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, color: Color, width: f32) -> Self {
        self.border = Some(Stroke { color, width });
        self
    }

    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = height;
        self
    }

    fn inner_constraints(&self, constraints: BoxConstraints) -> BoxConstraints {
        BoxConstraints::tight_width(constraints.max_width).deflate_width(self.padding.horizontal())
    }

    /// Same frame around a subset of the children.
    fn fragment(&self, children: Vec<Arc<dyn LayoutNode>>) -> Self {
        Self {
            children,
            padding: self.padding,
            background: self.background,
            border: self.border,
            min_height: 0.0,
        }
    }
}

impl LayoutNode for Container {
    fn measure(&self, constraints: BoxConstraints) -> Result<Size, LayoutError> {
        let inner = self.inner_constraints(constraints);
        let mut content = 0.0;
        for child in &self.children {
            content += child.measure(inner)?.height;
        }
        let height = (content + self.padding.vertical()).max(self.min_height);
        Ok(Size::new(constraints.max_width, height))
    }

    fn layout(&self, ctx: &mut LayoutContext, constraints: BoxConstraints) -> Result<(), LayoutError> {
        let size = self.measure(constraints)?;
        let frame = Rect::new(0.0, 0.0, size.width, size.height);
        if let Some(el) = paint_box(frame, self.background, self.border) {
            ctx.push_element(el);
        }

        let inner = self.inner_constraints(constraints);
        let mut child_ctx = ctx.child(Rect::new(
            self.padding.left,
            self.padding.top,
            inner.max_width,
            (size.height - self.padding.vertical()).max(0.0),
        ));
        for child in &self.children {
            let height = child.measure(inner)?.height;
            child.layout(&mut child_ctx, inner)?;
            child_ctx.advance_cursor(height);
        }
        Ok(())
    }

    fn split(&self, constraints: BoxConstraints, available: f32) -> Result<Option<Split>, LayoutError> {
        let inner = self.inner_constraints(constraints);
        let room = available - self.padding.vertical();
        let mut used = 0.0;
        for (i, child) in self.children.iter().enumerate() {
            let height = child.measure(inner)?.height;
            if used + height <= room + FIT_EPSILON {
                used += height;
                continue;
            }

            let mut head = self.children[..i].to_vec();
            let mut tail = Vec::new();
            if !child.is_discardable() {
                match child.split(inner, room - used)? {
                    Some(parts) => {
                        head.push(Arc::from(parts.head));
                        tail.push(Arc::from(parts.tail));
                    }
                    None => tail.push(Arc::clone(child)),
                }
            }
            tail.extend(self.children[i + 1..].iter().cloned());
            let tail: Vec<_> = tail.into_iter().skip_while(|c| c.is_discardable()).collect();

            if head.iter().all(|c| c.is_discardable()) || tail.is_empty() {
                return Ok(None);
            }
            return Ok(Some(Split::new(self.fragment(head), self.fragment(tail))));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Paragraph, Spacer};
    use crate::LayoutElement;
    use tally_style::TextStyle;

    #[test]
    fn children_stack_inside_padding() {
        let style = TextStyle::new(10.0, Color::BLACK);
        let boxed = Container::new()
            .padding(Margins::all(10.0))
            .border(Color::rgb(0xFB, 0x4D, 0x94), 2.0)
            .child(Paragraph::new("Email: a@b.c", style))
            .child(Spacer(4.0))
            .child(Paragraph::new("Zip Code: 90210", style));

        let constraints = BoxConstraints::tight_width(300.0);
        let size = boxed.measure(constraints).unwrap();
        assert!((size.height - (12.0 + 4.0 + 12.0 + 20.0)).abs() < 0.01);

        let mut elements = Vec::new();
        let mut ctx = LayoutContext::new(Rect::new(50.0, 0.0, 300.0, 700.0), &mut elements);
        boxed.layout(&mut ctx, constraints).unwrap();

        match &elements[0].element {
            LayoutElement::Rectangle(r) => assert_eq!(r.stroke.map(|s| s.width), Some(2.0)),
            LayoutElement::Text(_) => panic!("border should come first"),
        }
        assert_eq!((elements[1].x, elements[1].y), (60.0, 10.0));
        assert!((elements[2].y - 26.0).abs() < 0.01);
    }

    #[test]
    fn split_repeats_frame_and_breaks_inside_text() {
        let style = TextStyle::new(10.0, Color::BLACK);
        let boxed = Container::new()
            .padding(Margins::all(10.0))
            .border(Color::BLACK, 1.0)
            .child(Paragraph::new("Zip", style))
            .child(Spacer(4.0))
            .child(Paragraph::new("alpha beta gamma", style));

        // padding 20 + first line 12 + spacer 4 + one wrapped line 12
        let constraints = BoxConstraints::tight_width(20.0 + style.measure("gamma"));
        let Split { head, tail } = boxed.split(constraints, 48.0).unwrap().unwrap();

        let mut elements = Vec::new();
        let mut ctx = LayoutContext::new(Rect::new(0.0, 0.0, 300.0, 700.0), &mut elements);
        head.layout(&mut ctx, constraints).unwrap();
        let texts: Vec<_> = elements.iter().filter_map(|e| e.as_text()).map(|t| t.content.as_str()).collect();
        assert_eq!(texts, vec!["Zip", "alpha"]);
        assert!((head.measure(constraints).unwrap().height - 48.0).abs() < 0.01);

        let mut elements = Vec::new();
        let mut ctx = LayoutContext::new(Rect::new(0.0, 0.0, 300.0, 700.0), &mut elements);
        tail.layout(&mut ctx, constraints).unwrap();
        assert!(matches!(&elements[0].element, LayoutElement::Rectangle(r) if r.stroke.is_some()));
        let texts: Vec<_> = elements.iter().filter_map(|e| e.as_text()).map(|t| t.content.as_str()).collect();
        assert_eq!(texts, vec!["beta", "gamma"]);
        assert_eq!(elements[1].y, 10.0);
    }

    #[test]
    fn split_drops_spacer_at_the_break() {
        let style = TextStyle::new(10.0, Color::BLACK);
        let boxed = Container::new()
            .child(Paragraph::new("first", style))
            .child(Spacer(30.0))
            .child(Paragraph::new("second", style));
        let constraints = BoxConstraints::tight_width(200.0);

        let Split { head, tail } = boxed.split(constraints, 20.0).unwrap().unwrap();
        assert!((head.measure(constraints).unwrap().height - 12.0).abs() < 0.01);
        assert!((tail.measure(constraints).unwrap().height - 12.0).abs() < 0.01);
    }

    #[test]
    fn frame_without_content_cannot_split() {
        let band = Container::new().background(Color::BLACK).min_height(150.0);
        assert!(band.split(BoxConstraints::tight_width(100.0), 50.0).unwrap().is_none());
    }

    #[test]
    fn min_height_wins_over_content() {
        let band = Container::new().background(Color::BLACK).min_height(150.0);
        let size = band.measure(BoxConstraints::tight_width(612.0)).unwrap();
        assert_eq!(size, Size::new(612.0, 150.0));
    }
}
