use crate::algorithms::pagination::FIT_EPSILON;
use crate::interface::{LayoutContext, LayoutNode, Split};
use crate::text::{LineLayout, TextRun, break_lines};
use crate::{LayoutElement, LayoutError, PositionedElement, TextElement};
use tally_style::{TextAlign, TextStyle};
use tally_types::geometry::{BoxConstraints, Size};

/// A run of text with one style, optionally linking to an external target.
#[derive(Debug, Clone)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
    pub href: Option<String>,
}

impl Span {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            href: None,
        }
    }

    pub fn link(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// Wrapped, aligned text made of one or more spans.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub align: TextAlign,
    pub keep_with_next: bool,
    /// Window of wrapped lines this node draws, set when split across pages.
    skip_lines: usize,
    line_limit: Option<usize>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            spans: vec![Span::new(text, style)],
            ..Self::default()
        }
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self {
            spans,
            ..Self::default()
        }
    }

    pub fn push(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn kept_with_next(mut self) -> Self {
        self.keep_with_next = true;
        self
    }

    pub fn lines(&self, max_width: f32) -> Vec<LineLayout> {
        let runs: Vec<TextRun> = self
            .spans
            .iter()
            .map(|span| TextRun {
                text: &span.text,
                style: span.style,
            })
            .collect();
        break_lines(&runs, max_width, self.align)
            .into_iter()
            .skip(self.skip_lines)
            .take(self.line_limit.unwrap_or(usize::MAX))
            .collect()
    }

    fn window(&self, skip_lines: usize, line_limit: Option<usize>) -> Self {
        Self {
            skip_lines,
            line_limit,
            ..self.clone()
        }
    }
}

impl LayoutNode for Paragraph {
    fn measure(&self, constraints: BoxConstraints) -> Result<Size, LayoutError> {
        let lines = self.lines(constraints.max_width);
        let height: f32 = lines.iter().map(|l| l.height).sum();
        let content_width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
        let width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            content_width
        };
        Ok(constraints.constrain(Size::new(width, height)))
    }

    fn layout(&self, ctx: &mut LayoutContext, constraints: BoxConstraints) -> Result<(), LayoutError> {
        let mut line_top = 0.0;
        for line in self.lines(constraints.max_width) {
            for item in line.items {
                let span = &self.spans[item.run_index];
                ctx.push_element(PositionedElement {
                    x: item.x,
                    y: line_top,
                    width: item.width,
                    height: line.height,
                    element: LayoutElement::Text(TextElement {
                        content: item.text,
                        style: span.style,
                        baseline: line.baseline,
                        href: span.href.clone(),
                    }),
                });
            }
            line_top += line.height;
        }
        Ok(())
    }

    fn keep_with_next(&self) -> bool {
        self.keep_with_next
    }

    fn split(&self, constraints: BoxConstraints, available: f32) -> Result<Option<Split>, LayoutError> {
        let lines = self.lines(constraints.max_width);
        let mut used = 0.0;
        let fitting = lines
            .iter()
            .take_while(|line| {
                used += line.height;
                used <= available + FIT_EPSILON
            })
            .count();
        if fitting == 0 || fitting == lines.len() {
            return Ok(None);
        }
        let head = self.window(self.skip_lines, Some(fitting));
        let tail = self.window(self.skip_lines + fitting, Some(lines.len() - fitting));
        Ok(Some(Split::new(head, tail)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_types::Color;
    use tally_types::geometry::Rect;

    #[test]
    fn layout_places_lines_below_cursor() {
        let style = TextStyle::new(10.0, Color::BLACK);
        let p = Paragraph::new("one two", style);
        let constraints = BoxConstraints::tight_width(style.measure("one"));
        assert!((p.measure(constraints).unwrap().height - 24.0).abs() < 0.01);

        let mut elements = Vec::new();
        let mut ctx = LayoutContext::new(Rect::new(50.0, 100.0, 500.0, 600.0), &mut elements);
        ctx.advance_cursor(10.0);
        p.layout(&mut ctx, constraints).unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].y, 110.0);
        assert!((elements[1].y - 122.0).abs() < 0.01);
        assert_eq!(elements[1].as_text().unwrap().content, "two");
    }

    #[test]
    fn link_span_carries_href() {
        let style = TextStyle::new(10.0, Color::BLACK);
        let p = Paragraph::from_spans(vec![Span::new("here", style).link("http://example.com/")]);
        let mut elements = Vec::new();
        let mut ctx = LayoutContext::new(Rect::new(0.0, 0.0, 200.0, 200.0), &mut elements);
        p.layout(&mut ctx, BoxConstraints::tight_width(200.0)).unwrap();
        assert_eq!(
            elements[0].as_text().unwrap().href.as_deref(),
            Some("http://example.com/")
        );
    }

    #[test]
    fn split_breaks_between_wrapped_lines() {
        let style = TextStyle::new(10.0, Color::BLACK);
        let p = Paragraph::new("one two three four five", style);
        let constraints = BoxConstraints::tight_width(style.measure("three"));

        let Split { head, tail } = p.split(constraints, 30.0).unwrap().unwrap();
        assert!((head.measure(constraints).unwrap().height - 24.0).abs() < 0.01);
        assert!((tail.measure(constraints).unwrap().height - 36.0).abs() < 0.01);

        let mut elements = Vec::new();
        let mut ctx = LayoutContext::new(Rect::new(0.0, 0.0, 200.0, 200.0), &mut elements);
        tail.layout(&mut ctx, constraints).unwrap();
        let words: Vec<_> = elements.iter().map(|e| e.as_text().unwrap().content.as_str()).collect();
        assert_eq!(words, vec!["three", "four", "five"]);
        assert_eq!(elements[0].y, 0.0);

        // The tail divides again from where it starts.
        let Split { head, .. } = tail.split(constraints, 12.0).unwrap().unwrap();
        let mut elements = Vec::new();
        let mut ctx = LayoutContext::new(Rect::new(0.0, 0.0, 200.0, 200.0), &mut elements);
        head.layout(&mut ctx, constraints).unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].as_text().unwrap().content, "three");
    }

    #[test]
    fn split_needs_room_for_one_line() {
        let style = TextStyle::new(10.0, Color::BLACK);
        let p = Paragraph::new("one two", style);
        let constraints = BoxConstraints::tight_width(style.measure("one"));
        assert!(p.split(constraints, 8.0).unwrap().is_none());
        assert!(p.split(constraints, 100.0).unwrap().is_none());
    }

    #[test]
    fn empty_paragraph_is_zero_height() {
        let p = Paragraph::new("", TextStyle::new(12.0, Color::BLACK));
        let size = p.measure(BoxConstraints::tight_width(100.0)).unwrap();
        assert_eq!(size.height, 0.0);
    }
}
