use crate::{LayoutError, PositionedElement};
use std::fmt::Debug;
use tally_types::geometry::{BoxConstraints, Rect, Size};

/// Placement state for one region of a page.
///
/// Element coordinates pushed through the context are relative to the
/// current cursor and get translated to page coordinates here.
pub struct LayoutContext<'a> {
    bounds: Rect,
    cursor_y: f32,
    elements: &'a mut Vec<PositionedElement>,
}

impl<'a> LayoutContext<'a> {
    pub fn new(bounds: Rect, elements: &'a mut Vec<PositionedElement>) -> Self {
        Self {
            bounds,
            cursor_y: 0.0,
            elements,
        }
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub fn set_cursor_y(&mut self, y: f32) {
        self.cursor_y = y;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn advance_cursor(&mut self, dy: f32) {
        self.cursor_y += dy;
    }

    pub fn available_height(&self) -> f32 {
        (self.bounds.height - self.cursor_y).max(0.0)
    }

    pub fn push_element(&mut self, mut element: PositionedElement) {
        element.x += self.bounds.x;
        element.y += self.bounds.y + self.cursor_y;
        self.elements.push(element);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// A nested context whose bounds are given relative to this context's
    /// cursor position.
    pub fn child<'child>(&'child mut self, bounds: Rect) -> LayoutContext<'child> {
        LayoutContext {
            bounds: Rect {
                x: self.bounds.x + bounds.x,
                y: self.bounds.y + self.cursor_y + bounds.y,
                ..bounds
            },
            cursor_y: 0.0,
            elements: &mut *self.elements,
        }
    }
}

/// A block in the vertical stack.
///
/// `layout` draws the node with its top edge at the context cursor and does
/// not move the cursor; the caller advances by the measured height.
pub trait LayoutNode: Debug + Send + Sync {
    fn measure(&self, constraints: BoxConstraints) -> Result<Size, LayoutError>;

    fn layout(&self, ctx: &mut LayoutContext, constraints: BoxConstraints)
    -> Result<(), LayoutError>;

    /// Moves to the next page together with the following node.
    fn keep_with_next(&self) -> bool {
        false
    }

    /// Spacing that is dropped at page boundaries instead of being carried over.
    fn is_discardable(&self) -> bool {
        false
    }

    /// Divides the node so that `head` fills at most `available` points and
    /// `tail` continues on the next page. `None` means the node cannot be
    /// divided there.
    fn split(&self, _constraints: BoxConstraints, _available: f32) -> Result<Option<Split>, LayoutError> {
        Ok(None)
    }
}

/// The two halves of a node broken across a page boundary.
#[derive(Debug)]
pub struct Split {
    pub head: Box<dyn LayoutNode>,
    pub tail: Box<dyn LayoutNode>,
}

impl Split {
    pub fn new(head: impl LayoutNode + 'static, tail: impl LayoutNode + 'static) -> Self {
        Self {
            head: Box::new(head),
            tail: Box::new(tail),
        }
    }
}
