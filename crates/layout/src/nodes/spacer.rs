use crate::interface::{LayoutContext, LayoutNode};
use crate::LayoutError;
use tally_types::geometry::{BoxConstraints, Size};

/// Vertical gap between blocks. Never carried to the top of a new page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacer(pub f32);

impl LayoutNode for Spacer {
    fn measure(&self, constraints: BoxConstraints) -> Result<Size, LayoutError> {
        let width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            0.0
        };
        Ok(Size::new(width, self.0.max(0.0)))
    }

    fn layout(&self, _ctx: &mut LayoutContext, _constraints: BoxConstraints) -> Result<(), LayoutError> {
        Ok(())
    }

    fn is_discardable(&self) -> bool {
        true
    }
}
