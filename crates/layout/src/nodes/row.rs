use super::paragraph::Paragraph;
use crate::interface::{LayoutContext, LayoutNode};
use crate::painting::paint_box;
use crate::LayoutError;
use tally_types::Color;
use tally_types::geometry::{BoxConstraints, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    /// Points.
    Fixed(f32),
    /// Share of the width left after fixed columns.
    Fraction(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub width: ColumnWidth,
}

impl Column {
    pub fn fixed(width: f32) -> Self {
        Self {
            width: ColumnWidth::Fixed(width),
        }
    }

    pub fn fraction(weight: f32) -> Self {
        Self {
            width: ColumnWidth::Fraction(weight),
        }
    }
}

/// A single table-like row: cells side by side, vertically centered, over an
/// optional background.
#[derive(Debug, Clone)]
pub struct Row {
    pub columns: Vec<Column>,
    pub cells: Vec<Paragraph>,
    pub background: Option<Color>,
    /// Horizontal and vertical inset of every cell.
    pub padding: f32,
    pub min_height: f32,
    pub keep_with_next: bool,
}

impl Row {
    pub fn new(columns: Vec<Column>, cells: Vec<Paragraph>) -> Self {
        Self {
            columns,
            cells,
            background: None,
            padding: 0.0,
            min_height: 0.0,
            keep_with_next: false,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = height;
        self
    }

    pub fn kept_with_next(mut self) -> Self {
        self.keep_with_next = true;
        self
    }

    /// Resolved column widths for a row `total` points wide.
    pub fn column_widths(&self, total: f32) -> Vec<f32> {
        let fixed: f32 = self
            .columns
            .iter()
            .filter_map(|c| match c.width {
                ColumnWidth::Fixed(w) => Some(w),
                ColumnWidth::Fraction(_) => None,
            })
            .sum();
        let weights: f32 = self
            .columns
            .iter()
            .filter_map(|c| match c.width {
                ColumnWidth::Fraction(f) => Some(f),
                ColumnWidth::Fixed(_) => None,
            })
            .sum();
        let remaining = (total - fixed).max(0.0);
        self.columns
            .iter()
            .map(|c| match c.width {
                ColumnWidth::Fixed(w) => w,
                ColumnWidth::Fraction(f) if weights > 0.0 => remaining * f / weights,
                ColumnWidth::Fraction(_) => 0.0,
            })
            .collect()
    }

    fn cell_heights(&self, widths: &[f32]) -> Result<Vec<f32>, LayoutError> {
        self.cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| {
                let inner = (w - 2.0 * self.padding).max(0.0);
                Ok(cell.measure(BoxConstraints::tight_width(inner))?.height)
            })
            .collect()
    }
}

impl LayoutNode for Row {
    fn measure(&self, constraints: BoxConstraints) -> Result<Size, LayoutError> {
        if self.cells.len() > self.columns.len() {
            return Err(LayoutError::TooManyCells {
                cells: self.cells.len(),
                columns: self.columns.len(),
            });
        }
        let widths = self.column_widths(constraints.max_width);
        let tallest = self.cell_heights(&widths)?.into_iter().fold(0.0, f32::max);
        let height = (tallest + 2.0 * self.padding).max(self.min_height);
        Ok(Size::new(constraints.max_width, height))
    }

    fn layout(&self, ctx: &mut LayoutContext, constraints: BoxConstraints) -> Result<(), LayoutError> {
        let size = self.measure(constraints)?;
        if let Some(bg) = paint_box(Rect::new(0.0, 0.0, size.width, size.height), self.background, None) {
            ctx.push_element(bg);
        }

        let widths = self.column_widths(size.width);
        let heights = self.cell_heights(&widths)?;
        let mut x = 0.0;
        for ((cell, width), cell_height) in self.cells.iter().zip(&widths).zip(heights) {
            let inner = (width - 2.0 * self.padding).max(0.0);
            let top = (size.height - cell_height) / 2.0;
            let mut child = ctx.child(Rect::new(x + self.padding, top, inner, cell_height));
            cell.layout(&mut child, BoxConstraints::tight_width(inner))?;
            x += width;
        }
        Ok(())
    }

    fn keep_with_next(&self) -> bool {
        self.keep_with_next
    }
}
