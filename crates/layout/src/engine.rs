//! Splits a flat stack of blocks into pages.
//!
//! A block that fits on an empty page is never broken: it either fits in
//! what is left of the current page or moves to the next one. Taller blocks
//! are split where they allow it (between wrapped lines, between a
//! container's children) and continue on the following pages. Spacers are
//! dropped at page boundaries, a block marked `keep_with_next` travels with
//! its successor, and a block that cannot be split to fit an empty page's
//! content area is an error.

use crate::algorithms::pagination::{check_child_fit, exceeds_page};
use crate::interface::{LayoutContext, LayoutNode, Split};
use crate::{LayoutError, PositionedElement};
use log::debug;
use tally_style::Margins;
use tally_types::geometry::{BoxConstraints, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTemplate {
    pub size: Size,
    pub margins: Margins,
    /// Distance between a band and the content area next to it.
    pub band_gap: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandEdge {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandRepeat {
    FirstPage,
    EveryPage,
}

/// Full-bleed content pinned to a page edge, outside the flow.
#[derive(Debug)]
pub struct PageBand {
    pub node: Box<dyn LayoutNode>,
    pub edge: BandEdge,
    pub repeat: BandRepeat,
}

impl PageBand {
    fn applies_to(&self, page_index: usize) -> bool {
        match self.repeat {
            BandRepeat::FirstPage => page_index == 0,
            BandRepeat::EveryPage => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub size: Size,
    pub elements: Vec<PositionedElement>,
}

#[derive(Debug)]
pub struct LayoutEngine {
    template: PageTemplate,
    bands: Vec<PageBand>,
}

impl LayoutEngine {
    pub fn new(template: PageTemplate) -> Self {
        Self {
            template,
            bands: Vec::new(),
        }
    }

    pub fn with_band(mut self, node: impl LayoutNode + 'static, edge: BandEdge, repeat: BandRepeat) -> Self {
        self.bands.push(PageBand {
            node: Box::new(node),
            edge,
            repeat,
        });
        self
    }

    pub fn template(&self) -> &PageTemplate {
        &self.template
    }

    fn band_constraints(&self) -> BoxConstraints {
        BoxConstraints::tight_width(self.template.size.width)
    }

    fn band_extent(&self, page_index: usize, edge: BandEdge) -> Result<Option<f32>, LayoutError> {
        let mut extent = None;
        for band in self.bands.iter().filter(|b| b.edge == edge && b.applies_to(page_index)) {
            let h = band.node.measure(self.band_constraints())?.height;
            extent = Some(extent.map_or(h, |e: f32| e.max(h)));
        }
        Ok(extent)
    }

    /// Region available to flowing content on the given page.
    pub fn content_area(&self, page_index: usize) -> Result<Rect, LayoutError> {
        let PageTemplate {
            size,
            margins,
            band_gap,
        } = self.template;
        let top = match self.band_extent(page_index, BandEdge::Top)? {
            Some(h) => h + band_gap,
            None => margins.top,
        };
        let bottom = match self.band_extent(page_index, BandEdge::Bottom)? {
            Some(h) => h + band_gap,
            None => margins.bottom,
        };
        Ok(Rect::new(
            margins.left,
            top,
            (size.width - margins.horizontal()).max(0.0),
            (size.height - top - bottom).max(0.0),
        ))
    }

    fn start_page(&self, page_index: usize) -> Result<Page, LayoutError> {
        let mut elements = Vec::new();
        let size = self.template.size;
        let constraints = self.band_constraints();
        for band in self.bands.iter().filter(|b| b.applies_to(page_index)) {
            let height = band.node.measure(constraints)?.height;
            let y = match band.edge {
                BandEdge::Top => 0.0,
                BandEdge::Bottom => size.height - height,
            };
            let mut ctx = LayoutContext::new(Rect::new(0.0, y, size.width, height), &mut elements);
            band.node.layout(&mut ctx, constraints)?;
        }
        Ok(Page { size, elements })
    }

    /// Height of the block at `start` plus every block chained to it through
    /// `keep_with_next`, including spacers inside the chain.
    fn chain_height(
        &self,
        nodes: &[Box<dyn LayoutNode>],
        start: usize,
        constraints: BoxConstraints,
    ) -> Result<f32, LayoutError> {
        let mut total = nodes[start].measure(constraints)?.height;
        let mut idx = start;
        while nodes[idx].keep_with_next() || (idx > start && nodes[idx].is_discardable()) {
            idx += 1;
            let Some(next) = nodes.get(idx) else { break };
            total += next.measure(constraints)?.height;
        }
        Ok(total)
    }

    fn next_page(&self, flow: &mut Flow) -> Result<(), LayoutError> {
        let index = flow.page_index + 1;
        let page = std::mem::replace(&mut flow.page, self.start_page(index)?);
        flow.pages.push(page);
        flow.page_index = index;
        flow.area = self.content_area(index)?;
        flow.cursor = 0.0;
        flow.placed = false;
        Ok(())
    }

    pub fn paginate(&self, nodes: &[Box<dyn LayoutNode>]) -> Result<Vec<Page>, LayoutError> {
        let mut flow = Flow {
            pages: Vec::new(),
            page: self.start_page(0)?,
            page_index: 0,
            area: self.content_area(0)?,
            cursor: 0.0,
            placed: false,
        };
        // Remainder of a block that was broken at the previous page end.
        let mut carried: Option<Box<dyn LayoutNode>> = None;
        let mut i = 0;

        while i < nodes.len() {
            let current = carried.take();
            let node: &dyn LayoutNode = match &current {
                Some(rest) => &**rest,
                None => &*nodes[i],
            };
            let area = flow.area;
            let constraints = BoxConstraints::tight_width(area.width);
            let height = node.measure(constraints)?.height;

            if node.is_discardable() {
                if flow.placed {
                    if check_child_fit(flow.cursor, height, area).should_break {
                        debug!("Spacer ends page {} at y={:.1}", flow.page_index + 1, flow.cursor);
                        self.next_page(&mut flow)?;
                    } else {
                        flow.cursor += height;
                    }
                }
                i += 1;
                continue;
            }

            if flow.placed && !exceeds_page(height, area) {
                let mut required = height;
                if node.keep_with_next() && current.is_none() {
                    let chained = self.chain_height(nodes, i, constraints)?;
                    if !exceeds_page(chained, area) {
                        required = chained;
                    }
                }
                if check_child_fit(flow.cursor, required, area).should_break {
                    debug!(
                        "Block {} needs {:.1}pt, {:.1}pt left on page {}; breaking",
                        i,
                        required,
                        area.height - flow.cursor,
                        flow.page_index + 1
                    );
                    self.next_page(&mut flow)?;
                    carried = current;
                    continue;
                }
            }

            if check_child_fit(flow.cursor, height, area).should_break {
                let available = area.height - flow.cursor;
                match node.split(constraints, available)? {
                    Some(Split { head, tail }) => {
                        debug!(
                            "Block {} split at {:.1}pt on page {}",
                            i,
                            available,
                            flow.page_index + 1
                        );
                        let mut ctx = LayoutContext::new(area, &mut flow.page.elements);
                        ctx.set_cursor_y(flow.cursor);
                        head.layout(&mut ctx, constraints)?;
                        self.next_page(&mut flow)?;
                        carried = Some(tail);
                    }
                    None if flow.placed => {
                        self.next_page(&mut flow)?;
                        carried = current;
                    }
                    None => return Err(LayoutError::ElementTooLarge(height, area.height)),
                }
                continue;
            }

            let mut ctx = LayoutContext::new(area, &mut flow.page.elements);
            ctx.set_cursor_y(flow.cursor);
            node.layout(&mut ctx, constraints)?;
            flow.cursor += height;
            flow.placed = true;
            i += 1;
        }

        flow.pages.push(flow.page);
        debug!("Laid out {} block(s) on {} page(s)", nodes.len(), flow.pages.len());
        Ok(flow.pages)
    }
}

/// Pagination state while walking the block stack.
struct Flow {
    pages: Vec<Page>,
    page: Page,
    page_index: usize,
    area: Rect,
    cursor: f32,
    placed: bool,
}
