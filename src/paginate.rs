//! Greedy pagination of laid-out blocks.
//!
//! Blocks are atomic: a page is sealed as soon as the next block would run
//! past the usable height, and a block taller than a whole page is placed
//! on a page of its own.

use tracing::debug;

use crate::{
    blocks::Block,
    layout::{BlockLayout, layout_block},
    measure::Metrics,
    style::StyleConfig,
};

/// A block with the layout it was paginated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBlock {
    pub block: Block,
    pub layout: BlockLayout,
}

/// One output image's worth of blocks, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T = PlacedBlock> {
    items: Vec<T>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn items(&self) -> &[T] { &self.items }

    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    #[must_use]
    pub fn into_items(self) -> Vec<T> { self.items }
}

impl Page {
    pub fn blocks(&self) -> impl Iterator<Item = &Block> { self.items.iter().map(|p| &p.block) }
}

/// Accumulator that groups items of known height into pages.
#[derive(Debug)]
pub struct Paginator<T> {
    top: u32,
    usable_height: u32,
    current_y: u32,
    current: Vec<T>,
    pages: Vec<Page<T>>,
}

impl<T> Paginator<T> {
    /// Start with an empty page whose content begins at `top`.
    #[must_use]
    pub fn new(top: u32, usable_height: u32) -> Self {
        Self {
            top,
            usable_height,
            current_y: top,
            current: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Paginator for the geometry of `style`.
    #[must_use]
    pub fn for_style(style: &StyleConfig) -> Self {
        Self::new(style.page.margin_top, style.usable_height())
    }

    /// Place `item`, sealing the current page first if it would overflow.
    pub fn push(&mut self, item: T, height: u32) {
        let bottom = self.current_y.saturating_add(height);
        if bottom > self.usable_height && !self.current.is_empty() {
            debug!(
                page = self.pages.len() + 1,
                blocks = self.current.len(),
                "sealing page"
            );
            self.seal();
            self.current_y = self.top.saturating_add(height);
        } else {
            self.current_y = bottom;
        }
        self.current.push(item);
    }

    fn seal(&mut self) {
        let items = std::mem::take(&mut self.current);
        self.pages.push(Page { items });
    }

    /// Seal the last page, if it holds anything, and return all pages.
    #[must_use]
    pub fn finish(mut self) -> Vec<Page<T>> {
        if !self.current.is_empty() {
            self.seal();
        }
        self.pages
    }
}

/// Lay out `blocks` and group them into pages.
///
/// No blocks yield no pages.
#[must_use]
pub fn paginate<M: Metrics + ?Sized>(
    blocks: Vec<Block>,
    metrics: &M,
    style: &StyleConfig,
) -> Vec<Page> {
    let content_width = style.content_width();
    let mut paginator = Paginator::for_style(style);
    for block in blocks {
        let layout = layout_block(&block, content_width, metrics, style);
        let height = layout.height;
        debug!(kind = block.kind_name(), height, "laid out block");
        paginator.push(PlacedBlock { block, layout }, height);
    }
    paginator.finish()
}
