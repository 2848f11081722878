use std::ops::Range;

use tracing::{debug, trace};

use crate::model::LayoutConfig;

use super::layout::{Layout, LayoutItem};

/// Screen rows given to one visible item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// First screen row of the item, counted from the top of the list area
    pub row_start: usize,
    /// Rows drawn. Equals the item height except for an oversized first item,
    /// which is cut to the rows available.
    pub rows: usize,
}

impl RowSpan {
    pub fn contains(&self, row: usize) -> bool {
        row >= self.row_start && row < self.row_start + self.rows
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub scroll_offset: usize,
    /// First visible index into `Layout::items`
    pub visible_start: usize,
    /// One past the last visible index into `Layout::items`
    pub visible_end: usize,
    pub has_more_above: bool,
    pub has_more_below: bool,
    /// One span per visible item, in order
    pub spans: Vec<RowSpan>,
}

impl ViewportState {
    pub fn visible_range(&self) -> Range<usize> {
        self.visible_start..self.visible_end
    }

    /// Whether the layout item at `item_index` is in the visible window
    pub fn shows_item(&self, item_index: usize) -> bool {
        self.visible_range().contains(&item_index)
    }

    /// Rows used by item content, excluding indicators
    pub fn content_rows(&self) -> usize {
        self.spans.iter().map(|s| s.rows).sum()
    }

    /// Rows used by content plus "more above/below" indicators
    pub fn used_rows(&self) -> usize {
        self.content_rows() + usize::from(self.has_more_above) + usize::from(self.has_more_below)
    }
}

/// The scrolled window over a [`Layout`].
///
/// The scroll offset is a logical index, not a row: scrolling to `n` puts the
/// item carrying logical index `n` at the top, with one row above it taken by the
/// "more above" indicator. The state is recomputed from scratch for each offset.
pub struct Viewport<'a> {
    layout: &'a Layout,
    config: LayoutConfig,
    screen_height: usize,
    state: ViewportState,
}

impl<'a> Viewport<'a> {
    /// A viewport over `layout`, scrolled to the top
    pub fn new(layout: &'a Layout, screen_height: usize, config: LayoutConfig) -> Self {
        let mut viewport = Viewport {
            layout,
            config,
            screen_height,
            state: ViewportState::default(),
        };
        viewport.compute_visibility(0);
        viewport
    }

    pub fn layout(&self) -> &'a Layout {
        self.layout
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn scroll_offset(&self) -> usize {
        self.state.scroll_offset
    }

    /// Rows left for the list once the footer is taken. Never less than 1.
    pub fn available_height(&self) -> usize {
        if self.screen_height <= self.config.footer_height {
            return 1;
        }
        self.screen_height - self.config.footer_height
    }

    fn content_height(&self, reserve_more_below: bool) -> usize {
        self.available_height()
            .saturating_sub(usize::from(self.state.has_more_above))
            .saturating_sub(usize::from(reserve_more_below))
            .max(1)
    }

    /// Recompute the visible window for `scroll_offset`.
    pub fn compute_visibility(&mut self, scroll_offset: usize) -> &ViewportState {
        self.state = ViewportState {
            scroll_offset,
            has_more_above: scroll_offset > 0,
            ..ViewportState::default()
        };

        if self.layout.items.is_empty() {
            return &self.state;
        }

        // Offset 0 always starts at the project line, whatever the height
        self.state.visible_start = if scroll_offset == 0 {
            0
        } else {
            self.layout
                .items
                .iter()
                .position(|item| item.logical_index.is_some_and(|li| li >= scroll_offset))
                .unwrap_or(0)
        };

        // First try without a "more below" row; if content spills over, redo it
        // with the row reserved, which can push one more item off the bottom.
        self.compute_visible_range(false);
        if self.state.has_more_below {
            self.compute_visible_range(true);
        }
        &self.state
    }

    fn compute_visible_range(&mut self, reserve_more_below: bool) {
        let avail = self.content_height(reserve_more_below);
        let first_row = usize::from(self.state.has_more_above);
        let start = self.state.visible_start;
        let mut used = 0;

        self.state.has_more_below = false;
        self.state.visible_end = start;
        self.state.spans.clear();

        for (i, item) in self.layout.items.iter().enumerate().skip(start) {
            let rows = if used + item.height <= avail {
                item.height
            } else if i == start {
                // Taller than the whole window: show as much as fits
                avail
            } else {
                self.state.has_more_below = true;
                break;
            };
            self.state.spans.push(RowSpan {
                row_start: first_row + used,
                rows,
            });
            used += rows;
            self.state.visible_end = i + 1;
        }

        if self.state.visible_end < self.layout.items.len() {
            self.state.has_more_below = true;
        }
    }

    /// Smallest scroll change that brings logical position `pos` into view.
    ///
    /// Scrolls up straight to `pos`, or down one logical item at a time. Leaves
    /// the viewport computed at the returned offset. Positions not in the layout
    /// keep the current offset.
    pub fn ensure_visible(&mut self, pos: usize) -> usize {
        let mut offset = self.state.scroll_offset;
        let Some(target) = self.layout.item_index_of(pos) else {
            return offset;
        };

        if pos < offset {
            debug!(from = offset, to = pos, "scrolling up to selection");
            self.compute_visibility(pos);
            return pos;
        }

        self.compute_visibility(offset);
        if self.state.shows_item(target) {
            return offset;
        }

        while offset < pos {
            offset += 1;
            self.compute_visibility(offset);
            trace!(offset, target, "stepping scroll offset");
            if self.state.shows_item(target) {
                break;
            }
        }
        debug!(to = offset, pos, "scrolled down to selection");
        offset
    }

    /// Scroll offset that puts `pos` roughly in the middle of the window.
    ///
    /// Best effort in one pass over the preceding items; never greater than
    /// `pos`. Positions not in the layout give 0.
    pub fn center_on_position(&self, pos: usize) -> usize {
        let Some(target) = self.layout.item_index_of(pos) else {
            return 0;
        };

        // Two rows for the indicators
        let avail = self.available_height().saturating_sub(2).max(1);
        let target_height = self.layout.items[target].height;
        let space_above = avail.saturating_sub(target_height) / 2;

        let mut used = 0;
        let mut offset = 0;
        for (i, item) in self.layout.items[..target].iter().enumerate() {
            let Some(li) = item.logical_index else {
                used += item.height;
                continue;
            };
            let grown = used + item.height;
            if grown > space_above && i > 0 {
                offset = li;
                used = item.height;
            } else {
                used = grown;
            }
        }

        offset.min(pos)
    }

    /// Logical index drawn on screen `row`, counted from the top of the list
    /// area. Indicator, spacing and placeholder rows, and rows past the last
    /// visible item, map to `None`.
    pub fn row_to_position(&self, row: usize) -> Option<usize> {
        self.visible_items()
            .find(|(_, span)| span.contains(row))
            .and_then(|(item, _)| item.logical_index)
    }

    /// Visible layout items with their screen spans
    pub fn visible_items(&self) -> impl Iterator<Item = (&'a LayoutItem, RowSpan)> + '_ {
        let layout = self.layout;
        layout.items[self.state.visible_range()]
            .iter()
            .zip(self.state.spans.iter().copied())
    }
}
