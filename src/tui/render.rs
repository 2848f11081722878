use ratatui::text::Line;

use crate::model::{Project, StatusDisplay};
use crate::util::unicode::truncate_to_width;

use super::fold::FoldState;
use super::layout::{CATEGORY_OVERHEAD, CURSOR_WIDTH, ItemKind, LayoutItem, task_overhead, task_prefix};
use super::viewport::Viewport;
use super::wrap::wrap_with_prefix;

pub const MORE_ABOVE: &str = "  ↑ more above";
pub const MORE_BELOW: &str = "  ↓ more below";

/// Turns the visible window into plain text lines, one per screen row
pub struct RowRenderer<'a> {
    pub project: &'a Project,
    pub fold: &'a FoldState,
    pub status_display: StatusDisplay,
    pub width: usize,
    /// Selected logical index
    pub selected: Option<usize>,
}

impl RowRenderer<'_> {
    pub fn lines(&self, viewport: &Viewport<'_>) -> Vec<Line<'static>> {
        let state = viewport.state();
        let mut lines = Vec::with_capacity(viewport.available_height());
        if state.has_more_above {
            lines.push(Line::from(MORE_ABOVE));
        }
        for (item, span) in viewport.visible_items() {
            let rows = self.item_lines(item);
            lines.extend(
                rows.into_iter()
                    .chain(std::iter::repeat(String::new()))
                    .take(span.rows)
                    .map(Line::from),
            );
        }
        if state.has_more_below {
            lines.push(Line::from(MORE_BELOW));
        }
        lines
    }

    fn cursor(&self, item: &LayoutItem) -> &'static str {
        if item.logical_index.is_some() && item.logical_index == self.selected {
            "> "
        } else {
            "  "
        }
    }

    fn item_lines(&self, item: &LayoutItem) -> Vec<String> {
        let cursor = self.cursor(item);
        match item.kind {
            ItemKind::Project => {
                let name = if self.width == 0 {
                    self.project.name.clone()
                } else {
                    truncate_to_width(&self.project.name, self.width.saturating_sub(CURSOR_WIDTH))
                };
                vec![format!("{cursor}{name}")]
            }
            ItemKind::Category { category } => {
                let Some(cat) = self.project.categories.get(category) else {
                    return Vec::new();
                };
                let glyph = if self.fold.is_folded(&cat.id) { "▸ " } else { "▾ " };
                let prefix = format!("{cursor}{glyph}");
                wrap_with_prefix(&cat.name, self.width, CATEGORY_OVERHEAD, &prefix)
            }
            ItemKind::Task { category, task } => {
                let Some(t) = self.project.task(category, task) else {
                    return Vec::new();
                };
                let prefix = format!("{cursor}{}", task_prefix(t, self.status_display));
                let overhead = task_overhead(t, self.status_display);
                wrap_with_prefix(&t.title, self.width, overhead, &prefix)
            }
            ItemKind::EmptyPlaceholder { .. } => vec!["    (no tasks)".to_string()],
            ItemKind::Folded { .. } => vec!["    (folded)".to_string()],
            ItemKind::Spacing => Vec::new(),
        }
    }
}

/// Text of a rendered line without styling
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
