use tracing::debug;

use crate::model::{Category, LayoutConfig, Project, StatusDisplay, Task};
use crate::util::unicode;

use super::filter::StatusFilter;
use super::fold::FoldState;
use super::selection::Position;
use super::wrap;

/// Width of the selection cursor column (`"> "` or two spaces)
pub const CURSOR_WIDTH: usize = 2;

/// Non-wrapping prefix of a category header: cursor column plus fold glyph
pub const CATEGORY_OVERHEAD: usize = CURSOR_WIDTH + 2;

/// What a layout item draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Project,
    Category { category: usize },
    Task { category: usize, task: usize },
    /// "(no tasks)" under a category with nothing to show
    EmptyPlaceholder { category: usize },
    /// "(folded)" under a collapsed category
    Folded { category: usize },
    /// Blank rows
    Spacing,
}

/// A contiguous span of screen rows. Only project, category and task items
/// carry a logical index; those indices run 0, 1, 2, ... in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutItem {
    pub kind: ItemKind,
    /// Screen rows this item occupies (at least 1)
    pub height: usize,
    pub logical_index: Option<usize>,
}

impl LayoutItem {
    fn spacing(rows: usize) -> Self {
        LayoutItem {
            kind: ItemKind::Spacing,
            height: rows,
            logical_index: None,
        }
    }

    /// The focusable node this item draws, if it is selectable
    pub fn position(&self) -> Option<Position> {
        match self.kind {
            ItemKind::Project => Some(Position::Project),
            ItemKind::Category { category } => Some(Position::Category(category)),
            ItemKind::Task { category, task } => Some(Position::Task { category, task }),
            ItemKind::EmptyPlaceholder { .. } | ItemKind::Folded { .. } | ItemKind::Spacing => {
                None
            }
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.logical_index.is_some()
    }
}

/// The project tree flattened into row-spanning items.
///
/// A pure function of the document, fold state, status filter, terminal width
/// and status display mode, rebuilt wholesale whenever any of those change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub items: Vec<LayoutItem>,
    pub total_height: usize,
}

impl Layout {
    /// Selectable positions in layout order. Index `i` of the result is the
    /// position whose item carries logical index `i`.
    pub fn positions(&self) -> Vec<Position> {
        self.items.iter().filter_map(LayoutItem::position).collect()
    }

    pub fn position_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_selectable()).count()
    }

    /// Index into `items` of the item carrying `logical_index`
    pub fn item_index_of(&self, logical_index: usize) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.logical_index == Some(logical_index))
    }

    /// Pull a scroll offset back inside this layout's logical indices
    pub fn clamp_scroll_offset(&self, offset: usize) -> usize {
        offset.min(self.position_count().saturating_sub(1))
    }

    fn push(&mut self, item: LayoutItem) {
        self.total_height += item.height;
        self.items.push(item);
    }
}

/// Text between the cursor column and the task title, e.g. `"[completed] ▲ "`
pub fn task_prefix(task: &Task, display: StatusDisplay) -> String {
    let icon = task
        .priority
        .and_then(|p| p.icon())
        .map(|icon| format!("{icon} "))
        .unwrap_or_default();
    format!("[{}] {}", task.status.label(display), icon)
}

/// Fixed, non-wrapping width drawn before a task title
pub fn task_overhead(task: &Task, display: StatusDisplay) -> usize {
    CURSOR_WIDTH + unicode::display_width(&task_prefix(task, display))
}

/// Tasks of `category` that pass `filter`, with their index in the category
fn displayed_tasks<'a>(
    category: &'a Category,
    filter: Option<&'a StatusFilter>,
) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
    category
        .tasks
        .iter()
        .enumerate()
        .filter(move |(_, task)| filter.is_none_or(|f| f.is_visible(task.status)))
}

fn is_folded(fold: Option<&FoldState>, category: &Category) -> bool {
    fold.is_some_and(|f| f.is_folded(&category.id))
}

/// Selectable positions for `project`, walked straight from the document.
///
/// Must agree with [`Layout::positions`] for a layout built with the same fold
/// state and filter; the selection is fed from here.
pub fn focus_positions(
    project: &Project,
    fold: Option<&FoldState>,
    filter: Option<&StatusFilter>,
) -> Vec<Position> {
    let mut positions = vec![Position::Project];
    for (ci, category) in project.categories.iter().enumerate() {
        positions.push(Position::Category(ci));
        if is_folded(fold, category) {
            continue;
        }
        positions.extend(
            displayed_tasks(category, filter).map(|(ti, _)| Position::Task {
                category: ci,
                task: ti,
            }),
        );
    }
    positions
}

pub struct LayoutBuilder<'a> {
    config: LayoutConfig,
    width: usize,
    status_display: StatusDisplay,
    fold: Option<&'a FoldState>,
    filter: Option<&'a StatusFilter>,
}

impl<'a> LayoutBuilder<'a> {
    /// `width` of 0 means the terminal width is not known yet; nothing wraps.
    pub fn new(config: LayoutConfig, width: usize, status_display: StatusDisplay) -> Self {
        LayoutBuilder {
            config,
            width,
            status_display,
            fold: None,
            filter: None,
        }
    }

    pub fn with_fold(mut self, fold: &'a FoldState) -> Self {
        self.fold = Some(fold);
        self
    }

    pub fn with_filter(mut self, filter: &'a StatusFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn build(&self, project: &Project) -> Layout {
        let mut layout = Layout::default();
        let mut next_index = 0..;
        let mut next = || next_index.next();

        // The project line never wraps
        layout.push(LayoutItem {
            kind: ItemKind::Project,
            height: 1,
            logical_index: next(),
        });
        if self.config.blank_rows_after_project > 0 {
            layout.push(LayoutItem::spacing(self.config.blank_rows_after_project));
        }

        for (ci, category) in project.categories.iter().enumerate() {
            if ci > 0 && self.config.blank_rows_between_categories > 0 {
                layout.push(LayoutItem::spacing(
                    self.config.blank_rows_between_categories,
                ));
            }

            layout.push(LayoutItem {
                kind: ItemKind::Category { category: ci },
                height: wrap::count_lines(&category.name, self.width, CATEGORY_OVERHEAD),
                logical_index: next(),
            });

            if is_folded(self.fold, category) {
                layout.push(LayoutItem {
                    kind: ItemKind::Folded { category: ci },
                    height: 1,
                    logical_index: None,
                });
                continue;
            }

            let mut tasks = displayed_tasks(category, self.filter).peekable();
            if tasks.peek().is_none() {
                layout.push(LayoutItem {
                    kind: ItemKind::EmptyPlaceholder { category: ci },
                    height: 1,
                    logical_index: None,
                });
                continue;
            }

            if self.config.blank_rows_after_category_header > 0 {
                layout.push(LayoutItem::spacing(
                    self.config.blank_rows_after_category_header,
                ));
            }

            // Consecutive tasks have no blank rows between them
            for (ti, task) in tasks {
                layout.push(LayoutItem {
                    kind: ItemKind::Task {
                        category: ci,
                        task: ti,
                    },
                    height: self.task_height(task),
                    logical_index: next(),
                });
            }
        }

        debug!(
            items = layout.items.len(),
            total_height = layout.total_height,
            width = self.width,
            "built layout"
        );
        layout
    }

    fn task_height(&self, task: &Task) -> usize {
        if self.width == 0 {
            return 1;
        }
        let overhead = task_overhead(task, self.status_display);
        wrap::count_lines(&task.title, self.width, overhead)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Priority, TaskStatus};

    fn sample_project() -> Project {
        Project::new("Roadmap").with_categories(vec![
            Category::new("c1", "Feature").with_tasks(vec![
                Task::new("t1", "Add export"),
                Task::new("t2", "Polish help screen").with_status(TaskStatus::Completed),
            ]),
            Category::new("c2", "Fix"),
            Category::new("c3", "Research").with_tasks(vec![Task::new("t3", "Compare editors")]),
        ])
    }

    fn kinds(layout: &Layout) -> Vec<ItemKind> {
        layout.items.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn single_empty_category() {
        let project = Project::new("P").with_categories(vec![Category::new("c", "Cat")]);
        let layout = LayoutBuilder::new(LayoutConfig::default(), 80, StatusDisplay::Text)
            .build(&project);
        assert_eq!(
            kinds(&layout),
            vec![
                ItemKind::Project,
                ItemKind::Spacing,
                ItemKind::Category { category: 0 },
                ItemKind::EmptyPlaceholder { category: 0 },
            ]
        );
        assert!(layout.items.iter().all(|i| i.height == 1));
        assert_eq!(layout.total_height, 4);
        assert_eq!(layout.positions(), vec![Position::Project, Position::Category(0)]);
    }

    #[test]
    fn full_order_with_spacing() {
        let layout = LayoutBuilder::new(LayoutConfig::default(), 80, StatusDisplay::Text)
            .build(&sample_project());
        assert_eq!(
            kinds(&layout),
            vec![
                ItemKind::Project,
                ItemKind::Spacing,
                ItemKind::Category { category: 0 },
                ItemKind::Spacing,
                ItemKind::Task { category: 0, task: 0 },
                ItemKind::Task { category: 0, task: 1 },
                ItemKind::Spacing,
                ItemKind::Category { category: 1 },
                ItemKind::EmptyPlaceholder { category: 1 },
                ItemKind::Spacing,
                ItemKind::Category { category: 2 },
                ItemKind::Spacing,
                ItemKind::Task { category: 2, task: 0 },
            ]
        );
        let indices: Vec<usize> = layout.items.iter().filter_map(|i| i.logical_index).collect();
        assert_eq!(indices, (0..7).collect::<Vec<_>>());
        assert_eq!(layout.total_height, 13);
    }

    #[test]
    fn spacing_knobs_at_zero_emit_no_spacing() {
        let layout = LayoutBuilder::new(LayoutConfig::compact(), 80, StatusDisplay::Text)
            .build(&sample_project());
        assert!(layout.items.iter().all(|i| i.kind != ItemKind::Spacing));
        assert_eq!(layout.total_height, 8);
    }

    #[test]
    fn spacing_rows_are_one_item_of_configured_height() {
        let config = LayoutConfig {
            blank_rows_after_project: 2,
            blank_rows_between_categories: 3,
            ..LayoutConfig::default()
        };
        let layout = LayoutBuilder::new(config, 80, StatusDisplay::Text).build(&sample_project());
        assert_eq!(layout.items[1].kind, ItemKind::Spacing);
        assert_eq!(layout.items[1].height, 2);
        assert_eq!(layout.items[6].kind, ItemKind::Spacing);
        assert_eq!(layout.items[6].height, 3);
    }

    #[test]
    fn category_wraps_around_its_prefix() {
        // width 20 - overhead 4 = 16 columns for the name
        let project = Project::new("P").with_categories(vec![
            Category::new("a", "abcdefghijklmnop"),
            Category::new("b", "abcdefghijklmnopq"),
        ]);
        let layout = LayoutBuilder::new(LayoutConfig::compact(), 20, StatusDisplay::Text)
            .build(&project);
        assert_eq!(layout.items[1].height, 1);
        assert_eq!(layout.items[3].height, 2);
    }

    #[test]
    fn task_overhead_depends_on_status_and_priority() {
        let plain = Task::new("t", "x");
        let high = Task::new("t", "x").with_priority(Priority::High);
        let medium = Task::new("t", "x").with_priority(Priority::Medium);
        // "  " + "[  todo   ] "
        assert_eq!(task_overhead(&plain, StatusDisplay::Text), 14);
        // "  " + "[ ] "
        assert_eq!(task_overhead(&plain, StatusDisplay::Icons), 6);
        assert_eq!(task_overhead(&high, StatusDisplay::Icons), 8);
        assert_eq!(task_overhead(&medium, StatusDisplay::Icons), 6);
        assert_eq!(task_prefix(&high, StatusDisplay::Icons), "[ ] ▲ ");
    }

    #[test]
    fn task_height_uses_its_own_overhead() {
        // Icons: overhead 6 leaves 14 of 20 columns; Text: overhead 14 leaves 6
        let title = "fourteen chars";
        let project = Project::new("P").with_categories(vec![
            Category::new("c", "C").with_tasks(vec![Task::new("t", title)]),
        ]);
        let icons = LayoutBuilder::new(LayoutConfig::compact(), 20, StatusDisplay::Icons)
            .build(&project);
        let text = LayoutBuilder::new(LayoutConfig::compact(), 20, StatusDisplay::Text)
            .build(&project);
        assert_eq!(icons.items[2].height, 1);
        assert_eq!(text.items[2].height, 3);
    }

    #[test]
    fn zero_width_never_wraps() {
        let project = Project::new("P").with_categories(vec![
            Category::new("c", "A category name long enough to wrap anywhere").with_tasks(vec![
                Task::new("t", "A task title that would wrap on any narrow terminal"),
            ]),
        ]);
        let layout = LayoutBuilder::new(LayoutConfig::default(), 0, StatusDisplay::Text)
            .build(&project);
        assert!(layout.items.iter().all(|i| i.height >= 1));
        assert!(
            layout
                .items
                .iter()
                .filter(|i| i.kind != ItemKind::Spacing)
                .all(|i| i.height == 1)
        );
    }

    #[test]
    fn folded_category_hides_tasks() {
        let mut fold = FoldState::new();
        fold.toggle("c1");
        let project = sample_project();
        let layout = LayoutBuilder::new(LayoutConfig::default(), 80, StatusDisplay::Text)
            .with_fold(&fold)
            .build(&project);
        assert_eq!(layout.items[2].kind, ItemKind::Category { category: 0 });
        assert_eq!(layout.items[3].kind, ItemKind::Folded { category: 0 });
        assert_eq!(layout.position_count(), 5);
        assert_eq!(layout.positions(), focus_positions(&project, Some(&fold), None));
    }

    #[test]
    fn filter_hiding_every_task_shows_placeholder() {
        let mut filter = StatusFilter::new();
        filter.toggle(TaskStatus::Todo);
        let project = sample_project();
        let layout = LayoutBuilder::new(LayoutConfig::default(), 80, StatusDisplay::Text)
            .with_filter(&filter)
            .build(&project);
        // c1 keeps only its completed task, c3's only task is hidden
        let positions = layout.positions();
        assert_eq!(
            positions,
            vec![
                Position::Project,
                Position::Category(0),
                Position::Task { category: 0, task: 1 },
                Position::Category(1),
                Position::Category(2),
            ]
        );
        assert_eq!(
            layout.items.last().map(|i| i.kind),
            Some(ItemKind::EmptyPlaceholder { category: 2 })
        );
        assert_eq!(positions, focus_positions(&project, None, Some(&filter)));
    }

    #[test]
    fn item_lookup_and_scroll_clamp() {
        let layout = LayoutBuilder::new(LayoutConfig::default(), 80, StatusDisplay::Text)
            .build(&sample_project());
        assert_eq!(layout.item_index_of(0), Some(0));
        assert_eq!(layout.item_index_of(2), Some(4));
        assert_eq!(layout.item_index_of(99), None);
        assert_eq!(layout.clamp_scroll_offset(0), 0);
        assert_eq!(layout.clamp_scroll_offset(3), 3);
        assert_eq!(layout.clamp_scroll_offset(50), 6);
        assert_eq!(Layout::default().clamp_scroll_offset(5), 0);
    }
}
