use crossterm::event::MouseEvent;
use ratatui::text::Line;
use tracing::debug;

use crate::model::{Project, StatusDisplay, TaskStatus, ViewConfig};

use super::filter::StatusFilter;
use super::fold::FoldState;
use super::layout::{Layout, LayoutBuilder, focus_positions};
use super::pointer;
use super::render::RowRenderer;
use super::selection::{Position, Selection};
use super::viewport::Viewport;

/// Identity of a selected node that survives a rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
enum ItemKey {
    Project,
    Category(String),
    Task(String),
}

fn item_key(project: &Project, pos: Position) -> Option<ItemKey> {
    match pos {
        Position::Project => Some(ItemKey::Project),
        Position::Category(ci) => project
            .categories
            .get(ci)
            .map(|c| ItemKey::Category(c.id.clone())),
        Position::Task { category, task } => project
            .task(category, task)
            .map(|t| ItemKey::Task(t.id.clone())),
    }
}

/// One open document on screen: the document, its fold and filter state, the
/// selection, the scroll offset and the terminal size.
///
/// Every stimulus runs the same ordered cycle: mutate the document or view
/// state, rebuild the selectable set and the layout, then move the scroll
/// offset so the selection stays on screen.
pub struct ViewState {
    project: Project,
    config: ViewConfig,
    fold: FoldState,
    filter: StatusFilter,
    selection: Selection,
    scroll_offset: usize,
    width: usize,
    height: usize,
    layout: Layout,
}

impl ViewState {
    /// A view of `project` with nothing folded or hidden, selecting the project
    /// line. The terminal size starts unknown (0 x 0) until [`resize`].
    ///
    /// [`resize`]: ViewState::resize
    pub fn new(project: Project, config: ViewConfig) -> Self {
        let positions = focus_positions(&project, None, None);
        let mut state = ViewState {
            project,
            config,
            fold: FoldState::new(),
            filter: StatusFilter::new(),
            selection: Selection::new(positions, 0),
            scroll_offset: 0,
            width: 0,
            height: 0,
            layout: Layout::default(),
        };
        state.rebuild();
        state
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn fold(&self) -> &FoldState {
        &self.fold
    }

    pub fn filter(&self) -> &StatusFilter {
        &self.filter
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The window at the current scroll offset
    pub fn viewport(&self) -> Viewport<'_> {
        let mut viewport = Viewport::new(&self.layout, self.height, self.config.layout);
        viewport.compute_visibility(self.scroll_offset);
        viewport
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        debug!(width, height, "resize");
        let rewrap = width != self.width;
        self.width = width;
        self.height = height;
        if rewrap {
            self.rebuild();
        }
        self.ensure_selected_visible();
    }

    pub fn set_status_display(&mut self, display: StatusDisplay) {
        if self.config.status_display == display {
            return;
        }
        self.config.status_display = display;
        self.rebuild();
        self.ensure_selected_visible();
    }

    // Navigation

    /// Move the selection by `delta`. Returns whether it moved.
    pub fn move_selection(&mut self, delta: isize) -> bool {
        let moved = self.selection.move_by(delta);
        if moved {
            self.ensure_selected_visible();
        }
        moved
    }

    pub fn select_first(&mut self) -> bool {
        let moved = self.selection.jump_to_first();
        self.ensure_selected_visible();
        moved
    }

    pub fn select_last(&mut self) -> bool {
        let moved = self.selection.jump_to_last();
        self.ensure_selected_visible();
        moved
    }

    /// Select logical index `index` (clamped)
    pub fn select_position(&mut self, index: usize) -> bool {
        let moved = self.selection.move_to(index);
        self.ensure_selected_visible();
        moved
    }

    /// Scroll so the selection sits near the middle of the window. Tall items
    /// above it can leave the centered offset short; the selection still ends
    /// up on screen.
    pub fn center_on_selected(&mut self) {
        let Some(selected) = self.selection.selected() else {
            self.scroll_offset = 0;
            return;
        };
        let centered = self.viewport().center_on_position(selected);
        self.scroll_offset = centered;
        self.ensure_selected_visible();
        debug!(selected, centered, offset = self.scroll_offset, "centered on selection");
    }

    // Fold

    /// Fold or unfold the selected category, or the category of the selected
    /// task. Returns false when the project line is selected.
    pub fn toggle_fold(&mut self) -> bool {
        let Some(ci) = self
            .selection
            .selected_position()
            .and_then(Position::category_index)
        else {
            return false;
        };
        let Some(category) = self.project.categories.get(ci) else {
            return false;
        };
        let id = category.id.clone();
        // Folding from a task leaves the cursor on its header
        self.selection
            .select_by_predicate(|p| *p == Position::Category(ci));
        let folded = self.fold.toggle(&id);
        debug!(category = %id, folded, "toggled fold");
        self.rebuild_keeping_selection();
        true
    }

    /// Fold the category with `category_id`. Returns false if there is none.
    pub fn fold_category(&mut self, category_id: &str) -> bool {
        if !self.project.categories.iter().any(|c| c.id == category_id) {
            return false;
        }
        if !self.fold.is_folded(category_id) {
            self.fold.toggle(category_id);
            self.rebuild_keeping_selection();
        }
        true
    }

    pub fn fold_all(&mut self) {
        let ids: Vec<String> = self.project.categories.iter().map(|c| c.id.clone()).collect();
        self.fold.fold_all(ids);
        self.rebuild_keeping_selection();
    }

    pub fn unfold_all(&mut self) {
        self.fold.unfold_all();
        self.rebuild_keeping_selection();
    }

    // Filter

    /// Show or hide tasks with `status`. Returns whether they are now shown.
    pub fn toggle_status(&mut self, status: TaskStatus) -> bool {
        let visible = self.filter.toggle(status);
        debug!(?status, visible, "toggled status filter");
        self.rebuild_keeping_selection();
        visible
    }

    pub fn show_all_statuses(&mut self) {
        self.filter.show_all();
        self.rebuild_keeping_selection();
    }

    /// Swap in a new version of the document, keeping the selection on the
    /// same item when it still exists.
    pub fn replace_document(&mut self, project: Project) {
        let key = self.selected_key();
        let parent = self.selected_category_key();
        self.project = project;
        self.rebuild();
        self.reselect(key, parent);
        self.ensure_selected_visible();
    }

    // Pointer

    /// Select whatever is drawn on list row `row`. Returns whether the row
    /// holds a selectable item.
    pub fn click(&mut self, row: usize) -> bool {
        let Some(pos) = self.viewport().row_to_position(row) else {
            return false;
        };
        self.selection.move_to(pos);
        self.ensure_selected_visible();
        true
    }

    /// Handle a mouse event for a list drawn starting at terminal row `area_top`
    pub fn handle_mouse(&mut self, event: &MouseEvent, area_top: u16) -> bool {
        match pointer::clicked_row(event, area_top) {
            Some(row) => self.click(row),
            None => false,
        }
    }

    // Rendering

    pub fn visible_lines(&self) -> Vec<Line<'static>> {
        let renderer = RowRenderer {
            project: &self.project,
            fold: &self.fold,
            status_display: self.config.status_display,
            width: self.width,
            selected: self.selection.selected(),
        };
        renderer.lines(&self.viewport())
    }

    fn rebuild(&mut self) {
        let positions = focus_positions(&self.project, Some(&self.fold), Some(&self.filter));
        self.selection.set_positions(positions);
        self.layout = LayoutBuilder::new(self.config.layout, self.width, self.config.status_display)
            .with_fold(&self.fold)
            .with_filter(&self.filter)
            .build(&self.project);
        debug_assert_eq!(self.layout.positions(), self.selection.positions());
        self.scroll_offset = self.layout.clamp_scroll_offset(self.scroll_offset);
    }

    /// Rebuild after a fold or filter change. A selected task that disappears
    /// hands the selection to its category header.
    fn rebuild_keeping_selection(&mut self) {
        let key = self.selected_key();
        let parent = self.selected_category_key();
        self.rebuild();
        self.reselect(key, parent);
        self.ensure_selected_visible();
    }

    fn selected_key(&self) -> Option<ItemKey> {
        item_key(&self.project, self.selection.selected_position()?)
    }

    fn selected_category_key(&self) -> Option<ItemKey> {
        let ci = self.selection.selected_position()?.category_index()?;
        item_key(&self.project, Position::Category(ci))
    }

    fn select_key(&mut self, key: &ItemKey) -> bool {
        let project = &self.project;
        self.selection
            .select_by_predicate(|p| item_key(project, *p).as_ref() == Some(key))
    }

    fn reselect(&mut self, key: Option<ItemKey>, fallback: Option<ItemKey>) {
        let found = key.is_some_and(|k| self.select_key(&k))
            || fallback.is_some_and(|k| self.select_key(&k));
        if !found {
            self.selection.jump_to_first();
        }
    }

    fn ensure_selected_visible(&mut self) {
        let Some(selected) = self.selection.selected() else {
            self.scroll_offset = 0;
            return;
        };
        let mut viewport = Viewport::new(&self.layout, self.height, self.config.layout);
        viewport.compute_visibility(self.scroll_offset);
        let offset = viewport.ensure_visible(selected);
        self.scroll_offset = offset;
    }
}
