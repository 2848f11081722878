/// A focusable node in the document, in depth-first order:
/// the project, then each category followed by its displayed tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Project,
    Category(usize),
    Task { category: usize, task: usize },
}

impl Position {
    pub fn category_index(self) -> Option<usize> {
        match self {
            Position::Project => None,
            Position::Category(category) | Position::Task { category, .. } => Some(category),
        }
    }
}

/// The selected position among all selectable items, independent of scrolling.
///
/// Every mutation clamps instead of failing: an empty list has no selection,
/// otherwise the index is always in `0..len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    positions: Vec<Position>,
    selected: Option<usize>,
}

impl Selection {
    pub fn new(positions: Vec<Position>, initial: usize) -> Self {
        let mut selection = Selection {
            positions,
            selected: Some(initial),
        };
        selection.clamp();
        selection
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_position(&self) -> Option<Position> {
        self.positions.get(self.selected?).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Replace the selectable set, keeping the index (clamped) where it was
    pub fn set_positions(&mut self, positions: Vec<Position>) {
        self.positions = positions;
        self.clamp();
    }

    pub fn set_selected(&mut self, index: usize) {
        self.selected = Some(index);
        self.clamp();
    }

    /// Move by `delta` without wrapping. Returns whether the selection changed.
    pub fn move_by(&mut self, delta: isize) -> bool {
        let Some(current) = self.selected else {
            return false;
        };
        let target = current.saturating_add_signed(delta);
        self.move_to(target)
    }

    /// Select `index` (clamped). Returns whether the selection changed.
    pub fn move_to(&mut self, index: usize) -> bool {
        if self.positions.is_empty() {
            return false;
        }
        let prev = self.selected;
        self.set_selected(index);
        self.selected != prev
    }

    pub fn jump_to_first(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn jump_to_last(&mut self) -> bool {
        self.move_to(self.positions.len().saturating_sub(1))
    }

    pub fn find_position_index<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&Position) -> bool,
    {
        self.positions.iter().position(predicate)
    }

    /// Select the first position matching `predicate`. Leaves the selection
    /// untouched and returns false when nothing matches.
    pub fn select_by_predicate<F>(&mut self, predicate: F) -> bool
    where
        F: Fn(&Position) -> bool,
    {
        match self.find_position_index(predicate) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    fn clamp(&mut self) {
        self.selected = match self.positions.len() {
            0 => None,
            len => Some(self.selected.unwrap_or(0).min(len - 1)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_positions() -> Vec<Position> {
        vec![
            Position::Project,
            Position::Category(0),
            Position::Task { category: 0, task: 0 },
            Position::Task { category: 0, task: 1 },
            Position::Category(1),
        ]
    }

    #[test]
    fn new_clamps_initial() {
        let sel = Selection::new(five_positions(), 99);
        assert_eq!(sel.selected(), Some(4));
        let sel = Selection::new(Vec::new(), 3);
        assert_eq!(sel.selected(), None);
        assert!(sel.is_empty());
    }

    #[test]
    fn move_past_end_is_unchanged() {
        let mut sel = Selection::new(five_positions(), 4);
        assert!(!sel.move_by(1));
        assert_eq!(sel.selected(), Some(4));
    }

    #[test]
    fn move_before_start_is_unchanged() {
        let mut sel = Selection::new(five_positions(), 0);
        assert!(!sel.move_by(-1));
        assert_eq!(sel.selected(), Some(0));
    }

    #[test]
    fn move_by_clamps_large_deltas() {
        let mut sel = Selection::new(five_positions(), 2);
        assert!(sel.move_by(10));
        assert_eq!(sel.selected(), Some(4));
        assert!(sel.move_by(-10));
        assert_eq!(sel.selected(), Some(0));
    }

    #[test]
    fn move_on_empty_is_noop() {
        let mut sel = Selection::default();
        assert!(!sel.move_by(1));
        assert!(!sel.jump_to_last());
        assert!(!sel.jump_to_first());
        assert_eq!(sel.selected_position(), None);
    }

    #[test]
    fn jumps() {
        let mut sel = Selection::new(five_positions(), 2);
        assert!(sel.jump_to_last());
        assert_eq!(sel.selected(), Some(4));
        assert!(!sel.jump_to_last());
        assert!(sel.jump_to_first());
        assert_eq!(sel.selected_position(), Some(Position::Project));
    }

    #[test]
    fn set_positions_clamps_index() {
        let mut sel = Selection::new(five_positions(), 4);
        sel.set_positions(vec![Position::Project, Position::Category(0)]);
        assert_eq!(sel.selected(), Some(1));
        sel.set_positions(Vec::new());
        assert_eq!(sel.selected(), None);
        sel.set_positions(five_positions());
        assert_eq!(sel.selected(), Some(0));
    }

    #[test]
    fn select_by_predicate() {
        let mut sel = Selection::new(five_positions(), 0);
        assert!(sel.select_by_predicate(|p| *p == Position::Task { category: 0, task: 1 }));
        assert_eq!(sel.selected(), Some(3));
        assert!(!sel.select_by_predicate(|p| p.category_index() == Some(7)));
        assert_eq!(sel.selected(), Some(3));
    }

    #[test]
    fn position_accessors() {
        let task = Position::Task { category: 2, task: 5 };
        assert_eq!(task.category_index(), Some(2));
        assert_eq!(Position::Category(1).category_index(), Some(1));
        assert_eq!(Position::Project.category_index(), None);
    }
}
