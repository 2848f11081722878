use std::collections::HashSet;

use crate::model::TaskStatus;

/// Which task statuses are hidden from the list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    hidden: HashSet<TaskStatus>,
}

impl StatusFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, status: TaskStatus) -> bool {
        !self.hidden.contains(&status)
    }

    /// Show or hide a status. Returns true if the status is now visible.
    pub fn toggle(&mut self, status: TaskStatus) -> bool {
        if self.hidden.remove(&status) {
            true
        } else {
            self.hidden.insert(status);
            false
        }
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    /// True when at least one status is hidden
    pub fn is_active(&self) -> bool {
        !self.hidden.is_empty()
    }
}
