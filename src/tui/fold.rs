use std::collections::HashSet;

/// Collapsed categories, keyed by category ID so folds survive reordering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldState {
    folded: HashSet<String>,
}

impl FoldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_folded(&self, category_id: &str) -> bool {
        self.folded.contains(category_id)
    }

    /// Flip a category's fold. Returns the new folded state.
    pub fn toggle(&mut self, category_id: &str) -> bool {
        if self.folded.remove(category_id) {
            false
        } else {
            self.folded.insert(category_id.to_string());
            true
        }
    }

    pub fn fold_all<I, S>(&mut self, category_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folded.extend(category_ids.into_iter().map(Into::into));
    }

    pub fn unfold_all(&mut self) {
        self.folded.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}
