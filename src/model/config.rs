use serde::{Deserialize, Serialize};

use super::document::StatusDisplay;

/// Configuration from `phasionary.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub status_display: StatusDisplay,
}

/// Row budgets for the scrolled task list. All values are screen rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Rows kept free below the list for the status/shortcut footer
    #[serde(default = "default_footer_height")]
    pub footer_height: usize,
    #[serde(default = "default_blank_rows")]
    pub blank_rows_after_project: usize,
    #[serde(default = "default_blank_rows")]
    pub blank_rows_between_categories: usize,
    /// Blank rows between a category header and its first task
    #[serde(default = "default_blank_rows")]
    pub blank_rows_after_category_header: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            footer_height: default_footer_height(),
            blank_rows_after_project: default_blank_rows(),
            blank_rows_between_categories: default_blank_rows(),
            blank_rows_after_category_header: default_blank_rows(),
        }
    }
}

fn default_footer_height() -> usize {
    3
}

fn default_blank_rows() -> usize {
    1
}

impl LayoutConfig {
    /// Config with no spacing rows and no footer, handy for exact row arithmetic
    pub fn compact() -> Self {
        LayoutConfig {
            footer_height: 0,
            blank_rows_after_project: 0,
            blank_rows_between_categories: 0,
            blank_rows_after_category_header: 0,
        }
    }
}
