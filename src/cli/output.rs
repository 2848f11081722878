use serde::Serialize;

use crate::tui::pointer::row_map;
use crate::tui::render::line_text;
use crate::tui::state::ViewState;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RowJson {
    pub row: usize,
    pub text: String,
    /// Logical index drawn on this row, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

#[derive(Serialize)]
pub struct ScreenJson {
    pub width: usize,
    pub height: usize,
    pub scroll_offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,
    pub has_more_above: bool,
    pub has_more_below: bool,
    /// Some statuses are hidden
    pub filtered: bool,
    pub rows: Vec<RowJson>,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Rendered list rows as plain text, one line each
pub fn screen_text(view: &ViewState) -> String {
    let mut out = String::new();
    for line in view.visible_lines() {
        out.push_str(line_text(&line).trim_end());
        out.push('\n');
    }
    out
}

pub fn screen_json(view: &ViewState) -> ScreenJson {
    let viewport = view.viewport();
    let (width, height) = view.size();
    let lines = view.visible_lines();
    let positions = row_map(&viewport, lines.len());
    let rows = lines
        .iter()
        .zip(positions)
        .enumerate()
        .map(|(row, (line, position))| RowJson {
            row,
            text: line_text(line).trim_end().to_string(),
            position,
        })
        .collect();
    ScreenJson {
        width,
        height,
        scroll_offset: view.scroll_offset(),
        selected: view.selection().selected(),
        has_more_above: viewport.state().has_more_above,
        has_more_below: viewport.state().has_more_below,
        filtered: view.filter().is_active(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Category, LayoutConfig, Project, StatusDisplay, Task, ViewConfig};

    fn view() -> ViewState {
        let project = Project::new("Roadmap").with_categories(vec![
            Category::new("c1", "Feature").with_tasks(vec![Task::new("t1", "Add export")]),
        ]);
        let config = ViewConfig {
            layout: LayoutConfig::compact(),
            status_display: StatusDisplay::Icons,
        };
        let mut view = ViewState::new(project, config);
        view.resize(30, 10);
        view
    }

    #[test]
    fn text_is_one_line_per_row() {
        assert_eq!(
            screen_text(&view()),
            "> Roadmap\n  ▾ Feature\n  [ ] Add export\n"
        );
    }

    #[test]
    fn json_carries_row_positions() {
        let screen = screen_json(&view());
        assert_eq!(screen.rows.len(), 3);
        assert_eq!(screen.rows[2].position, Some(2));
        assert_eq!(screen.selected, Some(0));
        let value = serde_json::to_value(&screen).unwrap();
        assert_eq!(value["rows"][1]["text"], "  ▾ Feature");
        assert_eq!(value["has_more_below"], false);
        assert_eq!(value["filtered"], false);
    }
}
