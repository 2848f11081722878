use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::viewport::Viewport;

/// Logical position under each of the first `screen_height` rows
pub fn row_map(viewport: &Viewport<'_>, screen_height: usize) -> Vec<Option<usize>> {
    (0..screen_height)
        .map(|row| viewport.row_to_position(row))
        .collect()
}

/// List-area row of a left-button press, if the event is one and lands at or
/// below `area_top`
pub fn clicked_row(event: &MouseEvent, area_top: u16) -> Option<usize> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            event.row.checked_sub(area_top).map(usize::from)
        }
        _ => None,
    }
}
