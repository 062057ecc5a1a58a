use ratatui::layout::{Rect, Size};

/// Return a rectangle of the given size centered within `area`, shrunk to fit
/// if `area` is too small.  Leftover space that cannot be split evenly goes to
/// the right & bottom.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
