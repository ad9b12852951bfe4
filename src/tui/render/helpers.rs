use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::model::task::Task;
use crate::util::unicode;

/// Checkbox symbol for a task (markdown checkbox style)
pub(super) fn checkbox(task: &Task) -> &'static str {
    if task.is_completed { "[x]" } else { "[ ]" }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// A `width` x `height` rect centered in `area`, clipped to it
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
