use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use regex::Regex;

use crate::model::task::Task;
use crate::model::view::{Group, GroupKey, SortMode};
use crate::ops::view::due_bucket;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::{checkbox, spans_width};
use super::{push_highlighted_spans, search_regex};

/// Render the grouped task list
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible_height = area.height as usize;

    app.clamp_cursor();
    let (lines, cursor_row) = {
        let groups = app.session.groups();
        if groups.is_empty() {
            let msg = if app.session.tasks().is_empty() {
                " No tasks found. Add one!"
            } else {
                " No matching tasks"
            };
            let empty =
                Paragraph::new(msg).style(Style::default().fg(app.theme.dim).bg(bg));
            frame.render_widget(empty, area);
            return;
        }
        build_lines(app, &groups, area.width as usize)
    };

    // Keep the cursor row on screen
    if cursor_row < app.scroll_offset {
        app.scroll_offset = cursor_row;
    } else if visible_height > 0 && cursor_row >= app.scroll_offset + visible_height {
        app.scroll_offset = cursor_row + 1 - visible_height;
    }
    let scroll = app.scroll_offset.min(lines.len().saturating_sub(1));

    let end = lines.len().min(scroll + visible_height);
    let visible: Vec<Line> = lines[scroll..end].to_vec();
    let paragraph = Paragraph::new(visible).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// All list lines plus the row index of the cursor task
fn build_lines(app: &App, groups: &[Group], width: usize) -> (Vec<Line<'static>>, usize) {
    let spacing = app.session.settings.font_size.group_spacing();
    let search_re = search_regex(&app.session.query);

    let mut lines = Vec::new();
    let mut cursor_row = 0;
    let mut ordinal = 0;
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            for _ in 0..spacing {
                lines.push(Line::from(""));
            }
        }
        lines.push(group_header_line(app, group));
        for task in &group.tasks {
            let is_cursor = ordinal == app.cursor;
            if is_cursor {
                cursor_row = lines.len();
            }
            lines.push(task_line(app, task, is_cursor, search_re.as_ref(), width));
            ordinal += 1;
        }
    }
    (lines, cursor_row)
}

/// Priority groups: colored letter plus count. Due groups: uppercase bucket
/// name colored by urgency.
fn group_header_line(app: &App, group: &Group) -> Line<'static> {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    match group.key {
        GroupKey::Priority(priority) => {
            spans.push(Span::styled(
                group.label(),
                Style::default()
                    .fg(app.theme.priority_color(priority))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" ({})", group.len()),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
        GroupKey::Due(bucket) => {
            spans.push(Span::styled(
                group.label().to_uppercase(),
                Style::default()
                    .fg(app.theme.due_color(bucket))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }
    Line::from(spans)
}

fn task_line(
    app: &App,
    task: &Task,
    is_cursor: bool,
    search_re: Option<&Regex>,
    width: usize,
) -> Line<'static> {
    let theme = &app.theme;
    let settings = &app.session.settings;
    let bg = if is_cursor { theme.selection_bg } else { theme.background };
    let base = Style::default().bg(bg);

    let mut spans: Vec<Span> = Vec::new();
    if is_cursor {
        spans.push(Span::styled("\u{258C}", base.fg(theme.selection_border)));
    } else {
        spans.push(Span::styled(" ", base));
    }
    spans.push(Span::styled(
        format!("{} ", checkbox(task)),
        base.fg(if task.is_completed { theme.green } else { theme.dim }),
    ));
    if app.session.sort == SortMode::Due
        && let Some(p) = task.priority
    {
        spans.push(Span::styled(
            format!("({}) ", p),
            base.fg(theme.priority_color(Some(p))),
        ));
    }

    // Trailing tags and date, built first so the text can be truncated to fit
    let mut tail: Vec<Span> = Vec::new();
    let due_style = |date: &str| {
        let bucket = due_bucket(Some(date), app.session.today());
        base.fg(theme.due_color(bucket))
    };
    if settings.compact {
        if let Some(due) = &task.due_date {
            tail.push(Span::styled(format!("  {}", due), due_style(due)));
        }
    } else {
        for p in &task.projects {
            tail.push(Span::styled(format!(" +{}", p), base.fg(theme.highlight)));
        }
        for c in &task.contexts {
            tail.push(Span::styled(format!(" @{}", c), base.fg(theme.dim)));
        }
        if let Some(due) = &task.due_date {
            tail.push(Span::styled(format!(" due:{}", due), due_style(due)));
        }
    }

    let text_style = if task.is_completed {
        base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else if is_cursor {
        base.fg(theme.text_bright)
    } else {
        base.fg(theme.text)
    };
    let room = width.saturating_sub(spans_width(&spans) + spans_width(&tail));
    let text = unicode::truncate_to_width(&task.text, room);
    push_highlighted_spans(
        &mut spans,
        &text,
        text_style,
        base.fg(theme.background).bg(theme.yellow),
        search_re,
    );
    spans.extend(tail);

    // Fill the rest of the row so the selection background spans the width
    let used = spans_width(&spans);
    if is_cursor && used < width {
        spans.push(Span::styled(" ".repeat(width - used), base));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::FontSize;
    use crate::tui::render::test_helpers::*;
    use pretty_assertions::assert_eq;

    fn render(app: &mut App, h: u16) -> String {
        render_to_string(TERM_W, h, |frame, area| {
            render_list_view(frame, app, area);
        })
    }

    #[test]
    fn priority_groups_with_counts() {
        let mut app = sample_app();
        let output = render(&mut app, 10);
        assert_eq!(
            output,
            [
                " A (1)",
                "\u{258C}[ ] Pay rent due:2025-06-09",
                "",
                " B (1)",
                " [ ] Email landlord +Home due:2025-06-11",
                "",
                " No Priority (1)",
                " [ ] Read a book",
            ]
            .join("\n")
        );
    }

    #[test]
    fn due_groups_show_priority_badges() {
        let mut app = sample_app();
        app.session.set_sort(SortMode::Due);
        app.session.settings.font_size = FontSize::Small;
        let output = render(&mut app, 10);
        assert_eq!(
            output,
            [
                " OVERDUE",
                "\u{258C}[ ] (A) Pay rent due:2025-06-09",
                " TOMORROW",
                " [ ] (B) Email landlord +Home due:2025-06-11",
                " NO DATE",
                " [ ] Read a book",
            ]
            .join("\n")
        );
    }

    #[test]
    fn compact_rows_show_only_the_date() {
        let mut app = sample_app();
        app.session.settings.compact = true;
        app.cursor = 1;
        let output = render(&mut app, 10);
        assert!(output.contains("\u{258C}[ ] Email landlord  2025-06-11"));
        assert!(!output.contains("+Home"));
    }

    #[test]
    fn empty_store_message() {
        let mut app = empty_app();
        assert_eq!(render(&mut app, 3), " No tasks found. Add one!");
    }

    #[test]
    fn no_match_message() {
        let mut app = sample_app();
        app.session.set_query("zzz");
        assert_eq!(render(&mut app, 3), " No matching tasks");
    }

    #[test]
    fn long_text_is_truncated() {
        let mut app = sample_app();
        app.session.set_query("read");
        let output = render_to_string(20, 3, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert_eq!(output, " No Priority (1)\n\u{258C}[ ] Read a book");

        let output = render_to_string(12, 3, |frame, area| {
            render_list_view(frame, &mut app, area);
        });
        assert!(output.ends_with("\u{258C}[ ] Read a\u{2026}"));
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut app = sample_app();
        app.session.settings.font_size = FontSize::Small;
        app.cursor = 2;
        let output = render(&mut app, 2);
        assert_eq!(output, " No Priority (1)\n\u{258C}[ ] Read a book");
        assert_eq!(app.scroll_offset, 4);
    }
}
