use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::spans_width;

/// Render the status row (bottom of screen): a transient message on the left,
/// key hints for the current mode on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(msg) = &app.status_message {
        let fg = if app.status_is_error {
            app.theme.red
        } else {
            app.theme.text_bright
        };
        spans.push(Span::styled(format!(" {}", msg), Style::default().fg(fg).bg(bg)));
    }

    let hint = match app.mode {
        Mode::Navigate => "n new  e edit  space done  / search  s sort  , settings  q quit",
        Mode::Search => "Enter keep  Esc clear",
        Mode::Form => "Tab next  Enter save  Esc cancel",
        Mode::Settings => "Enter change  Esc close",
    };
    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count() + 1;
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn hints_follow_mode() {
        let mut app = empty_app();
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.ends_with("q quit"));

        app.mode = Mode::Search;
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.ends_with("Esc clear"));
    }

    #[test]
    fn message_on_the_left() {
        let mut app = empty_app();
        app.set_error("invalid due date 'x'");
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(output.starts_with(" invalid due date 'x'"));
    }
}
