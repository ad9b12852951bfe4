use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::view::SortMode;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the header: title or search box on the left, sort chips on the
/// right, separator line below
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title + chips
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_title_row(frame, app, chunks[0]);

    let sep = Paragraph::new(Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )));
    frame.render_widget(sep, chunks[1]);
}

fn render_title_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let chips = sort_chips(app);
    let chips_w = spans_width(&chips);

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    let searching = app.mode == Mode::Search || !app.session.query.is_empty();
    if searching {
        // Search box: /query▌ (cursor only while typing)
        let style = if app.mode == Mode::Search {
            Style::default().fg(app.theme.text_bright).bg(bg)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        let room = width.saturating_sub(chips_w + 4);
        spans.push(Span::styled(
            unicode::truncate_to_width(&format!("/{}", app.session.query), room),
            style,
        ));
        if app.mode == Mode::Search {
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
        }
    } else {
        spans.push(Span::styled(
            "\u{25C6}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(
            " sleek",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let left_w = spans_width(&spans);
    if left_w + chips_w < width {
        spans.push(Span::styled(
            " ".repeat(width - left_w - chips_w),
            Style::default().bg(bg),
        ));
        spans.extend(chips);
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// One chip per sort mode; the active one is highlighted
fn sort_chips(app: &App) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let mut spans = Vec::new();
    for (mode, label) in [(SortMode::Priority, "Priority"), (SortMode::Due, "Due Date")] {
        let style = if app.session.sort == mode {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }
    spans
}
