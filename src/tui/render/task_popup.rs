use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField, FormState};
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

const LABEL_W: usize = 10;

/// Render the new/edit task popup
pub fn render_task_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.form else {
        return;
    };

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let bg = app.theme.background;

    let mut lines: Vec<Line> = vec![Line::from("")];
    for field in FormField::ALL {
        lines.push(field_line(app, state, field, inner_w));
    }
    lines.push(Line::from(""));

    if let Some(err) = &state.error {
        lines.push(Line::from(Span::styled(
            unicode::truncate_to_width(&format!(" {}", err), inner_w),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    } else {
        let hint = if state.is_edit() {
            " Enter save  Esc cancel  Ctrl-d delete"
        } else {
            " Enter save  Esc cancel"
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    // Dynamic height from content + 2 for borders
    let popup_h = (lines.len() as u16) + 2;
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let title = if state.is_edit() { " Edit task " } else { " New task " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn field_line(app: &App, state: &FormState, field: FormField, inner_w: usize) -> Line<'static> {
    let bg = app.theme.background;
    let focused = state.field == field;
    let value = state.value(field);
    let room = inner_w.saturating_sub(LABEL_W + 2);

    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let mut spans = vec![Span::styled(
        format!(" {:<width$}", field.label(), width = LABEL_W),
        label_style,
    )];

    if room == 0 {
        return Line::from(spans);
    }

    if !focused {
        if value.is_empty() {
            spans.push(Span::styled(
                field.placeholder(),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        } else {
            spans.push(Span::styled(
                unicode::truncate_to_width(value, room),
                Style::default().fg(app.theme.text).bg(bg),
            ));
        }
        return Line::from(spans);
    }

    // Focused: scroll horizontally so the cursor stays visible
    let cursor = state.cursor.min(value.len());
    let cursor_col = unicode::byte_offset_to_display_col(value, cursor);
    let start = if cursor_col >= room {
        unicode::display_col_to_byte_offset(value, cursor_col + 1 - room).min(cursor)
    } else {
        0
    };
    let under = unicode::grapheme_at(value, cursor);
    let after_start = cursor + under.len();
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);

    spans.push(Span::styled(value[start..cursor].to_string(), text_style));
    spans.push(Span::styled(
        if under.is_empty() { " ".to_string() } else { under.to_string() },
        text_style.add_modifier(Modifier::REVERSED),
    ));
    let used = unicode::display_width(&value[start..after_start]) + 1;
    spans.push(Span::styled(
        unicode::truncate_to_width(&value[after_start..], room.saturating_sub(used)),
        text_style,
    ));
    Line::from(spans)
}
