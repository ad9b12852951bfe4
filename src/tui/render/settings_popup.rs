use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, SettingsRow};

use super::helpers::centered_rect_fixed;

/// Render the settings popup
pub fn render_settings_popup(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let settings = &app.session.settings;

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, row) in SettingsRow::ALL.iter().enumerate() {
        let (label, value) = match row {
            SettingsRow::FontSize => ("Font size", settings.font_size.to_string()),
            SettingsRow::Compact => (
                "Compact",
                if settings.compact { "on" } else { "off" }.to_string(),
            ),
        };
        let selected = i == app.settings_cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };
        let label_style = if selected {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<12}", label), label_style),
            Span::styled(
                format!("\u{2039} {} \u{203A} ", value),
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Font size sets spacing between groups",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let popup_w: u16 = 44.min(area.width.saturating_sub(2));
    let popup_h = (lines.len() as u16) + 2;
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Settings ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        overlay_area,
    );
}
