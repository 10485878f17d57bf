use crate::config::Config;
use crate::settings::SettingsView;
use crate::ui::layout::calculate_screen_chunks;
use crate::ui::{draw_header, draw_help, draw_status, help_line};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_settings(f: &mut Frame, view: &SettingsView, config: &Config) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, "Settings");

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(layout.content_area);

    let path = Paragraph::new(view.path_buffer.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Dictionary file"),
    );
    f.render_widget(path, content[0]);

    let before_cursor: String = view.path_buffer.chars().take(view.cursor_position).collect();
    let cursor_x = content[0].x + 1 + before_cursor.width() as u16;
    if !view.busy && cursor_x < content[0].right().saturating_sub(1) {
        f.set_cursor_position((cursor_x, content[0].y + 1));
    }

    let dim = Style::default().fg(Color::DarkGray);
    let info = vec![
        Line::from(vec![
            Span::styled("Database:  ", dim),
            Span::from(config.db_path.display().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Log file:  ", dim),
            Span::from(config.log_path().display().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Options:   ", dim),
            Span::from(format!("{} per question", config.option_count)),
        ]),
    ];
    let info = Paragraph::new(info)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Storage"));
    f.render_widget(info, content[1]);

    let message = if view.busy {
        Some("Working...")
    } else {
        view.message.as_deref()
    };
    draw_status(f, layout.status_area, message, view.error.as_deref());

    draw_help(
        f,
        layout.help_area,
        vec![help_line(&[
            ("Ctrl+E", "Export"),
            ("Ctrl+O", "Import"),
            ("Ctrl+L", "Clear"),
            ("Esc", "Home"),
        ])],
    );
}
