pub mod layout;
mod dictionary;
mod home;
mod quiz;
mod settings;

use crate::app::App;
use crate::models::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub use dictionary::draw_dictionary;
pub use home::draw_home;
pub use layout::{calculate_dictionary_chunks, calculate_quiz_chunks, calculate_screen_chunks};
pub use quiz::draw_quiz;
pub use settings::draw_settings;

pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Home => draw_home(f, &app.statistics, app.home_error.as_deref()),
        AppState::Quiz => draw_quiz(f, &app.quiz),
        AppState::Dictionary => draw_dictionary(f, &app.dictionary),
        AppState::Settings => draw_settings(f, &app.settings, app.config()),
    }
}

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// "Key Label  Key Label" line with highlighted keys.
pub(crate) fn help_line(entries: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(entries.len() * 2);
    for (i, (key, label)) in entries.iter().enumerate() {
        spans.push(Span::styled(key.to_string(), key_style()));
        let separator = if i + 1 < entries.len() { "  " } else { "" };
        spans.push(Span::from(format!(" {}{}", label, separator)));
    }
    Line::from(spans)
}

pub(crate) fn draw_header(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub(crate) fn draw_help(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let help = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

/// Status box: errors in red take precedence over info messages.
pub(crate) fn draw_status(f: &mut Frame, area: Rect, message: Option<&str>, error: Option<&str>) {
    let (text, style) = match (error, message) {
        (Some(error), _) => (error, Style::default().fg(Color::Red)),
        (None, Some(message)) => (message, Style::default().fg(Color::Green)),
        (None, None) => ("", Style::default()),
    };
    let status = Paragraph::new(text.to_string())
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
