use crate::models::Statistics;
use crate::ui::layout::calculate_screen_chunks;
use crate::ui::{draw_header, draw_help, draw_status, help_line};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::from(format!("{:<14}", label)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

pub fn draw_home(f: &mut Frame, stats: &Statistics, error: Option<&str>) {
    let layout = calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, "Word Quiz");

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(5),
        ])
        .split(layout.content_area);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Learned"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((stats.progress_percentage() as f64 / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} / {} ({:.0}%)",
            stats.learned_words,
            stats.total_words,
            stats.progress_percentage()
        ));
    f.render_widget(progress, content[0]);

    let mut text = Text::default();
    text.push_line(stat_line("Total words", stats.total_words.to_string(), Color::White));
    text.push_line(stat_line("Learned", stats.learned_words.to_string(), Color::Green));
    text.push_line(stat_line(
        "In progress",
        stats.in_progress_words.to_string(),
        Color::Yellow,
    ));
    text.push_line(stat_line(
        "Not started",
        stats.not_started_words.to_string(),
        Color::DarkGray,
    ));
    text.push_line(Line::from(""));
    text.push_line(stat_line(
        "Answers",
        format!(
            "{} correct, {} wrong",
            stats.total_correct_answers, stats.total_wrong_answers
        ),
        Color::White,
    ));
    text.push_line(stat_line(
        "Accuracy",
        format!("{:.0}%", stats.overall_accuracy()),
        Color::Cyan,
    ));
    let summary =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Statistics"));
    f.render_widget(summary, content[1]);

    let menu = Paragraph::new(vec![
        Line::from("[1] Start quiz"),
        Line::from("[2] Dictionary"),
        Line::from("[3] Settings"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Menu"));
    f.render_widget(menu, content[2]);

    draw_status(f, layout.status_area, None, error);
    draw_help(
        f,
        layout.help_area,
        vec![help_line(&[
            ("1/Enter", "Quiz"),
            ("2", "Dictionary"),
            ("3", "Settings"),
            ("q", "Quit"),
        ])],
    );
}
