use crate::session::QuizSession;
use crate::ui::layout::calculate_quiz_chunks;
use crate::ui::{draw_header, draw_help, help_line};
use crate::utils::difficulty_bar;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn option_style(session: &QuizSession, index: usize, correct_index: usize) -> Style {
    if !session.answer_revealed {
        return Style::default();
    }
    if index == correct_index {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if session.selected_index == Some(index) {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_completed(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_quiz_chunks(f.area());
    draw_header(f, layout.header_area, "Quiz");

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        "Nothing left to practise",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "Session score: {}",
        session.stats.progress_text()
    )));
    text.push_line(Line::from(
        "Every word is either learned or there are too few words for a question.",
    ));
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.options_area);

    draw_help(
        f,
        layout.help_area,
        vec![help_line(&[("r", "Try again"), ("Esc", "Home")])],
    );
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession) {
    let Some(question) = &session.current_question else {
        if session.completed {
            draw_completed(f, session);
        } else {
            let layout = calculate_quiz_chunks(f.area());
            draw_header(f, layout.header_area, "Quiz");
            let message = session
                .last_error
                .as_deref()
                .unwrap_or("Loading question...");
            let body = Paragraph::new(message.to_string())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(body, layout.options_area);
            draw_help(f, layout.help_area, vec![help_line(&[("Esc", "Home")])]);
        }
        return;
    };

    let layout = calculate_quiz_chunks(f.area());
    draw_header(
        f,
        layout.header_area,
        &format!(
            "Quiz - score {} ({:.0}%)",
            session.stats.progress_text(),
            session.stats.progress_ratio() * 100.0
        ),
    );

    let target = &question.target;
    let question_text = Text::from(vec![
        Line::from(Span::styled(
            target.original.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}  {}", target.category, difficulty_bar(target.difficulty_level)),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    let question_widget = Paragraph::new(question_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Translate"));
    f.render_widget(question_widget, layout.question_area);

    let correct_index = question.correct_index();
    let options: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            Line::from(Span::styled(
                format!("[{}] {}", i + 1, option.translation),
                option_style(session, i, correct_index),
            ))
        })
        .collect();
    let options_widget = Paragraph::new(options)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options_widget, layout.options_area);

    let feedback = match (session.last_answer_correct, &session.last_error) {
        (_, Some(error)) => Span::styled(error.clone(), Style::default().fg(Color::Red)),
        (Some(true), None) => Span::styled("Correct!", Style::default().fg(Color::Green)),
        (Some(false), None) => Span::styled(
            format!("Wrong. {} = {}", target.original, target.translation),
            Style::default().fg(Color::Red),
        ),
        (None, None) => Span::from(""),
    };
    let feedback_widget =
        Paragraph::new(Line::from(feedback)).block(Block::default().borders(Borders::ALL));
    f.render_widget(feedback_widget, layout.feedback_area);

    let help = if session.answer_revealed {
        help_line(&[("Enter", "Next"), ("Esc", "Home"), ("Ctrl+C", "Exit App")])
    } else {
        let last = question.options.len().to_string();
        let pick = format!("1-{}", last);
        help_line(&[
            (pick.as_str(), "Answer"),
            ("s", "Skip"),
            ("Esc", "Home"),
            ("Ctrl+C", "Exit App"),
        ])
    };
    draw_help(f, layout.help_area, vec![help]);
}
