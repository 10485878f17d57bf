use crate::dictionary::{AddField, AddForm, DictionaryMode, DictionaryView};
use crate::models::Word;
use crate::ui::layout::{calculate_dictionary_chunks, centered_rect};
use crate::ui::{draw_header, draw_help, draw_status, help_line};
use crate::utils::{difficulty_bar, format_review_date, pad_to_width, truncate_string};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const ORIGINAL_WIDTH: usize = 22;
const TRANSLATION_WIDTH: usize = 22;
const CATEGORY_WIDTH: usize = 14;

fn word_row(word: &Word) -> String {
    let marker = if word.is_custom { "*" } else { " " };
    format!(
        "{} {} {} {} {} {:>4.0}%  {}",
        marker,
        pad_to_width(&truncate_string(&word.original, ORIGINAL_WIDTH), ORIGINAL_WIDTH),
        pad_to_width(
            &truncate_string(&word.translation, TRANSLATION_WIDTH),
            TRANSLATION_WIDTH
        ),
        pad_to_width(&truncate_string(&word.category, CATEGORY_WIDTH), CATEGORY_WIDTH),
        difficulty_bar(word.difficulty_level),
        word.accuracy(),
        format_review_date(word.last_reviewed_at),
    )
}

fn category_label(view: &DictionaryView) -> String {
    match (view.active_category(), &view.filter.category) {
        (Some(category), _) if category.icon.is_empty() => {
            format!("{} ({})", category.name, category.word_count)
        }
        (Some(category), _) => format!(
            "{} {} ({})",
            category.icon, category.name, category.word_count
        ),
        (None, Some(name)) => name.clone(),
        (None, None) => "all".to_string(),
    }
}

fn filter_line(view: &DictionaryView) -> Line<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Yellow);
    let search = if view.mode == DictionaryMode::Search {
        format!("{}_", view.filter.search_query)
    } else if view.filter.search_query.is_empty() {
        "-".to_string()
    } else {
        view.filter.search_query.clone()
    };

    Line::from(vec![
        Span::styled("Search: ", label),
        Span::styled(search, value),
        Span::styled("  Category: ", label),
        Span::styled(category_label(view), value),
        Span::styled("  Level: ", label),
        Span::styled(
            view.filter
                .difficulty
                .map_or_else(|| "all".to_string(), |level| level.to_string()),
            value,
        ),
    ])
}

fn draw_add_form(f: &mut Frame, form: &AddForm, active: AddField) {
    let area = centered_rect(50, 9, f.area());
    f.render_widget(Clear, area);

    let field = |label: &str, value: &str, this: AddField| {
        let style = if this == active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if this == active { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{:<12}", label), style),
            Span::from(format!("{}{}", value, cursor)),
        ])
    };

    let lines = vec![
        field("Word", &form.original, AddField::Original),
        field("Translation", &form.translation, AddField::Translation),
        field("Category", &form.category, AddField::Category),
        Line::from(""),
        help_line(&[("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Cancel")]),
    ];
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Add word")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(popup, area);
}

pub fn draw_dictionary(f: &mut Frame, view: &DictionaryView) {
    let layout = calculate_dictionary_chunks(f.area());
    draw_header(
        f,
        layout.header_area,
        &format!(
            "Dictionary - {} of {} words",
            view.filtered.len(),
            view.words.len()
        ),
    );

    let filters = Paragraph::new(filter_line(view))
        .block(Block::default().borders(Borders::ALL).title("Filters"));
    f.render_widget(filters, layout.filter_area);

    let items: Vec<ListItem> = if view.filtered.is_empty() {
        vec![ListItem::new("No words match").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        view.filtered
            .iter()
            .map(|word| {
                let item = ListItem::new(word_row(word));
                if word.is_learned() {
                    item.style(Style::default().fg(Color::Green))
                } else {
                    item
                }
            })
            .collect()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Words"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !view.filtered.is_empty() {
        state.select(Some(view.selected_index));
    }
    f.render_stateful_widget(list, layout.list_area, &mut state);

    draw_status(f, layout.status_area, view.status.as_deref(), None);

    let help = match view.mode {
        DictionaryMode::Search => help_line(&[("Enter/Esc", "Done"), ("Backspace", "Delete")]),
        _ => help_line(&[
            ("↑/↓", "Navigate"),
            ("/", "Search"),
            ("c", "Category"),
            ("l", "Level"),
            ("a", "Add"),
            ("x", "Delete"),
            ("r", "Reset"),
            ("Esc", "Home"),
        ]),
    };
    draw_help(f, layout.help_area, vec![help]);

    if let DictionaryMode::Add { form, field } = &view.mode {
        draw_add_form(f, form, *field);
    }
}
