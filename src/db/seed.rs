use crate::db::{category, word};
use crate::error::Result;
use crate::models::{Category, NewWord};
use rusqlite::Connection;

/// (name, icon, color)
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Materials", "⚙️", "#FF6B6B"),
    ("Medical", "⚕️", "#4ECDC4"),
    ("General", "📚", "#95E1D3"),
    ("Social", "👥", "#FFE66D"),
    ("Science", "🔬", "#A8E6CF"),
    ("Time", "⏰", "#FFD3B6"),
    ("Family", "👪", "#FFAAA5"),
    ("Culture", "🎭", "#FF8B94"),
    ("Communication", "💬", "#B4A7D6"),
    ("Language", "🗣️", "#D4A5A5"),
    ("Fun", "🎉", "#FFDAC1"),
];

/// (original, translation, category)
pub const DEFAULT_WORDS: &[(&str, &str, &str)] = &[
    ("Aluminium", "алюминий", "Materials"),
    ("Anaesthetist", "анестезиолог", "Medical"),
    ("Anonymous", "анонимный", "General"),
    ("Ethnicity", "этническая принадлежность", "Social"),
    ("Facilitate", "облегчать", "General"),
    ("February", "февраль", "Time"),
    ("Hereditary", "наследственный", "Science"),
    ("Hospitable", "гостеприимный", "Social"),
    ("Onomatopoeia", "звукоподражание", "Language"),
    ("Particularly", "в особенности", "General"),
    ("Phenomenon", "феномен", "Science"),
    ("Philosophical", "философский", "Culture"),
    ("Prejudice", "предубеждение", "Social"),
    ("Prioritising", "определение приоритетов", "General"),
    ("Pronunciation", "произношение", "Language"),
    ("Provocatively", "вызывающе", "Communication"),
    ("Regularly", "регулярно", "Time"),
    ("Remuneration", "вознаграждение", "General"),
    ("Statistics", "статистические данные", "Science"),
    ("Thesaurus", "справочник", "General"),
];

/// Fills an empty dictionary with the bundled categories and words. Returns
/// the number of words inserted, 0 when the dictionary already had content.
pub fn seed_if_empty(conn: &Connection) -> Result<usize> {
    if word::count_all(conn)? > 0 {
        return Ok(0);
    }

    let categories: Vec<Category> = DEFAULT_CATEGORIES
        .iter()
        .map(|(name, icon, color)| Category {
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            word_count: 0,
        })
        .collect();
    category::insert_categories(conn, &categories)?;

    let words: Vec<NewWord> = DEFAULT_WORDS
        .iter()
        .map(|(original, translation, category)| NewWord::seed(original, translation, category))
        .collect();
    word::insert_words(conn, &words)
}
