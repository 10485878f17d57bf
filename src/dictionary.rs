use crate::db::{category, word};
use crate::error::{Error, Result};
use crate::models::{AppState, Category, NewWord, Word, DEFAULT_CATEGORY, MAX_DIFFICULTY};
use crossterm::event::{KeyCode, KeyEvent};
use rusqlite::Connection;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictionaryFilter {
    pub search_query: String,
    pub category: Option<String>,
    pub difficulty: Option<u8>,
}

impl DictionaryFilter {
    pub fn matches(&self, word: &Word) -> bool {
        let query = self.search_query.trim().to_lowercase();
        if !query.is_empty()
            && !word.original.to_lowercase().contains(&query)
            && !word.translation.to_lowercase().contains(&query)
        {
            return false;
        }

        if let Some(category) = &self.category
            && &word.category != category
        {
            return false;
        }

        if let Some(difficulty) = self.difficulty
            && word.difficulty_level != difficulty
        {
            return false;
        }

        true
    }
}

pub fn apply_filters(words: &[Word], filter: &DictionaryFilter) -> Vec<Word> {
    words.iter().filter(|w| filter.matches(w)).cloned().collect()
}

/// Adds a user word. Blank category falls back to the default one.
pub fn add_word(conn: &Connection, original: &str, translation: &str, category: &str) -> Result<i64> {
    let original = original.trim();
    let translation = translation.trim();
    if original.is_empty() || translation.is_empty() {
        return Err(Error::InvalidInput(
            "word and translation must not be empty".to_string(),
        ));
    }

    let category = match category.trim() {
        "" => DEFAULT_CATEGORY,
        other => other,
    };

    let id = word::insert_word(conn, &NewWord::custom(original, translation, category))?;
    tracing::info!(word_id = id, "Added custom word");
    Ok(id)
}

/// Deletes a user word. Bundled words stay; they can only have their
/// progress reset.
pub fn delete_custom_word(conn: &Connection, word_id: i64) -> Result<()> {
    let existing = word::get_word_by_id(conn, word_id)?.ok_or(Error::WordNotFound(word_id))?;
    if !existing.is_custom {
        return Err(Error::InvalidInput(format!(
            "'{}' is a built-in word and cannot be deleted",
            existing.original
        )));
    }
    word::delete_word(conn, word_id)?;
    tracing::info!(word_id, "Deleted custom word");
    Ok(())
}

pub fn reset_word_progress(conn: &Connection, word_id: i64) -> Result<()> {
    word::reset_progress(conn, word_id)?;
    tracing::info!(word_id, "Reset word progress");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Original,
    Translation,
    Category,
}

impl AddField {
    fn next(self) -> Self {
        match self {
            AddField::Original => AddField::Translation,
            AddField::Translation => AddField::Category,
            AddField::Category => AddField::Original,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddForm {
    pub original: String,
    pub translation: String,
    pub category: String,
}

impl AddForm {
    pub fn field_mut(&mut self, field: AddField) -> &mut String {
        match field {
            AddField::Original => &mut self.original,
            AddField::Translation => &mut self.translation,
            AddField::Category => &mut self.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DictionaryMode {
    Browse,
    Search,
    Add { form: AddForm, field: AddField },
}

#[derive(Debug)]
pub struct DictionaryView {
    pub words: Vec<Word>,
    pub filtered: Vec<Word>,
    pub categories: Vec<Category>,
    pub filter: DictionaryFilter,
    pub selected_index: usize,
    pub mode: DictionaryMode,
    pub status: Option<String>,
}

impl Default for DictionaryView {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryView {
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            filtered: Vec::new(),
            categories: Vec::new(),
            filter: DictionaryFilter::default(),
            selected_index: 0,
            mode: DictionaryMode::Browse,
            status: None,
        }
    }

    pub fn reload(&mut self, conn: &Connection) {
        match word::get_all_words(conn) {
            Ok(words) => self.words = words,
            Err(e) => {
                tracing::error!("Failed to load words: {}", e);
                self.status = Some(format!("Failed to load words: {}", e));
            }
        }

        let mut categories = category::get_all_categories(conn).unwrap_or_else(|e| {
            tracing::error!("Failed to load categories: {}", e);
            Vec::new()
        });
        // Imported words may use labels that have no category row.
        if let Ok(used) = category::get_used_category_names(conn) {
            for name in used {
                if categories.iter().any(|c| c.name == name) {
                    continue;
                }
                let word_count = word::count_by_category(conn, &name).unwrap_or_default();
                categories.push(Category {
                    name,
                    icon: String::new(),
                    color: String::new(),
                    word_count,
                });
            }
        }
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        self.categories = categories;

        self.refilter();
    }

    pub fn refilter(&mut self) {
        self.filtered = apply_filters(&self.words, &self.filter);
        self.selected_index = self
            .selected_index
            .min(self.filtered.len().saturating_sub(1));
    }

    pub fn selected_word(&self) -> Option<&Word> {
        self.filtered.get(self.selected_index)
    }

    pub fn active_category(&self) -> Option<&Category> {
        let name = self.filter.category.as_ref()?;
        self.categories.iter().find(|c| &c.name == name)
    }

    pub fn cycle_category(&mut self) {
        self.filter.category = match &self.filter.category {
            None => self.categories.first().map(|c| c.name.clone()),
            Some(current) => self
                .categories
                .iter()
                .position(|c| &c.name == current)
                .and_then(|i| self.categories.get(i + 1))
                .map(|c| c.name.clone()),
        };
        self.refilter();
    }

    pub fn cycle_difficulty(&mut self) {
        self.filter.difficulty = match self.filter.difficulty {
            None => Some(0),
            Some(level) if level < MAX_DIFFICULTY => Some(level + 1),
            Some(_) => None,
        };
        self.refilter();
    }

    fn submit_add_form(&mut self, conn: &Connection, form: &AddForm) -> bool {
        match add_word(conn, &form.original, &form.translation, &form.category) {
            Ok(_) => {
                self.status = Some(format!("Added '{}'", form.original.trim()));
                self.reload(conn);
                true
            }
            Err(e) => {
                self.status = Some(e.to_string());
                false
            }
        }
    }
}

pub fn handle_dictionary_input(
    view: &mut DictionaryView,
    key: KeyEvent,
    conn: &Connection,
    app_state: &mut AppState,
) {
    match view.mode.clone() {
        DictionaryMode::Search => match key.code {
            KeyCode::Esc | KeyCode::Enter => view.mode = DictionaryMode::Browse,
            KeyCode::Backspace => {
                view.filter.search_query.pop();
                view.refilter();
            }
            KeyCode::Char(c) => {
                view.filter.search_query.push(c);
                view.refilter();
            }
            _ => {}
        },
        DictionaryMode::Add { mut form, field } => match key.code {
            KeyCode::Esc => view.mode = DictionaryMode::Browse,
            KeyCode::Tab => {
                view.mode = DictionaryMode::Add {
                    form,
                    field: field.next(),
                }
            }
            KeyCode::Enter => {
                if view.submit_add_form(conn, &form) {
                    view.mode = DictionaryMode::Browse;
                }
            }
            KeyCode::Backspace => {
                form.field_mut(field).pop();
                view.mode = DictionaryMode::Add { form, field };
            }
            KeyCode::Char(c) => {
                form.field_mut(field).push(c);
                view.mode = DictionaryMode::Add { form, field };
            }
            _ => {}
        },
        DictionaryMode::Browse => match key.code {
            KeyCode::Esc => *app_state = AppState::Home,
            KeyCode::Up => {
                view.selected_index = view.selected_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if view.selected_index < view.filtered.len().saturating_sub(1) {
                    view.selected_index += 1;
                }
            }
            KeyCode::Char('/') => {
                view.status = None;
                view.mode = DictionaryMode::Search;
            }
            KeyCode::Char('c') => view.cycle_category(),
            KeyCode::Char('l') => view.cycle_difficulty(),
            KeyCode::Char('a') => {
                view.status = None;
                view.mode = DictionaryMode::Add {
                    form: AddForm::default(),
                    field: AddField::Original,
                };
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(selected) = view.selected_word().map(|w| w.id) {
                    view.status = Some(match delete_custom_word(conn, selected) {
                        Ok(()) => "Word deleted".to_string(),
                        Err(e) => e.to_string(),
                    });
                    view.reload(conn);
                }
            }
            KeyCode::Char('r') => {
                if let Some(selected) = view.selected_word().map(|w| w.id) {
                    view.status = Some(match reset_word_progress(conn, selected) {
                        Ok(()) => "Progress reset".to_string(),
                        Err(e) => e.to_string(),
                    });
                    view.reload(conn);
                }
            }
            _ => {}
        },
    }
}
