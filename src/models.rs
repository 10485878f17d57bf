use chrono::{DateTime, Utc};

pub const MAX_DIFFICULTY: u8 = 5;
pub const LEARNED_THRESHOLD: u8 = 4;
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub id: i64,
    pub original: String,
    pub translation: String,
    pub category: String,
    /// 0 = unseen or struggling, 5 = fully learned. Always within `0..=5`.
    pub difficulty_level: u8,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
}

impl Word {
    /// Share of correct answers in percent, 0 when never answered.
    pub fn accuracy(&self) -> f32 {
        let total = self.correct_count + self.wrong_count;
        if total > 0 {
            (self.correct_count as f32 / total as f32) * 100.0
        } else {
            0.0
        }
    }

    pub fn is_learned(&self) -> bool {
        self.difficulty_level >= LEARNED_THRESHOLD
    }
}

/// A word that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWord {
    pub original: String,
    pub translation: String,
    pub category: String,
    pub is_custom: bool,
}

impl NewWord {
    pub fn custom(original: &str, translation: &str, category: &str) -> Self {
        Self {
            original: original.to_string(),
            translation: translation.to_string(),
            category: category.to_string(),
            is_custom: true,
        }
    }

    pub fn seed(original: &str, translation: &str, category: &str) -> Self {
        Self {
            is_custom: false,
            ..Self::custom(original, translation, category)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub word_count: usize,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub target: Word,
    pub options: Vec<Word>,
}

impl Question {
    /// Position of the target among the options, matched by id rather than
    /// by text since two words may share a translation.
    pub fn correct_index(&self) -> usize {
        self.options
            .iter()
            .position(|w| w.id == self.target.id)
            .unwrap_or(0)
    }

    pub fn check_answer(&self, selected_index: usize) -> bool {
        selected_index == self.correct_index()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub total_words: usize,
    pub learned_words: usize,
    pub in_progress_words: usize,
    pub not_started_words: usize,
    pub total_correct_answers: u64,
    pub total_wrong_answers: u64,
}

impl Statistics {
    pub fn progress_percentage(&self) -> f32 {
        if self.total_words > 0 {
            (self.learned_words as f32 / self.total_words as f32) * 100.0
        } else {
            0.0
        }
    }

    pub fn overall_accuracy(&self) -> f32 {
        let total = self.total_correct_answers + self.total_wrong_answers;
        if total > 0 {
            (self.total_correct_answers as f32 / total as f32) * 100.0
        } else {
            0.0
        }
    }
}

/// Counters for the running quiz session. Independent of the per-word
/// counters in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub answered: u32,
    pub correct: u32,
}

impl SessionStats {
    pub fn record(&mut self, was_correct: bool) {
        self.answered += 1;
        if was_correct {
            self.correct += 1;
        }
    }

    pub fn progress_text(&self) -> String {
        format!("{}/{}", self.correct, self.answered)
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.answered > 0 {
            self.correct as f64 / self.answered as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Quiz,
    Dictionary,
    Settings,
}

impl AppState {
    pub const ALL: [AppState; 4] = [
        AppState::Home,
        AppState::Quiz,
        AppState::Dictionary,
        AppState::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AppState::Home => "Home",
            AppState::Quiz => "Quiz",
            AppState::Dictionary => "Dictionary",
            AppState::Settings => "Settings",
        }
    }
}
