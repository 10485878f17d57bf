use crate::models::{AppState, Question, SessionStats};
use crate::quiz::QuizEngine;
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug)]
pub struct QuizSession {
    pub current_question: Option<Question>,
    pub selected_index: Option<usize>,
    pub answer_revealed: bool,
    pub last_answer_correct: Option<bool>,
    pub stats: SessionStats,
    pub completed: bool,
    pub last_error: Option<String>,
    pub distractor_count: usize,
}

impl QuizSession {
    pub fn new(distractor_count: usize) -> Self {
        Self {
            current_question: None,
            selected_index: None,
            answer_revealed: false,
            last_answer_correct: None,
            stats: SessionStats::default(),
            completed: false,
            last_error: None,
            distractor_count,
        }
    }

    pub fn load_next(&mut self, engine: &QuizEngine) {
        self.selected_index = None;
        self.answer_revealed = false;
        self.last_answer_correct = None;
        self.last_error = None;

        match engine.next_question(self.distractor_count) {
            Ok(Some(question)) => {
                self.current_question = Some(question);
                self.completed = false;
            }
            Ok(None) => {
                self.current_question = None;
                self.completed = true;
            }
            Err(e) => {
                tracing::error!("Failed to load question: {}", e);
                self.current_question = None;
                self.last_error = Some(format!("Failed to load question: {}", e));
            }
        }
    }

    /// Records the pick in the session counters, then persists it. A failed
    /// write is reported but does not undo the session counters.
    pub fn select_answer(&mut self, index: usize, engine: &QuizEngine) -> Option<bool> {
        if self.answer_revealed {
            return None;
        }
        let question = self.current_question.as_ref()?;
        if index >= question.options.len() {
            return None;
        }

        let is_correct = question.check_answer(index);
        let word_id = question.target.id;

        self.selected_index = Some(index);
        self.answer_revealed = true;
        self.last_answer_correct = Some(is_correct);
        self.stats.record(is_correct);

        if let Err(e) = engine.submit_answer(word_id, is_correct) {
            tracing::error!(word_id, "Failed to save answer: {}", e);
            self.last_error = Some(format!("Progress not saved: {}", e));
        }

        Some(is_correct)
    }

    /// Moves on without touching any statistics.
    pub fn skip(&mut self, engine: &QuizEngine) {
        self.load_next(engine);
    }

    pub fn retry(&mut self, engine: &QuizEngine) {
        self.stats = SessionStats::default();
        self.completed = false;
        self.load_next(engine);
    }
}

pub fn handle_quiz_input(
    session: &mut QuizSession,
    key: KeyEvent,
    engine: &QuizEngine,
    app_state: &mut AppState,
) {
    match key.code {
        KeyCode::Esc => {
            *app_state = AppState::Home;
        }
        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
            let index = c as usize - '1' as usize;
            session.select_answer(index, engine);
        }
        KeyCode::Enter | KeyCode::Right => {
            if session.answer_revealed {
                session.load_next(engine);
            }
        }
        KeyCode::Char('s') => {
            if !session.answer_revealed && !session.completed {
                session.skip(engine);
            }
        }
        KeyCode::Char('r') => {
            if session.completed {
                session.retry(engine);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_OPTION_COUNT;
    use crate::db::{test_db, word};
    use crate::models::NewWord;
    use crossterm::event::KeyModifiers;
    use rusqlite::Connection;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn fill(conn: &Connection, count: usize) {
        for i in 0..count {
            word::insert_word(conn, &NewWord::custom(&format!("w{}", i), &format!("t{}", i), "General"))
                .unwrap();
        }
    }

    #[test]
    fn test_load_next_sets_question() {
        let (_dir, conn) = test_db();
        fill(&conn, 4);
        let engine = QuizEngine::new(&conn);
        let mut session = QuizSession::new(3);

        session.load_next(&engine);
        assert!(session.current_question.is_some());
        assert!(!session.completed);
        assert_eq!(session.current_question.as_ref().unwrap().options.len(), 4);
    }

    #[test]
    fn test_too_few_words_completes_session() {
        let (_dir, conn) = test_db();
        fill(&conn, 2);
        let engine = QuizEngine::new(&conn);
        let mut session = QuizSession::new(3);

        session.load_next(&engine);
        assert!(session.current_question.is_none());
        assert!(session.completed);
    }

    #[test]
    fn test_correct_answer_updates_session_and_store() {
        let (_dir, conn) = test_db();
        fill(&conn, 4);
        let engine = QuizEngine::new(&conn);
        let mut session = QuizSession::new(3);
        session.load_next(&engine);

        let question = session.current_question.clone().unwrap();
        let result = session.select_answer(question.correct_index(), &engine);
        assert_eq!(result, Some(true));
        assert_eq!(session.stats.progress_text(), "1/1");

        let stored = word::get_word_by_id(&conn, question.target.id).unwrap().unwrap();
        assert_eq!(stored.difficulty_level, 1);
        assert_eq!(stored.correct_count, 1);
    }

    #[test]
    fn test_second_selection_is_ignored() {
        let (_dir, conn) = test_db();
        fill(&conn, 4);
        let engine = QuizEngine::new(&conn);
        let mut session = QuizSession::new(3);
        session.load_next(&engine);

        let question = session.current_question.clone().unwrap();
        let wrong = (question.correct_index() + 1) % question.options.len();
        assert_eq!(session.select_answer(wrong, &engine), Some(false));
        assert_eq!(session.select_answer(question.correct_index(), &engine), None);
        assert_eq!(session.stats.answered, 1);
        assert_eq!(session.stats.correct, 0);
    }

    #[test]
    fn test_failed_save_keeps_session_counters() {
        let (_dir, conn) = test_db();
        fill(&conn, 4);
        let engine = QuizEngine::new(&conn);
        let mut session = QuizSession::new(3);
        session.load_next(&engine);

        let question = session.current_question.clone().unwrap();
        word::delete_word(&conn, question.target.id).unwrap();

        assert_eq!(session.select_answer(question.correct_index(), &engine), Some(true));
        assert_eq!(session.stats.correct, 1);
        assert!(session.last_error.is_some());
    }

    #[test]
    fn test_out_of_range_selection_is_ignored() {
        let (_dir, conn) = test_db();
        fill(&conn, 4);
        let engine = QuizEngine::new(&conn);
        let mut session = QuizSession::new(3);
        session.load_next(&engine);

        assert_eq!(session.select_answer(9, &engine), None);
        assert!(!session.answer_revealed);
    }

    #[test]
    fn test_keyboard_flow() {
        let (_dir, conn) = test_db();
        fill(&conn, 4);
        let engine = QuizEngine::new(&conn);
        let mut session = QuizSession::new(3);
        let mut state = AppState::Quiz;
        session.load_next(&engine);

        handle_quiz_input(&mut session, key(KeyCode::Char('1')), &engine, &mut state);
        assert!(session.answer_revealed);
        assert_eq!(session.selected_index, Some(0));

        handle_quiz_input(&mut session, key(KeyCode::Enter), &engine, &mut state);
        assert!(!session.answer_revealed);
        assert!(session.current_question.is_some());

        handle_quiz_input(&mut session, key(KeyCode::Char('s')), &engine, &mut state);
        assert_eq!(session.stats.answered, 1);

        handle_quiz_input(&mut session, key(KeyCode::Esc), &engine, &mut state);
        assert_eq!(state, AppState::Home);
    }

    #[test]
    fn test_every_option_reachable_by_digit_key() {
        let (_dir, conn) = test_db();
        fill(&conn, 20);
        let engine = QuizEngine::new(&conn);
        let mut session = QuizSession::new(MAX_OPTION_COUNT - 1);
        let mut state = AppState::Quiz;

        for _ in 0..30 {
            session.load_next(&engine);
            let question = session.current_question.clone().unwrap();
            assert_eq!(question.options.len(), MAX_OPTION_COUNT);

            let digit = char::from_digit(question.correct_index() as u32 + 1, 10).unwrap();
            handle_quiz_input(&mut session, key(KeyCode::Char(digit)), &engine, &mut state);
            assert_eq!(session.last_answer_correct, Some(true));
        }
        assert_eq!(session.stats.correct, 30);
    }

    #[test]
    fn test_retry_resets_counters() {
        let (_dir, conn) = test_db();
        fill(&conn, 2);
        let engine = QuizEngine::new(&conn);
        let mut session = QuizSession::new(1);
        let mut state = AppState::Quiz;
        session.load_next(&engine);

        // Drive every word to level 5 so the session completes.
        for _ in 0..20 {
            if let Some(question) = session.current_question.clone() {
                session.select_answer(question.correct_index(), &engine);
            }
            session.load_next(&engine);
        }
        assert!(session.completed);
        assert!(session.stats.answered > 0);

        handle_quiz_input(&mut session, key(KeyCode::Char('r')), &engine, &mut state);
        assert_eq!(session.stats, SessionStats::default());
        assert!(session.completed);
    }
}
