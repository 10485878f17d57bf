use crate::db::word;
use crate::error::{Error, Result};
use crate::models::{Question, Statistics, Word, LEARNED_THRESHOLD, MAX_DIFFICULTY};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::Connection;

/// Priority buckets for target selection. Fully learned words (level 5)
/// belong to no tier and are never asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Unseen = 0,
    Struggling = 1,
    Practising = 2,
}

impl Tier {
    pub fn of(level: u8) -> Option<Tier> {
        match level {
            0 => Some(Tier::Unseen),
            1 => Some(Tier::Struggling),
            2..=4 => Some(Tier::Practising),
            _ => None,
        }
    }

    pub fn weight(self) -> u32 {
        TIER_WEIGHTS[self as usize]
    }
}

/// Relative odds of drawing from each tier, indexed by `Tier as usize`.
pub const TIER_WEIGHTS: [u32; 3] = [6, 3, 1];

/// Picks a quiz target: a tier is drawn from the non-empty tiers with
/// [`TIER_WEIGHTS`], then a word uniformly within it.
pub fn pick_target<R: Rng + ?Sized>(candidates: Vec<Word>, rng: &mut R) -> Option<Word> {
    let mut tiers: [Vec<Word>; 3] = Default::default();
    for candidate in candidates {
        if let Some(tier) = Tier::of(candidate.difficulty_level) {
            tiers[tier as usize].push(candidate);
        }
    }

    let weights: Vec<u32> = tiers
        .iter()
        .zip(TIER_WEIGHTS)
        .map(|(words, weight)| if words.is_empty() { 0 } else { weight })
        .collect();

    // Fails only when every tier is empty.
    let tier_dist = WeightedIndex::new(&weights).ok()?;
    let tier = &mut tiers[tier_dist.sample(rng)];
    let index = rng.gen_range(0..tier.len());
    Some(tier.swap_remove(index))
}

pub struct QuizEngine<'a> {
    conn: &'a Connection,
}

impl<'a> QuizEngine<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Builds the next multiple-choice question with `distractor_count`
    /// wrong options. `Ok(None)` means there is nothing left to ask or too
    /// few words to fill the options.
    pub fn next_question(&self, distractor_count: usize) -> Result<Option<Question>> {
        self.next_question_with(distractor_count, &mut rand::thread_rng())
    }

    pub fn next_question_with<R: Rng + ?Sized>(
        &self,
        distractor_count: usize,
        rng: &mut R,
    ) -> Result<Option<Question>> {
        if distractor_count == 0 {
            return Err(Error::InvalidInput(
                "a question needs at least one distractor".to_string(),
            ));
        }

        let candidates = word::quiz_candidates(self.conn)?;
        let Some(target) = pick_target(candidates, rng) else {
            tracing::debug!("No quiz candidates left");
            return Ok(None);
        };

        let distractors = word::random_distractors(self.conn, target.id, distractor_count)?;
        if distractors.len() < distractor_count {
            tracing::debug!(
                available = distractors.len(),
                needed = distractor_count,
                "Not enough words for distractors"
            );
            return Ok(None);
        }

        let mut options = distractors;
        options.push(target.clone());
        options.shuffle(rng);

        Ok(Some(Question { target, options }))
    }

    /// Moves the word one level up (correct) or down (wrong) within
    /// `0..=5`, bumps the matching counter and stamps the review time.
    pub fn submit_answer(&self, word_id: i64, was_correct: bool) -> Result<()> {
        let timestamp = word::now_millis();
        if was_correct {
            word::mark_correct(self.conn, word_id, timestamp)?;
        } else {
            word::mark_wrong(self.conn, word_id, timestamp)?;
        }
        tracing::debug!(word_id, was_correct, "Answer recorded");
        Ok(())
    }

    pub fn statistics(&self) -> Result<Statistics> {
        let (total_correct_answers, total_wrong_answers) = word::sum_attempts(self.conn)?;

        Ok(Statistics {
            total_words: word::count_all(self.conn)?,
            learned_words: word::count_by_level_range(self.conn, LEARNED_THRESHOLD, MAX_DIFFICULTY)?,
            in_progress_words: word::count_by_level_range(self.conn, 1, LEARNED_THRESHOLD - 1)?,
            not_started_words: word::count_by_level_range(self.conn, 0, 0)?,
            total_correct_answers,
            total_wrong_answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;
    use crate::models::NewWord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn add_word(conn: &Connection, original: &str, level: u8) -> i64 {
        let id = word::insert_word(conn, &NewWord::custom(original, &format!("{}-tr", original), "General"))
            .unwrap();
        conn.execute(
            "UPDATE words SET difficulty_level = ? WHERE id = ?",
            rusqlite::params![level, id],
        )
        .unwrap();
        id
    }

    fn level_of(conn: &Connection, id: i64) -> u8 {
        word::get_word_by_id(conn, id).unwrap().unwrap().difficulty_level
    }

    #[test]
    fn test_tier_of_level() {
        assert_eq!(Tier::of(0), Some(Tier::Unseen));
        assert_eq!(Tier::of(1), Some(Tier::Struggling));
        assert_eq!(Tier::of(2), Some(Tier::Practising));
        assert_eq!(Tier::of(4), Some(Tier::Practising));
        assert_eq!(Tier::of(5), None);
        assert!(Tier::Unseen.weight() > Tier::Struggling.weight());
        assert!(Tier::Struggling.weight() > Tier::Practising.weight());
    }

    #[test]
    fn test_zero_distractors_rejected() {
        let (_dir, conn) = test_db();
        let engine = QuizEngine::new(&conn);
        assert!(matches!(
            engine.next_question(0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_dictionary_has_no_question() {
        let (_dir, conn) = test_db();
        let engine = QuizEngine::new(&conn);
        assert!(engine.next_question(1).unwrap().is_none());
    }

    #[test]
    fn test_all_learned_has_no_question() {
        let (_dir, conn) = test_db();
        for i in 0..5 {
            add_word(&conn, &format!("w{}", i), 5);
        }
        let engine = QuizEngine::new(&conn);
        assert!(engine.next_question(3).unwrap().is_none());
    }

    #[test]
    fn test_single_word_cannot_fill_distractors() {
        let (_dir, conn) = test_db();
        add_word(&conn, "alone", 0);

        let engine = QuizEngine::new(&conn);
        assert!(engine.next_question(3).unwrap().is_none());
    }

    #[test]
    fn test_three_words_two_distractors() {
        let (_dir, conn) = test_db();
        let unseen = add_word(&conn, "zero", 0);
        let practising = add_word(&conn, "two", 2);
        let learned = add_word(&conn, "five", 5);

        let engine = QuizEngine::new(&conn);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let question = engine.next_question_with(2, &mut rng).unwrap().unwrap();
            assert!(question.target.id == unseen || question.target.id == practising);
            assert_ne!(question.target.id, learned);

            assert_eq!(question.options.len(), 3);
            let ids: HashSet<i64> = question.options.iter().map(|w| w.id).collect();
            assert_eq!(ids.len(), 3);
            assert_eq!(question.options[question.correct_index()].id, question.target.id);
        }
    }

    #[test]
    fn test_learned_words_serve_as_distractors() {
        let (_dir, conn) = test_db();
        add_word(&conn, "zero", 0);
        let learned = add_word(&conn, "five", 5);

        let engine = QuizEngine::new(&conn);
        let question = engine.next_question(1).unwrap().unwrap();
        assert!(question.options.iter().any(|w| w.id == learned));
        assert_ne!(question.target.id, learned);
    }

    #[test]
    fn test_lower_tiers_are_drawn_more_often() {
        let (_dir, conn) = test_db();
        let unseen = add_word(&conn, "unseen", 0);
        let struggling = add_word(&conn, "struggling", 1);
        let practising = add_word(&conn, "practising", 3);
        let learned = add_word(&conn, "learned", 5);

        let engine = QuizEngine::new(&conn);
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits: HashMap<i64, usize> = HashMap::new();
        for _ in 0..2000 {
            let question = engine.next_question_with(1, &mut rng).unwrap().unwrap();
            *hits.entry(question.target.id).or_default() += 1;
        }

        let count = |id: i64| hits.get(&id).copied().unwrap_or(0);
        assert_eq!(count(learned), 0);
        assert!(count(unseen) > count(struggling));
        assert!(count(struggling) > count(practising));
        // Mid-tier words are rarer but not starved.
        assert!(count(practising) > 50);
    }

    #[test]
    fn test_empty_tier_falls_back() {
        let mut rng = StdRng::seed_from_u64(3);
        let candidates = vec![Word {
            id: 9,
            original: "x".to_string(),
            translation: "y".to_string(),
            category: String::new(),
            difficulty_level: 4,
            correct_count: 0,
            wrong_count: 0,
            last_reviewed_at: None,
            is_custom: true,
            created_at: chrono::Utc::now(),
        }];
        assert_eq!(pick_target(candidates, &mut rng).map(|w| w.id), Some(9));
        assert!(pick_target(Vec::new(), &mut rng).is_none());
    }

    #[test]
    fn test_submit_correct_answer() {
        let (_dir, conn) = test_db();
        let id = add_word(&conn, "a", 2);
        let engine = QuizEngine::new(&conn);

        engine.submit_answer(id, true).unwrap();
        let stored = word::get_word_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(stored.difficulty_level, 3);
        assert_eq!(stored.correct_count, 1);
        assert_eq!(stored.wrong_count, 0);
        assert!(stored.last_reviewed_at.is_some());
    }

    #[test]
    fn test_submit_wrong_answer() {
        let (_dir, conn) = test_db();
        let id = add_word(&conn, "a", 2);
        let engine = QuizEngine::new(&conn);

        engine.submit_answer(id, false).unwrap();
        let stored = word::get_word_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(stored.difficulty_level, 1);
        assert_eq!(stored.correct_count, 0);
        assert_eq!(stored.wrong_count, 1);
        assert!(stored.last_reviewed_at.is_some());
    }

    #[test]
    fn test_level_stays_bounded_under_repeated_answers() {
        let (_dir, conn) = test_db();
        let id = add_word(&conn, "a", 0);
        let engine = QuizEngine::new(&conn);

        for _ in 0..8 {
            engine.submit_answer(id, true).unwrap();
            assert!(level_of(&conn, id) <= MAX_DIFFICULTY);
        }
        assert_eq!(level_of(&conn, id), 5);

        for _ in 0..8 {
            engine.submit_answer(id, false).unwrap();
        }
        assert_eq!(level_of(&conn, id), 0);

        let stored = word::get_word_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(stored.correct_count, 8);
        assert_eq!(stored.wrong_count, 8);
    }

    #[test]
    fn test_submit_unknown_word() {
        let (_dir, conn) = test_db();
        let engine = QuizEngine::new(&conn);
        assert!(matches!(
            engine.submit_answer(77, true),
            Err(Error::WordNotFound(77))
        ));
    }

    #[test]
    fn test_statistics_buckets() {
        let (_dir, conn) = test_db();
        for (i, level) in [0u8, 0, 1, 2, 3, 4, 5].iter().enumerate() {
            add_word(&conn, &format!("w{}", i), *level);
        }
        let engine = QuizEngine::new(&conn);
        let first = word::get_all_words(&conn).unwrap()[0].id;
        engine.submit_answer(first, false).unwrap();

        let stats = engine.statistics().unwrap();
        assert_eq!(stats.total_words, 7);
        assert_eq!(stats.learned_words, 2);
        assert_eq!(stats.in_progress_words, 3);
        assert_eq!(stats.not_started_words, 2);
        assert_eq!(stats.total_correct_answers, 0);
        assert_eq!(stats.total_wrong_answers, 1);
    }
}
