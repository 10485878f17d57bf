use crate::error::{Error, Result};
use crate::models::{NewWord, Word, MAX_DIFFICULTY};
use chrono::{DateTime, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};

const WORD_COLUMNS: &str = "id, original, translation, category, difficulty_level, correct_count,
     wrong_count, last_reviewed_at, is_custom, created_at";

/// SQL name of the scalar function applying [`normalize_key`]. SQLite's own
/// `LOWER()` only folds ASCII, which breaks Cyrillic translations.
pub const NORMALIZE_FN: &str = "normalize_key";

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Trimmed, lowercased form used to detect the same word across documents.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        NORMALIZE_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: String = ctx.get(0)?;
            Ok(normalize_key(&value))
        },
    )?;
    Ok(())
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        None
    } else {
        DateTime::<Utc>::from_timestamp_millis(millis)
    }
}

fn map_word(row: &Row<'_>) -> rusqlite::Result<Word> {
    let last_reviewed_at: i64 = row.get(7)?;
    let created_at: i64 = row.get(9)?;

    Ok(Word {
        id: row.get(0)?,
        original: row.get(1)?,
        translation: row.get(2)?,
        category: row.get(3)?,
        difficulty_level: row.get(4)?,
        correct_count: row.get(5)?,
        wrong_count: row.get(6)?,
        last_reviewed_at: from_millis(last_reviewed_at),
        is_custom: row.get(8)?,
        created_at: from_millis(created_at).unwrap_or_default(),
    })
}

fn query_words(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(sql)?;
    let words = stmt
        .query_map(params, map_word)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(words)
}

fn expect_changed(changed: usize, word_id: i64) -> Result<()> {
    if changed == 0 {
        Err(Error::WordNotFound(word_id))
    } else {
        Ok(())
    }
}

pub fn insert_word(conn: &Connection, word: &NewWord) -> Result<i64> {
    conn.execute(
        "INSERT INTO words (original, translation, category, is_custom, created_at)
         VALUES (?, ?, ?, ?, ?)",
        params![
            word.original,
            word.translation,
            word.category,
            word.is_custom,
            now_millis()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_words(conn: &Connection, words: &[NewWord]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    for word in words {
        insert_word(&tx, word)?;
    }
    tx.commit()?;
    Ok(words.len())
}

/// Rewrites the text columns only; learning progress is left alone.
pub fn update_content(
    conn: &Connection,
    word_id: i64,
    original: &str,
    translation: &str,
    category: &str,
) -> Result<()> {
    let changed = conn.execute(
        "UPDATE words SET original = ?, translation = ?, category = ? WHERE id = ?",
        params![original, translation, category, word_id],
    )?;
    expect_changed(changed, word_id)
}

pub fn delete_word(conn: &Connection, word_id: i64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM words WHERE id = ?", [word_id])?;
    Ok(changed > 0)
}

pub fn get_word_by_id(conn: &Connection, word_id: i64) -> Result<Option<Word>> {
    let sql = format!("SELECT {} FROM words WHERE id = ?", WORD_COLUMNS);
    let word = conn.query_row(&sql, [word_id], map_word).optional()?;
    Ok(word)
}

pub fn get_all_words(conn: &Connection) -> Result<Vec<Word>> {
    let sql = format!(
        "SELECT {} FROM words ORDER BY original COLLATE NOCASE, id",
        WORD_COLUMNS
    );
    query_words(conn, &sql, [])
}

/// Every word still eligible as a quiz target, i.e. not fully learned.
pub fn quiz_candidates(conn: &Connection) -> Result<Vec<Word>> {
    let sql = format!(
        "SELECT {} FROM words WHERE difficulty_level < ? ORDER BY difficulty_level, id",
        WORD_COLUMNS
    );
    query_words(conn, &sql, [MAX_DIFFICULTY])
}

pub fn random_distractors(conn: &Connection, exclude_id: i64, count: usize) -> Result<Vec<Word>> {
    let sql = format!(
        "SELECT {} FROM words WHERE id != ? ORDER BY RANDOM() LIMIT ?",
        WORD_COLUMNS
    );
    query_words(conn, &sql, params![exclude_id, count as i64])
}

pub fn mark_correct(conn: &Connection, word_id: i64, timestamp: i64) -> Result<()> {
    let changed = conn.execute(
        "UPDATE words
         SET difficulty_level = MIN(difficulty_level + 1, ?),
             correct_count = correct_count + 1,
             last_reviewed_at = ?
         WHERE id = ?",
        params![MAX_DIFFICULTY, timestamp, word_id],
    )?;
    expect_changed(changed, word_id)
}

pub fn mark_wrong(conn: &Connection, word_id: i64, timestamp: i64) -> Result<()> {
    let changed = conn.execute(
        "UPDATE words
         SET difficulty_level = MAX(difficulty_level - 1, 0),
             wrong_count = wrong_count + 1,
             last_reviewed_at = ?
         WHERE id = ?",
        params![timestamp, word_id],
    )?;
    expect_changed(changed, word_id)
}

pub fn reset_progress(conn: &Connection, word_id: i64) -> Result<()> {
    let changed = conn.execute(
        "UPDATE words
         SET difficulty_level = 0, correct_count = 0, wrong_count = 0, last_reviewed_at = 0
         WHERE id = ?",
        [word_id],
    )?;
    expect_changed(changed, word_id)
}

pub fn count_all(conn: &Connection) -> Result<usize> {
    let count: usize = conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
    Ok(count)
}

/// Number of words whose level lies in `min..=max`.
pub fn count_by_level_range(conn: &Connection, min: u8, max: u8) -> Result<usize> {
    let count: usize = conn.query_row(
        "SELECT COUNT(*) FROM words WHERE difficulty_level BETWEEN ? AND ?",
        [min, max],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn count_by_category(conn: &Connection, category: &str) -> Result<usize> {
    let count: usize = conn.query_row(
        "SELECT COUNT(*) FROM words WHERE category = ?",
        [category],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Total (correct, wrong) answers over the whole dictionary.
pub fn sum_attempts(conn: &Connection) -> Result<(u64, u64)> {
    let sums = conn.query_row(
        "SELECT COALESCE(SUM(correct_count), 0), COALESCE(SUM(wrong_count), 0) FROM words",
        [],
        |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
    )?;
    Ok((sums.0.max(0) as u64, sums.1.max(0) as u64))
}

pub fn find_by_normalized_key(
    conn: &Connection,
    original: &str,
    category: &str,
) -> Result<Option<Word>> {
    let sql = format!(
        "SELECT {cols} FROM words
         WHERE {f}(original) = ? AND {f}(category) = ?
         ORDER BY id LIMIT 1",
        cols = WORD_COLUMNS,
        f = NORMALIZE_FN
    );
    let word = conn
        .query_row(
            &sql,
            params![normalize_key(original), normalize_key(category)],
            map_word,
        )
        .optional()?;
    Ok(word)
}
