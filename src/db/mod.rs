use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

pub mod category;
pub mod seed;
pub mod word;

/// Opens (creating if needed) the database at `db_path`, applies the schema
/// and seeds the default dictionary on first run.
pub fn init_db(db_path: &Path) -> Result<Connection> {
    let conn = open_db(db_path)?;

    let seeded = seed::seed_if_empty(&conn)?;
    if seeded > 0 {
        tracing::info!(words = seeded, "Seeded default dictionary");
    }

    Ok(conn)
}

/// Opens the database and applies the schema without seeding. Used by the
/// transfer worker, which shares the file with the interactive connection.
pub fn open_db(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;

    word::register_functions(&conn)?;
    run_migrations(&conn)?;

    Ok(conn)
}

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            original TEXT NOT NULL,
            translation TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            difficulty_level INTEGER NOT NULL DEFAULT 0
                CHECK (difficulty_level BETWEEN 0 AND 5),
            correct_count INTEGER NOT NULL DEFAULT 0,
            wrong_count INTEGER NOT NULL DEFAULT 0,
            last_reviewed_at INTEGER NOT NULL DEFAULT 0,
            is_custom INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_words_difficulty ON words(difficulty_level)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_words_category ON words(category)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            name TEXT PRIMARY KEY,
            icon TEXT NOT NULL,
            color TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_db() -> (tempfile::TempDir, Connection) {
    let temp_dir = tempfile::tempdir().unwrap();
    let test_db_path = temp_dir.path().join("test.db");
    let conn = open_db(&test_db_path).unwrap();
    (temp_dir, conn)
}
