use crate::error::Result;
use crate::models::Category;
use rusqlite::{params, Connection, Row};

const CATEGORY_SELECT: &str = "SELECT c.name, c.icon, c.color,
        (SELECT COUNT(*) FROM words w WHERE w.category = c.name)
     FROM categories c";

fn map_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        name: row.get(0)?,
        icon: row.get(1)?,
        color: row.get(2)?,
        word_count: row.get(3)?,
    })
}

/// Inserts or replaces categories by name. The word count is derived and
/// ignored here.
pub fn insert_categories(conn: &Connection, categories: &[Category]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    for category in categories {
        tx.execute(
            "INSERT OR REPLACE INTO categories (name, icon, color) VALUES (?, ?, ?)",
            params![category.name, category.icon, category.color],
        )?;
    }
    tx.commit()?;
    Ok(categories.len())
}

pub fn get_all_categories(conn: &Connection) -> Result<Vec<Category>> {
    let sql = format!("{} ORDER BY c.name", CATEGORY_SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let categories = stmt
        .query_map([], map_category)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(categories)
}

/// Distinct category labels actually used by words, including ones without
/// a row in `categories` (imported documents may bring new labels).
pub fn get_used_category_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT category FROM words WHERE category != '' ORDER BY category",
    )?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}
