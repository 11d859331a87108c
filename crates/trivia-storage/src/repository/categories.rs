//! Categories repository.

use rusqlite::{Connection, OptionalExtension, Row};
use trivia_core::Category;

use crate::error::Result;

/// Repository for category operations.
pub struct CategoriesRepo;

impl CategoriesRepo {
    /// Insert a new category.
    pub fn insert(conn: &Connection, label: &str) -> Result<i64> {
        conn.execute("INSERT INTO categories (type) VALUES (?1)", [label])?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a category by ID.
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Category>> {
        let category = conn
            .query_row(
                "SELECT id, type FROM categories WHERE id = ?1",
                [id],
                map_category,
            )
            .optional()?;

        Ok(category)
    }

    /// Get a category by its label.
    pub fn get_by_label(conn: &Connection, label: &str) -> Result<Option<Category>> {
        let category = conn
            .query_row(
                "SELECT id, type FROM categories WHERE type = ?1",
                [label],
                map_category,
            )
            .optional()?;

        Ok(category)
    }

    /// Get all categories, ordered by id.
    pub fn get_all(conn: &Connection) -> Result<Vec<Category>> {
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id ASC")?;

        let categories = stmt
            .query_map([], map_category)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(categories)
    }
}

fn map_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        label: row.get(1)?,
    })
}
