//! Questions repository.

use rusqlite::{params, Connection, OptionalExtension, Row};
use trivia_core::{NewQuestion, Question};

use crate::error::Result;

const COLUMNS: &str = "id, question, answer, category, difficulty";

/// Repository for question operations.
pub struct QuestionsRepo;

impl QuestionsRepo {
    /// Insert a new question.
    pub fn insert(conn: &Connection, question: &NewQuestion) -> Result<i64> {
        conn.execute(
            "INSERT INTO questions (question, answer, category, difficulty)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                question.text,
                question.answer,
                question.category_id,
                question.difficulty
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a question by ID.
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Question>> {
        let question = conn
            .query_row(
                &format!("SELECT {} FROM questions WHERE id = ?1", COLUMNS),
                [id],
                map_question,
            )
            .optional()?;

        Ok(question)
    }

    /// Get all questions, ordered by id.
    pub fn get_all(conn: &Connection) -> Result<Vec<Question>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM questions ORDER BY id ASC",
            COLUMNS
        ))?;

        let questions = stmt
            .query_map([], map_question)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(questions)
    }

    /// Get the questions of one category, ordered by id.
    pub fn get_by_category(conn: &Connection, category_id: i64) -> Result<Vec<Question>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM questions WHERE category = ?1 ORDER BY id ASC",
            COLUMNS
        ))?;

        let questions = stmt
            .query_map([category_id], map_question)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(questions)
    }

    /// Delete a question. Returns whether a row was removed.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let deleted = conn.execute("DELETE FROM questions WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    /// Count total questions.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn map_question(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        text: row.get(1)?,
        answer: row.get(2)?,
        category_id: row.get(3)?,
        difficulty: row.get(4)?,
    })
}
