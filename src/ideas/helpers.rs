use rusqlite::{params, Connection, Row};

use crate::internal_error::InternalResult;

use super::data::*;
use super::sorting::sort_ideas;

pub fn get_idea_from_row(row: &Row) -> rusqlite::Result<Idea> {
    Ok(Idea {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        votes: row.get(4)?,
        pinned: row.get(5)?,
    })
}

/// Ideas in display order.
pub fn get_ideas_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<Vec<Idea>> {
    let mut statement = db_connection.prepare(
        "SELECT rowid, title, description, category, votes, pinned
         FROM ideas WHERE project_id = (?1) ORDER BY rowid ASC",
    )?;

    let mut ideas = statement
        .query_map(params![project_id], get_idea_from_row)?
        .collect::<rusqlite::Result<Vec<Idea>>>()?;
    sort_ideas(&mut ideas);

    Ok(ideas)
}

pub fn add_idea_to_db(
    project_id: &str,
    idea: NewIdea,
    db_connection: &Connection,
) -> InternalResult<Option<Idea>> {
    let title = idea.title.trim();
    if title.is_empty() {
        return Ok(None);
    }

    db_connection.execute(
        "INSERT INTO ideas (project_id, title, description, category, votes, pinned)
         VALUES (?1, ?2, ?3, ?4, 0, 0)",
        params![project_id, title, idea.description, idea.category],
    )?;

    Ok(Some(Idea {
        id: db_connection.last_insert_rowid(),
        title: title.to_string(),
        description: idea.description,
        category: idea.category,
        votes: 0,
        pinned: false,
    }))
}

/// One more vote, every time. Nothing stops the same member voting twice.
pub fn vote_idea_in_db(project_id: &str, idea_id: IdeaID, db_connection: &Connection) -> InternalResult<bool> {
    let updated = db_connection.execute(
        "UPDATE ideas SET votes = votes + 1 WHERE project_id = (?1) AND rowid = (?2)",
        params![project_id, idea_id],
    )?;

    Ok(updated > 0)
}

pub fn toggle_idea_pin_in_db(
    project_id: &str,
    idea_id: IdeaID,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let updated = db_connection.execute(
        "UPDATE ideas SET pinned = NOT pinned WHERE project_id = (?1) AND rowid = (?2)",
        params![project_id, idea_id],
    )?;

    Ok(updated > 0)
}

pub fn delete_idea_from_db(project_id: &str, idea_id: IdeaID, db_connection: &Connection) -> InternalResult<bool> {
    let deleted = db_connection.execute(
        "DELETE FROM ideas WHERE project_id = (?1) AND rowid = (?2)",
        params![project_id, idea_id],
    )?;

    Ok(deleted > 0)
}

pub fn get_categories_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<Vec<Category>> {
    let mut statement = db_connection
        .prepare("SELECT rowid, name FROM idea_categories WHERE project_id = (?1) ORDER BY rowid ASC")?;

    let categories = statement
        .query_map(params![project_id], |row| {
            Ok(Category {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<Category>>>()?;

    Ok(categories)
}

pub fn add_category_to_db(
    project_id: &str,
    name: &str,
    db_connection: &Connection,
) -> InternalResult<Option<Category>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    db_connection.execute(
        "INSERT INTO idea_categories (project_id, name) VALUES (?1, ?2)",
        params![project_id, name],
    )?;

    Ok(Some(Category {
        id: db_connection.last_insert_rowid(),
        name: name.to_string(),
    }))
}
