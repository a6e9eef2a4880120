use rusqlite::{params, Connection};

use crate::data::{new_id, now_timestamp};
use crate::internal_error::InternalResult;

use super::data::*;

pub fn get_projects_from_db(db_connection: &Connection) -> InternalResult<Vec<Project>> {
    let mut statement = db_connection.prepare(
        "SELECT id, name, description, problem_it_solves, challenges_faced, technologies_used, category
         FROM projects ORDER BY rowid ASC",
    )?;

    let projects = statement
        .query_map([], |row| {
            Ok(Project {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                problem_it_solves: row.get(3)?,
                challenges_faced: row.get(4)?,
                technologies_used: row.get(5)?,
                category: row.get(6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<Project>>>()?;

    Ok(projects)
}

pub fn add_project_to_db(project: NewProject, db_connection: &Connection) -> InternalResult<Option<Project>> {
    let name = project.name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let category = match project.category.trim() {
        "" => DEFAULT_CATEGORY.to_string(),
        category => category.to_string(),
    };

    let project = Project {
        id: new_id(),
        name: name.to_string(),
        description: project.description,
        problem_it_solves: project.problem_it_solves,
        challenges_faced: project.challenges_faced,
        technologies_used: project.technologies_used,
        category,
    };

    db_connection.execute(
        "INSERT INTO projects
            (id, name, description, problem_it_solves, challenges_faced, technologies_used, category, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            project.id,
            project.name,
            project.description,
            project.problem_it_solves,
            project.challenges_faced,
            project.technologies_used,
            project.category,
            now_timestamp()
        ],
    )?;

    Ok(Some(project))
}

pub fn update_project_in_db(
    project_id: &str,
    edit: &EditProject,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let name = edit.name.trim();
    if name.is_empty() {
        return Ok(false);
    }

    let category = match edit.category.trim() {
        "" => DEFAULT_CATEGORY,
        category => category,
    };

    let updated = db_connection.execute(
        "UPDATE projects SET name = (?1), description = (?2), category = (?3) WHERE id = (?4)",
        params![name, edit.description, category, project_id],
    )?;

    Ok(updated > 0)
}

pub fn delete_project_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<bool> {
    let deleted = db_connection.execute("DELETE FROM projects WHERE id = (?1)", params![project_id])?;

    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_connection;

    fn named(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            ..NewProject::default()
        }
    }

    #[test]
    fn blank_name_creates_nothing() {
        let connection = test_connection();

        assert!(add_project_to_db(named("  "), &connection).unwrap().is_none());
        assert!(get_projects_from_db(&connection).unwrap().is_empty());
    }

    #[test]
    fn category_defaults_to_uncategorized() {
        let connection = test_connection();

        let project = add_project_to_db(named("Hack Helper"), &connection).unwrap().unwrap();

        assert_eq!(project.category, DEFAULT_CATEGORY);
        assert_eq!(get_projects_from_db(&connection).unwrap(), vec![project]);
    }

    #[test]
    fn edit_then_delete() {
        let connection = test_connection();
        let project = add_project_to_db(named("Draft"), &connection).unwrap().unwrap();
        let edit = EditProject {
            name: "Final".to_string(),
            description: "Ships on Sunday".to_string(),
            category: "Tools".to_string(),
        };

        assert!(update_project_in_db(&project.id, &edit, &connection).unwrap());
        let stored = get_projects_from_db(&connection).unwrap();
        assert_eq!(stored[0].name, "Final");
        assert_eq!(stored[0].category, "Tools");

        assert!(delete_project_from_db(&project.id, &connection).unwrap());
        assert!(!delete_project_from_db(&project.id, &connection).unwrap());
    }
}
