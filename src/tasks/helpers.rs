use rusqlite::{params, Connection, Row};

use crate::data::now_timestamp;
use crate::internal_error::InternalResult;

use super::data::*;

pub fn get_task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        status: row.get(2)?,
        priority: row.get(3)?,
        assignee: Assignee {
            id: row.get(4)?,
            name: row.get(5)?,
        },
        due_date: row.get(6)?,
    })
}

pub fn get_tasks_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<Vec<Task>> {
    let mut statement = db_connection.prepare(
        "SELECT id, title, status, priority, assignee_id, assignee_name, due_date
         FROM tasks WHERE project_id = (?1) ORDER BY rowid ASC",
    )?;

    let tasks = statement
        .query_map(params![project_id], get_task_from_row)?
        .collect::<rusqlite::Result<Vec<Task>>>()?;

    Ok(tasks)
}

pub fn add_task_to_db(project_id: &str, task: &Task, db_connection: &Connection) -> InternalResult<()> {
    let now = now_timestamp();

    db_connection.execute(
        "INSERT INTO tasks
            (id, project_id, title, status, priority, assignee_id, assignee_name, due_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            task.id,
            project_id,
            task.title,
            task.status,
            task.priority,
            task.assignee.id,
            task.assignee.name,
            task.due_date,
            now
        ],
    )?;

    Ok(())
}

/// Unconditional overwrite: any status may follow any other, even though
/// the board only offers forward moves.
pub fn update_task_status_in_db(
    project_id: &str,
    task_id: &str,
    status: TaskStatus,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let updated = db_connection.execute(
        "UPDATE tasks SET status = (?1), updated_at = (?2) WHERE project_id = (?3) AND id = (?4)",
        params![status, now_timestamp(), project_id, task_id],
    )?;

    Ok(updated > 0)
}

pub fn delete_task_from_db(
    project_id: &str,
    task_id: &str,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let deleted = db_connection.execute(
        "DELETE FROM tasks WHERE project_id = (?1) AND id = (?2)",
        params![project_id, task_id],
    )?;

    Ok(deleted > 0)
}

pub fn delete_all_tasks_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<usize> {
    let deleted = db_connection.execute("DELETE FROM tasks WHERE project_id = (?1)", params![project_id])?;

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_connection;
    use crate::tasks::board::new_task;

    use chrono::NaiveDate;

    fn add(connection: &Connection, project_id: &str, title: &str) -> Task {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let task = new_task(title, Assignee::anonymous(), today).unwrap();
        add_task_to_db(project_id, &task, connection).unwrap();
        task
    }

    #[test]
    fn tasks_load_in_creation_order() {
        let connection = test_connection();
        let first = add(&connection, "p1", "first");
        let second = add(&connection, "p1", "second");
        add(&connection, "p2", "elsewhere");

        let tasks = get_tasks_from_db("p1", &connection).unwrap();

        assert_eq!(tasks, vec![first, second]);
    }

    #[test]
    fn status_moves_directly_from_todo_to_done() {
        let connection = test_connection();
        let task = add(&connection, "p1", "ship");

        assert!(update_task_status_in_db("p1", &task.id, TaskStatus::Done, &connection).unwrap());

        let tasks = get_tasks_from_db("p1", &connection).unwrap();
        assert_eq!(tasks[0].status, TaskStatus::Done);

        assert!(update_task_status_in_db("p1", &task.id, TaskStatus::Todo, &connection).unwrap());
        let tasks = get_tasks_from_db("p1", &connection).unwrap();
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }

    #[test]
    fn unknown_task_updates_nothing() {
        let connection = test_connection();

        assert!(!update_task_status_in_db("p1", "missing", TaskStatus::Done, &connection).unwrap());
        assert!(!delete_task_from_db("p1", "missing", &connection).unwrap());
    }

    #[test]
    fn reset_clears_only_one_project() {
        let connection = test_connection();
        add(&connection, "p1", "a");
        add(&connection, "p1", "b");
        add(&connection, "p2", "c");

        assert_eq!(delete_all_tasks_from_db("p1", &connection).unwrap(), 2);
        assert!(get_tasks_from_db("p1", &connection).unwrap().is_empty());
        assert_eq!(get_tasks_from_db("p2", &connection).unwrap().len(), 1);
    }
}
