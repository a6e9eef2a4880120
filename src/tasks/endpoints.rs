use rocket::response::stream::EventStream;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, Shutdown, State};

use crate::auth::guard::CurrentUser;
use crate::data::{today, DBConnection};
use crate::events::{snapshot_stream, Change, ChangeBus, Collection};
use crate::internal_error::InternalResult;

use super::board::*;
use super::data::*;
use super::helpers::*;

#[get("/projects/<project_id>/tasks")]
pub fn get_tasks(
    project_id: &str,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Task>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_tasks_from_db(project_id, &db_connection)?))
}

#[get("/projects/<project_id>/tasks/board")]
pub fn get_task_board(
    project_id: &str,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<TaskBoard>> {
    let db_connection = db_connection.lock()?;

    let tasks = get_tasks_from_db(project_id, &db_connection)?;

    Ok(Json(group_by_status(tasks)))
}

#[get("/projects/<project_id>/tasks/events")]
pub fn task_events(
    project_id: String,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
    shutdown: Shutdown,
) -> EventStream![] {
    let watched = project_id.clone();

    snapshot_stream(
        db_connection.inner().clone(),
        change_bus.subscribe(),
        shutdown,
        move |change| change.touches(&watched, Collection::Tasks),
        move |connection| get_tasks_from_db(&project_id, connection),
    )
}

#[get("/projects/<project_id>/tasks/board/events")]
pub fn task_board_events(
    project_id: String,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
    shutdown: Shutdown,
) -> EventStream![] {
    let watched = project_id.clone();

    snapshot_stream(
        db_connection.inner().clone(),
        change_bus.subscribe(),
        shutdown,
        move |change| change.touches(&watched, Collection::Tasks),
        move |connection| get_tasks_from_db(&project_id, connection).map(group_by_status),
    )
}

#[post("/projects/<project_id>/tasks", format = "json", data = "<request>")]
pub fn add_task(
    project_id: &str,
    request: Json<AddTaskRequest>,
    user: Option<CurrentUser>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<Task>>> {
    let assignee = user
        .map(|user| user.assignee())
        .unwrap_or_else(Assignee::anonymous);

    let mut task = match new_task(&request.title, assignee, today()) {
        Some(task) => task,
        None => return Ok(Json(None)),
    };
    if let Some(priority) = request.priority {
        task.priority = priority;
    }
    if let Some(due_date) = request.due_date {
        task.due_date = due_date;
    }

    let db_connection = db_connection.lock()?;
    add_task_to_db(project_id, &task, &db_connection)?;
    change_bus.publish(Change::collection(project_id, Collection::Tasks));

    tracing::debug!("added task {} to {}", task.id, project_id);

    Ok(Json(Some(task)))
}

#[patch("/projects/<project_id>/tasks/<task_id>/status", format = "json", data = "<request>")]
pub fn move_task_status(
    project_id: &str,
    task_id: &str,
    request: Json<MoveTaskRequest>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    if update_task_status_in_db(project_id, task_id, request.status, &db_connection)? {
        change_bus.publish(Change::collection(project_id, Collection::Tasks));
    }

    Ok(())
}

#[delete("/projects/<project_id>/tasks/<task_id>")]
pub fn delete_task(
    project_id: &str,
    task_id: &str,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    if delete_task_from_db(project_id, task_id, &db_connection)? {
        change_bus.publish(Change::collection(project_id, Collection::Tasks));
    }

    Ok(())
}

#[delete("/projects/<project_id>/tasks")]
pub fn reset_tasks(
    project_id: &str,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    let deleted = delete_all_tasks_from_db(project_id, &db_connection)?;
    if deleted > 0 {
        change_bus.publish(Change::collection(project_id, Collection::Tasks));
    }

    Ok(())
}
