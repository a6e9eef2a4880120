use rocket::response::stream::EventStream;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, Shutdown, State};

use crate::data::DBConnection;
use crate::events::{snapshot_stream, Change, ChangeBus};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/projects")]
pub fn get_projects(db_connection: &State<DBConnection>) -> InternalResult<Json<Vec<Project>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_projects_from_db(&db_connection)?))
}

#[get("/projects/events")]
pub fn project_events(
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
    shutdown: Shutdown,
) -> EventStream![] {
    snapshot_stream(
        db_connection.inner().clone(),
        change_bus.subscribe(),
        shutdown,
        |change| change.touches_projects(),
        get_projects_from_db,
    )
}

#[post("/projects", format = "json", data = "<project>")]
pub fn add_project(
    project: Json<NewProject>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<Project>>> {
    let db_connection = db_connection.lock()?;

    let project = add_project_to_db(project.into_inner(), &db_connection)?;
    if let Some(project) = &project {
        tracing::info!("created project {} ({})", project.name, project.id);
        change_bus.publish(Change::Projects);
    }

    Ok(Json(project))
}

#[put("/projects/<project_id>", format = "json", data = "<edit>")]
pub fn edit_project(
    project_id: &str,
    edit: Json<EditProject>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    if update_project_in_db(project_id, &edit, &db_connection)? {
        change_bus.publish(Change::Projects);
    }

    Ok(())
}

#[delete("/projects/<project_id>")]
pub fn delete_project(
    project_id: &str,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    if delete_project_from_db(project_id, &db_connection)? {
        change_bus.publish(Change::Projects);
    }

    Ok(())
}
