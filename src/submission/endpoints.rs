use rocket::response::stream::EventStream;
use rocket::serde::json::Json;
use rocket::{get, post, put, Shutdown, State};

use crate::data::DBConnection;
use crate::events::{snapshot_stream, Change, ChangeBus};
use crate::internal_error::InternalResult;

use super::checklist::*;
use super::data::*;
use super::helpers::*;

#[get("/projects/<project_id>/submission")]
pub fn get_submission(
    project_id: &str,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<SubmissionStatus>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_submission_status_from_db(project_id, &db_connection)?))
}

#[get("/projects/<project_id>/submission/events")]
pub fn submission_events(
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
        move |change| touches_submission(change, &watched),
        move |connection| get_submission_status_from_db(&project_id, connection),
    )
}

#[put("/projects/<project_id>/submission", format = "json", data = "<form>")]
pub fn save_submission(
    project_id: &str,
    form: Json<SubmissionForm>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<SubmissionStatus>> {
    let db_connection = db_connection.lock()?;

    let form = form.into_inner();
    save_submission_form_to_db(project_id, &form, &db_connection)?;
    change_bus.publish(submission_change(project_id));

    Ok(Json(submission_status(form)))
}

#[post("/projects/<project_id>/submission/submit", format = "json", data = "<form>")]
pub fn submit_project(
    project_id: &str,
    form: Json<SubmissionForm>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<ShowcaseEntry>>> {
    let db_connection = db_connection.lock()?;

    let entry = submit_project_to_db(project_id, form.into_inner(), &db_connection)?;
    match &entry {
        Some(entry) => {
            tracing::info!("project {} submitted as {:?}", project_id, entry.form.project_name);
            change_bus.publish(Change::Key(SHOWCASE_KEY.to_string()));
        }
        None => tracing::debug!("submission for {} is not ready", project_id),
    }

    Ok(Json(entry))
}

#[get("/showcase")]
pub fn get_showcase(db_connection: &State<DBConnection>) -> InternalResult<Json<Vec<ShowcaseEntry>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_showcase_from_db(&db_connection)?))
}

#[get("/showcase/events")]
pub fn showcase_events(
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
    shutdown: Shutdown,
) -> EventStream![] {
    snapshot_stream(
        db_connection.inner().clone(),
        change_bus.subscribe(),
        shutdown,
        |change| change.touches_key(SHOWCASE_KEY),
        get_showcase_from_db,
    )
}
