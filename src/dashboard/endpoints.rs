use rocket::response::stream::EventStream;
use rocket::serde::json::Json;
use rocket::{get, Shutdown, State};

use crate::data::DBConnection;
use crate::events::{snapshot_stream, ChangeBus};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/projects/<project_id>/dashboard")]
pub fn get_dashboard(
    project_id: &str,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<DashboardSummary>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_dashboard_from_db(project_id, &db_connection)?))
}

#[get("/projects/<project_id>/dashboard/events")]
pub fn dashboard_events(
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
        move |change| change.touches_project(&watched),
        move |connection| get_dashboard_from_db(&project_id, connection),
    )
}
