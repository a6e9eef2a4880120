use rocket::response::stream::EventStream;
use rocket::serde::json::Json;
use rocket::{delete, get, post, Shutdown, State};

use crate::data::DBConnection;
use crate::events::{snapshot_stream, Change, ChangeBus, Collection};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/projects/<project_id>/team")]
pub fn get_team(project_id: &str, db_connection: &State<DBConnection>) -> InternalResult<Json<Vec<TeamMember>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_team_from_db(project_id, &db_connection)?))
}

#[get("/projects/<project_id>/team/events")]
pub fn team_events(
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
        move |change| change.touches(&watched, Collection::Team),
        move |connection| get_team_from_db(&project_id, connection),
    )
}

#[post("/projects/<project_id>/team/invite", format = "json", data = "<invite>")]
pub fn invite_member(
    project_id: &str,
    invite: Json<InviteRequest>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<TeamMember>>> {
    let db_connection = db_connection.lock()?;

    let member = invite_member_to_db(project_id, &invite, &db_connection)?;
    if member.is_some() {
        change_bus.publish(Change::collection(project_id, Collection::Team));
    }

    Ok(Json(member))
}

#[delete("/projects/<project_id>/team/<member_id>")]
pub fn remove_member(
    project_id: &str,
    member_id: MemberID,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    if remove_member_from_db(project_id, member_id, &db_connection)? {
        change_bus.publish(Change::collection(project_id, Collection::Team));
    }

    Ok(())
}
