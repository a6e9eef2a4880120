use rocket::response::stream::EventStream;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, Shutdown, State};

use crate::data::DBConnection;
use crate::events::{snapshot_stream, Change, ChangeBus, Collection};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/projects/<project_id>/milestones?<order>")]
pub fn get_milestones(
    project_id: &str,
    order: Option<MilestoneOrder>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Milestone>>> {
    let db_connection = db_connection.lock()?;

    let milestones = get_milestones_from_db(project_id, order.unwrap_or_default(), &db_connection)?;

    Ok(Json(milestones))
}

#[get("/projects/<project_id>/milestones/events?<order>")]
pub fn milestone_events(
    project_id: String,
    order: Option<MilestoneOrder>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
    shutdown: Shutdown,
) -> EventStream![] {
    let order = order.unwrap_or_default();
    let watched = project_id.clone();

    snapshot_stream(
        db_connection.inner().clone(),
        change_bus.subscribe(),
        shutdown,
        move |change| change.touches(&watched, Collection::Milestones),
        move |connection| get_milestones_from_db(&project_id, order, connection),
    )
}

#[put("/projects/<project_id>/milestones", format = "json", data = "<draft>")]
pub fn save_milestone(
    project_id: &str,
    draft: Json<MilestoneDraft>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<Milestone>>> {
    let milestone = build_milestone(draft.into_inner());
    if milestone.title.is_empty() {
        return Ok(Json(None));
    }

    let db_connection = db_connection.lock()?;
    if !save_milestone_to_db(project_id, &milestone, &db_connection)? {
        tracing::debug!("milestone {} belongs to another project, not saved", milestone.id);
        return Ok(Json(None));
    }
    change_bus.publish(Change::collection(project_id, Collection::Milestones));

    tracing::debug!("saved milestone {} in {}", milestone.id, project_id);

    Ok(Json(Some(milestone)))
}

#[delete("/projects/<project_id>/milestones/<milestone_id>")]
pub fn delete_milestone(
    project_id: &str,
    milestone_id: &str,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    if delete_milestone_from_db(project_id, milestone_id, &db_connection)? {
        change_bus.publish(Change::collection(project_id, Collection::Milestones));
    }

    Ok(())
}

fn modify_milestone(
    project_id: &str,
    milestone_id: &str,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
    modify: impl FnOnce(&mut Milestone) -> bool,
) -> InternalResult<Json<Option<Milestone>>> {
    let db_connection = db_connection.lock()?;

    let milestone = update_milestone_in_db(project_id, milestone_id, &db_connection, modify)?;
    if milestone.is_some() {
        change_bus.publish(Change::collection(project_id, Collection::Milestones));
    }

    Ok(Json(milestone))
}

#[post(
    "/projects/<project_id>/milestones/<milestone_id>/steps",
    format = "json",
    data = "<request>"
)]
pub fn add_milestone_step(
    project_id: &str,
    milestone_id: &str,
    request: Json<AddStepRequest>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<Milestone>>> {
    modify_milestone(project_id, milestone_id, db_connection, change_bus, |milestone| {
        add_step(milestone, &request.title)
    })
}

#[post("/projects/<project_id>/milestones/<milestone_id>/steps/<step_id>/toggle")]
pub fn toggle_milestone_step(
    project_id: &str,
    milestone_id: &str,
    step_id: &str,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<Milestone>>> {
    modify_milestone(project_id, milestone_id, db_connection, change_bus, |milestone| {
        toggle_step(milestone, step_id)
    })
}

#[post("/projects/<project_id>/milestones/<milestone_id>/complete")]
pub fn complete_milestone(
    project_id: &str,
    milestone_id: &str,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<Milestone>>> {
    modify_milestone(project_id, milestone_id, db_connection, change_bus, |milestone| {
        mark_complete(milestone);
        true
    })
}
