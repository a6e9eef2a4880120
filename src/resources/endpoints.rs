use rocket::response::stream::EventStream;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, Shutdown, State};

use crate::data::DBConnection;
use crate::events::{snapshot_stream, Change, ChangeBus, Collection};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/projects/<project_id>/resources?<category>&<search>")]
pub fn get_resources(
    project_id: &str,
    category: Option<&str>,
    search: Option<&str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Resource>>> {
    let db_connection = db_connection.lock()?;

    let resources = get_resources_from_db(project_id, &db_connection)?;

    Ok(Json(filter_resources(resources, category, search.unwrap_or(""))))
}

#[get("/projects/<project_id>/resources/categories")]
pub fn get_resource_categories(
    project_id: &str,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<String>>> {
    let db_connection = db_connection.lock()?;

    let resources = get_resources_from_db(project_id, &db_connection)?;

    Ok(Json(resource_categories(&resources)))
}

#[get("/projects/<project_id>/resources/events")]
pub fn resource_events(
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
        move |change| change.touches(&watched, Collection::Resources),
        move |connection| get_resources_from_db(&project_id, connection),
    )
}

#[post("/projects/<project_id>/resources", format = "json", data = "<resource>")]
pub fn add_resource(
    project_id: &str,
    resource: Json<NewResource>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<Resource>>> {
    let db_connection = db_connection.lock()?;

    let resource = add_resource_to_db(project_id, resource.into_inner(), &db_connection)?;
    if resource.is_some() {
        change_bus.publish(Change::collection(project_id, Collection::Resources));
    }

    Ok(Json(resource))
}

#[patch(
    "/projects/<project_id>/resources/<resource_id>/rate",
    format = "json",
    data = "<request>"
)]
pub fn rate_resource(
    project_id: &str,
    resource_id: ResourceID,
    request: Json<RateRequest>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Vec<Resource>>> {
    let db_connection = db_connection.lock()?;

    if rate_resource_in_db(project_id, resource_id, request.rating, &db_connection)? {
        change_bus.publish(Change::collection(project_id, Collection::Resources));
    }

    Ok(Json(get_resources_from_db(project_id, &db_connection)?))
}

#[delete("/projects/<project_id>/resources/<resource_id>")]
pub fn delete_resource(
    project_id: &str,
    resource_id: ResourceID,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    if delete_resource_from_db(project_id, resource_id, &db_connection)? {
        change_bus.publish(Change::collection(project_id, Collection::Resources));
    }

    Ok(())
}
