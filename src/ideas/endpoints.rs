use rocket::response::stream::EventStream;
use rocket::serde::json::Json;
use rocket::{delete, get, patch, post, Shutdown, State};

use crate::data::DBConnection;
use crate::events::{snapshot_stream, Change, ChangeBus, Collection};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/projects/<project_id>/ideas")]
pub fn get_ideas(project_id: &str, db_connection: &State<DBConnection>) -> InternalResult<Json<Vec<Idea>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_ideas_from_db(project_id, &db_connection)?))
}

#[get("/projects/<project_id>/ideas/events")]
pub fn idea_events(
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
        move |change| change.touches(&watched, Collection::Ideas),
        move |connection| get_ideas_from_db(&project_id, connection),
    )
}

#[post("/projects/<project_id>/ideas", format = "json", data = "<idea>")]
pub fn add_idea(
    project_id: &str,
    idea: Json<NewIdea>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<Idea>>> {
    let db_connection = db_connection.lock()?;

    let idea = add_idea_to_db(project_id, idea.into_inner(), &db_connection)?;
    if idea.is_some() {
        change_bus.publish(Change::collection(project_id, Collection::Ideas));
    }

    Ok(Json(idea))
}

#[patch("/projects/<project_id>/ideas/<idea_id>/vote")]
pub fn vote_idea(
    project_id: &str,
    idea_id: IdeaID,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Vec<Idea>>> {
    let db_connection = db_connection.lock()?;

    if vote_idea_in_db(project_id, idea_id, &db_connection)? {
        change_bus.publish(Change::collection(project_id, Collection::Ideas));
    }

    Ok(Json(get_ideas_from_db(project_id, &db_connection)?))
}

#[patch("/projects/<project_id>/ideas/<idea_id>/pin")]
pub fn pin_idea(
    project_id: &str,
    idea_id: IdeaID,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Vec<Idea>>> {
    let db_connection = db_connection.lock()?;

    if toggle_idea_pin_in_db(project_id, idea_id, &db_connection)? {
        change_bus.publish(Change::collection(project_id, Collection::Ideas));
    }

    Ok(Json(get_ideas_from_db(project_id, &db_connection)?))
}

#[delete("/projects/<project_id>/ideas/<idea_id>")]
pub fn delete_idea(
    project_id: &str,
    idea_id: IdeaID,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    if delete_idea_from_db(project_id, idea_id, &db_connection)? {
        change_bus.publish(Change::collection(project_id, Collection::Ideas));
    }

    Ok(())
}

#[get("/projects/<project_id>/categories")]
pub fn get_categories(
    project_id: &str,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Category>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_categories_from_db(project_id, &db_connection)?))
}

#[post("/projects/<project_id>/categories", format = "json", data = "<category>")]
pub fn add_category(
    project_id: &str,
    category: Json<NewCategory>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<Json<Option<Category>>> {
    let db_connection = db_connection.lock()?;

    let category = add_category_to_db(project_id, &category.name, &db_connection)?;
    if category.is_some() {
        change_bus.publish(Change::collection(project_id, Collection::Categories));
    }

    Ok(Json(category))
}
