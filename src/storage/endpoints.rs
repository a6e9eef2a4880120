use rocket::response::stream::EventStream;
use rocket::serde::json::{Json, Value};
use rocket::{get, put, Shutdown, State};

use crate::data::DBConnection;
use crate::events::{snapshot_stream, Change, ChangeBus};
use crate::internal_error::InternalResult;

use super::helpers::*;

#[get("/storage/<key>")]
pub fn get_entry(key: &str, db_connection: &State<DBConnection>) -> InternalResult<Json<Option<Value>>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(get_value(key, &db_connection)?))
}

#[put("/storage/<key>", format = "json", data = "<value>")]
pub fn set_entry(
    key: &str,
    value: Json<Value>,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    set_value(key, &value.into_inner(), &db_connection)?;
    change_bus.publish(Change::Key(key.to_string()));

    Ok(())
}

#[get("/storage/<key>/events")]
pub fn entry_events(
    key: String,
    db_connection: &State<DBConnection>,
    change_bus: &State<ChangeBus>,
    shutdown: Shutdown,
) -> EventStream![] {
    let watched = key.clone();

    snapshot_stream(
        db_connection.inner().clone(),
        change_bus.subscribe(),
        shutdown,
        move |change| change.touches_key(&watched),
        move |connection| get_value::<Value>(&key, connection),
    )
}
