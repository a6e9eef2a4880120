use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::internal_error::InternalResult;

pub fn get_value<T: DeserializeOwned>(key: &str, db_connection: &Connection) -> InternalResult<Option<T>> {
    let raw: Option<String> = db_connection
        .query_row("SELECT value FROM kv WHERE key = (?1)", params![key], |row| row.get(0))
        .optional()?;

    match raw {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn set_value<T: Serialize + ?Sized>(key: &str, value: &T, db_connection: &Connection) -> InternalResult<()> {
    db_connection.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, serde_json::to_string(value)?],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_connection;

    use serde_json::{json, Value};

    #[test]
    fn missing_key_reads_as_none() {
        let connection = test_connection();

        let value: Option<Value> = get_value("customResources", &connection).unwrap();

        assert!(value.is_none());
    }

    #[test]
    fn last_write_wins() {
        let connection = test_connection();

        set_value("customResources", &json!([{"name": "a"}]), &connection).unwrap();
        set_value("customResources", &json!([]), &connection).unwrap();

        let value: Option<Value> = get_value("customResources", &connection).unwrap();
        assert_eq!(value, Some(json!([])));
    }

    #[test]
    fn typed_round_trip() {
        let connection = test_connection();

        set_value("names", &vec!["x".to_string(), "y".to_string()], &connection).unwrap();

        let names: Vec<String> = get_value("names", &connection).unwrap().unwrap();
        assert_eq!(names, vec!["x", "y"]);
    }
}
