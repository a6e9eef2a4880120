use rusqlite::Connection;

use crate::data::now_timestamp;
use crate::events::Change;
use crate::internal_error::InternalResult;
use crate::storage::helpers::{get_value, set_value};

use super::checklist::*;
use super::data::*;

pub fn get_submission_form_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<SubmissionForm> {
    Ok(get_value(&form_key(project_id), db_connection)?.unwrap_or_default())
}

pub fn save_submission_form_to_db(
    project_id: &str,
    form: &SubmissionForm,
    db_connection: &Connection,
) -> InternalResult<()> {
    set_value(&form_key(project_id), form, db_connection)
}

pub fn submission_change(project_id: &str) -> Change {
    Change::Key(form_key(project_id))
}

pub fn touches_submission(change: &Change, project_id: &str) -> bool {
    change.touches_key(&form_key(project_id))
}

pub fn get_submission_status_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<SubmissionStatus> {
    Ok(submission_status(get_submission_form_from_db(project_id, db_connection)?))
}

pub fn get_showcase_from_db(db_connection: &Connection) -> InternalResult<Vec<ShowcaseEntry>> {
    Ok(get_value(SHOWCASE_KEY, db_connection)?.unwrap_or_default())
}

/// Stores the form and publishes it to the showcase in one transaction.
/// Nothing is written unless every required checklist item is complete.
pub fn submit_project_to_db(
    project_id: &str,
    form: SubmissionForm,
    db_connection: &Connection,
) -> InternalResult<Option<ShowcaseEntry>> {
    if !is_ready(&build_checklist(&form)) {
        return Ok(None);
    }

    let transaction = db_connection.unchecked_transaction()?;
    save_submission_form_to_db(project_id, &form, &transaction)?;

    let entry = ShowcaseEntry {
        id: project_id.to_string(),
        form,
        submitted_at: now_timestamp(),
    };

    let mut showcase = get_showcase_from_db(&transaction)?;
    upsert_entry(&mut showcase, entry.clone());
    set_value(SHOWCASE_KEY, &showcase, &transaction)?;
    transaction.commit()?;

    Ok(Some(entry))
}
