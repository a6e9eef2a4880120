use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::data::{new_id, now_timestamp};
use crate::internal_error::InternalResult;

use super::data::*;
use super::progress::compute_step_progress;

const MILESTONE_COLUMNS: &str = "id, title, description, due, steps, progress";

pub fn get_milestone_from_row(row: &Row) -> rusqlite::Result<Milestone> {
    let steps: String = row.get(4)?;
    let steps: Vec<Step> = serde_json::from_str(&steps)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Milestone {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due: row.get(3)?,
        steps,
        progress: row.get(5)?,
    })
}

/// Trims step titles, drops blank steps and assigns ids to new ones.
/// Progress always follows the resulting steps.
pub fn build_milestone(draft: MilestoneDraft) -> Milestone {
    let steps: Vec<Step> = draft
        .steps
        .into_iter()
        .filter_map(|step| {
            let title = step.title.trim();
            if title.is_empty() {
                return None;
            }

            Some(Step {
                id: step.id.filter(|id| !id.is_empty()).unwrap_or_else(new_id),
                title: title.to_string(),
                done: step.done,
            })
        })
        .collect();

    Milestone {
        id: draft.id.filter(|id| !id.is_empty()).unwrap_or_else(new_id),
        title: draft.title.trim().to_string(),
        description: draft.description,
        due: draft.due,
        progress: compute_step_progress(&steps),
        steps,
    }
}

pub fn toggle_step(milestone: &mut Milestone, step_id: &str) -> bool {
    match milestone.steps.iter_mut().find(|step| step.id == step_id) {
        Some(step) => {
            step.done = !step.done;
            milestone.progress = compute_step_progress(&milestone.steps);
            true
        }
        None => false,
    }
}

pub fn add_step(milestone: &mut Milestone, title: &str) -> bool {
    let title = title.trim();
    if title.is_empty() {
        return false;
    }

    milestone.steps.push(Step {
        id: new_id(),
        title: title.to_string(),
        done: false,
    });
    milestone.progress = compute_step_progress(&milestone.steps);

    true
}

pub fn mark_complete(milestone: &mut Milestone) {
    for step in milestone.steps.iter_mut() {
        step.done = true;
    }
    milestone.progress = 100;
}

pub fn get_milestones_from_db(
    project_id: &str,
    order: MilestoneOrder,
    db_connection: &Connection,
) -> InternalResult<Vec<Milestone>> {
    let order_by = match order {
        MilestoneOrder::CreatedDesc => "rowid DESC",
        MilestoneOrder::DueAsc => "due IS NULL, due ASC, rowid ASC",
    };

    let mut statement = db_connection.prepare(&format!(
        "SELECT {} FROM milestones WHERE project_id = (?1) ORDER BY {}",
        MILESTONE_COLUMNS, order_by
    ))?;

    let milestones = statement
        .query_map(params![project_id], get_milestone_from_row)?
        .collect::<rusqlite::Result<Vec<Milestone>>>()?;

    Ok(milestones)
}

pub fn get_milestone_from_db(
    project_id: &str,
    milestone_id: &str,
    db_connection: &Connection,
) -> InternalResult<Option<Milestone>> {
    let milestone = db_connection
        .query_row(
            &format!(
                "SELECT {} FROM milestones WHERE project_id = (?1) AND id = (?2)",
                MILESTONE_COLUMNS
            ),
            params![project_id, milestone_id],
            get_milestone_from_row,
        )
        .optional()?;

    Ok(milestone)
}

/// Inserts the milestone, or overwrites the stored one with the same id.
/// An id already owned by another project is left alone and reported as
/// `false`.
pub fn save_milestone_to_db(
    project_id: &str,
    milestone: &Milestone,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let now = now_timestamp();

    let written = db_connection.execute(
        "INSERT INTO milestones
            (id, project_id, title, description, due, steps, progress, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
         ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            description = excluded.description,
            due = excluded.due,
            steps = excluded.steps,
            progress = excluded.progress,
            updated_at = excluded.updated_at
         WHERE milestones.project_id = excluded.project_id",
        params![
            milestone.id,
            project_id,
            milestone.title,
            milestone.description,
            milestone.due,
            serde_json::to_string(&milestone.steps)?,
            milestone.progress,
            now
        ],
    )?;

    Ok(written > 0)
}

pub fn delete_milestone_from_db(
    project_id: &str,
    milestone_id: &str,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let deleted = db_connection.execute(
        "DELETE FROM milestones WHERE project_id = (?1) AND id = (?2)",
        params![project_id, milestone_id],
    )?;

    Ok(deleted > 0)
}

/// Read-modify-write of a single milestone. Returns `None` when the
/// milestone does not exist or `modify` declines the change.
pub fn update_milestone_in_db(
    project_id: &str,
    milestone_id: &str,
    db_connection: &Connection,
    modify: impl FnOnce(&mut Milestone) -> bool,
) -> InternalResult<Option<Milestone>> {
    let mut milestone = match get_milestone_from_db(project_id, milestone_id, db_connection)? {
        Some(milestone) => milestone,
        None => return Ok(None),
    };

    if !modify(&mut milestone) {
        return Ok(None);
    }

    if !save_milestone_to_db(project_id, &milestone, db_connection)? {
        return Ok(None);
    }

    Ok(Some(milestone))
}
