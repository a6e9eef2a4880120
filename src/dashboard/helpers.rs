use rusqlite::Connection;

use std::collections::HashSet;

use crate::ideas::helpers::get_ideas_from_db;
use crate::internal_error::InternalResult;
use crate::milestones::data::{Milestone, MilestoneOrder};
use crate::milestones::helpers::get_milestones_from_db;
use crate::milestones::progress::{display_progress, rollup, select_next};
use crate::tasks::board::count_tasks;
use crate::tasks::data::Task;
use crate::tasks::helpers::get_tasks_from_db;

use super::data::*;

/// Distinct task assignees, never reported as fewer than one.
pub fn count_team_members(tasks: &[Task]) -> usize {
    let assignees: HashSet<&str> = tasks.iter().map(|task| task.assignee.id.as_str()).collect();

    assignees.len().max(1)
}

pub fn summarize(tasks: &[Task], total_ideas: usize, milestones: &[Milestone]) -> DashboardSummary {
    let task_counts = count_tasks(tasks);
    let totals = rollup(milestones);

    DashboardSummary {
        team_members: count_team_members(tasks),
        total_ideas,
        tasks_completed: task_counts.completed,
        tasks_total: task_counts.total,
        milestones: totals,
        next_milestone: select_next(milestones).cloned(),
        tasks_progress: task_counts.progress(),
        milestones_progress: totals.milestone_progress(),
        steps_progress: totals.step_progress(),
        display_progress: display_progress(&totals, &task_counts),
    }
}

pub fn get_dashboard_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<DashboardSummary> {
    let tasks = get_tasks_from_db(project_id, db_connection)?;
    let ideas = get_ideas_from_db(project_id, db_connection)?;
    let milestones = get_milestones_from_db(project_id, MilestoneOrder::DueAsc, db_connection)?;

    Ok(summarize(&tasks, ideas.len(), &milestones))
}
