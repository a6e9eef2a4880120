use serde::Serialize;

use crate::milestones::data::Milestone;
use crate::milestones::progress::Rollup;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub team_members: usize,
    pub total_ideas: usize,
    pub tasks_completed: usize,
    pub tasks_total: usize,
    pub milestones: Rollup,
    pub next_milestone: Option<Milestone>,
    pub tasks_progress: u32,
    pub milestones_progress: u32,
    pub steps_progress: u32,
    pub display_progress: u32,
}
