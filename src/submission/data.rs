use serde::{Deserialize, Serialize};

use crate::data::text_enum;

pub const SHOWCASE_KEY: &str = "submittedProjects";
pub const SUMMARY_MIN_CHARS: usize = 50;

pub fn form_key(project_id: &str) -> String {
    format!("submission/{}", project_id)
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SubmissionForm {
    pub project_name: String,
    pub category: String,
    pub team_name: String,
    pub github_link: String,
    pub demo_link: String,
    pub video_link: String,
    pub summary: String,
    pub tech_stack: String,
    pub start_date: String,
    pub end_date: String,
}

text_enum! {
    ChecklistItemID {
        ProjectName => "project-name",
        Category => "category",
        Team => "team",
        TechStack => "tech-stack",
        Github => "github",
        Summary => "summary",
        DemoUrl => "demo-url",
        Video => "video",
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: ChecklistItemID,
    pub label: &'static str,
    pub required: bool,
    pub completed: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubmissionStatus {
    pub form: SubmissionForm,
    pub checklist: Vec<ChecklistItem>,
    pub completed_count: usize,
    pub required_count: usize,
    pub required_completed: usize,
    pub is_ready: bool,
}

/// One submitted project as shown on the showcase page. `id` is the
/// project id, so resubmitting replaces the earlier entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseEntry {
    pub id: String,
    #[serde(flatten)]
    pub form: SubmissionForm,
    pub submitted_at: String,
}
