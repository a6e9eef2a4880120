use chrono::NaiveDate;
use rocket::FromFormField;
use serde::{Deserialize, Serialize};

use crate::data::optional_date;

pub type MilestoneID = String;
pub type StepID = String;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: StepID,
    pub title: String,
    pub done: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub id: MilestoneID,
    pub title: String,
    pub description: String,
    pub due: Option<NaiveDate>,
    pub steps: Vec<Step>,
    pub progress: u32,
}

/// Editor payload for creating or replacing a milestone.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct MilestoneDraft {
    pub id: Option<MilestoneID>,
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "optional_date")]
    pub due: Option<NaiveDate>,
    pub steps: Vec<StepDraft>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct StepDraft {
    pub id: Option<StepID>,
    pub title: String,
    pub done: bool,
}

#[derive(Deserialize, Debug)]
pub struct AddStepRequest {
    pub title: String,
}

#[derive(FromFormField, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MilestoneOrder {
    #[default]
    #[field(value = "created_desc")]
    CreatedDesc,
    #[field(value = "due_asc")]
    DueAsc,
}
