use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub problem_it_solves: String,
    pub challenges_faced: String,
    pub technologies_used: String,
    pub category: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub problem_it_solves: String,
    pub challenges_faced: String,
    pub technologies_used: String,
    pub category: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EditProject {
    pub name: String,
    pub description: String,
    pub category: String,
}
