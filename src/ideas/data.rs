use serde::{Deserialize, Serialize};

pub type IdeaID = i64;
pub type CategoryID = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Idea {
    pub id: IdeaID,
    pub title: String,
    pub description: String,
    pub category: String,
    pub votes: u32,
    pub pinned: bool,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
    pub category: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryID,
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct NewCategory {
    pub name: String,
}
