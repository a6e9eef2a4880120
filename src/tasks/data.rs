use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::{optional_date, text_enum};

pub type TaskID = String;

text_enum! {
    TaskStatus {
        Todo => "todo",
        InProgress => "in-progress",
        Done => "done",
    }
}

text_enum! {
    TaskPriority {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Assignee {
    pub id: String,
    pub name: String,
}

impl Assignee {
    pub fn anonymous() -> Assignee {
        Assignee {
            id: "unknown".to_string(),
            name: "Anonymous Member".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskID,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee: Assignee,
    pub due_date: NaiveDate,
}

#[derive(Deserialize, Debug, Default)]
pub struct AddTaskRequest {
    pub title: String,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Deserialize, Debug)]
pub struct MoveTaskRequest {
    pub status: TaskStatus,
}

/// Tasks partitioned into the three kanban columns, in column order.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    pub todo: Vec<Task>,
    #[serde(rename = "in-progress")]
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}
