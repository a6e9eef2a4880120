use chrono::{Duration, NaiveDate};

use crate::data::new_id;
use crate::milestones::progress::TaskCounts;

use super::data::*;

/// A new card for the board, or `None` when the title is blank. New cards
/// start in `todo` at medium priority, due the day after `today`.
pub fn new_task(title: &str, assignee: Assignee, today: NaiveDate) -> Option<Task> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    Some(Task {
        id: new_id(),
        title: title.to_string(),
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        assignee,
        due_date: today + Duration::days(1),
    })
}

pub fn group_by_status(tasks: Vec<Task>) -> TaskBoard {
    let mut board = TaskBoard::default();

    for task in tasks {
        match task.status {
            TaskStatus::Todo => board.todo.push(task),
            TaskStatus::InProgress => board.in_progress.push(task),
            TaskStatus::Done => board.done.push(task),
        }
    }

    board
}

pub fn count_tasks(tasks: &[Task]) -> TaskCounts {
    TaskCounts {
        total: tasks.len(),
        completed: tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .count(),
    }
}
