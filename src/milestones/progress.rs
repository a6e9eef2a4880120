//! Progress arithmetic behind the milestone page and the dashboard.
//!
//! Everything here is pure and recomputed from the full collection on every
//! change; collections are one team's worth of milestones, so there is no
//! incremental bookkeeping.

use serde::Serialize;

use super::data::{Milestone, Step};

/// `round(100 * part / whole)`, rounding halves up; 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }

    ((200 * part + whole) / (2 * whole)) as u32
}

pub fn compute_step_progress(steps: &[Step]) -> u32 {
    percentage(steps.iter().filter(|step| step.done).count(), steps.len())
}

pub fn is_complete(milestone: &Milestone) -> bool {
    milestone.progress >= 100
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rollup {
    pub total_milestones: usize,
    pub completed_milestones: usize,
    pub total_steps: usize,
    pub completed_steps: usize,
}

impl Rollup {
    pub fn milestone_progress(&self) -> u32 {
        percentage(self.completed_milestones, self.total_milestones)
    }

    pub fn step_progress(&self) -> u32 {
        percentage(self.completed_steps, self.total_steps)
    }
}

pub fn rollup(milestones: &[Milestone]) -> Rollup {
    milestones
        .iter()
        .fold(Rollup::default(), |mut totals, milestone| {
            totals.total_milestones += 1;
            if is_complete(milestone) {
                totals.completed_milestones += 1;
            }
            totals.total_steps += milestone.steps.len();
            totals.completed_steps += milestone.steps.iter().filter(|step| step.done).count();
            totals
        })
}

/// Earliest-due incomplete milestone. Completed milestones are dropped
/// before ordering, undated ones sort after dated ones, and ties keep input
/// order. With nothing incomplete the first milestone is returned.
pub fn select_next(milestones: &[Milestone]) -> Option<&Milestone> {
    let mut incomplete: Vec<&Milestone> = milestones
        .iter()
        .filter(|milestone| !is_complete(milestone))
        .collect();

    if incomplete.is_empty() {
        return milestones.first();
    }

    incomplete.sort_by_key(|milestone| (milestone.due.is_none(), milestone.due));
    incomplete.first().copied()
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn progress(&self) -> u32 {
        percentage(self.completed, self.total)
    }
}

/// Steps win over milestones, milestones win over tasks.
pub fn display_progress(rollup: &Rollup, tasks: &TaskCounts) -> u32 {
    if rollup.total_steps > 0 {
        rollup.step_progress()
    } else if rollup.total_milestones > 0 {
        rollup.milestone_progress()
    } else {
        tasks.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn steps(done: &[bool]) -> Vec<Step> {
        done.iter()
            .enumerate()
            .map(|(i, done)| Step {
                id: format!("s-{}", i),
                title: format!("step {}", i),
                done: *done,
            })
            .collect()
    }

    fn milestone(id: &str, due: Option<&str>, progress: u32) -> Milestone {
        Milestone {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            due: due.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            steps: vec![],
            progress,
        }
    }

    #[test]
    fn empty_steps_have_zero_progress() {
        assert_eq!(compute_step_progress(&[]), 0);
    }

    #[test]
    fn step_progress_rounds_to_nearest() {
        assert_eq!(compute_step_progress(&steps(&[true, true, false])), 67);
        assert_eq!(compute_step_progress(&steps(&[true, false, false])), 33);
        assert_eq!(compute_step_progress(&steps(&[true, false])), 50);
        assert_eq!(compute_step_progress(&steps(&[true, true, true])), 100);
    }

    #[test]
    fn halves_round_up() {
        // 1/8 = 12.5%
        assert_eq!(percentage(1, 8), 13);
        // 7/8 = 87.5%
        assert_eq!(percentage(7, 8), 88);
    }

    #[test]
    fn rollup_counts_completed_milestones_and_steps() {
        let mut first = milestone("a", None, 100);
        first.steps = steps(&[true, true]);
        let mut second = milestone("b", None, 50);
        second.steps = steps(&[true, false]);
        let third = milestone("c", None, 0);

        let totals = rollup(&[first, second, third]);

        assert_eq!(
            totals,
            Rollup {
                total_milestones: 3,
                completed_milestones: 1,
                total_steps: 4,
                completed_steps: 3,
            }
        );
    }

    #[test]
    fn manually_completed_milestone_without_steps_counts() {
        let totals = rollup(&[milestone("a", None, 100)]);

        assert_eq!(totals.completed_milestones, 1);
        assert_eq!(totals.total_steps, 0);
    }

    #[test]
    fn select_next_of_nothing_is_none() {
        assert_eq!(select_next(&[]), None);
    }

    #[test]
    fn select_next_filters_before_sorting() {
        let milestones = vec![
            milestone("later", Some("2025-02-01"), 50),
            milestone("earlier-but-done", Some("2025-01-01"), 100),
        ];

        assert_eq!(select_next(&milestones).unwrap().id, "later");
    }

    #[test]
    fn select_next_prefers_earliest_due() {
        let milestones = vec![
            milestone("march", Some("2025-03-01"), 0),
            milestone("undated", None, 0),
            milestone("january", Some("2025-01-15"), 10),
        ];

        assert_eq!(select_next(&milestones).unwrap().id, "january");
    }

    #[test]
    fn select_next_ties_keep_input_order() {
        let milestones = vec![
            milestone("first", Some("2025-01-01"), 0),
            milestone("second", Some("2025-01-01"), 0),
        ];

        assert_eq!(select_next(&milestones).unwrap().id, "first");
    }

    #[test]
    fn select_next_falls_back_to_first_when_all_complete() {
        let milestones = vec![
            milestone("b", Some("2025-03-01"), 100),
            milestone("a", Some("2025-01-01"), 100),
        ];

        assert_eq!(select_next(&milestones).unwrap().id, "b");
    }

    #[test]
    fn display_progress_prefers_steps() {
        let totals = Rollup {
            total_milestones: 2,
            completed_milestones: 0,
            total_steps: 4,
            completed_steps: 1,
        };
        let tasks = TaskCounts {
            total: 1,
            completed: 1,
        };

        assert_eq!(display_progress(&totals, &tasks), 25);
    }

    #[test]
    fn display_progress_falls_back_to_milestones() {
        let totals = Rollup {
            total_milestones: 3,
            completed_milestones: 1,
            total_steps: 0,
            completed_steps: 0,
        };
        let tasks = TaskCounts {
            total: 1,
            completed: 1,
        };

        assert_eq!(display_progress(&totals, &tasks), 33);
    }

    #[test]
    fn display_progress_falls_back_to_tasks_then_zero() {
        let tasks = TaskCounts {
            total: 4,
            completed: 3,
        };

        assert_eq!(display_progress(&Rollup::default(), &tasks), 75);
        assert_eq!(
            display_progress(&Rollup::default(), &TaskCounts::default()),
            0
        );
    }
}
