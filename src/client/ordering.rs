//! Display ordering of the cached task list.

use std::cmp::Reverse;

use crate::api::TaskDto;

/// Orders tasks for display.
///
/// Incomplete tasks come first in their list order, followed by completed
/// tasks with the most recently updated first. Both partitions are stable.
#[must_use]
pub fn display_order(tasks: &[TaskDto]) -> Vec<&TaskDto> {
    let (mut ordered, mut completed): (Vec<&TaskDto>, Vec<&TaskDto>) =
        tasks.iter().partition(|task| !task.is_completed);
    completed.sort_by_key(|task| Reverse(task.updated_at));
    ordered.append(&mut completed);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, minute, 0)
            .single()
            .expect("valid instant")
    }

    fn task(id: i64, is_completed: bool, updated_minute: u32) -> TaskDto {
        TaskDto {
            id,
            title: format!("Task {id}"),
            description: None,
            is_completed,
            created_at: at(0),
            updated_at: at(updated_minute),
        }
    }

    fn ids(tasks: &[&TaskDto]) -> Vec<i64> {
        tasks.iter().map(|task| task.id).collect()
    }

    #[rstest]
    fn incomplete_first_then_completed_by_recency() {
        let tasks = vec![
            task(1, false, 1),
            task(2, true, 5),
            task(3, false, 1),
            task(4, true, 10),
        ];

        assert_eq!(ids(&display_order(&tasks)), vec![1, 3, 4, 2]);
    }

    #[rstest]
    fn incomplete_tasks_keep_list_order_regardless_of_timestamps() {
        let tasks = vec![task(7, false, 1), task(8, false, 30), task(9, false, 15)];

        assert_eq!(ids(&display_order(&tasks)), vec![7, 8, 9]);
    }

    #[rstest]
    fn completed_ties_keep_list_order() {
        let tasks = vec![task(1, true, 5), task(2, true, 5), task(3, true, 9)];

        assert_eq!(ids(&display_order(&tasks)), vec![3, 1, 2]);
    }

    #[rstest]
    fn empty_list_stays_empty() {
        assert!(display_order(&[]).is_empty());
    }
}
