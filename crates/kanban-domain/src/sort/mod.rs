//! Task sorting for the view layer.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::{Priority, Task};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    /// Column order as stored.
    #[default]
    Manual,
    /// Critical first.
    Priority,
    /// Earliest due first, undated last.
    DueDate,
    /// Newest first.
    CreatedAt,
    Title,
}

impl SortOption {
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Manual => Ordering::Equal,
            Self::Priority => priority_value(b.priority).cmp(&priority_value(a.priority)),
            Self::DueDate => match (a.due_date, b.due_date) {
                (Some(ad), Some(bd)) => ad.cmp(&bd),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::CreatedAt => b.created_at.cmp(&a.created_at),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    }

    /// Stable sort in place. Works with both `&Task` and `Task` elements.
    pub fn sort<T: Borrow<Task>>(&self, tasks: &mut [T]) {
        if *self == Self::Manual {
            return;
        }
        tasks.sort_by(|a, b| self.compare(a.borrow(), b.borrow()));
    }
}

/// Convert priority to numeric value for sorting. Missing counts as low.
fn priority_value(priority: Option<Priority>) -> u8 {
    match priority.unwrap_or(Priority::Low) {
        Priority::Critical => 3,
        Priority::High => 2,
        Priority::Medium => 1,
        Priority::Low => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn titled(title: &str) -> Task {
        Task::new(title.to_string())
    }

    #[test]
    fn test_manual_keeps_order() {
        let mut tasks = vec![titled("b"), titled("a")];
        SortOption::Manual.sort(&mut tasks);
        assert_eq!(tasks[0].title, "b");
    }

    #[test]
    fn test_priority_sorts_critical_first() {
        let mut low = titled("low");
        low.priority = Some(Priority::Low);
        let mut critical = titled("critical");
        critical.priority = Some(Priority::Critical);
        let mut none = titled("none");
        none.priority = None;

        let mut tasks = vec![&low, &none, &critical];
        SortOption::Priority.sort(&mut tasks);
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["critical", "low", "none"]);
    }

    #[test]
    fn test_due_date_puts_undated_last() {
        let now = Utc::now();
        let mut later = titled("later");
        later.due_date = Some(now + Duration::days(5));
        let mut sooner = titled("sooner");
        sooner.due_date = Some(now + Duration::days(1));
        let undated = titled("undated");

        let mut tasks = vec![undated, later, sooner];
        SortOption::DueDate.sort(&mut tasks);
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["sooner", "later", "undated"]);
    }

    #[test]
    fn test_title_is_case_insensitive() {
        let mut tasks = vec![titled("beta"), titled("Alpha")];
        SortOption::Title.sort(&mut tasks);
        assert_eq!(tasks[0].title, "Alpha");
    }
}
