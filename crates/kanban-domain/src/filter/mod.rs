//! Task filtering.
//!
//! [`TaskFilter`] is the user-facing filter stored in the state. It compiles
//! down to a [`CompositeFilter`] of single-purpose [`TaskPredicate`]s.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{LabelId, Priority, Task};

/// Trait for filtering tasks by various criteria.
pub trait TaskPredicate {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DueFilter {
    Overdue,
    Today,
    ThisWeek,
    NoDueDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilter {
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
    /// Match any of these priorities. Empty means all.
    pub priorities: Vec<Priority>,
    /// Match tasks carrying any of these labels. Empty means all.
    pub label_ids: Vec<LabelId>,
    pub due: Option<DueFilter>,
    pub hide_completed: bool,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the predicate chain for this filter, evaluated relative to `now`.
    pub fn compile(&self, now: DateTime<Utc>) -> CompositeFilter {
        let mut composite = CompositeFilter::new();

        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            composite = composite.with_filter(Box::new(SearchFilter::new(search)));
        }
        if !self.priorities.is_empty() {
            composite = composite.with_filter(Box::new(PriorityFilter::new(
                self.priorities.iter().copied(),
            )));
        }
        if !self.label_ids.is_empty() {
            composite =
                composite.with_filter(Box::new(LabelFilter::new(self.label_ids.iter().copied())));
        }
        if let Some(due) = self.due {
            composite = composite.with_filter(Box::new(DueDateFilter::new(due, now)));
        }
        if self.hide_completed {
            composite = composite.with_filter(Box::new(IncompleteFilter));
        }
        composite
    }

    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        self.compile(now).matches(task)
    }
}

pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }
}

impl TaskPredicate for SearchFilter {
    fn matches(&self, task: &Task) -> bool {
        task.title.to_lowercase().contains(&self.needle)
            || task.description.to_lowercase().contains(&self.needle)
    }
}

/// Tasks without a priority are treated as low.
pub struct PriorityFilter {
    priorities: HashSet<Priority>,
}

impl PriorityFilter {
    pub fn new(priorities: impl IntoIterator<Item = Priority>) -> Self {
        Self {
            priorities: priorities.into_iter().collect(),
        }
    }
}

impl TaskPredicate for PriorityFilter {
    fn matches(&self, task: &Task) -> bool {
        self.priorities.contains(&task.priority.unwrap_or(Priority::Low))
    }
}

pub struct LabelFilter {
    label_ids: HashSet<LabelId>,
}

impl LabelFilter {
    pub fn new(label_ids: impl IntoIterator<Item = LabelId>) -> Self {
        Self {
            label_ids: label_ids.into_iter().collect(),
        }
    }
}

impl TaskPredicate for LabelFilter {
    fn matches(&self, task: &Task) -> bool {
        task.labels.iter().any(|l| self.label_ids.contains(&l.id))
    }
}

pub struct DueDateFilter {
    due: DueFilter,
    now: DateTime<Utc>,
}

impl DueDateFilter {
    pub fn new(due: DueFilter, now: DateTime<Utc>) -> Self {
        Self { due, now }
    }
}

impl TaskPredicate for DueDateFilter {
    fn matches(&self, task: &Task) -> bool {
        match (self.due, task.due_date) {
            (DueFilter::NoDueDate, due) => due.is_none(),
            (_, None) => false,
            (DueFilter::Overdue, Some(due)) => due < self.now,
            (DueFilter::Today, Some(due)) => due.date_naive() == self.now.date_naive(),
            (DueFilter::ThisWeek, Some(due)) => {
                due >= self.now && due <= self.now + Duration::days(7)
            }
        }
    }
}

pub struct IncompleteFilter;

impl TaskPredicate for IncompleteFilter {
    fn matches(&self, task: &Task) -> bool {
        task.completed_at.is_none()
    }
}

/// Combine multiple filters with AND logic.
///
/// A task matches only if it passes all filters.
pub struct CompositeFilter {
    filters: Vec<Box<dyn TaskPredicate>>,
}

impl CompositeFilter {
    /// Create an empty composite filter (matches all tasks).
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Add a filter to the composite (builder pattern).
    pub fn with_filter(mut self, filter: Box<dyn TaskPredicate>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskPredicate for CompositeFilter {
    fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;

    fn task(title: &str) -> Task {
        Task::new(title.to_string())
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TaskFilter::default();
        assert!(filter.is_empty());
        assert!(filter.compile(Utc::now()).is_empty());
        assert!(filter.matches(&task("anything"), Utc::now()));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut t = task("Fix Login");
        t.description = "session cookie expires".to_string();

        assert!(SearchFilter::new("login").matches(&t));
        assert!(SearchFilter::new("COOKIE").matches(&t));
        assert!(!SearchFilter::new("logout").matches(&t));
    }

    #[test]
    fn test_priority_filter_treats_missing_as_low() {
        let mut t = task("No priority");
        t.priority = None;

        assert!(PriorityFilter::new([Priority::Low]).matches(&t));
        assert!(!PriorityFilter::new([Priority::High, Priority::Critical]).matches(&t));
    }

    #[test]
    fn test_label_filter() {
        let bug = Label::new("bug".to_string(), "#f00".to_string());
        let mut t = task("Crash");
        t.labels.push(bug.clone());

        assert!(LabelFilter::new([bug.id]).matches(&t));
        assert!(!LabelFilter::new([uuid::Uuid::new_v4()]).matches(&t));
    }

    #[test]
    fn test_due_date_filter() {
        let now = Utc::now();
        let mut overdue = task("Late");
        overdue.due_date = Some(now - Duration::days(2));
        let mut soon = task("Soon");
        soon.due_date = Some(now + Duration::days(3));
        let undated = task("Whenever");

        assert!(DueDateFilter::new(DueFilter::Overdue, now).matches(&overdue));
        assert!(!DueDateFilter::new(DueFilter::Overdue, now).matches(&soon));
        assert!(DueDateFilter::new(DueFilter::ThisWeek, now).matches(&soon));
        assert!(!DueDateFilter::new(DueFilter::ThisWeek, now).matches(&undated));
        assert!(DueDateFilter::new(DueFilter::NoDueDate, now).matches(&undated));
        assert!(!DueDateFilter::new(DueFilter::NoDueDate, now).matches(&soon));
    }

    #[test]
    fn test_composite_requires_all() {
        let mut done = task("Release notes");
        done.completed_at = Some(Utc::now());
        done.priority = Some(Priority::High);

        let filter = TaskFilter {
            search: Some("release".to_string()),
            priorities: vec![Priority::High],
            ..Default::default()
        };
        assert!(filter.matches(&done, Utc::now()));

        let hiding = TaskFilter {
            hide_completed: true,
            ..filter
        };
        assert!(!hiding.matches(&done, Utc::now()));
    }
}
