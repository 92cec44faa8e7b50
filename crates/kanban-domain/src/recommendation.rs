//! "What should I work on next?"
//!
//! A deterministic heuristic over the current board: every incomplete task is
//! scored by priority weight plus due-date urgency and the highest score
//! wins. Ties go to the task found first in column order.

use chrono::{DateTime, Utc};

use crate::{Board, Priority, Task};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Priority weight. A task without a priority scores as low.
pub fn priority_score(priority: Option<Priority>) -> u32 {
    match priority.unwrap_or(Priority::Low) {
        Priority::Critical => 100,
        Priority::High => 75,
        Priority::Medium => 50,
        Priority::Low => 25,
    }
}

/// Urgency from whole days left until `due_date`, rounded up.
pub fn due_date_score(due_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u32 {
    let Some(due) = due_date else {
        return 0;
    };
    if due < now {
        return 100;
    }
    let millis = (due - now).num_milliseconds();
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    match days {
        0..=1 => 90,
        2..=3 => 70,
        4..=7 => 50,
        _ => 30,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub priority: u32,
    pub due_date: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.priority + self.due_date
    }
}

pub fn score_task(task: &Task, now: DateTime<Utc>) -> ScoreBreakdown {
    ScoreBreakdown {
        priority: priority_score(task.priority),
        due_date: due_date_score(task.due_date, now),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredTask<'a> {
    pub task: &'a Task,
    pub score: ScoreBreakdown,
}

fn candidates(board: &Board) -> impl Iterator<Item = &Task> {
    board.tasks().filter(|t| t.completed_at.is_none())
}

/// Every incomplete task, highest score first. Equal scores keep board order.
pub fn rank_tasks(board: &Board, now: DateTime<Utc>) -> Vec<ScoredTask<'_>> {
    let mut ranked: Vec<ScoredTask<'_>> = candidates(board)
        .map(|task| ScoredTask {
            task,
            score: score_task(task, now),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total().cmp(&a.score.total()));
    ranked
}

/// The single best incomplete task, or `None` when nothing is left to do.
pub fn compute_recommendation(board: &Board, now: DateTime<Utc>) -> Option<&Task> {
    let mut best: Option<(&Task, u32)> = None;
    for task in candidates(board) {
        let score = score_task(task, now).total();
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((task, score));
        }
    }
    best.map(|(task, _)| task)
}
