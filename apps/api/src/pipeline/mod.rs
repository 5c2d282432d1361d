// Per-user career checklist, ordered by step_order.

use chrono::{Duration, NaiveDate};

use crate::models::pipeline::PipelineTaskRow;
pub use crate::models::pipeline::TaskStatus;

pub mod handlers;
pub mod repository;

#[derive(Debug, Clone, PartialEq)]
pub struct SeedTask {
    pub step_order: i32,
    pub title: &'static str,
    pub description: &'static str,
    pub due_date: NaiveDate,
}

const DEFAULT_CHECKLIST: &[(&str, &str, i64)] = &[
    ("Profile Completion", "Fill in education, skills and experience", 7),
    ("Initial Job Scan", "Run a job scan against your profile", 14),
    ("First Application", "Apply to your best-matching posting", 21),
    ("Interview Prep", "Practice technical and behavioral interviews", 30),
];

/// Checklist a user starts with, due dates counted from `today`.
pub fn default_checklist(today: NaiveDate) -> Vec<SeedTask> {
    DEFAULT_CHECKLIST
        .iter()
        .enumerate()
        .map(|(i, &(title, description, days))| SeedTask {
            step_order: i as i32 + 1,
            title,
            description,
            due_date: today + Duration::days(days),
        })
        .collect()
}

/// Completed tasks as a whole percentage. An empty pipeline is 0.
pub fn pipeline_progress(tasks: &[PipelineTaskRow]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let done = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    ((done * 100) as f64 / tasks.len() as f64).round() as u8
}
