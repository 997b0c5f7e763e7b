//! Project records and derived status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::datekey::lenient_date;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A top-level document under `projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
    #[serde(default)]
    pub tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
}

impl Project {
    /// Task completion as a rounded whole percentage, 0 with no tasks.
    pub fn completion_percent(&self) -> u32 {
        if self.tasks == 0 {
            return 0;
        }
        let ratio = f64::from(self.completed_tasks) / f64::from(self.tasks);
        (ratio * 100.0).round() as u32
    }

    /// Days until the deadline as of `today`; negative once past it.
    /// `None` when no deadline is set.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.deadline.map(|deadline| (deadline - today).num_days())
    }

    /// Derived standing, evaluated in priority order: completion wins
    /// over the deadline, the deadline wins over early progress.
    pub fn status(&self, today: NaiveDate) -> ProjectStatus {
        if self.completion_percent() >= 100 {
            return ProjectStatus::Completed;
        }
        if matches!(self.days_remaining(today), Some(days) if days < 0) {
            return ProjectStatus::Overdue;
        }
        if self.completion_percent() < 25 {
            ProjectStatus::JustStarted
        } else {
            ProjectStatus::InProgress
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectStatus {
    Completed,
    Overdue,
    JustStarted,
    InProgress,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Overdue => "Overdue",
            ProjectStatus::JustStarted => "Just Started",
            ProjectStatus::InProgress => "In Progress",
        }
    }
}

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
}

impl ProjectForm {
    /// `today` becomes the creation date; the deadline may not precede it.
    pub fn into_record(self, today: NaiveDate) -> Result<Project, CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Project name is required".into()));
        }
        if matches!(self.deadline, Some(deadline) if deadline < today) {
            return Err(CoreError::Validation(
                "Deadline cannot be in the past".into(),
            ));
        }

        Ok(Project {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            priority: self.priority,
            deadline: self.deadline,
            created_at: Some(today),
            tasks: 0,
            completed_tasks: 0,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn project(tasks: u32, completed: u32, deadline: Option<NaiveDate>) -> Project {
        Project {
            name: "Site A".to_string(),
            description: String::new(),
            priority: Priority::Medium,
            deadline,
            created_at: None,
            tasks,
            completed_tasks: completed,
        }
    }

    // -- completion / deadline --

    #[test]
    fn completion_rounds_and_handles_zero_tasks() {
        assert_eq!(project(0, 0, None).completion_percent(), 0);
        assert_eq!(project(3, 1, None).completion_percent(), 33);
        assert_eq!(project(3, 2, None).completion_percent(), 67);
    }

    #[test]
    fn days_remaining_counts_from_today() {
        let today = d(2024, 5, 1);
        assert_eq!(project(1, 0, Some(d(2024, 5, 11))).days_remaining(today), Some(10));
        assert_eq!(project(1, 0, Some(d(2024, 4, 30))).days_remaining(today), Some(-1));
        assert_eq!(project(1, 0, None).days_remaining(today), None);
    }

    // -- status --

    #[test]
    fn completed_wins_even_when_overdue() {
        let today = d(2024, 5, 1);
        let p = project(4, 4, Some(d(2024, 4, 1)));
        assert_eq!(p.status(today), ProjectStatus::Completed);
    }

    #[test]
    fn overdue_wins_over_progress() {
        let today = d(2024, 5, 1);
        let p = project(4, 2, Some(d(2024, 4, 1)));
        assert_eq!(p.status(today), ProjectStatus::Overdue);
    }

    #[test]
    fn low_completion_reads_just_started() {
        let today = d(2024, 5, 1);
        assert_eq!(project(10, 2, None).status(today), ProjectStatus::JustStarted);
        assert_eq!(project(10, 3, None).status(today), ProjectStatus::InProgress);
    }

    #[test]
    fn deadline_today_is_not_overdue() {
        let today = d(2024, 5, 1);
        let p = project(10, 5, Some(today));
        assert_eq!(p.status(today), ProjectStatus::InProgress);
    }

    // -- form --

    #[test]
    fn blank_name_rejected() {
        let err = ProjectForm::default().into_record(d(2024, 5, 1)).unwrap_err();
        assert_matches!(err, CoreError::Validation(m) if m == "Project name is required");
    }

    #[test]
    fn past_deadline_rejected() {
        let form = ProjectForm {
            name: "Site A".to_string(),
            deadline: Some(d(2024, 4, 1)),
            ..ProjectForm::default()
        };
        assert_matches!(form.into_record(d(2024, 5, 1)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn creation_stamps_created_at() {
        let form = ProjectForm {
            name: "Site A".to_string(),
            ..ProjectForm::default()
        };
        let p = form.into_record(d(2024, 5, 1)).unwrap();
        assert_eq!(p.created_at, Some(d(2024, 5, 1)));
        assert_eq!(p.status(d(2024, 5, 1)), ProjectStatus::JustStarted);
    }

    // -- serde compatibility --

    #[test]
    fn priority_serializes_lowercase() {
        let json = serde_json::to_value(Priority::High).unwrap();
        assert_eq!(json, "high");
    }

    #[test]
    fn legacy_document_decodes_with_defaults() {
        let p: Project = serde_json::from_str(r#"{"name":"Old Site","deadline":""}"#).unwrap();
        assert_eq!(p.priority, Priority::Medium);
        assert_eq!(p.deadline, None);
        assert_eq!(p.tasks, 0);
    }
}
