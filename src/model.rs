use crate::dates::format_iso_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type TaskId = String;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    /// ISO `YYYY-MM-DD` day the task is attached to.
    pub date: String,
    pub title: String,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The fields of a [`Task`] other than its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub date: String,
    pub title: String,
    pub project: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Project {
    Design,
    Development,
    Review,
    #[default]
    Other,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("title is required")]
    EmptyTitle,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown project: {0}")]
pub struct UnknownProject(pub String);

impl Task {
    pub fn new(id: TaskId, draft: TaskDraft) -> Self {
        Task {
            id,
            date: draft.date,
            title: draft.title,
            project: draft.project,
            note: draft.note,
        }
    }

    /// Replaces every field except the id.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.date = draft.date;
        self.title = draft.title;
        self.project = draft.project;
        self.note = draft.note;
    }
}

impl Project {
    pub const ALL: [Project; 4] = [
        Project::Design,
        Project::Development,
        Project::Review,
        Project::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Project::Design => "Design",
            Project::Development => "Development",
            Project::Review => "Review",
            Project::Other => "Other",
        }
    }

    /// Styling bucket for a stored label. Labels outside the known set style as `Other`.
    pub fn classify(label: &str) -> Project {
        label.parse().unwrap_or(Project::Other)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Project {
    type Err = UnknownProject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Project::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownProject(s.to_string()))
    }
}

/// Every task whose date key matches `date`, in input order.
pub fn tasks_for_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    let key = format_iso_date(date);
    tasks.iter().filter(|task| task.date == key).collect()
}

/// Raw add/edit form input. Converting it into a [`TaskDraft`] is the only
/// place titles are validated; the store itself accepts any draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub project: String,
    pub note: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>) -> Self {
        TaskForm {
            title: title.into(),
            project: Project::default().to_string(),
            note: String::new(),
        }
    }

    pub fn from_task(task: &Task) -> Self {
        TaskForm {
            title: task.title.clone(),
            project: task.project.clone(),
            note: task.note.clone().unwrap_or_default(),
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn into_draft(self, date: NaiveDate) -> Result<TaskDraft, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let note = self.note.trim();
        Ok(TaskDraft {
            date: format_iso_date(date),
            title: title.to_string(),
            project: self.project,
            note: (!note.is_empty()).then(|| note.to_string()),
        })
    }
}
