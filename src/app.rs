//! Controller state that sits between user actions and the task store:
//! which month or year is on screen, and which day or task the add/edit
//! form is open for.

use crate::dates::{add_months, add_years, month_start, parse_iso_date};
use crate::model::{FormError, TaskForm, TaskId};
use crate::storage::TaskPersistence;
use crate::store::TaskStore;
use chrono::{Datelike, NaiveDate};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Month => "Month",
            ViewMode::Year => "Year",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Navigator {
    anchor: NaiveDate,
    mode: ViewMode,
}

impl Navigator {
    pub fn new(date: NaiveDate, mode: ViewMode) -> Self {
        Navigator {
            anchor: month_start(date),
            mode,
        }
    }

    /// First day of the month on screen.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn previous(&mut self) {
        self.anchor = match self.mode {
            ViewMode::Month => add_months(self.anchor, -1),
            ViewMode::Year => add_years(self.anchor, -1),
        };
    }

    pub fn next(&mut self) {
        self.anchor = match self.mode {
            ViewMode::Month => add_months(self.anchor, 1),
            ViewMode::Year => add_years(self.anchor, 1),
        };
    }

    /// `"March 2024"` in month mode, `"2024"` in year mode.
    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Month => self.anchor.format("%B %Y").to_string(),
            ViewMode::Year => self.anchor.year().to_string(),
        }
    }

    /// First day of each month of the anchor's year.
    pub fn year_months(&self) -> Vec<NaiveDate> {
        (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(self.anchor.year(), month, 1))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Editor {
    #[default]
    Closed,
    Adding {
        date: NaiveDate,
    },
    Editing {
        date: NaiveDate,
        task_id: TaskId,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(TaskId),
    Updated(TaskId),
    /// The task being edited disappeared before the form was submitted.
    Missing(TaskId),
}

impl Editor {
    pub fn open_day(&mut self, date: NaiveDate) {
        *self = Editor::Adding { date };
    }

    /// Opens the form on an existing task. Returns `false` when `id` is unknown
    /// or the stored date is not a valid day.
    pub fn open_task<P: TaskPersistence>(&mut self, store: &TaskStore<P>, id: &str) -> bool {
        let Some(date) = store.get(id).and_then(|task| parse_iso_date(&task.date)) else {
            return false;
        };
        *self = Editor::Editing {
            date,
            task_id: id.to_string(),
        };
        true
    }

    pub fn close(&mut self) {
        *self = Editor::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Editor::Closed)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Editor::Closed => None,
            Editor::Adding { date } | Editor::Editing { date, .. } => Some(*date),
        }
    }

    /// Moves the open form to another day.
    pub fn set_date(&mut self, new_date: NaiveDate) {
        match self {
            Editor::Closed => {}
            Editor::Adding { date } | Editor::Editing { date, .. } => *date = new_date,
        }
    }

    /// Form pre-filled from the task being edited, or blank when adding.
    pub fn form<P: TaskPersistence>(&self, store: &TaskStore<P>) -> TaskForm {
        match self {
            Editor::Editing { task_id, .. } => store
                .get(task_id)
                .map(TaskForm::from_task)
                .unwrap_or_default(),
            _ => TaskForm::new(""),
        }
    }

    /// Submits `form`. On success the editor closes; a rejected form leaves
    /// the editor open and the store untouched.
    pub fn save<P: TaskPersistence>(
        &mut self,
        store: &mut TaskStore<P>,
        form: TaskForm,
    ) -> Result<Option<SaveOutcome>, FormError> {
        let Some(date) = self.date() else {
            return Ok(None);
        };
        let draft = form.into_draft(date)?;
        let outcome = match &*self {
            Editor::Editing { task_id, .. } => {
                if store.update(task_id, draft) {
                    SaveOutcome::Updated(task_id.clone())
                } else {
                    SaveOutcome::Missing(task_id.clone())
                }
            }
            _ => SaveOutcome::Created(store.create(draft)),
        };
        self.close();
        Ok(Some(outcome))
    }

    /// Deletes the task being edited. Does nothing while adding.
    pub fn delete<P: TaskPersistence>(&mut self, store: &mut TaskStore<P>) -> bool {
        let Editor::Editing { task_id, .. } = &*self else {
            return false;
        };
        let deleted = store.delete(task_id);
        self.close();
        deleted
    }
}
