//! Render-ready layout of the month and year views. Nothing here draws;
//! renderers walk the cells and pick styles from the flags.

use crate::dates::{is_past_at, is_today_at, WEEKDAY_INITIALS, WEEKDAY_LABELS};
use crate::grid::{month_grid, GridSlot, DAYS_IN_WEEK};
use crate::model::{tasks_for_date, Project, Task, TaskId};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Badges shown per day before collapsing the rest into `+N more`.
pub const VISIBLE_BADGES: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BadgeStyle {
    Purple,
    Blue,
    Green,
    Gray,
}

impl BadgeStyle {
    pub fn for_project(label: &str) -> Self {
        match Project::classify(label) {
            Project::Design => BadgeStyle::Purple,
            Project::Development => BadgeStyle::Blue,
            Project::Review => BadgeStyle::Green,
            Project::Other => BadgeStyle::Gray,
        }
    }

    fn marker(&self) -> char {
        match self {
            BadgeStyle::Purple => 'D',
            BadgeStyle::Blue => 'V',
            BadgeStyle::Green => 'R',
            BadgeStyle::Gray => 'o',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub id: TaskId,
    pub title: String,
    pub style: BadgeStyle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Strictly before today; never set together with `is_today`.
    pub is_past: bool,
    /// Every task on this day, in stored order.
    pub tasks: Vec<Task>,
    pub badges: Vec<Badge>,
    pub overflow: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellLayout {
    Blank,
    Day(DayCell),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthLayout {
    pub month: NaiveDate,
    pub title: String,
    pub short_title: String,
    pub cells: Vec<CellLayout>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearLayout {
    pub year: i32,
    pub months: Vec<MonthLayout>,
}

impl DayCell {
    fn build(date: NaiveDate, tasks: &[Task], today: NaiveDate) -> Self {
        let matching = tasks_for_date(tasks, date);
        let is_today = is_today_at(date, today);
        let badges = matching
            .iter()
            .take(VISIBLE_BADGES)
            .map(|task| Badge {
                id: task.id.clone(),
                title: task.title.clone(),
                style: BadgeStyle::for_project(&task.project),
            })
            .collect();
        DayCell {
            date,
            is_today,
            is_past: is_past_at(date, today) && !is_today,
            badges,
            overflow: matching.len().saturating_sub(VISIBLE_BADGES),
            tasks: matching.into_iter().cloned().collect(),
        }
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

impl CellLayout {
    pub fn day_cell(&self) -> Option<&DayCell> {
        match self {
            CellLayout::Blank => None,
            CellLayout::Day(cell) => Some(cell),
        }
    }
}

impl MonthLayout {
    pub fn build(anchor: NaiveDate, tasks: &[Task], today: NaiveDate) -> Self {
        let cells = month_grid(anchor)
            .into_iter()
            .map(|slot| match slot {
                GridSlot::Blank => CellLayout::Blank,
                GridSlot::Day(date) => CellLayout::Day(DayCell::build(date, tasks, today)),
            })
            .collect();
        MonthLayout {
            month: anchor.with_day(1).unwrap_or(anchor),
            title: anchor.format("%B %Y").to_string(),
            short_title: anchor.format("%b").to_string(),
            cells,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(CellLayout::day_cell)
    }
}

impl YearLayout {
    pub fn build(year: i32, tasks: &[Task], today: NaiveDate) -> Self {
        let months = (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
            .map(|anchor| MonthLayout::build(anchor, tasks, today))
            .collect();
        YearLayout { year, months }
    }
}

/// Plain-text month grid: one row per week, today in brackets, past days
/// marked with a trailing `.`, and one project marker per visible badge
/// under each day.
impl fmt::Display for MonthLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:^48}", self.title)?;
        let header: Vec<String> = WEEKDAY_LABELS.iter().map(|h| format!("{:^6}", h)).collect();
        writeln!(f, "{}", header.join(" ").trim_end())?;
        for week in self.cells.chunks(DAYS_IN_WEEK) {
            if week.iter().all(|cell| cell.day_cell().is_none()) {
                continue;
            }
            let mut days = Vec::with_capacity(DAYS_IN_WEEK);
            let mut badges = Vec::with_capacity(DAYS_IN_WEEK);
            for cell in week {
                match cell.day_cell() {
                    None => {
                        days.push(" ".repeat(6));
                        badges.push(" ".repeat(6));
                    }
                    Some(cell) => {
                        days.push(day_label(cell));
                        badges.push(badge_label(cell));
                    }
                }
            }
            writeln!(f, "{}", days.join(" ").trim_end())?;
            writeln!(f, "{}", badges.join(" ").trim_end())?;
        }
        Ok(())
    }
}

/// Plain-text year overview: every month as a compact grid with `*` on
/// days that carry tasks.
impl fmt::Display for YearLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.year)?;
        let header: String = WEEKDAY_INITIALS.iter().map(|h| format!("{:>3}", h)).collect();
        for month in &self.months {
            writeln!(f)?;
            writeln!(f, "{}", month.short_title)?;
            writeln!(f, "{}", header)?;
            for week in month.cells.chunks(DAYS_IN_WEEK) {
                if week.iter().all(|cell| cell.day_cell().is_none()) {
                    continue;
                }
                let line: String = week
                    .iter()
                    .map(|cell| match cell.day_cell() {
                        None => "   ".to_string(),
                        Some(day) => {
                            let mark = if day.tasks.is_empty() { ' ' } else { '*' };
                            format!("{:>2}{}", day.day(), mark)
                        }
                    })
                    .collect();
                writeln!(f, "{}", line.trim_end())?;
            }
        }
        Ok(())
    }
}

fn day_label(cell: &DayCell) -> String {
    if cell.is_today {
        format!("[{:>2}]  ", cell.day())
    } else if cell.is_past {
        format!(" {:>2}.  ", cell.day())
    } else {
        format!(" {:>2}   ", cell.day())
    }
}

fn badge_label(cell: &DayCell) -> String {
    let mut label: String = cell.badges.iter().map(|b| b.style.marker()).collect();
    if cell.overflow > 0 {
        label.push_str(&format!("+{}", cell.overflow));
    }
    format!("{:<6}", label)
}
