use crate::dates::{days_in_month, month_start};
use chrono::{Datelike, NaiveDate};

/// Six weeks of seven days.
pub const GRID_CELLS: usize = 42;
pub const DAYS_IN_WEEK: usize = 7;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GridSlot {
    Blank,
    Day(NaiveDate),
}

impl GridSlot {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            GridSlot::Blank => None,
            GridSlot::Day(date) => Some(*date),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, GridSlot::Blank)
    }
}

/// Lays out the month containing `anchor` as exactly [`GRID_CELLS`] slots:
/// one leading blank per weekday before day 1 (Sunday first), every day of
/// the month in order, then trailing blanks.
pub fn month_grid(anchor: NaiveDate) -> Vec<GridSlot> {
    let leading = month_start(anchor).weekday().num_days_from_sunday() as usize;
    let mut slots = Vec::with_capacity(GRID_CELLS);
    slots.extend(std::iter::repeat(GridSlot::Blank).take(leading));
    slots.extend(
        (1..=days_in_month(anchor))
            .filter_map(|day| NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), day))
            .map(GridSlot::Day),
    );
    slots.truncate(GRID_CELLS);
    slots.resize(GRID_CELLS, GridSlot::Blank);
    slots
}
