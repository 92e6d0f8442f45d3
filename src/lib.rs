//! Month and year calendar of dated tasks.
//!
//! [`store::TaskStore`] owns the task list and writes it back through a
//! [`storage::TaskPersistence`] after every change. [`grid`] and [`view`]
//! turn a month into 42 day-or-blank cells with the matching tasks attached.

pub mod app;
pub mod config;
pub mod dates;
pub mod grid;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;
