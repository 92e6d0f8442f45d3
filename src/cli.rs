use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taskcal", version, about = "Month and year calendar of dated tasks")]
pub struct Cli {
    /// Read configuration from this file instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task to a day
    Add {
        /// Day in YYYY-MM-DD format
        date: String,
        /// Title of the task
        title: String,
        /// Project category (Design, Development, Review, Other)
        #[arg(long, short = 'p')]
        project: Option<String>,
        /// Optional note
        #[arg(long, short = 'n')]
        note: Option<String>,
    },
    /// Edit an existing task
    Edit {
        /// Task id to edit
        task_id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New project category
        #[arg(long, short = 'p')]
        project: Option<String>,
        /// New note
        #[arg(long, short = 'n')]
        note: Option<String>,
        /// Remove the note
        #[arg(long, conflicts_with = "note")]
        clear_note: bool,
        /// Move the task to another day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Task id to delete
        task_id: String,
    },
    /// List tasks, optionally only those on one day
    List {
        /// Day in YYYY-MM-DD format
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the month grid containing a day (defaults to today)
    Month {
        /// Any day of the month to show (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Step this many months forward (negative steps back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
    /// Show all twelve months of a year (defaults to the current year)
    Year {
        /// Year to show (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Step this many years forward (negative steps back)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
    },
}
