mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use taskcal::config::Config;
use taskcal::logging::init_logging;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let config = Config::load(args.config.as_deref())?;
    init_logging(&config.log_level, &config.resolve_data_dir()?.join("logs"))?;
    let command = args.command.unwrap_or(cli::Command::Month {
        date: None,
        offset: 0,
    });
    match command {
        cli::Command::Add {
            date,
            title,
            project,
            note,
        } => commands::add(&config, date, title, project, note),
        cli::Command::Edit {
            task_id,
            title,
            project,
            note,
            clear_note,
            date,
        } => commands::edit(&config, task_id, title, project, note, clear_note, date),
        cli::Command::Delete { task_id } => commands::delete(&config, task_id),
        cli::Command::List { date } => commands::list(&config, date),
        cli::Command::Month { date, offset } => commands::month(&config, date, offset),
        cli::Command::Year { year, offset } => commands::year(&config, year, offset),
    }
}
