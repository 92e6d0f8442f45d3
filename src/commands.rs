use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use taskcal::app::{Editor, Navigator, SaveOutcome, ViewMode};
use taskcal::config::Config;
use taskcal::dates::{format_iso_date, parse_iso_date, today};
use taskcal::model::{Project, Task, TaskForm};
use taskcal::storage::{FileStore, LocalTaskStorage};
use taskcal::store::TaskStore;
use taskcal::view::{MonthLayout, YearLayout};

type CalendarStore = TaskStore<LocalTaskStorage<FileStore>>;

pub fn add(
    config: &Config,
    date: String,
    title: String,
    project: Option<String>,
    note: Option<String>,
) -> Result<()> {
    let day = parse_day(&date)?;
    let project = parse_project(project.as_deref().unwrap_or(&config.default_project))?;
    let mut store = open_store(config)?;
    let form = TaskForm::new(title)
        .with_project(project.as_str())
        .with_note(note.unwrap_or_default());
    let mut editor = Editor::default();
    editor.open_day(day);
    if let Some(SaveOutcome::Created(id)) = editor.save(&mut store, form).context("adding task")? {
        println!("Added task {} on {}", id, format_iso_date(day));
    }
    Ok(())
}

pub fn edit(
    config: &Config,
    task_id: String,
    title: Option<String>,
    project: Option<String>,
    note: Option<String>,
    clear_note: bool,
    date: Option<String>,
) -> Result<()> {
    let mut store = open_store(config)?;
    let mut editor = Editor::default();
    if !editor.open_task(&store, &task_id) {
        bail!("task {} not found", task_id);
    }
    let mut form = editor.form(&store);
    if let Some(t) = title {
        form.title = t;
    }
    if let Some(p) = project {
        form.project = parse_project(&p)?.to_string();
    }
    if let Some(n) = note {
        form.note = n;
    }
    if clear_note {
        form.note.clear();
    }
    if let Some(d) = date {
        editor.set_date(parse_day(&d)?);
    }
    match editor.save(&mut store, form).context("editing task")? {
        Some(SaveOutcome::Updated(id)) => println!("Updated task {}", id),
        _ => bail!("task {} not found", task_id),
    }
    Ok(())
}

pub fn delete(config: &Config, task_id: String) -> Result<()> {
    let mut store = open_store(config)?;
    let mut editor = Editor::default();
    if !editor.open_task(&store, &task_id) || !editor.delete(&mut store) {
        bail!("task {} not found", task_id);
    }
    println!("Deleted task {}", task_id);
    Ok(())
}

pub fn list(config: &Config, date: Option<String>) -> Result<()> {
    let store = open_store(config)?;
    let mut tasks: Vec<&Task> = match date {
        Some(d) => store.tasks_for_date(parse_day(&d)?),
        None => store.tasks().iter().collect(),
    };
    if tasks.is_empty() {
        println!("(no tasks)");
        return Ok(());
    }
    // Stable, so tasks on the same day keep their stored order.
    tasks.sort_by(|a, b| a.date.cmp(&b.date));
    let mut current: Option<&str> = None;
    for task in tasks {
        if current != Some(task.date.as_str()) {
            println!("{}", task.date);
            current = Some(task.date.as_str());
        }
        print_task(task);
    }
    Ok(())
}

pub fn month(config: &Config, date: Option<String>, offset: i32) -> Result<()> {
    let anchor = match date {
        Some(d) => parse_day(&d)?,
        None => today(),
    };
    let mut nav = Navigator::new(anchor, ViewMode::Month);
    step(&mut nav, offset);
    let store = open_store(config)?;
    let layout = MonthLayout::build(nav.anchor(), store.tasks(), today());
    print!("{}", layout);
    let mut listed = false;
    for cell in layout.days() {
        for task in &cell.tasks {
            if !listed {
                println!();
                listed = true;
            }
            println!("{}  {}", task.date, summary(task));
        }
    }
    Ok(())
}

pub fn year(config: &Config, year: Option<i32>, offset: i32) -> Result<()> {
    let anchor = match year {
        Some(y) => NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| anyhow!("invalid year {}", y))?,
        None => today(),
    };
    let mut nav = Navigator::new(anchor, ViewMode::Year);
    step(&mut nav, offset);
    let store = open_store(config)?;
    let layout = YearLayout::build(nav.anchor().year(), store.tasks(), today());
    print!("{}", layout);
    Ok(())
}

fn open_store(config: &Config) -> Result<CalendarStore> {
    let dir = config.resolve_data_dir()?;
    Ok(TaskStore::open(LocalTaskStorage::new(FileStore::new(dir))))
}

fn step(nav: &mut Navigator, offset: i32) {
    for _ in 0..offset.unsigned_abs() {
        if offset < 0 {
            nav.previous();
        } else {
            nav.next();
        }
    }
}

fn parse_day(input: &str) -> Result<NaiveDate> {
    parse_iso_date(input).ok_or_else(|| anyhow!("invalid date (use YYYY-MM-DD): {}", input))
}

fn parse_project(input: &str) -> Result<Project> {
    input.parse::<Project>().with_context(|| {
        let known: Vec<&str> = Project::ALL.iter().map(Project::as_str).collect();
        format!("expected one of {}", known.join(", "))
    })
}

fn summary(task: &Task) -> String {
    format!("{}  [{}] {}", task.id, task.project, task.title)
}

fn print_task(task: &Task) {
    println!("  - {}", summary(task));
    if let Some(note) = &task.note {
        println!("    {}", note);
    }
}
