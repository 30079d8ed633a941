//! Task source file commands.
//!
//! The planner core treats the task list as an external, read-only
//! collaborator; this module maintains that collaborator as a JSON file.

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Subcommand;
use dayplan_core::{Difficulty, Priority, Task};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the source file
    Add {
        /// Task title
        title: String,
        /// Task source file
        #[arg(long, default_value = "tasks.json")]
        file: PathBuf,
        /// Priority: high, medium, or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Difficulty: easy, medium, or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Due date (RFC 3339, e.g. 2026-09-01T00:00:00Z)
        #[arg(long)]
        due: Option<DateTime<Utc>>,
    },
    /// List tasks
    List {
        /// Task source file
        #[arg(long, default_value = "tasks.json")]
        file: PathBuf,
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Mark a task completed
    Done {
        /// Task ID
        id: String,
        /// Task source file
        #[arg(long, default_value = "tasks.json")]
        file: PathBuf,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn Error>> {
    match action {
        TaskAction::Add {
            title,
            file,
            priority,
            difficulty,
            due,
        } => {
            let mut tasks = load_tasks(&file)?;
            let mut task = Task::new(Uuid::new_v4().to_string(), title).with_priority(priority);
            task.difficulty = difficulty;
            task.due_date = due;
            println!("added task {} ({})", task.id, task.title);
            tasks.push(task);
            save_tasks(&file, &tasks)
        }
        TaskAction::List { file, all } => {
            let tasks = load_tasks(&file)?;
            let mut shown = 0;
            for task in &tasks {
                if task.completed && !all {
                    continue;
                }
                shown += 1;
                let difficulty = task
                    .difficulty
                    .map(|d| format!(" [{d}]"))
                    .unwrap_or_default();
                let done = if task.completed { " (done)" } else { "" };
                println!("{}  {}  {}{}{}", task.id, task.priority, task.title, difficulty, done);
            }
            if shown == 0 {
                println!("no tasks");
            }
            Ok(())
        }
        TaskAction::Done { id, file } => {
            let mut tasks = load_tasks(&file)?;
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| format!("no task with id '{id}'"))?;
            task.completed = true;
            println!("completed task {} ({})", task.id, task.title);
            save_tasks(&file, &tasks)
        }
    }
}

/// Load the task source file, treating a missing file as an empty list.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, Box<dyn Error>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, serde_json::to_string_pretty(tasks)?)?;
    Ok(())
}
