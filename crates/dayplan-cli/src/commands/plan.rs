//! One-shot day planning command.
//!
//! Drives the core allocation protocol from the command line: loads the
//! task source file, applies an assignment script in order, then renders
//! the 06:00-24:00 grid (or emits the day report as JSON). Allocations are
//! volatile by design -- a plan lives only for the run of the command.

use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;

use chrono::{Local, NaiveTime};
use clap::Args;
use dayplan_core::grid::BLOCKS_PER_HOUR;
use dayplan_core::{Planner, PlannerConfig, SlotReport};
use serde::Serialize;

#[derive(Args)]
pub struct PlanArgs {
    /// Task source file
    #[arg(long, default_value = "tasks.json")]
    tasks: PathBuf,
    /// Assignment script entries: TASKID@HH:MM+MINUTES (applied in order)
    #[arg(long = "assign", value_name = "SPEC")]
    assignments: Vec<String>,
    /// Wall-clock override for elapsed classification, HH:MM (default: now)
    #[arg(long)]
    now: Option<String>,
    /// Planner config file (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit the day report as JSON instead of the grid
    #[arg(long)]
    json: bool,
}

/// One parsed `TASKID@HH:MM+MINUTES` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Assignment {
    task_id: String,
    hour: u8,
    block: u8,
    duration_min: u32,
}

fn parse_assignment(spec: &str) -> Result<Assignment, String> {
    let usage = || format!("invalid assignment '{spec}', expected TASKID@HH:MM+MINUTES");

    let (task_id, rest) = spec.rsplit_once('@').ok_or_else(usage)?;
    let (time, minutes) = rest.split_once('+').ok_or_else(usage)?;
    let (h, m) = time.split_once(':').ok_or_else(usage)?;

    let hour: u8 = h.parse().map_err(|_| usage())?;
    let minute: u32 = m.parse().map_err(|_| usage())?;
    let duration_min: u32 = minutes.parse().map_err(|_| usage())?;

    if task_id.is_empty() {
        return Err(usage());
    }
    if minute % 10 != 0 || minute >= 60 {
        return Err(format!(
            "invalid start time in '{spec}': minutes must be a multiple of 10 below 60"
        ));
    }
    Ok(Assignment {
        task_id: task_id.to_string(),
        hour,
        block: (minute / 10) as u8,
        duration_min,
    })
}

fn parse_now(spec: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(spec, "%H:%M")
        .map_err(|_| format!("invalid time '{spec}', expected HH:MM"))
}

#[derive(Serialize)]
struct SlotRow {
    slot: String,
    hour: u8,
    block: u8,
    #[serde(flatten)]
    report: SlotReport,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => PlannerConfig::load_from(path)?,
        None => PlannerConfig::default(),
    };
    let now = match &args.now {
        Some(spec) => parse_now(spec)?,
        None => Local::now().time(),
    };

    let tasks = super::task::load_tasks(&args.tasks)?;
    let mut planner = Planner::new(config);
    planner.set_tasks(tasks);

    for spec in &args.assignments {
        let assignment = parse_assignment(spec)?;
        let task = planner
            .pending_tasks()
            .into_iter()
            .find(|t| t.id == assignment.task_id)
            .cloned()
            .ok_or_else(|| format!("no pending task with id '{}'", assignment.task_id))?;

        planner.select_task(task);
        let current = planner
            .selection()
            .map(|s| s.duration_min)
            .unwrap_or_default();
        planner.change_duration(assignment.duration_min as i32 - current as i32);

        if let Err(e) = planner.allocate(assignment.hour, assignment.block) {
            eprintln!("warning: skipping '{spec}': {e}");
            planner.cancel_selection();
        }
    }

    if args.json {
        let rows: Vec<SlotRow> = planner
            .day_report(now)
            .into_iter()
            .map(|(slot, report)| SlotRow {
                slot: slot.to_string(),
                hour: slot.hour(),
                block: slot.block(),
                report,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        render_grid(&planner, now);
    }
    Ok(())
}

/// Print the day grid with past > allocated > free precedence:
/// `#` past, a task letter for allocated, `.` free.
fn render_grid(planner: &Planner, now: NaiveTime) {
    let mut letters: HashMap<String, char> = HashMap::new();
    let mut legend: Vec<(char, String)> = Vec::new();

    for row in planner.day_report(now).chunks(BLOCKS_PER_HOUR as usize) {
        let hour = row[0].0.hour();
        print!("{hour:02}:00  ");
        for (_, report) in row {
            let mark = if report.is_past {
                '#'
            } else if let Some(task_id) = &report.task_id {
                *letters.entry(task_id.clone()).or_insert_with(|| {
                    let letter = (b'A' + (legend.len() % 26) as u8) as char;
                    let title = planner
                        .pending_tasks()
                        .iter()
                        .find(|t| &t.id == task_id)
                        .map(|t| t.title.clone())
                        .unwrap_or_else(|| task_id.clone());
                    legend.push((letter, title));
                    letter
                })
            } else {
                '.'
            };
            print!("{mark} ");
        }
        println!();
    }

    println!();
    println!("#  elapsed   .  free");
    for (letter, title) in legend {
        println!("{letter}  {title}");
    }
}
