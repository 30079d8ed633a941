//! Planner state machine for the click-to-assign allocation protocol.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Selecting -> Idle
//!   select_task      allocate (success) | cancel_selection | reset_plan
//! ```
//!
//! While `Selecting`, a task and a duration are held; clicking a slot
//! attempts to commit a contiguous run starting there. Failures (collision,
//! out of bounds) keep the selection so the user can retry at another slot
//! without re-selecting the task. Clicking a slot while `Idle` is a no-op.

use chrono::{NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::allocation::AllocationTable;
use crate::config::PlannerConfig;
use crate::elapsed::is_past;
use crate::error::Result;
use crate::events::Event;
use crate::grid::{self, Slot};
use crate::task::{self, Task};

/// Current phase of the allocation protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerState {
    Idle,
    Selecting,
}

/// The transient selection held while mid-allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub task: Task,
    pub duration_min: u32,
}

/// What the rendering layer needs to know about one slot.
///
/// Presentation precedence (past > allocated > free) is derived from this
/// externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotReport {
    pub is_allocated: bool,
    pub task_id: Option<String>,
    pub is_past: bool,
}

/// Day planner: orchestrates task selection, run validation, and atomic
/// commits against the allocation table.
///
/// Single mutator, event-driven: every transition happens synchronously in
/// response to a discrete user action and returns the event it produced.
#[derive(Debug, Default)]
pub struct Planner {
    config: PlannerConfig,
    table: AllocationTable,
    tasks: Vec<Task>,
    selection: Option<Selection>,
}

impl Planner {
    /// Create a planner with an empty table and no tasks.
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            table: AllocationTable::new(),
            tasks: Vec::new(),
            selection: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> PlannerState {
        if self.selection.is_some() {
            PlannerState::Selecting
        } else {
            PlannerState::Idle
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn table(&self) -> &AllocationTable {
        &self.table
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Tasks offered for allocation: the external list filtered to
    /// `completed == false`, in source order.
    pub fn pending_tasks(&self) -> Vec<&Task> {
        task::pending(&self.tasks).collect()
    }

    /// Rendering report for one slot at the given wall-clock sample.
    pub fn slot_report(&self, slot: Slot, now: NaiveTime) -> SlotReport {
        let task_id = self.table.peek(slot);
        SlotReport {
            is_allocated: task_id.is_some(),
            task_id,
            is_past: is_past(slot.hour(), slot.block(), now),
        }
    }

    /// Rendering report for all 108 slots in absolute-index order.
    pub fn day_report(&self, now: NaiveTime) -> Vec<(Slot, SlotReport)> {
        grid::all_slots()
            .map(|slot| (slot, self.slot_report(slot, now)))
            .collect()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the externally supplied task list.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Begin (or restart) a selection: Idle -> Selecting, or replace the
    /// prior selection. Duration resets to the configured default.
    pub fn select_task(&mut self, task: Task) -> Event {
        let duration_min = self.config.default_duration_min;
        let task_id = task.id.clone();
        self.selection = Some(Selection { task, duration_min });
        Event::TaskSelected {
            task_id,
            duration_min,
            at: Utc::now(),
        }
    }

    /// Adjust the pending duration by `delta_min` minutes, clamped to the
    /// configured floor. No-op when nothing is selected.
    pub fn change_duration(&mut self, delta_min: i32) -> Option<Event> {
        let floor = self.config.min_duration_min;
        let selection = self.selection.as_mut()?;
        let adjusted = selection.duration_min as i64 + delta_min as i64;
        selection.duration_min = adjusted.max(floor as i64) as u32;
        Some(Event::DurationChanged {
            duration_min: selection.duration_min,
            at: Utc::now(),
        })
    }

    /// Discard the pending selection without touching the table.
    pub fn cancel_selection(&mut self) -> Option<Event> {
        let selection = self.selection.take()?;
        Some(Event::SelectionCancelled {
            task_id: selection.task.id,
            at: Utc::now(),
        })
    }

    /// Attempt to book the selected task into a run starting at
    /// `(hour, block)`.
    ///
    /// Returns `Ok(None)` when nothing is selected (an Idle click).
    /// On success the selection is cleared. On any failure the table is
    /// untouched and the selection is preserved for a retry.
    pub fn allocate(&mut self, hour: u8, block: u8) -> Result<Option<Event>> {
        let Some(selection) = self.selection.as_ref() else {
            return Ok(None);
        };

        let count = grid::blocks_for_duration(selection.duration_min)?;
        let start = Slot::new(hour, block)?;
        let run = grid::run_from(start, count)?;
        self.table.try_commit_run(&run, &selection.task.id)?;

        let task_id = selection.task.id.clone();
        self.selection = None;
        Ok(Some(Event::RunCommitted {
            task_id,
            start,
            slots: count,
            at: Utc::now(),
        }))
    }

    /// Clear the whole plan and force Idle, regardless of prior state.
    pub fn reset_plan(&mut self) -> Event {
        self.table.clear();
        self.selection = None;
        Event::PlanCleared { at: Utc::now() }
    }
}
