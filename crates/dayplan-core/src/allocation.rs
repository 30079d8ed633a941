//! Allocation table: the mutable mapping from slot to task id.
//!
//! At most one task occupies a slot; absence means the slot is free.
//! Multi-slot writes are all-or-nothing: `try_commit_run` either books the
//! whole run or reports the first colliding slot and writes nothing. The
//! free-check and the write share one critical section, so no reader ever
//! observes a partially committed run, even with concurrent allocators.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{PlannerError, Result};
use crate::grid::Slot;

/// Mapping from slot to the task id occupying it.
///
/// Created empty at planner session start; individual entries are only
/// ever removed by `clear` (there is no per-slot deallocation).
#[derive(Debug, Default)]
pub struct AllocationTable {
    inner: Mutex<HashMap<Slot, String>>,
}

impl AllocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Slot, String>> {
        // A panicked writer cannot leave a half-written run behind (writes
        // happen only after the full free-check), so a poisoned lock is safe
        // to keep using.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_free(&self, slot: Slot) -> bool {
        !self.lock().contains_key(&slot)
    }

    /// Task id occupying `slot`, if any.
    pub fn peek(&self, slot: Slot) -> Option<String> {
        self.lock().get(&slot).cloned()
    }

    /// Number of allocated slots.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Atomically book every slot of `run` for `task_id`.
    ///
    /// If any slot is occupied, returns `Collision` naming the first one in
    /// run order and performs no writes at all.
    pub fn try_commit_run(&self, run: &[Slot], task_id: &str) -> Result<()> {
        let mut table = self.lock();

        for slot in run {
            if let Some(occupied_by) = table.get(slot) {
                return Err(PlannerError::Collision {
                    slot: *slot,
                    occupied_by: occupied_by.clone(),
                });
            }
        }

        for slot in run {
            table.insert(*slot, task_id.to_string());
        }
        Ok(())
    }

    /// Empty the table unconditionally (whole-plan reset).
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Copy of the current mapping, for the rendering boundary.
    pub fn snapshot(&self) -> HashMap<Slot, String> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(hour: u8, block: u8) -> Slot {
        Slot::new(hour, block).unwrap()
    }

    #[test]
    fn commit_books_every_slot() {
        let table = AllocationTable::new();
        let run = vec![slot(9, 0), slot(9, 1), slot(9, 2)];

        table.try_commit_run(&run, "task-a").unwrap();

        assert_eq!(table.len(), 3);
        for s in &run {
            assert!(!table.is_free(*s));
            assert_eq!(table.peek(*s).as_deref(), Some("task-a"));
        }
    }

    #[test]
    fn collision_reports_first_conflict_and_writes_nothing() {
        let table = AllocationTable::new();
        table
            .try_commit_run(&[slot(9, 0), slot(9, 1), slot(9, 2)], "task-a")
            .unwrap();

        let overlapping = vec![slot(9, 1), slot(9, 2), slot(9, 3)];
        let err = table.try_commit_run(&overlapping, "task-b").unwrap_err();

        assert_eq!(
            err,
            PlannerError::Collision {
                slot: slot(9, 1),
                occupied_by: "task-a".to_string(),
            }
        );
        // No partial write: the non-conflicting tail slot stays free.
        assert!(table.is_free(slot(9, 3)));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn clear_is_idempotent() {
        let table = AllocationTable::new();
        table.clear();
        assert!(table.is_empty());

        table.try_commit_run(&[slot(12, 0)], "task-a").unwrap();
        table.clear();
        assert!(table.is_empty());
        table.clear();
        assert!(table.is_empty());
    }

    #[test]
    fn concurrent_commits_never_interleave() {
        use std::sync::Arc;

        let table = Arc::new(AllocationTable::new());
        let run: Vec<Slot> = (0..6).map(|b| slot(10, b)).collect();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let table = Arc::clone(&table);
                let run = run.clone();
                std::thread::spawn(move || table.try_commit_run(&run, &format!("task-{i}")))
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();

        // Exactly one attempt may observe the run as free and commit.
        assert_eq!(wins, 1);
        let owner = table.peek(slot(10, 0)).unwrap();
        for s in &run {
            assert_eq!(table.peek(*s).as_deref(), Some(owner.as_str()));
        }
    }
}
