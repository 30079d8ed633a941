use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grid::Slot;

/// Every state change in the planner produces an Event.
/// The embedding layer polls these for notification and rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A task was selected for allocation (duration reset to the default).
    TaskSelected {
        task_id: String,
        duration_min: u32,
        at: DateTime<Utc>,
    },
    /// The pending selection's duration was adjusted.
    DurationChanged {
        duration_min: u32,
        at: DateTime<Utc>,
    },
    /// The pending selection was discarded without booking anything.
    SelectionCancelled {
        task_id: String,
        at: DateTime<Utc>,
    },
    /// A run was committed: `slots` consecutive slots from `start` now
    /// belong to `task_id`.
    RunCommitted {
        task_id: String,
        start: Slot,
        slots: usize,
        at: DateTime<Utc>,
    },
    /// The whole plan was cleared and the planner returned to idle.
    PlanCleared {
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_tagged() {
        let event = Event::RunCommitted {
            task_id: "t1".to_string(),
            start: Slot::new(9, 0).unwrap(),
            slots: 3,
            at: Utc::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "RunCommitted");
        assert_eq!(json["slots"], 3);

        let _decoded: Event = serde_json::from_value(json).unwrap();
    }
}
