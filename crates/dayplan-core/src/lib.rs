//! # Dayplan Core Library
//!
//! Core business logic for the Dayplan day time-block allocator: assigning
//! pending tasks to contiguous runs of ten-minute slots across a single
//! day (06:00-24:00), detecting scheduling conflicts, and classifying each
//! slot as past, planned, or free. All state lives in memory for the
//! duration of a planning session; the CLI and any GUI are thin layers
//! over this crate.
//!
//! ## Architecture
//!
//! - **Slot Grid**: immutable day geometry -- 18 hours of six ten-minute
//!   blocks, addressed by `(hour, block)` or the 0..=107 absolute index
//! - **Allocation Table**: slot-to-task mapping with all-or-nothing
//!   multi-slot commits
//! - **Planner**: the Idle/Selecting state machine driving the
//!   click-to-assign protocol
//! - **Elapsed classifier**: advisory past/not-past tagging against a
//!   coarsely sampled wall clock
//!
//! ## Key Components
//!
//! - [`Planner`]: allocation protocol state machine
//! - [`AllocationTable`]: atomic run commits and conflict detection
//! - [`Slot`]: slot geometry and index arithmetic
//! - [`ClockSampler`]: caller-ticked wall-clock sampling

pub mod allocation;
pub mod config;
pub mod elapsed;
pub mod error;
pub mod events;
pub mod grid;
pub mod planner;
pub mod task;

pub use allocation::AllocationTable;
pub use config::PlannerConfig;
pub use elapsed::{is_past, ClockSampler};
pub use error::{ConfigError, PlannerError};
pub use events::Event;
pub use grid::{blocks_for_duration, run_from, Slot, SLOTS_PER_DAY};
pub use planner::{Planner, PlannerState, Selection, SlotReport};
pub use task::{Difficulty, Priority, Task};
