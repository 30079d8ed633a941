//! Core error types for dayplan-core.
//!
//! Every failure in the planner is a local, recoverable condition: the
//! caller decides whether to re-prompt, pick another slot, or give up.
//! Nothing here aborts the process, and a failed allocation never leaves
//! a partially written run behind.

use std::path::PathBuf;
use thiserror::Error;

use crate::grid::Slot;

/// Planner error type covering the allocation protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// Malformed slot coordinates (hours run 6..=23, blocks 0..=5).
    #[error("slot coordinates out of range: hour {hour}, block {block}")]
    OutOfRange { hour: u8, block: u8 },

    /// Absolute slot index outside the day (valid 0..=107).
    #[error("absolute slot index {index} outside the day")]
    IndexOutOfRange { index: usize },

    /// Duration that cannot be mapped to a block count.
    #[error("invalid duration: {minutes} minutes")]
    InvalidDuration { minutes: u32 },

    /// Requested run extends past the last slot of the day.
    #[error("run of {blocks} blocks starting at {start} runs past the end of the day")]
    OutOfBounds { start: Slot, blocks: usize },

    /// Requested run overlaps an already-allocated slot.
    #[error("slot {slot} is already allocated to task '{occupied_by}'")]
    Collision { slot: Slot, occupied_by: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for PlannerError
pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
