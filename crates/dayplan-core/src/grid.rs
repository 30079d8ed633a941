//! Slot grid geometry for the planning day.
//!
//! The planning day runs 06:00 to 24:00 and is divided into 18 hours of
//! six ten-minute blocks each, giving 108 addressable slots. Slots are
//! stateless geometry -- they are referenced, never created or destroyed.
//!
//! The canonical ordering for contiguous-run arithmetic is the absolute
//! index: `(hour - 6) * 6 + block`, range 0..=107.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// First plannable hour of the day (06:00).
pub const DAY_START_HOUR: u8 = 6;
/// Last plannable hour of the day (23:00-24:00).
pub const DAY_END_HOUR: u8 = 23;
/// Ten-minute blocks per hour.
pub const BLOCKS_PER_HOUR: u8 = 6;
/// Minutes covered by one block.
pub const BLOCK_MINUTES: u32 = 10;
/// Total addressable slots in the day window.
pub const SLOTS_PER_DAY: usize =
    (DAY_END_HOUR - DAY_START_HOUR + 1) as usize * BLOCKS_PER_HOUR as usize;

/// One ten-minute addressable unit of the planning day.
///
/// Identified by `(hour, block)` with `hour` in 6..=23 and `block` in
/// 0..=5. Block `b` covers minutes `b*10 .. (b+1)*10` of its hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SlotRepr", into = "SlotRepr")]
pub struct Slot {
    hour: u8,
    block: u8,
}

/// Raw serde shape for [`Slot`], so invalid coordinates are rejected on
/// deserialization as well.
#[derive(Serialize, Deserialize)]
struct SlotRepr {
    hour: u8,
    block: u8,
}

impl TryFrom<SlotRepr> for Slot {
    type Error = PlannerError;

    fn try_from(repr: SlotRepr) -> Result<Self> {
        Slot::new(repr.hour, repr.block)
    }
}

impl From<Slot> for SlotRepr {
    fn from(slot: Slot) -> Self {
        SlotRepr {
            hour: slot.hour,
            block: slot.block,
        }
    }
}

impl Slot {
    /// Create a slot from grid coordinates.
    pub fn new(hour: u8, block: u8) -> Result<Self> {
        if !(DAY_START_HOUR..=DAY_END_HOUR).contains(&hour) || block >= BLOCKS_PER_HOUR {
            return Err(PlannerError::OutOfRange { hour, block });
        }
        Ok(Self { hour, block })
    }

    /// Inverse of [`Slot::abs_index`].
    pub fn from_abs_index(index: usize) -> Result<Self> {
        if index >= SLOTS_PER_DAY {
            return Err(PlannerError::IndexOutOfRange { index });
        }
        Ok(Self {
            hour: (index / BLOCKS_PER_HOUR as usize) as u8 + DAY_START_HOUR,
            block: (index % BLOCKS_PER_HOUR as usize) as u8,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn block(&self) -> u8 {
        self.block
    }

    /// Linearized position in the day, 0..=107.
    pub fn abs_index(&self) -> usize {
        (self.hour - DAY_START_HOUR) as usize * BLOCKS_PER_HOUR as usize + self.block as usize
    }

    /// Minute of the hour at which this slot opens.
    pub fn start_minute(&self) -> u32 {
        self.block as u32 * BLOCK_MINUTES
    }

    /// Minute boundary at which this slot is considered closed.
    pub fn end_minute(&self) -> u32 {
        (self.block as u32 + 1) * BLOCK_MINUTES
    }

    /// Human-readable start time, e.g. `09:30`.
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.start_minute())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.hour, self.block)
    }
}

impl FromStr for Slot {
    type Err = PlannerError;

    /// Parse the `"hour-block"` key form, e.g. `"9-3"`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = PlannerError::OutOfRange { hour: 0, block: 0 };
        let (h, b) = s.split_once('-').ok_or(invalid.clone())?;
        let hour: u8 = h.trim().parse().map_err(|_| invalid.clone())?;
        let block: u8 = b.trim().parse().map_err(|_| invalid)?;
        Slot::new(hour, block)
    }
}

/// Number of blocks needed to cover `minutes`, rounding up.
pub fn blocks_for_duration(minutes: u32) -> Result<usize> {
    if minutes == 0 {
        return Err(PlannerError::InvalidDuration { minutes });
    }
    Ok(minutes.div_ceil(BLOCK_MINUTES) as usize)
}

/// Build the contiguous run of `count` slots starting at `start`.
///
/// Fails with `OutOfBounds` when the run would pass the last slot of the
/// day; no truncated run is ever returned.
pub fn run_from(start: Slot, count: usize) -> Result<Vec<Slot>> {
    let first = start.abs_index();
    if count == 0 || first + count > SLOTS_PER_DAY {
        return Err(PlannerError::OutOfBounds {
            start,
            blocks: count,
        });
    }
    (first..first + count).map(Slot::from_abs_index).collect()
}

/// Iterate every slot of the day in absolute-index order.
pub fn all_slots() -> impl Iterator<Item = Slot> {
    (0..SLOTS_PER_DAY).filter_map(|i| Slot::from_abs_index(i).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn abs_index_corners() {
        assert_eq!(Slot::new(6, 0).unwrap().abs_index(), 0);
        assert_eq!(Slot::new(6, 5).unwrap().abs_index(), 5);
        assert_eq!(Slot::new(7, 0).unwrap().abs_index(), 6);
        assert_eq!(Slot::new(23, 5).unwrap().abs_index(), 107);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(matches!(
            Slot::new(5, 0),
            Err(PlannerError::OutOfRange { hour: 5, block: 0 })
        ));
        assert!(Slot::new(24, 0).is_err());
        assert!(Slot::new(9, 6).is_err());
        assert!(matches!(
            Slot::from_abs_index(108),
            Err(PlannerError::IndexOutOfRange { index: 108 })
        ));
    }

    #[test]
    fn block_counts() {
        assert_eq!(blocks_for_duration(10).unwrap(), 1);
        assert_eq!(blocks_for_duration(15).unwrap(), 2);
        assert_eq!(blocks_for_duration(60).unwrap(), 6);
        assert!(matches!(
            blocks_for_duration(0),
            Err(PlannerError::InvalidDuration { minutes: 0 })
        ));
    }

    #[test]
    fn run_within_day() {
        let start = Slot::new(9, 4).unwrap();
        let run = run_from(start, 3).unwrap();
        assert_eq!(run.len(), 3);
        assert_eq!(run[0], Slot::new(9, 4).unwrap());
        assert_eq!(run[1], Slot::new(9, 5).unwrap());
        assert_eq!(run[2], Slot::new(10, 0).unwrap());
    }

    #[test]
    fn run_past_midnight_is_rejected_whole() {
        // 60 minutes from 23:30 would need indexes through 110.
        let start = Slot::new(23, 3).unwrap();
        assert!(matches!(
            run_from(start, 6),
            Err(PlannerError::OutOfBounds { blocks: 6, .. })
        ));
        // The last 30 minutes of the day still fit exactly.
        assert_eq!(run_from(start, 3).unwrap().len(), 3);
    }

    #[test]
    fn display_and_parse() {
        let slot = Slot::new(9, 3).unwrap();
        assert_eq!(slot.to_string(), "9-3");
        assert_eq!("9-3".parse::<Slot>().unwrap(), slot);
        assert_eq!(slot.label(), "09:30");
        assert!("24-0".parse::<Slot>().is_err());
        assert!("nonsense".parse::<Slot>().is_err());
    }

    #[test]
    fn serde_rejects_invalid_coordinates() {
        let slot: Slot = serde_json::from_str(r#"{"hour":9,"block":3}"#).unwrap();
        assert_eq!(slot, Slot::new(9, 3).unwrap());
        assert!(serde_json::from_str::<Slot>(r#"{"hour":5,"block":0}"#).is_err());
    }

    #[test]
    fn all_slots_covers_the_day() {
        let slots: Vec<_> = all_slots().collect();
        assert_eq!(slots.len(), SLOTS_PER_DAY);
        assert_eq!(slots[0], Slot::new(6, 0).unwrap());
        assert_eq!(slots[107], Slot::new(23, 5).unwrap());
    }

    proptest! {
        #[test]
        fn abs_index_round_trip(hour in 6u8..=23, block in 0u8..=5) {
            let slot = Slot::new(hour, block).unwrap();
            let back = Slot::from_abs_index(slot.abs_index()).unwrap();
            prop_assert_eq!(slot, back);
        }

        #[test]
        fn abs_index_is_dense_and_ordered(a in 0usize..108, b in 0usize..108) {
            let sa = Slot::from_abs_index(a).unwrap();
            let sb = Slot::from_abs_index(b).unwrap();
            prop_assert_eq!(sa.abs_index(), a);
            prop_assert_eq!(a.cmp(&b), sa.cmp(&sb));
        }
    }
}
