//! Register status table: the rename map.
//!
//! Maps each architectural register to the ROB slot of its latest in-flight
//! producer, or `None` if the value is in the architectural register file.
//! This is the mechanism that removes WAW and WAR hazards: issue always
//! overwrites the mapping, so the most recent writer wins.

use crate::common::reg::Reg;
use crate::engine::rob::RobTag;

/// Rename map from architectural register to pending producer.
pub struct RegisterStatus {
    producers: [Option<RobTag>; Reg::COUNT],
}

impl Default for RegisterStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterStatus {
    /// Creates a rename map with no pending writers.
    pub fn new() -> Self {
        Self {
            producers: [None; Reg::COUNT],
        }
    }

    /// Marks a register as pending on the given ROB slot.
    ///
    /// Unconditionally overwrites any earlier mapping.
    pub fn set_producer(&mut self, reg: Reg, tag: RobTag) {
        self.producers[reg.index()] = Some(tag);
    }

    /// Returns the pending producer of a register, if any.
    pub fn producer(&self, reg: Reg) -> Option<RobTag> {
        self.producers[reg.index()]
    }

    /// Clears a register's pending writer, but ONLY if the current tag
    /// matches.
    ///
    /// This prevents a committing instruction from clearing a mapping set by
    /// a newer issue to the same register.
    pub fn clear_if_match(&mut self, reg: Reg, tag: RobTag) {
        let slot = &mut self.producers[reg.index()];
        if *slot == Some(tag) {
            *slot = None;
        }
    }

    /// Iterates over the busy rows as `(register, producer)` pairs.
    pub fn busy_rows(&self) -> impl Iterator<Item = (Reg, RobTag)> + '_ {
        Reg::all().filter_map(|reg| self.producers[reg.index()].map(|tag| (reg, tag)))
    }
}
