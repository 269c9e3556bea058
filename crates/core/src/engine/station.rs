//! Reservation stations, grouped by functional-unit class.
//!
//! Each station buffers one issued but not-yet-completed instruction together
//! with its operand values or producer tags. The file provides:
//! 1. **Allocation:** A free station in the group matching the operation.
//! 2. **Lookup:** The station producing a given ROB tag (for write result).
//! 3. **Release:** Stations free at write result, not at commit.

use std::fmt;

use crate::config::StationConfig;
use crate::engine::rob::RobTag;
use crate::isa::instruction::{FuClass, OpKind};

/// Identity of one reservation station: its group and slot within the group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RsId {
    /// Functional-unit class of the group.
    pub class: FuClass,
    /// Slot index within the group.
    pub index: usize,
}

impl fmt::Display for RsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.index)
    }
}

/// A single reservation station.
///
/// Exactly one of `(vj, qj)` is meaningful at a time, likewise `(vk, qk)`:
/// the value once known, the producer tag while pending.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReservationStation {
    /// Whether this station holds an instruction.
    pub busy: bool,
    /// Operation kind of the buffered instruction.
    pub op: OpKind,
    /// First operand value (data operand for STORE).
    pub vj: i64,
    /// Second operand value (base register for memory ops).
    pub vk: i64,
    /// Pending producer of the first operand.
    pub qj: Option<RobTag>,
    /// Pending producer of the second operand.
    pub qk: Option<RobTag>,
    /// ROB slot this station will write into.
    pub dest_rob: RobTag,
    /// Sign-extended offset for LOAD/STORE.
    pub addr: i64,
    /// Program index back-pointer.
    pub instr: usize,
    /// Whether the station has been dispatched to a functional unit.
    pub in_flight: bool,
}

impl ReservationStation {
    /// Releases the station: clears all fields back to idle.
    pub fn clear(&mut self) {
        *self = ReservationStation::default();
    }
}

/// All reservation stations, one group per functional-unit class.
pub struct StationFile {
    groups: [Vec<ReservationStation>; 4],
}

impl StationFile {
    /// Creates the station groups with the configured pool sizes.
    pub fn new(config: &StationConfig) -> Self {
        let pool = |len| vec![ReservationStation::default(); len];
        Self {
            groups: [
                pool(config.add),
                pool(config.mul),
                pool(config.load),
                pool(config.store),
            ],
        }
    }

    /// Returns the stations of one group.
    pub fn group(&self, class: FuClass) -> &[ReservationStation] {
        &self.groups[class.index()]
    }

    /// Returns a mutable reference to one station.
    pub fn get_mut(&mut self, id: RsId) -> &mut ReservationStation {
        &mut self.groups[id.class.index()][id.index]
    }

    /// Finds a free station in the given group.
    pub fn find_free(&self, class: FuClass) -> Option<RsId> {
        self.groups[class.index()]
            .iter()
            .position(|rs| !rs.busy)
            .map(|index| RsId { class, index })
    }

    /// Finds the busy station that will write the given ROB slot.
    pub fn find_by_dest(&self, tag: RobTag) -> Option<RsId> {
        self.iter()
            .find(|(_, rs)| rs.busy && rs.dest_rob == tag)
            .map(|(id, _)| id)
    }

    /// Calls `f` on every busy station, in group then slot order.
    pub fn for_each_busy_mut(&mut self, mut f: impl FnMut(RsId, &mut ReservationStation)) {
        for class in FuClass::ALL {
            for (index, rs) in self.groups[class.index()].iter_mut().enumerate() {
                if rs.busy {
                    f(RsId { class, index }, rs);
                }
            }
        }
    }

    /// Iterates over every station (busy or idle) in display order.
    pub fn iter(&self) -> impl Iterator<Item = (RsId, &ReservationStation)> {
        FuClass::ALL.into_iter().flat_map(move |class| {
            self.groups[class.index()]
                .iter()
                .enumerate()
                .map(move |(index, rs)| (RsId { class, index }, rs))
        })
    }
}
