//! Structural copies of engine state for external observers.
//!
//! Renderers and tests observe the machine through these snapshots only; the
//! engine owns every table and hands out copies, never references.

use crate::common::reg::Reg;
use crate::engine::fu::FuRecord;
use crate::engine::rob::{RobEntry, RobTag};
use crate::engine::station::{ReservationStation, RsId};
use crate::isa::instruction::Instruction;

/// One reservation station with its identity.
#[derive(Clone, Copy, Debug)]
pub struct StationView {
    /// Group and slot of the station.
    pub id: RsId,
    /// The station contents.
    pub station: ReservationStation,
}

/// The reorder buffer with its queue pointers.
#[derive(Clone, Debug)]
pub struct RobView {
    /// Oldest slot index (commit point).
    pub head: usize,
    /// Next allocation slot index.
    pub tail: usize,
    /// Total number of slots.
    pub capacity: usize,
    /// Number of unoccupied slots.
    pub free_slots: usize,
    /// Every slot in index order, occupied or not.
    pub entries: Vec<RobEntry>,
}

/// A structural copy of the whole machine at one point in time.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Cycle number the next step will execute.
    pub cycle: u64,
    /// Whether the simulation has fully drained.
    pub done: bool,
    /// The program with all event stamps filled in so far.
    pub instructions: Vec<Instruction>,
    /// Every reservation station in display order.
    pub stations: Vec<StationView>,
    /// The reorder buffer.
    pub rob: RobView,
    /// Busy rename-map rows as `(register, producer)` pairs.
    pub register_status: Vec<(Reg, RobTag)>,
    /// In-flight functional units.
    pub units: Vec<FuRecord>,
    /// ROB tags queued for the single CDB, oldest first.
    pub cdb: Vec<RobTag>,
    /// All architectural register values.
    pub registers: Vec<(Reg, i64)>,
}
