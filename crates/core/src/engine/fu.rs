//! Functional-unit tracker: in-flight execution records.
//!
//! The illusion of parallel functional units is a set of counters: each
//! dispatched station gets a record with the operation latency, and all
//! records decrement once per cycle. Finished records leave in tracker order,
//! which is the tie-break when several units finish in the same cycle.

use crate::engine::rob::RobTag;
use crate::engine::station::RsId;

/// One in-flight execution.
#[derive(Clone, Copy, Debug)]
pub struct FuRecord {
    /// Station being executed.
    pub rs: RsId,
    /// Program index of the instruction.
    pub instr: usize,
    /// ROB slot the result is destined for.
    pub rob: RobTag,
    /// Cycles left until the result is ready.
    pub remaining: u64,
}

/// The set of in-flight functional units.
#[derive(Default)]
pub struct FuTracker {
    records: Vec<FuRecord>,
}

impl FuTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no unit is busy.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Starts executing a station.
    pub fn dispatch(&mut self, record: FuRecord) {
        self.records.push(record);
    }

    /// Advances every unit by one cycle.
    ///
    /// Returns the records that finished, in tracker order.
    pub fn advance(&mut self) -> Vec<FuRecord> {
        let mut finished = Vec::new();
        self.records.retain_mut(|record| {
            record.remaining = record.remaining.saturating_sub(1);
            if record.remaining == 0 {
                finished.push(*record);
                false
            } else {
                true
            }
        });
        finished
    }

    /// Iterates over the in-flight records.
    pub fn iter(&self) -> impl Iterator<Item = &FuRecord> {
        self.records.iter()
    }
}
