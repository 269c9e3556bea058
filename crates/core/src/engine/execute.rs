//! Execute stages: dispatch ready stations and advance in-flight units.
//!
//! Start and advance run back to back within a cycle, so a station dispatched
//! this cycle also counts down this cycle; the latency constants account for
//! that (a 2-cycle ADD dispatched in cycle N finishes in cycle N + 1).

use std::collections::VecDeque;

use crate::config::LatencyConfig;
use crate::engine::ArchState;
use crate::engine::fu::{FuRecord, FuTracker};
use crate::engine::rob::{Rob, RobTag};
use crate::engine::station::StationFile;
use crate::isa::instruction::Instruction;

/// Executes the Execute-Start stage.
///
/// Every busy station with both operands present and no unit yet gets a
/// functional-unit record at full latency; its ROB entry moves to Executing.
pub(crate) fn start_ready(
    arch: &mut ArchState,
    stations: &mut StationFile,
    rob: &mut Rob,
    units: &mut FuTracker,
    latency: &LatencyConfig,
) {
    let trace = arch.trace;
    stations.for_each_busy_mut(|id, rs| {
        if rs.in_flight || rs.qj.is_some() || rs.qk.is_some() {
            return;
        }
        rs.in_flight = true;
        rob.mark_executing(rs.dest_rob);
        let cycles = latency.of(rs.op);
        units.dispatch(FuRecord {
            rs: id,
            instr: rs.instr,
            rob: rs.dest_rob,
            remaining: cycles,
        });
        if trace {
            eprintln!("EX  #{} start @ {} ({} cycles)", rs.instr, id, cycles);
        }
    });
}

/// Executes the Execute-Advance stage.
///
/// All units count down together; finished ones stamp their instruction and
/// queue their ROB tag for the CDB. Simultaneous finishers enqueue in tracker
/// order and drain one per later cycle.
pub(crate) fn advance_units(
    arch: &mut ArchState,
    units: &mut FuTracker,
    cdb: &mut VecDeque<RobTag>,
    program: &mut [Instruction],
    cycle: u64,
) {
    for record in units.advance() {
        program[record.instr].timing.execute_complete = Some(cycle);
        cdb.push_back(record.rob);
        if arch.trace {
            eprintln!("EX  #{} complete -> {}", record.instr, record.rob);
        }
    }
}
