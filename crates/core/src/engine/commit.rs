//! Commit stage: retire the ROB head in program order.
//!
//! Only the head may commit, so register and memory writes become visible in
//! program order — at most one architectural update per cycle. A head that
//! has not written its result (or a STORE whose data is pending) blocks all
//! younger instructions.

use crate::engine::ArchState;
use crate::engine::regstatus::RegisterStatus;
use crate::engine::rob::Rob;
use crate::isa::instruction::{Instruction, OpKind};

/// Executes the Commit stage.
///
/// Retires at most one entry from the ROB head: writes the register file or
/// memory, and clears the rename mapping only when it still points at the
/// retiring slot (a newer issue may have retargeted the register).
pub(crate) fn commit_stage(
    arch: &mut ArchState,
    rob: &mut Rob,
    reg_status: &mut RegisterStatus,
    program: &mut [Instruction],
    cycle: u64,
) {
    let Some(entry) = rob.commit_head() else {
        return;
    };

    program[entry.instr].timing.commit = Some(cycle);

    match entry.kind {
        OpKind::Store => {
            if !arch.mem.write(entry.address, entry.value) {
                arch.report(crate::common::error::Diag::StoreAddressOutOfRange {
                    instr: entry.instr,
                    address: entry.address,
                });
            }
        }
        _ => {
            if let Some(dest) = entry.dest {
                arch.regs.write(dest, entry.value);
                reg_status.clear_if_match(dest, entry.tag);
            }
        }
    }

    arch.stats.count_commit(entry.kind.fu_class());
    if arch.trace {
        eprintln!("CM  #{} {} commit", entry.instr, entry.tag);
    }
}
