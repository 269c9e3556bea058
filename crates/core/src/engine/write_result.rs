//! Write-Result stage: compute, broadcast on the single CDB, release.
//!
//! One finished result per cycle comes off the CDB queue. The producing
//! station supplies the operands, the result lands in the ROB entry, and the
//! broadcast wakes every station waiting on the tag. The station is released
//! here; the ROB entry stays occupied until commit.

use std::collections::VecDeque;

use crate::common::error::Diag;
use crate::engine::ArchState;
use crate::engine::rob::{Rob, RobTag};
use crate::engine::station::StationFile;
use crate::isa::instruction::{Instruction, OpKind};

/// Executes the Write-Result stage.
pub(crate) fn write_result_stage(
    arch: &mut ArchState,
    cdb: &mut VecDeque<RobTag>,
    stations: &mut StationFile,
    rob: &mut Rob,
    program: &mut [Instruction],
    cycle: u64,
) {
    let Some(tag) = cdb.pop_front() else {
        return;
    };
    let Some(rs_id) = stations.find_by_dest(tag) else {
        // Unreachable while the invariants hold; drop the orphan tag.
        arch.report(Diag::MissingStation { rob: tag.0 });
        return;
    };

    // The station's job ends here: copy its operands out and release it.
    let rs = *stations.get_mut(rs_id);
    stations.get_mut(rs_id).clear();

    let instr = rs.instr;
    program[instr].timing.write_result = Some(cycle);

    let result = match rs.op {
        OpKind::Add => rs.vj.wrapping_add(rs.vk),
        OpKind::Sub => rs.vj.wrapping_sub(rs.vk),
        OpKind::Mul => rs.vj.wrapping_mul(rs.vk),
        OpKind::Div => {
            if rs.vk == 0 {
                arch.report(Diag::DivideByZero { instr });
                0
            } else {
                rs.vj.wrapping_div(rs.vk)
            }
        }
        OpKind::Load => {
            let address = rs.addr.wrapping_add(rs.vk);
            rob.set_address(tag, address);
            match arch.mem.read(address) {
                Some(word) => word,
                None => {
                    arch.report(Diag::LoadAddressOutOfRange { instr, address });
                    0
                }
            }
        }
        OpKind::Store => {
            // The memory write itself waits for commit; only the effective
            // address is resolved here. The result is the data being stored.
            let address = rs.addr.wrapping_add(rs.vk);
            rob.set_address(tag, address);
            rs.vj
        }
    };

    rob.write_result(tag, result);
    arch.stats.cdb_broadcasts += 1;
    if arch.trace {
        eprintln!("WR  #{} {} = {}", instr, tag, result);
    }

    // CDB broadcast: wake every station waiting on this tag.
    stations.for_each_busy_mut(|_, waiter| {
        if waiter.qj == Some(tag) {
            waiter.vj = result;
            waiter.qj = None;
            // A STORE's data operand mirrors into its own ROB entry the
            // moment it arrives; commit relies on it being there.
            if waiter.op == OpKind::Store {
                rob.set_store_data(waiter.dest_rob, result);
            }
        }
        if waiter.qk == Some(tag) {
            waiter.vk = result;
            waiter.qk = None;
        }
    });
}
