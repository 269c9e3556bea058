//! Issue stage: rename and dispatch into the backend.
//!
//! At most one instruction issues per cycle, and only when a ROB slot and a
//! free station in the matching group both exist; otherwise the cycle is a
//! structural stall. Operands are captured immediately — from the register
//! file, forwarded from a finished ROB entry, or recorded as a producer tag.

use crate::common::reg::{Reg, RegisterFile};
use crate::engine::ArchState;
use crate::engine::regstatus::RegisterStatus;
use crate::engine::rob::{Rob, RobState, RobTag};
use crate::engine::station::StationFile;
use crate::isa::instruction::{Instruction, OpKind, Operation};

/// Executes the Issue stage.
///
/// Allocates the ROB tail and a free station, captures operands with
/// early-forwarding from the ROB, wires them by operation shape, and
/// retargets the rename map at the new slot.
pub(crate) fn issue_stage(
    arch: &mut ArchState,
    program: &mut [Instruction],
    next_issue: &mut usize,
    rob: &mut Rob,
    stations: &mut StationFile,
    reg_status: &mut RegisterStatus,
    cycle: u64,
) {
    let Some(inst) = program.get(*next_issue) else {
        return;
    };
    let operation = inst.operation;
    let kind = operation.kind();

    if rob.is_full() {
        arch.stats.stalls_rob_full += 1;
        return;
    }
    let Some(rs_id) = stations.find_free(kind.fu_class()) else {
        arch.stats.stalls_no_station += 1;
        return;
    };
    let Some(tag) = rob.allocate(*next_issue, kind, operation.dest()) else {
        return;
    };

    program[*next_issue].timing.issue = Some(cycle);

    let (vj, qj, vk, qk, offset) = match operation {
        Operation::Add { lhs, rhs, .. }
        | Operation::Sub { lhs, rhs, .. }
        | Operation::Mul { lhs, rhs, .. }
        | Operation::Div { lhs, rhs, .. } => {
            let (vj, qj) = capture_operand(lhs, &arch.regs, reg_status, rob);
            let (vk, qk) = capture_operand(rhs, &arch.regs, reg_status, rob);
            (vj, qj, vk, qk, 0)
        }
        Operation::Load { offset, base, .. } => {
            let (vk, qk) = capture_operand(base, &arch.regs, reg_status, rob);
            (0, None, vk, qk, offset)
        }
        Operation::Store { src, offset, base } => {
            let (vj, qj) = capture_operand(src, &arch.regs, reg_status, rob);
            let (vk, qk) = capture_operand(base, &arch.regs, reg_status, rob);
            (vj, qj, vk, qk, offset)
        }
    };

    let rs = stations.get_mut(rs_id);
    rs.busy = true;
    rs.op = kind;
    rs.vj = vj;
    rs.vk = vk;
    rs.qj = qj;
    rs.qk = qk;
    rs.dest_rob = tag;
    rs.addr = offset;
    rs.instr = *next_issue;
    rs.in_flight = false;

    // A STORE whose data is already known mirrors it into its ROB entry now.
    if kind == OpKind::Store && qj.is_none() {
        rob.set_store_data(tag, vj);
    }

    // Rename: the newest writer of the register wins.
    if let Some(dest) = operation.dest() {
        reg_status.set_producer(dest, tag);
    }

    arch.stats.instructions_issued += 1;
    if arch.trace {
        eprintln!("IS  #{} {} -> {} @ {}", *next_issue, operation, tag, rs_id);
    }
    *next_issue += 1;
}

/// Captures one source operand.
///
/// A free register reads the register file. A busy register whose producer
/// has already written its result forwards the value straight from the ROB;
/// otherwise the producer tag is recorded and the value slot is unused.
fn capture_operand(
    reg: Reg,
    regs: &RegisterFile,
    reg_status: &RegisterStatus,
    rob: &Rob,
) -> (i64, Option<RobTag>) {
    match reg_status.producer(reg) {
        None => (regs.read(reg), None),
        Some(producer) => match rob.get(producer) {
            Some(entry) if entry.state == RobState::WroteResult && entry.value_ready => {
                (entry.value, None)
            }
            _ => (0, Some(producer)),
        },
    }
}
