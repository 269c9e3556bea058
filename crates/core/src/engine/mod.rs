//! The scheduling engine: state and per-cycle pipeline driver.
//!
//! This module owns every table in the machine and advances them one clock
//! cycle at a time:
//! 1. **Structures:** ROB, reservation stations, rename map, functional-unit
//!    tracker, single-CDB queue, register file and data memory.
//! 2. **Driver:** Commit -> Write Result -> Issue -> Execute Start ->
//!    Execute Advance, in that order, once per `step`.
//! 3. **Observation:** Structural snapshots; external collaborators never
//!    touch engine state directly.
//!
//! The stage order is load-bearing: freeing the ROB head before issue lets a
//! new instruction take the slot in the same cycle, broadcasting before issue
//! lets an issuing instruction capture a just-produced value, and dispatching
//! before advancing lets a fresh unit start at full latency.

pub mod commit;
pub mod execute;
pub mod fu;
pub mod issue;
pub mod memory;
pub mod regstatus;
pub mod rob;
pub mod station;
pub mod write_result;

use std::collections::VecDeque;

use crate::common::error::Diag;
use crate::common::reg::{Reg, RegisterFile};
use crate::config::{Config, LatencyConfig};
use crate::engine::fu::FuTracker;
use crate::engine::memory::DataMemory;
use crate::engine::regstatus::RegisterStatus;
use crate::engine::rob::{Rob, RobTag};
use crate::engine::station::StationFile;
use crate::isa::instruction::Instruction;
use crate::snapshot::{RobView, Snapshot, StationView};
use crate::stats::SimStats;

/// Architectural state plus observability, shared with every stage.
///
/// Bundles what the stages mutate besides the scheduling structures: the
/// register file, the memory, statistics, tracing and recorded diagnostics.
pub struct ArchState {
    /// Architectural register file.
    pub regs: RegisterFile,
    /// Data memory.
    pub mem: DataMemory,
    /// Simulation counters.
    pub stats: SimStats,
    /// Emit per-stage trace lines on stderr.
    pub trace: bool,
    diagnostics: Vec<Diag>,
}

impl ArchState {
    /// Reports a diagnostic: prints it to stderr and records it.
    pub fn report(&mut self, diag: Diag) {
        eprintln!("[!] {diag}");
        self.diagnostics.push(diag);
    }
}

/// The Tomasulo scheduling engine.
///
/// Owns the program and all machine state; advances one cycle per `step`.
pub struct Engine {
    program: Vec<Instruction>,
    /// Program index of the next instruction to issue.
    next_issue: usize,
    /// Current cycle number, starting at 1.
    cycle: u64,
    arch: ArchState,
    reg_status: RegisterStatus,
    stations: StationFile,
    rob: Rob,
    units: FuTracker,
    /// Finished results waiting for the single CDB, oldest first.
    cdb: VecDeque<RobTag>,
    latency: LatencyConfig,
}

impl Engine {
    /// Creates an engine over a parsed program with the given configuration.
    pub fn new(program: Vec<Instruction>, config: &Config) -> Self {
        Self {
            program,
            next_issue: 0,
            cycle: 1,
            arch: ArchState {
                regs: RegisterFile::new(config.machine.register_init),
                mem: DataMemory::new(config.machine.memory_words),
                stats: SimStats::default(),
                trace: config.general.trace,
                diagnostics: Vec::new(),
            },
            reg_status: RegisterStatus::new(),
            stations: StationFile::new(&config.stations),
            rob: Rob::new(config.machine.rob_entries),
            units: FuTracker::new(),
            cdb: VecDeque::new(),
            latency: config.latency.clone(),
        }
    }

    /// Advances the machine by exactly one clock cycle.
    pub fn step(&mut self) {
        commit::commit_stage(
            &mut self.arch,
            &mut self.rob,
            &mut self.reg_status,
            &mut self.program,
            self.cycle,
        );
        write_result::write_result_stage(
            &mut self.arch,
            &mut self.cdb,
            &mut self.stations,
            &mut self.rob,
            &mut self.program,
            self.cycle,
        );
        issue::issue_stage(
            &mut self.arch,
            &mut self.program,
            &mut self.next_issue,
            &mut self.rob,
            &mut self.stations,
            &mut self.reg_status,
            self.cycle,
        );
        execute::start_ready(
            &mut self.arch,
            &mut self.stations,
            &mut self.rob,
            &mut self.units,
            &self.latency,
        );
        execute::advance_units(
            &mut self.arch,
            &mut self.units,
            &mut self.cdb,
            &mut self.program,
            self.cycle,
        );

        self.arch.stats.cycles += 1;
        self.cycle += 1;
    }

    /// Returns true when the simulation has fully drained.
    ///
    /// All instructions committed, the ROB empty, no unit in flight, the CDB
    /// queue empty, and nothing left to issue.
    pub fn is_done(&self) -> bool {
        self.next_issue >= self.program.len()
            && self.program.iter().all(|i| i.timing.commit.is_some())
            && self.rob.is_empty()
            && self.units.is_empty()
            && self.cdb.is_empty()
    }

    /// Returns the cycle the next `step` will execute.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Reads an architectural register.
    pub fn register(&self, reg: Reg) -> i64 {
        self.arch.regs.read(reg)
    }

    /// Reads a memory word; `None` when out of range.
    pub fn memory_word(&self, addr: i64) -> Option<i64> {
        self.arch.mem.read(addr)
    }

    /// Returns the simulation statistics.
    pub fn stats(&self) -> &SimStats {
        &self.arch.stats
    }

    /// Returns every diagnostic reported so far, in order.
    pub fn diagnostics(&self) -> &[Diag] {
        &self.arch.diagnostics
    }

    /// Returns a structural copy of the whole machine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cycle: self.cycle,
            done: self.is_done(),
            instructions: self.program.clone(),
            stations: self
                .stations
                .iter()
                .map(|(id, rs)| StationView { id, station: *rs })
                .collect(),
            rob: RobView {
                head: self.rob.head(),
                tail: self.rob.tail(),
                capacity: self.rob.capacity(),
                free_slots: self.rob.free_slots(),
                entries: self.rob.slots().copied().collect(),
            },
            register_status: self.reg_status.busy_rows().collect(),
            units: self.units.iter().copied().collect(),
            cdb: self.cdb.iter().copied().collect(),
            registers: self.arch.regs.iter().collect(),
        }
    }
}
