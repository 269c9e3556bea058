//! Simulation statistics collection and reporting.
//!
//! This module tracks counters for the simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, committed instructions, derived CPI/IPC.
//! 2. **Instruction mix:** Committed counts by functional-unit class.
//! 3. **Stalls:** Structural stall breakdown (ROB full, no free station).
//! 4. **Bus traffic:** Results broadcast over the single CDB.

use std::time::Instant;

use crate::isa::instruction::FuClass;

/// Simulation statistics structure tracking all counters.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions issued into the backend.
    pub instructions_issued: u64,
    /// Number of instructions committed (retired).
    pub instructions_committed: u64,

    /// Committed ADD/SUB instructions.
    pub inst_add: u64,
    /// Committed MUL/DIV instructions.
    pub inst_mul: u64,
    /// Committed LOAD instructions.
    pub inst_load: u64,
    /// Committed STORE instructions.
    pub inst_store: u64,

    /// Results broadcast over the CDB.
    pub cdb_broadcasts: u64,

    /// Issue cycles lost because the ROB had no free slot.
    pub stalls_rob_full: u64,
    /// Issue cycles lost because the matching station group was full.
    pub stalls_no_station: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_issued: 0,
            instructions_committed: 0,
            inst_add: 0,
            inst_mul: 0,
            inst_load: 0,
            inst_store: 0,
            cdb_broadcasts: 0,
            stalls_rob_full: 0,
            stalls_no_station: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"stalls"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "stalls"];

impl SimStats {
    /// Records one committed instruction of the given class.
    pub fn count_commit(&mut self, class: FuClass) {
        self.instructions_committed += 1;
        match class {
            FuClass::Add => self.inst_add += 1,
            FuClass::Mul => self.inst_mul += 1,
            FuClass::Load => self.inst_load += 1,
            FuClass::Store => self.inst_store += 1,
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`,
    /// `"instruction_mix"`, or `"stalls"`. Pass an empty slice to print all
    /// sections (same as `print()`). Divisions are guarded by clamping the
    /// denominators to at least one.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);
        let instr = self.instructions_committed.max(1);

        if want("summary") {
            let ipc = self.instructions_committed as f64 / cyc as f64;
            let cpi = cyc as f64 / instr as f64;
            println!("\n==========================================================");
            println!("TOMASULO SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", seconds);
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts_issued         {}", self.instructions_issued);
            println!("sim_insts_committed      {}", self.instructions_committed);
            println!("sim_ipc                  {:.4}", ipc);
            println!("sim_cpi                  {:.4}", cpi);
            println!("cdb_broadcasts           {}", self.cdb_broadcasts);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let total = instr as f64;
            println!("INSTRUCTION MIX");
            println!(
                "  op.add_sub             {} ({:.2}%)",
                self.inst_add,
                (self.inst_add as f64 / total) * 100.0
            );
            println!(
                "  op.mul_div             {} ({:.2}%)",
                self.inst_mul,
                (self.inst_mul as f64 / total) * 100.0
            );
            println!(
                "  op.load                {} ({:.2}%)",
                self.inst_load,
                (self.inst_load as f64 / total) * 100.0
            );
            println!(
                "  op.store               {} ({:.2}%)",
                self.inst_store,
                (self.inst_store as f64 / total) * 100.0
            );
            println!("----------------------------------------------------------");
        }
        if want("stalls") {
            println!("STRUCTURAL STALLS");
            println!(
                "  stalls.rob_full        {} ({:.2}%)",
                self.stalls_rob_full,
                (self.stalls_rob_full as f64 / cyc as f64) * 100.0
            );
            println!(
                "  stalls.no_station      {} ({:.2}%)",
                self.stalls_no_station,
                (self.stalls_no_station as f64 / cyc as f64) * 100.0
            );
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
