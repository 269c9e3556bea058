use tomsim_core::config::Config;
use tomsim_core::engine::Engine;
use tomsim_core::isa::parser;

use crate::common::invariants;

pub struct TestContext {
    pub engine: Engine,
}

impl TestContext {
    /// Build an engine from program text with the default configuration.
    pub fn from_source(source: &str) -> Self {
        Self::with_config(source, Config::default())
    }

    /// Build an engine from program text with a custom configuration.
    pub fn with_config(source: &str, config: Config) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let program = parser::parse_program(source);
        Self {
            engine: Engine::new(program, &config),
        }
    }

    /// Advance one cycle and verify the machine invariants still hold.
    pub fn step_checked(&mut self) {
        self.engine.step();
        if let Err(violation) = invariants::check(&self.engine.snapshot()) {
            panic!(
                "invariant violated after cycle {}: {}",
                self.engine.cycle() - 1,
                violation
            );
        }
    }

    /// Run until done, checking invariants every cycle.
    ///
    /// Panics if the simulation has not drained within `limit` cycles.
    /// Returns the number of cycles executed.
    pub fn run_to_completion(&mut self, limit: u64) -> u64 {
        let mut cycles = 0;
        while !self.engine.is_done() {
            assert!(
                cycles < limit,
                "simulation still running after {limit} cycles"
            );
            self.step_checked();
            cycles += 1;
        }
        cycles
    }

    /// Read a register by name, e.g. `"F4"`.
    pub fn reg(&self, name: &str) -> i64 {
        self.engine.register(name.parse().unwrap())
    }

    /// Read a memory word, panicking on an out-of-range address.
    pub fn mem(&self, addr: i64) -> i64 {
        self.engine.memory_word(addr).unwrap()
    }

    /// The issue/execute/write/commit stamps of one instruction.
    pub fn timing(&self, index: usize) -> tomsim_core::isa::instruction::Timing {
        self.engine.snapshot().instructions[index].timing
    }
}
