//! Liveness, error handling and data-flow properties.

use tomsim_core::common::error::Diag;
use tomsim_core::config::Config;

use crate::common::harness::TestContext;

const LIMIT: u64 = 10_000;

/// Well-formed programs finish within N * (max latency + ROB capacity).
#[test]
fn test_termination_bound() {
    let programs = [
        "ADD F1,F2,F3\nSUB F4,F1,F5\nMUL F6,F4,F1\n",
        "DIV F1,F2,F3\nADD F4,F1,F5\nADD F6,F2,F3\n",
        "L.D F2,100(F0)\nADD F3,F2,F1\nS.D F3,200(F0)\n",
        "MUL F1,F2,F3\nMUL F2,F1,F3\nMUL F3,F2,F1\nDIV F4,F3,F2\n",
    ];
    let config = Config::default();
    let bound_per_inst = config.latency.max() + config.machine.rob_entries as u64;

    for program in programs {
        let mut ctx = TestContext::from_source(program);
        let instructions = ctx.engine.snapshot().instructions.len() as u64;
        let cycles = ctx.run_to_completion(LIMIT);
        assert!(
            cycles <= instructions * bound_per_inst,
            "{program:?} took {cycles} cycles"
        );
    }
}

/// A loaded value stored elsewhere round-trips; the source is untouched.
#[test]
fn test_load_store_round_trip() {
    let mut ctx = TestContext::from_source(
        "L.D F1,200(F0)\n\
         S.D F1,300(F0)\n",
    );
    ctx.run_to_completion(LIMIT);

    // Load address 210 (value 210) stored to address 310
    assert_eq!(ctx.mem(310), 210);
    assert_eq!(ctx.mem(210), 210);
    assert_eq!(ctx.reg("F1"), 210);
}

#[test]
fn test_divide_by_zero_produces_zero_and_continues() {
    let mut ctx = TestContext::from_source(
        "SUB F2,F1,F1\n\
         DIV F3,F1,F2\n\
         ADD F4,F1,F1\n",
    );
    ctx.run_to_completion(LIMIT);

    assert_eq!(ctx.reg("F2"), 0);
    assert_eq!(ctx.reg("F3"), 0);
    assert_eq!(ctx.reg("F4"), 20);
    assert_eq!(ctx.engine.diagnostics(), &[Diag::DivideByZero { instr: 1 }]);
}

#[test]
fn test_load_out_of_range_produces_zero() {
    let mut ctx = TestContext::from_source("L.D F1,2000(F0)\n");
    ctx.run_to_completion(LIMIT);

    assert_eq!(ctx.reg("F1"), 0);
    assert_eq!(
        ctx.engine.diagnostics(),
        &[Diag::LoadAddressOutOfRange {
            instr: 0,
            address: 2010,
        }]
    );
}

#[test]
fn test_load_negative_address_produces_zero() {
    let mut ctx = TestContext::from_source("L.D F1,-100(F0)\n");
    ctx.run_to_completion(LIMIT);

    assert_eq!(ctx.reg("F1"), 0);
    assert_eq!(
        ctx.engine.diagnostics(),
        &[Diag::LoadAddressOutOfRange {
            instr: 0,
            address: -90,
        }]
    );
}

#[test]
fn test_store_out_of_range_still_commits() {
    let mut ctx = TestContext::from_source(
        "S.D F1,2000(F0)\n\
         ADD F2,F1,F1\n",
    );
    ctx.run_to_completion(LIMIT);

    // The bad store retires (freeing its slot) without touching memory,
    // and the program keeps going.
    assert!(ctx.timing(0).commit.is_some());
    assert_eq!(ctx.reg("F2"), 20);
    assert_eq!(
        ctx.engine.diagnostics(),
        &[Diag::StoreAddressOutOfRange {
            instr: 0,
            address: 2010,
        }]
    );
}

/// A chain long enough to wrap the ROB several times stays consistent.
#[test]
fn test_rob_wraparound_under_pressure() {
    let mut config = Config::default();
    config.machine.rob_entries = 2;
    let mut ctx = TestContext::with_config(
        "ADD F1,F1,F2\n\
         ADD F1,F1,F2\n\
         ADD F1,F1,F2\n\
         ADD F1,F1,F2\n\
         ADD F1,F1,F2\n",
        config,
    );
    ctx.run_to_completion(LIMIT);

    // 10 + 5 * 10
    assert_eq!(ctx.reg("F1"), 60);
    assert_eq!(ctx.engine.stats().instructions_committed, 5);
}

#[test]
fn test_empty_program_is_immediately_done() {
    let ctx = TestContext::from_source("# nothing but comments\n\n");
    assert!(ctx.engine.is_done());
}

#[test]
fn test_stats_accounting() {
    let mut ctx = TestContext::from_source(
        "ADD F1,F2,F3\n\
         MUL F4,F1,F5\n\
         L.D F6,0(F0)\n\
         S.D F6,1(F0)\n",
    );
    let cycles = ctx.run_to_completion(LIMIT);

    let stats = ctx.engine.stats();
    assert_eq!(stats.cycles, cycles);
    assert_eq!(stats.instructions_issued, 4);
    assert_eq!(stats.instructions_committed, 4);
    assert_eq!(stats.cdb_broadcasts, 4);
    assert_eq!(stats.inst_add, 1);
    assert_eq!(stats.inst_mul, 1);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
}
