//! Tomasulo dynamic-scheduling simulator library.
//!
//! This crate implements a cycle-accurate model of Tomasulo's algorithm with
//! a Reorder Buffer, covering:
//! 1. **Engine:** The four-stage pipeline (Issue, Execute, Write Result, Commit)
//!    over reservation stations, ROB, rename table, functional units and a
//!    single Common Data Bus.
//! 2. **ISA:** The instruction model and the line-oriented program reader.
//! 3. **Simulation:** Configuration, statistics collection and structural
//!    state snapshots for external observers.

/// Common types (register names, register file, error and diagnostic types).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Scheduling engine (pipeline stages, ROB, stations, rename table, memory).
pub mod engine;
/// Instruction set (operation model, event stamps, program reader).
pub mod isa;
/// Structural copies of engine state for renderers and tests.
pub mod snapshot;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main engine type; owns all microarchitectural and architectural state.
pub use crate::engine::Engine;
/// Structural snapshot of the engine, produced by `Engine::snapshot`.
pub use crate::snapshot::Snapshot;
