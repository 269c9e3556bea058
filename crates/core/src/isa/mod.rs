//! Instruction set model and program reader.
//!
//! This module defines what the simulator executes:
//! 1. **Instruction Model:** Operation variants, functional-unit classes and
//!    per-instruction event stamps.
//! 2. **Reader:** The line-oriented assembly parser and file loader.

/// Operation variants, kinds, classes and event stamps.
pub mod instruction;

/// Line-oriented program parser and file loader.
pub mod parser;

pub use instruction::{FuClass, Instruction, OpKind, Operation, Timing};
