//! Diagnostic and parse error definitions.
//!
//! This module defines the error surface of the simulator. It provides:
//! 1. **Runtime Diagnostics:** Non-fatal conditions detected by the engine
//!    (divide by zero, out-of-range addresses, internal invariant breaks).
//! 2. **Parse Errors:** Malformed lines rejected by the program reader.
//! 3. **Error Handling:** Integration with the standard Rust error traits.

use std::fmt;

/// A non-fatal condition detected while the engine is running.
///
/// Diagnostics are reported to standard error and recorded by the engine;
/// the pipeline always makes progress past them. Instruction and ROB slots
/// are carried as plain indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diag {
    /// DIV with a zero divisor; the result is forced to 0.
    DivideByZero {
        /// Program index of the offending instruction.
        instr: usize,
    },

    /// LOAD effective address outside the memory; the result is forced to 0.
    LoadAddressOutOfRange {
        /// Program index of the offending instruction.
        instr: usize,
        /// The computed effective address.
        address: i64,
    },

    /// STORE effective address outside the memory; the write is skipped but
    /// the instruction still commits.
    StoreAddressOutOfRange {
        /// Program index of the offending instruction.
        instr: usize,
        /// The computed effective address.
        address: i64,
    },

    /// A broadcast tag with no matching reservation station.
    ///
    /// Cannot occur while the pipeline invariants hold; reported instead of
    /// panicking so the simulation keeps running.
    MissingStation {
        /// ROB slot index of the orphan tag.
        rob: usize,
    },
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diag::DivideByZero { instr } => {
                write!(f, "divide by zero in instruction #{instr}; result forced to 0")
            }
            Diag::LoadAddressOutOfRange { instr, address } => {
                write!(
                    f,
                    "load address {address} out of range in instruction #{instr}; result forced to 0"
                )
            }
            Diag::StoreAddressOutOfRange { instr, address } => {
                write!(
                    f,
                    "store address {address} out of range in instruction #{instr}; write skipped"
                )
            }
            Diag::MissingStation { rob } => {
                write!(f, "no reservation station holds ROB slot {rob} at write result")
            }
        }
    }
}

impl std::error::Error for Diag {}

/// A malformed instruction line rejected by the program reader.
///
/// The reader skips the line with a diagnostic and continues; these errors
/// never abort loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The mnemonic is not one of the supported operations.
    UnknownMnemonic(String),
    /// A register operand is not of the form `F0..F31`.
    BadRegister(String),
    /// A memory operand is not of the form `offset(Rbase)`.
    BadMemoryOperand(String),
    /// An offset is not a signed decimal integer.
    BadOffset(String),
    /// The line ends before all operands are present.
    MissingOperand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownMnemonic(op) => write!(f, "unknown mnemonic '{op}'"),
            ParseError::BadRegister(tok) => write!(f, "bad register '{tok}'"),
            ParseError::BadMemoryOperand(tok) => {
                write!(f, "bad memory operand '{tok}' (expected offset(Rbase))")
            }
            ParseError::BadOffset(tok) => write!(f, "bad offset '{tok}'"),
            ParseError::MissingOperand(op) => write!(f, "missing operand for '{op}'"),
        }
    }
}

impl std::error::Error for ParseError {}
