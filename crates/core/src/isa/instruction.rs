//! Instruction model: operations, functional-unit classes and event stamps.
//!
//! Instructions are tagged variants with one arm per operation shape, so the
//! engine's compute step is a single match instead of string dispatch.

use std::fmt;

use crate::common::reg::Reg;

/// The kind of an operation, mirrored into ROB entries and stations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OpKind {
    /// Integer addition.
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiplication.
    Mul,
    /// Integer division.
    Div,
    /// Memory read into a register.
    Load,
    /// Memory write from a register.
    Store,
}

impl OpKind {
    /// Returns the functional-unit class that executes this operation.
    pub fn fu_class(self) -> FuClass {
        match self {
            OpKind::Add | OpKind::Sub => FuClass::Add,
            OpKind::Mul | OpKind::Div => FuClass::Mul,
            OpKind::Load => FuClass::Load,
            OpKind::Store => FuClass::Store,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpKind::Add => "ADD",
            OpKind::Sub => "SUB",
            OpKind::Mul => "MUL",
            OpKind::Div => "DIV",
            OpKind::Load => "L.D",
            OpKind::Store => "S.D",
        };
        f.write_str(name)
    }
}

/// Functional-unit class; each class owns one reservation station group.
///
/// ADD/SUB share the adders, MUL/DIV share the multipliers; LOAD and STORE
/// each have their own address unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FuClass {
    /// Adders (ADD, SUB).
    Add,
    /// Multipliers (MUL, DIV).
    Mul,
    /// Load/address unit.
    Load,
    /// Store/address unit.
    Store,
}

impl FuClass {
    /// All classes, in station-group display order.
    pub const ALL: [FuClass; 4] = [FuClass::Add, FuClass::Mul, FuClass::Load, FuClass::Store];

    /// Returns the group index of this class.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            FuClass::Add => 0,
            FuClass::Mul => 1,
            FuClass::Load => 2,
            FuClass::Store => 3,
        }
    }
}

impl fmt::Display for FuClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FuClass::Add => "ADD",
            FuClass::Mul => "MUL",
            FuClass::Load => "LOAD",
            FuClass::Store => "STORE",
        };
        f.write_str(name)
    }
}

/// A parsed operation with its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// `ADD Rd, Rs1, Rs2`
    Add { dest: Reg, lhs: Reg, rhs: Reg },
    /// `SUB Rd, Rs1, Rs2`
    Sub { dest: Reg, lhs: Reg, rhs: Reg },
    /// `MUL Rd, Rs1, Rs2`
    Mul { dest: Reg, lhs: Reg, rhs: Reg },
    /// `DIV Rd, Rs1, Rs2`
    Div { dest: Reg, lhs: Reg, rhs: Reg },
    /// `L.D Rd, offset(Rbase)`
    Load { dest: Reg, offset: i64, base: Reg },
    /// `S.D Rsrc, offset(Rbase)`
    Store { src: Reg, offset: i64, base: Reg },
}

impl Operation {
    /// Returns the operation kind.
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Add { .. } => OpKind::Add,
            Operation::Sub { .. } => OpKind::Sub,
            Operation::Mul { .. } => OpKind::Mul,
            Operation::Div { .. } => OpKind::Div,
            Operation::Load { .. } => OpKind::Load,
            Operation::Store { .. } => OpKind::Store,
        }
    }

    /// Returns the destination register, if the operation writes one.
    ///
    /// STORE writes memory, not a register, and returns `None`.
    pub fn dest(&self) -> Option<Reg> {
        match *self {
            Operation::Add { dest, .. }
            | Operation::Sub { dest, .. }
            | Operation::Mul { dest, .. }
            | Operation::Div { dest, .. }
            | Operation::Load { dest, .. } => Some(dest),
            Operation::Store { .. } => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Operation::Add { dest, lhs, rhs }
            | Operation::Sub { dest, lhs, rhs }
            | Operation::Mul { dest, lhs, rhs }
            | Operation::Div { dest, lhs, rhs } => {
                write!(f, "{} {dest},{lhs},{rhs}", self.kind())
            }
            Operation::Load { dest, offset, base } => {
                write!(f, "L.D {dest},{offset}({base})")
            }
            Operation::Store { src, offset, base } => {
                write!(f, "S.D {src},{offset}({base})")
            }
        }
    }
}

/// Event-cycle stamps for one instruction, all initially unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timing {
    /// Cycle the instruction was issued.
    pub issue: Option<u64>,
    /// Cycle its execution finished.
    pub execute_complete: Option<u64>,
    /// Cycle its result went over the CDB.
    pub write_result: Option<u64>,
    /// Cycle it retired from the ROB head.
    pub commit: Option<u64>,
}

/// One program instruction: the operation plus its event stamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The parsed operation and operands.
    pub operation: Operation,
    /// Per-stage event stamps, filled in as the instruction flows.
    pub timing: Timing,
}

impl Instruction {
    /// Wraps an operation with unset event stamps.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            timing: Timing::default(),
        }
    }
}
