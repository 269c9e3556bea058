//! Line-oriented program reader.
//!
//! Accepts the assembly format of the simulator:
//! 1. **Arithmetic:** `OP Rd, Rs1, Rs2` with OP in ADD/SUB/MUL/DIV.
//! 2. **Memory:** `L.D Rd, offset(Rbase)` and `S.D Rsrc, offset(Rbase)`,
//!    with `LOAD`/`STORE` accepted as aliases.
//!
//! Commas are optional whitespace; blank lines and `#` comments are skipped.
//! Malformed lines are skipped with a diagnostic on stderr; only a file that
//! cannot be opened is an error.

use std::fs;
use std::io;
use std::path::Path;

use crate::common::error::ParseError;
use crate::common::reg::Reg;
use crate::isa::instruction::{Instruction, Operation};

/// Parses one line of program text.
///
/// Returns `Ok(None)` for blank lines and comments, `Ok(Some(op))` for a
/// recognized instruction, and `Err` for a malformed line.
pub fn parse_line(line: &str) -> Result<Option<Operation>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    // Commas are operand separators equivalent to whitespace.
    let cleaned = line.replace(',', " ");
    let mut tokens = cleaned.split_whitespace();
    let mnemonic = match tokens.next() {
        Some(tok) => tok.to_ascii_uppercase(),
        None => return Ok(None),
    };

    let missing = || ParseError::MissingOperand(mnemonic.clone());

    let op = match mnemonic.as_str() {
        "ADD" | "SUB" | "MUL" | "DIV" => {
            let dest: Reg = tokens.next().ok_or_else(missing)?.parse()?;
            let lhs: Reg = tokens.next().ok_or_else(missing)?.parse()?;
            let rhs: Reg = tokens.next().ok_or_else(missing)?.parse()?;
            match mnemonic.as_str() {
                "ADD" => Operation::Add { dest, lhs, rhs },
                "SUB" => Operation::Sub { dest, lhs, rhs },
                "MUL" => Operation::Mul { dest, lhs, rhs },
                _ => Operation::Div { dest, lhs, rhs },
            }
        }
        "L.D" | "LOAD" => {
            let dest: Reg = tokens.next().ok_or_else(missing)?.parse()?;
            let (offset, base) = parse_memory_operand(tokens.next().ok_or_else(missing)?)?;
            Operation::Load { dest, offset, base }
        }
        "S.D" | "STORE" => {
            let src: Reg = tokens.next().ok_or_else(missing)?.parse()?;
            let (offset, base) = parse_memory_operand(tokens.next().ok_or_else(missing)?)?;
            Operation::Store { src, offset, base }
        }
        _ => return Err(ParseError::UnknownMnemonic(mnemonic)),
    };

    Ok(Some(op))
}

/// Parses a memory operand of the form `offset(Rbase)`.
fn parse_memory_operand(token: &str) -> Result<(i64, Reg), ParseError> {
    let bad = || ParseError::BadMemoryOperand(token.to_string());
    let open = token.find('(').ok_or_else(bad)?;
    let close = token.rfind(')').filter(|&c| c > open).ok_or_else(bad)?;

    let offset_str = &token[..open];
    let offset: i64 = offset_str
        .parse()
        .map_err(|_| ParseError::BadOffset(offset_str.to_string()))?;
    let base: Reg = token[open + 1..close].parse()?;
    Ok((offset, base))
}

/// Parses a whole program, skipping malformed lines with a diagnostic.
pub fn parse_program(source: &str) -> Vec<Instruction> {
    let mut program = Vec::new();
    for (number, line) in source.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(op)) => program.push(Instruction::new(op)),
            Ok(None) => {}
            Err(err) => eprintln!("[!] skipping line {}: {}", number + 1, err),
        }
    }
    program
}

/// Loads a program from a file.
///
/// Malformed lines inside the file are skipped with a diagnostic; only an
/// unreadable file is an error.
pub fn load_program(path: impl AsRef<Path>) -> io::Result<Vec<Instruction>> {
    let source = fs::read_to_string(path)?;
    Ok(parse_program(&source))
}
