//! Program reader tests, including file loading.

use std::io::Write;
use tempfile::NamedTempFile;

use tomsim_core::isa::instruction::OpKind;
use tomsim_core::isa::parser;

/// Helper to write a temporary instruction file.
fn temp_program(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_program_from_file() {
    let file = temp_program(
        "# scenario\n\
         ADD F1,F2,F3\n\
         L.D F2, 100(F0)\n\
         S.D F2, 50(F0)\n",
    );
    let program = parser::load_program(file.path()).unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(program[0].operation.kind(), OpKind::Add);
    assert_eq!(program[1].operation.kind(), OpKind::Load);
    assert_eq!(program[2].operation.kind(), OpKind::Store);
}

#[test]
fn test_load_program_skips_malformed_lines() {
    let file = temp_program(
        "ADD F1,F2,F3\n\
         FNORD F1,F2,F3\n\
         ADD F99,F2,F3\n\
         SUB F4,F1,F5\n",
    );
    let program = parser::load_program(file.path()).unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program[0].operation.kind(), OpKind::Add);
    assert_eq!(program[1].operation.kind(), OpKind::Sub);
}

#[test]
fn test_load_program_missing_file() {
    let missing = std::path::Path::new("/no/such/instruction/file.txt");
    assert!(parser::load_program(missing).is_err());
}

#[test]
fn test_empty_file_is_empty_program() {
    let file = temp_program("");
    let program = parser::load_program(file.path()).unwrap();
    assert!(program.is_empty());
}
