//! Trace loading front door.
//!
//! The engine itself is permissive — unknown opcodes become NOPs, bad
//! operands become absent, and an empty program simulates to an empty
//! result. Callers handing over whole payloads get stricter treatment
//! here: unreadable files, malformed JSON, payloads without a string array
//! under `instructions`, and traces that parse to nothing are all fatal.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::common::error::LoadError;
use crate::isa::instruction::Instruction;
use crate::isa::parse::parse_program;

/// Loads a program from a line-oriented trace file (one instruction per
/// line, `#` comments and blank lines allowed).
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Instruction>, LoadError> {
    let contents = fs::read_to_string(path)?;
    finish(parse_program(contents.lines()))
}

/// Loads a program from a JSON payload of the form
/// `{"instructions": ["ADD R1 R2 R3", ...]}`.
pub fn load_json(reader: impl Read) -> Result<Vec<Instruction>, LoadError> {
    let payload: Value = serde_json::from_reader(reader)?;
    let instructions = payload
        .get("instructions")
        .ok_or_else(|| LoadError::Payload("missing `instructions` field".into()))?;
    let entries = instructions
        .as_array()
        .ok_or_else(|| LoadError::Payload("`instructions` must be an array".into()))?;

    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.as_str() {
            Some(line) => lines.push(line.to_string()),
            None => {
                return Err(LoadError::Payload(
                    "`instructions` entries must be strings".into(),
                ))
            }
        }
    }
    finish(parse_program(lines))
}

fn finish(program: Vec<Instruction>) -> Result<Vec<Instruction>, LoadError> {
    if program.is_empty() {
        return Err(LoadError::EmptyTrace);
    }
    log::debug!("loaded {} instruction(s)", program.len());
    Ok(program)
}
