//! Line-oriented trace parser.
//!
//! Converts textual instruction lines into [`Instruction`] records:
//! 1. **Skipping:** blank lines and lines whose first non-space character
//!    is `#` are dropped without consuming an id.
//! 2. **Opcode:** the first whitespace token, matched exactly against the
//!    uppercase opcode table; unknown tokens become NOP.
//! 3. **Operands:** parsed by opcode form (see the table below). A register
//!    operand is `R` followed by a decimal index in `[0, 32)`; anything
//!    else yields an absent field. A malformed branch target yields 0.
//!
//! | Form                 | Syntax             | Produces                |
//! |----------------------|--------------------|-------------------------|
//! | ALU/FPU/NOP/unknown  | `OP Rd Rs1 Rs2`    | dest, src1, src2        |
//! | LOAD                 | `LOAD Rd Rs1`      | dest, src1              |
//! | STORE                | `STORE Rd Rs1`     | dest, src1              |
//! | BEQ / BNE            | `OP Rs1 Rs2 tgt`   | src1, src2, target      |
//! | JMP                  | `JMP tgt`          | target                  |

use crate::common::NUM_REGISTERS;
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;

/// Parses a sequence of trace lines into a program, assigning ids
/// `1, 2, ...` in input order.
pub fn parse_program<I, S>(lines: I) -> Vec<Instruction>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut program = Vec::new();
    for line in lines {
        let id = program.len() as u32 + 1;
        if let Some(instr) = parse_line(line.as_ref(), id) {
            program.push(instr);
        }
    }
    program
}

/// Parses one line. Returns `None` for blank lines and comments.
fn parse_line(line: &str, id: u32) -> Option<Instruction> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut tokens = trimmed.split_whitespace();
    let opcode = Opcode::from_token(tokens.next()?);

    let mut dest = None;
    let mut src1 = None;
    let mut src2 = None;
    let mut is_branch = false;
    let mut branch_target = 0i64;

    match opcode {
        Opcode::Load | Opcode::Store => {
            dest = parse_register(tokens.next());
            src1 = parse_register(tokens.next());
        }
        Opcode::Beq | Opcode::Bne => {
            src1 = parse_register(tokens.next());
            src2 = parse_register(tokens.next());
            branch_target = parse_target(tokens.next());
            is_branch = true;
        }
        Opcode::Jmp => {
            branch_target = parse_target(tokens.next());
            is_branch = true;
        }
        _ => {
            dest = parse_register(tokens.next());
            src1 = parse_register(tokens.next());
            src2 = parse_register(tokens.next());
        }
    }

    Some(Instruction {
        id,
        opcode,
        dest,
        src1,
        src2,
        is_branch,
        branch_target,
        text: line.to_string(),
    })
}

/// Parses an `R<n>` register operand. Missing, malformed, and out-of-range
/// operands are all absent.
fn parse_register(token: Option<&str>) -> Option<usize> {
    let index = token?.strip_prefix('R')?.parse::<usize>().ok()?;
    (index < NUM_REGISTERS).then_some(index)
}

/// Parses a branch target; malformed or missing targets yield 0.
fn parse_target(token: Option<&str>) -> i64 {
    token.and_then(|t| t.parse::<i64>().ok()).unwrap_or(0)
}
