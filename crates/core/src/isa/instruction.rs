//! The immutable instruction record produced by the parser.

use crate::isa::opcode::Opcode;

/// One parsed instruction.
///
/// Operand roles are `Option` because a register field may be syntactically
/// absent, malformed, or out of range — all three are "no dependency". The
/// original text is kept verbatim so trace snapshots label stages with the
/// exact strings the caller supplied.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// 1-based position in the parsed program.
    pub id: u32,
    /// Operation.
    pub opcode: Opcode,
    /// Destination register. For STORE this is the register holding the
    /// value being stored; the scoreboard treats it as a write target all
    /// the same.
    pub dest: Option<usize>,
    /// First source register.
    pub src1: Option<usize>,
    /// Second source register.
    pub src2: Option<usize>,
    /// Whether this is a control-flow instruction.
    pub is_branch: bool,
    /// Branch target; meaningful only when `is_branch`, 0 when malformed.
    pub branch_target: i64,
    /// The source line, verbatim.
    pub text: String,
}
