//! Dispatch-time hazard detection.
//!
//! An instruction in DECODE may be blocked by:
//! 1. **RAW:** a source register still being produced by an earlier
//!    in-flight instruction (src1 checked before src2).
//! 2. **Structural:** no unit of the required class left in the pool as
//!    allocated so far this cycle.
//!
//! Detection is read-only; the driver applies the stall bookkeeping and
//! counts each blocked (instruction, cycle) pair separately, so an
//! instruction stuck behind an 8-cycle divide contributes ~8 increments.

use crate::isa::instruction::Instruction;
use crate::isa::opcode::UnitClass;
use crate::pipeline::scoreboard::Scoreboard;
use crate::pipeline::units::UnitPool;

/// A reason an instruction cannot leave DECODE this cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hazard {
    /// Read-after-write: `reg` is being produced by instruction `writer`.
    Raw { reg: usize, writer: u32 },
    /// No execution unit of `unit` is free this cycle.
    Structural { unit: UnitClass },
}

impl Hazard {
    /// The stall reason string recorded in snapshots.
    pub fn reason(&self) -> String {
        match self {
            Hazard::Raw { reg, writer } => format!("RAW on R{reg} (writer: I{writer})"),
            Hazard::Structural { unit } => format!("Structural - {unit} busy"),
        }
    }
}

/// Checks whether `instr` can dispatch at `cycle`.
pub fn detect(
    instr: &Instruction,
    scoreboard: &Scoreboard,
    units: &UnitPool,
    cycle: u64,
) -> Option<Hazard> {
    for src in [instr.src1, instr.src2] {
        if let Some(reg) = src {
            if scoreboard.is_busy(reg, cycle) {
                if let Some(writer) = scoreboard.writer_of(reg) {
                    return Some(Hazard::Raw { reg, writer });
                }
            }
        }
    }

    let unit = instr.opcode.unit();
    if !units.is_available(unit) {
        return Some(Hazard::Structural { unit });
    }

    None
}
