//! Per-instruction pipeline state.

use crate::isa::opcode::UnitClass;

/// Lifecycle stages. Created in `Idle`, advanced monotonically by the
/// driver, terminal in `Complete`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetch,
    Decode,
    Issue,
    Execute,
    Writeback,
    Complete,
}

/// Mutable pipeline state for one instruction.
#[derive(Clone, Debug)]
pub struct PipeState {
    /// Current stage.
    pub stage: Stage,
    /// Unit claimed at issue; cleared when the instruction retires.
    pub assigned_unit: Option<UnitClass>,
    /// Ticks spent in EXECUTE so far.
    pub cycles_in_stage: u64,
    /// Whether the instruction is stalled in DECODE this cycle.
    pub stalled: bool,
    /// Why, when `stalled` is set.
    pub stall_reason: String,
    /// Cycle the instruction issued, once it has.
    pub issue_cycle: Option<u64>,
    /// Cycle the instruction completed, once it has.
    pub complete_cycle: Option<u64>,
}

impl Default for PipeState {
    fn default() -> Self {
        Self {
            stage: Stage::Idle,
            assigned_unit: None,
            cycles_in_stage: 0,
            stalled: false,
            stall_reason: String::new(),
            issue_cycle: None,
            complete_cycle: None,
        }
    }
}
