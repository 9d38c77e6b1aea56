//! Aggregate run statistics and the human-readable reporters.
//!
//! `RunStats` is the serialized statistics block of the run result; field
//! names are the external schema and must not change. The WAR/WAW and
//! branch-misprediction counters are always zero — the engine does not
//! model them — but front-ends expect the fields, so they stay.

use serde::Serialize;

/// Aggregate statistics for one run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    /// Cycles executed.
    pub total_cycles: u64,
    /// Instructions that reached COMPLETE.
    pub instructions_completed: u64,
    /// `instructions_completed / total_cycles`, 0 for an empty run.
    pub ipc: f64,
    /// Blocked (instruction, cycle) pairs observed in DECODE.
    pub total_stalls: u64,
    /// Stall cycles attributed to read-after-write dependencies.
    pub raw_hazards: u64,
    /// Always 0; unmodeled.
    pub war_hazards: u64,
    /// Always 0; unmodeled.
    pub waw_hazards: u64,
    /// Stall cycles attributed to execution-unit contention.
    pub structural_hazards: u64,
    /// Always 0; unmodeled.
    pub branch_mispredictions: u64,
}

impl RunStats {
    /// Prints an aligned statistics block to stderr.
    pub fn print_summary(&self) {
        eprintln!();
        eprintln!("==========================================================");
        eprintln!("PIPELINE SIMULATION STATISTICS");
        eprintln!("==========================================================");
        eprintln!("sim_cycles               {}", self.total_cycles);
        eprintln!("sim_insts                {}", self.instructions_completed);
        eprintln!("sim_ipc                  {:.4}", self.ipc);
        eprintln!("----------------------------------------------------------");
        eprintln!("stalls.total             {}", self.total_stalls);
        eprintln!("hazards.raw              {}", self.raw_hazards);
        eprintln!("hazards.structural       {}", self.structural_hazards);
        eprintln!("hazards.war              {}", self.war_hazards);
        eprintln!("hazards.waw              {}", self.waw_hazards);
        eprintln!("branch.mispredicts       {}", self.branch_mispredictions);
        eprintln!("==========================================================");
    }
}

/// Issue/complete timing for one instruction, for the timeline report.
#[derive(Clone, Debug)]
pub struct InstructionTiming {
    /// 1-based instruction id.
    pub id: u32,
    /// Original instruction text.
    pub text: String,
    /// Cycle the instruction issued; `None` if it never did.
    pub issue_cycle: Option<u64>,
    /// Cycle the instruction completed; `None` if it never did.
    pub complete_cycle: Option<u64>,
}

/// Prints the per-instruction timeline table to stderr.
pub fn print_timeline(timeline: &[InstructionTiming]) {
    let fmt_cycle = |c: Option<u64>| c.map_or_else(|| "-".to_string(), |c| c.to_string());

    eprintln!();
    eprintln!("Instruction Timeline");
    eprintln!("----------------------------------------------------------");
    eprintln!("{:<4} | {:>11} | {:>14} | Instruction", "ID", "Issue Cycle", "Complete Cycle");
    eprintln!("-----|-------------|----------------|--------------------");
    for timing in timeline {
        eprintln!(
            "I{:<3} | {:>11} | {:>14} | {}",
            timing.id,
            fmt_cycle(timing.issue_cycle),
            fmt_cycle(timing.complete_cycle),
            timing.text
        );
    }
}
