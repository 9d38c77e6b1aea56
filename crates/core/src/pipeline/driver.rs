//! The cycle driver.
//!
//! Owns the program, one [`PipeState`] per instruction, the scoreboard,
//! and the unit pool, and advances everything one tick at a time. Each
//! tick runs a fixed sequence of phases:
//!
//! 1. **Pool reset** — availability starts every cycle at full capacity
//!    and means "not claimed by an instruction issuing this cycle".
//! 2. **Execute progression** — instructions in EXECUTE count down their
//!    latency and move to WRITEBACK when it elapses.
//! 3. **Dispatch walk** — instructions in DECODE are hazard-checked in
//!    ascending id order; a clean instruction passes through ISSUE and
//!    starts executing, so its unit claim and scoreboard mark are visible
//!    to every later instruction in the same walk. Lower ids therefore
//!    have priority for scarce units.
//! 4. **Fetch** — FETCH moves to DECODE, IDLE moves to FETCH; one stage
//!    per instruction per tick.
//! 5. **Snapshot** — occupancy and stalls are recorded.
//! 6. **Retire** — instructions that reached WRITEBACK this tick complete:
//!    scoreboard slot cleared (writer-guarded), unit released, completion
//!    cycle stamped.
//!
//! Retiring after the snapshot keeps the writeback stage visible in the
//! trace and keeps a produced value unreadable until the cycle after its
//! producer completes, which is what makes a dependent instruction issue
//! strictly after its producer retires.
//!
//! Everything here is sequential and deterministic; the walk order is the
//! tie-break rule, not an implementation convenience.

use crate::isa::instruction::Instruction;
use crate::pipeline::hazards::{self, Hazard};
use crate::pipeline::scoreboard::Scoreboard;
use crate::pipeline::state::{PipeState, Stage};
use crate::pipeline::units::UnitPool;
use crate::stats::{InstructionTiming, RunStats};
use crate::trace::{CycleSnapshot, StageOccupancy, StallRecord};

/// Running hazard/stall tallies. Stalls are counted per blocked
/// (instruction, cycle) pair.
#[derive(Clone, Copy, Debug, Default)]
struct HazardCounters {
    raw: u64,
    structural: u64,
    stalls: u64,
}

/// Drives every instruction through the pipeline, one tick at a time.
pub struct CycleDriver {
    program: Vec<Instruction>,
    states: Vec<PipeState>,
    scoreboard: Scoreboard,
    units: UnitPool,
    counters: HazardCounters,
    cycle: u64,
    completed: usize,
}

impl CycleDriver {
    /// Creates a driver with every instruction idle and all resources
    /// free.
    pub fn new(program: Vec<Instruction>) -> Self {
        let states = vec![PipeState::default(); program.len()];
        Self {
            program,
            states,
            scoreboard: Scoreboard::new(),
            units: UnitPool::new(),
            counters: HazardCounters::default(),
            cycle: 0,
            completed: 0,
        }
    }

    /// Cycles executed so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Instructions retired so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Whether every instruction has reached COMPLETE.
    pub fn is_done(&self) -> bool {
        self.completed == self.program.len()
    }

    /// Advances the pipeline one cycle and returns the cycle's snapshot.
    pub fn tick(&mut self) -> CycleSnapshot {
        self.cycle += 1;
        let cycle = self.cycle;

        self.units.reset();
        self.progress_execute();
        self.dispatch_walk(cycle);
        self.fetch();
        let snapshot = self.capture(cycle);
        self.retire(cycle);

        log::debug!(
            "cycle {cycle}: {}/{} complete, {} stall(s) this cycle",
            self.completed,
            self.program.len(),
            snapshot.stalls.len()
        );

        snapshot
    }

    /// Advances every executing instruction by one latency tick.
    fn progress_execute(&mut self) {
        for (instr, state) in self.program.iter().zip(self.states.iter_mut()) {
            if state.stage != Stage::Execute {
                continue;
            }
            state.cycles_in_stage += 1;
            if state.cycles_in_stage >= instr.opcode.latency() {
                state.stage = Stage::Writeback;
                state.cycles_in_stage = 0;
                log::trace!("I{} -> WRITEBACK", instr.id);
            }
        }
    }

    /// Hazard-checks and dispatches decoded instructions in ascending id
    /// order.
    fn dispatch_walk(&mut self, cycle: u64) {
        for i in 0..self.program.len() {
            if self.states[i].stage != Stage::Decode {
                continue;
            }
            match hazards::detect(&self.program[i], &self.scoreboard, &self.units, cycle) {
                Some(hazard) => self.stall(i, &hazard),
                None => self.issue(i, cycle),
            }
        }
    }

    /// Records a DECODE stall.
    fn stall(&mut self, i: usize, hazard: &Hazard) {
        match hazard {
            Hazard::Raw { .. } => self.counters.raw += 1,
            Hazard::Structural { .. } => self.counters.structural += 1,
        }
        self.counters.stalls += 1;

        let state = &mut self.states[i];
        state.stalled = true;
        state.stall_reason = hazard.reason();
        log::trace!("I{} stalled: {}", self.program[i].id, state.stall_reason);
    }

    /// Moves a hazard-free instruction through ISSUE into EXECUTE,
    /// claiming its unit and marking its destination in the scoreboard.
    fn issue(&mut self, i: usize, cycle: u64) {
        let instr = &self.program[i];
        let unit = instr.opcode.unit();

        let state = &mut self.states[i];
        state.stalled = false;
        state.stall_reason.clear();
        state.stage = Stage::Issue;

        let allocated = self.units.allocate(unit);
        debug_assert!(allocated, "issue follows a successful availability check");

        state.stage = Stage::Execute;
        state.assigned_unit = Some(unit);
        state.cycles_in_stage = 0;
        state.issue_cycle = Some(cycle);

        if let Some(dest) = instr.dest {
            // The value is readable the cycle after the producer retires.
            let ready_cycle = cycle + instr.opcode.latency() + 1;
            self.scoreboard.mark_busy(dest, instr.id, ready_cycle);
        }
        log::trace!("I{} issued on {unit} at cycle {cycle}", instr.id);
    }

    /// Admits instructions into the pipeline, one stage per tick.
    fn fetch(&mut self) {
        for state in self.states.iter_mut() {
            match state.stage {
                Stage::Fetch => {
                    state.stage = Stage::Decode;
                    state.cycles_in_stage = 0;
                }
                Stage::Idle => state.stage = Stage::Fetch,
                _ => {}
            }
        }
    }

    /// Records stage occupancy and stalls, ascending id order.
    fn capture(&self, cycle: u64) -> CycleSnapshot {
        let mut stages = StageOccupancy::default();
        let mut stalls = Vec::new();

        for (instr, state) in self.program.iter().zip(self.states.iter()) {
            let list = match state.stage {
                Stage::Fetch => &mut stages.fetch,
                Stage::Decode => &mut stages.decode,
                Stage::Issue => &mut stages.issue,
                Stage::Execute => &mut stages.execute,
                Stage::Writeback => &mut stages.writeback,
                Stage::Idle | Stage::Complete => continue,
            };
            list.push(instr.text.clone());

            if state.stalled {
                stalls.push(StallRecord {
                    instruction: instr.text.clone(),
                    reason: state.stall_reason.clone(),
                });
            }
        }

        CycleSnapshot {
            cycle,
            stages,
            stalls,
        }
    }

    /// Completes every instruction that reached WRITEBACK this tick.
    fn retire(&mut self, cycle: u64) {
        for i in 0..self.program.len() {
            if self.states[i].stage != Stage::Writeback {
                continue;
            }
            let instr = &self.program[i];
            if let Some(dest) = instr.dest {
                self.scoreboard.clear(dest, instr.id);
            }

            let state = &mut self.states[i];
            if let Some(unit) = state.assigned_unit.take() {
                self.units.release(unit);
            }
            state.stage = Stage::Complete;
            state.complete_cycle = Some(cycle);
            self.completed += 1;
            log::trace!("I{} complete at cycle {cycle}", instr.id);
        }
    }

    /// Aggregate statistics as of now.
    pub fn stats(&self) -> RunStats {
        let total_cycles = self.cycle;
        let instructions_completed = self.completed as u64;
        let ipc = if total_cycles > 0 {
            instructions_completed as f64 / total_cycles as f64
        } else {
            0.0
        };
        RunStats {
            total_cycles,
            instructions_completed,
            ipc,
            total_stalls: self.counters.stalls,
            raw_hazards: self.counters.raw,
            war_hazards: 0,
            waw_hazards: 0,
            structural_hazards: self.counters.structural,
            branch_mispredictions: 0,
        }
    }

    /// Per-instruction issue/complete timing.
    pub fn timeline(&self) -> Vec<InstructionTiming> {
        self.program
            .iter()
            .zip(self.states.iter())
            .map(|(instr, state)| InstructionTiming {
                id: instr.id,
                text: instr.text.clone(),
                issue_cycle: state.issue_cycle,
                complete_cycle: state.complete_cycle,
            })
            .collect()
    }
}
