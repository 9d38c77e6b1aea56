//! The simulator: driver plus cycle history.
//!
//! [`Simulator`] is the tick-level embedding surface — front-ends that
//! want to step the pipeline themselves can construct one, call
//! [`Simulator::tick`] in their own loop, and read back the timeline.
//! [`simulate`] is the one-call entry point: run to completion or the
//! cycle ceiling, return the result.

use crate::config::SimConfig;
use crate::isa::instruction::Instruction;
use crate::pipeline::driver::CycleDriver;
use crate::stats::{InstructionTiming, RunStats};
use crate::trace::{CycleSnapshot, RunResult};

/// A simulation in progress.
pub struct Simulator {
    driver: CycleDriver,
    trace: Vec<CycleSnapshot>,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator over `program` with every instruction idle.
    pub fn new(program: Vec<Instruction>, config: &SimConfig) -> Self {
        Self {
            driver: CycleDriver::new(program),
            trace: Vec::new(),
            max_cycles: config.max_cycles,
        }
    }

    /// Whether the run is over: every instruction complete, or the cycle
    /// ceiling reached (a runaway trace still yields its partial result).
    pub fn is_done(&self) -> bool {
        self.driver.is_done() || self.driver.cycle() >= self.max_cycles
    }

    /// Advances the pipeline one cycle and records the snapshot.
    pub fn tick(&mut self) {
        let snapshot = self.driver.tick();
        self.trace.push(snapshot);
    }

    /// Runs until done.
    pub fn run(&mut self) {
        while !self.is_done() {
            self.tick();
        }
    }

    /// Aggregate statistics as of now.
    pub fn stats(&self) -> RunStats {
        self.driver.stats()
    }

    /// Per-instruction issue/complete timing.
    pub fn timeline(&self) -> Vec<InstructionTiming> {
        self.driver.timeline()
    }

    /// Consumes the simulator and produces the run result.
    pub fn into_result(self) -> RunResult {
        RunResult {
            stats: self.driver.stats(),
            cycles: self.trace,
        }
    }
}

/// Simulates `program` to completion (or the cycle ceiling) and returns
/// the run result. Deterministic: the same program and configuration
/// always produce the same result.
pub fn simulate(program: Vec<Instruction>, config: &SimConfig) -> RunResult {
    let mut simulator = Simulator::new(program, config);
    simulator.run();
    simulator.into_result()
}
