//! Cycle-accurate simulator of a five-stage superscalar out-of-order
//! pipeline over straight-line instruction traces.
//!
//! This crate implements the simulation engine:
//! 1. **ISA:** the textual instruction set, opcode attribute tables, and
//!    the trace parser.
//! 2. **Pipeline:** register scoreboard (data hazards), execution-unit
//!    pool (structural hazards), per-instruction stage machine, and the
//!    cycle driver.
//! 3. **Trace:** per-cycle occupancy/stall snapshots and aggregate
//!    statistics, serialized for front-ends to replay.
//! 4. **Sim:** strict input loading and the `simulate` entry point.
//!
//! No register values, memory, or branch targets are modeled — only the
//! dataflow and resource contention a trace induces.

/// Common constants and error types.
pub mod common;
/// Engine configuration.
pub mod config;
/// Instruction set and parser.
pub mod isa;
/// Scoreboard, unit pool, stage machine, and the cycle driver.
pub mod pipeline;
/// Loading front door and the simulator.
pub mod sim;
/// Aggregate statistics and reporters.
pub mod stats;
/// Per-cycle trace types.
pub mod trace;

/// Engine configuration; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Trace parser; one `Instruction` per non-comment input line.
pub use crate::isa::parse::parse_program;
/// Tick-level simulation surface.
pub use crate::sim::simulator::Simulator;
/// One-call entry point.
pub use crate::sim::simulator::simulate;
/// The structured run result front-ends consume.
pub use crate::trace::RunResult;
