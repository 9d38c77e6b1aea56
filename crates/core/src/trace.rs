//! The per-cycle trace consumed by front-ends.
//!
//! Snapshots label stage occupancy with the original instruction text the
//! caller supplied, in ascending instruction-id order. The five stage keys
//! are always present; structs rather than maps keep field order fixed so
//! serialization is byte-stable across runs and platforms.

use serde::Serialize;

use crate::stats::RunStats;

/// Which instructions occupy each visible stage this cycle.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StageOccupancy {
    #[serde(rename = "FETCH")]
    pub fetch: Vec<String>,
    #[serde(rename = "DECODE")]
    pub decode: Vec<String>,
    #[serde(rename = "ISSUE")]
    pub issue: Vec<String>,
    #[serde(rename = "EXECUTE")]
    pub execute: Vec<String>,
    #[serde(rename = "WRITEBACK")]
    pub writeback: Vec<String>,
}

/// One instruction stalled in DECODE this cycle, and why.
#[derive(Clone, Debug, Serialize)]
pub struct StallRecord {
    pub instruction: String,
    pub reason: String,
}

/// The state of the pipeline at the end of one cycle.
#[derive(Clone, Debug, Serialize)]
pub struct CycleSnapshot {
    pub cycle: u64,
    pub stages: StageOccupancy,
    pub stalls: Vec<StallRecord>,
}

/// A complete simulation run: aggregate statistics plus the cycle history.
#[derive(Clone, Debug, Serialize)]
pub struct RunResult {
    pub stats: RunStats,
    pub cycles: Vec<CycleSnapshot>,
}
