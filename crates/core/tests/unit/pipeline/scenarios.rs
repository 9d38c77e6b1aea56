//! End-to-end driver scenarios.
//!
//! Each test runs a small trace through the engine and checks the cycle
//! timeline, the stall records, and the aggregate statistics.

use crate::common::{execute_occupancy, run_trace, run_trace_with, snapshot};
use pipesim_core::{SimConfig, parse_program, simulate};

// ══════════════════════════════════════════════════════════
// 1. Single instruction timeline
// ══════════════════════════════════════════════════════════

#[test]
fn single_add_runs_in_four_cycles() {
    let result = run_trace(&["ADD R1 R2 R3"]);

    assert_eq!(result.stats.total_cycles, 4);
    assert_eq!(result.stats.instructions_completed, 1);
    assert!((result.stats.ipc - 0.25).abs() < 1e-9);
    assert_eq!(result.stats.total_stalls, 0);
    assert_eq!(result.stats.raw_hazards, 0);
    assert_eq!(result.stats.structural_hazards, 0);

    assert_eq!(result.cycles.len(), 4);
    assert_eq!(snapshot(&result, 1).stages.fetch, vec!["ADD R1 R2 R3"]);
    assert_eq!(snapshot(&result, 2).stages.decode, vec!["ADD R1 R2 R3"]);
    assert_eq!(snapshot(&result, 3).stages.execute, vec!["ADD R1 R2 R3"]);
    assert_eq!(snapshot(&result, 4).stages.writeback, vec!["ADD R1 R2 R3"]);
    for cycle in 1..=4 {
        assert!(snapshot(&result, cycle).stalls.is_empty());
    }
}

#[test]
fn stage_keys_are_always_present_in_the_document() {
    let result = run_trace(&["ADD R1 R2 R3"]);
    let json = serde_json::to_value(&result).unwrap();
    let stages = &json["cycles"][0]["stages"];
    for key in ["FETCH", "DECODE", "ISSUE", "EXECUTE", "WRITEBACK"] {
        assert!(stages[key].is_array(), "missing stage key {key}");
    }
}

// ══════════════════════════════════════════════════════════
// 2. RAW hazards
// ══════════════════════════════════════════════════════════

#[test]
fn raw_dependency_stalls_consumer_in_decode() {
    let result = run_trace(&["ADD R1 R2 R3", "ADD R4 R1 R5"]);

    assert_eq!(result.stats.total_cycles, 6);
    assert_eq!(result.stats.instructions_completed, 2);
    assert_eq!(result.stats.raw_hazards, 2);
    assert_eq!(result.stats.total_stalls, 2);
    assert_eq!(result.stats.structural_hazards, 0);

    // Cycle 3: producer executes, consumer blocked in decode.
    let c3 = snapshot(&result, 3);
    assert_eq!(c3.stages.execute, vec!["ADD R1 R2 R3"]);
    assert_eq!(c3.stages.decode, vec!["ADD R4 R1 R5"]);
    assert_eq!(c3.stalls.len(), 1);
    assert_eq!(c3.stalls[0].instruction, "ADD R4 R1 R5");
    assert_eq!(c3.stalls[0].reason, "RAW on R1 (writer: I1)");

    // Cycle 4: producer writes back, consumer still blocked.
    let c4 = snapshot(&result, 4);
    assert_eq!(c4.stages.writeback, vec!["ADD R1 R2 R3"]);
    assert_eq!(c4.stalls.len(), 1);

    // Cycle 5: consumer finally executes; no stall recorded.
    let c5 = snapshot(&result, 5);
    assert_eq!(c5.stages.execute, vec!["ADD R4 R1 R5"]);
    assert!(c5.stalls.is_empty());
}

#[test]
fn raw_through_divide_counts_every_blocked_cycle() {
    let result = run_trace(&["DIV R1 R2 R3", "ADD R4 R1 R5"]);

    // The divide occupies EXECUTE for 8 cycles; the dependent add is
    // blocked from cycle 3 through the divide's writeback cycle.
    assert_eq!(result.stats.raw_hazards, 9);
    assert_eq!(result.stats.total_stalls, 9);
    assert_eq!(result.stats.total_cycles, 13);
    assert_eq!(result.stats.instructions_completed, 2);
    assert_eq!(execute_occupancy(&result, "DIV R1 R2 R3"), 8);
}

#[test]
fn branch_reading_busy_register_stalls() {
    let result = run_trace(&["ADD R1 R2 R3", "BEQ R1 R0 2"]);

    assert_eq!(result.stats.raw_hazards, 2);
    assert_eq!(result.stats.instructions_completed, 2);
    assert_eq!(result.stats.total_cycles, 6);
    assert_eq!(
        snapshot(&result, 3).stalls[0].reason,
        "RAW on R1 (writer: I1)"
    );
}

// ══════════════════════════════════════════════════════════
// 3. Structural hazards
// ══════════════════════════════════════════════════════════

#[test]
fn third_alu_op_stalls_one_cycle() {
    let result = run_trace(&["ADD R1 R2 R3", "SUB R4 R5 R6", "ADD R7 R8 R9"]);

    assert_eq!(result.stats.structural_hazards, 1);
    assert_eq!(result.stats.total_stalls, 1);
    assert_eq!(result.stats.raw_hazards, 0);
    assert_eq!(result.stats.total_cycles, 5);
    assert_eq!(result.stats.instructions_completed, 3);

    let c3 = snapshot(&result, 3);
    assert_eq!(
        c3.stages.execute,
        vec!["ADD R1 R2 R3", "SUB R4 R5 R6"],
        "ALU capacity is 2"
    );
    assert_eq!(c3.stalls.len(), 1);
    assert_eq!(c3.stalls[0].instruction, "ADD R7 R8 R9");
    assert_eq!(c3.stalls[0].reason, "Structural - ALU busy");
}

#[test]
fn unit_contention_is_per_issue_cycle() {
    // The pool is rebuilt every tick, so a single MEM unit limits who can
    // *issue* each cycle, not how many loads are in flight.
    let result = run_trace(&["LOAD R1 R2", "LOAD R3 R4"]);

    assert_eq!(result.stats.structural_hazards, 1);
    assert_eq!(
        snapshot(&result, 3).stalls[0].reason,
        "Structural - MEM busy"
    );
    // Both loads overlap in EXECUTE from cycle 4.
    let c4 = snapshot(&result, 4);
    assert_eq!(c4.stages.execute.len(), 2);
    assert_eq!(result.stats.instructions_completed, 2);
    assert_eq!(result.stats.total_cycles, 7);
}

#[test]
fn different_unit_classes_issue_together() {
    let result = run_trace(&["ADD R1 R2 R3", "FADD R4 R5 R6", "LOAD R7 R8", "JMP 2"]);

    assert_eq!(result.stats.total_stalls, 0);
    let c3 = snapshot(&result, 3);
    assert_eq!(c3.stages.execute.len(), 4, "one unit of each class");
    assert_eq!(result.stats.instructions_completed, 4);
    // The FADD (latency 4) is the last to retire.
    assert_eq!(result.stats.total_cycles, 7);
}

// ══════════════════════════════════════════════════════════
// 4. Throughput
// ══════════════════════════════════════════════════════════

#[test]
fn ten_independent_adds_approach_ipc_two() {
    let lines: Vec<String> = (0..10)
        .map(|i| format!("ADD R{} R{} R{}", 3 * i, 3 * i + 1, 3 * i + 2))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let result = run_trace(&refs);

    assert_eq!(result.stats.instructions_completed, 10);
    assert_eq!(result.stats.total_cycles, 8);
    assert!((result.stats.ipc - 1.25).abs() < 1e-9);
    assert_eq!(result.stats.raw_hazards, 0);
    assert_eq!(result.stats.structural_hazards, 20);
}

// ══════════════════════════════════════════════════════════
// 5. Source quirks, preserved
// ══════════════════════════════════════════════════════════

#[test]
fn store_value_register_creates_a_dependency() {
    // STORE marks its value register as a scoreboard write target, so a
    // later reader of that register stalls until the store retires.
    let result = run_trace(&["STORE R1 R2", "ADD R3 R1 R4"]);

    assert_eq!(result.stats.raw_hazards, 3);
    assert_eq!(
        snapshot(&result, 3).stalls[0].reason,
        "RAW on R1 (writer: I1)"
    );
    assert_eq!(result.stats.instructions_completed, 2);
    assert_eq!(result.stats.total_cycles, 7);
}

#[test]
fn later_writer_takes_register_ownership() {
    // WAW is unmodeled: the ADD overwrites the DIV's claim on R1, so the
    // SUB stalls on the ADD and proceeds once it retires, long before the
    // DIV does.
    let result = run_trace(&["DIV R1 R2 R3", "ADD R1 R4 R5", "SUB R6 R1 R7"]);

    assert_eq!(result.stats.waw_hazards, 0);
    assert_eq!(result.stats.raw_hazards, 2);
    assert_eq!(
        snapshot(&result, 3).stalls[0].reason,
        "RAW on R1 (writer: I2)"
    );
    // The SUB overlaps the still-running DIV in EXECUTE at cycle 5.
    let c5 = snapshot(&result, 5);
    assert_eq!(c5.stages.execute, vec!["DIV R1 R2 R3", "SUB R6 R1 R7"]);
    assert_eq!(result.stats.total_cycles, 11);
    assert_eq!(result.stats.instructions_completed, 3);
}

#[test]
fn nop_never_issues_and_hits_the_ceiling() {
    // Nothing in the pool answers to the ANY class, so a NOP stalls in
    // DECODE until the ceiling ends the run. The partial trace and stats
    // are still emitted.
    let config = SimConfig { max_cycles: 10 };
    let result = run_trace_with(&["NOP"], &config);

    assert_eq!(result.stats.total_cycles, 10);
    assert_eq!(result.stats.instructions_completed, 0);
    assert_eq!(result.stats.ipc, 0.0);
    assert_eq!(result.stats.structural_hazards, 8);
    assert_eq!(
        snapshot(&result, 3).stalls[0].reason,
        "Structural - ANY busy"
    );
    assert_eq!(result.cycles.len(), 10);
}

// ══════════════════════════════════════════════════════════
// 6. Boundary conditions
// ══════════════════════════════════════════════════════════

#[test]
fn empty_program_yields_empty_result() {
    let result = simulate(parse_program::<_, &str>([]), &SimConfig::default());

    assert_eq!(result.stats.total_cycles, 0);
    assert_eq!(result.stats.instructions_completed, 0);
    assert_eq!(result.stats.ipc, 0.0);
    assert!(result.cycles.is_empty());
}

#[test]
fn ceiling_cuts_a_long_run_short() {
    let config = SimConfig { max_cycles: 3 };
    let result = run_trace_with(&["FDIV R1 R2 R3"], &config);

    assert_eq!(result.stats.total_cycles, 3);
    assert_eq!(result.stats.instructions_completed, 0);
    assert_eq!(result.cycles.len(), 3);
}
