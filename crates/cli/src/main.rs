//! Pipeline simulator CLI.
//!
//! Reads an instruction trace from a text file named on the command line,
//! or a JSON `{"instructions": [...]}` payload from standard input, runs
//! the engine, and emits the run result as a single JSON document on
//! standard output. Exit code 0 on success; on malformed input a JSON
//! `{"error": ...}` document is emitted and the exit code is non-zero.

use clap::Parser;
use serde::Serialize;
use std::io;
use std::process;

use pipesim_core::sim::loader;
use pipesim_core::stats::print_timeline;
use pipesim_core::trace::RunResult;
use pipesim_core::{SimConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Superscalar pipeline hazard simulator",
    long_about = "Simulate an instruction trace through a five-stage superscalar\n\
                  out-of-order pipeline and emit the per-cycle trace and statistics\n\
                  as JSON.\n\n\
                  Examples:\n  \
                  pipesim traces/demo.txt\n  \
                  pipesim traces/demo.txt --summary --max-cycles 1000\n  \
                  echo '{\"instructions\":[\"ADD R1 R2 R3\"]}' | pipesim"
)]
struct Cli {
    /// Trace file, one instruction per line (`#` comments allowed). Reads
    /// a JSON payload from standard input when omitted.
    file: Option<String>,

    /// Cycle ceiling for runaway traces.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Pretty-print the result document.
    #[arg(long)]
    pretty: bool,

    /// Print a human-readable summary and instruction timeline to stderr.
    #[arg(long)]
    summary: bool,
}

#[derive(Serialize)]
struct Envelope {
    result: RunResult,
}

#[derive(Serialize)]
struct ErrorDocument {
    error: String,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = SimConfig::default();
    if let Some(max_cycles) = cli.max_cycles {
        config.max_cycles = max_cycles;
    }

    let program = match &cli.file {
        Some(path) => loader::load_file(path),
        None => loader::load_json(io::stdin().lock()),
    };
    let program = match program {
        Ok(program) => program,
        Err(err) => fail(&err.to_string()),
    };

    let mut simulator = Simulator::new(program, &config);
    simulator.run();

    if cli.summary {
        simulator.stats().print_summary();
        print_timeline(&simulator.timeline());
    }

    let document = Envelope {
        result: simulator.into_result(),
    };
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    match rendered {
        Ok(json) => println!("{json}"),
        Err(err) => fail(&format!("could not serialize result: {err}")),
    }
}

/// Emits an error document on stdout and exits non-zero.
fn fail(message: &str) -> ! {
    let document = ErrorDocument {
        error: message.to_string(),
    };
    match serde_json::to_string(&document) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{{\"error\":\"{message}\"}}"),
    }
    process::exit(1);
}
