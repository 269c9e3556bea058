//! Tomasulo simulator CLI.
//!
//! This binary drives the scheduling engine interactively. It performs:
//! 1. **Loading:** Reads the instruction file (prompting for the path when
//!    not given) and an optional JSON configuration override.
//! 2. **Stepping:** Prints the machine status and advances one cycle per
//!    keystroke, or free-runs with `--batch`.
//! 3. **Reporting:** Prints the final status, the register file, and the
//!    simulation statistics.

mod render;

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::{fs, process};

use tomsim_core::config::Config;
use tomsim_core::engine::Engine;
use tomsim_core::isa::parser;

#[derive(Parser, Debug)]
#[command(
    name = "tomsim",
    author,
    version,
    about = "Cycle-accurate Tomasulo/ROB scheduling simulator",
    long_about = "Step a short program of arithmetic and memory instructions through a \
                  Tomasulo datapath with a reorder buffer, one clock cycle per keystroke.\n\n\
                  Examples:\n  tomsim programs/example.txt\n  tomsim --batch programs/example.txt\n  \
                  tomsim --config machine.json programs/example.txt"
)]
struct Cli {
    /// Instruction file to simulate (prompted for when omitted).
    file: Option<String>,

    /// Run to completion without waiting for keystrokes.
    #[arg(long)]
    batch: bool,

    /// Emit per-stage trace lines on stderr.
    #[arg(long)]
    trace: bool,

    /// JSON configuration override (station pools, latencies, sizes).
    #[arg(long)]
    config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => load_config(&path),
        None => Config::default(),
    };
    if cli.trace {
        config.general.trace = true;
    }

    let path = cli.file.unwrap_or_else(prompt_for_path);
    let program = parser::load_program(&path).unwrap_or_else(|err| {
        eprintln!("[!] cannot open instruction file '{}': {}", path, err);
        process::exit(1);
    });

    let mut engine = Engine::new(program, &config);

    let stdin = io::stdin();
    while !engine.is_done() {
        render::print_status(&engine.snapshot());
        if !cli.batch {
            print!("\nAdvance [ENTER] ");
            io::stdout().flush().ok();
            let mut line = String::new();
            if stdin.lock().read_line(&mut line).is_err() {
                break;
            }
        }
        engine.step();
    }

    println!("\n=== Simulation complete ===");
    render::print_status(&engine.snapshot());
    render::print_registers(&engine.snapshot());
    engine.stats().print();
}

/// Reads the instruction file path from stdin.
fn prompt_for_path() -> String {
    print!("Instruction file: ");
    io::stdout().flush().ok();
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() || line.trim().is_empty() {
        eprintln!("[!] no instruction file given");
        process::exit(1);
    }
    line.trim().to_string()
}

/// Loads a JSON configuration override, exiting on error.
fn load_config(path: &str) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("[!] cannot open config file '{}': {}", path, err);
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|err| {
        eprintln!("[!] bad config file '{}': {}", path, err);
        process::exit(1);
    })
}
