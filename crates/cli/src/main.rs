//! Tomasulo scheduling core CLI.
//!
//! This binary drives the core one step at a time and prints what happened. It performs:
//! 1. **Demo:** Runs the built-in three-instruction program with the default configuration.
//! 2. **Program run:** Loads a JSON program (and optionally a JSON configuration) and runs it to completion.
//!
//! Both modes print one line per step, the retired results in program order,
//! and the requested statistics sections.

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::{fs, process};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tomasulo_core::config::Config;
use tomasulo_core::isa::opcode::Operation;
use tomasulo_core::sim::loader;
use tomasulo_core::stats::STATS_SECTIONS;
use tomasulo_core::{Program, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "tomasulo",
    author,
    version,
    about = "Step-driven Tomasulo out-of-order core",
    long_about = "Run the built-in demonstration or a JSON program through a Tomasulo core.\n\nExamples:\n  tomasulo demo\n  tomasulo run --program prog.json --config core.json --stats pipeline branch\n  RUST_LOG=tomasulo_core=trace tomasulo demo"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the built-in three-instruction demonstration.
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run a program described in JSON.
    Run {
        /// Program file.
        #[arg(short, long)]
        program: PathBuf,

        /// Core configuration file (JSON). Omitted fields keep their defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Statistics sections to print (all when omitted).
    #[arg(
        long,
        num_args = 1..,
        value_parser = PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
    )]
    stats: Vec<String>,

    /// Log every dispatch, issue, broadcast and retire, and dump the RS and CDB after each step.
    #[arg(long)]
    trace: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { output } => {
            init_tracing(output.trace);
            let config = Config::default();
            run(config, Program::demo(), &output);
        }
        Commands::Run {
            program,
            config,
            output,
        } => {
            init_tracing(output.trace);
            let config = config.map_or_else(Config::default, |path| load_config(&path));
            let space = config.pipeline.tag_space().unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                process::exit(1);
            });
            let program = loader::load_program(&program, space).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                process::exit(1);
            });
            info!(instructions = program.len(), "program loaded");
            run(config, program, &output);
        }
    }
}

/// Installs the log subscriber. `RUST_LOG` wins over `--trace` when set.
fn init_tracing(trace: bool) {
    let default = if trace { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a JSON configuration file, exiting on any error.
fn load_config(path: &Path) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {e}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {}: {e}", path.display());
        process::exit(1);
    })
}

/// Runs `program` to completion, printing the step trace, the retired results
/// and the statistics. Exits with code 1 if the run fails.
fn run(mut config: Config, program: Program, output: &OutputArgs) {
    config.general.trace |= output.trace;

    println!("Configuration:");
    println!(
        "  RS: {} entries  ROB: {} slots  Tags: {} bits  Max cycles: {}",
        config.pipeline.rs_entries,
        config.pipeline.rob_entries,
        config.pipeline.tag_bits,
        config.general.max_cycles
    );
    println!();

    let mut sim = Simulator::new(&config, program).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let result = sim.run_with(|report| println!("{report}"));

    println!();
    println!("Retired:");
    for entry in &sim.retired {
        println!(
            "  {:<5} {:<4} value {:>11}  flags {:#010x}",
            entry.tag.to_string(),
            entry.opcode.decode().map_or("?", Operation::mnemonic),
            entry.value,
            entry.flags
        );
    }

    sim.core.stats.print_sections(&output.stats);

    if let Err(e) = result {
        eprintln!("\n[!] {e}");
        process::exit(1);
    }
}
