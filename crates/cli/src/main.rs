//! Memory-interleaving simulator CLI.
//!
//! This binary provides a single entry point for running simulations. It performs:
//! 1. **Run:** Drive an interleaving simulation from flags or a JSON config,
//!    paced through the driver or flat-out, and print a sectioned report.
//! 2. **Cache:** Walk a list of addresses through the cache snapshot model and
//!    print the per-access hit/miss outcomes.

use clap::{Parser, Subcommand};
use std::{fs, process};

use ilvsim_core::common::Addr;
use ilvsim_core::config::{
    AccessPattern, CacheModelConfig, DriverConfig, InterleaveConfig, InterleavingKind,
};
use ilvsim_core::model::cache::{self, CacheSnapshot};
use ilvsim_core::sim::InterleaveSimulator;
use ilvsim_core::stats::RunSummary;

#[derive(Parser, Debug)]
#[command(
    name = "ilvsim",
    author,
    version,
    about = "Memory-interleaving simulator",
    long_about = "Run a deterministic memory-interleaving simulation or a one-shot cache walkthrough.\n\nExamples:\n  ilvsim run --kind bank --pattern stride --modules 8 --steps 500\n  ilvsim run --config sweep.json --json\n  ilvsim cache --sets 1 --ways 2 0x000 0x080 0x000 0x100"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an interleaving simulation.
    Run {
        /// Placement strategy: bit, word, page, or bank.
        #[arg(long)]
        kind: Option<String>,

        /// Access pattern: sequential, random, stride, or chase.
        #[arg(long)]
        pattern: Option<String>,

        /// Number of memory modules.
        #[arg(long)]
        modules: Option<usize>,

        /// Block size in bytes (power of two).
        #[arg(long)]
        block: Option<usize>,

        /// Stride multiplier in blocks (stride pattern).
        #[arg(long)]
        stride: Option<usize>,

        /// Simulated memory size in MiB.
        #[arg(long)]
        memory: Option<usize>,

        /// Seed for the random access pattern.
        #[arg(long)]
        seed: Option<u64>,

        /// Number of accesses to simulate.
        #[arg(long, default_value_t = 200)]
        steps: u64,

        /// Milliseconds between paced steps; 0 runs flat-out.
        #[arg(long, default_value_t = 0)]
        interval: u64,

        /// JSON file with an interleaving configuration (flags override it).
        #[arg(long)]
        config: Option<String>,

        /// Emit the summary as JSON instead of the sectioned report.
        #[arg(long)]
        json: bool,

        /// Suppress per-step progress output in paced mode.
        #[arg(long)]
        quiet: bool,
    },

    /// Walk addresses through the cache snapshot model.
    Cache {
        /// Number of sets (power of two).
        #[arg(long, default_value_t = 16)]
        sets: usize,

        /// Associativity (lines per set).
        #[arg(long, default_value_t = 2)]
        ways: usize,

        /// Line size in bytes (power of two).
        #[arg(long, default_value_t = 64)]
        line: usize,

        /// Addresses to access in order (decimal or 0x-prefixed hex).
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("ILVSIM_LOG"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            kind,
            pattern,
            modules,
            block,
            stride,
            memory,
            seed,
            steps,
            interval,
            config,
            json,
            quiet,
        } => cmd_run(
            &RunFlags {
                kind,
                pattern,
                modules,
                block,
                stride,
                memory,
                seed,
            },
            steps,
            interval,
            config,
            json,
            quiet,
        ),
        Commands::Cache {
            sets,
            ways,
            line,
            addresses,
        } => cmd_cache(sets, ways, line, &addresses),
    }
}

/// Model-configuration overrides collected from the command line.
struct RunFlags {
    kind: Option<String>,
    pattern: Option<String>,
    modules: Option<usize>,
    block: Option<usize>,
    stride: Option<usize>,
    memory: Option<usize>,
    seed: Option<u64>,
}

/// Runs the simulator: builds the config, drives the run (paced or flat-out),
/// and prints the report.
fn cmd_run(
    flags: &RunFlags,
    steps: u64,
    interval: u64,
    config_path: Option<String>,
    json: bool,
    quiet: bool,
) {
    let mut config = config_path.map_or_else(InterleaveConfig::default, |path| load_config(&path));

    if let Some(kind) = flags.kind.as_deref() {
        config.kind = parse_kind(kind);
    }
    if let Some(pattern) = flags.pattern.as_deref() {
        config.pattern = parse_pattern(pattern);
    }
    if let Some(modules) = flags.modules {
        config.modules = modules;
    }
    if let Some(block) = flags.block {
        config.block_bytes = block;
    }
    if let Some(stride) = flags.stride {
        config.stride = stride;
    }
    if let Some(memory) = flags.memory {
        config.memory_mib = memory;
    }
    if let Some(seed) = flags.seed {
        config.seed = seed;
    }

    let driver_config = DriverConfig {
        total_steps: steps,
        step_interval_ms: interval,
    };

    let sim = InterleaveSimulator::new(config, &driver_config).unwrap_or_else(|e| {
        eprintln!("Error: invalid configuration: {e}");
        process::exit(1);
    });

    if !json {
        let config = sim.config();
        println!(
            "[*] Interleaving run: {:?}/{:?}  modules={}  block={} B  steps={}",
            config.kind, config.pattern, config.modules, config.block_bytes, steps
        );
    }

    let state = if interval > 0 {
        if !quiet && !json {
            let stride = (steps / 10).max(1);
            sim.driver().set_observer(move |_state, i| {
                let done = i + 1;
                if done % stride == 0 || done == steps {
                    println!("[*] step {done}/{steps}");
                }
            });
        }
        sim.start();
        sim.driver().wait();
        sim.snapshot()
    } else {
        sim.run_to_completion().unwrap_or_else(|e| {
            eprintln!("\n[!] FATAL: {e}");
            process::exit(1);
        })
    };

    let summary = RunSummary::from_state(sim.config(), &state);
    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error serializing summary: {e}");
                process::exit(1);
            }
        }
    } else {
        summary.print();
    }
}

/// Walks the given addresses through a fresh cache snapshot, printing each
/// access outcome and the final occupancy.
fn cmd_cache(sets: usize, ways: usize, line: usize, addresses: &[String]) {
    let config = CacheModelConfig {
        sets,
        ways,
        line_bytes: line,
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: invalid cache geometry: {e}");
        process::exit(1);
    }

    println!(
        "[*] Cache walkthrough: {sets} sets x {ways} ways, {line}-byte lines"
    );

    let mut snapshot = CacheSnapshot::new(&config);
    for raw in addresses {
        let addr = parse_address(raw);
        let (hit, next) = cache::access(&snapshot, &config, addr);
        println!(
            "  {:#010x}  {}",
            addr.val(),
            if hit { "hit " } else { "miss" }
        );
        snapshot = next;
    }

    println!(
        "[*] {} of {} lines occupied after {} accesses",
        snapshot.occupied_lines(),
        sets * ways,
        snapshot.access_count
    );
}

/// Loads an interleaving configuration from a JSON file.
fn load_config(path: &str) -> InterleaveConfig {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {path}: {e}");
        process::exit(1);
    });
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        eprintln!("Error parsing config {path}: {e}");
        process::exit(1);
    })
}

/// Parses a placement strategy name, exiting with a usage error on junk.
fn parse_kind(raw: &str) -> InterleavingKind {
    match raw.to_ascii_lowercase().as_str() {
        "bit" => InterleavingKind::Bit,
        "word" => InterleavingKind::Word,
        "page" => InterleavingKind::Page,
        "bank" => InterleavingKind::Bank,
        _ => {
            eprintln!("Error: unknown kind '{raw}' (expected bit, word, page, or bank)");
            process::exit(1);
        }
    }
}

/// Parses an access pattern name, exiting with a usage error on junk.
fn parse_pattern(raw: &str) -> AccessPattern {
    match raw.to_ascii_lowercase().as_str() {
        "sequential" | "seq" => AccessPattern::Sequential,
        "random" => AccessPattern::Random,
        "stride" => AccessPattern::Stride,
        "chase" | "pointer-chase" | "pointer-chasing" => AccessPattern::PointerChase,
        _ => {
            eprintln!(
                "Error: unknown pattern '{raw}' (expected sequential, random, stride, or chase)"
            );
            process::exit(1);
        }
    }
}

/// Parses a decimal or 0x-prefixed hexadecimal address.
fn parse_address(raw: &str) -> Addr {
    let parsed = raw.strip_prefix("0x").map_or_else(
        || raw.parse::<u64>(),
        |hex| u64::from_str_radix(hex, 16),
    );
    match parsed {
        Ok(value) => Addr::new(value),
        Err(_) => {
            eprintln!("Error: invalid address '{raw}'");
            process::exit(1);
        }
    }
}
