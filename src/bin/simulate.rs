//! Gacha balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 200 runs of 50 ten-pulls
//!   cargo run --bin simulate -- -n 50 -p 200    # 50 long sessions
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use gacha::simulator::{run_simulation, SimConfig};
use gacha::utils::logging::init_tracing;
use std::env;

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              GACHA BALANCE SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Ten-pulls/run:  {}", config.ten_pulls_per_run);
    println!("  Fusion trials:  {}", config.fusion_trials);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "gacha_sim_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "-p" | "--pulls" => {
                if i + 1 < args.len() {
                    config.ten_pulls_per_run = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "-f" | "--fusions" => {
                if i + 1 < args.len() {
                    config.fusion_trials = args[i + 1].parse().unwrap_or(2000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "--pity" => {
                config = SimConfig::pity_analysis();
            }
            "--fusion-only" => {
                config = SimConfig::fusion_analysis(config.fusion_trials);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Gacha Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of sessions (default: 200)");
    println!("    -p, --pulls <P>     Ten-pulls per session (default: 50)");
    println!("    -f, --fusions <F>   Fusion trials per batch shape (default: 2000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -v, --verbose       Per-run output");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick check (10 short sessions)");
    println!("    --pity              Long sessions for drought analysis");
    println!("    --fusion-only       Fusion odds only");
    println!("    -h, --help          Show this help");
}
