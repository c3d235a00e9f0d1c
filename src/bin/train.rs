//! Headless training CLI.
//!
//! Evolve controllers generation after generation without a terminal UI.
//!
//! Usage:
//!   cargo run --bin train -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin train                         # 50 generations of 50 birds
//!   cargo run --bin train -- -g 10 -p 20          # 10 generations of 20 birds
//!   cargo run --bin train -- --seed 42 --json     # Reproducible, save report

use flappy_evolve::core::config::SimConfig;
use flappy_evolve::simulator::{run_training, TrainConfig};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (mut config, config_path) = parse_args(&args);

    if let Some(path) = config_path {
        match SimConfig::from_json_file(&path) {
            Ok(sim) => config.sim = sim,
            Err(e) => {
                eprintln!("Invalid config {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    if config.verbosity > 0 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║                  FLAPPY EVOLVE TRAINER                        ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Generations:    {}", config.generations);
        println!("  Population:     {}", config.evolution.population_size);
        println!("  Fitness Goal:   {:.1}", config.evolution.fitness_threshold);
        match config.max_ticks_per_generation {
            Some(ticks) => println!("  Max Ticks:      {}", ticks),
            None => println!("  Max Ticks:      unlimited"),
        }
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Training...");
        println!();
    }

    let report = match run_training(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Invalid training configuration: {}", e);
            process::exit(1);
        }
    };

    if config.verbosity > 0 {
        println!("{}", report.to_text());
    }

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "training_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(e) = std::fs::write(&filename, json) {
            eprintln!("Failed to write {}: {}", filename, e);
            process::exit(1);
        }
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> (TrainConfig, Option<PathBuf>) {
    let mut config = TrainConfig::default();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-g" | "--generations" => {
                if i + 1 < args.len() {
                    config.generations = args[i + 1].parse().unwrap_or(config.generations);
                    i += 1;
                }
            }
            "-p" | "--population" => {
                if i + 1 < args.len() {
                    config.evolution.population_size = args[i + 1]
                        .parse()
                        .unwrap_or(config.evolution.population_size);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--max-ticks" => {
                if i + 1 < args.len() {
                    // 0 means no limit
                    config.max_ticks_per_generation =
                        args[i + 1].parse().ok().filter(|&ticks: &u64| ticks > 0);
                    i += 1;
                }
            }
            "--fitness" => {
                if i + 1 < args.len() {
                    config.evolution.fitness_threshold = args[i + 1]
                        .parse()
                        .unwrap_or(config.evolution.fitness_threshold);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "--quick" => {
                let seed = config.seed.unwrap_or(42);
                config = TrainConfig::quick(seed);
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, config_path)
}

fn print_help() {
    println!("Flappy Evolve Trainer");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin train -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -g, --generations <N>  Generations to run (default: 50)");
    println!("    -p, --population <N>   Birds per generation (default: 50)");
    println!("    -s, --seed <S>         Random seed for reproducibility");
    println!("    -t, --max-ticks <T>    Tick limit per generation, 0 = none (default: 20,000)");
    println!("    --fitness <F>          Stop once a bird reaches this fitness (default: 100)");
    println!("    -c, --config <FILE>    Load world parameters from a JSON file");
    println!("    -v, --verbose          Print every generation");
    println!("    -q, --quiet            Print nothing but errors");
    println!("    --json                 Save JSON report");
    println!("    --quick                Quick run (5 generations of 20 birds)");
    println!("    -h, --help             Show this help");
    println!();
    println!("Set RUST_LOG=info (or debug) for engine logs.");
}
