//! stowage CLI: replay cache scenarios and inspect the resulting stats.

mod scenario;

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use stowage_core::config::CacheConfig;
use stowage_core::Clock;
use stowage_engine::{CacheManager, CacheStats, ManualClock, SweepOutcome};

use scenario::{parse_scenario, Event};

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Stowage: budget-constrained resource cache with time-based eviction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario from a YAML file and print final stats
    Run {
        /// Path to the scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Total budget in bytes (overrides config)
        #[arg(long)]
        total_budget: Option<u64>,

        /// Maintenance interval in ticks (overrides config)
        #[arg(long)]
        interval: Option<u64>,

        /// Print final stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a scenario YAML file (syntax check)
    Validate {
        /// Path to the scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,
    },

    /// Print the default configuration as YAML
    Defaults,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            total_budget,
            interval,
            json,
        } => {
            if let Err(e) = run_scenario(&scenario, total_budget, interval, json) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { scenario } => {
            if let Err(e) = validate_scenario(&scenario) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Scenario is valid");
        }
        Commands::Defaults => {
            if let Err(e) = print_defaults() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_scenario(
    scenario_path: &PathBuf,
    total_budget: Option<u64>,
    interval: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(scenario_path)?;
    let parsed = parse_scenario(&yaml_content)?;

    let mut config = parsed.config.clone().unwrap_or_else(CacheConfig::from_env);
    if let Some(bytes) = total_budget {
        config.total_budget_bytes = bytes;
    }
    if let Some(ticks) = interval {
        config.maintenance_interval = ticks;
    }

    // Scenarios own their clock, so replays are deterministic.
    let clock = ManualClock::new();
    let mut manager = CacheManager::with_clock(config, Box::new(clock.clone()))?;

    let mut sweeps: Vec<SweepOutcome> = Vec::new();
    for event in &parsed.events {
        match event {
            Event::Register {
                id,
                category,
                size_bytes,
                is_static,
            } => {
                manager.register(id, vec![0u8; *size_bytes as usize], category, *is_static)?;
            }
            Event::Touch { id } => {
                manager.touch(id);
            }
            Event::Unregister { id } => {
                manager.unregister(id);
            }
            Event::Advance { ticks } => {
                clock.advance(*ticks);
            }
            Event::Tick => {
                if let Some(outcome) = manager.tick(clock.now()) {
                    println!(
                        "  sweep ({}): freed {} of {} bytes ({} records)",
                        outcome.mode, outcome.freed_bytes, outcome.target_bytes, outcome.evicted
                    );
                    sweeps.push(outcome);
                }
            }
        }
    }

    manager.verify_accounting()?;
    let stats = manager.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats, &sweeps);
    }

    Ok(())
}

fn validate_scenario(scenario_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(scenario_path)?;
    let parsed = parse_scenario(&yaml_content)?;
    if let Some(config) = &parsed.config {
        config.validate()?;
    }
    Ok(())
}

fn print_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let config = CacheConfig::default();
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

fn print_stats(stats: &CacheStats, sweeps: &[SweepOutcome]) {
    println!("Cache Replay Report");
    println!("===================");
    println!();
    println!(
        "Memory: {} of {} bytes used ({:.1}%)",
        stats.memory.used_bytes,
        stats.memory.total_bytes,
        stats.memory.usage_fraction * 100.0
    );
    println!(
        "Pressure: low={}, critical={}",
        stats.memory.is_low, stats.memory.is_critical
    );
    println!();
    println!("Categories:");
    for (category, cat_stats) in &stats.categories {
        match cat_stats.limit_bytes {
            Some(limit) => println!(
                "  {}: {} bytes (limit {})",
                category, cat_stats.used_bytes, limit
            ),
            None => println!("  {}: {} bytes (unlimited)", category, cat_stats.used_bytes),
        }
    }
    println!();
    println!("Resident records: {}", stats.resident_records);

    let freed: u64 = sweeps.iter().map(|s| s.freed_bytes).sum();
    let unmet = sweeps.iter().filter(|s| !s.met_target()).count();
    println!("Sweeps: {} (freed {} bytes, {} under target)", sweeps.len(), freed, unmet);
}
