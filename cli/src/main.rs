//! cpuburn - synthetic CPU load generator
//!
//! Spins `--cores` threads of MT19937 work at `--utilization` percent duty
//! cycle for `--time` seconds, then prints per-thread and total counts.
//! Set `RUST_LOG=debug` for per-worker diagnostics on stderr.

use anyhow::{Context, Result};
use clap::Parser;
use cpuburn_core::models::report::startup_line;
use cpuburn_core::orchestrator::{
    BurnConfig, Orchestrator, DEFAULT_BATCH_SIZE, DEFAULT_DURATION_SECS, DEFAULT_FREQUENCY_HZ,
    DEFAULT_THREADS, DEFAULT_UTILIZATION,
};
use cpuburn_core::rng::DEFAULT_KEY;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "cpuburn")]
#[command(version)]
#[command(about = "Multi-threaded CPU burner with a fixed duty cycle")]
struct Cli {
    /// Run time in seconds
    #[arg(short = 't', long = "time", default_value_t = DEFAULT_DURATION_SECS)]
    time: u64,

    /// Target CPU utilization per thread, in percent (0-100)
    #[arg(short = 'u', long, default_value_t = DEFAULT_UTILIZATION)]
    utilization: u32,

    /// Number of worker threads
    #[arg(short = 'c', long, default_value_t = DEFAULT_THREADS)]
    cores: usize,

    /// Generator calls between elapsed-time checks
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: u64,

    /// Control frequency in Hz
    #[arg(long, default_value_t = DEFAULT_FREQUENCY_HZ)]
    frequency: u64,

    /// Seed key words, comma separated (decimal or 0x hex)
    #[arg(long, value_delimiter = ',', value_parser = parse_word)]
    key: Vec<u32>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn burn_config(&self) -> BurnConfig {
        let seed_key = if self.key.is_empty() {
            DEFAULT_KEY.to_vec()
        } else {
            self.key.clone()
        };

        BurnConfig {
            duration_secs: self.time,
            utilization: self.utilization,
            threads: self.cores,
            seed_key,
            batch_size: self.batch_size,
            frequency_hz: self.frequency,
        }
    }
}

fn parse_word(s: &str) -> Result<u32, String> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => {
            u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hexadecimal word: {}", e))
        }
        None => s
            .parse::<u32>()
            .map_err(|e| format!("Invalid key word: {}", e)),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.burn_config();
    info!("config: {:?}", config);

    let orchestrator = Orchestrator::new(config)?;

    if !cli.json {
        let config = orchestrator.config();
        println!(
            "{}",
            startup_line(config.duration_secs, config.threads, config.utilization)
        );
    }

    let report = orchestrator.run()?;

    if cli.json {
        println!("{}", report.to_json().context("serializing report")?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
