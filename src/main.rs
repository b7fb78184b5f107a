use anyhow::Result;
use clap::Parser;
use log::{info, error, debug};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use vec2_common::{BenchConfig, BenchReport};
use vec2_engine::bench::{BenchRunner, SCENARIOS};

/// Command-line arguments for the benchmark runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Benchmark configuration file (.toml)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured iteration count
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Run a single scenario instead of all of them
    #[arg(short, long)]
    scenario: Option<String>,
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    let args = Args::parse();
    info!("Starting Vec2 benchmark runner...");

    // --- Load Configuration ---
    let mut config = BenchConfig::load(&args.config)?;
    if let Some(iterations) = args.iterations {
        if iterations == 0 {
            anyhow::bail!("--iterations must be greater than 0.");
        }
        config.run.iterations = iterations;
    }
    debug!("Benchmark configuration: {:#?}", config);

    let mut runner = BenchRunner::new(config);
    let start_time = Instant::now();

    match args.scenario.as_deref() {
        Some(name) => {
            if let Err(e) = runner.run(name) {
                error!("Scenario '{}' failed: {}", name, e);
                anyhow::bail!("Benchmark run failed.");
            }
        }
        None => {
            info!("Running scenarios {:?}", SCENARIOS);
            runner.run_all()?;
        }
    }

    info!("Benchmarks finished in {:.3} seconds.", start_time.elapsed().as_secs_f64());

    // --- Save Reports ---
    let output = runner.config().output.clone();
    let reports = runner.reports();
    if output.save_stats {
        let output_format = output.format.as_deref().unwrap_or("json");
        write_reports(&output.base_filename, output_format, reports);
    } else {
        info!("Skipping saving reports as per config (save_stats is false).");
    }

    if output.save_csv {
        let filename = format!("{}_reports.csv", output.base_filename);
        match csv::Writer::from_path(&filename) {
            Ok(mut writer) => {
                for report in reports {
                    writer.serialize(report)?;
                }
                writer.flush()?;
                info!("Reports saved to {}", filename);
            }
            Err(e) => error!("Error saving CSV file '{}': {}", filename, e),
        }
    }

    info!("Done.");
    Ok(())
}

/// Writes `reports` in the requested format. Failures are logged, not fatal.
fn write_reports(base_filename: &str, output_format: &str, reports: &[BenchReport]) {
    match output_format {
        "json" => write_json(base_filename, reports),
        "bincode" => {
            // Binary format (much more compact)
            let filename = format!("{}_reports.bin", base_filename);
            match File::create(&filename) {
                Ok(file) => match bincode::serialize_into(file, reports) {
                    Ok(_) => info!("Reports saved to {} (binary format)", filename),
                    Err(e) => error!("Error serializing reports to bincode: {}", e),
                },
                Err(e) => error!("Error creating report file '{}': {}", filename, e),
            }
        }
        "messagepack" => {
            // MessagePack format (compact and cross-platform)
            let filename = format!("{}_reports.msgpack", base_filename);
            match &mut File::create(&filename) {
                Ok(file) => match rmp_serde::encode::write(file, reports) {
                    Ok(_) => info!("Reports saved to {} (MessagePack format)", filename),
                    Err(e) => error!("Error serializing reports to MessagePack: {}", e),
                },
                Err(e) => error!("Error creating report file '{}': {}", filename, e),
            }
        }
        _ => {
            error!("Unknown output format: {}. Using JSON instead.", output_format);
            write_json(base_filename, reports);
        }
    }
}

fn write_json(base_filename: &str, reports: &[BenchReport]) {
    let filename = format!("{}_reports.json", base_filename);
    match File::create(&filename) {
        Ok(mut file) => match serde_json::to_string_pretty(reports) {
            Ok(json_string) => {
                if let Err(e) = file.write_all(json_string.as_bytes()) {
                    error!("Error writing report JSON to file '{}': {}", filename, e);
                } else {
                    info!("Reports saved to {}", filename);
                }
            }
            Err(e) => error!("Error serializing reports to JSON: {}", e),
        },
        Err(e) => error!("Error creating report file '{}': {}", filename, e),
    }
}
