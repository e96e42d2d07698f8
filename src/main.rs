use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tilt_attitude::ingest::write_samples;
use tilt_attitude::sim::{generate_samples, SimConfig};
use tilt_attitude::{run, RunConfig};

#[derive(Debug, Parser)]
#[command(author, version, about = "Roll/pitch estimation from accelerometer logs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate roll and pitch for every line of an accelerometer log
    Estimate {
        /// JSON run configuration; flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Input log, `timestamp_ms;x;y;z` per line [mg]
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output file, `timestamp_ms; roll; pitch` per line [rad]
        #[arg(long)]
        output: Option<PathBuf>,

        /// Estimation threads
        #[arg(long)]
        workers: Option<usize>,

        /// Write the run summary as JSON
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Write a synthetic accelerometer log for a fixed attitude
    Simulate {
        #[arg(long)]
        output: PathBuf,

        #[arg(long, default_value_t = 1000)]
        samples: usize,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        roll_deg: f64,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pitch_deg: f64,

        /// Per-axis noise sigma [mg]
        #[arg(long, default_value_t = 5.0)]
        noise_mg: f64,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Estimate {
            config,
            input,
            output,
            workers,
            summary,
        } => {
            let mut cfg = match config {
                Some(path) => RunConfig::from_json_file(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => RunConfig::default(),
            };
            if let Some(v) = input {
                cfg.input = v;
            }
            if let Some(v) = output {
                cfg.output = v;
            }
            if let Some(v) = workers {
                cfg.workers = v;
            }

            let result = run(&cfg)?;

            println!("Samples: {}", result.samples);
            if let (Some(first), Some(last)) = (result.first_timestamp_ms, result.last_timestamp_ms) {
                println!("Time span: {first} .. {last} ms");
            }
            println!(
                "Mean |roll| / |pitch|: {:.3} deg | {:.3} deg",
                result.mean_abs_roll_deg, result.mean_abs_pitch_deg
            );
            match (&result.output, &result.output_error) {
                (Some(path), _) => println!("Estimates: {}", path.display()),
                (None, Some(err)) => eprintln!("Estimates not written: {err}"),
                (None, None) => {}
            }

            if let Some(path) = summary {
                let data = serde_json::to_string_pretty(&result)?;
                fs::write(&path, data)
                    .with_context(|| format!("failed to write summary {}", path.display()))?;
                println!("Summary: {}", path.display());
            }
        }
        Command::Simulate {
            output,
            samples,
            roll_deg,
            pitch_deg,
            noise_mg,
            seed,
        } => {
            let sim = SimConfig {
                samples,
                roll_rad: roll_deg.to_radians(),
                pitch_rad: pitch_deg.to_radians(),
                noise_mg,
                seed,
                ..Default::default()
            };
            let data = generate_samples(&sim)?;

            write_samples(&output, &data)?;

            println!("Wrote {} samples to {}", data.len(), output.display());
        }
    }

    Ok(())
}
