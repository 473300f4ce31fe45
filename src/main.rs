//! QuadBloom - command line entrypoint.
//!
//! Loads configuration, initializes logging, and runs the membership demo or
//! the false positive measurement against the Bloom filter.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use quadbloom_lib::config::{
    ConfigLoader, ConfigResult, LogConfig, MeasureOverrides, QuadBloomConfig,
    DEFAULT_CONFIG_PATH, ENV_PREFIX,
};
use quadbloom_lib::data_structures::bloom_filter::{BloomFilterConfig, DEFAULT_AMPLIFICATION};
use quadbloom_lib::error::{
    ErrorContext, ErrorReporter, QuadBloomError, QuadBloomResult, TracingErrorReporter,
};
use quadbloom_lib::harness;

/// Capacity of the filter used by the membership demo.
const DEMO_CAPACITY: usize = 10;

/// Command line arguments for QuadBloom.
#[derive(Parser, Debug)]
#[clap(name = "quadbloom", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[clap(long)]
    json: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Insert nine sample keys into a 60 bit filter and query them
    Demo,

    /// Measure false positive rates for similar and unrelated keys
    Measure {
        /// Expected number of keys, also the number inserted and queried
        #[clap(long)]
        capacity: Option<usize>,

        /// Bits per expected key
        #[clap(long)]
        amplification: Option<usize>,

        /// First numeric suffix of the similar keys; must be at least the capacity
        #[clap(long)]
        similar_offset: Option<u64>,

        /// Seed for the random key suffixes
        #[clap(long)]
        seed: Option<u64>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system. Logs go to stderr so stdout carries only results.
fn init_logging(log: &LogConfig) -> QuadBloomResult<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_thread_names(true);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| QuadBloomError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Print `value` as pretty JSON.
fn print_json<T: serde::Serialize>(value: &T) -> QuadBloomResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_demo(config: &QuadBloomConfig, json: bool) -> QuadBloomResult<()> {
    let seed = config.harness.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    let demo_config = BloomFilterConfig::new()
        .with_capacity(DEMO_CAPACITY)
        .with_amplification(DEFAULT_AMPLIFICATION);
    let demo = harness::run_membership_demo(demo_config, &mut rng)?;

    if json {
        return print_json(&demo);
    }

    println!("inserted keys ({} bit filter):", demo.bit_count);
    for check in &demo.inserted {
        println!("  {} -> {}", check.key, u8::from(check.possibly_present));
    }
    println!("never inserted keys:");
    for check in &demo.perturbed {
        println!("  {} -> {}", check.key, u8::from(check.possibly_present));
    }
    Ok(())
}

fn run_measure(config: QuadBloomConfig, overrides: MeasureOverrides, json: bool) -> QuadBloomResult<()> {
    let config = config.with_overrides(overrides);
    let report = harness::measure_false_positives(&config)?;
    if json {
        print_json(&report)
    } else {
        println!("{report}");
        Ok(())
    }
}

fn gen_config(output: &Path) -> QuadBloomResult<()> {
    info!("Generating default configuration");
    let default_config = QuadBloomConfig::default();

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&default_config)
        .map_err(|e| QuadBloomError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

fn run(command: Command, loaded: ConfigResult<QuadBloomConfig>, json: bool) -> Result<(), ErrorContext> {
    match command {
        Command::GenConfig { output } => {
            gen_config(&output).map_err(|e| {
                ErrorContext::new(e, "gen-config").with_details(format!("{output:?}"))
            })
        }
        Command::Validate => {
            info!("Validating configuration");
            loaded.map_err(|e| ErrorContext::new(e.into(), "config"))?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::Demo => {
            let config = loaded.map_err(|e| ErrorContext::new(e.into(), "config"))?;
            run_demo(&config, json).map_err(|e| ErrorContext::new(e, "demo"))
        }
        Command::Measure {
            capacity,
            amplification,
            similar_offset,
            seed,
        } => {
            let config = loaded.map_err(|e| ErrorContext::new(e.into(), "config"))?;
            let overrides = MeasureOverrides {
                capacity,
                amplification,
                similar_offset,
                seed,
            };
            run_measure(config, overrides, json)
                .map_err(|e| ErrorContext::new(e, "measure"))
        }
    }
}

/// Main entry point for the application.
fn main() -> ExitCode {
    let args = Args::parse();

    // Fall back to the bundled default file when present
    let config_path = args.config.or_else(|| {
        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        default_path.exists().then_some(default_path)
    });
    let loaded = ConfigLoader::new(config_path.as_deref(), ENV_PREFIX).load();

    let log_config = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    if let Err(e) = init_logging(&log_config) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let command = args.command.unwrap_or(Command::Measure {
        capacity: None,
        amplification: None,
        similar_offset: None,
        seed: None,
    });

    match run(command, loaded, args.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(context) => {
            TracingErrorReporter.report(&context);
            ExitCode::FAILURE
        }
    }
}
