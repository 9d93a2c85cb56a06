use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rs_hand_retargeting::capture_io::{read_capture, write_actuator_table};
use rs_hand_retargeting::pipeline::{RetargetConfig, Retargeter};
use rs_hand_retargeting::rotation_angles::PartialGroupPolicy;
use rs_hand_retargeting::utils::{dump_table, peak_degrees};

/// Retargets a hand capture recording into robot hand actuator commands.
#[derive(Parser, Debug)]
#[command(name = "hand-retarget", version, about)]
struct Args {
    /// Capture recording (CSV with Joint and RotationX..RotationW columns)
    input: PathBuf,

    /// Actuator command table to write (CSV)
    output: PathBuf,

    /// YAML file overriding joint labels, taxonomy, actuator mapping or columns
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drop trailing rows that do not complete a frame group instead of failing
    #[arg(long)]
    drop_partial: bool,

    /// Log level, RUST_LOG takes precedence if set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the command table in degrees
    #[arg(long)]
    dump: bool,
}

fn init_logging(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));
    // Logs go to stderr, stdout is left for --dump
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RetargetConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => RetargetConfig::default(),
    };
    if args.drop_partial {
        config.partial_group = PartialGroupPolicy::Drop;
    }

    let retargeter = Retargeter::new(config).context("Invalid retargeting configuration")?;
    let samples = read_capture(&args.input)
        .with_context(|| format!("Failed to read capture {}", args.input.display()))?;
    let table = retargeter.retarget(&samples).context("Retargeting failed")?;

    write_actuator_table(&args.output, &table)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let peak = peak_degrees(&table).into_iter().fold(0.0_f64, f64::max);
    info!("Wrote {} rows into {}, largest angle {:.1} deg", table.len(), args.output.display(), peak);

    if args.dump {
        dump_table(&table);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
