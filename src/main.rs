use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use ltpi::{compute_pi_with_progress, BigInt};
use tracing::info;
use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// How many digits to echo after a run.
const PREVIEW_DIGITS: usize = 50;

#[derive(Parser)]
#[command(version, about = "Digits of pi from a base 10^9 bignum engine")]
struct Cli {
    /// Write a Chrome trace of the run to this file
    #[arg(long, global = true)]
    trace: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compute pi, time it and save it to a file (the default)
    Compute(ComputeArgs),
    /// Print a few worked bignum examples
    Demo,
}

#[derive(Args)]
struct ComputeArgs {
    /// Fractional digits to compute; underscores are ignored (100_000)
    #[arg(short, long, default_value_t = 100, value_parser = parse_digits)]
    digits: usize,

    /// Where to save the digits
    #[arg(short, long, default_value = "pi_100k_ltpi2.txt")]
    output: PathBuf,

    /// Hide the progress spinner
    #[arg(short, long)]
    quiet: bool,
}

impl Default for ComputeArgs {
    fn default() -> Self {
        Self {
            digits: 100,
            output: PathBuf::from("pi_100k_ltpi2.txt"),
            quiet: false,
        }
    }
}

fn parse_digits(arg: &str) -> Result<usize, std::num::ParseIntError> {
    arg.replace('_', "").parse()
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.trace.as_deref());

    match cli.command.unwrap_or_else(|| Command::Compute(ComputeArgs::default())) {
        Command::Compute(args) => compute(&args),
        Command::Demo => demo(),
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `info`). The returned
/// guard flushes the Chrome trace when dropped.
fn init_tracing(trace: Option<&Path>) -> Option<FlushGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (chrome, guard) = match trace {
        Some(path) => {
            let (layer, guard) = ChromeLayerBuilder::new().file(path).build();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt)
        .with(chrome)
        .init();

    guard
}

fn compute(args: &ComputeArgs) -> Result<(), Box<dyn Error>> {
    info!(digits = args.digits, "computing pi");

    let spinner = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::with_template("{spinner} [{elapsed}] {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    let pi = compute_pi_with_progress(args.digits, |stage| spinner.set_message(stage.to_string()))?;
    let elapsed = start.elapsed();
    spinner.finish_and_clear();

    println!("Done in {:.2} seconds.", elapsed.as_secs_f64());

    fs::write(&args.output, &pi)?;
    println!("Saved to '{}'.", args.output.display());

    let preview = &pi[..pi.len().min(PREVIEW_DIGITS + 2)];
    println!("First {PREVIEW_DIGITS} digits: {preview}...");

    Ok(())
}

fn demo() -> Result<(), Box<dyn Error>> {
    let a = BigInt::from(123_456_789i64);
    let b = BigInt::from(987_654_321i64);
    println!("{a} * {b} = {}", a.mul(&b)?);

    let a = BigInt::from(1_000_000i64);
    let b = BigInt::from(7i64);
    println!("{a} / {b} = {}", a.div(&b)?);

    let a = BigInt::from(10_000i64);
    println!("sqrt({a}) = {}", a.sqrt()?);

    Ok(())
}
