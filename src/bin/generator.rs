use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use rand::Rng;
const BUFFER_SIZE: usize = 4 * 1024 * 1024;
/// Longer names are left out of the generated file
const KEY_MAX_LEN: usize = 100;

/// Generate a `key;value` measurement file from a list of names
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Names file; the first `;`-separated field of each line is used
    #[arg(short, long)]
    names: PathBuf,

    /// Records to write
    #[arg(short, long, default_value_t = 1_000_000)]
    lines: usize,

    #[arg(short, long, default_value = "measurements.txt")]
    output: PathBuf,

    /// Lower bound of generated values (inclusive)
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    min: f64,

    /// Upper bound of generated values (exclusive)
    #[arg(long, default_value_t = 45.0, allow_negative_numbers = true)]
    max: f64,

    /// Fractional digits of generated values
    #[arg(long, default_value_t = 1)]
    precision: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()?;

    ensure!(cli.min < cli.max, "empty value range {}..{}", cli.min, cli.max);

    let start = Instant::now();
    let names = read_names(&cli.names)?;
    log::info!("unique keys: {}, read in {:?}", names.len(), start.elapsed());

    let start_write = Instant::now();
    let file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);
    let range = cli.min..cli.max;
    write_records(&mut writer, &names, cli.lines, range, cli.precision, &mut rand::thread_rng())?;
    writer.flush().with_context(|| format!("writing {}", cli.output.display()))?;

    log::info!(
        "{} saved: {} lines in {:?}",
        cli.output.display(),
        cli.lines,
        start_write.elapsed()
    );
    Ok(())
}

fn read_names(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_names(BufReader::new(file))
}

/// Unique names in first-seen order; blank and `#` lines are ignored
fn parse_names(reader: impl BufRead) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let name = line.split(';').next().unwrap_or_default();
        if name.len() > KEY_MAX_LEN {
            log::warn!("long name in line {}: {} bytes, skipped", i + 1, name.len());
            continue;
        }
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }

    if names.is_empty() {
        bail!("no names found");
    }
    Ok(names)
}

fn write_records(
    out: &mut impl Write,
    names: &[String],
    lines: usize,
    range: std::ops::Range<f64>,
    precision: usize,
    rng: &mut impl Rng,
) -> Result<()> {
    for _ in 0..lines {
        let name = &names[rng.gen_range(0..names.len())];
        let value: f64 = rng.gen_range(range.clone());
        writeln!(out, "{name};{value:.precision$}")?;
    }
    Ok(())
}
