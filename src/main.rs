use std::io::{stdout, BufWriter};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::Parser;
use one_brc_agg::config::{default_workers, Config, FILE_PATH};
use one_brc_agg::{run, write_report};

/// Aggregate min/mean/max per key over a `key;value` file
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Input file, one `key;value` record per line
    #[arg(default_value = FILE_PATH)]
    file: PathBuf,

    /// Worker threads [default: available hardware threads]
    #[arg(short, long)]
    workers: Option<NonZeroUsize>,

    /// How often the progress line is redrawn, e.g. `250ms` or `1s`
    #[arg(short, long, default_value = "250ms", value_parser = humantime::parse_duration)]
    progress_interval: Duration,

    /// No progress line on stderr
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new(&self.file)
            .with_workers(self.workers.unwrap_or_else(default_workers))
            .with_progress((!self.quiet).then_some(self.progress_interval))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init()?;
    log::debug!("cli: {cli:?}");

    let config = cli.config();
    let report = run(&config).with_context(|| format!("aggregating {}", config.path.display()))?;

    let mut out = BufWriter::new(stdout().lock());
    write_report(&report, &mut out).context("writing report")?;

    Ok(())
}

#[test]
fn test_cli_config() {
    let cli = Cli::try_parse_from(["one-brc-agg", "data.txt", "-w", "16", "-p", "1s"]).unwrap();
    let config = cli.config();
    assert_eq!(PathBuf::from("data.txt"), config.path);
    assert_eq!(16, config.workers.get());
    assert_eq!(Some(Duration::from_secs(1)), config.progress);

    let cli = Cli::try_parse_from(["one-brc-agg", "--quiet"]).unwrap();
    assert_eq!(None, cli.config().progress);
    assert_eq!(PathBuf::from(FILE_PATH), cli.config().path);

    assert!(Cli::try_parse_from(["one-brc-agg", "-w", "0"]).is_err());
}
