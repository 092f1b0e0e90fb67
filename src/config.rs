use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread::available_parallelism;
use std::time::Duration;

#[cfg(debug_assertions)]
pub const FILE_PATH: &str = "measurements-small.txt"; // Debug configuration
#[cfg(not(debug_assertions))]
pub const FILE_PATH: &str = "measurements.txt"; // Release configuration

pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// Run configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub path: PathBuf,
    pub workers: NonZeroUsize,
    /// `None` disables progress output
    pub progress: Option<Duration>,
}

impl Config {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Config {
            path: path.into(),
            workers: default_workers(),
            progress: Some(DEFAULT_PROGRESS_INTERVAL),
        }
    }

    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_progress(mut self, progress: Option<Duration>) -> Self {
        self.progress = progress;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(FILE_PATH)
    }
}

/// Number of hardware threads, 1 if unknown
pub fn default_workers() -> NonZeroUsize {
    available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

#[test]
fn test_config_builders() {
    let c = Config::new("data.txt")
        .with_workers(NonZeroUsize::new(16).unwrap())
        .with_progress(None);
    assert_eq!(PathBuf::from("data.txt"), c.path);
    assert_eq!(16, c.workers.get());
    assert_eq!(None, c.progress);

    let d = Config::default();
    assert_eq!(PathBuf::from(FILE_PATH), d.path);
    assert_eq!(Some(DEFAULT_PROGRESS_INTERVAL), d.progress);
    assert!(d.workers.get() >= 1);
}
