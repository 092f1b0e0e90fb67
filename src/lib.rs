//! Single-pass parallel aggregation of `key;value` measurement files.
//!
//! The input is memory-mapped, split into record-aligned chunks, each chunk is
//! folded into its own key table on its own thread, and the tables are merged
//! into one sorted report.

pub mod chunk;
pub mod config;
pub mod engine;
pub mod error;
pub mod parse;
pub mod progress;
pub mod report;
pub mod result;
pub mod sample;
pub mod source;
pub mod stat;

pub use chunk::split_chunks;
pub use config::Config;
pub use engine::{aggregate, run};
pub use error::{Error, Result};
pub use parse::{parse_value, process_block, AggregationTable, BlockStats};
pub use report::{round_up_tenth, write_report, Report, ReportEntry, Summary};
pub use result::MergedStats;
pub use stat::StatEntry;

/// Initial capacity of each worker table
pub const TABLE_CAPACITY: usize = 10_000;
