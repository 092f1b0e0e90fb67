use ahash::AHashMap;
use memchr::{memchr, memchr_iter};
use crate::progress::{Progress, PROGRESS_STRIDE};
use crate::stat::StatEntry;

pub const SEPARATOR: u8 = b';';
pub const TERMINATOR: u8 = b'\n';

/// Significant digits that still fit an `f64` mantissa exactly
const FAST_DIGITS: usize = 15;

const POW10: [f64; FAST_DIGITS + 1] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15,
];

/// Per-worker key table, keys borrowed from the input
pub type AggregationTable<'a> = AHashMap<&'a [u8], StatEntry>;

/// Parse a decimal value `[+-]?digits(.digits)?` to `f64`.
/// Return None if parse error
pub fn parse_value(buf: &[u8]) -> Option<f64> {
    let (negative, digits) = match buf.first() {
        Some(b'-') => (true, &buf[1..]),
        Some(b'+') => (false, &buf[1..]),
        Some(_) => (false, buf),
        None => return None,
    };

    let mut mantissa: u64 = 0;
    let mut significant: usize = 0;
    let mut integral: usize = 0;
    let mut fractional: usize = 0;
    let mut dot = false;

    for &b in digits {
        match b {
            b'0'..=b'9' => {
                if dot {
                    fractional += 1;
                } else {
                    integral += 1;
                }
                if significant < FAST_DIGITS {
                    mantissa = mantissa * 10 + (b - b'0') as u64;
                    if mantissa != 0 {
                        significant += 1;
                    }
                } else {
                    significant += 1;
                }
            }
            b'.' if !dot => dot = true,
            _ => return None,
        }
    }

    if integral == 0 || (dot && fractional == 0) {
        return None;
    }

    let value = if significant <= FAST_DIGITS && fractional <= FAST_DIGITS {
        mantissa as f64 / POW10[fractional]
    } else {
        // grammar already checked, so only very long numbers land here
        std::str::from_utf8(digits).ok()?.parse::<f64>().ok()?
    };

    Some(if negative { -value } else { value })
}

#[test]
fn test_parse_value() {
    // all one-decimal numbers in the usual range
    for i in -999..=999 {
        let f = (i as f64) / 10.0;
        let string = format!("{f:.1}");
        assert_eq!(Some(f), parse_value(string.as_bytes()), "{string}");
    }

    assert_eq!(Some(5.0), parse_value(b"5"));
    assert_eq!(Some(-12.0), parse_value(b"-12"));
    assert_eq!(Some(3.25), parse_value(b"+3.25"));
    assert_eq!(Some(-0.125), parse_value(b"-0.125"));
    assert_eq!(Some(1000.1), parse_value(b"1000.1"));
    assert_eq!(Some(0.0), parse_value(b"0000.000"));
    assert_eq!(Some(12.345678901234567), parse_value(b"12.345678901234567"));
    assert_eq!(Some(-3.1415926535897931), parse_value(b"-3.1415926535897931"));

    // some bad numbers
    assert_eq!(None, parse_value(b""));
    assert_eq!(None, parse_value(b"-"));
    assert_eq!(None, parse_value(b".1"));
    assert_eq!(None, parse_value(b"1."));
    assert_eq!(None, parse_value(b"1.2.3"));
    assert_eq!(None, parse_value(b"1c.0"));
    assert_eq!(None, parse_value(b"1 .0"));
    assert_eq!(None, parse_value(b"10.b"));
    assert_eq!(None, parse_value(b" 1.0"));
    assert_eq!(None, parse_value(b"--1.0"));
    assert_eq!(None, parse_value(b"1e5"));
    assert_eq!(None, parse_value(b"inf"));
    assert_eq!(None, parse_value(b"notanumber"));
}

/// One worker's output: its table plus record and skipped-record counters
#[derive(Debug, Default)]
pub struct BlockStats<'a> {
    pub table: AggregationTable<'a>,
    pub records: usize,
    pub skipped: usize,
}

impl<'a> BlockStats<'a> {
    fn with_capacity(capacity: usize) -> Self {
        BlockStats {
            table: AHashMap::with_capacity(capacity),
            records: 0,
            skipped: 0,
        }
    }

    /// Fold one line in. Empty lines are not records; malformed lines are skipped and counted.
    #[inline]
    fn fold_line(&mut self, mut line: &'a [u8]) {
        if let [head @ .., b'\r'] = line {
            line = head;
        }
        if line.is_empty() {
            return;
        }

        let Some(col) = memchr(SEPARATOR, line) else {
            self.skipped += 1;
            return;
        };
        let (key, value) = (&line[..col], &line[(col + 1)..]);

        match parse_value(value) {
            Some(v) => {
                self.records += 1;
                if let Some(c) = self.table.get_mut(key) {
                    c.update(v);
                } else {
                    self.table.insert(key, StatEntry::from_value(v));
                }
            }
            None => self.skipped += 1,
        }
    }
}

/// Parse block of lines into a key table, counting valid and skipped records.
/// A final line without terminator is still processed.
pub fn process_block<'a>(
    block: &'a [u8],
    capacity: usize,
    progress: Option<&Progress>,
) -> BlockStats<'a> {
    let mut stats = BlockStats::with_capacity(capacity);

    let mut begin: usize = 0;
    let mut published_bytes: usize = 0;
    let mut published_records: usize = 0;
    let mut lines: usize = 0;

    for end in memchr_iter(TERMINATOR, block) {
        stats.fold_line(&block[begin..end]);
        begin = end + 1;

        lines += 1;
        if lines == PROGRESS_STRIDE {
            lines = 0;
            if let Some(p) = progress {
                p.advance(begin - published_bytes, stats.records - published_records);
                published_bytes = begin;
                published_records = stats.records;
            }
        }
    }

    if begin < block.len() {
        stats.fold_line(&block[begin..]);
    }

    if let Some(p) = progress {
        p.advance(block.len() - published_bytes, stats.records - published_records);
    }

    stats
}

#[test]
fn test_process_block() {
    let block = crate::sample::SAMPLE_100.as_bytes();
    let stats = process_block(block, 100, None);
    assert_eq!(86, stats.table.len());
    assert_eq!(100, stats.records);
    assert_eq!(0, stats.skipped);

    let london = stats.table.get("London".as_bytes()).unwrap();
    assert_eq!(2, london.count);
    assert_eq!(1.3, london.min);
    assert_eq!(29.8, london.max);
}

#[test]
fn test_process_block_skips() {
    let block = b"A;1.0\nno separator\nC;notanumber\n\nA;3.0\r\nB;-2.0";
    let stats = process_block(block, 4, None);
    assert_eq!(3, stats.records);
    assert_eq!(2, stats.skipped);
    assert_eq!(2, stats.table.len());
    assert!(!stats.table.contains_key("C".as_bytes()));

    let a = stats.table.get("A".as_bytes()).unwrap();
    assert_eq!((2, 4.0, 1.0, 3.0), (a.count, a.sum, a.min, a.max));
    assert_eq!(-2.0, stats.table.get("B".as_bytes()).unwrap().max);
}

#[test]
fn test_process_block_first_separator() {
    let stats = process_block(b"k;1;2\nk;7.5\n", 1, None);
    assert_eq!(1, stats.records);
    assert_eq!(1, stats.skipped);
    assert_eq!(7.5, stats.table.get("k".as_bytes()).unwrap().sum);
}

#[test]
fn test_process_block_progress() {
    let block = crate::sample::SAMPLE_100.as_bytes();
    let progress = Progress::new(block.len());
    let stats = process_block(block, 100, Some(&progress));
    assert_eq!(block.len(), progress.bytes());
    assert_eq!(stats.records, progress.records());
    assert_eq!(100.0, progress.percent());
}
