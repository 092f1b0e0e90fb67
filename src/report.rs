use std::fmt::{Display, Formatter};
use std::io::Write;
use std::time::Duration;
use crate::error::Result;
use crate::stat::StatEntry;

/// Ulps of the scaled value treated as representation noise
const ROUND_ULPS: f64 = 4.0;

/// The rounding must be done using the semantics of IEEE 754 rounding-direction
/// "roundTowardPositive", one digit after decimal point.
///
/// Values within a few ulps of a tenth (`1.1 * 10.0 == 11.000000000000002`) stay put,
/// and negative zero is normalized so it never prints as `-0.0`.
pub fn round_up_tenth(x: f64) -> f64 {
    let v = x * 10.0;
    let nearest = v.round();
    let noise = v.abs().max(1.0) * ROUND_ULPS * f64::EPSILON;
    let r = if (v - nearest).abs() <= noise {
        nearest
    } else {
        v.ceil()
    };
    r / 10.0 + 0.0
}

/// One report line: `key=min/mean/max`
///
/// `key` keeps the raw bytes, so ordering and lookup match the merged table.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportEntry {
    pub key: Vec<u8>,
    pub count: u64,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl ReportEntry {
    pub fn new(key: &[u8], stat: &StatEntry) -> Self {
        ReportEntry {
            key: key.to_vec(),
            count: stat.count,
            min: stat.min,
            mean: stat.mean(),
            max: stat.max,
        }
    }
}

/// Key as text; bytes that are not UTF-8 are written as `\xNN` escapes
pub struct KeyDisplay<'a>(pub &'a [u8]);

impl Display for KeyDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Ok(s) = simdutf8::basic::from_utf8(self.0) {
            return f.write_str(s);
        }
        for chunk in self.0.utf8_chunks() {
            f.write_str(chunk.valid())?;
            for b in chunk.invalid() {
                write!(f, "\\x{b:02X}")?;
            }
        }
        Ok(())
    }
}

impl ReportEntry {
    pub fn name(&self) -> KeyDisplay<'_> {
        KeyDisplay(&self.key)
    }
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}={:.1}/{:.1}/{:.1}",
            self.name(),
            round_up_tenth(self.min),
            round_up_tenth(self.mean),
            round_up_tenth(self.max)
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub records: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

impl Summary {
    /// Records per second, 0 for an instant run
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.records as f64 / secs
        } else {
            0.0
        }
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "records: {}, skipped: {}, elapsed: {:?}, throughput: {:.0} records/s",
            self.records,
            self.skipped,
            self.elapsed,
            self.throughput()
        )
    }
}

/// Sorted entries plus the run summary
#[derive(Clone, Debug, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    pub summary: Summary,
}

impl Report {
    /// Look up an entry by its raw key bytes
    pub fn get(&self, key: &[u8]) -> Option<&ReportEntry> {
        self.entries
            .binary_search_by(|e| e.key.as_slice().cmp(key))
            .ok()
            .map(|i| &self.entries[i])
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        write!(f, "{}", self.summary)
    }
}

/// Write the report, one line per key and the summary line last.
/// Any write failure is fatal to the run.
pub fn write_report(report: &Report, out: &mut impl Write) -> Result<()> {
    for entry in &report.entries {
        writeln!(out, "{entry}")?;
    }
    writeln!(out, "{}", report.summary)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_toward_positive() {
        assert_eq!(2.1, round_up_tenth(2.05));
        assert_eq!(2.1, round_up_tenth(2.01));
        assert_eq!(-2.0, round_up_tenth(-2.05));
        assert_eq!(-2.0, round_up_tenth(-2.09 + 0.05));
        assert_eq!(1.1, round_up_tenth(1.1));
        assert_eq!(-1.1, round_up_tenth(-1.1));
        assert_eq!(99.9, round_up_tenth(99.9));
        assert_eq!("0.0", format!("{:.1}", round_up_tenth(-0.04)));
    }

    #[test]
    fn rounds_up_just_above_a_tenth() {
        assert_eq!(2.1, round_up_tenth(2.00000005));
        assert_eq!(2.1, round_up_tenth(2.0 + 1e-12));
        assert_eq!(-1.9, round_up_tenth(-1.99999995));
        assert_eq!(100.0, round_up_tenth(99.90000000124988));
        assert_eq!(2.0, round_up_tenth(2.0));
    }

    #[test]
    fn entry_line() {
        let mut s = StatEntry::from_value(1.0);
        s.update(3.0);
        let e = ReportEntry::new(b"A", &s);
        assert_eq!(2, e.count);
        assert_eq!("A=1.0/2.0/3.0", e.to_string());

        let e = ReportEntry::new("Zürich".as_bytes(), &StatEntry::from_value(-2.0));
        assert_eq!("Zürich=-2.0/-2.0/-2.0", e.to_string());

        let e = ReportEntry::new(b"bad\xffkey", &StatEntry::from_value(0.0));
        assert_eq!("bad\\xFFkey=0.0/0.0/0.0", e.to_string());
        assert_eq!(b"bad\xffkey", e.key.as_slice());
    }

    #[test]
    fn invalid_keys_stay_distinct() {
        let a = ReportEntry::new(b"k\xfe", &StatEntry::from_value(1.0));
        let b = ReportEntry::new(b"k\xff", &StatEntry::from_value(1.0));
        assert_ne!(a.to_string(), b.to_string());

        let report = Report { entries: vec![a, b], summary: Summary::default() };
        assert_eq!(b"k\xff", report.get(b"k\xff").unwrap().key.as_slice());
        assert!(report.get(b"k\xfd").is_none());
    }

    #[test]
    fn summary_line() {
        let s = Summary { records: 3, skipped: 1, elapsed: Duration::from_millis(500) };
        assert_eq!(6.0, s.throughput());
        assert_eq!(
            "records: 3, skipped: 1, elapsed: 500ms, throughput: 6 records/s",
            s.to_string()
        );
        assert_eq!(0.0, Summary::default().throughput());
    }

    #[test]
    fn write_whole_report() {
        let report = Report {
            entries: vec![ReportEntry::new(b"X", &StatEntry::from_value(5.0))],
            summary: Summary { records: 1, skipped: 0, elapsed: Duration::ZERO },
        };
        let mut out = Vec::new();
        write_report(&report, &mut out).unwrap();
        assert_eq!(
            "X=5.0/5.0/5.0\nrecords: 1, skipped: 0, elapsed: 0ns, throughput: 0 records/s\n",
            String::from_utf8(out).unwrap()
        );
        assert_eq!(
            report.to_string() + "\n",
            "X=5.0/5.0/5.0\nrecords: 1, skipped: 0, elapsed: 0ns, throughput: 0 records/s\n"
        );
        assert!(report.get(b"X").is_some());
        assert!(report.get(b"Y").is_none());
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_an_error() {
        let report = Report::default();
        assert!(matches!(write_report(&report, &mut Broken), Err(crate::Error::Output(_))));
    }
}
