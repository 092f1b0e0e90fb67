use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lines a worker parses between two progress publications
pub const PROGRESS_STRIDE: usize = 1 << 16;

/// Parse-stage progress shared by all workers.
///
/// Workers only ever `fetch_add` with relaxed ordering, and only once per
/// [`PROGRESS_STRIDE`] lines, so the counter never shows up in the hot loop.
#[derive(Debug)]
pub struct Progress {
    total_bytes: usize,
    bytes: AtomicUsize,
    records: AtomicUsize,
}

impl Progress {
    pub fn new(total_bytes: usize) -> Self {
        Progress {
            total_bytes,
            bytes: AtomicUsize::new(0),
            records: AtomicUsize::new(0),
        }
    }

    pub fn advance(&self, bytes: usize, records: usize) {
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
        self.records.fetch_add(records, Ordering::Relaxed);
    }

    pub fn bytes(&self) -> usize {
        self.bytes.load(Ordering::Relaxed)
    }

    pub fn records(&self) -> usize {
        self.records.load(Ordering::Relaxed)
    }

    pub fn percent(&self) -> f64 {
        if self.total_bytes == 0 {
            return 100.0;
        }
        (self.bytes() as f64 * 100.0 / self.total_bytes as f64).min(100.0)
    }

    /// Redraw the progress line in place
    pub fn draw(&self, out: &mut impl Write) {
        let _ = write!(out, "\rparsed {:5.1}% ({} records)", self.percent(), self.records());
        let _ = out.flush();
    }

    pub fn clear(&self, out: &mut impl Write) {
        let _ = write!(out, "\r{:60}\r", "");
        let _ = out.flush();
    }
}

#[test]
fn test_progress_percent() {
    let p = Progress::new(200);
    assert_eq!(0.0, p.percent());
    p.advance(50, 3);
    p.advance(50, 4);
    assert_eq!(50.0, p.percent());
    assert_eq!(7, p.records());

    let mut line = Vec::new();
    p.draw(&mut line);
    assert_eq!("\rparsed  50.0% (7 records)", std::str::from_utf8(&line).unwrap());

    assert_eq!(100.0, Progress::new(0).percent());
}
