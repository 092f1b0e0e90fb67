use std::ops::Range;
use memchr::memchr;
use crate::parse::TERMINATOR;

/// Split `data` into at most `workers` record-aligned ranges tiling `[0, data.len())`.
///
/// Candidate cuts are spaced evenly by byte offset; each one is moved forward to
/// just after the next line terminator. Cuts that collapse onto an earlier one
/// are dropped, so small inputs yield fewer ranges. Empty input yields none.
pub fn split_chunks(data: &[u8], workers: usize) -> Vec<Range<usize>> {
    let len = data.len();
    let workers = workers.max(1);
    let mut chunks = Vec::with_capacity(workers);

    let mut begin: usize = 0;
    for i in 1..workers {
        let candidate = (len as u128 * i as u128 / workers as u128) as usize;
        if candidate <= begin {
            continue;
        }
        // a terminator at candidate - 1 means the candidate is already a line start
        let Some(pos) = memchr(TERMINATOR, &data[(candidate - 1)..]) else {
            break;
        };
        let cut = candidate + pos;
        if cut >= len {
            break;
        }
        if cut > begin {
            chunks.push(begin..cut);
            begin = cut;
        }
    }

    if begin < len {
        chunks.push(begin..len);
    }

    debug_assert!(is_aligned_tiling(data, &chunks), "misaligned chunks {chunks:?}");
    chunks
}

/// Ranges are contiguous from 0 to `data.len()` and every inner cut follows a terminator
pub fn is_aligned_tiling(data: &[u8], chunks: &[Range<usize>]) -> bool {
    let mut expected: usize = 0;
    for chunk in chunks {
        if chunk.start != expected || chunk.end <= chunk.start {
            return false;
        }
        if chunk.start != 0 && data[chunk.start - 1] != TERMINATOR {
            return false;
        }
        expected = chunk.end;
    }
    expected == data.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SAMPLE_100;

    #[test]
    fn empty_input() {
        assert!(split_chunks(b"", 8).is_empty());
    }

    #[test]
    fn single_line_single_chunk() {
        assert_eq!(vec![0..6], split_chunks(b"X;5.0\n", 4));
        assert_eq!(vec![0..5], split_chunks(b"X;5.0", 16));
    }

    #[test]
    fn fewer_lines_than_workers() {
        let data = b"A;1.0\nA;3.0\nB;-2.0\n";
        let chunks = split_chunks(data, 16);
        assert!(chunks.len() <= 3);
        assert!(is_aligned_tiling(data, &chunks));
    }

    #[test]
    fn candidate_on_line_start() {
        // len 12, two workers: candidate 6 is exactly the start of the second line
        let data = b"A;1.0\nB;2.0\n";
        assert_eq!(vec![0..6, 6..12], split_chunks(data, 2));
    }

    #[test]
    fn zero_workers_means_one() {
        let data = SAMPLE_100.as_bytes();
        assert_eq!(vec![0..data.len()], split_chunks(data, 0));
    }

    #[test]
    fn sample_tiles_for_any_worker_count() {
        let data = SAMPLE_100.as_bytes();
        for workers in 1..=64 {
            let chunks = split_chunks(data, workers);
            assert!(chunks.len() <= workers);
            assert!(is_aligned_tiling(data, &chunks), "{workers}: {chunks:?}");
        }
    }

    #[test]
    fn tiling_check_rejects_gaps_and_splits() {
        let data = b"A;1.0\nB;2.0\n";
        assert!(!is_aligned_tiling(data, &[0..6, 7..12]));
        assert!(!is_aligned_tiling(data, &[0..4, 4..12]));
        assert!(!is_aligned_tiling(data, &[0..6]));
    }
}
