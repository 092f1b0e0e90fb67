use std::io;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use ahash::AHashMap;
use log::{debug, info, warn};
use crate::chunk::split_chunks;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parse::process_block;
use crate::progress::Progress;
use crate::report::Report;
use crate::result::MergedStats;
use crate::source::Input;
use crate::TABLE_CAPACITY;

/// Run the whole pipeline over `data`: chunk, parse every chunk on its own thread,
/// merge the per-thread tables as the threads finish.
///
/// With `progress`, the waiting main thread redraws the progress line on stderr
/// every `interval`. A panicking worker fails the whole run.
pub fn aggregate<'a>(
    data: &'a [u8],
    workers: usize,
    progress: Option<(&Progress, Duration)>,
) -> Result<MergedStats<'a>> {
    let chunks = split_chunks(data, workers);
    debug!("input len: {}, workers: {workers}, chunks: {}", data.len(), chunks.len());

    let blocks: Vec<&'a [u8]> = chunks.into_iter().map(|range| &data[range]).collect();
    let counter = progress.map(|(p, _)| p);

    let mut result = MergedStats::new();
    run_workers(
        blocks,
        progress,
        |block| process_block(block, TABLE_CAPACITY, counter),
        |id, time, stats| {
            let aggregate = Instant::now();
            result.merge_block(&stats);
            debug!(
                "{id}\tmap len: {},\trecords: {},\tskipped: {},\ttime: {:?},\taggregate: {:?}",
                stats.table.len(),
                stats.records,
                stats.skipped,
                time,
                aggregate.elapsed()
            );
        },
    )?;

    Ok(result)
}

/// Spawn one scoped thread per block and hand every result to `merge` in completion order.
///
/// Every thread is joined before returning, so a panic in any number of workers
/// surfaces as `Error::WorkerPanicked` for the first one seen.
fn run_workers<'a, T, W, M>(
    blocks: Vec<&'a [u8]>,
    progress: Option<(&Progress, Duration)>,
    work: W,
    mut merge: M,
) -> Result<()>
where
    T: Send,
    W: Fn(&'a [u8]) -> T + Sync,
    M: FnMut(usize, Duration, T),
{
    let work = &work;

    thread::scope(|s| {
        let mut threads = AHashMap::with_capacity(blocks.len());

        let (tx, rx) = channel::<usize>();

        for (id, block) in blocks.into_iter().enumerate() {
            let h = s.spawn({
                let tx = tx.clone();
                move || {
                    let started = Instant::now();
                    let out = work(block);
                    let _ = tx.send(id);
                    (started.elapsed(), out)
                }
            });
            threads.insert(id, h);
        }
        drop(tx);

        let mut failed: Option<usize> = None;

        while !threads.is_empty() {
            let received = match progress {
                Some((p, interval)) => match rx.recv_timeout(interval) {
                    Ok(id) => Some(id),
                    Err(RecvTimeoutError::Timeout) => {
                        p.draw(&mut io::stderr());
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => None,
                },
                None => rx.recv().ok(),
            };
            // every sender is gone, so the remaining workers died without reporting
            let Some(id) = received else { break };

            if let Some(h) = threads.remove(&id) {
                match h.join() {
                    Ok((time, out)) if failed.is_none() => merge(id, time, out),
                    Ok(_) => {}
                    Err(_) => {
                        failed.get_or_insert(id);
                    }
                }
            }
        }

        // sorted so the reported chunk does not depend on hash order
        let mut rest: Vec<_> = threads.into_iter().collect();
        rest.sort_unstable_by_key(|&(id, _)| id);
        for (id, h) in rest {
            if h.join().is_err() {
                failed.get_or_insert(id);
            }
        }

        match failed {
            Some(chunk) => Err(Error::WorkerPanicked { chunk }),
            None => Ok(()),
        }
    })
}

/// Open the configured file, aggregate it and build the report
pub fn run(config: &Config) -> Result<Report> {
    let start = Instant::now();

    let input = Input::open(&config.path)?;
    info!("{}: {} bytes, {} workers", config.path.display(), input.len(), config.workers);

    let progress = Progress::new(input.len());
    let merged = aggregate(&input, config.workers.get(), config.progress.map(|i| (&progress, i)))?;
    if config.progress.is_some() {
        progress.clear(&mut io::stderr());
    }

    if merged.skipped() > 0 {
        warn!("skipped {} malformed records", merged.skipped());
    }
    let report = merged.into_report(start.elapsed());
    info!("{}", report.summary);

    Ok(report)
}
