use std::collections::BTreeMap;
use std::time::Duration;
use crate::parse::{AggregationTable, BlockStats};
use crate::report::{Report, ReportEntry, Summary};
use crate::stat::StatEntry;

/// Global table built from the per-worker tables, sorted by key bytes
#[derive(Debug, Default)]
pub struct MergedStats<'a> {
    table: BTreeMap<&'a [u8], StatEntry>,
    records: usize,
    skipped: usize,
}

impl<'a> MergedStats<'a> {
    pub fn new() -> Self {
        MergedStats::default()
    }

    pub fn merge_table(&mut self, m: &AggregationTable<'a>) {
        m.iter().for_each(|(&k, t)| {
            if let Some(v) = self.table.get_mut(k) {
                v.merge(t);
            } else {
                self.table.insert(k, *t);
            }
        })
    }

    /// Fold in one worker's table and counters
    pub fn merge_block(&mut self, block: &BlockStats<'a>) {
        self.merge_table(&block.table);
        self.records += block.records;
        self.skipped += block.skipped;
    }

    /// Fold in another merged table, e.g. a partial merge of a subset of workers
    pub fn absorb(&mut self, other: MergedStats<'a>) {
        for (k, t) in other.table {
            self.table.entry(k).and_modify(|v| v.merge(&t)).or_insert(t);
        }
        self.records += other.records;
        self.skipped += other.skipped;
    }

    pub fn get(&self, key: &[u8]) -> Option<&StatEntry> {
        self.table.get(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a [u8], &StatEntry)> + '_ {
        self.table.iter().map(|(&k, v)| (k, v))
    }

    /// Report entries, ascending by key bytes
    pub fn entries(&self) -> Vec<ReportEntry> {
        self.iter().map(|(k, v)| ReportEntry::new(k, v)).collect()
    }

    pub fn into_report(self, elapsed: Duration) -> Report {
        Report {
            entries: self.entries(),
            summary: Summary {
                records: self.records,
                skipped: self.skipped,
                elapsed,
            },
        }
    }
}
