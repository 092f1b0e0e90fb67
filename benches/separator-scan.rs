#![feature(test)]

extern crate test;

use test::Bencher;
use memchr::memchr;
use one_brc_agg::parse_value;
use one_brc_agg::sample::SAMPLE_100;

fn lines() -> Vec<&'static [u8]> {
    SAMPLE_100.as_bytes().split(|&b| b == b'\n').filter(|l| !l.is_empty()).collect()
}

#[inline]
fn separator_iter(line: &[u8]) -> Option<usize> {
    line.iter().position(|&b| b == b';')
}

#[inline]
fn separator_memchr(line: &[u8]) -> Option<usize> {
    memchr(b';', line)
}

#[test]
fn test_separator_scans() {
    for line in lines() {
        assert_eq!(separator_iter(line), separator_memchr(line));
    }
}

#[test]
fn test_value_parsers() {
    for line in lines() {
        let col = separator_memchr(line).unwrap();
        let value = &line[(col + 1)..];
        let std = std::str::from_utf8(value).unwrap().parse::<f64>().ok();
        assert_eq!(std, parse_value(value));
    }
}

#[bench]
fn bench_separator_iter(b: &mut Bencher) {
    let lines = lines();
    b.iter(|| lines.iter().filter_map(|l| separator_iter(l)).sum::<usize>());
}

#[bench]
fn bench_separator_memchr(b: &mut Bencher) {
    let lines = lines();
    b.iter(|| lines.iter().filter_map(|l| separator_memchr(l)).sum::<usize>());
}

#[bench]
fn bench_parse_value(b: &mut Bencher) {
    let values: Vec<&[u8]> = lines()
        .into_iter()
        .map(|l| &l[(separator_memchr(l).unwrap() + 1)..])
        .collect();
    b.iter(|| values.iter().filter_map(|v| parse_value(v)).sum::<f64>());
}

#[bench]
fn bench_parse_std(b: &mut Bencher) {
    let values: Vec<&str> = lines()
        .into_iter()
        .map(|l| std::str::from_utf8(&l[(separator_memchr(l).unwrap() + 1)..]).unwrap())
        .collect();
    b.iter(|| values.iter().filter_map(|v| v.parse::<f64>().ok()).sum::<f64>());
}
