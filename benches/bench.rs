use std::hint::black_box;
use std::ops::RangeInclusive;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use fast_uint::{raw, write_sequence, BufferedReader, FastUInt, Reader, MAX_LEN};
use rand::distributions::{Uniform, WeightedIndex};
use rand::prelude::*;

// Uniform weights: equal probability of a value of each length.
const UNIFORM_WEIGHTS: [usize; MAX_LEN] = [1, 1, 1, 1, 1, 1];
// Zipf-like weights: decreasing but non-zero probability for larger values.
const ZIPF_WEIGHTS: [usize; MAX_LEN] = [7560, 3780, 2520, 1890, 1512, 1260];
const ARRAY_LEN: usize = 1 << 16;

fn range_for_byte_size(nbytes: usize) -> RangeInclusive<u64> {
    // Zero is the sentinel, so it never shows up in a sequence.
    let min = if nbytes == 1 {
        1
    } else {
        1 << ((nbytes - 1) * 7)
    };
    let max = u64::MAX >> (64 - (7 * nbytes));
    min..=max
}

// Generate an array of len with values no larger than max_bytes with the given distribution.
fn generate_array(len: usize, max_bytes: usize, weights: &[usize; MAX_LEN]) -> Vec<u64> {
    let mut len_rng = StdRng::from_seed([0xabu8; 32]);
    let len_dist = WeightedIndex::new(&weights[..max_bytes]).unwrap();
    let mut value_rng = StdRng::from_seed([0xcdu8; 32]);
    len_dist
        .sample_iter(&mut len_rng)
        .take(len)
        .map(|n| Uniform::from(range_for_byte_size(n + 1)).sample(&mut value_rng))
        .collect()
}

fn benchmark(c: &mut Criterion) {
    for (name, weights) in [("uniform", &UNIFORM_WEIGHTS), ("zipf", &ZIPF_WEIGHTS)] {
        let mut g = c.benchmark_group(name);
        g.throughput(Throughput::Elements(ARRAY_LEN as u64));
        for max_bytes in [1, 3, MAX_LEN] {
            let input_value = generate_array(ARRAY_LEN, max_bytes, weights);
            g.bench_with_input(
                format!("max_bytes{}/write_sequence", max_bytes),
                &input_value,
                |b, iv| b.iter(|| write_sequence(iv.iter().copied()).unwrap()),
            );

            let encoded = write_sequence(input_value.iter().copied()).unwrap();
            g.bench_with_input(
                format!("max_bytes{}/skip_at", max_bytes),
                encoded.as_slice(),
                |b, e| {
                    b.iter(|| {
                        let mut pos = 0;
                        let mut reader = Reader::new(e, &mut pos);
                        while reader.position() < e.len() {
                            reader.skip_value().unwrap();
                        }
                        pos
                    })
                },
            );
            g.bench_with_input(
                format!("max_bytes{}/reader", max_bytes),
                encoded.as_slice(),
                |b, e| {
                    b.iter(|| {
                        let mut pos = 0;
                        Reader::new(e, &mut pos).map(Result::unwrap).sum::<u64>()
                    })
                },
            );
            g.bench_with_input(
                format!("max_bytes{}/buffered_reader", max_bytes),
                encoded.as_slice(),
                |b, e| {
                    b.iter(|| {
                        let mut pos = 0;
                        BufferedReader::new(e, &mut pos)
                            .map(Result::unwrap)
                            .sum::<u64>()
                    })
                },
            );

            // Single word decode strategies over pre-loaded words.
            let words = input_value
                .iter()
                .map(|v| raw::encode_word(*v).0)
                .collect::<Vec<_>>();
            g.bench_with_input(
                format!("max_bytes{}/decode_word", max_bytes),
                words.as_slice(),
                |b, w| {
                    b.iter(|| {
                        w.iter()
                            .map(|x| raw::decode_word(black_box(*x)).unwrap().0)
                            .sum::<u64>()
                    })
                },
            );
            g.bench_with_input(
                format!("max_bytes{}/decode_word_table", max_bytes),
                words.as_slice(),
                |b, w| {
                    b.iter(|| {
                        w.iter()
                            .map(|x| raw::decode_word_table(black_box(*x)).unwrap().0)
                            .sum::<u64>()
                    })
                },
            );
            assert!(input_value.iter().all(|v| v.fast_uint_len() <= max_bytes));
        }
    }
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
