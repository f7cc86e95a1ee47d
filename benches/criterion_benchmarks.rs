use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use polyline_codec::{Codec, encode_uint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A random walk starting near Seattle, stepping up to ~100 m per point.
fn gen_track(len: usize, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lat = 47.6062;
    let mut lng = -122.3321;
    (0..len)
        .map(|_| {
            lat += rng.random_range(-0.001..0.001);
            lng += rng.random_range(-0.001..0.001);
            [lat, lng]
        })
        .collect()
}

fn encode_track(track: &[[f64; 2]]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(track.len() * 8);
    Codec::DEFAULT.encode(&mut buf, track).unwrap();
    buf
}

fn bench_encoding_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("encode_points_per_s");
    for len in [100usize, 10_000, 1_000_000] {
        let track = gen_track(len, 1);
        g.throughput(Throughput::Elements(len as u64));
        g.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| {
                let buf = encode_track(black_box(&track));
                black_box(buf);
            });
        });
    }
    g.finish();
}

fn bench_decoding_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("decode_bytes_per_s");
    for len in [100usize, 10_000, 1_000_000] {
        let encoded = encode_track(&gen_track(len, 2));
        g.throughput(Throughput::Bytes(encoded.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| {
                let out = Codec::DEFAULT.decode(black_box(&encoded)).unwrap();
                black_box(out.0);
            });
        });
    }
    g.finish();
}

fn bench_lazy_decode(c: &mut Criterion) {
    let encoded = encode_track(&gen_track(100_000, 3));
    c.bench_function("decode_iter_sum", |b| {
        b.iter(|| {
            let sum: f64 = Codec::DEFAULT
                .iter(black_box(&encoded))
                .map(|coord| coord.map(|c| c[0]).unwrap_or(0.0))
                .sum();
            black_box(sum);
        });
    });
}

fn bench_varint_widths(c: &mut Criterion) {
    let mut g = c.benchmark_group("encode_uint_by_width");
    for bits in [5u32, 20, 40, 64] {
        let value = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
        g.bench_with_input(BenchmarkId::from_parameter(bits), &value, |b, &value| {
            let mut buf = Vec::with_capacity(16);
            b.iter(|| {
                buf.clear();
                encode_uint(&mut buf, black_box(value));
                black_box(buf.len());
            });
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_encoding_speed,
    bench_decoding_speed,
    bench_lazy_decode,
    bench_varint_widths
);
criterion_main!(benches);
