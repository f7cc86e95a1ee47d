#![no_main]
use libfuzzer_sys::fuzz_target;
use polyline_codec::Codec;

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }

    // First byte: dimensionality. Remaining bytes: little-endian i64 axes.
    let dim = usize::from(data[0] % 4) + 1;
    let codec = Codec::new(dim, 1.0).unwrap();
    let values: Vec<i64> = data[1..]
        .chunks_exact(8)
        .map(|c| i64::from_le_bytes(c.try_into().unwrap()) >> 11)
        .collect();
    let coords: Vec<Vec<f64>> = values
        .chunks_exact(dim)
        .map(|c| c.iter().map(|&v| v as f64).collect())
        .collect();

    let mut buf = Vec::new();
    codec.encode(&mut buf, &coords).unwrap();
    assert!(buf.iter().all(|&b| (63..127).contains(&b)));

    // Values below 2^53 are exact in f64, so the round-trip is exact.
    let (decoded, rest) = codec.decode(&buf).unwrap();
    assert!(rest.is_empty());
    assert_eq!(decoded, coords);
});
