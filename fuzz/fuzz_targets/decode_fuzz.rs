#![no_main]
use libfuzzer_sys::fuzz_target;
use polyline_codec::{Codec, varint};

fuzz_target!(|data: &[u8]| {
    // The decoder must never panic — only return errors.
    let _ = Codec::DEFAULT.decode(data);
    let _ = varint::decode_uint(data);

    // Use the first byte to pick a dimensionality.
    if let Some((&dim, rest)) = data.split_first() {
        let codec = Codec::new(usize::from(dim % 8) + 1, 1e6).unwrap();
        let lazy: Vec<_> = codec.iter(rest).collect();
        let whole = codec.decode(rest);
        // The iterator and the whole-buffer decoder agree on success.
        if let Ok((coords, _)) = whole {
            assert_eq!(lazy.len(), coords.len());
        }
    }
});
