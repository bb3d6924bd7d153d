//! E2E Test Suite 03: Round-Trip Properties
//!
//! Property tests over arbitrary payloads, configurations and window
//! fragmentation. Whatever the caller's buffer sizes, a compressed stream must
//! decode to the original bytes and the session counters must agree with the
//! bytes that actually crossed the windows.

use proptest::prelude::*;

use streamdeflate::{
    CompressionLevel, CompressorSession, ContainerFormat, DecompressorSession, FlushMode,
    InputWindow,
};

fn level_strategy() -> impl Strategy<Value = CompressionLevel> {
    prop_oneof![
        Just(CompressionLevel::Level0),
        Just(CompressionLevel::Level1),
        Just(CompressionLevel::Level2),
        Just(CompressionLevel::Level3),
    ]
}

fn flush_strategy() -> impl Strategy<Value = FlushMode> {
    prop_oneof![Just(FlushMode::None), Just(FlushMode::Sync), Just(FlushMode::Full)]
}

fn container_strategy() -> impl Strategy<Value = ContainerFormat> {
    prop_oneof![
        Just(ContainerFormat::Deflate),
        Just(ContainerFormat::Gzip),
        Just(ContainerFormat::GzipNoHeader),
        Just(ContainerFormat::Zlib),
    ]
}

/// Payloads that mix literal noise with runs so every block type shows up.
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..4_096),
        prop::collection::vec(prop::sample::select(b"abcab ".to_vec()), 0..8_192),
        (any::<u8>(), 0usize..10_000).prop_map(|(b, n)| vec![b; n]),
    ]
}

struct Compressed {
    bytes: Vec<u8>,
    consumed: u64,
}

fn compress_fragmented(
    data: &[u8],
    level: CompressionLevel,
    flush: FlushMode,
    container: ContainerFormat,
    in_chunk: usize,
    out_chunk: usize,
) -> Compressed {
    let mut s = CompressorSession::init(level, flush, container).unwrap();
    let mut bytes = Vec::new();
    let mut buf = vec![0u8; out_chunk];
    let mut consumed = 0u64;
    let mut pos = 0;
    let mut steps = 0usize;
    while !s.is_finished() {
        let end = (pos + in_chunk).min(data.len());
        let mut win = InputWindow::new(&data[pos..end]);
        let n = s
            .compress_step(&mut win, &mut buf, end == data.len())
            .unwrap();
        assert!(n <= out_chunk);
        bytes.extend_from_slice(&buf[..n]);
        consumed += win.offset() as u64;
        pos += win.offset();
        steps += 1;
        assert!(steps < 1_000_000, "compressor stalled");
    }
    assert_eq!(s.bytes_read(), consumed);
    assert_eq!(s.bytes_written(), bytes.len() as u64);
    Compressed { bytes, consumed }
}

fn decompress_fragmented(
    z: &[u8],
    container: ContainerFormat,
    in_chunk: usize,
    out_chunk: usize,
) -> Vec<u8> {
    let mut s = DecompressorSession::init(container);
    let mut out = Vec::new();
    let mut buf = vec![0u8; out_chunk];
    let mut pos = 0;
    let mut steps = 0usize;
    while !s.is_finished() {
        let end = (pos + in_chunk).min(z.len());
        let mut win = InputWindow::new(&z[pos..end]);
        let n = s.decompress_step(&mut win, &mut buf).unwrap();
        assert_eq!(win.len(), s.remaining());
        out.extend_from_slice(&buf[..n]);
        pos += win.offset();
        steps += 1;
        assert!(steps < 1_000_000, "decompressor stalled");
    }
    assert_eq!(pos, z.len(), "trailing input left after the stream end");
    assert_eq!(s.bytes_written(), out.len() as u64);
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_round_trip_any_fragmentation(
        data in payload_strategy(),
        level in level_strategy(),
        flush in flush_strategy(),
        container in container_strategy(),
        c_in in 1usize..2_048,
        c_out in 1usize..512,
        d_in in 1usize..512,
        d_out in 1usize..2_048,
    ) {
        let z = compress_fragmented(&data, level, flush, container, c_in, c_out);
        prop_assert_eq!(z.consumed, data.len() as u64);
        let plain = decompress_fragmented(&z.bytes, container, d_in, d_out);
        prop_assert_eq!(plain, data);
    }

    #[test]
    fn prop_fragmentation_does_not_change_the_decoded_bytes(
        data in prop::collection::vec(any::<u8>(), 1..2_000),
        container in container_strategy(),
        a in 1usize..64,
        b in 64usize..4_096,
    ) {
        let z = compress_fragmented(
            &data,
            CompressionLevel::Level1,
            FlushMode::None,
            container,
            data.len(),
            8_192,
        );
        let small = decompress_fragmented(&z.bytes, container, a, a);
        let large = decompress_fragmented(&z.bytes, container, b, b);
        prop_assert_eq!(&small, &large);
        prop_assert_eq!(small, data);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(
        garbage in prop::collection::vec(any::<u8>(), 0..1_024),
        container in container_strategy(),
        chunk in 1usize..128,
    ) {
        let mut s = DecompressorSession::init(container);
        let mut buf = [0u8; 256];
        let mut pos = 0;
        while !s.is_finished() && pos < garbage.len() {
            let end = (pos + chunk).min(garbage.len());
            let mut win = InputWindow::new(&garbage[pos..end]);
            match s.decompress_step(&mut win, &mut buf) {
                Ok(n) => {
                    if n == 0 && win.offset() == 0 {
                        break;
                    }
                    pos += win.offset();
                }
                Err(e) => {
                    prop_assert_eq!(win.offset(), 0);
                    prop_assert!(!e.is_retryable());
                    break;
                }
            }
        }
    }
}
